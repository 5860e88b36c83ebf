// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Termcap entry source parser.
//!
//! Parses the classic `name|alias|description:cap:cap=value:cap#num:` form.
//! String capability values are unescaped into raw bytes (`\E`, `^X`, octal,
//! and the C-style singles), but `%` placeholder sequences are kept verbatim
//! for the sequence matcher to compile.

use nom::IResult;
use nom::Parser;
use nom::bytes::complete::{take_till, take_till1};
use nom::character::complete::char;
use nom::multi::many0;
use nom::sequence::preceded;

/// One parsed termcap entry.
#[derive(Debug, Default)]
pub struct Entry {
    pub names: Vec<String>,
    pub booleans: Vec<String>,
    pub numerics: Vec<(String, i64)>,
    /// Insertion order is kept: later registrations win matcher collisions.
    pub strings: Vec<(String, Vec<u8>)>,
}

impl Entry {
    #[must_use]
    pub fn find_boolean(&self, cap: &str) -> bool {
        self.booleans.iter().any(|b| b == cap)
    }

    #[must_use]
    pub fn find_numeric(&self, cap: &str) -> Option<i64> {
        self.numerics.iter().find(|(name, _)| name == cap).map(|&(_, v)| v)
    }

    #[must_use]
    pub fn find_string(&self, cap: &str) -> Option<&[u8]> {
        self.strings
            .iter()
            .find(|(name, _)| name == cap)
            .map(|(_, v)| v.as_slice())
    }
}

fn name_field(input: &str) -> IResult<&str, &str> {
    take_till1(|c| c == ':').parse(input)
}

fn capability_fields(input: &str) -> IResult<&str, Vec<&str>> {
    many0(preceded(char(':'), take_till(|c| c == ':'))).parse(input)
}

/// Parse one entry. Returns `None` when the source is not even shaped like
/// a termcap line; individual malformed capabilities are skipped with a
/// warning instead.
#[must_use]
pub fn parse_entry(source: &str) -> Option<Entry> {
    let source = source.trim();
    let (rest, names) = name_field(source).ok()?;
    let (_, caps) = capability_fields(rest).ok()?;

    let mut entry = Entry {
        names: names.split('|').map(str::to_owned).collect(),
        ..Entry::default()
    };

    for cap in caps {
        let cap = cap.trim();
        if cap.is_empty() {
            continue;
        }
        if let Some((name, value)) = cap.split_once('=') {
            entry.strings.push((name.to_owned(), unescape(value)));
        } else if let Some((name, value)) = cap.split_once('#') {
            match value.parse::<i64>() {
                Ok(n) => entry.numerics.push((name.to_owned(), n)),
                Err(_) => tracing::warn!(cap, "malformed numeric capability"),
            }
        } else {
            entry.booleans.push(cap.to_owned());
        }
    }
    Some(entry)
}

/// Unescape a termcap string value into bytes.
fn unescape(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => {
                i += 1;
                match bytes[i] {
                    b'E' | b'e' => out.push(0x1b),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    d @ b'0'..=b'7' => {
                        let mut v = u32::from(d - b'0');
                        let mut taken = 1;
                        while taken < 3 && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit() {
                            i += 1;
                            taken += 1;
                            v = v * 8 + u32::from(bytes[i] - b'0');
                        }
                        out.push((v & 0xff) as u8);
                    }
                    other => out.push(other),
                }
                i += 1;
            }
            b'^' if i + 1 < bytes.len() => {
                i += 1;
                let c = bytes[i];
                out.push(if c == b'?' { 0x7f } else { c & 0x1f });
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    out
}
