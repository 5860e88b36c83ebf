// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Bound sequence parameters.
//!
//! While the trie walks input it collects untyped argument spans; once a
//! terminal node is reached the stored original pattern is replayed against
//! that span list to produce the typed parameter vector handlers consume.

use smallvec::SmallVec;

use crate::charset::CodePoint;

/// One bound parameter of a matched control sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// A numeric parameter (`%d`/`%2`/`%m` splits `;`-separated runs into
    /// one `Number` each; `%+c` yields the offset character value).
    Number(i64),
    /// A `%s` string parameter, still in decoded code-point form.
    String(Vec<CodePoint>),
}

impl Param {
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(_) => None,
        }
    }

    #[must_use]
    pub fn as_string(&self) -> Option<&[CodePoint]> {
        match self {
            Self::Number(_) => None,
            Self::String(s) => Some(s),
        }
    }
}

pub type Params = SmallVec<[Param; 4]>;

/// Argument span collected during the trie walk, before typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Arg<'a> {
    /// A `[0-9;]+` run.
    Number(&'a [CodePoint]),
    /// An arbitrary run terminated by the pattern's next literal.
    String(&'a [CodePoint]),
    /// A single literal (or `%+c` parameter character).
    Char(CodePoint),
}

/// Replay `original` (the stored pattern) against the collected args.
///
/// `%i` bumps a running increment which is applied to `%+c` extractions
/// only; numeric parameters are deliberately left untouched, matching the
/// original matcher.
pub(super) fn extract(original: &[u8], args: &[Arg<'_>]) -> Params {
    let mut params = Params::new();
    let mut increment: i64 = 0;
    let mut arg_iter = args.iter();
    let mut p = 0;

    while p < original.len() {
        if original[p] == b'%' && p + 1 < original.len() {
            match original[p + 1] {
                b'i' => {
                    increment += 1;
                    p += 2;
                    continue;
                }
                b'%' => {
                    let _literal = arg_iter.next();
                    p += 2;
                    continue;
                }
                b'd' | b'2' | b'm' => {
                    if let Some(Arg::Number(run)) = arg_iter.next() {
                        extract_numbers(run, &mut params);
                    }
                    p += 2;
                    continue;
                }
                b's' => {
                    if let Some(Arg::String(run)) = arg_iter.next() {
                        params.push(Param::String(run.to_vec()));
                    }
                    p += 2;
                    continue;
                }
                b'+' if p + 2 < original.len() => {
                    if let Some(Arg::Char(c)) = arg_iter.next() {
                        let base = i64::from(original[p + 2]);
                        params.push(Param::Number(i64::from(*c) - base + increment));
                    }
                    p += 3;
                    continue;
                }
                _ => {}
            }
        }
        // A literal byte consumed one collected arg.
        let _literal = arg_iter.next();
        p += 1;
    }
    params
}

/// Split a `[0-9;]+` run on `;` and parse each piece; empty pieces are 0.
fn extract_numbers(run: &[CodePoint], params: &mut Params) {
    let mut value: i64 = 0;
    for &c in run {
        if c == u32::from(';') {
            params.push(Param::Number(value));
            value = 0;
        } else {
            value = value.saturating_mul(10).saturating_add(i64::from(c & 0xf));
        }
    }
    params.push(Param::Number(value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cps(s: &str) -> Vec<CodePoint> { s.chars().map(u32::from).collect() }

    #[test]
    fn numeric_run_splits_on_semicolons() {
        let run = cps("38;5;17");
        let args = [Arg::Number(&run)];
        let params = extract(b"%m", &args);
        assert_eq!(
            params.as_slice(),
            &[Param::Number(38), Param::Number(5), Param::Number(17)]
        );
    }

    #[test]
    fn empty_numeric_segments_are_zero() {
        let run = cps("1;;3");
        let args = [Arg::Number(&run)];
        let params = extract(b"%m", &args);
        assert_eq!(
            params.as_slice(),
            &[Param::Number(1), Param::Number(0), Param::Number(3)]
        );
    }

    #[test]
    fn string_param_keeps_code_points() {
        let title = cps("hello");
        let semi = cps("2");
        let args = [Arg::Number(&semi), Arg::Char(u32::from(';')), Arg::String(&title)];
        let params = extract(b"%m;%s", &args);
        assert_eq!(params[0], Param::Number(2));
        assert_eq!(params[1], Param::String(cps("hello")));
    }

    #[test]
    fn increment_applies_to_parameter_chars_only() {
        // Mouse-style pattern: two %i then two %+ extractions.
        let args = [Arg::Char(u32::from('!')), Arg::Char(u32::from('"'))];
        let params = extract(b"%i%i%+ %+ ", &args);
        // '!' - ' ' = 1, plus increment 2 = 3; '"' - ' ' = 2, plus 2 = 4.
        assert_eq!(params.as_slice(), &[Param::Number(3), Param::Number(4)]);
    }

    #[test]
    fn literals_consume_args_without_emitting() {
        let num = cps("7");
        let args = [
            Arg::Char(u32::from('[')),
            Arg::Number(&num),
            Arg::Char(u32::from('m')),
        ];
        let params = extract(b"[%mm", &args);
        assert_eq!(params.as_slice(), &[Param::Number(7)]);
    }
}
