// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Codeset-to-code-point conversion facade.
//!
//! Wraps the conversion engine behind iconv-shaped semantics: a handle is
//! opened for one source codeset, and each `convert` call consumes as much
//! input as it can, reporting whether it stopped because the input ran out,
//! ended in a possibly-incomplete multi-byte sequence, or hit a byte that
//! can never start a valid one. The caller owns the unconsumed suffix.

use crate::error::TermError;

use super::width::CodePoint;

/// Why a `convert` call stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvStatus {
    /// All input consumed.
    Ok,
    /// The trailing bytes may be the prefix of a multi-byte character; retry
    /// once more input arrives.
    Incomplete,
    /// The byte at the consumed offset is invalid in this codeset.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convert {
    /// Bytes consumed from the front of the input.
    pub consumed: usize,
    pub status: ConvStatus,
}

/// An open conversion handle for `codeset` → code points.
#[derive(Debug)]
pub struct Converter {
    encoding: &'static encoding_rs::Encoding,
    name: String,
}

impl Converter {
    /// Open a converter, or fail if the engine has no decoder for the label.
    pub fn open(codeset: &str) -> Result<Self, TermError> {
        let encoding = encoding_rs::Encoding::for_label(codeset.as_bytes()).ok_or_else(|| {
            TermError::EncodingOpenFailed {
                from: codeset.to_owned(),
                to: "code points".to_owned(),
            }
        })?;
        Ok(Self {
            encoding,
            name: codeset.to_owned(),
        })
    }

    /// The label this handle was opened with (not the engine's canonical
    /// name; `ESC % @` round-trips compare against the embedder's label).
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    #[must_use]
    pub fn is_utf8(&self) -> bool { self.encoding == encoding_rs::UTF_8 }

    /// Decode a prefix of `input`, appending code points to `out`.
    pub fn convert(&self, input: &[u8], out: &mut Vec<CodePoint>) -> Convert {
        if self.is_utf8() {
            return convert_utf8(input, out);
        }
        self.convert_legacy(input, out)
    }

    fn convert_legacy(&self, input: &[u8], out: &mut Vec<CodePoint>) -> Convert {
        use encoding_rs::DecoderResult;

        // A fresh decoder per call: the unconsumed suffix lives in the
        // caller's byte buffer, never inside engine state.
        let mut decoder = self.encoding.new_decoder_without_bom_handling();
        let mut dst = vec![0u8; input.len().max(4) * 4];
        let mut consumed = 0;

        loop {
            let (result, read, written) = decoder.decode_to_utf8_without_replacement(
                &input[consumed..],
                &mut dst,
                true,
            );
            consumed += read;
            let text = std::str::from_utf8(&dst[..written]).unwrap_or_default();
            out.extend(text.chars().map(u32::from));
            match result {
                DecoderResult::InputEmpty => {
                    return Convert {
                        consumed,
                        status: ConvStatus::Ok,
                    };
                }
                DecoderResult::OutputFull => {
                    // dst was sized for worst-case expansion; still, grow and
                    // continue rather than trust the arithmetic.
                    dst.resize(dst.len() * 2, 0);
                }
                DecoderResult::Malformed(bad, pushed_back) => {
                    let seq_len = usize::from(bad) + usize::from(pushed_back);
                    consumed -= seq_len;
                    // A malformed sequence flush against the end of input may
                    // just be truncated; wait for more bytes. Mid-stream it
                    // is definitively invalid.
                    let status = if consumed + seq_len == input.len() && seq_len < 4 {
                        ConvStatus::Incomplete
                    } else {
                        ConvStatus::Invalid
                    };
                    return Convert { consumed, status };
                }
            }
        }
    }
}

fn convert_utf8(input: &[u8], out: &mut Vec<CodePoint>) -> Convert {
    match std::str::from_utf8(input) {
        Ok(text) => {
            out.extend(text.chars().map(u32::from));
            Convert {
                consumed: input.len(),
                status: ConvStatus::Ok,
            }
        }
        Err(err) => {
            let valid = err.valid_up_to();
            let text = std::str::from_utf8(&input[..valid]).unwrap_or_default();
            out.extend(text.chars().map(u32::from));
            let status = match err.error_len() {
                None => ConvStatus::Incomplete,
                Some(_) => ConvStatus::Invalid,
            };
            Convert {
                consumed: valid,
                status,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode_all(conv: &Converter, input: &[u8]) -> (Vec<u32>, Convert) {
        let mut out = Vec::new();
        let result = conv.convert(input, &mut out);
        (out, result)
    }

    #[test]
    fn unknown_codeset_is_an_error() {
        assert!(Converter::open("no-such-charset").is_err());
    }

    #[test]
    fn utf8_clean_input() {
        let conv = Converter::open("UTF-8").unwrap();
        let (out, r) = decode_all(&conv, "héllo".as_bytes());
        assert_eq!(r.status, ConvStatus::Ok);
        assert_eq!(r.consumed, 6);
        assert_eq!(out, vec![0x68, 0xe9, 0x6c, 0x6c, 0x6f]);
    }

    #[test]
    fn utf8_truncated_tail_is_incomplete() {
        let conv = Converter::open("UTF-8").unwrap();
        // "é" is 0xC3 0xA9; feed only the first byte.
        let (out, r) = decode_all(&conv, b"ab\xc3");
        assert_eq!(out, vec![0x61, 0x62]);
        assert_eq!(r.consumed, 2);
        assert_eq!(r.status, ConvStatus::Incomplete);
    }

    #[test]
    fn utf8_stray_continuation_is_invalid() {
        let conv = Converter::open("UTF-8").unwrap();
        let (out, r) = decode_all(&conv, b"a\xa9b");
        assert_eq!(out, vec![0x61]);
        assert_eq!(r.consumed, 1);
        assert_eq!(r.status, ConvStatus::Invalid);
    }

    #[test]
    fn latin1_is_total() {
        let conv = Converter::open("ISO-8859-1").unwrap();
        let (out, r) = decode_all(&conv, b"a\xe9z");
        assert_eq!(r.status, ConvStatus::Ok);
        assert_eq!(out, vec![0x61, 0xe9, 0x7a]);
    }

    #[test]
    fn euc_jp_decodes_pairs() {
        let conv = Converter::open("EUC-JP").unwrap();
        // 0xB4 0xC1 is "漢".
        let (out, r) = decode_all(&conv, b"\xb4\xc1");
        assert_eq!(r.status, ConvStatus::Ok);
        assert_eq!(out, vec![u32::from('漢')]);
    }

    #[test]
    fn euc_jp_split_pair_is_incomplete() {
        let conv = Converter::open("EUC-JP").unwrap();
        let (out, r) = decode_all(&conv, b"A\xb4");
        assert_eq!(out, vec![u32::from('A')]);
        assert_eq!(r.consumed, 1);
        assert_eq!(r.status, ConvStatus::Incomplete);
    }
}
