// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! ISO-2022 fragmenter and decoder.
//!
//! Raw child output is cut into three kinds of blocks: `CData` runs to be
//! decoded and printed, complete `Control` sequences, and a trailing
//! `Preserve` run that may be the prefix of an unfinished sequence and must
//! survive until the next feed. Control blocks drive the G-set designations
//! and shift state; CDATA blocks are decoded either through the open codeset
//! converter (the common case) or, when a national replacement set is
//! invoked, through the designated map's accumulator rules.
//!
//! CSI / OSC / PM / DCS introducers are not interpreted here: they pass
//! through as decoded code points for the downstream sequence matcher.

use smallvec::SmallVec;

use crate::bytebuf::ByteBuffer;
use crate::error::TermError;

use super::maps::{self, Designation, NARROW_MAPS, WIDE_FUDGE, WIDE_GMAPS, WIDE_MAPS};
use super::converter::{ConvStatus, Converter};
use super::width::{
    self, CodePoint, INVALID_CODEPOINT, ambiguous_width_from_locale, is_ambiguous,
    set_encoded_width,
};

const ESC: u8 = 0x1b;
const SO: u8 = 0x0e;
const SI: u8 = 0x0f;
const SS2: u8 = 0x8e;
const SS3: u8 = 0x8f;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    CData,
    Control,
    Preserve,
}

#[derive(Debug, Clone, Copy)]
struct Block {
    kind: BlockKind,
    start: usize,
    end: usize,
}

/// How long the control sequence starting at a candidate byte is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeqLen {
    /// Not actually a control sequence; treat the byte as plain data.
    NotControl,
    /// Might be a control sequence, but the tail is missing.
    Inconclusive,
    Complete(usize),
}

/// ISO-2022 designation and shift state plus the open codeset converter.
#[derive(Debug)]
pub struct Iso2022 {
    nrc_enabled: bool,
    /// GL invocation: which G-set printable bytes decode through.
    current: usize,
    /// Single-shift target, cleared after one character.
    override_slot: Option<usize>,
    g: [Designation; 4],
    codeset: String,
    native_codeset: String,
    conv: Converter,
    ambiguous_width: usize,
    scratch: Vec<CodePoint>,
}

impl Iso2022 {
    /// Create the state with the host's native codeset (UTF-8 when `None`).
    /// An unopenable codeset falls back to UTF-8 with a one-shot warning.
    #[must_use]
    pub fn new(native_codeset: Option<&str>) -> Self {
        let native = native_codeset.unwrap_or("UTF-8").to_owned();
        let (codeset, conv) = match Converter::open(&native) {
            Ok(conv) => (native.clone(), conv),
            Err(err) => {
                tracing::warn!(%err, "unable to open native codeset, using UTF-8 instead");
                (
                    "UTF-8".to_owned(),
                    Converter::open("UTF-8").expect("UTF-8 converter always opens"),
                )
            }
        };
        Self {
            nrc_enabled: true,
            current: 0,
            override_slot: None,
            g: [
                u32::from('B'),
                u32::from('0'),
                u32::from('J'),
                WIDE_FUDGE + u32::from('D'),
            ],
            codeset,
            native_codeset: native,
            conv,
            ambiguous_width: ambiguous_width_from_locale(),
            scratch: Vec::new(),
        }
    }

    #[must_use]
    pub fn codeset(&self) -> &str { &self.codeset }

    #[must_use]
    pub fn native_codeset(&self) -> &str { &self.native_codeset }

    /// Switch the converter to `codeset`. On failure the previous converter
    /// stays in effect and the error is returned to the caller.
    pub fn set_codeset(&mut self, codeset: &str) -> Result<(), TermError> {
        let conv = Converter::open(codeset)?;
        self.codeset = codeset.to_owned();
        self.conv = conv;
        // The ambiguous class is locale-bound; re-consult on codeset change.
        self.ambiguous_width = ambiguous_width_from_locale();
        Ok(())
    }

    pub fn set_nrc_enabled(&mut self, enabled: bool) { self.nrc_enabled = enabled; }

    #[must_use]
    pub fn nrc_enabled(&self) -> bool { self.nrc_enabled }

    /// Reset designations and shift state, keeping the codeset.
    pub fn reset(&mut self) {
        self.nrc_enabled = true;
        self.current = 0;
        self.override_slot = None;
        self.g = [
            u32::from('B'),
            u32::from('0'),
            u32::from('J'),
            WIDE_FUDGE + u32::from('D'),
        ];
    }

    /// Decode as much of `input` as possible, appending code points to
    /// `out`. Consumes the decoded prefix from `input`; an inconclusive tail
    /// stays put for the next feed. Returns whether a codeset announcement
    /// switched the converter.
    pub fn process(&mut self, input: &mut ByteBuffer, out: &mut Vec<CodePoint>) -> bool {
        let blocks = fragment_input(input.as_slice());
        let mut codeset_changed = false;
        let mut preserve_from: Option<usize> = None;

        let last = blocks.len().saturating_sub(1);
        for (i, block) in blocks.iter().enumerate() {
            let bytes = &input.as_slice()[block.start..block.end];
            match block.kind {
                BlockKind::CData => {
                    // A single-shifted character or an embedded 8-bit shift
                    // only consumes part of the run; keep going until the
                    // block is drained or decoding stalls on missing bytes.
                    let mut initial = 0;
                    while initial < bytes.len() {
                        let consumed = self.process_cdata(&bytes[initial..], out);
                        if consumed == 0 {
                            break;
                        }
                        initial += consumed;
                    }
                    if initial < bytes.len() {
                        if i == last {
                            preserve_from = Some(block.start + initial);
                        } else {
                            tracing::debug!(
                                dropped = bytes.len() - initial,
                                "dropping undecodable bytes cut off by a control sequence"
                            );
                        }
                    }
                }
                BlockKind::Control => {
                    codeset_changed |= self.process_control(bytes, out);
                }
                BlockKind::Preserve => {
                    preserve_from = Some(block.start);
                }
            }
        }

        match preserve_from {
            Some(start) => input.consume(start),
            None => input.clear(),
        }
        codeset_changed
    }

    /// Decode one plain-data run. Returns the number of bytes consumed.
    fn process_cdata(&mut self, cdata: &[u8], out: &mut Vec<CodePoint>) -> usize {
        let single = self.override_slot.is_some();
        let current = self.override_slot.take().unwrap_or(self.current);

        if !self.nrc_enabled || self.g[current] == u32::from('B') {
            self.decode_through_converter(cdata, out)
        } else {
            self.decode_through_map(cdata, self.g[current], single, out)
        }
    }

    fn decode_through_converter(&mut self, cdata: &[u8], out: &mut Vec<CodePoint>) -> usize {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.clear();
        let mut consumed = 0;

        while consumed < cdata.len() {
            let step = self.conv.convert(&cdata[consumed..], &mut scratch);
            consumed += step.consumed;
            match step.status {
                ConvStatus::Ok => break,
                ConvStatus::Incomplete => break,
                ConvStatus::Invalid => {
                    // An invalid byte may be an 8-bit single shift smuggled
                    // into the stream; otherwise substitute and move on.
                    match self.try_8_bit_sequence(&cdata[consumed..], &mut scratch) {
                        EightBit::Consumed(n) => consumed += n,
                        EightBit::NeedMore => break,
                        EightBit::No => {
                            tracing::debug!(
                                byte = cdata[consumed],
                                codeset = %self.codeset,
                                "invalid byte in stream, substituting"
                            );
                            scratch.push(INVALID_CODEPOINT);
                            consumed += 1;
                        }
                    }
                }
            }
        }

        out.extend(scratch.drain(..).filter(|&c| c != 0).map(|c| {
            if is_ambiguous(c) {
                set_encoded_width(c, self.ambiguous_width)
            } else {
                c
            }
        }));
        self.scratch = scratch;
        consumed
    }

    /// Probe for an 8-bit SS2/SS3 introducing one character from G2/G3.
    fn try_8_bit_sequence(&self, bytes: &[u8], out: &mut Vec<CodePoint>) -> EightBit {
        let slot = match bytes.first() {
            Some(&SS2) => 2,
            Some(&SS3) => 3,
            _ => return EightBit::No,
        };
        let designation = self.g[slot];
        let props = maps::map_properties(designation);
        if bytes.len() < props.bytes_per_char + 1 {
            return EightBit::NeedMore;
        }
        let mut acc: u32 = 0;
        for &b in &bytes[1..=props.bytes_per_char] {
            acc = (acc << 8) | u32::from(b);
        }
        let key = (acc & props.and_mask) | props.or_mask;
        match maps::map_lookup(designation, key) {
            Some(c) => {
                let w = if props.force_width != 0 {
                    props.force_width
                } else if is_ambiguous(c) {
                    self.ambiguous_width
                } else {
                    // Leave implicit.
                    return push_and_consume(out, c, props.bytes_per_char + 1);
                };
                out.push(set_encoded_width(c, w));
            }
            None => {
                tracing::trace!(acc = format_args!("{key:04x}"), "unmapped single-shift character");
                out.push(key);
            }
        }
        EightBit::Consumed(props.bytes_per_char + 1)
    }

    /// Decode through the designated map's accumulator rules (NRC on and a
    /// non-ASCII set invoked).
    fn decode_through_map(
        &self,
        cdata: &[u8],
        designation: Designation,
        single: bool,
        out: &mut Vec<CodePoint>,
    ) -> usize {
        let props = maps::map_properties(designation);
        let mut consumed = 0;

        while consumed + props.bytes_per_char <= cdata.len() {
            let mut acc: u32 = 0;
            for &b in &cdata[consumed..consumed + props.bytes_per_char] {
                acc = (acc << 8) | u32::from(b);
            }
            consumed += props.bytes_per_char;
            let key = (acc & props.and_mask) | props.or_mask;
            match maps::map_lookup(designation, key) {
                Some(c) => {
                    let w = if props.force_width != 0 {
                        props.force_width
                    } else if is_ambiguous(c) {
                        self.ambiguous_width
                    } else {
                        0
                    };
                    out.push(if w != 0 { set_encoded_width(c, w) } else { c });
                }
                None if acc != 0 => {
                    tracing::trace!(
                        acc = format_args!("{key:05x}"),
                        set = designation,
                        "unmapped character, emitting accumulator"
                    );
                    out.push(key);
                }
                None => {}
            }
            if single {
                break;
            }
        }
        consumed
    }

    /// Apply one complete control block. Returns whether the codeset
    /// changed.
    #[allow(clippy::too_many_lines)]
    fn process_control(&mut self, ctl: &[u8], out: &mut Vec<CodePoint>) -> bool {
        match ctl[0] {
            b'\r' => {
                self.current = 0;
                self.override_slot = None;
                out.push(u32::from('\r'));
            }
            b'\n' => {
                self.current = 0;
                self.override_slot = None;
                out.push(u32::from('\n'));
            }
            SO => {
                self.current = 1;
                self.override_slot = None;
            }
            SI => {
                self.current = 0;
                self.override_slot = None;
            }
            SS2 => self.override_slot = Some(2),
            SS3 => self.override_slot = Some(3),
            ESC if ctl.len() >= 2 => match ctl[1] {
                // The structured string families are the matcher's business.
                b'[' | b']' | b'^' | b'P' => {
                    out.extend(ctl.iter().map(|&b| u32::from(b)));
                }
                b'N' => self.override_slot = Some(2),
                b'O' => self.override_slot = Some(3),
                b'n' => {
                    self.current = 2;
                    self.override_slot = None;
                }
                b'o' => {
                    self.current = 3;
                    self.override_slot = None;
                }
                selector @ (b'(' | b')' | b'*' | b'+') if ctl.len() >= 3 => {
                    let slot = usize::from(selector - b'(');
                    let c = char::from(ctl[2]);
                    if NARROW_MAPS.contains(c) {
                        self.g[slot] = u32::from(c);
                        tracing::trace!(slot, set = %c, "designated narrow map");
                    } else {
                        tracing::warn!(set = %c, "attempt to designate invalid narrow map");
                    }
                }
                b'%' if ctl.len() >= 3 => {
                    return self.announce_codeset(ctl[2]);
                }
                b'$' if ctl.len() >= 4 => {
                    let slot = usize::from(ctl[2] - b'(');
                    let c = char::from(ctl[3]);
                    if WIDE_MAPS.contains(c) || WIDE_GMAPS.contains(c) {
                        self.g[slot] = WIDE_FUDGE + u32::from(c);
                        tracing::trace!(slot, set = %c, "designated wide map");
                    } else {
                        tracing::warn!(set = %c, "attempt to designate invalid wide map");
                    }
                }
                b'$' if ctl.len() >= 3 => {
                    let c = char::from(ctl[2]);
                    if WIDE_MAPS.contains(c) {
                        self.g[0] = WIDE_FUDGE + u32::from(c);
                        tracing::trace!(set = %c, "designated wide map into G0");
                    } else {
                        tracing::warn!(set = %c, "attempt to designate invalid wide map");
                    }
                }
                other => {
                    tracing::debug!(byte = other, "unhandled two-byte escape in control block");
                }
            },
            other => {
                tracing::debug!(byte = other, "unexpected control block lead byte");
            }
        }
        false
    }

    fn announce_codeset(&mut self, which: u8) -> bool {
        let target = match which {
            b'@' => self.native_codeset.clone(),
            b'G' => "UTF-8".to_owned(),
            _ => {
                // An "identified coding system" we haven't heard of; see
                // ECMA-35 for the gory details.
                tracing::warn!(byte = which, "unrecognized identified coding system");
                return false;
            }
        };
        let changed = self.codeset != target;
        if let Err(err) = self.set_codeset(&target) {
            tracing::warn!(%err, "codeset announcement failed");
            return false;
        }
        changed
    }

    /// Remap one code point for the alternate-charset cell path.
    #[must_use]
    pub fn process_single(&self, c: CodePoint, designation: Designation) -> CodePoint {
        maps::process_single(c, designation)
    }

    /// Column width of `c` honouring the embedded width bits, with the
    /// locale-resolved fallback for implicit widths.
    #[must_use]
    pub fn unichar_width(&self, c: CodePoint) -> usize {
        let encoded = width::encoded_width(c);
        if encoded != 0 {
            return encoded;
        }
        width::unichar_width(c, self.ambiguous_width)
    }
}

enum EightBit {
    Consumed(usize),
    NeedMore,
    No,
}

fn push_and_consume(out: &mut Vec<CodePoint>, c: CodePoint, n: usize) -> EightBit {
    out.push(c);
    EightBit::Consumed(n)
}

/// Position of the next byte that can start a control sequence.
fn find_next_control(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| {
        matches!(b, ESC | b'\n' | b'\r' | SO | SI)
            || (cfg!(feature = "eight-bit-controls") && matches!(b, SS2 | SS3))
    })
}

/// Length of the control sequence at `bytes[0]`, per the fixed table.
#[allow(clippy::too_many_lines)]
fn sequence_length(bytes: &[u8]) -> SeqLen {
    match bytes[0] {
        b'\n' | b'\r' | SO | SI => SeqLen::Complete(1),
        SS2 | SS3 => SeqLen::Complete(1),
        ESC => {
            if bytes.len() < 2 {
                return SeqLen::Inconclusive;
            }
            match bytes[1] {
                b'[' => {
                    // CSI: the first final byte in 0x40..=0x7E ends the
                    // sequence.
                    for (i, &b) in bytes.iter().enumerate().skip(2) {
                        if (0x40..=0x7e).contains(&b) {
                            return SeqLen::Complete(i + 1);
                        }
                    }
                    SeqLen::Inconclusive
                }
                b'P' => {
                    // DCS: runs to the string terminator.
                    if let Some(i) = bytes.windows(2).skip(2).position(|w| w == [ESC, b'\\']) {
                        SeqLen::Complete(i + 2 + 2)
                    } else {
                        SeqLen::Inconclusive
                    }
                }
                b'N' | b'O' | b'n' | b'o' => SeqLen::Complete(2),
                b'(' | b')' | b'*' | b'+' => {
                    if bytes.len() < 3 {
                        SeqLen::Inconclusive
                    } else {
                        // Just accept whatever; the control pass validates.
                        SeqLen::Complete(3)
                    }
                }
                b'%' => {
                    if bytes.len() < 3 {
                        SeqLen::Inconclusive
                    } else if matches!(bytes[2], b'@' | b'G') {
                        SeqLen::Complete(3)
                    } else {
                        SeqLen::NotControl
                    }
                }
                b'$' => {
                    if bytes.len() < 3 {
                        return SeqLen::Inconclusive;
                    }
                    match bytes[2] {
                        b'@' | b'B' => SeqLen::Complete(3),
                        b'(' | b')' | b'*' | b'+' => {
                            if bytes.len() < 4 {
                                SeqLen::Inconclusive
                            } else if WIDE_GMAPS.contains(char::from(bytes[3])) {
                                SeqLen::Complete(4)
                            } else {
                                SeqLen::NotControl
                            }
                        }
                        _ => SeqLen::NotControl,
                    }
                }
                _ => SeqLen::NotControl,
            }
        }
        _ => SeqLen::NotControl,
    }
}

/// Cut `input` into CDATA / CONTROL / PRESERVE blocks.
fn fragment_input(input: &[u8]) -> SmallVec<[Block; 8]> {
    let mut blocks = SmallVec::new();
    let mut p = 0;

    while p < input.len() {
        let Some(rel) = find_next_control(&input[p..]) else {
            // Garden-variety data to the end.
            blocks.push(Block {
                kind: BlockKind::CData,
                start: p,
                end: input.len(),
            });
            break;
        };
        let ctl = p + rel;
        if ctl != p {
            blocks.push(Block {
                kind: BlockKind::CData,
                start: p,
                end: ctl,
            });
        }
        match sequence_length(&input[ctl..]) {
            SeqLen::NotControl => {
                blocks.push(Block {
                    kind: BlockKind::CData,
                    start: ctl,
                    end: ctl + 1,
                });
                p = ctl + 1;
            }
            SeqLen::Inconclusive => {
                blocks.push(Block {
                    kind: BlockKind::Preserve,
                    start: ctl,
                    end: input.len(),
                });
                break;
            }
            SeqLen::Complete(n) => {
                blocks.push(Block {
                    kind: BlockKind::Control,
                    start: ctl,
                    end: ctl + n,
                });
                p = ctl + n;
            }
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(state: &mut Iso2022, bytes: &[u8]) -> Vec<CodePoint> {
        let mut buf = ByteBuffer::new();
        buf.append(bytes);
        let mut out = Vec::new();
        state.process(&mut buf, &mut out);
        out
    }

    fn chars_of(points: &[CodePoint]) -> String {
        points.iter().map(|&c| width::to_char(c)).collect()
    }

    #[test]
    fn plain_ascii_passes_through() {
        let mut state = Iso2022::new(None);
        let out = decode(&mut state, b"hello");
        assert_eq!(chars_of(&out), "hello");
    }

    #[test]
    fn cr_and_lf_are_emitted_and_reset_shift() {
        let mut state = Iso2022::new(None);
        // Shift to G1 (DEC graphics), then LF must shift back to G0.
        let out = decode(&mut state, b"\x0eq\nq");
        assert_eq!(width::raw_scalar(out[0]), 0x2500);
        assert_eq!(out[1], u32::from('\n'));
        assert_eq!(out[2], u32::from('q'));
    }

    #[test]
    fn csi_passes_through_to_matcher() {
        let mut state = Iso2022::new(None);
        let out = decode(&mut state, b"\x1b[2;3Hx");
        assert_eq!(chars_of(&out), "\u{1b}[2;3Hx");
    }

    #[test]
    fn csi_final_bytes_cover_the_whole_range() {
        // `}` (DECIC) and `~` (DECLL) are valid final bytes; neither may
        // stall the stream as an unfinished sequence.
        let mut state = Iso2022::new(None);
        let mut buf = ByteBuffer::new();
        buf.append(b"\x1b[2}\x1b[~after");
        let mut out = Vec::new();
        state.process(&mut buf, &mut out);
        assert!(buf.is_empty());
        assert_eq!(chars_of(&out), "\u{1b}[2}\u{1b}[~after");
    }

    #[test]
    fn incomplete_csi_is_preserved() {
        let mut state = Iso2022::new(None);
        let mut buf = ByteBuffer::new();
        buf.append(b"ab\x1b[12");
        let mut out = Vec::new();
        state.process(&mut buf, &mut out);
        assert_eq!(chars_of(&out), "ab");
        assert_eq!(buf.as_slice(), b"\x1b[12");

        // The rest arrives; decoding picks up where it left off.
        buf.append(b";5H");
        out.clear();
        state.process(&mut buf, &mut out);
        assert_eq!(chars_of(&out), "\u{1b}[12;5H");
        assert!(buf.is_empty());
    }

    #[test]
    fn incomplete_utf8_is_preserved() {
        let mut state = Iso2022::new(None);
        let mut buf = ByteBuffer::new();
        buf.append(b"a\xc3");
        let mut out = Vec::new();
        state.process(&mut buf, &mut out);
        assert_eq!(chars_of(&out), "a");
        assert_eq!(buf.as_slice(), b"\xc3");

        buf.append(b"\xa9");
        out.clear();
        state.process(&mut buf, &mut out);
        assert_eq!(chars_of(&out), "é");
    }

    #[test]
    fn invalid_byte_is_substituted() {
        let mut state = Iso2022::new(None);
        let out = decode(&mut state, b"a\xffb");
        assert_eq!(out[0], u32::from('a'));
        assert_eq!(out[1], INVALID_CODEPOINT);
        assert_eq!(out[2], u32::from('b'));
    }

    #[test]
    fn designate_and_shift_dec_graphics() {
        let mut state = Iso2022::new(None);
        // G1 already defaults to '0'; designate explicitly anyway, then SO.
        let out = decode(&mut state, b"\x1b)0\x0ejk\x0fjk");
        assert_eq!(width::raw_scalar(out[0]), 0x2518);
        assert_eq!(width::raw_scalar(out[1]), 0x2510);
        assert_eq!(chars_of(&out[2..]), "jk");
    }

    #[test]
    fn invalid_designation_is_ignored() {
        let mut state = Iso2022::new(None);
        let before = state.g;
        let _out = decode(&mut state, b"\x1b(q");
        assert_eq!(state.g, before);
    }

    #[test]
    fn single_shift_affects_one_character() {
        let mut state = Iso2022::new(None);
        // SS2 via ESC N: G2 defaults to 'J' (JIS X 0201 Roman), where
        // backslash is a yen sign. The next character decodes normally.
        let out = decode(&mut state, b"\x1bN\\\\");
        assert_eq!(width::raw_scalar(out[0]), 0x00a5);
        assert_eq!(out[1], u32::from('\\'));
    }

    #[test]
    fn wide_designation_decodes_jis() {
        let mut state = Iso2022::new(None);
        // ESC $ B designates JIS X 0208 into G0; 0x34 0x41 is "漢".
        let out = decode(&mut state, b"\x1b$B\x34\x41\x1b(Bz");
        assert_eq!(width::raw_scalar(out[0]), u32::from('漢'));
        assert_eq!(width::encoded_width(out[0]), 2);
        assert_eq!(out[1], u32::from('z'));
    }

    #[test]
    fn codeset_announcement_switches_and_notifies() {
        let mut state = Iso2022::new(Some("ISO-8859-1"));
        let mut buf = ByteBuffer::new();
        buf.append(b"\x1b%G");
        let mut out = Vec::new();
        let changed = state.process(&mut buf, &mut out);
        assert!(changed);
        assert_eq!(state.codeset(), "UTF-8");

        // Announcing the same codeset again does not notify.
        buf.append(b"\x1b%G");
        let changed = state.process(&mut buf, &mut out);
        assert!(!changed);
    }

    #[test]
    fn split_designation_escape_is_preserved() {
        let mut state = Iso2022::new(None);
        let mut buf = ByteBuffer::new();
        buf.append(b"\x1b$");
        let mut out = Vec::new();
        state.process(&mut buf, &mut out);
        assert!(out.is_empty());
        assert_eq!(buf.as_slice(), b"\x1b$");

        buf.append(b"B\x34\x41");
        state.process(&mut buf, &mut out);
        assert_eq!(width::raw_scalar(out[0]), u32::from('漢'));
    }

    #[test]
    fn unknown_escape_degrades_to_data() {
        let mut state = Iso2022::new(None);
        // ESC x is no ISO-2022 control; the ESC becomes data for the
        // matcher to reject downstream.
        let out = decode(&mut state, b"\x1bz");
        assert_eq!(out[0], u32::from(ESC));
        assert_eq!(out[1], u32::from('z'));
    }

    #[test]
    fn dcs_passes_through_whole() {
        let mut state = Iso2022::new(None);
        let out = decode(&mut state, b"\x1bPdata\x1b\\after");
        assert_eq!(chars_of(&out), "\u{1b}Pdata\u{1b}\\after");
    }
}
