// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Selection state and selection-safe text extraction.
//!
//! The core tracks one selection region and knows how to turn any row/cell
//! rectangle back into text: fragments are skipped so wide glyphs and
//! stretched tabs come out once, and row boundaries become newlines only
//! where the row did not soft-wrap (matching what xterm copies).

use crate::charset::{self, CodePoint};
use crate::term::events::TermEvent;
use crate::term::terminal::Terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SelectionKind {
    #[default]
    Char,
    Word,
    Line,
}

/// The single selection region owned by the terminal. Coordinates are
/// `(column, absolute row)` pairs, inclusive.
#[derive(Debug, Default)]
pub struct Selection {
    pub active: bool,
    pub start: (i64, i64),
    pub end: (i64, i64),
    pub kind: SelectionKind,
    /// Inclusive scalar ranges counting as word characters; empty means
    /// "alphanumerics only".
    word_ranges: Vec<(u32, u32)>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Configure which characters bind words together, from a spec string
    /// like `"-A-Za-z0-9_"` (leading `-` is literal).
    pub fn set_word_chars(&mut self, spec: &str) {
        self.word_ranges.clear();
        let chars: Vec<char> = spec.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if i + 2 < chars.len() && chars[i + 1] == '-' {
                self.word_ranges
                    .push((u32::from(chars[i]), u32::from(chars[i + 2])));
                i += 3;
            } else {
                self.word_ranges.push((u32::from(chars[i]), u32::from(chars[i])));
                i += 1;
            }
        }
    }

    #[must_use]
    pub fn is_word_char(&self, c: CodePoint) -> bool {
        let scalar = charset::raw_scalar(c);
        if self.word_ranges.is_empty() {
            return char::from_u32(scalar).is_some_and(char::is_alphanumeric);
        }
        self.word_ranges
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&scalar))
    }
}

/// One extracted character's attributes, the side-channel of
/// [`Terminal::get_text_range_with_attributes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAttr {
    pub row: i64,
    pub col: i64,
    pub fore: u16,
    pub back: u16,
    pub underline: bool,
    pub strikethrough: bool,
}

impl Terminal {
    /// Replace the selection, expanding it per `kind`, and announce the
    /// change.
    pub fn select_region(
        &mut self,
        start: (i64, i64),
        end: (i64, i64),
        kind: SelectionKind,
    ) {
        let (mut start, mut end) = if (start.1, start.0) <= (end.1, end.0) {
            (start, end)
        } else {
            (end, start)
        };

        match kind {
            SelectionKind::Char => {}
            SelectionKind::Word => {
                start.0 = self.word_start(start.1, start.0);
                end.0 = self.word_end(end.1, end.0);
            }
            SelectionKind::Line => {
                start.0 = 0;
                end.0 = self.column_count - 1;
                // Soft-wrapped rows belong to one logical line.
                while start.1 > self.screen().row_data.delta()
                    && self
                        .row(start.1 - 1)
                        .is_some_and(|row| row.soft_wrapped)
                {
                    start.1 -= 1;
                }
                while self.row(end.1).is_some_and(|row| row.soft_wrapped) {
                    end.1 += 1;
                }
            }
        }

        self.selection.active = true;
        self.selection.start = start;
        self.selection.end = end;
        self.selection.kind = kind;
        self.emit(TermEvent::SelectionChanged);
    }

    pub fn clear_selection(&mut self) {
        if self.selection.active {
            self.selection.clear();
            self.emit(TermEvent::SelectionChanged);
        }
    }

    /// Configure the word-character predicate used by word selection.
    pub fn set_word_chars(&mut self, spec: &str) {
        self.selection.set_word_chars(spec);
    }

    #[must_use]
    pub fn has_selection(&self) -> bool { self.selection.active }

    /// Text of the current selection, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        if !self.selection.active {
            return None;
        }
        let (c0, r0) = self.selection.start;
        let (c1, r1) = self.selection.end;
        Some(self.get_text_range(r0, c0, r1, c1, false))
    }

    fn word_start(&self, row: i64, mut col: i64) -> i64 {
        while col > 0 {
            let Some(cell) = self.cell(row, col - 1) else { break };
            if cell.attr.fragment || self.selection.is_word_char(cell.c) {
                col -= 1;
            } else {
                break;
            }
        }
        col
    }

    fn word_end(&self, row: i64, mut col: i64) -> i64 {
        while col + 1 < self.column_count {
            let Some(cell) = self.cell(row, col + 1) else { break };
            if cell.attr.fragment || self.selection.is_word_char(cell.c) {
                col += 1;
            } else {
                break;
            }
        }
        col
    }

    /// Extract the text covered by the inclusive cell rectangle spanning
    /// `(r0, c0)` to `(r1, c1)`.
    #[must_use]
    pub fn get_text_range(
        &self,
        r0: i64,
        c0: i64,
        r1: i64,
        c1: i64,
        include_trailing_spaces: bool,
    ) -> String {
        self.extract_range(r0, c0, r1, c1, include_trailing_spaces, None)
    }

    /// Like [`get_text_range`](Self::get_text_range), also filling `attrs`
    /// with one entry per extracted character.
    #[must_use]
    pub fn get_text_range_with_attributes(
        &self,
        r0: i64,
        c0: i64,
        r1: i64,
        c1: i64,
        include_trailing_spaces: bool,
        attrs: &mut Vec<TextAttr>,
    ) -> String {
        self.extract_range(r0, c0, r1, c1, include_trailing_spaces, Some(attrs))
    }

    /// Single row as plain text (no trailing blanks, no newline); feeds the
    /// match-regex checks.
    #[must_use]
    pub(crate) fn row_text(&self, row: i64) -> String {
        self.get_text_range(row, 0, row, self.column_count - 1, false)
    }

    fn extract_range(
        &self,
        r0: i64,
        c0: i64,
        r1: i64,
        c1: i64,
        include_trailing_spaces: bool,
        mut attrs: Option<&mut Vec<TextAttr>>,
    ) -> String {
        let mut text = String::new();
        for row_idx in r0..=r1 {
            let col_start = if row_idx == r0 { c0.max(0) } else { 0 };
            let col_end = if row_idx == r1 {
                c1.min(self.column_count - 1)
            } else {
                self.column_count - 1
            };

            let line_start = text.len();
            let mut last_nonblank = text.len();
            let attrs_line_start = attrs.as_deref().map_or(0, |a| a.len());
            let soft_wrapped = self
                .row(row_idx)
                .is_some_and(|row| row.soft_wrapped);

            for col in col_start..=col_end {
                let cell = self.cell(row_idx, col).copied().unwrap_or_default();
                if cell.attr.fragment {
                    continue;
                }
                // Nonexistent and empty cells read as spaces.
                let ch = match cell.c {
                    0 => ' ',
                    c => charset::to_char(c),
                };
                if let Some(attrs) = attrs.as_deref_mut() {
                    attrs.push(TextAttr {
                        row: row_idx,
                        col,
                        fore: cell.attr.fore,
                        back: cell.attr.back,
                        underline: cell.attr.underline,
                        strikethrough: cell.attr.strikethrough,
                    });
                }
                text.push(ch);
                if !ch.is_whitespace() {
                    last_nonblank = text.len();
                }
            }

            if !include_trailing_spaces {
                text.truncate(last_nonblank.max(line_start));
                if let Some(attrs) = attrs.as_deref_mut() {
                    let kept = text[line_start..].chars().count();
                    attrs.truncate(attrs_line_start + kept);
                }
            }
            if row_idx != r1 && !soft_wrapped {
                text.push('\n');
            }
        }
        text
    }
}
