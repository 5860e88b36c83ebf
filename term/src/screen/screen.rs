// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! The per-screen display model.
//!
//! A terminal keeps two of these: the normal screen, whose ring carries the
//! scrollback history, and the alternate screen, whose ring capacity equals
//! the visible row count and so has no history. Rows are addressed by
//! absolute row number; `insert_delta` names the first visible row and
//! `scroll_delta` the top of the viewport (equal when the view is at the
//! bottom).

use smallstr::SmallString;

use crate::ring::Ring;

use super::cell::Cell;
use super::row::RowData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPos {
    /// Absolute row (>= `insert_delta` for the current cursor).
    pub row: i64,
    pub col: i64,
}

/// Inclusive scrolling-region bounds, 0-indexed relative to `insert_delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollRegion {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug)]
pub struct Screen {
    pub row_data: Ring<RowData>,
    pub cursor_current: CursorPos,
    /// Saved cursor; the row is stored relative to `insert_delta`.
    pub cursor_saved: CursorPos,
    /// Absolute row number of the first visible line.
    pub insert_delta: i64,
    /// Absolute row number at the top of the viewport.
    pub scroll_delta: i64,
    /// Attributes applied to newly inserted characters.
    pub defaults: Cell,
    /// Plain defaults: default colors, everything else off.
    pub basic_defaults: Cell,
    /// Defaults carrying only the current colors; used when erasing cells.
    pub color_defaults: Cell,
    /// Cell used to pad out rows when filling; tracks the current colors.
    pub fill_defaults: Cell,
    pub scrolling_restricted: bool,
    pub scrolling_region: ScrollRegion,
    pub insert_mode: bool,
    pub origin_mode: bool,
    pub linefeed_mode: bool,
    pub reverse_mode: bool,
    pub sendrecv_mode: bool,
    pub alternate_charset: bool,
    pub status_line: bool,
    pub status_line_contents: SmallString<[u8; 64]>,
}

impl Screen {
    /// A fresh screen whose ring holds `max_rows` rows, starting at row 0.
    #[must_use]
    pub fn new(max_rows: usize) -> Self {
        Self {
            row_data: Ring::new(max_rows, 0),
            cursor_current: CursorPos::default(),
            cursor_saved: CursorPos::default(),
            insert_delta: 0,
            scroll_delta: 0,
            defaults: Cell::default(),
            basic_defaults: Cell::default(),
            color_defaults: Cell::default(),
            fill_defaults: Cell::default(),
            scrolling_restricted: false,
            scrolling_region: ScrollRegion::default(),
            insert_mode: false,
            origin_mode: false,
            linefeed_mode: false,
            reverse_mode: false,
            sendrecv_mode: false,
            alternate_charset: false,
            status_line: false,
            status_line_contents: SmallString::new(),
        }
    }

    /// Absolute bounds of the scrolling region (falling back to the whole
    /// visible screen when unrestricted).
    #[must_use]
    pub fn region_bounds(&self, row_count: i64) -> (i64, i64) {
        if self.scrolling_restricted {
            (
                self.insert_delta + self.scrolling_region.start,
                self.insert_delta + self.scrolling_region.end,
            )
        } else {
            (self.insert_delta, self.insert_delta + row_count - 1)
        }
    }

    /// Reset modes, regions and defaults; the ring (and so the content and
    /// history) is the caller's business.
    pub fn reset_state(&mut self) {
        self.cursor_current = CursorPos::default();
        self.cursor_saved = CursorPos::default();
        self.cursor_current.row = self.insert_delta;
        self.defaults = Cell::default();
        self.basic_defaults = Cell::default();
        self.color_defaults = Cell::default();
        self.fill_defaults = Cell::default();
        self.scrolling_restricted = false;
        self.scrolling_region = ScrollRegion::default();
        self.insert_mode = false;
        self.origin_mode = false;
        self.linefeed_mode = false;
        self.reverse_mode = false;
        self.sendrecv_mode = false;
        self.alternate_charset = false;
        self.status_line = false;
        self.status_line_contents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn region_bounds_unrestricted_covers_visible_screen() {
        let mut screen = Screen::new(100);
        screen.insert_delta = 40;
        assert_eq!(screen.region_bounds(24), (40, 63));
    }

    #[test]
    fn region_bounds_restricted_is_relative_to_insert_delta() {
        let mut screen = Screen::new(100);
        screen.insert_delta = 10;
        screen.scrolling_restricted = true;
        screen.scrolling_region = ScrollRegion { start: 2, end: 12 };
        assert_eq!(screen.region_bounds(24), (12, 22));
    }

    #[test]
    fn reset_state_homes_cursor_to_insert_delta() {
        let mut screen = Screen::new(100);
        screen.insert_delta = 33;
        screen.cursor_current = CursorPos { row: 50, col: 7 };
        screen.insert_mode = true;
        screen.reset_state();
        assert_eq!(screen.cursor_current, CursorPos { row: 33, col: 0 });
        assert!(!screen.insert_mode);
    }
}
