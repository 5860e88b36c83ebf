// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Grid primitives invoked by the sequence handlers.
//!
//! Rows are created lazily when the cursor arrives; evicted and removed
//! rows pass through the terminal's one-row reuse cache. Every mutation
//! records itself in the text dirty flags, which the pipeline converts to
//! events at the end of the processing pass.

use crate::charset::{self, CodePoint};
use crate::screen::cell::Cell;
use crate::screen::row::RowData;
use crate::screen::screen::Screen;
use crate::term::events::TermEvent;
use crate::term::terminal::Terminal;

impl Terminal {
    #[must_use]
    pub(crate) fn screen(&self) -> &Screen { &self.screens[self.active] }

    pub(crate) fn screen_mut(&mut self) -> &mut Screen { &mut self.screens[self.active] }

    /// Split-borrow the active screen and the row reuse slot.
    pub(crate) fn parts(&mut self) -> (&mut Screen, &mut Option<RowData>) {
        let Terminal {
            screens,
            active,
            free_row,
            ..
        } = self;
        (&mut screens[*active], free_row)
    }

    /// Append one blank row at the bottom of the ring, recycling the cached
    /// row and caching whatever the ring evicts.
    pub(crate) fn append_blank_row(&mut self, fill: bool) {
        let columns = self.column_count as usize;
        let (screen, free_row) = self.parts();
        let template = screen.fill_defaults;
        let mut row = free_row.take().unwrap_or_default();
        row.reset(fill.then_some((&template, columns)));
        *free_row = screen.row_data.append(row);
    }

    /// Make sure the cursor's row exists in the ring.
    pub(crate) fn ensure_cursor_row(&mut self) {
        while self.screen().row_data.next() <= self.screen().cursor_current.row {
            self.append_blank_row(false);
        }
    }

    /// Row under the cursor, created on demand.
    pub(crate) fn ensure_row(&mut self) -> &mut RowData {
        self.ensure_cursor_row();
        let position = self.screen().cursor_current.row;
        let (screen, _) = self.parts();
        screen
            .row_data
            .get_mut(position)
            .expect("cursor row was just ensured")
    }

    /// Make sure the cursor's row exists and its cell array reaches the
    /// cursor column. `paint` extends with the current colors, otherwise
    /// the background stays default.
    pub(crate) fn ensure_cursor(&mut self, paint: bool) {
        self.ensure_cursor_row();
        let col = self.screen().cursor_current.col.max(0) as usize;
        let position = self.screen().cursor_current.row;
        let (screen, _) = self.parts();
        let template = if paint {
            screen.color_defaults
        } else {
            screen.basic_defaults
        };
        if let Some(row) = screen.row_data.get_mut(position) {
            row.fill_to(&template, col);
        }
    }

    /// If the cursor sits on (or inside) a multi-column glyph, dissolve the
    /// whole glyph into plain blanks so a partial overwrite cannot leave
    /// orphan fragments behind.
    pub(crate) fn cleanup_fragments_at_cursor(&mut self) {
        let col = self.screen().cursor_current.col;
        let position = self.screen().cursor_current.row;
        self.cleanup_fragments_at(position, col);
    }

    /// Dissolve the multi-column glyph covering `(position, col)`, if any.
    pub(crate) fn cleanup_fragments_at(&mut self, position: i64, col: i64) {
        let (screen, _) = self.parts();
        let fill = screen.fill_defaults;
        let Some(row) = screen.row_data.get_mut(position) else {
            return;
        };
        let Ok(col) = usize::try_from(col) else {
            return;
        };
        if col >= row.cells.len() {
            return;
        }

        // Walk back to the glyph head.
        let mut head = col;
        while head > 0 && row.cells[head].attr.fragment {
            head -= 1;
        }
        let span = usize::from(row.cells[head].attr.columns.max(1));
        if span <= 1 && !row.cells[col].attr.fragment {
            return;
        }
        for cell in row.cells.iter_mut().skip(head).take(span) {
            *cell = fill;
        }
        self.text_modified = true;
    }

    /// The hot path: place one decoded code point at the cursor.
    pub(crate) fn insert_char(&mut self, c: CodePoint, force_insert: bool) {
        // While the status line is active, printable output goes there
        // instead of the grid.
        if self.screen().status_line {
            let ch = charset::to_char(c);
            if !ch.is_control() {
                self.screen_mut().status_line_contents.push(ch);
                self.emit(TermEvent::StatusLineChanged);
            }
            return;
        }

        let c = if self.screen().alternate_charset {
            self.iso2022.process_single(c, u32::from('0'))
        } else {
            c
        };
        let columns = self.iso2022.unichar_width(c) as i64;
        if columns == 0 {
            // Combining mark: the cell model keeps one scalar per cell, so
            // the mark is accounted for but not stored.
            tracing::debug!(c = charset::raw_scalar(c), "dropping zero-width combining mark");
            self.text_modified = true;
            return;
        }

        // Wrap (or clamp) when the glyph does not fit the line.
        if self.screen().cursor_current.col + columns > self.column_count {
            if self.flags.am {
                self.ensure_row().soft_wrapped = true;
                self.cursor_down();
                self.screen_mut().cursor_current.col = 0;
            } else {
                self.screen_mut().cursor_current.col = self.column_count - columns;
            }
        }

        self.ensure_cursor(false);

        if self.screen().insert_mode || force_insert {
            let col = self.screen().cursor_current.col as usize;
            let max = self.column_count as usize;
            let (screen, _) = self.parts();
            let blank = screen.color_defaults;
            let position = screen.cursor_current.row;
            if let Some(row) = screen.row_data.get_mut(position) {
                for _ in 0..columns {
                    row.cells.insert(col, blank);
                }
                row.cells.truncate(max);
            }
        }

        self.cleanup_fragments_at_cursor();

        let col = self.screen().cursor_current.col as usize;
        let position = self.screen().cursor_current.row;
        let scalar = charset::raw_scalar(c);
        let (screen, _) = self.parts();
        let pad = screen.basic_defaults;
        let mut head = Cell {
            c: scalar,
            attr: screen.defaults.attr,
        };
        head.attr.columns = columns as u8;
        head.attr.fragment = false;
        if let Some(row) = screen.row_data.get_mut(position) {
            row.fill_to(&pad, col + columns as usize);
            row.cells[col] = head;
            for i in 1..columns as usize {
                let mut fragment = head;
                fragment.attr.fragment = true;
                row.cells[col + i] = fragment;
            }
            // A wide glyph can land on the left half of another one; its
            // surviving tail would otherwise dangle headless.
            let fill = screen.fill_defaults;
            let mut orphan = col + columns as usize;
            while let Some(cell) = row.cells.get_mut(orphan) {
                if !cell.attr.fragment {
                    break;
                }
                *cell = fill;
                orphan += 1;
            }
        }

        self.screen_mut().cursor_current.col += columns;
        self.text_inserted = true;

        // Hard wrap at the right margin unless the emulation defers it
        // (xterm's xn) until the next character arrives.
        if self.screen().cursor_current.col == self.column_count && self.flags.am && !self.flags.xn
        {
            self.ensure_row().soft_wrapped = true;
            self.cursor_down();
            self.screen_mut().cursor_current.col = 0;
        }
    }

    /// Move down one row; at the bottom of the scrolling region the region
    /// content scrolls up instead.
    pub(crate) fn cursor_down(&mut self) {
        let (start, end) = self.screen().region_bounds(self.row_count);

        if self.screen().cursor_current.row == end {
            if self.screen().scrolling_restricted {
                self.remove_line_at(start);
                self.insert_line_at(end);
                self.fill_row(end, true);
                self.emit(TermEvent::TextScrolled(1));
                self.text_inserted = true;
                self.text_deleted = true;
            } else {
                // Bottom of the unrestricted screen: advance the visible
                // window, letting the old top row age into the scrollback.
                self.screen_mut().cursor_current.row += 1;
                self.ensure_cursor_row();
                self.screen_mut().insert_delta += 1;
                self.adjust_adjustments();
                self.emit(TermEvent::TextScrolled(1));
            }
        } else {
            self.screen_mut().cursor_current.row += 1;
        }
    }

    /// Fill the row at `position` out to the full width (creating it if
    /// missing). `paint` selects the current-color fill.
    pub(crate) fn fill_row(&mut self, position: i64, paint: bool) {
        while self.screen().row_data.next() <= position {
            self.append_blank_row(false);
        }
        let columns = self.column_count as usize;
        let (screen, _) = self.parts();
        let template = if paint {
            screen.fill_defaults
        } else {
            screen.basic_defaults
        };
        if let Some(row) = screen.row_data.get_mut(position) {
            row.fill_to(&template, columns);
        }
    }

    /// Insert a blank row at `position`, shifting later rows down.
    pub(crate) fn insert_line_at(&mut self, position: i64) {
        while self.screen().row_data.next() < position {
            self.append_blank_row(true);
        }
        let (screen, free_row) = self.parts();
        let mut row = free_row.take().unwrap_or_default();
        row.reset(None);
        *free_row = if screen.row_data.next() >= position {
            screen.row_data.insert(position, row)
        } else {
            screen.row_data.append(row)
        };
    }

    /// Remove the row at `position`, compacting the rest.
    pub(crate) fn remove_line_at(&mut self, position: i64) {
        if self.screen().row_data.next() > position {
            let (screen, free_row) = self.parts();
            *free_row = screen.row_data.remove(position);
        }
    }

    /// Scroll the scrolling region without moving the cursor. Positive is
    /// down, negative is up.
    pub(crate) fn scroll_text(&mut self, amount: i64) {
        let (start, end) = self.screen().region_bounds(self.row_count);

        while self.screen().row_data.next() <= end {
            self.append_blank_row(false);
        }

        if amount > 0 {
            for _ in 0..amount {
                self.remove_line_at(end);
                self.insert_line_at(start);
            }
        } else {
            for _ in 0..-amount {
                self.remove_line_at(start);
                self.insert_line_at(end);
            }
        }

        self.emit(TermEvent::TextScrolled(amount));
        self.adjust_adjustments();
        self.text_inserted = true;
        self.text_deleted = true;
    }

    /// Home the cursor to the top-left of the visible screen.
    pub(crate) fn home_cursor(&mut self) {
        let delta = self.screen().insert_delta;
        let screen = self.screen_mut();
        screen.cursor_current.row = delta;
        screen.cursor_current.col = 0;
    }

    /// Scroll the whole visible screen into history and start fresh below.
    pub(crate) fn clear_screen(&mut self) {
        let relative_row = self.screen().cursor_current.row - self.screen().insert_delta;
        let initial = self.screen().row_data.next();
        for _ in 0..self.row_count {
            self.append_blank_row(true);
        }
        let screen = self.screen_mut();
        screen.insert_delta = initial;
        screen.cursor_current.row = initial + relative_row;
        self.adjust_adjustments();
        self.text_deleted = true;
    }

    /// Blank the row the cursor is on.
    pub(crate) fn clear_current_line(&mut self) {
        let position = self.screen().cursor_current.row;
        if self.screen().row_data.next() > position {
            let columns = self.column_count as usize;
            let (screen, _) = self.parts();
            let fill = screen.fill_defaults;
            if let Some(row) = screen.row_data.get_mut(position) {
                row.cells.clear();
                row.fill_to(&fill, columns);
                row.soft_wrapped = false;
            }
        }
        self.text_deleted = true;
    }

    /// Blank every visible row above the cursor.
    pub(crate) fn clear_above_current(&mut self) {
        let delta = self.screen().insert_delta;
        let current = self.screen().cursor_current.row;
        let columns = self.column_count as usize;
        for position in delta..current {
            if self.screen().row_data.next() > position {
                let (screen, _) = self.parts();
                let fill = screen.fill_defaults;
                if let Some(row) = screen.row_data.get_mut(position) {
                    row.cells.clear();
                    row.fill_to(&fill, columns);
                    row.soft_wrapped = false;
                }
            }
        }
        self.text_deleted = true;
    }

    /// Reset the insertion attributes to the plain defaults, mirroring the
    /// colors into the erase / fill templates.
    pub(crate) fn set_default_attributes(&mut self) {
        let screen = self.screen_mut();
        screen.defaults = Cell::default();
        screen.color_defaults = screen.defaults;
        screen.fill_defaults = screen.defaults;
    }

    /// Copy the current default colors into the erase / fill templates.
    pub(crate) fn update_color_defaults(&mut self) {
        let screen = self.screen_mut();
        let fore = screen.defaults.attr.fore;
        let back = screen.defaults.attr.back;
        screen.color_defaults.attr.fore = fore;
        screen.color_defaults.attr.back = back;
        screen.fill_defaults.attr.fore = fore;
        screen.fill_defaults.attr.back = back;
    }

    /// Re-derive the viewer's scroll range after the ring moved.
    pub(crate) fn adjust_adjustments(&mut self) {
        let screen = self.screen_mut();
        screen.scroll_delta = screen
            .scroll_delta
            .clamp(screen.row_data.delta(), screen.insert_delta.max(screen.row_data.delta()));
        self.emit(TermEvent::AdjustmentChanged);
    }
}

#[cfg(test)]
mod tests {
    use crate::term::terminal::Terminal;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_extends_row_lazily() {
        let mut term = Terminal::new(4, 10);
        term.feed(b"\x1b[1;5Hx");
        term.process_incoming();
        let row = term.row(0).unwrap();
        // Columns 0..4 were padded, 'x' landed at column 4.
        assert_eq!(row.cells.len(), 5);
        assert_eq!(row.cells[4].c, u32::from('x'));
        assert!(row.cells[3].is_blank());
    }

    #[test]
    fn wide_glyph_writes_head_and_fragment() {
        let mut term = Terminal::new(4, 10);
        term.feed("漢".as_bytes());
        term.process_incoming();
        let row = term.row(0).unwrap();
        assert_eq!(row.cells[0].c, u32::from('漢'));
        assert_eq!(row.cells[0].attr.columns, 2);
        assert!(!row.cells[0].attr.fragment);
        assert!(row.cells[1].attr.fragment);
        assert_eq!(row.cells[1].c, u32::from('漢'));
        assert_eq!(term.cursor(), (0, 2));
    }

    #[test]
    fn overwriting_half_a_wide_glyph_dissolves_it() {
        let mut term = Terminal::new(4, 10);
        term.feed("漢".as_bytes());
        term.process_incoming();
        // Land on the fragment cell and overwrite it.
        term.feed(b"\x1b[1;2HX");
        term.process_incoming();
        let row = term.row(0).unwrap();
        assert!(!row.cells[0].attr.fragment);
        assert_eq!(row.cells[0].attr.columns, 1);
        assert_ne!(row.cells[0].c, u32::from('漢'));
        assert_eq!(row.cells[1].c, u32::from('X'));
    }

    #[test]
    fn cursor_down_at_bottom_scrolls_into_history() {
        let mut term = Terminal::new(3, 10);
        term.feed(b"a\r\nb\r\nc\r\nd");
        term.process_incoming();
        // Three newlines pushed one row into the scrollback.
        assert_eq!(term.insert_delta(), 1);
        assert_eq!(term.row(0).unwrap().cells[0].c, u32::from('a'));
        assert_eq!(term.row(3).unwrap().cells[0].c, u32::from('d'));
        assert_eq!(term.cursor(), (3, 1));
    }

    #[test]
    fn insert_mode_shifts_right() {
        let mut term = Terminal::new(4, 10);
        term.feed(b"abc\x1b[1;1H\x1b[4hX");
        term.process_incoming();
        let row = term.row(0).unwrap();
        assert_eq!(row.cells[0].c, u32::from('X'));
        assert_eq!(row.cells[1].c, u32::from('a'));
        assert_eq!(row.cells[2].c, u32::from('b'));
        assert_eq!(row.cells[3].c, u32::from('c'));
    }
}
