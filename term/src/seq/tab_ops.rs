// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Tab motion and tab-stop maintenance.
//!
//! Tab expansion prefers a single `'\t'` head cell stretched over the gap
//! with fragment continuations, which keeps copied text faithful; when the
//! gap cannot be expressed that way it degrades to plain blanks.

use crate::matcher::Param;
use crate::screen::cell::Cell;
use crate::term::terminal::Terminal;

use super::{ProcessOutcome, first_number, repeat};

/// Highest column the stop search will consider.
const TAB_MAX: i64 = 999;

pub(crate) fn tab(term: &mut Terminal) {
    let col = term.screen().cursor_current.col;
    let mut newcol = col;

    if term.tabstops.is_some() {
        newcol += 1;
        while newcol < TAB_MAX {
            if term.get_tabstop(newcol) {
                break;
            }
            newcol += 1;
        }
    }

    // No stops, or walked off the end: stick to the right-most column.
    if newcol >= term.column_count() {
        newcol = term.column_count() - 1;
    }
    if newcol <= col {
        return;
    }

    let gap = newcol - col;
    let position = term.screen().cursor_current.row;
    term.ensure_cursor_row();
    let (screen, _) = term.parts();
    let fill = screen.fill_defaults;
    if let Some(row) = screen.row_data.get_mut(position) {
        // Shed trailing empty cells first so a fresh tab can stretch.
        let Ok(col_us) = usize::try_from(col) else {
            return;
        };
        while row.cells.len() > col_us {
            let last = row.cells[row.cells.len() - 1];
            if last.attr.fragment || last.c != 0 {
                break;
            }
            row.cells.pop();
        }

        let fits_in_columns = u8::try_from(gap).is_ok();
        if row.cells.len() <= col_us && fits_in_columns {
            // All blank from here: emit one copyable tab glyph.
            row.fill_to(&fill, col_us);
            let mut head = Cell {
                c: u32::from('\t'),
                attr: fill.attr,
            };
            head.attr.invisible = true;
            head.attr.columns = gap as u8;
            row.cells.push(head);
            let mut fragment = fill;
            fragment.attr.fragment = true;
            if let Ok(newcol_us) = usize::try_from(newcol) {
                row.fill_to(&fragment, newcol_us);
            }
        } else if let Ok(newcol_us) = usize::try_from(newcol) {
            row.fill_to(&fill, newcol_us);
        }
    }

    term.screen_mut().cursor_current.col = newcol;
    term.text_modified = true;
}

pub(crate) fn ta(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    tab(term);
    ProcessOutcome::Continue
}

/// CHT: forward N tab stops.
pub(crate) fn ta_multi(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    repeat(term, params, tab)
}

/// CBT / `bt`: retreat to the previous tab stop (or column 0).
pub(crate) fn bt(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    for _ in 0..super::count_param(params) {
        let cols = term.column_count();
        let mut newcol = term.screen().cursor_current.col - 1;
        if term.tabstops.is_some() {
            while newcol > 0 {
                if term.get_tabstop(newcol % cols) {
                    break;
                }
                newcol -= 1;
            }
        }
        term.screen_mut().cursor_current.col = newcol.max(0);
    }
    ProcessOutcome::Continue
}

/// HTS / `st`: set a stop at the cursor column.
pub(crate) fn st(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let col = term.screen().cursor_current.col;
    term.set_tabstop(col);
    ProcessOutcome::Continue
}

/// `ct`: drop every stop.
pub(crate) fn ct(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.tabstops = None;
    ProcessOutcome::Continue
}

/// TBC: 0 clears the stop here, 3 clears them all.
pub(crate) fn tab_clear(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    match first_number(params).unwrap_or(0) {
        0 => {
            let col = term.screen().cursor_current.col;
            term.clear_tabstop(col);
        }
        3 => term.tabstops = None,
        other => {
            tracing::debug!(mode = other, "unsupported tab-clear mode");
        }
    }
    ProcessOutcome::Continue
}

#[cfg(test)]
mod tests {
    use crate::term::terminal::Terminal;
    use pretty_assertions::assert_eq;

    fn feed(term: &mut Terminal, bytes: &[u8]) {
        term.feed(bytes);
        term.process_incoming();
    }

    #[test]
    fn tab_advances_to_next_stop() {
        let mut term = Terminal::new(4, 40);
        feed(&mut term, b"\t");
        assert_eq!(term.cursor(), (0, 8));
        feed(&mut term, b"ab\t");
        assert_eq!(term.cursor(), (0, 16));
    }

    #[test]
    fn tab_emits_one_copyable_glyph_over_blank_gap() {
        let mut term = Terminal::new(4, 40);
        feed(&mut term, b"\t");
        let row = term.row(0).unwrap();
        assert_eq!(row.cells[0].c, u32::from('\t'));
        assert_eq!(row.cells[0].attr.columns, 8);
        assert!(row.cells[0].attr.invisible);
        assert!(row.cells[1].attr.fragment);
        assert_eq!(row.cells.len(), 8);
    }

    #[test]
    fn tab_at_end_of_text_still_stretches() {
        let mut term = Terminal::new(4, 40);
        feed(&mut term, b"ab\t");
        let row = term.row(0).unwrap();
        assert_eq!(row.cells[2].c, u32::from('\t'));
        assert_eq!(row.cells[2].attr.columns, 6);
        assert_eq!(row.cells.len(), 8);
    }

    #[test]
    fn tab_over_existing_text_only_moves_the_cursor() {
        let mut term = Terminal::new(4, 40);
        feed(&mut term, b"0123456789\x1b[1;1H\t");
        assert_eq!(term.cursor(), (0, 8));
        let row = term.row(0).unwrap();
        // The cells between the old and new cursor positions survive.
        assert_eq!(row.cells[3].c, u32::from('3'));
        assert_eq!(row.cells[9].c, u32::from('9'));
    }

    #[test]
    fn back_tab_retreats() {
        let mut term = Terminal::new(4, 40);
        feed(&mut term, b"\t\t\x1b[Z");
        assert_eq!(term.cursor(), (0, 8));
        feed(&mut term, b"\x1b[Z\x1b[Z");
        assert_eq!(term.cursor(), (0, 0));
    }

    #[test]
    fn custom_stop_and_clear() {
        let mut term = Terminal::new(4, 40);
        // Clear all stops, set one at column 3, tab to it.
        feed(&mut term, b"\x1b[3g\x1b[1;4H\x1bH\x1b[1;1H\t");
        assert_eq!(term.cursor(), (0, 3));
        // With every stop gone a tab has nowhere to go.
        feed(&mut term, b"\x1b[3g\x1b[1;1H\t");
        assert_eq!(term.cursor(), (0, 0));
    }

    #[test]
    fn tab_does_not_move_backwards() {
        let mut term = Terminal::new(4, 10);
        // Only stop is column 0; a tab from column 5 pins to column 9.
        feed(&mut term, b"\x1b[3g\x1b[1;1H\x1bH\x1b[1;6H\t");
        assert_eq!(term.cursor(), (0, 9));
    }
}
