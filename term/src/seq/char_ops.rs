// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Row-local character insertion, deletion, and erasure.

use crate::matcher::Param;
use crate::screen::cell::color;
use crate::term::terminal::Terminal;

use super::{ProcessOutcome, count_param, repeat};

/// Insert one blank character at the cursor, shifting the rest right; the
/// cursor stays put.
pub(crate) fn insert_blank(term: &mut Terminal) {
    let saved = term.screen().cursor_current;
    term.insert_char(u32::from(' '), true);
    term.screen_mut().cursor_current = saved;
}

pub(crate) fn ic(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    insert_blank(term);
    ProcessOutcome::Continue
}

pub(crate) fn ic_multi(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    repeat(term, params, insert_blank)
}

/// Delete the character under the cursor, closing the gap from the right.
pub(crate) fn delete_one(term: &mut Terminal) {
    let position = term.screen().cursor_current.row;
    if term.screen().row_data.next() <= position {
        return;
    }
    let col = term.screen().cursor_current.col;
    term.cleanup_fragments_at(position, col);
    let columns = term.column_count() as usize;
    let (screen, _) = term.parts();
    let fill = screen.fill_defaults;
    let paint = fill.attr.back != color::DEF_BG;
    if let Some(row) = screen.row_data.get_mut(position) {
        let Ok(col) = usize::try_from(col) else { return };
        if col < row.cells.len() {
            row.cells.remove(col);
            if paint {
                row.fill_to(&fill, columns);
            }
        }
    }
    term.text_deleted = true;
}

pub(crate) fn dc(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    delete_one(term);
    ProcessOutcome::Continue
}

pub(crate) fn dc_multi(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    repeat(term, params, delete_one)
}

/// Overwrite N characters with blanks in place; no shifting, no cursor
/// motion.
pub(crate) fn ec(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    let count = count_param(params);
    term.ensure_cursor_row();
    let position = term.screen().cursor_current.row;
    let col = term.screen().cursor_current.col;
    let columns = term.column_count();
    // Blanking can cut a wide glyph at either end of the range.
    term.cleanup_fragments_at(position, col);
    term.cleanup_fragments_at(position, (col + count - 1).min(columns - 1));
    let (screen, _) = term.parts();
    let blank = screen.color_defaults;
    if let Some(row) = screen.row_data.get_mut(position) {
        for i in 0..count {
            let target = col + i;
            if target >= columns {
                break;
            }
            let Ok(target) = usize::try_from(target) else { continue };
            if target < row.cells.len() {
                row.cells[target] = blank;
            } else {
                row.fill_to(&blank, target + 1);
            }
        }
    }
    term.text_deleted = true;
    ProcessOutcome::Continue
}

/// Underline the character under the cursor and step right.
pub(crate) fn uc(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let position = term.screen().cursor_current.row;
    let col = term.screen().cursor_current.col;
    let mut touched = false;
    let (screen, _) = term.parts();
    if let Some(row) = screen.row_data.get_mut(position) {
        if let Ok(mut col) = usize::try_from(col) {
            // Walk back to the glyph head before touching attributes.
            while col > 0 && row.cells.get(col).is_some_and(|c| c.attr.fragment) {
                col -= 1;
            }
            if let Some(cell) = row.cells.get_mut(col) {
                cell.attr.underline = true;
                touched = true;
            }
        }
    }
    if touched {
        term.text_modified = true;
        super::cursor_ops::right(term);
    }
    ProcessOutcome::Continue
}
