// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Erase handlers: within the line, above, below, and whole-screen.

use crate::matcher::Param;
use crate::screen::cell::color;
use crate::term::terminal::Terminal;

use super::{ProcessOutcome, first_number};

/// Clear from the start of the line through the cursor.
pub(crate) fn cb(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.ensure_cursor_row();
    let position = term.screen().cursor_current.row;
    let col = term
        .screen()
        .cursor_current
        .col
        .min(term.column_count() - 1);
    // Blanking up to the cursor can cut a wide glyph in half.
    term.cleanup_fragments_at(position, col);
    let (screen, _) = term.parts();
    let blank = screen.color_defaults;
    if let Some(row) = screen.row_data.get_mut(position) {
        for i in 0..=col {
            let Ok(i) = usize::try_from(i) else { continue };
            if i < row.cells.len() {
                row.cells[i] = blank;
            } else {
                row.cells.push(blank);
            }
        }
    }
    term.text_deleted = true;
    ProcessOutcome::Continue
}

/// Clear right of the cursor and everything below.
pub(crate) fn cd(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let cursor = term.screen().cursor_current;
    let delta = term.screen().insert_delta;
    let rows = term.row_count();

    // Truncate the cursor row at the cursor.
    {
        let (screen, _) = term.parts();
        if let Some(row) = screen.row_data.get_mut(cursor.row) {
            if let Ok(col) = usize::try_from(cursor.col) {
                if row.cells.len() > col {
                    row.cells.truncate(col);
                }
            }
        }
        // Drop everything on the rows below.
        let next = screen.row_data.next();
        for position in cursor.row + 1..next {
            if let Some(row) = screen.row_data.get_mut(position) {
                row.cells.clear();
            }
        }
    }

    // Refill the cleared area row by row, creating rows as needed.
    for position in cursor.row..delta + rows {
        term.fill_row(position, true);
        let (screen, _) = term.parts();
        if let Some(row) = screen.row_data.get_mut(position) {
            row.soft_wrapped = false;
        }
    }
    term.text_deleted = true;
    ProcessOutcome::Continue
}

/// Clear from the cursor to the end of the line.
pub(crate) fn ce(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.ensure_cursor_row();
    let position = term.screen().cursor_current.row;
    let col = term.screen().cursor_current.col;
    let columns = term.column_count() as usize;
    let (screen, _) = term.parts();
    let fill = screen.fill_defaults;
    let paint = fill.attr.back != color::DEF_BG;
    if let Some(row) = screen.row_data.get_mut(position) {
        if let Ok(col) = usize::try_from(col) {
            if row.cells.len() > col {
                row.cells.truncate(col);
            }
        }
        if paint {
            row.fill_to(&fill, columns);
        }
        row.soft_wrapped = false;
    }
    term.text_deleted = true;
    ProcessOutcome::Continue
}

/// Clear the screen and home the cursor.
pub(crate) fn cl(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.clear_screen();
    term.home_cursor();
    term.text_deleted = true;
    ProcessOutcome::Continue
}

/// ED: 0 erases below, 1 above (and left of the cursor), 2 the whole
/// screen.
pub(crate) fn erase_in_display(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    match first_number(params).unwrap_or(0) {
        0 => {
            cd(term, &[]);
        }
        1 => {
            term.clear_above_current();
            cb(term, &[]);
        }
        2 => {
            term.clear_screen();
        }
        other => {
            tracing::debug!(mode = other, "unsupported erase-in-display mode");
        }
    }
    term.text_deleted = true;
    ProcessOutcome::Continue
}

/// EL: 0 erases right, 1 left, 2 the whole line.
pub(crate) fn erase_in_line(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    match first_number(params).unwrap_or(0) {
        0 => {
            ce(term, &[]);
        }
        1 => {
            cb(term, &[]);
        }
        2 => {
            term.clear_current_line();
        }
        other => {
            tracing::debug!(mode = other, "unsupported erase-in-line mode");
        }
    }
    term.text_deleted = true;
    ProcessOutcome::Continue
}
