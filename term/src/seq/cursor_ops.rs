// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Cursor movement handlers.
//!
//! The one-step capability handlers (`up`, `do`, `le`, `nd`) clamp inside
//! the scrolling region and never scroll; the multi-step variants repeat
//! them. Absolute positioning honours origin mode, and the long 1-based
//! names delegate to the 0-based capability handlers with shifted
//! parameters.

use crate::matcher::Param;
use crate::term::terminal::Terminal;
use crate::units::TermCol;

use super::{ProcessOutcome, first_number, offset_params, repeat};

pub(crate) fn up(term: &mut Terminal) {
    let (start, _) = term.screen().region_bounds(term.row_count());
    let screen = term.screen_mut();
    screen.cursor_current.row = (screen.cursor_current.row - 1).max(start);
}

pub(crate) fn up_one(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    up(term);
    ProcessOutcome::Continue
}

pub(crate) fn up_multi(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    repeat(term, params, up)
}

pub(crate) fn down(term: &mut Terminal) {
    let (_, end) = term.screen().region_bounds(term.row_count());
    let screen = term.screen_mut();
    screen.cursor_current.row = (screen.cursor_current.row + 1).min(end);
}

pub(crate) fn do_one(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    down(term);
    ProcessOutcome::Continue
}

pub(crate) fn do_multi(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    repeat(term, params, down)
}

pub(crate) fn left(term: &mut Terminal) {
    if term.screen().cursor_current.col > 0 {
        term.screen_mut().cursor_current.col -= 1;
        term.cleanup_fragments_at_cursor();
        return;
    }
    if term.flags.bw {
        // Wrap to the previous line's last column.
        let cols = term.column_count();
        term.screen_mut().cursor_current.col = cols - 1;
        if term.screen().scrolling_restricted {
            super::scroll_ops::reverse(term);
        } else {
            let delta = term.screen().insert_delta;
            let screen = term.screen_mut();
            screen.cursor_current.row = (screen.cursor_current.row - 1).max(delta);
        }
    } else {
        term.screen_mut().cursor_current.col = 0;
    }
}

pub(crate) fn le_one_shot(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    left(term);
    ProcessOutcome::Continue
}

pub(crate) fn le_multi(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    repeat(term, params, left)
}

pub(crate) fn right(term: &mut Terminal) {
    if term.screen().cursor_current.col + 1 < term.column_count() {
        term.screen_mut().cursor_current.col += 1;
    }
}

pub(crate) fn nd_one(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    right(term);
    ProcessOutcome::Continue
}

pub(crate) fn nd_multi(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    repeat(term, params, right)
}

/// Move to a column, 0-based.
pub(crate) fn ch(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    if let Some(val) = first_number(params) {
        let col = val.clamp(0, term.column_count() - 1);
        term.screen_mut().cursor_current.col = col;
        term.cleanup_fragments_at_cursor();
    }
    ProcessOutcome::Continue
}

/// Move to a row, 0-based, honouring origin mode.
pub(crate) fn cv(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    if let Some(val) = first_number(params) {
        let (origin, last_row) = origin_bounds(term);
        let row = (val + origin).clamp(origin, last_row);
        let delta = term.screen().insert_delta;
        term.screen_mut().cursor_current.row = delta + row;
    }
    ProcessOutcome::Continue
}

/// Move to a position, 0-based row and column.
pub(crate) fn cm(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    let mut numbers = params.iter().filter_map(Param::as_number);
    let (origin, last_row) = origin_bounds(term);
    let rowval = numbers
        .next()
        .map_or(origin, |row| (row + origin).clamp(origin, last_row));
    let colval = numbers
        .next()
        .map_or(0, |col| col.clamp(0, term.column_count() - 1));
    let delta = term.screen().insert_delta;
    let screen = term.screen_mut();
    screen.cursor_current.row = delta + rowval;
    screen.cursor_current.col = colval;
    term.cleanup_fragments_at_cursor();
    ProcessOutcome::Continue
}

/// Row origin and last admissible row for absolute vertical moves: the
/// scrolling region in origin mode, the whole screen otherwise.
fn origin_bounds(term: &Terminal) -> (i64, i64) {
    let screen = term.screen();
    if screen.origin_mode && screen.scrolling_restricted {
        (screen.scrolling_region.start, screen.scrolling_region.end)
    } else {
        (0, term.row_count() - 1)
    }
}

/// CUP and HVP: 1-based inputs delegating to `cm`.
pub(crate) fn cursor_position(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    cm(term, &offset_params(params, -1))
}

/// CHA: 1-based column.
pub(crate) fn cursor_character_absolute(
    term: &mut Terminal,
    params: &[Param],
) -> ProcessOutcome {
    let col =
        TermCol::new(first_number(params).unwrap_or(1)).to_zero_based_clamped(term.column_count());
    term.screen_mut().cursor_current.col = col;
    term.cleanup_fragments_at_cursor();
    ProcessOutcome::Continue
}

/// HPA: 1-based column delegating to `ch`.
pub(crate) fn character_position_absolute(
    term: &mut Terminal,
    params: &[Param],
) -> ProcessOutcome {
    ch(term, &offset_params(params, -1))
}

/// VPA: 1-based row delegating to `cv`.
pub(crate) fn line_position_absolute(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    cv(term, &offset_params(params, -1))
}

pub(crate) fn cursor_next_line(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    term.screen_mut().cursor_current.col = 0;
    do_multi(term, params)
}

pub(crate) fn cursor_preceding_line(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    term.screen_mut().cursor_current.col = 0;
    up_multi(term, params)
}

pub(crate) fn cursor_lower_left(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let delta = term.screen().insert_delta;
    let rows = term.row_count();
    let screen = term.screen_mut();
    screen.cursor_current.row = delta + (rows - 1).max(0);
    screen.cursor_current.col = 0;
    ProcessOutcome::Continue
}

pub(crate) fn ll(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    cursor_lower_left(term, params)
}

pub(crate) fn ho(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.home_cursor();
    ProcessOutcome::Continue
}

pub(crate) fn cr(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().cursor_current.col = 0;
    ProcessOutcome::Continue
}

/// Save cursor; the row is stored relative to the visible top.
pub(crate) fn sc(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let delta = term.screen().insert_delta;
    let rows = term.row_count();
    let screen = term.screen_mut();
    screen.cursor_saved.col = screen.cursor_current.col;
    screen.cursor_saved.row = (screen.cursor_current.row - delta).clamp(0, rows - 1);
    ProcessOutcome::Continue
}

/// Restore cursor from the saved relative position.
pub(crate) fn rc(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let delta = term.screen().insert_delta;
    let rows = term.row_count();
    let screen = term.screen_mut();
    screen.cursor_current.col = screen.cursor_saved.col;
    screen.cursor_current.row =
        (screen.cursor_saved.row + delta).clamp(delta, delta + rows - 1);
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
    fn relative_moves_clamp_at_edges() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[5A\x1b[3D");
        assert_eq!(term.cursor(), (0, 0));
        feed(&mut term, b"\x1b[2B\x1b[7C");
        assert_eq!(term.cursor(), (2, 7));
        feed(&mut term, b"\x1b[99C");
        assert_eq!(term.cursor(), (2, 79));
    }

    #[test]
    fn cursor_position_is_one_based() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[10;20H");
        assert_eq!(term.cursor(), (9, 19));
        // Zero and missing parameters mean 1.
        feed(&mut term, b"\x1b[H");
        assert_eq!(term.cursor(), (0, 0));
        feed(&mut term, b"\x1b[0;0H");
        assert_eq!(term.cursor(), (0, 0));
    }

    #[test]
    fn save_restore_round_trips_across_scrolling(){
        let mut term = Terminal::new(3, 20);
        feed(&mut term, b"\x1b[2;5H\x1b7");
        // Scroll twice so insert_delta moves.
        feed(&mut term, b"\x1b[3;1H\r\n\r\n");
        assert_eq!(term.insert_delta(), 2);
        feed(&mut term, b"\x1b8");
        let (row, col) = term.cursor();
        assert_eq!((row - term.insert_delta(), col), (1, 4));
    }

    #[test]
    fn origin_mode_offsets_cursor_position() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[5;10r\x1b[?6h\x1b[1;1H");
        // Origin row 1 is the region start (row 5 on the wire, row 4 here).
        assert_eq!(term.cursor(), (4, 0));
    }

    #[test]
    fn origin_mode_clamps_moves_into_the_region() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[5;10r\x1b[?6h");
        // A move past the region bottom pins to the region bottom, not the
        // screen bottom.
        feed(&mut term, b"\x1b[20;1H");
        assert_eq!(term.cursor(), (9, 0));
        // The row-only variant clamps the same way.
        feed(&mut term, b"\x1b[99d");
        assert_eq!(term.cursor(), (9, 0));
        // Leaving origin mode restores full-screen addressing.
        feed(&mut term, b"\x1b[?6l\x1b[20;1H");
        assert_eq!(term.cursor(), (19, 0));
    }

    #[test]
    fn next_and_preceding_line_reset_column() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[3;10H\x1b[2E");
        assert_eq!(term.cursor(), (4, 0));
        feed(&mut term, b"\x1b[10C\x1b[F");
        assert_eq!(term.cursor(), (3, 0));
    }

    #[test]
    fn lower_left_lands_on_last_row() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[5;5H");
        let outcome = super::cursor_lower_left(&mut term, &[]);
        assert_eq!(outcome, super::ProcessOutcome::Continue);
        assert_eq!(term.cursor(), (23, 0));
    }
}
