// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Scrolling-region (margin) handlers.

use crate::matcher::Param;
use crate::screen::screen::ScrollRegion;
use crate::term::terminal::Terminal;

use super::{ProcessOutcome, offset_params};

/// Restrict scrolling to a row range, 0-based inclusive. Fewer than two
/// parameters (or a garbage range) resets to the full screen; either way
/// the cursor homes into the region.
pub(crate) fn cs(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    let mut numbers = params.iter().filter_map(Param::as_number);
    let (Some(mut start), Some(mut end)) = (numbers.next(), numbers.next()) else {
        term.screen_mut().scrolling_restricted = false;
        return ProcessOutcome::Continue;
    };

    let rows = term.row_count();
    // Catch garbage: out-of-range bounds snap to the screen edges.
    if start <= 0 || start >= rows {
        start = 0;
    }
    if end <= 0 || end >= rows {
        end = rows - 1;
    }
    // A top at or past the bottom silently resets to the full screen.
    if start >= end {
        start = 0;
        end = rows - 1;
    }

    let delta = term.screen().insert_delta;
    let screen = term.screen_mut();
    screen.scrolling_region = ScrollRegion { start, end };
    screen.scrolling_restricted = !(start == 0 && end == rows - 1);
    screen.cursor_current.row = delta + start;
    screen.cursor_current.col = 0;
    ProcessOutcome::Continue
}

/// The four-parameter variant (lines above, lines below), kept because GNU
/// Emacs is special.
pub(crate) fn c_big_s(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    let numbers: Vec<i64> = params.iter().filter_map(Param::as_number).collect();
    if numbers.len() < 3 {
        term.screen_mut().scrolling_restricted = false;
        return ProcessOutcome::Continue;
    }
    let rows = term.row_count();
    let start = numbers[1].clamp(0, rows - 1);
    let end = (rows - 1 - numbers[2]).clamp(start, rows - 1);

    let delta = term.screen().insert_delta;
    let screen = term.screen_mut();
    screen.scrolling_region = ScrollRegion { start, end };
    screen.scrolling_restricted = !(start == 0 && end == rows - 1);
    screen.cursor_current.row = screen
        .cursor_current
        .row
        .clamp(delta + start, delta + end);
    ProcessOutcome::Continue
}

/// DECSTBM: 1-based bounds delegating to `cs`.
pub(crate) fn set_scrolling_region(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    cs(term, &offset_params(params, -1))
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
    fn region_set_and_home() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[5;10r");
        assert!(term.screen().scrolling_restricted);
        assert_eq!(term.screen().scrolling_region.start, 4);
        assert_eq!(term.screen().scrolling_region.end, 9);
        assert_eq!(term.cursor(), (4, 0));
    }

    #[test]
    fn full_screen_region_is_unrestricted() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[5;10r\x1b[1;24r");
        assert!(!term.screen().scrolling_restricted);
        assert_eq!(term.cursor(), (0, 0));
    }

    #[test]
    fn bare_sequence_resets_restriction() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[5;10r\x1b[r");
        assert!(!term.screen().scrolling_restricted);
    }

    #[test]
    fn out_of_range_top_snaps_to_screen_edge() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[30;2r");
        assert_eq!(term.screen().scrolling_region.start, 0);
        assert!(term.screen().scrolling_restricted);
        assert_eq!(term.screen().scrolling_region.end, 1);
    }

    #[test]
    fn inverted_bounds_reset_to_full_screen() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[10;5r");
        assert!(!term.screen().scrolling_restricted);
        assert_eq!(term.cursor(), (0, 0));
    }
}
