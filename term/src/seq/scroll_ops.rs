// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Scroll-aware vertical motion and whole-region scrolling.

use crate::matcher::Param;
use crate::term::events::TermEvent;
use crate::term::terminal::Terminal;

use super::{ProcessOutcome, count_param, repeat};

/// Index: move down, scrolling at the bottom of the region.
pub(crate) fn sf(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.cursor_down();
    ProcessOutcome::Continue
}

pub(crate) fn sf_multi(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    repeat(term, params, Terminal::cursor_down)
}

/// Reverse index: move up, scrolling the region down at the top.
pub(crate) fn reverse(term: &mut Terminal) {
    let (start, end) = term.screen().region_bounds(term.row_count());
    if term.screen().cursor_current.row == start {
        term.remove_line_at(end);
        term.insert_line_at(start);
        term.fill_row(start, true);
        term.emit(TermEvent::TextScrolled(1));
        term.text_modified = true;
    } else {
        term.screen_mut().cursor_current.row -= 1;
    }
    term.adjust_adjustments();
}

pub(crate) fn sr(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    reverse(term);
    ProcessOutcome::Continue
}

pub(crate) fn sr_multi(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    repeat(term, params, reverse)
}

/// SU: scroll region content up without moving the cursor.
pub(crate) fn scroll_up(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    term.scroll_text(-count_param(params));
    ProcessOutcome::Continue
}

/// SD: scroll region content down without moving the cursor.
pub(crate) fn scroll_down(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    term.scroll_text(count_param(params));
    ProcessOutcome::Continue
}
