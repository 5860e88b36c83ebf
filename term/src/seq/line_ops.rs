// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Whole-line insertion and deletion inside the scrolling region.

use crate::matcher::Param;
use crate::term::events::TermEvent;
use crate::term::terminal::Terminal;

use super::{ProcessOutcome, count_param};

/// IL: insert blank lines at the cursor, pushing the region bottom off.
pub(crate) fn al(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    let count = count_param(params);
    let start = term.screen().cursor_current.row;
    let (_, end) = term.screen().region_bounds(term.row_count());

    for _ in 0..count {
        term.remove_line_at(end);
        term.insert_line_at(start);
        term.fill_row(start, true);
        term.adjust_adjustments();
    }
    term.emit(TermEvent::TextScrolled(count));
    term.text_deleted = true;
    ProcessOutcome::Continue
}

/// DL: delete lines at the cursor, pulling blanks in at the region bottom.
pub(crate) fn dl(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    let count = count_param(params);
    let start = term.screen().cursor_current.row;
    let (_, end) = term.screen().region_bounds(term.row_count());

    for _ in 0..count {
        term.remove_line_at(start);
        term.insert_line_at(end);
        term.fill_row(end, true);
        term.adjust_adjustments();
    }
    term.emit(TermEvent::TextScrolled(-count));
    term.text_deleted = true;
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

    fn col0(term: &Terminal, row: i64) -> char {
        term.row(row)
            .and_then(|r| r.cells.first())
            .map_or(' ', |c| crate::charset::to_char(c.c))
    }

    #[test]
    fn insert_lines_push_rows_down_within_region() {
        let mut term = Terminal::new(4, 10);
        feed(&mut term, b"a\r\nb\r\nc\r\nd\x1b[2;1H\x1b[2L");
        assert_eq!(col0(&term, 0), 'a');
        assert_eq!(col0(&term, 1), ' ');
        assert_eq!(col0(&term, 2), ' ');
        assert_eq!(col0(&term, 3), 'b');
    }

    #[test]
    fn delete_lines_pull_rows_up() {
        let mut term = Terminal::new(4, 10);
        feed(&mut term, b"a\r\nb\r\nc\r\nd\x1b[1;1H\x1b[2M");
        assert_eq!(col0(&term, 0), 'c');
        assert_eq!(col0(&term, 1), 'd');
        assert_eq!(col0(&term, 2), ' ');
    }

    #[test]
    fn region_limits_line_deletion() {
        let mut term = Terminal::new(4, 10);
        feed(&mut term, b"a\r\nb\r\nc\r\nd\x1b[1;3r\x1b[1;1H\x1b[M");
        // Row 'd' sits below the region and is untouched.
        assert_eq!(col0(&term, 0), 'b');
        assert_eq!(col0(&term, 1), 'c');
        assert_eq!(col0(&term, 2), ' ');
        assert_eq!(col0(&term, 3), 'd');
    }
}
