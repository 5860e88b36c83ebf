// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Device status reports and attribute queries; every handler answers by
//! queueing bytes for the child.

use crate::matcher::Param;
use crate::term::terminal::Terminal;

use super::{ProcessOutcome, first_number};

/// DSR: 5 asks for operating status, 6 for the cursor position.
pub(crate) fn device_status_report(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    match first_number(params) {
        Some(5) => {
            // A thumbs-up.
            term.feed_child(b"\x1b[0n");
        }
        Some(6) => {
            let (row, col) = one_based_cursor(term);
            let reply = format!("\x1b[{row};{col}R");
            term.feed_child(reply.as_bytes());
        }
        _ => {}
    }
    ProcessOutcome::Continue
}

/// DEC-private DSR variants.
pub(crate) fn dec_device_status_report(
    term: &mut Terminal,
    params: &[Param],
) -> ProcessOutcome {
    match first_number(params) {
        Some(6) => {
            let (row, col) = one_based_cursor(term);
            let reply = format!("\x1b[?{row};{col}R");
            term.feed_child(reply.as_bytes());
        }
        Some(15) => {
            // Printer status: 11 = not ready. We don't print.
            term.feed_child(b"\x1b[?11n");
        }
        Some(25) => {
            // UDK status: 20 = locked.
            term.feed_child(b"\x1b[?20n");
        }
        Some(26) => {
            // Keyboard status: 50 = no locator.
            term.feed_child(b"\x1b[?50n");
        }
        _ => {}
    }
    ProcessOutcome::Continue
}

/// Primary DA: claim to be a VT220 with national character set support.
pub(crate) fn send_primary_device_attributes(
    term: &mut Terminal,
    _params: &[Param],
) -> ProcessOutcome {
    term.feed_child(b"\x1b[?62;9;c");
    ProcessOutcome::Continue
}

/// Secondary DA: the version string folds into three two-digit decimal
/// groups. The `>` in the response appears to be undocumented.
pub(crate) fn send_secondary_device_attributes(
    term: &mut Terminal,
    _params: &[Param],
) -> ProcessOutcome {
    let version: i64 = env!("CARGO_PKG_VERSION")
        .split('.')
        .fold(0, |acc, part| acc * 100 + part.parse::<i64>().unwrap_or(0));
    let reply = format!("\x1b[>1;{version};0c");
    term.feed_child(reply.as_bytes());
    ProcessOutcome::Continue
}

pub(crate) fn return_terminal_status(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.feed_child(b"");
    ProcessOutcome::Continue
}

pub(crate) fn request_terminal_parameters(
    term: &mut Terminal,
    _params: &[Param],
) -> ProcessOutcome {
    term.feed_child(b"\x1b[?x");
    ProcessOutcome::Continue
}

fn one_based_cursor(term: &Terminal) -> (i64, i64) {
    let screen = term.screen();
    (
        screen.cursor_current.row + 1 - screen.insert_delta,
        screen.cursor_current.col + 1,
    )
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
    fn cursor_position_report_is_one_based() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[4;6H\x1b[6n");
        assert_eq!(term.outgoing_drain(), b"\x1b[4;6R");
    }

    #[test]
    fn cursor_report_is_relative_to_visible_top() {
        let mut term = Terminal::new(3, 20);
        // Scroll one row into history, then ask.
        feed(&mut term, b"\r\n\r\n\r\n\x1b[6n");
        assert_eq!(term.outgoing_drain(), b"\x1b[3;1R");
    }

    #[test]
    fn status_report_is_fine_thanks() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[5n");
        assert_eq!(term.outgoing_drain(), b"\x1b[0n");
    }

    #[test]
    fn primary_attributes_claim_vt220() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[c");
        assert_eq!(term.outgoing_drain(), b"\x1b[?62;9;c");
    }

    #[test]
    fn secondary_attributes_fold_version() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[>c");
        // 0.1.0 folds to 100.
        assert_eq!(term.outgoing_drain(), b"\x1b[>1;100;0c");
    }

    #[test]
    fn dec_position_report_carries_question_mark() {
        let mut term = Terminal::new(24, 80);
        feed(&mut term, b"\x1b[2;3H\x1b[?6n");
        assert_eq!(term.outgoing_drain(), b"\x1b[?2;3R");
    }
}
