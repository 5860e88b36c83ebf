// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Shared fixtures for the conformance suites.

use crate::term::terminal::Terminal;

/// A blank 80x24 terminal, the classic.
pub fn terminal_80x24() -> Terminal {
    Terminal::new(24, 80)
}

/// Feed and process in one step, pumping once more when a handler asked
/// for re-entry.
pub fn apply(term: &mut Terminal, bytes: &[u8]) {
    term.feed(bytes);
    term.process_incoming();
    term.process_incoming();
}

/// A terminal with every visible cell set to `fill`.
pub fn prefilled(rows: usize, cols: usize, fill: u8) -> Terminal {
    let mut term = Terminal::new(rows, cols);
    let line = vec![fill; cols];
    for row in 0..rows {
        term.feed(&line);
        if row + 1 < rows {
            term.feed(b"\r\n");
        }
    }
    term.process_incoming();
    term
}

/// The character at a grid position, blank-as-space.
pub fn char_at(term: &Terminal, row: i64, col: i64) -> char {
    term.cell(row, col)
        .map_or(' ', |cell| match cell.c {
            0 => ' ',
            c => crate::charset::to_char(c),
        })
}
