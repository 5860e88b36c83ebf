// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Bells, resets, charset switches, the status line, and the alignment
//! test.

use crate::matcher::Param;
use crate::screen::cell::Cell;
use crate::term::events::TermEvent;
use crate::term::terminal::Terminal;

use super::ProcessOutcome;

pub(crate) fn bl(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.emit(TermEvent::Beep);
    ProcessOutcome::Continue
}

pub(crate) fn vb(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.emit(TermEvent::BellVisible);
    ProcessOutcome::Continue
}

pub(crate) fn full_reset(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.reset(true, true);
    ProcessOutcome::Continue
}

pub(crate) fn soft_reset(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.reset(false, false);
    ProcessOutcome::Continue
}

/// DECALN: fill every visible cell with `E` in the plain attributes.
pub(crate) fn screen_alignment_test(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let delta = term.screen().insert_delta;
    let rows = term.row_count();
    let columns = term.column_count() as usize;

    for position in delta..delta + rows {
        while term.screen().row_data.next() <= position {
            term.append_blank_row(false);
        }
        let (screen, _) = term.parts();
        let mut cell = Cell {
            c: u32::from('E'),
            attr: screen.basic_defaults.attr,
        };
        cell.attr.columns = 1;
        if let Some(row) = screen.row_data.get_mut(position) {
            row.cells.clear();
            row.fill_to(&cell, columns);
            row.soft_wrapped = false;
        }
    }
    term.adjust_adjustments();
    term.text_modified = true;
    ProcessOutcome::Continue
}

pub(crate) fn utf_8_character_set(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    if let Err(err) = term.set_encoding("UTF-8") {
        tracing::warn!(%err, "switching to UTF-8 failed");
    }
    ProcessOutcome::Continue
}

pub(crate) fn iso8859_1_character_set(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let native = term.iso2022.native_codeset().to_owned();
    if let Err(err) = term.set_encoding(&native) {
        tracing::warn!(%err, "switching to the native codeset failed");
    }
    ProcessOutcome::Continue
}

/// `ts`: move to the status line; printable output is captured there until
/// `fs`.
pub(crate) fn ts(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let screen = term.screen_mut();
    screen.status_line = true;
    screen.status_line_contents.clear();
    term.emit(TermEvent::StatusLineChanged);
    ProcessOutcome::Continue
}

/// `fs`: return from the status line.
pub(crate) fn fs(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().status_line = false;
    ProcessOutcome::Continue
}

pub(crate) fn noop(_term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    ProcessOutcome::Continue
}
