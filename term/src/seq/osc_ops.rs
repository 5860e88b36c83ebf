// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Title sequences and window manipulation.

use crate::charset;
use crate::matcher::Param;
use crate::term::events::TermEvent;
use crate::term::terminal::Terminal;

use super::ProcessOutcome;

pub(crate) fn set_window_title(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    set_title_internal(term, params, false, true);
    ProcessOutcome::Continue
}

pub(crate) fn set_icon_title(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    set_title_internal(term, params, true, false);
    ProcessOutcome::Continue
}

pub(crate) fn set_icon_and_window_title(
    term: &mut Terminal,
    params: &[Param],
) -> ProcessOutcome {
    set_title_internal(term, params, true, true);
    ProcessOutcome::Continue
}

/// Decode the title argument (numeric arguments render as decimal, string
/// arguments decode code point by code point), strip control characters,
/// and raise the matching events.
fn set_title_internal(term: &mut Terminal, params: &[Param], icon: bool, window: bool) {
    if !icon && !window {
        return;
    }
    let Some(param) = params.first() else { return };
    let raw = match param {
        Param::Number(n) => n.to_string(),
        Param::String(points) => points
            .iter()
            .map(|&c| charset::to_char(c))
            .collect::<String>(),
    };
    // No control characters allowed.
    let title: String = raw
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    if window {
        term.emit(TermEvent::WindowTitleChanged(title.clone()));
    }
    if icon {
        term.emit(TermEvent::IconTitleChanged(title));
    }
}

/// Window manipulation: requests become events for the embedder, reports
/// are answered inline. Most of these are considered bad ideas, but the
/// application is free to ignore the events, so they're harmless.
#[allow(clippy::too_many_lines)]
pub(crate) fn window_manipulation(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    let numbers: Vec<i64> = params.iter().filter_map(Param::as_number).collect();
    let mut i = 0;
    while i < numbers.len() {
        let op = numbers[i];
        let arg1 = numbers.get(i + 1).copied();
        let arg2 = numbers.get(i + 2).copied();
        match op {
            1 => term.emit(TermEvent::DeiconifyWindow),
            2 => term.emit(TermEvent::IconifyWindow),
            3 => {
                if let (Some(x), Some(y)) = (arg1, arg2) {
                    term.emit(TermEvent::MoveWindow { x, y });
                    i += 2;
                }
            }
            4 => {
                if let (Some(height), Some(width)) = (arg1, arg2) {
                    term.emit(TermEvent::ResizeWindow { width, height });
                    i += 2;
                }
            }
            5 => term.emit(TermEvent::RaiseWindow),
            6 => term.emit(TermEvent::LowerWindow),
            7 => term.emit(TermEvent::RefreshWindow),
            8 => {
                if let (Some(rows), Some(columns)) = (arg1, arg2) {
                    term.emit(TermEvent::ResizeWindowCells { rows, columns });
                    i += 2;
                }
            }
            9 => {
                match arg1 {
                    Some(0) => term.emit(TermEvent::RestoreWindow),
                    Some(1) => term.emit(TermEvent::MaximizeWindow),
                    _ => {}
                }
                i += 1;
            }
            11 => {
                // Window state: we cannot be iconified and still receive
                // output, so report mapped.
                term.feed_child(b"\x1b[1t");
            }
            13 => {
                // Window location in pixels is the embedder's secret.
                term.feed_child(b"\x1b[0;0t");
            }
            14 => {
                // Pixel size, likewise.
                term.feed_child(b"\x1b[0;0t");
            }
            18 => {
                let reply = format!("\x1b[{};{}t", term.row_count(), term.column_count());
                term.feed_child(reply.as_bytes());
            }
            19 => {
                // Screen size in cells; all we know is ourselves.
                let reply = format!("\x1b[{};{}t", term.row_count(), term.column_count());
                term.feed_child(reply.as_bytes());
            }
            20 => {
                // Report the icon title.
                term.feed_child(b"\x1b]LTerminal\x1b\\");
            }
            21 => {
                // Report the window title.
                term.feed_child(b"\x1b]LTerminal\x1b\\");
            }
            rows if rows >= 24 => {
                tracing::debug!(rows, "row-count resize request");
                term.emit(TermEvent::ResizeRows { rows });
            }
            other => {
                tracing::debug!(op = other, "ignoring window manipulation");
            }
        }
        i += 1;
    }
    ProcessOutcome::Continue
}
