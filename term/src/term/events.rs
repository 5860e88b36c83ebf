// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Semantic events raised toward the host UI layer.
//!
//! The core never calls back into the embedder; everything observable is
//! queued as a [`TermEvent`] during `process_incoming` (or the public
//! mutators) and drained by the host on its own tick.

use strum_macros::{AsRefStr, IntoStaticStr};

/// One observable state change.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TermEvent {
    /// The stream is finished; the terminal will produce nothing further.
    Eof,
    ChildExited(i32),
    WindowTitleChanged(String),
    IconTitleChanged(String),
    EncodingChanged(String),
    EmulationChanged(String),
    /// Bytes queued for the child; the host drains them via the outgoing
    /// buffer when the PTY becomes writable.
    Commit(usize),
    CharSizeChanged,
    SelectionChanged,
    ContentsChanged,
    CursorMoved,
    TextInserted,
    TextDeleted,
    TextModified,
    TextScrolled(i64),
    /// Scrollback range or viewport position changed.
    AdjustmentChanged,
    StatusLineChanged,
    Beep,
    BellVisible,
    DeiconifyWindow,
    IconifyWindow,
    RaiseWindow,
    LowerWindow,
    RefreshWindow,
    RestoreWindow,
    MaximizeWindow,
    /// Pixel-sized resize request (window-manipulation op 4).
    ResizeWindow { width: i64, height: i64 },
    /// Cell-sized resize request (window-manipulation op 8, DECCOLM).
    ResizeWindowCells { rows: i64, columns: i64 },
    /// Row-count-only resize request (window-manipulation ops >= 24).
    ResizeRows { rows: i64 },
    MoveWindow { x: i64, y: i64 },
    IncreaseFontSize,
    DecreaseFontSize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn event_names_are_kebab_case() {
        assert_eq!(TermEvent::CursorMoved.as_ref(), "cursor-moved");
        assert_eq!(TermEvent::TextScrolled(2).as_ref(), "text-scrolled");
        assert_eq!(
            TermEvent::ResizeWindow {
                width: 1,
                height: 2
            }
            .as_ref(),
            "resize-window"
        );
    }
}
