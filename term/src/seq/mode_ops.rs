// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! ANSI and DEC private mode handlers, including the alternate screen and
//! the save/restore mode map.

use crate::matcher::Param;
use crate::term::events::TermEvent;
use crate::term::terminal::{KeyMode, FkeyMode, MouseTracking, Terminal};

use super::{ProcessOutcome, cursor_ops};

pub(crate) fn im(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().insert_mode = true;
    ProcessOutcome::Continue
}

pub(crate) fn ei(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().insert_mode = false;
    ProcessOutcome::Continue
}

pub(crate) fn ks(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.keypad_mode = KeyMode::Application;
    ProcessOutcome::Continue
}

pub(crate) fn ke(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.keypad_mode = KeyMode::Normal;
    ProcessOutcome::Continue
}

pub(crate) fn application_keypad(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    tracing::debug!("entering application keypad mode");
    ks(term, params)
}

pub(crate) fn normal_keypad(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    tracing::debug!("leaving application keypad mode");
    ke(term, params)
}

pub(crate) fn ve(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.cursor_visible = true;
    ProcessOutcome::Continue
}

pub(crate) fn vi(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.cursor_visible = false;
    ProcessOutcome::Continue
}

pub(crate) fn vs(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.cursor_visible = true;
    ProcessOutcome::Continue
}

/// SM: ANSI modes 4 (insert), 12 (send/receive), 20 (automatic newline).
pub(crate) fn set_mode(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    for setting in params.iter().filter_map(Param::as_number) {
        set_mode_internal(term, setting, true);
    }
    ProcessOutcome::Continue
}

/// RM: the same ANSI modes, off.
pub(crate) fn reset_mode(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    for setting in params.iter().filter_map(Param::as_number) {
        set_mode_internal(term, setting, false);
    }
    ProcessOutcome::Continue
}

fn set_mode_internal(term: &mut Terminal, setting: i64, value: bool) {
    match setting {
        2 => {
            // Keyboard action mode; nothing to lock.
        }
        4 => term.screen_mut().insert_mode = value,
        12 => term.screen_mut().sendrecv_mode = value,
        20 => term.screen_mut().linefeed_mode = value,
        other => {
            tracing::debug!(mode = other, value, "unrecognized ANSI mode");
        }
    }
}

pub(crate) fn decset(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    dec_mode_loop(term, params, DecOp::Set(true))
}

pub(crate) fn decreset(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    dec_mode_loop(term, params, DecOp::Set(false))
}

pub(crate) fn save_mode(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    dec_mode_loop(term, params, DecOp::Save)
}

pub(crate) fn restore_mode(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    dec_mode_loop(term, params, DecOp::Restore)
}

#[derive(Clone, Copy)]
enum DecOp {
    Set(bool),
    Save,
    Restore,
}

fn dec_mode_loop(term: &mut Terminal, params: &[Param], op: DecOp) -> ProcessOutcome {
    let mut again = false;
    for setting in params.iter().filter_map(Param::as_number) {
        again |= match op {
            DecOp::Set(value) => dec_mode_apply(term, setting, value),
            DecOp::Save => {
                let current = dec_mode_current(term, setting);
                tracing::debug!(setting, current, "saving DEC mode");
                term.dec_saved.insert(setting, current);
                false
            }
            DecOp::Restore => {
                let value = term.dec_saved.get(&setting).copied().unwrap_or(false);
                tracing::debug!(setting, value, "restoring DEC mode");
                dec_mode_apply(term, setting, value)
            }
        };
    }
    if again {
        ProcessOutcome::Reenter
    } else {
        ProcessOutcome::Continue
    }
}

/// The current value of a DEC private mode, for save-mode snapshots.
fn dec_mode_current(term: &Terminal, setting: i64) -> bool {
    match setting {
        1 => term.cursor_mode == KeyMode::Application,
        4 => term.smooth_scroll,
        5 => term.screen().reverse_mode,
        6 => term.screen().origin_mode,
        7 => term.flags.am,
        9 => term.mouse_tracking == MouseTracking::SendXyOnClick,
        25 => term.cursor_visible,
        42 => term.iso2022.nrc_enabled(),
        44 => term.margin_bell,
        47 | 1047 | 1049 => term.active == 1,
        66 => term.keypad_mode == KeyMode::Application,
        1000 => term.mouse_tracking == MouseTracking::SendXyOnButton,
        1001 => term.mouse_tracking == MouseTracking::HiliteTracking,
        1002 => term.mouse_tracking == MouseTracking::CellMotionTracking,
        1003 => term.mouse_tracking == MouseTracking::AllMotionTracking,
        1036 => term.meta_sends_escape,
        1051 => term.fkey_mode == FkeyMode::Sun,
        1052 => term.fkey_mode == FkeyMode::Hp,
        1060 => term.fkey_mode == FkeyMode::Legacy,
        1061 => term.fkey_mode == FkeyMode::Vt220,
        _ => false,
    }
}

/// Apply one DEC private mode. Returns whether the dispatch loop must
/// restart (screen switches, resize requests).
#[allow(clippy::too_many_lines)]
fn dec_mode_apply(term: &mut Terminal, setting: i64, set: bool) -> bool {
    match setting {
        1 => {
            term.cursor_mode = if set { KeyMode::Application } else { KeyMode::Normal };
            tracing::debug!(set, "application cursor mode");
        }
        3 => {
            // 132-column mode is a request to the embedder, never enforced
            // locally.
            let columns = if set { 132 } else { 80 };
            let rows = term.row_count();
            term.emit(TermEvent::ResizeWindowCells { rows, columns });
            return true;
        }
        4 => term.smooth_scroll = set,
        5 => {
            term.screen_mut().reverse_mode = set;
            term.emit(TermEvent::ContentsChanged);
        }
        6 => {
            term.screen_mut().origin_mode = set;
            // Reposition the cursor in its new home.
            let delta = term.screen().insert_delta;
            let screen = term.screen_mut();
            screen.cursor_current.row = delta;
            screen.cursor_current.col = 0;
        }
        7 => term.flags.am = set,
        9 => set_mouse_tracking(term, MouseTracking::SendXyOnClick, set),
        25 => term.cursor_visible = set,
        42 => term.iso2022.set_nrc_enabled(set),
        44 => term.margin_bell = set,
        47 | 1047 => {
            switch_screen(term, set);
            return true;
        }
        1048 => {
            if set {
                cursor_ops::sc(term, &[]);
            } else {
                cursor_ops::rc(term, &[]);
            }
        }
        66 => {
            term.keypad_mode = if set { KeyMode::Application } else { KeyMode::Normal };
            tracing::debug!(set, "application keypad mode");
        }
        1000 => set_mouse_tracking(term, MouseTracking::SendXyOnButton, set),
        1001 => set_mouse_tracking(term, MouseTracking::HiliteTracking, set),
        1002 => set_mouse_tracking(term, MouseTracking::CellMotionTracking, set),
        1003 => set_mouse_tracking(term, MouseTracking::AllMotionTracking, set),
        1036 => term.meta_sends_escape = set,
        1049 => {
            // Save the cursor before entering, restore after leaving, even
            // when no save ever happened.
            if set {
                cursor_ops::sc(term, &[]);
            }
            switch_screen(term, set);
            if !set {
                cursor_ops::rc(term, &[]);
            }
            return true;
        }
        1051 => set_fkey_mode(term, FkeyMode::Sun, set),
        1052 => set_fkey_mode(term, FkeyMode::Hp, set),
        1060 => set_fkey_mode(term, FkeyMode::Legacy, set),
        1061 => set_fkey_mode(term, FkeyMode::Vt220, set),
        // Settings the embedder owns (window size, fonts, scrollbars,
        // keyboard repeat, blink, backspace/delete policy...).
        2 | 8 | 12 | 18 | 19 | 30 | 35 | 38 | 40 | 41 | 67 | 1010 | 1011 | 1035 | 1037 => {}
        other => {
            tracing::debug!(setting = other, set, "DECSET/DECRESET mode not recognized, ignoring");
        }
    }
    false
}

fn set_mouse_tracking(term: &mut Terminal, mode: MouseTracking, set: bool) {
    // The tracking modes are mutually exclusive: enabling one turns the
    // rest off, disabling any of them goes dark.
    term.mouse_tracking = if set { mode } else { MouseTracking::Off };
}

fn set_fkey_mode(term: &mut Terminal, mode: FkeyMode, set: bool) {
    term.fkey_mode = if set { mode } else { FkeyMode::Normal };
    tracing::debug!(?mode, set, "function key compatibility mode");
}

/// Flip between the normal and alternate screens. Entering the alternate
/// screen clears it and homes its cursor.
fn switch_screen(term: &mut Terminal, alternate: bool) {
    let target = usize::from(alternate);
    if term.active == target {
        return;
    }
    term.active = target;
    if alternate {
        term.clear_screen();
        term.home_cursor();
    }
    term.adjust_adjustments();
    term.emit(TermEvent::ContentsChanged);
}

#[cfg(test)]
mod tests {
    use crate::term::terminal::{MouseTracking, Terminal};
    use pretty_assertions::assert_eq;

    fn feed(term: &mut Terminal, bytes: &[u8]) {
        term.feed(bytes);
        term.process_incoming();
    }

    #[test]
    fn insert_mode_via_ansi_mode_4() {
        let mut term = Terminal::new(4, 20);
        feed(&mut term, b"\x1b[4h");
        assert!(term.screen().insert_mode);
        feed(&mut term, b"\x1b[4l");
        assert!(!term.screen().insert_mode);
    }

    #[test]
    fn autowrap_toggles_with_decawm() {
        let mut term = Terminal::new(4, 20);
        assert!(term.flags.am);
        feed(&mut term, b"\x1b[?7l");
        assert!(!term.flags.am);
        feed(&mut term, b"\x1b[?7h");
        assert!(term.flags.am);
    }

    #[test]
    fn mouse_modes_are_mutually_exclusive() {
        let mut term = Terminal::new(4, 20);
        feed(&mut term, b"\x1b[?1000h");
        assert_eq!(term.mouse_tracking, MouseTracking::SendXyOnButton);
        feed(&mut term, b"\x1b[?1002h");
        assert_eq!(term.mouse_tracking, MouseTracking::CellMotionTracking);
        feed(&mut term, b"\x1b[?1002l");
        assert_eq!(term.mouse_tracking, MouseTracking::Off);
    }

    #[test]
    fn save_and_restore_mode_round_trip() {
        let mut term = Terminal::new(4, 20);
        feed(&mut term, b"\x1b[?7l\x1b[?7s\x1b[?7h");
        assert!(term.flags.am);
        feed(&mut term, b"\x1b[?7r");
        assert!(!term.flags.am);
    }

    #[test]
    fn alternate_screen_preserves_normal_content() {
        let mut term = Terminal::new(4, 20);
        feed(&mut term, b"normal\x1b[?1049h");
        // Alternate screen is active and clear.
        feed(&mut term, b"ALT");
        assert_eq!(term.row_text(term.insert_delta()), "ALT");
        feed(&mut term, b"\x1b[?1049l");
        // Back on the normal screen, the old content and cursor return.
        assert_eq!(term.row_text(0), "normal");
        assert_eq!(term.cursor(), (0, 6));
    }

    #[test]
    fn plain_47_does_not_restore_cursor() {
        let mut term = Terminal::new(4, 20);
        feed(&mut term, b"hello\x1b[?47h\x1b[?47l");
        // 47 switches back without touching the saved cursor.
        assert_eq!(term.cursor(), (0, 5));
    }

    #[test]
    fn reverse_screen_mode_flags_contents_changed() {
        let mut term = Terminal::new(4, 20);
        feed(&mut term, b"\x1b[?5h");
        assert!(term.screen().reverse_mode);
    }
}
