// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Character attribute (SGR) handlers and the termcap attribute
//! capabilities.
//!
//! The SGR handler mutates the screen's insertion defaults; the current
//! colors are mirrored into the erase and fill templates afterwards so
//! later clears paint with the active background.

use crate::matcher::Param;
use crate::screen::cell::color;
use crate::term::terminal::Terminal;

use super::ProcessOutcome;

/// SGR: walk the numeric parameters, mutating the insertion defaults.
#[allow(clippy::too_many_lines)]
pub(crate) fn character_attributes(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    let numbers: Vec<i64> = params.iter().filter_map(Param::as_number).collect();
    if numbers.is_empty() {
        term.set_default_attributes();
    }

    let mut i = 0;
    while i < numbers.len() {
        let param = numbers[i];
        if param == 0 {
            term.set_default_attributes();
            i += 1;
            continue;
        }
        // 38;5;n and 48;5;n select from the large palette.
        if (param == 38 || param == 48) && i + 2 < numbers.len() && numbers[i + 1] == 5 {
            let index = numbers[i + 2].clamp(0, 255) as u16;
            let attr = &mut term.screen_mut().defaults.attr;
            if param == 38 {
                attr.fore = index;
            } else {
                attr.back = index;
            }
            i += 3;
            continue;
        }

        let attr = &mut term.screen_mut().defaults.attr;
        match param {
            1 => {
                attr.bold = true;
                attr.half = false;
            }
            2 => {
                attr.half = true;
                attr.bold = false;
            }
            4 => attr.underline = true,
            5 => attr.blink = true,
            7 => attr.reverse = true,
            8 => attr.invisible = true,
            9 => attr.strikethrough = true,
            // 21 is an error in old versions of the Linux console; ECMA 48
            // says 22.
            21 | 22 => {
                attr.bold = false;
                attr.half = false;
            }
            24 => attr.underline = false,
            25 => attr.blink = false,
            27 => attr.reverse = false,
            28 => attr.invisible = false,
            29 => attr.strikethrough = false,
            30..=37 => attr.fore = (param - 30) as u16,
            39 => {
                attr.fore = color::DEF_FG;
                // ECMA 48 says this underline-off has no business being
                // here, but the Linux console specifies it.
                attr.underline = false;
            }
            40..=47 => attr.back = (param - 40) as u16,
            49 => attr.back = color::DEF_BG,
            90..=97 => attr.fore = (param - 90) as u16 + color::BRIGHT_OFFSET,
            100..=107 => attr.back = (param - 100) as u16 + color::BRIGHT_OFFSET,
            other => {
                tracing::debug!(sgr = other, "ignoring unsupported graphic rendition");
            }
        }
        i += 1;
    }

    term.update_color_defaults();
    ProcessOutcome::Continue
}

pub(crate) fn mb(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().defaults.attr.blink = true;
    ProcessOutcome::Continue
}

pub(crate) fn md(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let attr = &mut term.screen_mut().defaults.attr;
    attr.bold = true;
    attr.half = false;
    ProcessOutcome::Continue
}

pub(crate) fn me(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.set_default_attributes();
    term.update_color_defaults();
    ProcessOutcome::Continue
}

pub(crate) fn mh(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    let attr = &mut term.screen_mut().defaults.attr;
    attr.half = true;
    attr.bold = false;
    ProcessOutcome::Continue
}

pub(crate) fn mk(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().defaults.attr.invisible = true;
    ProcessOutcome::Continue
}

/// Protect-on is declared but deliberately inert, like the original.
pub(crate) fn mp(_term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    ProcessOutcome::Continue
}

pub(crate) fn mr(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().defaults.attr.reverse = true;
    ProcessOutcome::Continue
}

pub(crate) fn ue(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().defaults.attr.underline = false;
    ProcessOutcome::Continue
}

pub(crate) fn us(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().defaults.attr.underline = true;
    ProcessOutcome::Continue
}

/// Standout start: termcap may map standout onto another attribute, so do
/// what that attribute's handler would do.
pub(crate) fn so(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    match standout_alias(term) {
        Some("mb") => mb(term, params),
        Some("md") => md(term, params),
        Some("mh") => mh(term, params),
        Some("mr") => mr(term, params),
        Some("us") => us(term, params),
        _ => {
            term.screen_mut().defaults.attr.standout = true;
            ProcessOutcome::Continue
        }
    }
}

/// Standout end; aliased standout ends by resetting everything, which is
/// what the paired capabilities actually emit.
pub(crate) fn se(term: &mut Terminal, params: &[Param]) -> ProcessOutcome {
    if standout_alias(term).is_some() {
        me(term, params)
    } else {
        term.screen_mut().defaults.attr.standout = false;
        ProcessOutcome::Continue
    }
}

/// Which attribute capability shares standout's control string, if any.
fn standout_alias(term: &Terminal) -> Option<&'static str> {
    let standout = term.termcap.find_string("so")?;
    for cap in ["mb", "md", "mh", "mr", "us"] {
        if term.termcap.find_string(cap) == Some(standout) {
            return Some(cap);
        }
    }
    None
}

/// Begin filtering printable characters through the line-drawing set.
pub(crate) fn as_(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().alternate_charset = true;
    ProcessOutcome::Continue
}

pub(crate) fn ae(term: &mut Terminal, _params: &[Param]) -> ProcessOutcome {
    term.screen_mut().alternate_charset = false;
    ProcessOutcome::Continue
}
