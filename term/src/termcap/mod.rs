// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Builtin termcap database.
//!
//! The emulation name selects a termcap entry; every string capability in
//! the entry becomes a sequence-matcher pattern whose result is the
//! two-letter capability code, and the xterm extension table of long-named
//! sequences is layered on top. The extension table is registered second on
//! purpose: where a capability and an extension compile to the same pattern
//! (`cm` vs `cursor-position`), the long name with its 1-based parameter
//! convention must win.

pub mod parser;

pub use parser::Entry;

/// Terminal entry for the default emulation.
pub const DEFAULT_EMULATION: &str = "xterm";

/// xterm, pruned to the capabilities the emulation consumes.
const XTERM_TERMCAP: &str = "xterm|xterm terminal emulator (X Window System):\
am:km:mi:ms:xn:\
co#80:it#8:li#24:\
AL=\\E[%dL:DC=\\E[%dP:DL=\\E[%dM:DO=\\E[%dB:IC=\\E[%d@:\
LE=\\E[%dD:RI=\\E[%dC:UP=\\E[%dA:\
ae=^O:al=\\E[L:as=^N:bl=^G:bt=\\E[Z:cb=\\E[1K:cd=\\E[J:ce=\\E[K:\
cl=\\E[H\\E[2J:cm=\\E[%i%d;%dH:cr=^M:cs=\\E[%i%d;%dr:ct=\\E[3g:\
dc=\\E[P:dl=\\E[M:do=^J:ec=\\E[%dX:ei=\\E[4l:ho=\\E[H:im=\\E[4h:\
kb=^H:ke=\\E[?1l\\E>:ks=\\E[?1h\\E=:le=^H:\
mb=\\E[5m:md=\\E[1m:me=\\E[m:mh=\\E[2m:mr=\\E[7m:nd=\\E[C:\
rc=\\E8:sc=\\E7:se=\\E[27m:sf=^J:so=\\E[7m:sr=\\EM:st=\\EH:ta=^I:\
ue=\\E[24m:up=\\E[A:us=\\E[4m:\
vb=\\E[?5h\\E[?5l:ve=\\E[?25h:vi=\\E[?25l:vs=\\E[?25h";

/// vt220, for embedders that ask for the stricter DEC personality.
const VT220_TERMCAP: &str = "vt220|DEC VT220:\
am:mi:ms:xn:\
co#80:it#8:li#24:\
AL=\\E[%dL:DC=\\E[%dP:DL=\\E[%dM:DO=\\E[%dB:IC=\\E[%d@:\
LE=\\E[%dD:RI=\\E[%dC:UP=\\E[%dA:\
al=\\E[L:bl=^G:cd=\\E[J:ce=\\E[K:cl=\\E[H\\E[2J:cm=\\E[%i%d;%dH:\
cr=^M:cs=\\E[%i%d;%dr:ct=\\E[3g:dc=\\E[P:dl=\\E[M:do=^J:ec=\\E[%dX:\
ei=\\E[4l:ho=\\E[H:im=\\E[4h:kb=^H:le=^H:\
mb=\\E[5m:md=\\E[1m:me=\\E[m:mh=\\E[2m:mr=\\E[7m:nd=\\E[C:\
rc=\\E8:sc=\\E7:se=\\E[27m:sf=^J:so=\\E[7m:sr=\\EM:st=\\EH:ta=^I:\
ue=\\E[24m:up=\\E[A:us=\\E[4m:ve=\\E[?25h:vi=\\E[?25l";

/// Long-named sequences layered over every emulation, mirroring the xterm
/// superset wire protocol. Registered after the termcap strings so these
/// win pattern collisions.
pub const XTERM_EXTENSIONS: &[(&[u8], &str)] = &[
    (b"\x05", "return-terminal-status"),
    (b"\x0b", "vertical-tab"),
    (b"\x0c", "form-feed"),
    (b"\x1b7", "save-cursor"),
    (b"\x1b8", "restore-cursor"),
    (b"\x1b=", "application-keypad"),
    (b"\x1b>", "normal-keypad"),
    (b"\x1bD", "index"),
    (b"\x1bE", "next-line"),
    (b"\x1bH", "tab-set"),
    (b"\x1bM", "reverse-index"),
    (b"\x1bc", "full-reset"),
    (b"\x1b#8", "screen-alignment-test"),
    (b"\x1b%G", "utf-8-character-set"),
    (b"\x1b%@", "iso8859-1-character-set"),
    // Device control strings are consumed and dropped whole.
    (b"\x1bP%s\x1b\\", "ignore"),
    (b"\x1b[@", "insert-blank-characters"),
    (b"\x1b[%d@", "insert-blank-characters"),
    (b"\x1b[A", "cursor-up"),
    (b"\x1b[%dA", "cursor-up"),
    (b"\x1b[B", "cursor-down"),
    (b"\x1b[%dB", "cursor-down"),
    (b"\x1b[C", "cursor-forward"),
    (b"\x1b[%dC", "cursor-forward"),
    (b"\x1b[D", "cursor-backward"),
    (b"\x1b[%dD", "cursor-backward"),
    (b"\x1b[E", "cursor-next-line"),
    (b"\x1b[%dE", "cursor-next-line"),
    (b"\x1b[F", "cursor-preceding-line"),
    (b"\x1b[%dF", "cursor-preceding-line"),
    (b"\x1b[G", "cursor-character-absolute"),
    (b"\x1b[%dG", "cursor-character-absolute"),
    (b"\x1b[H", "cursor-position"),
    (b"\x1b[%dH", "cursor-position"),
    (b"\x1b[I", "cursor-forward-tabulation"),
    (b"\x1b[%dI", "cursor-forward-tabulation"),
    (b"\x1b[J", "erase-in-display"),
    (b"\x1b[%dJ", "erase-in-display"),
    (b"\x1b[?%dJ", "selective-erase-in-display"),
    (b"\x1b[K", "erase-in-line"),
    (b"\x1b[%dK", "erase-in-line"),
    (b"\x1b[?%dK", "selective-erase-in-line"),
    (b"\x1b[%dL", "insert-lines"),
    (b"\x1b[%dM", "delete-lines"),
    (b"\x1b[%dP", "delete-characters"),
    (b"\x1b[S", "scroll-up"),
    (b"\x1b[%dS", "scroll-up"),
    (b"\x1b[T", "scroll-down"),
    (b"\x1b[%dT", "scroll-down"),
    (b"\x1b[%dX", "erase-characters"),
    (b"\x1b[Z", "cursor-back-tab"),
    (b"\x1b[%dZ", "cursor-back-tab"),
    (b"\x1b[`", "character-position-absolute"),
    (b"\x1b[%d`", "character-position-absolute"),
    (b"\x1b[c", "send-primary-device-attributes"),
    (b"\x1b[%dc", "send-primary-device-attributes"),
    (b"\x1b[>c", "send-secondary-device-attributes"),
    (b"\x1b[>%dc", "send-secondary-device-attributes"),
    (b"\x1b[d", "line-position-absolute"),
    (b"\x1b[%dd", "line-position-absolute"),
    (b"\x1b[f", "horizontal-and-vertical-position"),
    (b"\x1b[%df", "horizontal-and-vertical-position"),
    (b"\x1b[g", "tab-clear"),
    (b"\x1b[%dg", "tab-clear"),
    (b"\x1b[%dh", "set-mode"),
    (b"\x1b[?%dh", "decset"),
    (b"\x1b[%dl", "reset-mode"),
    (b"\x1b[?%dl", "decreset"),
    (b"\x1b[m", "character-attributes"),
    (b"\x1b[%dm", "character-attributes"),
    (b"\x1b[%dn", "device-status-report"),
    (b"\x1b[?%dn", "dec-device-status-report"),
    (b"\x1b[!p", "soft-reset"),
    (b"\x1b[r", "set-scrolling-region"),
    (b"\x1b[%dr", "set-scrolling-region"),
    (b"\x1b[?%dr", "restore-mode"),
    (b"\x1b[s", "save-cursor"),
    (b"\x1b[?%ds", "save-mode"),
    (b"\x1b[%dt", "window-manipulation"),
    (b"\x1b[u", "restore-cursor"),
    (b"\x1b[x", "request-terminal-parameters"),
    (b"\x1b[%dx", "request-terminal-parameters"),
    (b"\x1b]0;%s\x07", "set-icon-and-window-title"),
    (b"\x1b]0;%s\x1b\\", "set-icon-and-window-title"),
    (b"\x1b]1;%s\x07", "set-icon-title"),
    (b"\x1b]1;%s\x1b\\", "set-icon-title"),
    (b"\x1b]2;%s\x07", "set-window-title"),
    (b"\x1b]2;%s\x1b\\", "set-window-title"),
    // Recognised so they never leak onto the grid; their handlers are the
    // embedder's problem and missing ones only warn.
    (b"\x1b]3;%s\x07", "set-xproperty"),
    (b"\x1b]3;%s\x1b\\", "set-xproperty"),
    (b"\x1b]4;%s\x07", "change-color"),
    (b"\x1b]4;%s\x1b\\", "change-color"),
    (b"\x1b]10;%s\x07", "change-foreground-colors"),
    (b"\x1b]11;%s\x07", "change-background-colors"),
    (b"\x1b]12;%s\x07", "change-cursor-colors"),
    (b"\x1b]46;%s\x07", "set-logfile"),
    (b"\x1b]50;%s\x07", "change-font-name"),
];

/// Look up the builtin entry for `emulation`.
#[must_use]
pub fn find_entry(emulation: &str) -> Option<Entry> {
    let source = match emulation {
        "xterm" => XTERM_TERMCAP,
        "vt220" => VT220_TERMCAP,
        _ => return None,
    };
    parser::parse_entry(source)
}
