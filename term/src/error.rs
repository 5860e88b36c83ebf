// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Recoverable error surface of the terminal core.
//!
//! Malformed child output is never an error: it is substituted, skipped, or
//! retained for the next feed (see the input pipeline). These variants only
//! cover the operations the embedder can meaningfully react to.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TermError {
    /// A converter for the requested codeset could not be opened. The
    /// previous converter stays active.
    #[error("unable to convert characters from {from} to {to}")]
    #[diagnostic(help("the previous encoding remains in effect"))]
    EncodingOpenFailed { from: String, to: String },

    /// `set_emulation` was asked for a terminal type the builtin termcap
    /// database does not describe.
    #[error("no termcap entry for emulation {0:?}")]
    #[diagnostic(help("builtin entries exist for \"xterm\" and \"vt220\""))]
    UnknownEmulation(String),

    /// An embedder-supplied highlight pattern failed to compile.
    #[error("invalid match regex: {0}")]
    BadMatchRegex(#[from] regex::Error),

    /// Ring or cell storage could not grow. The terminal is unusable once
    /// this is reported; an `Eof` event follows.
    #[error("terminal storage exhausted: {0}")]
    ResourceExhausted(String),
}
