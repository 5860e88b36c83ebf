// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! VT220/xterm-compatible terminal emulator core.
//!
//! This crate is the byte-stream interpreter at the heart of a terminal
//! widget: it consumes opaque child-process output, maintains a
//! two-dimensional screen model with scrollback, and exposes the resulting
//! grid plus a byte sink back toward the child. Rendering, font handling,
//! PTY plumbing, and input translation are the embedding layer's job.
//!
//! # Architecture
//!
//! ```text
//! child bytes ──▶ ByteBuffer ──▶ Iso2022 (fragment + decode)
//!                                    │ code points
//!                                    ▼
//!                              MatchTable (termcap trie)
//!                               │ match        │ no match
//!                               ▼              ▼
//!                         seq handlers    insert_char
//!                               │              │
//!                               ▼              ▼
//!                        Screen / Ring grid model ──▶ host queries
//!                               │
//!                               ▼
//!                        TermEvent queue + outgoing ByteBuffer
//! ```
//!
//! # Quick start
//!
//! ```
//! use vt_core::Terminal;
//!
//! let mut term = Terminal::new(24, 80);
//! term.feed(b"hello \x1b[1mworld\x1b[0m");
//! term.process_incoming();
//!
//! assert_eq!(term.cursor(), (0, 11));
//! let row = term.row(0).unwrap();
//! assert!(row.cells[6].attr.bold);
//! ```

pub mod bytebuf;
pub mod charset;
pub mod error;
pub mod matcher;
pub mod ring;
pub mod screen;
pub mod seq;
pub mod term;
pub mod termcap;
pub mod units;

#[cfg(test)]
mod conformance;

pub use bytebuf::ByteBuffer;
pub use charset::{CodePoint, Iso2022};
pub use error::TermError;
pub use matcher::{MatchTable, Param, TableMatch};
pub use ring::Ring;
pub use screen::{Cell, CellAttrs, CursorPos, RowData, Screen, SelectionKind, TextAttr, color};
pub use seq::ProcessOutcome;
pub use term::{Dimensions, TermEvent, Terminal};
pub use units::{TermCol, TermRow};
