// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! The display model: cells, rows, the two screens, grid primitives, and
//! selection-safe text extraction.

pub mod cell;
pub mod ops;
pub mod row;
#[allow(clippy::module_inception)]
pub mod screen;
pub mod selection;

pub use cell::{Cell, CellAttrs, color};
pub use row::RowData;
pub use screen::{CursorPos, Screen, ScrollRegion};
pub use selection::{Selection, SelectionKind, TextAttr};
