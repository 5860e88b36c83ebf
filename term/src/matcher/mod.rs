// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Control-sequence recognition over decoded code points.

pub mod param;
pub mod table;

pub use param::{Param, Params};
pub use table::{MatchTable, TableMatch};
