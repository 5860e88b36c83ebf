// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! End-to-end conformance tests: literal byte streams in, expected grid
//! state and replies out.

pub mod fixtures;
pub mod test_invariants;
pub mod test_scenarios;
