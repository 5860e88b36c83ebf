// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! The terminal core and its host-facing surface.

pub mod events;
#[allow(clippy::module_inception)]
pub mod terminal;
pub mod timers;

pub use events::TermEvent;
pub use terminal::{Dimensions, EmulationFlags, FkeyMode, KeyMode, MouseTracking, Terminal};
pub use timers::{COALESCE_INTERVAL, DISPLAY_INTERVAL, UpdateTimers};
