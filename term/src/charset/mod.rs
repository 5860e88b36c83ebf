// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Character-set handling: ISO-2022 designations and shifts, national
//! replacement sets, codeset conversion, and East-Asian width rules.

pub mod converter;
pub mod iso2022;
pub mod maps;
pub mod width;

pub use converter::{ConvStatus, Convert, Converter};
pub use iso2022::Iso2022;
pub use maps::{Designation, WIDE_FUDGE};
pub use width::{CodePoint, INVALID_CODEPOINT, encoded_width, raw_scalar, set_encoded_width, to_char};
