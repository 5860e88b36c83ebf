// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Encoded-width bits and East-Asian width resolution.
//!
//! A decoded glyph is a 32-bit value: the low 21 bits hold the Unicode
//! scalar, the next two bits an already-determined display width (0, 1 or 2
//! columns). Width 0 marks combining marks, width 2 East-Asian wide glyphs.
//! The decoder stamps the width when the character set forces one or when
//! the code point is in the East-Asian *ambiguous* class (whose width is a
//! locale property, resolved once); otherwise the width stays implicit and
//! the screen layer falls back to [`unichar_width`].

use unicode_width::UnicodeWidthChar;

/// Decoded glyph: Unicode scalar plus optional embedded width.
pub type CodePoint = u32;

/// Emitted for byte sequences that are not valid in the current codeset.
pub const INVALID_CODEPOINT: CodePoint = 0xFFFF;

const ENCODED_WIDTH_BIT_OFFSET: u32 = 21;
const ENCODED_WIDTH_MASK: u32 = 0b11 << ENCODED_WIDTH_BIT_OFFSET;

/// The width previously stamped onto `c`, or 0 when the width is implicit.
#[must_use]
pub fn encoded_width(c: CodePoint) -> usize {
    ((c & ENCODED_WIDTH_MASK) >> ENCODED_WIDTH_BIT_OFFSET).min(2) as usize
}

/// Stamp `width` (clamped to 0..=2) onto `c`.
#[must_use]
pub fn set_encoded_width(c: CodePoint, width: usize) -> CodePoint {
    let width = width.min(2) as u32;
    (c & !ENCODED_WIDTH_MASK) | (width << ENCODED_WIDTH_BIT_OFFSET)
}

/// The bare Unicode scalar with any width bits stripped.
#[must_use]
pub fn raw_scalar(c: CodePoint) -> u32 { c & !ENCODED_WIDTH_MASK }

/// `raw_scalar` as a `char`, substituting U+FFFD for non-scalar values.
#[must_use]
pub fn to_char(c: CodePoint) -> char {
    char::from_u32(raw_scalar(c)).unwrap_or('\u{FFFD}')
}

/// Whether the scalar belongs to the East-Asian ambiguous class, i.e. its
/// column count depends on the locale.
#[must_use]
pub fn is_ambiguous(c: CodePoint) -> bool {
    match char::from_u32(raw_scalar(c)) {
        Some(ch) => ch.width() != ch.width_cjk(),
        None => false,
    }
}

/// Width of the ambiguous class under the current locale: 2 in CJKV locales,
/// 1 everywhere else. Resolved from `LC_ALL` / `LC_CTYPE` / `LANG` in that
/// order; callers cache the answer.
#[must_use]
pub fn ambiguous_width_from_locale() -> usize {
    let lang = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_CTYPE"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default();
    let wide = ["ja", "ko", "vi", "zh"]
        .iter()
        .any(|prefix| lang.to_ascii_lowercase().starts_with(prefix));
    let width = if wide { 2 } else { 1 };
    tracing::debug!(locale = %lang, width, "resolved ambiguous character width");
    width
}

/// Column count of a scalar whose encoded width is implicit.
///
/// `ambiguous_width` is the cached locale answer from
/// [`ambiguous_width_from_locale`].
#[must_use]
pub fn unichar_width(c: CodePoint, ambiguous_width: usize) -> usize {
    let Some(ch) = char::from_u32(raw_scalar(c)) else {
        return 1;
    };
    if is_ambiguous(c) {
        return ambiguous_width;
    }
    // Combining marks report width 0, East-Asian wide glyphs 2.
    ch.width().unwrap_or(1)
}
