//! Hex color parsing, normalization and RGBA composition.
//!
//! All functions accept hex text with or without a leading `#` and in
//! either the 3-digit (`abc`) or 6-digit (`aabbcc`) form. The short form is
//! expanded by digit duplication before any channel is read.
//!
//! # Example
//!
//! ```
//! use shadow_forge::color::{hex_to_rgba, normalize_hex};
//!
//! assert_eq!(hex_to_rgba("#FF0000", 0.5).unwrap(), "rgba(255, 0, 0, 0.5)");
//! assert_eq!(normalize_hex("#abc").unwrap(), "#AABBCC");
//! ```

use palette::Srgb;
use thiserror::Error;

/// An 8-bit sRGB triple.
pub type Rgb = Srgb<u8>;

// ============================================================================
// Errors
// ============================================================================

/// Failures raised by the color functions.
///
/// These indicate a caller handed unvalidated text to the color layer;
/// user input is expected to pass through [`crate::validate`] first.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid hex color format: {0:?}")]
    InvalidHexFormat(String),

    #[error("opacity {0} is outside the range 0 to 1")]
    OpacityOutOfRange(f64),

    #[error("failed to parse hex channel {0:?}")]
    ParseFailure(String),
}

// ============================================================================
// Validation and Normalization
// ============================================================================

/// Removes a single leading `#`, if present.
fn strip_hash(hex: &str) -> &str {
    hex.strip_prefix('#').unwrap_or(hex)
}

/// Returns true if `digits` is exactly 3 or 6 ASCII hex digits (no `#`).
pub(crate) fn is_hex_digits(digits: &str) -> bool {
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Expands `abc` to `aabbcc`; 6-digit input is returned as is.
fn expand(digits: &str) -> String {
    if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    }
}

/// Returns true if `color` is a 3- or 6-digit hex color, `#` optional.
pub fn is_valid_hex(color: &str) -> bool {
    is_hex_digits(strip_hash(color))
}

/// Normalizes a hex color to the canonical `#RRGGBB` uppercase form.
pub fn normalize_hex(hex: &str) -> Result<String, ColorError> {
    let digits = strip_hash(hex);
    if !is_hex_digits(digits) {
        return Err(ColorError::InvalidHexFormat(hex.to_string()));
    }
    Ok(format!("#{}", expand(digits).to_ascii_uppercase()))
}

// ============================================================================
// Conversions
// ============================================================================

/// Parses a hex color into its RGB channels.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = strip_hash(hex);
    if !is_hex_digits(digits) {
        return Err(ColorError::InvalidHexFormat(hex.to_string()));
    }

    let full = expand(digits);
    let channel = |range: std::ops::Range<usize>| -> Result<u8, ColorError> {
        let text = &full[range];
        u8::from_str_radix(text, 16).map_err(|_| ColorError::ParseFailure(text.to_string()))
    };

    Ok(Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats RGB channels as a lowercase `#rrggbb` string.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Formats an `rgba(R, G, B, A)` string. The opacity is printed with the
/// default float formatting, so `1.0` prints as `1` and `0.5` as `0.5`.
pub(crate) fn format_rgba(rgb: Rgb, opacity: f64) -> String {
    format!("rgba({}, {}, {}, {})", rgb.red, rgb.green, rgb.blue, opacity)
}

/// Combines a hex color and an opacity into a CSS `rgba()` value.
///
/// The opacity range is checked before the hex text, so an out-of-range
/// opacity is reported even when the color is also malformed.
pub fn hex_to_rgba(hex: &str, opacity: f64) -> Result<String, ColorError> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(ColorError::OpacityOutOfRange(opacity));
    }
    let rgb = hex_to_rgb(hex)?;
    Ok(format_rgba(rgb, opacity))
}

// ============================================================================
// Tests
// ============================================================================
