//! The shadow parameter model.
//!
//! Every value type here is only constructible in its valid domain, so a
//! [`ShadowParameters`] can always be rendered without further checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{format_rgba, hex_to_rgb, normalize_hex, ColorError, Rgb};
use crate::field::FieldId;
use crate::validate::parse_number;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("length {0} is outside the range 0 to 100")]
    LengthOutOfRange(f64),

    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("unknown shadow type {0:?}")]
    UnknownShadowType(String),

    #[error(transparent)]
    Color(#[from] ColorError),
}

// ============================================================================
// Length
// ============================================================================

/// A pixel length in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Length(f64);

impl Length {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn new(value: f64) -> Result<Self, ParamError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            // Adding zero turns -0.0 into 0.0.
            Ok(Self(value + 0.0))
        } else {
            Err(ParamError::LengthOutOfRange(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Length {
    type Error = ParamError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Length> for f64 {
    fn from(length: Length) -> Self {
        length.0
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Opacity
// ============================================================================

/// An alpha value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Opacity(f64);

impl Opacity {
    pub fn new(value: f64) -> Result<Self, ColorError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value + 0.0))
        } else {
            Err(ColorError::OpacityOutOfRange(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Opacity {
    type Error = ColorError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Opacity> for f64 {
    fn from(opacity: Opacity) -> Self {
        opacity.0
    }
}

impl fmt::Display for Opacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// HexColor
// ============================================================================

/// A color in canonical `#RRGGBB` uppercase form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    hex: String,
    rgb: Rgb,
}

impl HexColor {
    /// Parses and normalizes 3- or 6-digit hex text, `#` optional.
    pub fn parse(text: &str) -> Result<Self, ColorError> {
        let hex = normalize_hex(text)?;
        let rgb = hex_to_rgb(&hex)?;
        Ok(Self { hex, rgb })
    }

    pub fn as_str(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// The `rgba()` composite of this color at the given opacity.
    pub fn rgba(&self, opacity: Opacity) -> String {
        format_rgba(self.rgb, opacity.get())
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.hex
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

// ============================================================================
// ShadowType
// ============================================================================

/// Whether the shadow is drawn outside or inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub enum ShadowType {
    #[default]
    Outline,
    Inset,
}

impl ShadowType {
    /// The trailing token of a `box-shadow` value: `inset` or nothing.
    pub fn css_token(self) -> &'static str {
        match self {
            ShadowType::Outline => "",
            ShadowType::Inset => "inset",
        }
    }

    /// Interprets toggle widget text. Anything that does not read as
    /// "checked" is an outline shadow.
    pub fn from_toggle(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inset" | "true" | "on" | "checked" | "1" => ShadowType::Inset,
            _ => ShadowType::Outline,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShadowType::Outline => "outline",
            ShadowType::Inset => "inset",
        }
    }
}

impl FromStr for ShadowType {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outline" => Ok(ShadowType::Outline),
            "inset" => Ok(ShadowType::Inset),
            other => Err(ParamError::UnknownShadowType(other.to_string())),
        }
    }
}

impl fmt::Display for ShadowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ParamValue
// ============================================================================

/// The typed value of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Length(Length),
    Opacity(Opacity),
    Color(HexColor),
    ShadowType(ShadowType),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Length(v) => write!(f, "{v}"),
            ParamValue::Opacity(v) => write!(f, "{v}"),
            ParamValue::Color(v) => write!(f, "{v}"),
            ParamValue::ShadowType(v) => write!(f, "{v}"),
        }
    }
}

// ============================================================================
// ShadowParameters
// ============================================================================

/// A complete, valid set of shadow parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowParameters {
    pub horizontal_offset: Length,
    pub vertical_offset: Length,
    pub blur_radius: Length,
    pub spread_radius: Length,
    pub opacity: Opacity,
    pub shadow_color: HexColor,
    pub background_color: HexColor,
    pub box_color: HexColor,
    pub shadow_type: ShadowType,
}

impl Default for ShadowParameters {
    fn default() -> Self {
        Self {
            horizontal_offset: Length(5.0),
            vertical_offset: Length(5.0),
            blur_radius: Length(75.0),
            spread_radius: Length(0.0),
            opacity: Opacity(0.3),
            shadow_color: HexColor {
                hex: "#000000".into(),
                rgb: Rgb::new(0, 0, 0),
            },
            background_color: HexColor {
                hex: "#FFFFFF".into(),
                rgb: Rgb::new(255, 255, 255),
            },
            box_color: HexColor {
                hex: "#F3A712".into(),
                rgb: Rgb::new(0xF3, 0xA7, 0x12),
            },
            shadow_type: ShadowType::Outline,
        }
    }
}

impl ShadowParameters {
    /// Returns the value of one field.
    pub fn get(&self, field: FieldId) -> ParamValue {
        match field {
            FieldId::Horizontal => ParamValue::Length(self.horizontal_offset),
            FieldId::Vertical => ParamValue::Length(self.vertical_offset),
            FieldId::Blur => ParamValue::Length(self.blur_radius),
            FieldId::Spread => ParamValue::Length(self.spread_radius),
            FieldId::Opacity => ParamValue::Opacity(self.opacity),
            FieldId::ShadowColor => ParamValue::Color(self.shadow_color.clone()),
            FieldId::BackgroundColor => ParamValue::Color(self.background_color.clone()),
            FieldId::BoxColor => ParamValue::Color(self.box_color.clone()),
            FieldId::ShadowType => ParamValue::ShadowType(self.shadow_type),
        }
    }

    /// Parses raw widget text into the typed value of `field` and stores it.
    ///
    /// Leaves `self` untouched on error.
    pub fn apply(&mut self, field: FieldId, raw: &str) -> Result<(), ParamError> {
        let number = || parse_number(raw).ok_or_else(|| ParamError::NotANumber(raw.to_string()));
        match field {
            FieldId::Horizontal => self.horizontal_offset = Length::new(number()?)?,
            FieldId::Vertical => self.vertical_offset = Length::new(number()?)?,
            FieldId::Blur => self.blur_radius = Length::new(number()?)?,
            FieldId::Spread => self.spread_radius = Length::new(number()?)?,
            FieldId::Opacity => self.opacity = Opacity::new(number()?)?,
            FieldId::ShadowColor => self.shadow_color = HexColor::parse(raw)?,
            FieldId::BackgroundColor => self.background_color = HexColor::parse(raw)?,
            FieldId::BoxColor => self.box_color = HexColor::parse(raw)?,
            FieldId::ShadowType => self.shadow_type = ShadowType::from_toggle(raw),
        }
        Ok(())
    }

    /// The `box-shadow` value: offsets, blur, spread, composite color and
    /// the `inset` token (empty for outline shadows).
    pub fn box_shadow(&self) -> String {
        format!(
            "{}px {}px {}px {}px {} {}",
            self.horizontal_offset,
            self.vertical_offset,
            self.blur_radius,
            self.spread_radius,
            self.shadow_color.rgba(self.opacity),
            self.shadow_type.css_token(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex_to_rgba;

    #[test]
    fn defaults_match_reset_state() {
        let params = ShadowParameters::default();
        assert_eq!(params.blur_radius.get(), 75.0);
        assert_eq!(params.opacity.get(), 0.3);
        assert_eq!(params.box_color.as_str(), "#F3A712");
        assert_eq!(params.box_color, HexColor::parse("#f3a712").unwrap());
        assert_eq!(params.background_color, HexColor::parse("fff").unwrap());
        assert_eq!(params.shadow_type, ShadowType::Outline);
    }

    #[test]
    fn values_reject_out_of_domain() {
        assert!(Length::new(100.0).is_ok());
        assert_eq!(Length::new(100.5), Err(ParamError::LengthOutOfRange(100.5)));
        assert!(Length::new(f64::NAN).is_err());
        assert!(matches!(
            Opacity::new(1.2),
            Err(ColorError::OpacityOutOfRange(_))
        ));
    }

    #[test]
    fn length_display_drops_trailing_zero() {
        assert_eq!(Length::new(5.0).unwrap().to_string(), "5");
        assert_eq!(Length::new(2.5).unwrap().to_string(), "2.5");
        assert_eq!(Opacity::new(1.0).unwrap().to_string(), "1");
    }

    #[test]
    fn hex_color_composite_matches_color_math() {
        let color = HexColor::parse("#1a2b3c").unwrap();
        let opacity = Opacity::new(0.45).unwrap();
        assert_eq!(color.as_str(), "#1A2B3C");
        assert_eq!(color.rgba(opacity), hex_to_rgba("#1a2b3c", 0.45).unwrap());
    }

    #[test]
    fn apply_parses_and_keeps_old_value_on_error() {
        let mut params = ShadowParameters::default();
        params.apply(FieldId::Spread, " 12 ").unwrap();
        assert_eq!(params.spread_radius.get(), 12.0);

        assert!(params.apply(FieldId::Spread, "120").is_err());
        assert_eq!(params.spread_radius.get(), 12.0);

        params.apply(FieldId::ShadowColor, "#abc").unwrap();
        assert_eq!(params.get(FieldId::ShadowColor).to_string(), "#AABBCC");

        params.apply(FieldId::ShadowType, "checked").unwrap();
        assert_eq!(params.shadow_type, ShadowType::Inset);
    }

    #[test]
    fn negative_zero_is_stored_as_zero() {
        let mut params = ShadowParameters::default();
        params.apply(FieldId::Horizontal, "-0").unwrap();
        params.apply(FieldId::Opacity, "-0").unwrap();

        assert!(params.horizontal_offset.get().is_sign_positive());
        assert_eq!(Length::new(-0.0).unwrap().to_string(), "0");
        assert_eq!(Opacity::new(-0.0).unwrap().to_string(), "0");
        assert_eq!(
            params.box_shadow(),
            "0px 5px 75px 0px rgba(0, 0, 0, 0) "
        );
    }

    #[test]
    fn toggle_text_interpretation() {
        assert_eq!(ShadowType::from_toggle("INSET"), ShadowType::Inset);
        assert_eq!(ShadowType::from_toggle("true"), ShadowType::Inset);
        assert_eq!(ShadowType::from_toggle(""), ShadowType::Outline);
        assert_eq!(ShadowType::from_toggle("outline"), ShadowType::Outline);
        assert!("sideways".parse::<ShadowType>().is_err());
    }

    #[test]
    fn box_shadow_composition() {
        let mut params = ShadowParameters::default();
        assert_eq!(params.box_shadow(), "5px 5px 75px 0px rgba(0, 0, 0, 0.3) ");

        params.shadow_type = ShadowType::Inset;
        assert_eq!(
            params.box_shadow(),
            "5px 5px 75px 0px rgba(0, 0, 0, 0.3) inset"
        );
    }

    #[test]
    fn parameters_deserialize_through_validation() {
        let json = serde_json::to_string(&ShadowParameters::default()).unwrap();
        assert!(json.contains("\"boxColor\":\"#F3A712\""));
        let back: ShadowParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ShadowParameters::default());

        let bad = json.replace("#F3A712", "#F3A7");
        assert!(serde_json::from_str::<ShadowParameters>(&bad).is_err());
    }
}
