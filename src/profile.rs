//! Serializable shadow profile.
//!
//! A [`ShadowProfile`] captures parameter values in a JSON-friendly form so
//! a session can be seeded from a file or handed between the page and the
//! engine. Every field is optional; missing fields take their defaults.
//!
//! # Example
//!
//! ```
//! use shadow_forge::{ShadowProfile, ShadowType};
//!
//! let json = r##"{ "blurRadius": 20, "boxColor": "#abc", "shadowType": "inset" }"##;
//! let profile = ShadowProfile::from_json(json).unwrap();
//!
//! let params = profile.to_parameters();
//! assert_eq!(params.box_color.as_str(), "#AABBCC");
//! assert_eq!(params.shadow_type, ShadowType::Inset);
//! ```

use serde::{Deserialize, Serialize};

use crate::params::{HexColor, Length, Opacity, ShadowParameters, ShadowType};

// ============================================================================
// ShadowProfile
// ============================================================================

/// A serializable, possibly partial, set of shadow parameters.
///
/// Values are validated while deserializing: an out-of-range length or a
/// malformed color is a JSON error, not a silently clamped value.
///
/// # JSON Format
///
/// ```json
/// {
///   "horizontalOffset": 5,
///   "verticalOffset": 5,
///   "blurRadius": 75,
///   "spreadRadius": 0,
///   "opacity": 0.3,
///   "shadowColor": "#000000",
///   "backgroundColor": "#FFFFFF",
///   "boxColor": "#F3A712",
///   "shadowType": "outline"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "tsify",
    derive(tsify_next::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct ShadowProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<f64>"))]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "number"))]
    pub horizontal_offset: Option<Length>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<f64>"))]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "number"))]
    pub vertical_offset: Option<Length>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<f64>"))]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "number"))]
    pub blur_radius: Option<Length>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<f64>"))]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "number"))]
    pub spread_radius: Option<Length>,

    /// Alpha of the shadow color (0.0-1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<f64>"))]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "number"))]
    pub opacity: Option<Opacity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<String>"))]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "string"))]
    pub shadow_color: Option<HexColor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<String>"))]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "string"))]
    pub background_color: Option<HexColor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "jsonschema", schemars(with = "Option<String>"))]
    #[cfg_attr(feature = "tsify", tsify(optional, type = "string"))]
    pub box_color: Option<HexColor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "tsify", tsify(optional))]
    pub shadow_type: Option<ShadowType>,
}

impl ShadowProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the horizontal and vertical offsets.
    pub fn with_offsets(mut self, horizontal: Length, vertical: Length) -> Self {
        self.horizontal_offset = Some(horizontal);
        self.vertical_offset = Some(vertical);
        self
    }

    pub fn with_blur(mut self, blur: Length) -> Self {
        self.blur_radius = Some(blur);
        self
    }

    pub fn with_spread(mut self, spread: Length) -> Self {
        self.spread_radius = Some(spread);
        self
    }

    pub fn with_shadow_color(mut self, color: HexColor, opacity: Opacity) -> Self {
        self.shadow_color = Some(color);
        self.opacity = Some(opacity);
        self
    }

    pub fn with_box_color(mut self, color: HexColor) -> Self {
        self.box_color = Some(color);
        self
    }

    pub fn with_background_color(mut self, color: HexColor) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_shadow_type(mut self, shadow_type: ShadowType) -> Self {
        self.shadow_type = Some(shadow_type);
        self
    }

    /// Fills missing fields from [`ShadowParameters::default`].
    pub fn to_parameters(&self) -> ShadowParameters {
        let base = ShadowParameters::default();
        ShadowParameters {
            horizontal_offset: self.horizontal_offset.unwrap_or(base.horizontal_offset),
            vertical_offset: self.vertical_offset.unwrap_or(base.vertical_offset),
            blur_radius: self.blur_radius.unwrap_or(base.blur_radius),
            spread_radius: self.spread_radius.unwrap_or(base.spread_radius),
            opacity: self.opacity.unwrap_or(base.opacity),
            shadow_color: self.shadow_color.clone().unwrap_or(base.shadow_color),
            background_color: self
                .background_color
                .clone()
                .unwrap_or(base.background_color),
            box_color: self.box_color.clone().unwrap_or(base.box_color),
            shadow_type: self.shadow_type.unwrap_or(base.shadow_type),
        }
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&ShadowParameters> for ShadowProfile {
    fn from(params: &ShadowParameters) -> Self {
        Self {
            horizontal_offset: Some(params.horizontal_offset),
            vertical_offset: Some(params.vertical_offset),
            blur_radius: Some(params.blur_radius),
            spread_radius: Some(params.spread_radius),
            opacity: Some(params.opacity),
            shadow_color: Some(params.shadow_color.clone()),
            background_color: Some(params.background_color.clone()),
            box_color: Some(params.box_color.clone()),
            shadow_type: Some(params.shadow_type),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_json_uses_camel_case() {
        let profile = ShadowProfile::new()
            .with_blur(Length::new(12.0).unwrap())
            .with_shadow_type(ShadowType::Inset);

        let json = profile.to_json_pretty().unwrap();
        assert!(json.contains("\"blurRadius\""));
        assert!(json.contains("\"inset\""));
        assert!(!json.contains("boxColor"));
    }

    #[test]
    fn profile_round_trips_parameters() {
        let params = ShadowParameters::default();
        let json = ShadowProfile::from(&params).to_json().unwrap();
        let restored = ShadowProfile::from_json(&json).unwrap();
        assert_eq!(restored.to_parameters(), params);
    }

    #[test]
    fn empty_profile_yields_defaults() {
        let profile = ShadowProfile::from_json("{}").unwrap();
        assert_eq!(profile, ShadowProfile::new());
        assert_eq!(profile.to_parameters(), ShadowParameters::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(ShadowProfile::from_json(r#"{ "blurRadius": 101 }"#).is_err());
        assert!(ShadowProfile::from_json(r#"{ "opacity": -0.5 }"#).is_err());
        assert!(ShadowProfile::from_json(r##"{ "shadowColor": "#12345" }"##).is_err());
        assert!(ShadowProfile::from_json(r#"{ "shadowType": "outset" }"#).is_err());
    }

    #[test]
    fn colors_are_normalized_on_load() {
        let profile = ShadowProfile::from_json(r#"{ "backgroundColor": "0f0" }"#).unwrap();
        assert_eq!(
            profile.to_parameters().background_color.as_str(),
            "#00FF00"
        );
    }
}
