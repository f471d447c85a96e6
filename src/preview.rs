//! Live preview projection.

use serde::Serialize;

use crate::params::ShadowParameters;

/// The style values the page applies to its preview elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct PreviewStyle {
    /// Background of the surrounding container.
    pub container_background: String,
    /// Background of the shadowed box.
    pub box_background: String,
    /// Value for the box's `box-shadow` property.
    pub shadow_declaration: String,
}

/// Maps a parameter set to preview styles.
///
/// Callers pass the last valid value of every field, so a field that is
/// currently invalid keeps previewing its previous value.
pub fn project(params: &ShadowParameters) -> PreviewStyle {
    PreviewStyle {
        container_background: params.background_color.to_string(),
        box_background: params.box_color.to_string(),
        shadow_declaration: params.box_shadow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HexColor;

    #[test]
    fn projects_backgrounds_and_shadow() {
        let mut params = ShadowParameters::default();
        params.background_color = HexColor::parse("#0f0").unwrap();

        let style = project(&params);
        assert_eq!(style.container_background, "#00FF00");
        assert_eq!(style.box_background, "#F3A712");
        assert_eq!(
            style.shadow_declaration,
            "5px 5px 75px 0px rgba(0, 0, 0, 0.3) "
        );
    }
}
