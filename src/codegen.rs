//! Export of the `.element { ... }` style declaration.

use crate::params::ShadowParameters;

/// Selector used in the exported block.
pub const SELECTOR: &str = ".element";

/// Builds the exported CSS block for a validated parameter set.
///
/// The output is a pure function of `params`:
///
/// ```text
/// .element {
///   background: #F3A712;
///   box-shadow: 5px 5px 75px 0px rgba(0, 0, 0, 0.3) ;
/// }
/// ```
///
/// Outline shadows leave the trailing token empty, which keeps the space
/// before the semicolon.
pub fn generate_style_code(params: &ShadowParameters) -> String {
    format!(
        "{SELECTOR} {{\n  background: {};\n  box-shadow: {};\n}}",
        params.box_color,
        params.box_shadow(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{HexColor, Length, Opacity, ShadowType};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_parameters_export() {
        let code = generate_style_code(&ShadowParameters::default());
        assert_eq!(
            code,
            ".element {\n  background: #F3A712;\n  box-shadow: 5px 5px 75px 0px rgba(0, 0, 0, 0.3) ;\n}"
        );
    }

    #[test]
    fn inset_token_is_emitted() {
        let params = ShadowParameters {
            horizontal_offset: Length::new(10.0).unwrap(),
            vertical_offset: Length::new(0.0).unwrap(),
            blur_radius: Length::new(4.5).unwrap(),
            spread_radius: Length::new(2.0).unwrap(),
            opacity: Opacity::new(1.0).unwrap(),
            shadow_color: HexColor::parse("#abc").unwrap(),
            box_color: HexColor::parse("#123456").unwrap(),
            shadow_type: ShadowType::Inset,
            ..ShadowParameters::default()
        };

        let code = generate_style_code(&params);
        assert!(code.contains("  background: #123456;\n"));
        assert!(code.contains("  box-shadow: 10px 0px 4.5px 2px rgba(170, 187, 204, 1) inset;\n"));
        assert!(!code.contains("outline"));
    }

    #[test]
    fn output_is_deterministic() {
        let params = ShadowParameters::default();
        assert_eq!(generate_style_code(&params), generate_style_code(&params.clone()));
    }
}
