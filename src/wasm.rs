//! JavaScript binding for the page's widget layer.
//!
//! [`JsShadowGenerator`] wraps a [`ShadowGenerator`] whose widget layer
//! records what should be written to the page instead of writing it. Each
//! call returns those instructions, so the page assigns widget values
//! itself and never re-enters its own input handlers.
//!
//! # Feature Flag
//!
//! ```toml
//! [dependencies]
//! shadow-forge = { version = "0.1", features = ["wasm"] }
//! ```
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { JsShadowGenerator } from 'shadow-forge';
//!
//! await init();
//! const generator = new JsShadowGenerator();
//!
//! blurRange.addEventListener('input', () => {
//!   const update = generator.edit('blur', 'range', blurRange.value);
//!   for (const a of update.assignments) widgets[a.field][a.side].value = a.value;
//!   box.style.boxShadow = update.preview.shadowDeclaration;
//! });
//!
//! codeContent.textContent = generator.exportCss();
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::field::FieldId;
use crate::generator::{Configurable, ExportError, ShadowGenerator};
use crate::params::ShadowType;
use crate::preview::PreviewStyle;
use crate::profile::ShadowProfile;
use crate::twin::{TwinSide, TwinWidgets};
use crate::validate::ValidationResult;

// ============================================================================
// Recorded Widget Layer
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Assignment {
    field: FieldId,
    side: TwinSide,
    value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldMessage {
    field: FieldId,
    #[serde(flatten)]
    result: ValidationResult,
}

#[derive(Debug, Default)]
struct RecordedWidgets {
    assignments: Vec<Assignment>,
    messages: Vec<FieldMessage>,
}

impl TwinWidgets for RecordedWidgets {
    fn assign(&mut self, field: FieldId, side: TwinSide, raw: &str) {
        self.assignments.push(Assignment {
            field,
            side,
            value: raw.to_string(),
        });
    }

    fn show_validation(&mut self, field: FieldId, result: &ValidationResult) {
        self.messages.push(FieldMessage {
            field,
            result: result.clone(),
        });
    }
}

/// What the page must apply after a call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageUpdate {
    assignments: Vec<Assignment>,
    messages: Vec<FieldMessage>,
    preview: PreviewStyle,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Failed to serialize update: {}", e)))
}

// ============================================================================
// JsShadowGenerator
// ============================================================================

#[wasm_bindgen]
pub struct JsShadowGenerator {
    generator: ShadowGenerator<RecordedWidgets>,
}

#[wasm_bindgen]
impl JsShadowGenerator {
    /// Creates a session with default parameters.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsShadowGenerator {
        Self {
            generator: ShadowGenerator::new(RecordedWidgets::default()),
        }
    }

    /// Creates a session from a profile JSON string.
    #[wasm_bindgen(js_name = "fromProfileJson")]
    pub fn from_profile_json(json: &str) -> Result<JsShadowGenerator, JsError> {
        let profile = ShadowProfile::from_json(json)
            .map_err(|e| JsError::new(&format!("Failed to parse profile: {}", e)))?;
        Ok(Self {
            generator: ShadowGenerator::with_parameters(
                RecordedWidgets::default(),
                profile.to_parameters(),
            ),
        })
    }

    /// Returns the assignments needed to bring every widget in sync with
    /// the session's starting values.
    #[wasm_bindgen(js_name = "initialState")]
    pub fn initial_state(&mut self) -> Result<JsValue, JsError> {
        self.drain()
    }

    /// Handles a user edit on one widget.
    ///
    /// `side` is `range`/`picker` (or `primary`) for the slider or color
    /// picker, `number`/`text` (or `secondary`) for the text box.
    pub fn edit(&mut self, field: &str, side: &str, raw: &str) -> Result<JsValue, JsError> {
        let field = field.parse::<FieldId>().map_err(|e| JsError::new(&format!("{}", e)))?;
        let side = side.parse::<TwinSide>().map_err(|e| JsError::new(&format!("{}", e)))?;
        self.generator.edit(field, side, raw);
        self.drain()
    }

    /// Handles the inset/outline toggle.
    #[wasm_bindgen(js_name = "setShadowType")]
    pub fn set_shadow_type(&mut self, inset: bool) -> Result<JsValue, JsError> {
        let shadow_type = if inset {
            ShadowType::Inset
        } else {
            ShadowType::Outline
        };
        self.generator.set_shadow_type(shadow_type);
        self.drain()
    }

    /// Current preview styles.
    pub fn preview(&self) -> Result<JsValue, JsError> {
        to_js(&self.generator.preview())
    }

    /// Returns true if every field is currently valid.
    #[wasm_bindgen(js_name = "isValid")]
    pub fn is_valid(&self) -> bool {
        self.generator.store().is_valid()
    }

    /// Produces the style block, or throws with every field error.
    #[wasm_bindgen(js_name = "exportCss")]
    pub fn export_css(&mut self) -> Result<String, JsError> {
        let css = self.generator.export();
        self.generator.widgets_mut().messages.clear();
        match css {
            Ok(css) => Ok(css),
            Err(ExportError::InvalidForm(report)) => {
                let messages: Vec<_> = report.errors().map(|(_, r)| r.message.as_str()).collect();
                Err(JsError::new(&messages.join("\n")))
            }
            Err(e) => Err(JsError::new(&e.to_string())),
        }
    }

    /// Exports the current settings as a profile JSON string.
    #[wasm_bindgen(js_name = "exportProfileJson")]
    pub fn export_profile_json(&self) -> Result<String, JsError> {
        self.generator
            .export_profile()
            .to_json()
            .map_err(|e| JsError::new(&format!("Failed to serialize profile: {}", e)))
    }

    /// Applies a profile JSON string and returns the resulting page update.
    #[wasm_bindgen(js_name = "applyProfileJson")]
    pub fn apply_profile_json(&mut self, json: &str) -> Result<JsValue, JsError> {
        let profile = ShadowProfile::from_json(json)
            .map_err(|e| JsError::new(&format!("Failed to parse profile: {}", e)))?;
        self.generator.apply_profile(&profile);
        self.drain()
    }
}

impl JsShadowGenerator {
    fn drain(&mut self) -> Result<JsValue, JsError> {
        let widgets = self.generator.widgets_mut();
        let update = PageUpdate {
            assignments: std::mem::take(&mut widgets.assignments),
            messages: std::mem::take(&mut widgets.messages),
            preview: self.generator.preview(),
        };
        to_js(&update)
    }
}

impl Default for JsShadowGenerator {
    fn default() -> Self {
        Self::new()
    }
}
