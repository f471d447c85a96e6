//! shadow-forge: box-shadow parameter engine
//!
//! This crate holds the parameter, validation and rendering pipeline behind
//! a CSS box-shadow generator: twin widgets (slider and number box, color
//! picker and hex text) feed raw text into a validated parameter store,
//! which drives a live preview and, on request, an exported style block.
//!
//! # Example
//!
//! ```
//! use shadow_forge::{FieldId, ShadowGenerator, ShadowType, TwinSide};
//!
//! // `()` is a headless widget layer; a real page implements `TwinWidgets`.
//! let mut generator = ShadowGenerator::new(());
//!
//! // A slider drag and a typed value
//! generator.edit(FieldId::Horizontal, TwinSide::Primary, "8");
//! generator.edit(FieldId::ShadowColor, TwinSide::Secondary, "#336699");
//! generator.set_shadow_type(ShadowType::Inset);
//!
//! // Live preview never waits for the whole form to be valid
//! generator.edit(FieldId::Blur, TwinSide::Secondary, "999");
//! let preview = generator.preview();
//! assert_eq!(
//!     preview.shadow_declaration,
//!     "8px 5px 75px 0px rgba(51, 102, 153, 0.3) inset"
//! );
//!
//! // Export is blocked until every field is valid
//! assert!(generator.export().is_err());
//! generator.edit(FieldId::Blur, TwinSide::Secondary, "20");
//! let css = generator.export().unwrap();
//! assert!(css.contains("box-shadow: 8px 5px 20px 0px rgba(51, 102, 153, 0.3) inset;"));
//! ```
//!
//! # Profiles
//!
//! Sessions can be seeded from, and exported to, JSON via [`ShadowProfile`]
//! and the [`Configurable`] trait:
//!
//! ```
//! use shadow_forge::{Configurable, ShadowGenerator, ShadowProfile};
//!
//! let profile = ShadowProfile::from_json(r##"{ "boxColor": "#abc" }"##).unwrap();
//! let mut generator = ShadowGenerator::new(());
//! generator.apply_profile(&profile);
//!
//! let json = generator.export_profile().to_json().unwrap();
//! assert!(json.contains("\"boxColor\":\"#AABBCC\""));
//! ```

pub mod color;
mod codegen;
mod field;
mod generator;
mod params;
mod preview;
mod profile;
mod store;
mod twin;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

pub use codegen::{generate_style_code, SELECTOR};
pub use color::{ColorError, Rgb};
pub use field::{FieldId, FieldKind, FieldSpec, UnknownField, FIELD_SPECS};
pub use generator::{Configurable, ExportError, ShadowGenerator};
pub use params::{HexColor, Length, Opacity, ParamError, ParamValue, ShadowParameters, ShadowType};
pub use preview::{project, PreviewStyle};
pub use profile::ShadowProfile;
pub use store::{FieldState, FieldValue, ParameterStore, StoreChange, StoreError, SubscriptionId};
pub use twin::{Edit, SyncOutcome, TwinSide, TwinSync, TwinWidgets, UnknownSide};
pub use validate::{FieldError, FormReport, ValidationResult};

#[cfg(feature = "wasm")]
pub use wasm::JsShadowGenerator;
