//! Shadow generator session: store, twin sync and widgets in one place.

use thiserror::Error;
use tracing::{info, warn};

use crate::codegen::generate_style_code;
use crate::field::FieldId;
use crate::params::{ShadowParameters, ShadowType};
use crate::preview::PreviewStyle;
use crate::profile::ShadowProfile;
use crate::store::{ParameterStore, StoreChange, StoreError, SubscriptionId};
use crate::twin::{Edit, SyncOutcome, TwinSide, TwinSync, TwinWidgets};
use crate::validate::FormReport;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`ShadowProfile`].
pub trait Configurable {
    /// Applies a profile's settings. Missing fields take their defaults.
    fn apply_profile(&mut self, profile: &ShadowProfile);

    /// Exports the current (last valid) settings as a profile.
    fn export_profile(&self) -> ShadowProfile;
}

impl Configurable for ParameterStore {
    fn apply_profile(&mut self, profile: &ShadowProfile) {
        let params = profile.to_parameters();
        for field in FieldId::ALL {
            self.set(field, &params.get(field).to_string());
        }
    }

    fn export_profile(&self) -> ShadowProfile {
        ShadowProfile::from(self.current())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// At least one field failed the whole-form check.
    #[error("{} field(s) are invalid", .0.errors().count())]
    InvalidForm(FormReport),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// ShadowGenerator
// ============================================================================

/// A single editing session.
///
/// The generator owns the [`ParameterStore`] and routes every widget edit
/// through [`TwinSync`]. Export runs the whole-form check at the moment it
/// is requested and only then produces the style block.
///
/// # Example
///
/// ```
/// use shadow_forge::{FieldId, ShadowGenerator, TwinSide};
///
/// let mut generator = ShadowGenerator::new(());
/// generator.edit(FieldId::Blur, TwinSide::Primary, "20");
/// generator.edit(FieldId::BoxColor, TwinSide::Secondary, "#123456");
///
/// let css = generator.export().unwrap();
/// assert!(css.contains("background: #123456;"));
/// assert!(css.contains("5px 5px 20px 0px rgba(0, 0, 0, 0.3)"));
/// ```
pub struct ShadowGenerator<W: TwinWidgets> {
    store: ParameterStore,
    sync: TwinSync,
    widgets: W,
}

impl<W: TwinWidgets> ShadowGenerator<W> {
    /// Starts a session with default parameters.
    pub fn new(widgets: W) -> Self {
        Self::with_parameters(widgets, ShadowParameters::default())
    }

    /// Starts a session from `params`, writing each value into both widgets
    /// of its pair.
    pub fn with_parameters(widgets: W, params: ShadowParameters) -> Self {
        let mut generator = Self {
            store: ParameterStore::new(params),
            sync: TwinSync::new(),
            widgets,
        };
        generator.refresh_widgets();
        generator
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn widgets(&self) -> &W {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut W {
        &mut self.widgets
    }

    /// Consumes the session, returning the widget layer.
    pub fn into_widgets(self) -> W {
        self.widgets
    }

    /// Handles one user edit on one widget.
    pub fn edit(&mut self, field: FieldId, side: TwinSide, raw: &str) -> SyncOutcome {
        self.sync.edit(
            &mut self.store,
            &mut self.widgets,
            Edit::new(field, side, raw),
        )
    }

    /// Handles the shadow-type toggle.
    pub fn set_shadow_type(&mut self, shadow_type: ShadowType) -> SyncOutcome {
        self.edit(FieldId::ShadowType, TwinSide::Primary, shadow_type.as_str())
    }

    /// Preview styles for the last valid value of every field.
    pub fn preview(&self) -> PreviewStyle {
        self.store.preview()
    }

    /// Registers a store listener (see [`ParameterStore::subscribe`]).
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange<'_>) + 'static,
    {
        self.store.subscribe(listener)
    }

    /// Validates every field and, if all pass, returns the style block.
    ///
    /// Every field's result is pushed to the widgets first, so all errors
    /// are displayed together.
    pub fn export(&mut self) -> Result<String, ExportError> {
        let report = self.store.report();
        for (field, result) in report.results() {
            self.widgets.show_validation(*field, result);
        }

        if !report.is_valid() {
            let invalid: Vec<_> = report.errors().map(|(id, _)| id.as_str()).collect();
            warn!(fields = ?invalid, "export blocked by invalid fields");
            return Err(ExportError::InvalidForm(report));
        }

        let snapshot = self.store.snapshot()?;
        info!("style code exported");
        Ok(generate_style_code(&snapshot))
    }

    fn refresh_widgets(&mut self) {
        for field in FieldId::ALL {
            TwinSync::mirror_both(&mut self.widgets, field, self.store.raw(field));
        }
    }
}

impl<W: TwinWidgets> Configurable for ShadowGenerator<W> {
    fn apply_profile(&mut self, profile: &ShadowProfile) {
        self.store.apply_profile(profile);
        self.refresh_widgets();
    }

    fn export_profile(&self) -> ShadowProfile {
        self.store.export_profile()
    }
}

// ============================================================================
// Tests
// ============================================================================
