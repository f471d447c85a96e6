//! Synchronization of twin widgets.
//!
//! Each numeric field is shown by a slider and a number box, and each color
//! by a picker and a hex text box. An edit on one side is mirrored into the
//! other, validated, and written to the [`ParameterStore`] in one pass.
//!
//! # Loop Prevention
//!
//! A pass takes `&mut TwinSync`, so one pass cannot start inside another.
//! Assignments made through [`TwinWidgets::assign`] must not raise change
//! events, so every edit that reaches [`TwinSync::edit`] is a user edit and
//! runs exactly one pass.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::field::FieldId;
use crate::store::ParameterStore;
use crate::validate::ValidationResult;

// ============================================================================
// TwinSide
// ============================================================================

/// Which of the two widgets of a field an edit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwinSide {
    /// The slider or color picker.
    Primary,
    /// The number box or hex text box.
    Secondary,
}

impl TwinSide {
    pub fn other(self) -> Self {
        match self {
            TwinSide::Primary => TwinSide::Secondary,
            TwinSide::Secondary => TwinSide::Primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown widget side {0:?}")]
pub struct UnknownSide(pub String);

impl FromStr for TwinSide {
    type Err = UnknownSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" | "range" | "picker" => Ok(TwinSide::Primary),
            "secondary" | "number" | "text" => Ok(TwinSide::Secondary),
            other => Err(UnknownSide(other.to_string())),
        }
    }
}

impl fmt::Display for TwinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TwinSide::Primary => "primary",
            TwinSide::Secondary => "secondary",
        })
    }
}

// ============================================================================
// Widget Seam
// ============================================================================

/// The widget layer as seen by [`TwinSync`].
pub trait TwinWidgets {
    /// Sets a widget's displayed value.
    ///
    /// Implementations must not raise a change event for this assignment.
    fn assign(&mut self, field: FieldId, side: TwinSide, raw: &str);

    /// Shows or clears a field's validation message.
    fn show_validation(&mut self, _field: FieldId, _result: &ValidationResult) {}
}

/// Headless widget layer.
impl TwinWidgets for () {
    fn assign(&mut self, _field: FieldId, _side: TwinSide, _raw: &str) {}
}

// ============================================================================
// TwinSync
// ============================================================================

/// One user edit on one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub field: FieldId,
    pub side: TwinSide,
    pub raw: String,
}

impl Edit {
    pub fn new(field: FieldId, side: TwinSide, raw: impl Into<String>) -> Self {
        Self {
            field,
            side,
            raw: raw.into(),
        }
    }
}

/// The result of one pass. `pass` counts passes since creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub pass: u64,
    pub result: ValidationResult,
}

#[derive(Debug, Default)]
pub struct TwinSync {
    passes: u64,
}

impl TwinSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Runs one synchronization pass for `edit`.
    ///
    /// Mirrors the raw text into the twin widget (valid or not), then
    /// validates and stores it, then reports the result to the widgets.
    pub fn edit<W>(&mut self, store: &mut ParameterStore, widgets: &mut W, edit: Edit) -> SyncOutcome
    where
        W: TwinWidgets + ?Sized,
    {
        if edit.field.spec().kind.has_twin() {
            widgets.assign(edit.field, edit.side.other(), &edit.raw);
        }

        let result = store.set(edit.field, &edit.raw);
        widgets.show_validation(edit.field, &result);

        self.passes += 1;
        debug!(
            field = %edit.field,
            side = %edit.side,
            pass = self.passes,
            valid = result.valid,
            "twin pass complete"
        );

        SyncOutcome {
            pass: self.passes,
            result,
        }
    }

    /// Writes `raw` into both widgets of `field` without touching the store.
    pub fn mirror_both<W>(widgets: &mut W, field: FieldId, raw: &str)
    where
        W: TwinWidgets + ?Sized,
    {
        widgets.assign(field, TwinSide::Primary, raw);
        if field.spec().kind.has_twin() {
            widgets.assign(field, TwinSide::Secondary, raw);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call.
    #[derive(Default)]
    struct Recorder {
        assigned: Vec<(FieldId, TwinSide, String)>,
        shown: Vec<(FieldId, bool, String)>,
    }

    impl TwinWidgets for Recorder {
        fn assign(&mut self, field: FieldId, side: TwinSide, raw: &str) {
            self.assigned.push((field, side, raw.to_string()));
        }

        fn show_validation(&mut self, field: FieldId, result: &ValidationResult) {
            self.shown.push((field, result.valid, result.message.clone()));
        }
    }

    #[test]
    fn edit_mirrors_into_twin_and_stores() {
        let mut store = ParameterStore::default();
        let mut widgets = Recorder::default();
        let mut sync = TwinSync::new();

        let outcome = sync.edit(
            &mut store,
            &mut widgets,
            Edit::new(FieldId::Blur, TwinSide::Primary, "40"),
        );

        assert!(outcome.result.valid);
        assert_eq!(
            widgets.assigned,
            [(FieldId::Blur, TwinSide::Secondary, "40".to_string())]
        );
        assert_eq!(store.current().blur_radius.get(), 40.0);
        assert_eq!(sync.passes(), 1);
    }

    #[test]
    fn invalid_text_is_still_mirrored() {
        let mut store = ParameterStore::default();
        let mut widgets = Recorder::default();
        let mut sync = TwinSync::new();

        let outcome = sync.edit(
            &mut store,
            &mut widgets,
            Edit::new(FieldId::ShadowColor, TwinSide::Secondary, "#12"),
        );

        let result = &outcome.result;
        assert!(!result.valid);
        assert_eq!(
            widgets.assigned,
            [(FieldId::ShadowColor, TwinSide::Primary, "#12".to_string())]
        );
        assert_eq!(
            widgets.shown,
            [(
                FieldId::ShadowColor,
                false,
                "Shadow Color must be a valid hex color (e.g., #FF0000)".to_string()
            )]
        );
        assert_eq!(store.current().shadow_color.as_str(), "#000000");
    }

    #[test]
    fn same_text_on_the_twin_is_still_a_pass() {
        let mut store = ParameterStore::default();
        let mut widgets = Recorder::default();
        let mut sync = TwinSync::new();
        let notified = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = std::rc::Rc::clone(&notified);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        sync.edit(
            &mut store,
            &mut widgets,
            Edit::new(FieldId::Blur, TwinSide::Primary, "40"),
        );
        let second = sync.edit(
            &mut store,
            &mut widgets,
            Edit::new(FieldId::Blur, TwinSide::Secondary, "40"),
        );

        assert_eq!(second.pass, 2);
        assert!(second.result.valid);
        assert_eq!(sync.passes(), 2);
        assert_eq!(notified.get(), 2);
        assert_eq!(widgets.shown.len(), 2);
        assert_eq!(
            widgets.assigned[1],
            (FieldId::Blur, TwinSide::Primary, "40".to_string())
        );
    }

    #[test]
    fn each_user_edit_is_one_pass() {
        let mut store = ParameterStore::default();
        let mut widgets = Recorder::default();
        let mut sync = TwinSync::new();

        for (side, raw) in [
            (TwinSide::Primary, "1"),
            (TwinSide::Primary, "12"),
            (TwinSide::Secondary, "12"),
            (TwinSide::Secondary, "13"),
        ] {
            sync.edit(
                &mut store,
                &mut widgets,
                Edit::new(FieldId::Horizontal, side, raw),
            );
        }

        assert_eq!(sync.passes(), 4);
        assert_eq!(store.current().horizontal_offset.get(), 13.0);
    }

    #[test]
    fn toggle_has_no_twin() {
        let mut store = ParameterStore::default();
        let mut widgets = Recorder::default();
        let mut sync = TwinSync::new();

        sync.edit(
            &mut store,
            &mut widgets,
            Edit::new(FieldId::ShadowType, TwinSide::Primary, "inset"),
        );

        assert!(widgets.assigned.is_empty());
        assert_eq!(store.current().shadow_type.css_token(), "inset");
    }

    #[test]
    fn side_names() {
        assert_eq!("range".parse::<TwinSide>(), Ok(TwinSide::Primary));
        assert_eq!("text".parse::<TwinSide>(), Ok(TwinSide::Secondary));
        assert!("left".parse::<TwinSide>().is_err());
        assert_eq!(TwinSide::Primary.other(), TwinSide::Secondary);
    }
}
