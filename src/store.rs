//! The authoritative record of the current shadow parameters.
//!
//! [`ParameterStore`] keeps two views of every field: the last raw text
//! the user entered (with its validation result) and the last *valid*
//! typed value. Invalid input is recorded but never written into the
//! typed parameters, so the preview always has something to render.

use std::fmt;

use thiserror::Error;
use tracing::{debug, error, trace};

use crate::color::ColorError;
use crate::field::FieldId;
use crate::params::{ParamError, ParamValue, ShadowParameters};
use crate::preview::{project, PreviewStyle};
use crate::validate::{validate_field, validate_form, FieldError, FormReport, ValidationResult};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("fields are invalid: {}", list_fields(.0))]
    InvalidFields(Vec<FieldId>),
}

fn list_fields(fields: &[FieldId]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The validation error matching a failed [`ShadowParameters::apply`].
fn apply_error(error: &ParamError) -> FieldError {
    match error {
        ParamError::LengthOutOfRange(v) | ParamError::Color(ColorError::OpacityOutOfRange(v)) => {
            if *v < 0.0 {
                FieldError::BelowMin
            } else {
                FieldError::AboveMax
            }
        }
        ParamError::NotANumber(_) | ParamError::UnknownShadowType(_) => FieldError::NotANumber,
        ParamError::Color(_) => FieldError::InvalidColor,
    }
}

// ============================================================================
// Field State
// ============================================================================

/// The last raw input of a field and whether it passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub raw: String,
    pub result: ValidationResult,
}

/// What [`ParameterStore::get`] returns for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Valid(ParamValue),
    /// The field's raw text failed validation; `last_valid` is still what
    /// the preview shows.
    Invalid { raw: String, last_valid: ParamValue },
}

/// Passed to subscribers after every [`ParameterStore::set`].
#[derive(Debug)]
pub struct StoreChange<'a> {
    pub field: FieldId,
    pub result: &'a ValidationResult,
    pub preview: &'a PreviewStyle,
}

/// Handle returned by [`ParameterStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange<'_>)>;

// ============================================================================
// ParameterStore
// ============================================================================

pub struct ParameterStore {
    params: ShadowParameters,
    fields: Vec<FieldState>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(ShadowParameters::default())
    }
}

impl fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStore")
            .field("params", &self.params)
            .field("fields", &self.fields)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ParameterStore {
    /// Creates a store where every field is valid and echoes `params`.
    pub fn new(params: ShadowParameters) -> Self {
        let fields = FieldId::ALL
            .iter()
            .map(|&id| FieldState {
                raw: params.get(id).to_string(),
                result: ValidationResult::ok(),
            })
            .collect();
        Self {
            params,
            fields,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Validates `raw` for `field` and, when valid, stores the typed value.
    ///
    /// The raw text and the result are recorded either way, and every
    /// subscriber is notified afterwards.
    pub fn set(&mut self, field: FieldId, raw: &str) -> ValidationResult {
        let mut result = validate_field(field.spec(), raw);
        if result.valid {
            if let Err(e) = self.params.apply(field, raw) {
                // Validation and parsing disagree; keep the last valid value.
                error!(%field, raw, "validated input failed to parse: {e}");
                result = ValidationResult::fail(apply_error(&e), e.to_string());
            }
        }

        debug!(%field, raw, valid = result.valid, "field updated");

        let state = &mut self.fields[field.index()];
        state.raw = raw.to_string();
        state.result = result.clone();

        self.notify(field, &result);
        result
    }

    /// Returns the field's value, or its raw echo if it is invalid.
    pub fn get(&self, field: FieldId) -> FieldValue {
        let state = &self.fields[field.index()];
        let value = self.params.get(field);
        if state.result.valid {
            FieldValue::Valid(value)
        } else {
            FieldValue::Invalid {
                raw: state.raw.clone(),
                last_valid: value,
            }
        }
    }

    pub fn field_state(&self, field: FieldId) -> &FieldState {
        &self.fields[field.index()]
    }

    /// The last raw text entered for `field`.
    pub fn raw(&self, field: FieldId) -> &str {
        &self.fields[field.index()].raw
    }

    /// The last valid value of every field.
    pub fn current(&self) -> &ShadowParameters {
        &self.params
    }

    /// Returns true if every field's last input was valid.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|s| s.result.valid)
    }

    /// The fields whose last input was invalid, in table order.
    pub fn invalid_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|id| !self.fields[id.index()].result.valid)
            .collect()
    }

    /// Returns the parameters if every field is currently valid.
    pub fn snapshot(&self) -> Result<ShadowParameters, StoreError> {
        let invalid = self.invalid_fields();
        if invalid.is_empty() {
            Ok(self.params.clone())
        } else {
            Err(StoreError::InvalidFields(invalid))
        }
    }

    /// Re-runs every rule against the last raw text of each field.
    pub fn report(&self) -> FormReport {
        validate_form(
            FieldId::ALL
                .into_iter()
                .map(|id| (id, self.fields[id.index()].raw.as_str())),
        )
    }

    /// Preview styles for the last valid values.
    pub fn preview(&self) -> PreviewStyle {
        project(&self.params)
    }

    /// Registers a listener called after every `set`.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns true if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, field: FieldId, result: &ValidationResult) {
        if self.listeners.is_empty() {
            return;
        }
        let preview = project(&self.params);
        let change = StoreChange {
            field,
            result,
            preview: &preview,
        };
        trace!(%field, listeners = self.listeners.len(), "notifying subscribers");
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Length;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn valid_set_updates_value() {
        let mut store = ParameterStore::default();
        let result = store.set(FieldId::Blur, "20");

        assert!(result.valid);
        assert_eq!(store.current().blur_radius, Length::new(20.0).unwrap());
        assert_eq!(store.raw(FieldId::Blur), "20");
        assert!(matches!(store.get(FieldId::Blur), FieldValue::Valid(_)));
    }

    #[test]
    fn invalid_set_keeps_last_valid_and_echoes_raw() {
        let mut store = ParameterStore::default();
        store.set(FieldId::Blur, "20");
        let result = store.set(FieldId::Blur, "200");

        assert!(!result.valid);
        assert_eq!(result.message, "Blur Radius must be at most 100");
        assert_eq!(store.current().blur_radius.get(), 20.0);
        assert_eq!(
            store.get(FieldId::Blur),
            FieldValue::Invalid {
                raw: "200".into(),
                last_valid: ParamValue::Length(Length::new(20.0).unwrap()),
            }
        );
    }

    #[test]
    fn colors_are_stored_normalized() {
        let mut store = ParameterStore::default();
        store.set(FieldId::BoxColor, "#abc");
        assert_eq!(store.current().box_color.as_str(), "#AABBCC");
        assert_eq!(store.raw(FieldId::BoxColor), "#abc");
    }

    #[test]
    fn snapshot_requires_every_field_valid() {
        let mut store = ParameterStore::default();
        assert!(store.snapshot().is_ok());

        store.set(FieldId::Opacity, "");
        store.set(FieldId::ShadowColor, "#12345");
        assert_eq!(
            store.snapshot(),
            Err(StoreError::InvalidFields(vec![
                FieldId::Opacity,
                FieldId::ShadowColor
            ]))
        );

        store.set(FieldId::Opacity, "0.5");
        store.set(FieldId::ShadowColor, "#123456");
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.opacity.get(), 0.5);
    }

    #[test]
    fn subscribers_notified_on_every_set() {
        let mut store = ParameterStore::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |change| {
            sink.borrow_mut().push((
                change.field,
                change.result.valid,
                change.preview.shadow_declaration.clone(),
            ));
        });

        store.set(FieldId::Horizontal, "10");
        store.set(FieldId::Horizontal, "oops");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].1);
        assert!(!seen[1].1);
        // The invalid edit still previews the last valid offset.
        assert!(seen[1].2.starts_with("10px 5px"));
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = ParameterStore::default();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.set(FieldId::Spread, "1");
        assert!(store.unsubscribe(id));
        store.set(FieldId::Spread, "2");

        assert_eq!(*count.borrow(), 1);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn apply_errors_map_to_field_errors() {
        assert_eq!(
            apply_error(&ParamError::Color(ColorError::InvalidHexFormat("#12".into()))),
            FieldError::InvalidColor
        );
        assert_eq!(
            apply_error(&ParamError::Color(ColorError::OpacityOutOfRange(1.5))),
            FieldError::AboveMax
        );
        assert_eq!(
            apply_error(&ParamError::NotANumber("x".into())),
            FieldError::NotANumber
        );
        assert_eq!(
            apply_error(&ParamError::LengthOutOfRange(101.0)),
            FieldError::AboveMax
        );
        assert_eq!(
            apply_error(&ParamError::LengthOutOfRange(-1.0)),
            FieldError::BelowMin
        );
    }

    #[test]
    fn report_matches_field_states() {
        let mut store = ParameterStore::default();
        store.set(FieldId::Vertical, "-3");
        let report = store.report();

        assert!(!report.is_valid());
        assert_eq!(
            report.errors().map(|(id, _)| id).collect::<Vec<_>>(),
            [FieldId::Vertical]
        );
        assert_eq!(store.invalid_fields(), [FieldId::Vertical]);
    }
}
