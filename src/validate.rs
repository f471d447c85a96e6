//! Validation rules for raw widget text.
//!
//! Every rule is a pure function from raw text to a [`ValidationResult`].
//! Failures are ordinary values: they are shown next to the offending
//! field and never abort the edit pipeline.

use serde::Serialize;

use crate::color::is_hex_digits;
use crate::field::{FieldId, FieldKind, FieldSpec};

// ============================================================================
// ValidationResult
// ============================================================================

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldError {
    Required,
    NotANumber,
    BelowMin,
    AboveMax,
    InvalidColor,
}

/// Outcome of validating one field. `message` is empty when `valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
            error: None,
        }
    }

    pub fn fail(error: FieldError, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Parses trimmed text as a float. `NaN` is not accepted as a number, and
/// `-0` comes back as `0`.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .map(|v| v + 0.0)
}

/// Validates a number against the closed range `[min, max]`.
pub fn validate_numeric(raw: &str, label: &str, min: f64, max: f64) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::fail(FieldError::Required, format!("{label} is required"));
    }
    let Some(value) = parse_number(raw) else {
        return ValidationResult::fail(FieldError::NotANumber, format!("{label} must be a number"));
    };
    if value < min {
        return ValidationResult::fail(FieldError::BelowMin, format!("{label} must be at least {min}"));
    }
    if value > max {
        return ValidationResult::fail(FieldError::AboveMax, format!("{label} must be at most {max}"));
    }
    ValidationResult::ok()
}

/// Validates an opacity value in `[0, 1]`.
pub fn validate_opacity(raw: &str) -> ValidationResult {
    validate_numeric(raw, "Opacity", 0.0, 1.0)
}

/// Validates hex color text. Unlike [`crate::color::is_valid_hex`], the
/// leading `#` is mandatory and surrounding whitespace is not tolerated.
pub fn validate_color(raw: &str, label: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::fail(FieldError::Required, format!("{label} is required"));
    }
    match raw.strip_prefix('#') {
        Some(digits) if is_hex_digits(digits) => ValidationResult::ok(),
        _ => ValidationResult::fail(
            FieldError::InvalidColor,
            format!("{label} must be a valid hex color (e.g., #FF0000)"),
        ),
    }
}

/// Routes raw text to the rule matching the field's kind.
///
/// Kinds without a rule (the shadow-type toggle) are always valid.
pub fn validate_field(spec: &FieldSpec, raw: &str) -> ValidationResult {
    match spec.kind {
        FieldKind::Numeric { min, max } => validate_numeric(raw, spec.label, min, max),
        FieldKind::Opacity => validate_opacity(raw),
        FieldKind::Color => validate_color(raw, spec.label),
        _ => ValidationResult::ok(),
    }
}

// ============================================================================
// Whole-form Validation
// ============================================================================

/// Per-field results of a whole-form check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormReport {
    results: Vec<(FieldId, ValidationResult)>,
}

impl FormReport {
    /// True iff every field passed.
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, r)| r.valid)
    }

    /// All results, in the order the fields were checked.
    pub fn results(&self) -> &[(FieldId, ValidationResult)] {
        &self.results
    }

    /// The failing fields only.
    pub fn errors(&self) -> impl Iterator<Item = (FieldId, &ValidationResult)> {
        self.results
            .iter()
            .filter(|(_, r)| !r.valid)
            .map(|(id, r)| (*id, r))
    }

    pub fn result(&self, field: FieldId) -> Option<&ValidationResult> {
        self.results
            .iter()
            .find(|(id, _)| *id == field)
            .map(|(_, r)| r)
    }
}

/// Runs every field's rule. Never short-circuits, so every error is
/// reported together.
pub fn validate_form<'a, I>(fields: I) -> FormReport
where
    I: IntoIterator<Item = (FieldId, &'a str)>,
{
    let results = fields
        .into_iter()
        .map(|(id, raw)| (id, validate_field(id.spec(), raw)))
        .collect();
    FormReport { results }
}

// ============================================================================
// Tests
// ============================================================================
