//! Static field table shared by the validator, the store and the widget layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FieldId
// ============================================================================

/// Identifies one shadow parameter.
///
/// The string form matches the kebab-case ids the page uses for its
/// widget pairs (`horizontal`, `shadow-color`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldId {
    Horizontal,
    Vertical,
    Blur,
    Spread,
    Opacity,
    ShadowColor,
    BackgroundColor,
    BoxColor,
    ShadowType,
}

impl FieldId {
    /// Every field, in table order.
    pub const ALL: [FieldId; 9] = [
        FieldId::Horizontal,
        FieldId::Vertical,
        FieldId::Blur,
        FieldId::Spread,
        FieldId::Opacity,
        FieldId::ShadowColor,
        FieldId::BackgroundColor,
        FieldId::BoxColor,
        FieldId::ShadowType,
    ];

    /// Position of this field in [`FIELD_SPECS`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the static spec for this field.
    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SPECS[self.index()]
    }

    /// The human-readable label used in validation messages.
    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Horizontal => "horizontal",
            FieldId::Vertical => "vertical",
            FieldId::Blur => "blur",
            FieldId::Spread => "spread",
            FieldId::Opacity => "opacity",
            FieldId::ShadowColor => "shadow-color",
            FieldId::BackgroundColor => "background-color",
            FieldId::BoxColor => "box-color",
            FieldId::ShadowType => "shadow-type",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a field id string names no known field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field id {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

// ============================================================================
// FieldSpec
// ============================================================================

/// The validation rule family a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// A number within the closed range `[min, max]`.
    Numeric { min: f64, max: f64 },
    /// A number within `[0, 1]`, always labelled "Opacity".
    Opacity,
    /// A `#`-prefixed 3- or 6-digit hex color.
    Color,
    /// A boolean switch with no validation rule.
    Toggle,
}

impl FieldKind {
    /// Returns true if the field is edited through a pair of widgets.
    pub fn has_twin(self) -> bool {
        !matches!(self, FieldKind::Toggle)
    }
}

/// Static description of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub kind: FieldKind,
    pub label: &'static str,
}

impl FieldSpec {
    pub fn min(&self) -> Option<f64> {
        match self.kind {
            FieldKind::Numeric { min, .. } => Some(min),
            FieldKind::Opacity => Some(0.0),
            _ => None,
        }
    }

    pub fn max(&self) -> Option<f64> {
        match self.kind {
            FieldKind::Numeric { max, .. } => Some(max),
            FieldKind::Opacity => Some(1.0),
            _ => None,
        }
    }
}

const LENGTH: FieldKind = FieldKind::Numeric {
    min: 0.0,
    max: 100.0,
};

/// One spec per [`FieldId`], indexed by [`FieldId::index`].
pub static FIELD_SPECS: [FieldSpec; 9] = [
    FieldSpec {
        id: FieldId::Horizontal,
        kind: LENGTH,
        label: "Horizontal Length",
    },
    FieldSpec {
        id: FieldId::Vertical,
        kind: LENGTH,
        label: "Vertical Length",
    },
    FieldSpec {
        id: FieldId::Blur,
        kind: LENGTH,
        label: "Blur Radius",
    },
    FieldSpec {
        id: FieldId::Spread,
        kind: LENGTH,
        label: "Spread Radius",
    },
    FieldSpec {
        id: FieldId::Opacity,
        kind: FieldKind::Opacity,
        label: "Opacity",
    },
    FieldSpec {
        id: FieldId::ShadowColor,
        kind: FieldKind::Color,
        label: "Shadow Color",
    },
    FieldSpec {
        id: FieldId::BackgroundColor,
        kind: FieldKind::Color,
        label: "Background Color",
    },
    FieldSpec {
        id: FieldId::BoxColor,
        kind: FieldKind::Color,
        label: "Box Color",
    },
    FieldSpec {
        id: FieldId::ShadowType,
        kind: FieldKind::Toggle,
        label: "Shadow Type",
    },
];
