//! Option schema registry and the shared validator.
//!
//! Most operations take typed arguments and only need the scalar helpers
//! here. The bag-level validator survives for the inputs that are
//! intentionally open-ended keyed mappings: JSON configuration and the
//! low-level request escape hatch.

use crate::error::{EsError, Result};
use serde_json::Value;

/// Semantic kind of a recognized option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OptionKind {
    /// Short text value.
    Text,
    /// Structured body: a keyed mapping or a sequence of keyed mappings.
    Body,
}

/// Option name -> expected kind. Names are the wire-level camelCase ones.
pub(crate) const OPTION_SCHEMA: &[(&str, OptionKind)] = &[
    ("index", OptionKind::Text),
    ("type", OptionKind::Text),
    ("path", OptionKind::Text),
    ("accessKeyId", OptionKind::Text),
    ("secretAccessKey", OptionKind::Text),
    ("service", OptionKind::Text),
    ("region", OptionKind::Text),
    ("host", OptionKind::Text),
    ("id", OptionKind::Text),
    ("scroll", OptionKind::Text),
    ("scrollId", OptionKind::Text),
    ("body", OptionKind::Body),
];

/// Look up the declared kind of an option name.
pub(crate) fn kind_of(name: &str) -> Option<OptionKind> {
    OPTION_SCHEMA
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, kind)| *kind)
}

impl OptionKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            OptionKind::Text => value.is_string(),
            OptionKind::Body => value.is_object() || value.is_array(),
        }
    }
}

/// Validate a caller-supplied option bag against the registry.
///
/// Required names are checked left to right and the first failure wins:
/// an absent (or `null`) value fails with `not_<name>`, a present value of
/// the wrong kind with `invalid_<name>`. Unrecognized keys are ignored.
pub(crate) fn missing_or_invalid(bag: &Value, required: &[&'static str]) -> Result<()> {
    if bag.is_null() {
        return Err(EsError::MissingOptions);
    }
    let Some(map) = bag.as_object() else {
        return Err(EsError::InvalidOptions);
    };

    for &name in required {
        match map.get(name) {
            None | Some(Value::Null) => return Err(EsError::MissingOption(name)),
            Some(value) => {
                let kind = kind_of(name).unwrap_or(OptionKind::Text);
                if !kind.matches(value) {
                    return Err(EsError::InvalidOption(name));
                }
            }
        }
    }

    Ok(())
}

/// Check a required text argument. An empty string is the typed rendition
/// of an absent option and fails with `not_<name>`.
pub(crate) fn required_text(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(EsError::MissingOption(name));
    }
    Ok(())
}

/// Check an optional text argument: `Some("")` fails with `invalid_<name>`.
pub(crate) fn optional_text(name: &'static str, value: Option<&str>) -> Result<()> {
    match value {
        Some("") => Err(EsError::InvalidOption(name)),
        _ => Ok(()),
    }
}

/// Check a structured single-document body: must be a keyed mapping.
/// `null` is the absent case and fails with `not_body`.
pub(crate) fn structured_body(value: &Value) -> Result<()> {
    if value.is_null() {
        return Err(EsError::MissingOption("body"));
    }
    if value.is_object() {
        Ok(())
    } else {
        Err(EsError::InvalidOption("body"))
    }
}
