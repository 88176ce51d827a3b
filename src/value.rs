//! Canonical value representation and per-dimension normalization rules.
//!
//! Every value stored by the registry is kept in its canonical form: a
//! lowercase symbolic tag for locale/country, an integer identifier for
//! site/business-unit/version. Callers may hand in whatever representation
//! they have (`&str`, `String`, `u32`); normalization happens exactly once,
//! at the mutation boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical dimension value.
///
/// `Tag` holds a normalized symbolic token (e.g., `en`, `us`); `Id` holds an
/// integer identity (e.g., site `1`). Once a value is stored as current or
/// default it is always in this form, never raw caller input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Symbolic token, lowercase canonical (locale and country).
    Tag(String),
    /// Integer identity (site, business unit, version).
    Id(u32),
}

impl Value {
    /// Get the symbolic token if this is a `Tag` value.
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Value::Tag(tag) => Some(tag),
            Value::Id(_) => None,
        }
    }

    /// Get the integer identity if this is an `Id` value.
    pub fn as_id(&self) -> Option<u32> {
        match self {
            Value::Tag(_) => None,
            Value::Id(id) => Some(*id),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Tag(tag) => f.write_str(tag),
            Value::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Raw caller input for a dimension value, prior to normalization.
///
/// Accepts either representation so call sites can pass `"de"`, a `String`,
/// a numeric identifier, or an already-canonical [`Value`] interchangeably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Number(u32),
}

impl RawValue {
    /// The string/display form of the input, as the caller provided it.
    pub fn display(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            RawValue::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<&String> for RawValue {
    fn from(value: &String) -> Self {
        RawValue::Text(value.clone())
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(value)
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Tag(tag) => RawValue::Text(tag),
            Value::Id(id) => RawValue::Number(id),
        }
    }
}

impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        value.clone().into()
    }
}

/// Normalization rule applied by a dimension before storing or validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Trim and ASCII-lowercase into a symbolic [`Value::Tag`].
    Symbol,
    /// Parse into an integer [`Value::Id`]; numeric input passes through.
    Integer,
}

impl Normalization {
    /// Normalize raw caller input into canonical form.
    ///
    /// Returns `None` when the input cannot be expressed under this rule
    /// (empty/whitespace text for `Symbol`, non-numeric text for `Integer`).
    pub fn normalize(self, raw: &RawValue) -> Option<Value> {
        match (self, raw) {
            (Normalization::Symbol, RawValue::Text(text)) => {
                let tag = text.trim().to_ascii_lowercase();
                if tag.is_empty() {
                    None
                } else {
                    Some(Value::Tag(tag))
                }
            }
            (Normalization::Symbol, RawValue::Number(number)) => {
                Some(Value::Tag(number.to_string()))
            }
            (Normalization::Integer, RawValue::Text(text)) => {
                text.trim().parse::<u32>().ok().map(Value::Id)
            }
            (Normalization::Integer, RawValue::Number(number)) => Some(Value::Id(*number)),
        }
    }
}

/// Membership key for the available-set cache.
///
/// Every available value is inserted under both its string/display form and
/// its canonical form, so membership tests succeed whichever representation
/// the caller used, without a conversion step on the hot path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKey {
    /// String/display form (e.g., `"de"`, `"7"`).
    Text(String),
    /// Canonical normalized form.
    Canonical(Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Value Tests ====================

    #[test]
    fn test_value_display_tag() {
        assert_eq!(Value::Tag("en".to_string()).to_string(), "en");
    }

    #[test]
    fn test_value_display_id() {
        assert_eq!(Value::Id(42).to_string(), "42");
    }

    #[test]
    fn test_value_accessors() {
        let tag = Value::Tag("de".to_string());
        assert_eq!(tag.as_tag(), Some("de"));
        assert_eq!(tag.as_id(), None);

        let id = Value::Id(7);
        assert_eq!(id.as_tag(), None);
        assert_eq!(id.as_id(), Some(7));
    }

    // ==================== Normalization Tests ====================

    #[test]
    fn test_symbol_lowercases_and_trims() {
        let raw = RawValue::from("  DE ");
        assert_eq!(
            Normalization::Symbol.normalize(&raw),
            Some(Value::Tag("de".to_string()))
        );
    }

    #[test]
    fn test_symbol_rejects_empty() {
        assert_eq!(Normalization::Symbol.normalize(&RawValue::from("")), None);
        assert_eq!(Normalization::Symbol.normalize(&RawValue::from("   ")), None);
    }

    #[test]
    fn test_symbol_accepts_numeric_input() {
        assert_eq!(
            Normalization::Symbol.normalize(&RawValue::from(3u32)),
            Some(Value::Tag("3".to_string()))
        );
    }

    #[test]
    fn test_integer_parses_text() {
        assert_eq!(
            Normalization::Integer.normalize(&RawValue::from(" 12 ")),
            Some(Value::Id(12))
        );
    }

    #[test]
    fn test_integer_rejects_non_numeric_text() {
        assert_eq!(Normalization::Integer.normalize(&RawValue::from("abc")), None);
        assert_eq!(Normalization::Integer.normalize(&RawValue::from("-1")), None);
    }

    #[test]
    fn test_integer_passes_number_through() {
        assert_eq!(
            Normalization::Integer.normalize(&RawValue::from(9u32)),
            Some(Value::Id(9))
        );
    }

    // ==================== RawValue Tests ====================

    #[test]
    fn test_raw_value_display_forms() {
        assert_eq!(RawValue::from("EN").display(), "EN");
        assert_eq!(RawValue::from(5u32).display(), "5");
    }

    #[test]
    fn test_raw_value_from_canonical() {
        assert_eq!(
            RawValue::from(Value::Tag("en".to_string())),
            RawValue::Text("en".to_string())
        );
        assert_eq!(RawValue::from(Value::Id(2)), RawValue::Number(2));
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_value_serializes_untagged() {
        let tag = serde_json::to_string(&Value::Tag("en".to_string())).expect("serialize");
        assert_eq!(tag, "\"en\"");
        let id = serde_json::to_string(&Value::Id(3)).expect("serialize");
        assert_eq!(id, "3");
    }
}
