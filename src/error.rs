//! Typed error taxonomy for the registry.
//!
//! All validation failures are synchronous and surfaced at the call site
//! that attempted the mutation; nothing here is retried.

use crate::dimension::DimensionName;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A value assigned to current/default failed membership validation
    /// while enforcement was on. No mutation occurred.
    #[error("{value:?} is not an available value for the {dimension} dimension")]
    InvalidValue {
        /// Dimension the assignment targeted.
        dimension: DimensionName,
        /// Display form of the rejected value.
        value: String,
    },

    /// A translation template referenced an argument the caller did not
    /// provide. Default posture is to raise; callers may install a handler
    /// that substitutes a placeholder instead.
    #[error("missing interpolation argument {key:?} in {template:?} (provided: {args:?})")]
    MissingInterpolationArgument {
        /// The referenced-but-absent key.
        key: String,
        /// The argument mapping the caller provided.
        args: BTreeMap<String, String>,
        /// The template being interpolated.
        template: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_names_dimension_and_value() {
        let err = RegistryError::InvalidValue {
            dimension: DimensionName::Locale,
            value: "jp".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("locale"));
        assert!(message.contains("jp"));
    }

    #[test]
    fn test_missing_interpolation_argument_carries_all_fields() {
        let mut args = BTreeMap::new();
        args.insert("name".to_string(), "Ada".to_string());
        let err = RegistryError::MissingInterpolationArgument {
            key: "count".to_string(),
            args,
            template: "%{name} has %{count}".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("count"));
        assert!(message.contains("name"));
        assert!(message.contains("%{name} has %{count}"));
    }
}
