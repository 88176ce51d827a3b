//! Backend collaborator: the source of truth for availability and
//! translations when nothing was configured explicitly on the registry.
//!
//! The registry only ever talks to the [`Backend`] trait; the in-memory
//! implementation here exists so a freshly constructed registry works out of
//! the box. Real deployments substitute their own backend via
//! [`Registry::set_backend`](crate::Registry::set_backend).

use crate::dimension::DimensionName;
use crate::value::Value;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared, swappable handle to the active backend.
pub(crate) type SharedBackend = Arc<RwLock<Arc<dyn Backend>>>;

/// External collaborator consulted by the registry.
///
/// Supplies the available values for each dimension (used only when no
/// explicit list was configured on that dimension) and resolves translation
/// templates for the translation layer.
pub trait Backend: Send + Sync {
    /// The values this backend considers available for a dimension.
    fn available_values(&self, dimension: DimensionName) -> Vec<Value>;

    /// Resolve a translation template for a locale tag, if one exists.
    fn translate(&self, locale: &str, key: &str) -> Option<String>;
}

/// Default in-memory backend.
///
/// Starts out with each dimension's fallback constant as its only available
/// value and an empty translation table; both are configurable at startup.
pub struct MemoryBackend {
    values: RwLock<HashMap<DimensionName, Vec<Value>>>,
    translations: RwLock<HashMap<(String, String), String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let mut values = HashMap::new();
        for dimension in DimensionName::ALL {
            values.insert(dimension, vec![dimension.fallback()]);
        }
        Self {
            values: RwLock::new(values),
            translations: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the backend's available values for a dimension.
    pub fn set_values(&self, dimension: DimensionName, values: Vec<Value>) {
        self.values.write().insert(dimension, values);
    }

    /// Register a translation template under a locale tag.
    pub fn add_translation(
        &self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.translations
            .write()
            .insert((locale.into(), key.into()), template.into());
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn available_values(&self, dimension: DimensionName) -> Vec<Value> {
        self.values
            .read()
            .get(&dimension)
            .cloned()
            .unwrap_or_default()
    }

    fn translate(&self, locale: &str, key: &str) -> Option<String> {
        self.translations
            .read()
            .get(&(locale.to_string(), key.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_backend_offers_fallback_values() {
        let backend = MemoryBackend::new();
        assert_eq!(
            backend.available_values(DimensionName::Locale),
            vec![Value::Tag("en".to_string())]
        );
        assert_eq!(
            backend.available_values(DimensionName::Site),
            vec![Value::Id(1)]
        );
    }

    #[test]
    fn test_set_values_replaces_wholesale() {
        let backend = MemoryBackend::new();
        backend.set_values(
            DimensionName::Country,
            vec![Value::Tag("us".to_string()), Value::Tag("ca".to_string())],
        );
        assert_eq!(
            backend.available_values(DimensionName::Country),
            vec![Value::Tag("us".to_string()), Value::Tag("ca".to_string())]
        );
    }

    #[test]
    fn test_translate_hit_and_miss() {
        let backend = MemoryBackend::new();
        backend.add_translation("en", "greeting.hello", "Hello, %{name}!");
        assert_eq!(
            backend.translate("en", "greeting.hello").as_deref(),
            Some("Hello, %{name}!")
        );
        assert_eq!(backend.translate("de", "greeting.hello"), None);
        assert_eq!(backend.translate("en", "greeting.bye"), None);
    }
}
