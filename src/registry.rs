//! The dimension registry: five dimensions, one backend handle, pluggable
//! failure handlers, and a scope separator for the translation layer.
//!
//! The registry is an explicit, dependency-injected instance — construct one
//! at startup and hand it (or an `Arc` of it) to whatever needs it. There is
//! no hidden global. Process-wide state (defaults, availability, enforcement,
//! backend, handlers) is shared by every thread using the instance; current
//! values are scoped to the calling thread (see [`crate::context`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use i18n_registry::Registry;
//!
//! let registry = Registry::new();
//! registry.locale().set_available(["en", "de"]);
//! registry.locale().set_current("de")?;
//! assert_eq!(registry.locale().current().to_string(), "de");
//! ```

use crate::backend::{Backend, MemoryBackend, SharedBackend};
use crate::context::{self, ContextScope};
use crate::dimension::{Dimension, DimensionName};
use crate::error::RegistryError;
use crate::handler::{
    ExceptionHandler, MissingArgHandler, Raise, RaiseMissingArg, SharedExceptionHandler,
};
use crate::interpolate::interpolate;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Configuration registry for the five localization dimensions.
pub struct Registry {
    id: u64,
    locale: Dimension,
    country: Dimension,
    site: Dimension,
    business_unit: Dimension,
    version: Dimension,
    backend: SharedBackend,
    exception_handler: SharedExceptionHandler,
    missing_arg_handler: RwLock<Arc<dyn MissingArgHandler>>,
    separator: RwLock<String>,
}

impl Registry {
    /// Build a registry with the default in-memory backend, the raising
    /// failure handlers, and `"."` as the scope separator.
    pub fn new() -> Self {
        let id = NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed);
        let backend: SharedBackend = Arc::new(RwLock::new(Arc::new(MemoryBackend::new())));
        let exception_handler: SharedExceptionHandler =
            Arc::new(RwLock::new(Arc::new(Raise)));

        let dimension = |name: DimensionName| {
            Dimension::new(name, id, backend.clone(), exception_handler.clone())
        };
        let locale = dimension(DimensionName::Locale);
        let country = dimension(DimensionName::Country);
        let site = dimension(DimensionName::Site);
        let business_unit = dimension(DimensionName::BusinessUnit);
        let version = dimension(DimensionName::Version);

        Self {
            id,
            locale,
            country,
            site,
            business_unit,
            version,
            backend,
            exception_handler,
            missing_arg_handler: RwLock::new(Arc::new(RaiseMissingArg)),
            separator: RwLock::new(".".to_string()),
        }
    }

    // ==================== Dimension Access ====================

    pub fn locale(&self) -> &Dimension {
        &self.locale
    }

    pub fn country(&self) -> &Dimension {
        &self.country
    }

    pub fn site(&self) -> &Dimension {
        &self.site
    }

    pub fn business_unit(&self) -> &Dimension {
        &self.business_unit
    }

    pub fn version(&self) -> &Dimension {
        &self.version
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: DimensionName) -> &Dimension {
        match name {
            DimensionName::Locale => &self.locale,
            DimensionName::Country => &self.country,
            DimensionName::Site => &self.site,
            DimensionName::BusinessUnit => &self.business_unit,
            DimensionName::Version => &self.version,
        }
    }

    /// All five dimensions, in declaration order.
    pub fn dimensions(&self) -> [&Dimension; 5] {
        [
            &self.locale,
            &self.country,
            &self.site,
            &self.business_unit,
            &self.version,
        ]
    }

    // ==================== Backend Handle ====================

    /// The active backend.
    pub fn backend(&self) -> Arc<dyn Backend> {
        self.backend.read().clone()
    }

    /// Replace the backend and drop every dimension's membership cache, so
    /// availability reads reflect the new backend immediately.
    pub fn set_backend(&self, backend: Arc<dyn Backend>) {
        *self.backend.write() = backend;
        self.reload();
    }

    // ==================== Failure Handlers ====================

    pub fn exception_handler(&self) -> Arc<dyn ExceptionHandler> {
        self.exception_handler.read().clone()
    }

    pub fn set_exception_handler(&self, handler: Arc<dyn ExceptionHandler>) {
        *self.exception_handler.write() = handler;
    }

    pub fn missing_arg_handler(&self) -> Arc<dyn MissingArgHandler> {
        self.missing_arg_handler.read().clone()
    }

    pub fn set_missing_arg_handler(&self, handler: Arc<dyn MissingArgHandler>) {
        *self.missing_arg_handler.write() = handler;
    }

    // ==================== Separator ====================

    /// Scope separator handed to the translation layer (default `"."`).
    /// Stored, not interpreted, by the registry.
    pub fn separator(&self) -> String {
        self.separator.read().clone()
    }

    pub fn set_separator(&self, separator: impl Into<String>) {
        *self.separator.write() = separator.into();
    }

    // ==================== Lifecycle ====================

    /// Clear every dimension's available-set cache.
    ///
    /// Call after any external event that can change what the backend
    /// considers available (e.g., translation data was reloaded), so
    /// subsequently-read backend data is reflected.
    pub fn reload(&self) {
        for dimension in self.dimensions() {
            dimension.clear_available_set();
        }
        debug!("cleared available-set caches for all dimensions");
    }

    /// Open a context scope for the current thread.
    ///
    /// Dropping the returned guard clears every current value this thread
    /// set on this registry — use it to fence one logical unit of work on a
    /// reused worker thread.
    pub fn context_scope(&self) -> ContextScope {
        ContextScope::new(self.id)
    }

    /// Clear every current value the calling thread set on this registry.
    pub fn clear_context(&self) {
        context::clear_registry(self.id);
    }

    // ==================== Translation ====================

    /// Resolve and interpolate a translation for the current locale.
    ///
    /// Returns `Ok(None)` when the backend has no template for the key.
    /// Missing interpolation arguments are routed through the registry's
    /// missing-argument handler.
    pub fn translate(
        &self,
        key: &str,
        args: &BTreeMap<String, String>,
    ) -> Result<Option<String>, RegistryError> {
        let locale = self.locale.current().to_string();
        let template = match self.backend().translate(&locale, key) {
            Some(template) => template,
            None => return Ok(None),
        };
        let handler = self.missing_arg_handler();
        interpolate(&template, args, handler.as_ref()).map(Some)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("id", &self.id)
            .field("separator", &self.separator())
            .finish()
    }
}
