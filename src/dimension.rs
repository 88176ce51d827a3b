//! The generic dimension shape, instantiated once per classification axis.
//!
//! Each of the five axes (locale, country, site, business unit, version)
//! replicates the same state machine with a different normalization rule:
//! a context-scoped current value, a process-wide lazily-initialized
//! default, a process-wide optional available list, a derived membership
//! cache, and an enforcement switch gating validation.
//!
//! The membership cache has exactly two states: `Empty` (no set computed)
//! and `Cached`. It moves Empty → Cached on the first read, and Cached →
//! Empty on any available-list replacement or explicit clear. List and
//! cache live under one lock so a reader can never observe a fresh list
//! paired with a set computed from a superseded one.

use crate::backend::SharedBackend;
use crate::context;
use crate::error::RegistryError;
use crate::handler::SharedExceptionHandler;
use crate::value::{MemberKey, Normalization, RawValue, Value};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// The five classification axes the registry tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionName {
    Locale,
    Country,
    Site,
    BusinessUnit,
    Version,
}

impl DimensionName {
    /// All dimensions, in declaration order.
    pub const ALL: [DimensionName; 5] = [
        DimensionName::Locale,
        DimensionName::Country,
        DimensionName::Site,
        DimensionName::BusinessUnit,
        DimensionName::Version,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionName::Locale => "locale",
            DimensionName::Country => "country",
            DimensionName::Site => "site",
            DimensionName::BusinessUnit => "business_unit",
            DimensionName::Version => "version",
        }
    }

    /// The normalization rule this dimension applies to caller input.
    pub fn normalization(&self) -> Normalization {
        match self {
            DimensionName::Locale | DimensionName::Country => Normalization::Symbol,
            DimensionName::Site | DimensionName::BusinessUnit | DimensionName::Version => {
                Normalization::Integer
            }
        }
    }

    /// The hard-coded constant the default lazily initializes to.
    pub fn fallback(&self) -> Value {
        match self {
            DimensionName::Locale => Value::Tag("en".to_string()),
            DimensionName::Country => Value::Tag("us".to_string()),
            DimensionName::Site | DimensionName::BusinessUnit | DimensionName::Version => {
                Value::Id(1)
            }
        }
    }
}

impl fmt::Display for DimensionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Available list and its derived membership cache, kept under one lock so
/// cache invalidation is sequenced with the list mutation that caused it.
struct AvailableState {
    /// Explicitly configured list; `None` delegates to the backend.
    list: Option<Vec<Value>>,
    /// Derived membership set; `None` means not yet computed.
    cache: Option<Arc<HashSet<MemberKey>>>,
}

/// One independently-configurable classification axis.
///
/// Constructed by [`Registry`](crate::Registry); callers reach it through
/// the registry's accessors (`registry.locale()`, `registry.site()`, ...).
pub struct Dimension {
    name: DimensionName,
    rule: Normalization,
    registry_id: u64,
    backend: SharedBackend,
    exception_handler: SharedExceptionHandler,
    default: RwLock<Option<Value>>,
    available: RwLock<AvailableState>,
    enforce: AtomicBool,
}

impl Dimension {
    pub(crate) fn new(
        name: DimensionName,
        registry_id: u64,
        backend: SharedBackend,
        exception_handler: SharedExceptionHandler,
    ) -> Self {
        Self {
            name,
            rule: name.normalization(),
            registry_id,
            backend,
            exception_handler,
            default: RwLock::new(None),
            available: RwLock::new(AvailableState {
                list: None,
                cache: None,
            }),
            enforce: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> DimensionName {
        self.name
    }

    // ==================== Current (context-scoped) ====================

    /// This context's current value, falling back to the default when no
    /// override was set. Never fails.
    pub fn current(&self) -> Value {
        context::get(self.registry_id, self.name).unwrap_or_else(|| self.default_value())
    }

    /// Set this context's current value.
    ///
    /// When enforcement is on, the normalized value must be a member of the
    /// available set; otherwise an [`RegistryError::InvalidValue`] is routed
    /// through the exception handler before any mutation occurs.
    pub fn set_current(&self, value: impl Into<RawValue>) -> Result<(), RegistryError> {
        if let Some(value) = self.validate(&value.into())? {
            context::set(self.registry_id, self.name, value);
        }
        Ok(())
    }

    /// Clear this context's current override, reverting to the default.
    /// Always accepted, regardless of enforcement.
    pub fn clear_current(&self) {
        context::clear(self.registry_id, self.name);
    }

    // ==================== Default (process-wide) ====================

    /// The process-wide default, lazily initialized to the dimension's
    /// constant on first read if never set.
    pub fn default_value(&self) -> Value {
        if let Some(value) = &*self.default.read() {
            return value.clone();
        }
        self.default
            .write()
            .get_or_insert_with(|| self.name.fallback())
            .clone()
    }

    /// Set the process-wide default. Same validation rule as
    /// [`set_current`](Self::set_current); does not affect any context's
    /// current override.
    pub fn set_default(&self, value: impl Into<RawValue>) -> Result<(), RegistryError> {
        if let Some(value) = self.validate(&value.into())? {
            *self.default.write() = Some(value);
        }
        Ok(())
    }

    // ==================== Availability (process-wide) ====================

    /// The explicitly configured available list if present, else the
    /// backend's values for this dimension.
    pub fn available(&self) -> Vec<Value> {
        if let Some(list) = &self.available.read().list {
            return list.clone();
        }
        self.backend.read().available_values(self.name)
    }

    /// Replace the available list wholesale.
    ///
    /// Every element is normalized; elements that cannot be normalized are
    /// dropped. An empty result is stored as unset, restoring backend
    /// delegation. The membership cache is invalidated unconditionally.
    pub fn set_available<I, T>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<RawValue>,
    {
        let normalized: Vec<Value> = values
            .into_iter()
            .filter_map(|value| self.rule.normalize(&value.into()))
            .collect();

        let mut state = self.available.write();
        debug!(
            "replacing available list for {} ({} values)",
            self.name,
            normalized.len()
        );
        state.list = if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        };
        state.cache = None;
    }

    /// The membership set derived from [`available`](Self::available).
    ///
    /// Computed on first read after any invalidation and cached; each
    /// element is inserted under both its string form and its canonical
    /// form so membership tests match either caller representation.
    pub fn available_set(&self) -> Arc<HashSet<MemberKey>> {
        if let Some(cache) = &self.available.read().cache {
            return cache.clone();
        }

        let mut state = self.available.write();
        // Another writer may have filled the cache while we waited.
        if let Some(cache) = &state.cache {
            return cache.clone();
        }

        let source = match &state.list {
            Some(list) => list.clone(),
            None => self.backend.read().available_values(self.name),
        };
        let mut set = HashSet::with_capacity(source.len() * 2);
        for value in source {
            set.insert(MemberKey::Text(value.to_string()));
            set.insert(MemberKey::Canonical(value));
        }
        debug!("computed available set for {} ({} keys)", self.name, set.len());

        let cache = Arc::new(set);
        state.cache = Some(cache.clone());
        cache
    }

    /// Drop the membership cache; the next read recomputes it.
    ///
    /// Must be called after any external event that changes what the
    /// backend considers available (e.g., a reload): replacing the list via
    /// [`set_available`](Self::set_available) only invalidates its own
    /// cache, not the backend-delegated path.
    pub fn clear_available_set(&self) {
        self.available.write().cache = None;
    }

    // ==================== Enforcement (process-wide) ====================

    pub fn enforced(&self) -> bool {
        self.enforce.load(Ordering::Relaxed)
    }

    pub fn set_enforced(&self, enforced: bool) {
        self.enforce.store(enforced, Ordering::Relaxed);
    }

    // ==================== Validation ====================

    /// Normalize and validate a candidate value.
    ///
    /// Returns `Ok(Some(value))` to proceed with the mutation,
    /// `Ok(None)` when the exception handler suppressed a failure (mutation
    /// is skipped), or `Err` when the failure propagates.
    fn validate(&self, raw: &RawValue) -> Result<Option<Value>, RegistryError> {
        let Some(value) = self.rule.normalize(raw) else {
            return self.reject(raw.display());
        };

        if !self.enforced() {
            return Ok(Some(value));
        }

        let set = self.available_set();
        if set.contains(&MemberKey::Text(raw.display()))
            || set.contains(&MemberKey::Canonical(value.clone()))
        {
            Ok(Some(value))
        } else {
            self.reject(value.to_string())
        }
    }

    fn reject(&self, rejected: String) -> Result<Option<Value>, RegistryError> {
        warn!("rejected value {:?} for {} dimension", rejected, self.name);
        let error = RegistryError::InvalidValue {
            dimension: self.name,
            value: rejected,
        };
        self.exception_handler.read().clone().handle(error)?;
        Ok(None)
    }
}

impl fmt::Debug for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dimension")
            .field("name", &self.name)
            .field("rule", &self.rule)
            .field("enforced", &self.enforced())
            .finish()
    }
}
