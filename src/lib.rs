//! Configuration registry for a localization layer.
//!
//! Tracks, per execution context, the current selection along five
//! independent classification dimensions — locale, country, site, business
//! unit, version — each with a process-wide default, a process-wide list of
//! permitted values, a derived fast-membership cache, and an enforcement
//! switch that gates validation on assignment.
//!
//! # Architecture
//!
//! - `value`: canonical values and per-dimension normalization rules
//! - `dimension`: the generic dimension shape (current/default/available/
//!   enforcement state machine), instantiated five times
//! - `context`: thread-scoped storage for current values
//! - `registry`: the aggregate owning the five dimensions, the backend
//!   handle, the failure handlers, and the scope separator
//! - `backend`: the collaborator supplying availability and translations
//!   when nothing was configured explicitly
//! - `handler`: pluggable exception and missing-argument handlers
//! - `interpolate`: `%{key}` substitution for translation templates
//! - `settings`: startup overrides from the environment or JSON
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

pub mod backend;
pub mod context;
pub mod dimension;
pub mod error;
pub mod handler;
pub mod interpolate;
pub mod registry;
pub mod settings;
pub mod value;

pub use backend::{Backend, MemoryBackend};
pub use context::ContextScope;
pub use dimension::{Dimension, DimensionName};
pub use error::RegistryError;
pub use handler::{
    ExceptionHandler, Ignore, KeepPlaceholder, MissingArgHandler, Raise, RaiseMissingArg,
};
pub use interpolate::interpolate;
pub use registry::Registry;
pub use settings::Settings;
pub use value::{MemberKey, Normalization, RawValue, Value};
