//! Pluggable failure handlers.
//!
//! Every signaled failure is routed through one of two single-method
//! interfaces before it reaches the caller, so applications can substitute
//! their own posture (suppress, clamp, placeholder) without patching the
//! registry. The defaults fail loudly.

use crate::error::RegistryError;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared, swappable handle to the active exception handler.
pub(crate) type SharedExceptionHandler = Arc<RwLock<Arc<dyn ExceptionHandler>>>;

/// Invoked with every validation failure the registry signals.
///
/// Returning `Err` propagates the failure to the mutating call site;
/// returning `Ok(())` suppresses it, in which case the registry skips the
/// mutation and leaves state untouched.
pub trait ExceptionHandler: Send + Sync {
    fn handle(&self, error: RegistryError) -> Result<(), RegistryError>;
}

/// Default exception handler: propagate the typed error to the caller.
pub struct Raise;

impl ExceptionHandler for Raise {
    fn handle(&self, error: RegistryError) -> Result<(), RegistryError> {
        Err(error)
    }
}

/// Exception handler that logs and swallows failures.
///
/// Rejected assignments become no-ops, so current/default keep their prior
/// values (effectively clamping to the default when nothing was set).
pub struct Ignore;

impl ExceptionHandler for Ignore {
    fn handle(&self, error: RegistryError) -> Result<(), RegistryError> {
        tracing::warn!("suppressed registry failure: {}", error);
        Ok(())
    }
}

/// Invoked for each interpolation argument a template references but the
/// caller did not provide. Returns the replacement text to splice in, or an
/// error to abort interpolation.
pub trait MissingArgHandler: Send + Sync {
    fn handle(
        &self,
        key: &str,
        args: &BTreeMap<String, String>,
        template: &str,
    ) -> Result<String, RegistryError>;
}

/// Default missing-argument handler: raise a typed error naming the missing
/// key, the provided argument mapping, and the template.
pub struct RaiseMissingArg;

impl MissingArgHandler for RaiseMissingArg {
    fn handle(
        &self,
        key: &str,
        args: &BTreeMap<String, String>,
        template: &str,
    ) -> Result<String, RegistryError> {
        Err(RegistryError::MissingInterpolationArgument {
            key: key.to_string(),
            args: args.clone(),
            template: template.to_string(),
        })
    }
}

/// Missing-argument handler that leaves the placeholder in the output.
pub struct KeepPlaceholder;

impl MissingArgHandler for KeepPlaceholder {
    fn handle(
        &self,
        key: &str,
        _args: &BTreeMap<String, String>,
        _template: &str,
    ) -> Result<String, RegistryError> {
        Ok(format!("%{{{}}}", key))
    }
}
