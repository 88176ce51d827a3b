//! Startup configuration for a registry, loaded from the environment or
//! from JSON.
//!
//! Everything is optional: unset fields leave the registry's built-in
//! behavior alone. Environment variables use the `I18N_` prefix, e.g.
//! `I18N_DEFAULT_LOCALE=de`, `I18N_ENFORCE_SITE=false`, `I18N_SEPARATOR=/`.

use crate::error::RegistryError;
use crate::registry::Registry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Optional startup overrides for a [`Registry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Defaults per dimension
    pub default_locale: Option<String>,
    pub default_country: Option<String>,
    pub default_site: Option<u32>,
    pub default_business_unit: Option<u32>,
    pub default_version: Option<u32>,

    // Enforcement flags per dimension
    pub enforce_locale: Option<bool>,
    pub enforce_country: Option<bool>,
    pub enforce_site: Option<bool>,
    pub enforce_business_unit: Option<bool>,
    pub enforce_version: Option<bool>,

    // Translation-layer scope separator
    pub separator: Option<String>,
}

impl Settings {
    /// Load settings from the process environment (reading `.env` first if
    /// one is present in the working directory).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            default_locale: env_string("I18N_DEFAULT_LOCALE"),
            default_country: env_string("I18N_DEFAULT_COUNTRY"),
            default_site: env_parse("I18N_DEFAULT_SITE")?,
            default_business_unit: env_parse("I18N_DEFAULT_BUSINESS_UNIT")?,
            default_version: env_parse("I18N_DEFAULT_VERSION")?,

            enforce_locale: env_parse("I18N_ENFORCE_LOCALE")?,
            enforce_country: env_parse("I18N_ENFORCE_COUNTRY")?,
            enforce_site: env_parse("I18N_ENFORCE_SITE")?,
            enforce_business_unit: env_parse("I18N_ENFORCE_BUSINESS_UNIT")?,
            enforce_version: env_parse("I18N_ENFORCE_VERSION")?,

            separator: env_string("I18N_SEPARATOR"),
        })
    }

    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid settings JSON")
    }

    /// Install these settings on a registry.
    ///
    /// Enforcement flags are applied before defaults, so a disabled flag
    /// lets a default outside the configured availability through; with
    /// enforcement left on, defaults are validated like any assignment.
    pub fn apply(&self, registry: &Registry) -> Result<(), RegistryError> {
        if let Some(enforce) = self.enforce_locale {
            registry.locale().set_enforced(enforce);
        }
        if let Some(enforce) = self.enforce_country {
            registry.country().set_enforced(enforce);
        }
        if let Some(enforce) = self.enforce_site {
            registry.site().set_enforced(enforce);
        }
        if let Some(enforce) = self.enforce_business_unit {
            registry.business_unit().set_enforced(enforce);
        }
        if let Some(enforce) = self.enforce_version {
            registry.version().set_enforced(enforce);
        }

        if let Some(locale) = &self.default_locale {
            registry.locale().set_default(locale.as_str())?;
        }
        if let Some(country) = &self.default_country {
            registry.country().set_default(country.as_str())?;
        }
        if let Some(site) = self.default_site {
            registry.site().set_default(site)?;
        }
        if let Some(business_unit) = self.default_business_unit {
            registry.business_unit().set_default(business_unit)?;
        }
        if let Some(version) = self.default_version {
            registry.version().set_default(version)?;
        }

        if let Some(separator) = &self.separator {
            registry.set_separator(separator.clone());
        }
        Ok(())
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_string(name) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} has an invalid value: {:?}", name, value)),
        None => Ok(None),
    }
}
