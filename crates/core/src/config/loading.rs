//! Configuration loading from files and environment variables.

use super::ScanConfig;
use crate::error::{Error, Result};
use config::{Config as ConfigLib, Environment, File};
use std::path::Path;

impl ScanConfig {
    /// Load configuration with precedence (lowest to highest):
    /// 1. Hardcoded defaults (`ScanConfig::default`)
    /// 2. A TOML config file, if `path` exists
    /// 3. Environment variables prefixed `DEADCODE_`, double-underscore for
    ///    nesting (e.g. `DEADCODE_MAX_PARSE_WORKERS=4`)
    ///
    /// Per §4.1/§7 ("Configuration parse failure... never fatal"), a
    /// missing or malformed file does not error the whole load: this method
    /// only returns `Err` for a file that exists but is unreadable outright,
    /// or malformed environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = ScanConfig::default();
        let builder = ConfigLib::builder()
            .set_default("exclude", defaults.exclude.clone())
            .map_err(|e| Error::config(format!("failed to set exclude default: {e}")))?
            .set_default("dynamic_patterns", defaults.dynamic_patterns.clone())
            .map_err(|e| Error::config(format!("failed to set dynamic_patterns default: {e}")))?
            .set_default("di_decorators", defaults.di_decorators.clone())
            .map_err(|e| Error::config(format!("failed to set di_decorators default: {e}")))?
            .set_default(
                "di_container_patterns",
                defaults.di_container_patterns.clone(),
            )
            .map_err(|e| {
                Error::config(format!("failed to set di_container_patterns default: {e}"))
            })?
            .set_default(
                "dynamic_package_fields",
                defaults.dynamic_package_fields.clone(),
            )
            .map_err(|e| {
                Error::config(format!("failed to set dynamic_package_fields default: {e}"))
            })?
            .set_default("generated_patterns", defaults.generated_patterns.clone())
            .map_err(|e| Error::config(format!("failed to set generated_patterns default: {e}")))?
            .set_default(
                "use_unified_entry_detector",
                defaults.use_unified_entry_detector,
            )
            .map_err(|e| Error::config(format!("failed to set entry-detector default: {e}")))?
            .set_default("max_parse_workers", defaults.max_parse_workers as i64)
            .map_err(|e| Error::config(format!("failed to set max_parse_workers default: {e}")))?
            .set_default(
                "progress_chunk_size",
                defaults.progress_chunk_size as i64,
            )
            .map_err(|e| {
                Error::config(format!("failed to set progress_chunk_size default: {e}"))
            })?;

        let builder = match path {
            Some(p) if p.exists() => builder.add_source(File::from(p)),
            Some(p) => {
                tracing::warn!(path = %p.display(), "config file not found, using defaults");
                builder
            }
            None => builder,
        };

        let builder = builder.add_source(
            Environment::with_prefix("DEADCODE")
                .separator("__")
                .try_parsing(true),
        );

        let built = match builder.build() {
            Ok(built) => built,
            Err(e) => {
                tracing::warn!(error = %e, "failed to build configuration, falling back to defaults");
                return Ok(defaults);
            }
        };

        match built.try_deserialize() {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize configuration, falling back to defaults");
                Ok(defaults)
            }
        }
    }

    /// Parse configuration from a TOML string directly (tests, embedded
    /// configs).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("failed to parse TOML: {e}")))
    }
}
