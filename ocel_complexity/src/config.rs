//! Layered configuration of the analysis.
//!
//! Uses `figment` to merge, from lowest to highest priority: built-in defaults, `ocx.toml` in the
//! working directory, an explicitly given TOML file, and `OCX_` environment variables.
use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "ocx.toml";

/// Prefix of configuration environment variables (nested keys are separated by `__`)
pub const ENV_PREFIX: &str = "OCX_";

/// Error loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape
    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
    /// An explicitly given configuration file does not exist
    #[error("configuration file not found: {0}")]
    NotFound(String),
}

/// Complete configuration of an analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityConfig {
    /// Model discovery settings
    pub discovery: DiscoveryConfig,
    /// Metric computation settings
    pub metrics: MetricsConfig,
}

/// Settings of the sub-model discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Discover the models of different object types concurrently
    pub parallel: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Settings of the metric computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Report supporting figures (node count, density, instance count, ...)
    pub include_auxiliary: bool,
    /// Report inter-object complexity per pair of object types
    pub include_type_pairs: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            include_auxiliary: true,
            include_type_pairs: true,
        }
    }
}

fn figment(explicit: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(ComplexityConfig::default()))
        .merge(Toml::file(CONFIG_FILE_NAME));
    if let Some(path) = explicit {
        figment = figment.merge(Toml::file(path));
    }
    // e.g. OCX_DISCOVERY__PARALLEL=false
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the [`ComplexityConfig`] from all layers
///
/// `explicit` is a TOML file that takes precedence over `ocx.toml`; unlike `ocx.toml` it has to
/// exist.
pub fn load_config(explicit: Option<&Path>) -> Result<ComplexityConfig, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
    }
    let config: ComplexityConfig = figment(explicit).extract().map_err(Box::new)?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config: ComplexityConfig = figment(None).extract()?;
            assert_eq!(config, ComplexityConfig::default());
            assert!(config.discovery.parallel);
            assert!(config.metrics.include_auxiliary);
            Ok(())
        });
    }

    #[test]
    fn working_directory_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
                [metrics]
                include_auxiliary = false
                "#,
            )?;
            let config: ComplexityConfig = figment(None).extract()?;
            assert!(!config.metrics.include_auxiliary);
            assert!(config.metrics.include_type_pairs);
            assert!(config.discovery.parallel);
            Ok(())
        });
    }

    #[test]
    fn explicit_file_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, "[discovery]\nparallel = false\n")?;
            jail.create_file(
                "custom.toml",
                "[discovery]\nparallel = true\n[metrics]\ninclude_type_pairs = false\n",
            )?;
            let config: ComplexityConfig = figment(Some(Path::new("custom.toml"))).extract()?;
            assert!(config.discovery.parallel);
            assert!(!config.metrics.include_type_pairs);

            jail.set_env("OCX_DISCOVERY__PARALLEL", "false");
            let config: ComplexityConfig = figment(Some(Path::new("custom.toml"))).extract()?;
            assert!(!config.discovery.parallel);
            Ok(())
        });
    }

    #[test]
    fn load_config_reports_errors() {
        Jail::expect_with(|jail| {
            assert!(matches!(
                load_config(Some(Path::new("missing.toml"))),
                Err(ConfigError::NotFound(_))
            ));

            jail.create_file("bad.toml", "[discovery]\nparallel = \"sometimes\"\n")?;
            assert!(matches!(
                load_config(Some(Path::new("bad.toml"))),
                Err(ConfigError::Invalid(_))
            ));

            jail.create_file("good.toml", "[metrics]\ninclude_auxiliary = false\n")?;
            let config = load_config(Some(Path::new("good.toml"))).map_err(|e| e.to_string())?;
            assert!(!config.metrics.include_auxiliary);
            Ok(())
        });
    }
}
