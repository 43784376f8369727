//! Configuration management.
//!
//! The distinguished-name profile, certificate validity, and keystore
//! password can be overridden from an optional TOML file; with no file
//! present the compiled defaults apply.

use anyhow::{Context, Result};
use certmill_core::DnProfile;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Distinguished-name fields for the CA and every issued certificate.
    pub dn: DnProfile,

    /// Validity in days for the root and the issued certificates.
    pub validity_days: u32,

    /// Password protecting the PKCS#12 bundles and keystores.
    pub store_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dn: DnProfile::default(),
            validity_days: 1825,
            store_password: "password".to_string(),
        }
    }
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "certmill", "certmill")
            .context("could not determine config directory")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration, falling back to defaults when no file exists.
    /// A file that exists but does not parse is a fatal error.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_the_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config: Config =
            toml::from_str("validity_days = 30\n\n[dn]\norganization = \"Acme\"\n").unwrap();
        assert_eq!(config.validity_days, 30);
        assert_eq!(config.dn.organization, "Acme");
        assert_eq!(config.dn.country, "US");
        assert_eq!(config.store_password, "password");
    }

    #[test]
    fn bad_config_is_rejected() {
        assert!(toml::from_str::<Config>("validity_days = \"soon\"").is_err());
    }
}
