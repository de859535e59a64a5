//! Configuration for the review service.
//!
//! Settings load from an optional `reviewd.toml` file, then environment
//! variables override individual values. The environment names mirror the
//! deployment contract: `BUCKET_DIR` for the artifact root, `DATA_DIR` for the
//! record database, `LISTEN`, `LINK_HOST`, `LINK_VALIDITY_SECS`, and
//! `SIGNING_KEY`.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;

/// reviewd.toml configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the HTTP API binds to.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Root directory of the artifact bucket (holds `processed/` and
    /// `approved/`). Defaults to `~/.reviewd/bucket`.
    #[serde(default)]
    pub bucket_dir: Option<PathBuf>,

    /// Directory for the record database. Defaults to `~/.reviewd`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Host embedded in signed artifact URLs.
    #[serde(default = "default_link_host")]
    pub link_host: String,

    /// Validity window for signed URLs, in seconds. The link cache TTL is
    /// derived from this same value.
    #[serde(default = "default_link_validity_secs")]
    pub link_validity_secs: u64,

    /// Hex-encoded signing secret. When unset, an ephemeral key is generated
    /// at startup (links stop verifying across restarts).
    #[serde(default)]
    pub signing_key: Option<String>,
}

fn default_listen() -> String {
    constants::DEFAULT_LISTEN.to_string()
}

fn default_link_host() -> String {
    constants::DEFAULT_LINK_HOST.to_string()
}

fn default_link_validity_secs() -> u64 {
    constants::DEFAULT_LINK_VALIDITY.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            bucket_dir: None,
            data_dir: None,
            link_host: default_link_host(),
            link_validity_secs: default_link_validity_secs(),
            signing_key: None,
        }
    }
}

impl Config {
    /// Load configuration: `reviewd.toml` if present, then env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if a value fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default = Path::new("reviewd.toml");
                if default.exists() {
                    Self::load_from(default)?
                } else {
                    Self::default()
                }
            },
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the specified TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overlay environment variables on top of file values.
    ///
    /// # Errors
    ///
    /// Returns an error if `LINK_VALIDITY_SECS` is set but not an integer;
    /// a typo must not silently fall back to the file value.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(listen) = std::env::var("LISTEN") {
            self.listen = listen;
        }
        if let Ok(dir) = std::env::var("BUCKET_DIR") {
            self.bucket_dir = Some(PathBuf::from(dir));
        }
        if let Ok(dir) = std::env::var("DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(host) = std::env::var("LINK_HOST") {
            self.link_host = host;
        }
        if let Ok(secs) = std::env::var("LINK_VALIDITY_SECS") {
            self.link_validity_secs = secs
                .parse()
                .with_context(|| format!("LINK_VALIDITY_SECS must be an integer, got: {secs}"))?;
        }
        if let Ok(key) = std::env::var("SIGNING_KEY") {
            self.signing_key = Some(key);
        }
        Ok(())
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.link_validity_secs == 0 {
            bail!("link_validity_secs must be greater than zero");
        }
        if let Some(key) = &self.signing_key
            && hex::decode(key).is_err()
        {
            bail!("signing_key must be hex-encoded");
        }
        Ok(())
    }

    /// Validity window for signed URLs and cached links.
    #[must_use]
    pub const fn link_validity(&self) -> Duration {
        Duration::from_secs(self.link_validity_secs)
    }

    /// Resolved artifact bucket directory.
    #[must_use]
    pub fn bucket_dir(&self) -> PathBuf {
        self.bucket_dir
            .clone()
            .unwrap_or_else(|| home_dir().join("bucket"))
    }

    /// Resolved record database path.
    #[must_use]
    pub fn records_db_path(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(home_dir)
            .join("records.redb")
    }
}

/// Base directory for service state (`~/.reviewd`).
fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".reviewd")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.listen, "127.0.0.1:8080");
        assert_eq!(config.link_validity(), Duration::from_secs(3600));
        assert!(config.signing_key.is_none());
    }

    #[test]
    fn parses_toml() {
        let config: Config = toml::from_str(
            r#"
            listen = "0.0.0.0:9000"
            bucket_dir = "/srv/invoices"
            link_validity_secs = 600
            "#,
        )
        .unwrap();
        assert_eq!(config.listen, "0.0.0.0:9000");
        assert_eq!(config.bucket_dir(), PathBuf::from("/srv/invoices"));
        assert_eq!(config.link_validity(), Duration::from_secs(600));
    }

    #[test]
    fn rejects_zero_validity() {
        let config = Config {
            link_validity_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_numeric_validity_env() {
        // Only this test touches LINK_VALIDITY_SECS, so no cross-test race
        unsafe { std::env::set_var("LINK_VALIDITY_SECS", "an hour") };
        let mut config = Config::default();
        let result = config.apply_env();
        unsafe { std::env::remove_var("LINK_VALIDITY_SECS") };

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("LINK_VALIDITY_SECS")
        );
    }

    #[test]
    fn rejects_non_hex_signing_key() {
        let config = Config {
            signing_key: Some("not hex".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
