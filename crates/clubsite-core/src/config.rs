//! Site-level configuration.
//!
//! One small TOML file, `clubsite.toml`, in the directory the generator
//! runs from. Every field has a default so a missing file is not an error;
//! the env vars exist so CI and previews can override without touching the
//! checked-in config.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::datetime::DEFAULT_SITE_TIMEZONE;

const CONFIG_FILE: &str = "clubsite.toml";
const CONFIG_ENV_VAR: &str = "CLUBSITE_CONFIG";
const TIMEZONE_ENV_VAR: &str = "CLUBSITE_TIMEZONE";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name, also the byline fallback for records with no authors.
    pub name: String,

    /// IANA zone id all civil-time checks run in.
    pub timezone: String,

    /// Separator between the date and the time range on schedule rows.
    pub date_separator: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Security Club".to_string(),
            timezone: DEFAULT_SITE_TIMEZONE.to_string(),
            date_separator: " • ".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load the config, falling back to defaults when no file exists.
    ///
    /// Path resolution: explicit override, then `CLUBSITE_CONFIG`, then
    /// `clubsite.toml` in the current directory.
    pub fn load(path_override: Option<&Path>) -> anyhow::Result<Self> {
        let path = resolve_config_path(path_override);

        let mut cfg = match path {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let cfg: SiteConfig = toml::from_str(&raw)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                info!(file = %path.display(), "loaded site config");
                cfg
            }
            Some(path) => {
                info!(file = %path.display(), "no site config file; using defaults");
                SiteConfig::default()
            }
            None => SiteConfig::default(),
        };

        if let Ok(raw) = std::env::var(TIMEZONE_ENV_VAR) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                info!(timezone = %trimmed, "timezone overridden from environment");
                cfg.timezone = trimmed.to_string();
            }
        }

        Ok(cfg)
    }

    /// The configured zone, or UTC when the id does not parse.
    #[must_use]
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(err) => {
                error!(
                    timezone = %self.timezone,
                    error = %err,
                    "invalid timezone id; falling back to UTC"
                );
                chrono_tz::UTC
            }
        }
    }
}

fn resolve_config_path(path_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = path_override {
        return Some(path.to_path_buf());
    }

    if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    match std::env::current_dir() {
        Ok(dir) => Some(dir.join(CONFIG_FILE)),
        Err(err) => {
            warn!(error = %err, "cannot resolve current directory for site config");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::SiteConfig;

    #[test]
    fn defaults_apply_when_the_file_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = SiteConfig::load(Some(&dir.path().join("clubsite.toml"))).expect("load");
        assert_eq!(cfg.name, "Security Club");
        assert_eq!(cfg.timezone, "America/New_York");
        assert_eq!(cfg.date_separator, " • ");
    }

    #[test]
    fn file_values_override_defaults_field_by_field() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "name = \"RC3\"").expect("write");
        writeln!(file, "timezone = \"America/Chicago\"").expect("write");

        let cfg = SiteConfig::load(Some(file.path())).expect("load");
        assert_eq!(cfg.name, "RC3");
        assert_eq!(cfg.timezone, "America/Chicago");
        assert_eq!(cfg.date_separator, " • ");
        assert_eq!(cfg.tz(), "America/Chicago".parse().expect("tz"));
    }

    #[test]
    fn bad_timezone_id_falls_back_to_utc() {
        let cfg = SiteConfig {
            timezone: "Campus/Clocktower".to_string(),
            ..Default::default()
        };
        assert_eq!(cfg.tz(), chrono_tz::UTC);
    }

    #[test]
    fn malformed_toml_is_a_real_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "name = ").expect("write");
        assert!(SiteConfig::load(Some(file.path())).is_err());
    }
}
