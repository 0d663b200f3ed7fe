use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CONFIG_ENV: &str = "GRADEBOOK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "gradebook.toml";

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Application configuration. Every value has a documented default so the
/// program runs without a config file; nothing is read from hidden
/// module-level state beyond these defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub report_file: PathBuf,
    pub backup_dir: PathBuf,
    pub admin: AdminIdentity,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminIdentity {
    pub username: String,
    pub password: String,
}

// Keep the password out of debug/log output.
impl std::fmt::Debug for AdminIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminIdentity")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Default for AdminIdentity {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/students.csv"),
            report_file: PathBuf::from("data/grade_report.csv"),
            backup_dir: PathBuf::from("data/backups"),
            admin: AdminIdentity::default(),
        }
    }
}

impl AppConfig {
    /// Loads the file at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Resolves the config path from `GRADEBOOK_CONFIG`, falling back to
    /// `gradebook.toml` in the working directory.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_identity() {
        let config = AppConfig::default();
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.password, "admin123");
        assert_eq!(config.data_file, PathBuf::from("data/students.csv"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            AppConfig::load(Path::new("does-not-exist.toml")).expect("defaults for missing file");
        assert_eq!(config.admin.username, "admin");
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            data_file = "elsewhere/roster.csv"

            [admin]
            username = "principal"
            "#,
        )
        .expect("parse partial config");
        assert_eq!(config.data_file, PathBuf::from("elsewhere/roster.csv"));
        assert_eq!(config.admin.username, "principal");
        assert_eq!(config.admin.password, "admin123");
        assert_eq!(config.backup_dir, PathBuf::from("data/backups"));
    }

    #[test]
    fn debug_masks_password() {
        let rendered = format!("{:?}", AdminIdentity::default());
        assert!(!rendered.contains("admin123"));
    }
}
