use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlsConfig {
    pub collections: CollectionsConfig,
    pub figma: FigmaConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsConfig {
    pub semantic: String,
    pub primitives: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigmaConfig {
    pub api_base: String,
    pub token_env: String,
    pub file_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl DlsConfig {
    /// Load config: `path` (or the user file, if it exists) merged over the
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let user_path = path.map_or_else(Self::config_path, Path::to_path_buf);
        if path.is_some() || user_path.exists() {
            let user_str = std::fs::read_to_string(&user_path)
                .map_err(|e| CliError::Config(format!("{}: {e}", user_path.display())))?;
            Self::from_user_toml(&user_str)
        } else {
            Self::from_user_toml("")
        }
    }

    /// Parse `user` and overlay it key by key on the defaults, so a user file
    /// only needs the settings it changes.
    pub fn from_user_toml(user: &str) -> Result<Self, CliError> {
        let mut merged: toml::Value =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| CliError::Config(e.to_string()))?;
        let overlay: toml::Value =
            toml::from_str(user).map_err(|e| CliError::Config(e.to_string()))?;
        merge(&mut merged, overlay);
        merged
            .try_into()
            .map_err(|e: toml::de::Error| CliError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "dls")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = DlsConfig::from_user_toml("").unwrap();
        assert_eq!(config.collections.semantic, "color-semantic");
        assert_eq!(config.collections.primitives, "color-primitives");
        assert_eq!(config.figma.token_env, "FIGMA_TOKEN");
        assert!(config.figma.file_key.is_none());
        assert_eq!(config.logging.filter, "dls=info");
    }

    #[test]
    fn test_partial_override() {
        let config = DlsConfig::from_user_toml(
            "[figma]\nfile_key = \"AbC\"\n\n[logging]\nfilter = \"dls=debug\"\n",
        )
        .unwrap();
        assert_eq!(config.figma.file_key.as_deref(), Some("AbC"));
        assert_eq!(config.figma.api_base, "https://api.figma.com");
        assert_eq!(config.logging.filter, "dls=debug");
        assert_eq!(config.collections.semantic, "color-semantic");
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(matches!(
            DlsConfig::from_user_toml("[collections\n"),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dls").join("config.toml");

        let mut config = DlsConfig::from_user_toml("").unwrap();
        config.collections.semantic = "tokens".into();
        config.save(&path).unwrap();

        let loaded = DlsConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.collections.semantic, "tokens");
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DlsConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
