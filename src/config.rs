//! Configuration module for pandaboot
//!
//! Settings are layered, lowest precedence first: built-in defaults, the
//! optional `config.toml` in the user's config directory, then `PANDABOOT_*`
//! environment variables. Command-line overrides are applied on top by the
//! caller.

use crate::library::{DEFAULT_APP_FOLDER, DEFAULT_EXTENSIONS, DEFAULT_STORAGE_ROOT, ScanConfig};
use crate::ui::FramePacer;
use crate::ui::modal::{DEFAULT_FRAME_DELAY, MIN_FRAME_DELAY};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of the environment variables read by [`LauncherConfig::load`]
pub const ENV_PREFIX: &str = "PANDABOOT";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Removable-volume root scanned for ROMs
    pub storage_root: PathBuf,

    /// Folder looked up under the storage root and the local-state directory
    pub app_folder: String,

    /// Application local-state directory
    pub local_state_dir: Option<PathBuf>,

    /// Recognized ROM extensions (case-sensitive, no leading dot)
    pub extensions: Vec<String>,

    /// Delay between UI frames, in milliseconds (0 is raised to the minimum)
    pub frame_delay_ms: u64,

    /// Suppress informational output
    pub quiet: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            app_folder: DEFAULT_APP_FOLDER.to_string(),
            local_state_dir: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            frame_delay_ms: u64::try_from(DEFAULT_FRAME_DELAY.as_millis()).unwrap_or(16),
            quiet: false,
        }
    }
}

impl LauncherConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("pandaboot").join("config.toml"))
    }

    /// Load configuration from the config file and environment
    ///
    /// A missing config file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined, or
    /// if the file or environment holds values that cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(Some(&config_path), Self::environment())
    }

    /// Load configuration from an optional file and an environment source
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either source holds values that cannot be parsed.
    pub fn load_from(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let settings = builder.add_source(env).build()?;
        settings.try_deserialize()
    }

    /// Environment source for `PANDABOOT_*` variables
    ///
    /// `PANDABOOT_EXTENSIONS` is read as a comma-separated list.
    #[must_use]
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("extensions")
    }

    /// Save configuration to `path`, usually [`Self::config_path`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Replace the local-state directory when `dir` is set
    #[must_use]
    pub fn with_local_state_override(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.local_state_dir = dir;
        }
        self
    }

    /// Scanner inputs derived from this configuration
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            storage_root: self.storage_root.clone(),
            app_folder: self.app_folder.clone(),
            local_state_dir: self.local_state_dir.clone(),
            extensions: self.extensions.clone(),
        }
    }

    /// Per-frame delay, never shorter than [`MIN_FRAME_DELAY`]
    #[must_use]
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms).max(MIN_FRAME_DELAY)
    }

    #[must_use]
    pub fn frame_pacer(&self) -> FramePacer {
        FramePacer::new(self.frame_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        LauncherConfig::environment().source(Some(map))
    }

    #[test]
    fn test_default_config() {
        let config = LauncherConfig::default();
        assert_eq!(config.storage_root, PathBuf::from("E:\\"));
        assert_eq!(config.app_folder, "PANDA3DS");
        assert!(config.local_state_dir.is_none());
        assert_eq!(config.extensions, vec!["3ds".to_string(), "cci".to_string()]);
        assert_eq!(config.frame_delay(), Duration::from_millis(16));
        assert!(!config.quiet);
    }

    #[test]
    fn test_default_matches_scan_defaults() {
        assert_eq!(LauncherConfig::default().scan_config(), ScanConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");

        let config = LauncherConfig::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(config, LauncherConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "app_folder = \"ROMS\"\nframe_delay_ms = 5\n").unwrap();

        let config = LauncherConfig::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(config.app_folder, "ROMS");
        assert_eq!(config.frame_delay_ms, 5);
        assert_eq!(config.storage_root, PathBuf::from("E:\\"));
    }

    #[test]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "local_state_dir = \"/from/file\"\nquiet = false\n").unwrap();

        let config = LauncherConfig::load_from(
            Some(&path),
            env(&[
                ("PANDABOOT_LOCAL_STATE_DIR", "/from/env"),
                ("PANDABOOT_QUIET", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.local_state_dir, Some(PathBuf::from("/from/env")));
        assert!(config.quiet);
    }

    #[test]
    fn test_env_extension_list() {
        let config = LauncherConfig::load_from(None, env(&[("PANDABOOT_EXTENSIONS", "3ds,cci,cxi")])).unwrap();
        assert_eq!(config.extensions, vec!["3ds", "cci", "cxi"]);
    }

    #[test]
    fn test_invalid_value_is_error() {
        let result = LauncherConfig::load_from(None, env(&[("PANDABOOT_FRAME_DELAY_MS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let config = LauncherConfig {
            local_state_dir: Some(PathBuf::from("/state")),
            quiet: true,
            ..LauncherConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = LauncherConfig::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_local_state_override() {
        let config = LauncherConfig {
            local_state_dir: Some(PathBuf::from("/configured")),
            ..LauncherConfig::default()
        };

        let kept = config.clone().with_local_state_override(None);
        assert_eq!(kept.local_state_dir, Some(PathBuf::from("/configured")));

        let replaced = config.with_local_state_override(Some(PathBuf::from("/override")));
        assert_eq!(replaced.local_state_dir, Some(PathBuf::from("/override")));
        assert_eq!(
            replaced.scan_config().local_state_dir,
            Some(PathBuf::from("/override"))
        );
    }

    #[test]
    fn test_frame_pacer() {
        let config = LauncherConfig {
            frame_delay_ms: 7,
            ..LauncherConfig::default()
        };
        assert_eq!(config.frame_pacer(), FramePacer::new(Duration::from_millis(7)));
    }

    #[test]
    fn test_zero_frame_delay_is_raised() {
        let config = LauncherConfig::load_from(None, env(&[("PANDABOOT_FRAME_DELAY_MS", "0")])).unwrap();
        assert_eq!(config.frame_delay_ms, 0);
        assert_eq!(config.frame_delay(), MIN_FRAME_DELAY);
        assert!(!config.frame_pacer().delay().is_zero());
        assert_ne!(config.frame_pacer(), FramePacer::unthrottled());
    }
}
