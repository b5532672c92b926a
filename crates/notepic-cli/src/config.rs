use anyhow::{bail, Context, Result};
use notepic_core::ProcessOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{LogLevel, ProcessArgs};

/// Environment variable that disables loading the user config file
pub const TEST_MODE_ENV: &str = "NOTEPIC_TEST_MODE";

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when neither flags nor RUST_LOG say otherwise
    pub log_level: Option<LogLevel>,

    /// Defaults for the process command
    pub process: ProcessOptions,
}

impl CliConfig {
    /// Load configuration with precedence: defaults < file
    ///
    /// An explicit `config_file` must exist. Without one, the user config
    /// file is used when present.
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        match config_file {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::from_file(&path)
            }
            None => Self::from_default_location(),
        }
    }

    /// Get default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("notepic");
        Ok(config_dir.join("config.toml"))
    }

    fn from_default_location() -> Result<Self> {
        // Tests must not pick up the config of whoever runs them
        if std::env::var(TEST_MODE_ENV).is_ok() {
            return Ok(Self::default());
        }

        match Self::default_config_path() {
            Ok(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Options for a process run, with command line values taking priority
    pub fn process_options(&self, args: &ProcessArgs) -> ProcessOptions {
        let mut options = self.process.clone();

        if let Some(basedir) = &args.basedir {
            options.basedir = basedir.clone();
        }
        if !args.extensions.is_empty() {
            options.extensions = args.extensions.clone();
        }
        if !args.ignore_paths.is_empty() {
            options.ignore_paths = args.ignore_paths.clone();
        }
        if let Some(filetype) = &args.filetype {
            options.filetype = filetype.clone();
        }

        options
    }

    /// Display the current configuration as TOML
    pub fn display_as_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config as TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notepic_core::DEFAULT_IMAGE_URL;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = CliConfig::load(Some(temp.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[process]\nfiletype = \"book\"\n").unwrap();

        let config = CliConfig::load(Some(path)).unwrap();

        assert_eq!(config.process.filetype, "book");
        assert_eq!(config.process.extensions, vec!["md"]);
        assert_eq!(config.process.ignore_paths, vec![".git", ".trash"]);
        assert_eq!(config.process.default_pic, DEFAULT_IMAGE_URL);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_full_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
log_level = "debug"

[process]
basedir = "/vault"
extensions = ["md", "markdown"]
ignore_paths = [".obsidian"]
filetype = "recipe"
default_pic = "https://example.com/none.png"
"#,
        )
        .unwrap();

        let config = CliConfig::load(Some(path)).unwrap();

        assert_eq!(config.log_level, Some(LogLevel::Debug));
        assert_eq!(config.process.basedir, PathBuf::from("/vault"));
        assert_eq!(config.process.extensions, vec!["md", "markdown"]);
        assert_eq!(config.process.ignore_paths, vec![".obsidian"]);
        assert_eq!(config.process.default_pic, "https://example.com/none.png");
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[process\n").unwrap();

        let err = CliConfig::load(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config = CliConfig::default();
        config.process.filetype = "book".to_string();
        config.process.extensions = vec!["txt".to_string()];

        let args = ProcessArgs {
            basedir: Some(PathBuf::from("notes")),
            extensions: vec!["md".to_string()],
            ignore_paths: vec![],
            filetype: None,
            dry_run: false,
        };
        let options = config.process_options(&args);

        assert_eq!(options.basedir, PathBuf::from("notes"));
        assert_eq!(options.extensions, vec!["md"]);
        assert_eq!(options.ignore_paths, vec![".git", ".trash"]);
        assert_eq!(options.filetype, "book");
    }

    #[test]
    fn test_display_as_toml_round_trips() {
        let config = CliConfig::default();
        let text = config.display_as_toml().unwrap();
        assert!(text.contains("[process]"));

        let parsed: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
