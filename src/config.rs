use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{ConfigSource, Error, Result};
use crate::summary::DEFAULT_INDENT;

pub const DEFAULT_INPUT: &str = "app.log";
pub const DEFAULT_OUTPUT: &str = "log_summary.json";

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub general: GeneralConfig,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub indent: usize,
    pub print_summary: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            indent: DEFAULT_INDENT,
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub indent: usize,
    pub print_summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(ConfigFile::default())
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            input: file.general.input,
            output: file.general.output,
            indent: file.general.indent,
            print_summary: file.general.print_summary,
        }
    }
}

impl Config {
    /// Load from the per-user config directory. A missing file means
    /// defaults; a broken one is reported and then ignored.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            warn!("ignoring config: {e}");
            Self::default()
        })
    }

    /// Load an explicitly named file. Any failure is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_err = |source: ConfigSource| Error::Config {
            path: path.to_path_buf(),
            source,
        };
        let text = std::fs::read_to_string(path).map_err(|e| config_err(e.into()))?;
        Self::from_toml_str(&text).map_err(|e| config_err(e.into()))
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str::<ConfigFile>(text).map(Self::from)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("logtally").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input, PathBuf::from("app.log"));
        assert_eq!(config.output, PathBuf::from("log_summary.json"));
        assert_eq!(config.indent, 4);
        assert!(config.print_summary);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Config::from_toml_str("[general]\noutput = \"out/summary.json\"\nindent = 2\n").unwrap();
        assert_eq!(config.output, PathBuf::from("out/summary.json"));
        assert_eq!(config.indent, 2);
        assert_eq!(config.input, PathBuf::from("app.log"));
    }

    #[test]
    fn test_bad_types_are_rejected() {
        assert!(Config::from_toml_str("[general]\nindent = \"wide\"\n").is_err());
    }

    #[test]
    fn test_load_from_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config { source: ConfigSource::Parse(_), .. }));

        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { source: ConfigSource::Read(_), .. }));
    }
}
