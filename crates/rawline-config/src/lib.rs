//! Optional TOML configuration for line length / history length / default
//! multiline mode, an ambient surface beyond bare in-code constants;
//! grounded on `core-config`'s discover-then-load-with-silent-fallback
//! shape.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub line_length_limit: usize,
    pub history_max_len: usize,
    pub multiline: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            line_length_limit: 4096,
            history_max_len: 4,
            multiline: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
}

impl Config {
    /// Look for `.rawline.toml` in the current directory, then under
    /// `dirs::config_dir()/rawline/config.toml`, matching
    /// `core-config::discover`'s local-file-then-XDG-dir order.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(".rawline.toml");
        if local.is_file() {
            return Some(local);
        }
        let xdg = dirs::config_dir()?.join("rawline").join("config.toml");
        xdg.is_file().then_some(xdg)
    }

    /// Load from an explicit path. A missing or malformed file falls back
    /// to defaults with a `tracing::warn!`, rather than failing the whole
    /// session over a config typo — matching `core-config::load_from`.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<ConfigFile>(&raw) {
                Ok(file) => {
                    tracing::info!(target: "config", path = %path.display(), "loaded config");
                    Self { file }
                }
                Err(err) => {
                    tracing::warn!(target: "config", path = %path.display(), error = %err, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(target: "config", path = %path.display(), error = %err, "failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Convenience: [`Config::discover`] then [`Config::load_from`], or
    /// defaults if nothing was found.
    pub fn load() -> Self {
        match Self::discover() {
            Some(path) => Self::load_from(path),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.file.line_length_limit, 4096);
        assert_eq!(cfg.file.history_max_len, 4);
        assert!(!cfg.file.multiline);
    }

    #[test]
    fn loads_overrides_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "line_length_limit = 256\nhistory_max_len = 10\nmultiline = true").unwrap();
        let cfg = Config::load_from(tmp.path());
        assert_eq!(cfg.file.line_length_limit, 256);
        assert_eq!(cfg.file.history_max_len, 10);
        assert!(cfg.file.multiline);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "not valid toml {{{{").unwrap();
        let cfg = Config::load_from(tmp.path());
        assert_eq!(cfg.file.line_length_limit, 4096);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load_from("/nonexistent/rawline-config-test.toml");
        assert_eq!(cfg.file.history_max_len, 4);
    }
}
