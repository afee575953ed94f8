use crate::store::{LoadError, Storage};
use crate::theme::Theme;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Color theme to start out with
    pub(crate) theme: Theme,

    /// Settings about data files
    pub(crate) files: FileConfig,

    /// Settings about diagnostic logging
    pub(crate) logging: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the path of the key-value store file: the file given in the
    /// configuration or, if that is not set, the default store path.  Return
    /// `None` if no path is present in the configuration and the default path
    /// could not be computed.
    fn store_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .store_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| Storage::default_path().map(Cow::from))
    }

    /// Open the key-value store holding the high score.
    ///
    /// If `self.files.save_high_score` is `false`, an empty in-memory store is
    /// returned without reading anything from disk.
    pub(crate) fn open_store(&self) -> Result<Storage, LoadError> {
        if !self.files.save_high_score {
            Ok(Storage::in_memory())
        } else if let Some(p) = self.store_file() {
            Storage::open(p.into_owned())
        } else {
            Err(LoadError::no_path())
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the key-value store (and thus the high score) is kept
    pub(crate) store_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    pub(crate) save_high_score: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            store_file: None,
            save_high_score: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LogConfig {
    /// File to write logs to.  Nothing is logged if this is not set.
    pub(crate) file: Option<PathBuf>,

    /// Log filter directive, in `RUST_LOG` syntax
    pub(crate) level: String,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: String::from("info"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HighScoreStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_full() {
        let cfg = toml::from_str::<Config>(concat!(
            "theme = \"light\"\n",
            "\n",
            "[files]\n",
            "store-file = \"/home/me/.snake/storage.json\"\n",
            "save-high-score = false\n",
            "\n",
            "[logging]\n",
            "file = \"/tmp/gridsnake.log\"\n",
            "level = \"gridsnake=debug\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                theme: Theme::Light,
                files: FileConfig {
                    store_file: Some(PathBuf::from("/home/me/.snake/storage.json")),
                    save_high_score: false,
                },
                logging: LogConfig {
                    file: Some(PathBuf::from("/tmp/gridsnake.log")),
                    level: String::from("gridsnake=debug"),
                },
            }
        );
    }

    #[test]
    fn parse_empty() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.theme, Theme::Dark);
        assert!(cfg.files.save_high_score);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn parse_partial_section() {
        let cfg = toml::from_str::<Config>("[files]\nsave-high-score = false\n").unwrap();
        assert_eq!(cfg.files.store_file, None);
        assert!(!cfg.files.save_high_score);
    }

    #[test]
    fn bad_theme() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs_err::write(&path, "theme = \"purple\"\n").unwrap();
        let r = Config::load(&path, true);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn open_configured_store() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.json");
        fs_err::write(&path, "{\"highScore-snake-v1\": \"23\"}").unwrap();
        let cfg = Config {
            files: FileConfig {
                store_file: Some(path),
                save_high_score: true,
            },
            ..Config::default()
        };
        assert_eq!(cfg.open_store().unwrap().load_high_score(), 23);
    }

    #[test]
    fn open_store_without_saving() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.json");
        fs_err::write(&path, "{\"highScore-snake-v1\": \"23\"}").unwrap();
        let cfg = Config {
            files: FileConfig {
                store_file: Some(path),
                save_high_score: false,
            },
            ..Config::default()
        };
        let mut store = cfg.open_store().unwrap();
        assert_eq!(store.load_high_score(), 0);
        store.save_high_score(50).unwrap();
        let src = fs_err::read_to_string(tmp.path().join("storage.json")).unwrap();
        assert_eq!(src, "{\"highScore-snake-v1\": \"23\"}");
    }
}
