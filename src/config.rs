use crate::consts;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file.
///
/// There are no process-wide globals: one `Config` is loaded at startup and
/// handed to whatever needs it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Config {
    /// Number of cells along each edge of the square board
    pub(crate) cell_number: u16,

    /// Settings about data files
    files: FileConfig,
}

impl Config {
    /// The smallest playable board
    const MIN_CELL_NUMBER: u16 = 10;

    /// The largest board that fits the display area
    const MAX_CELL_NUMBER: u16 = 20;

    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("boomslang").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  A missing file yields the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, could not be
    /// deserialized, or asks for a board that does not fit the display.
    pub(crate) fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        let raw = toml::from_str::<RawConfig>(&content)?;
        Config::try_from(raw)
    }

    /// Path of the savegame file: the configured override or the default
    /// under the local data directory.
    pub(crate) fn save_file(&self) -> Option<PathBuf> {
        self.files
            .save_file
            .clone()
            .or_else(|| data_file("savegame.json"))
    }

    /// Path of the high-scores file: the configured override or the default
    /// under the local data directory.
    pub(crate) fn high_scores_file(&self) -> Option<PathBuf> {
        self.files
            .high_scores_file
            .clone()
            .or_else(|| data_file("high_scores.json"))
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            cell_number: consts::DEFAULT_CELL_NUMBER,
            files: FileConfig::default(),
        }
    }
}

fn data_file(name: &str) -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("boomslang").join(name))
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawConfig {
    cell_number: Option<u16>,
    files: FileConfig,
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Config, ConfigError> {
        let cell_number = raw.cell_number.unwrap_or(consts::DEFAULT_CELL_NUMBER);
        if !(Config::MIN_CELL_NUMBER..=Config::MAX_CELL_NUMBER).contains(&cell_number) {
            return Err(ConfigError::CellNumber(cell_number));
        }
        Ok(Config {
            cell_number,
            files: raw.files,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct FileConfig {
    /// Path at which the game state should be saved
    save_file: Option<PathBuf>,

    /// Path at which the top-5 score list should be saved
    high_scores_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[source] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("cell-number {0} is outside {min}..={max}", min = Config::MIN_CELL_NUMBER, max = Config::MAX_CELL_NUMBER)]
    CellNumber(u16),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "cell-number = 12\n\n[files]\nsave-file = \"/tmp/sg.json\"\nhigh-scores-file = \"/tmp/hs.json\""
        )
        .unwrap();
        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.cell_number, 12);
        assert_eq!(cfg.save_file(), Some(PathBuf::from("/tmp/sg.json")));
        assert_eq!(cfg.high_scores_file(), Some(PathBuf::from("/tmp/hs.json")));
    }

    #[test]
    fn load_rejects_oversized_board() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cell-number = 64").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::CellNumber(64))
        ));
    }

    #[test]
    fn load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cell-number = \"lots\"").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
