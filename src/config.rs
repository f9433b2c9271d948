use crate::engine::{Grid, Settings, SettingsError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Gameplay parameters
    pub(crate) game: GameConfig,

    /// Diagnostic logging
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path, if the local
    /// configuration directory can be determined
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::config_local_dir().map(|p| p.join("gridsnake").join("config.toml"))
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
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct GameConfig {
    width: u16,
    height: u16,
    initial_speed_ms: u64,
    min_speed_ms: u64,
    speed_step_ms: u64,
    initial_length: u16,
}

impl GameConfig {
    /// Validate the configured values
    ///
    /// # Errors
    ///
    /// Returns `Err` if the values do not describe a playable game.
    pub(crate) fn to_settings(self) -> Result<Settings, ConfigError> {
        Settings::new(
            Grid::new(self.width, self.height),
            Duration::from_millis(self.initial_speed_ms),
            Duration::from_millis(self.min_speed_ms),
            Duration::from_millis(self.speed_step_ms),
            self.initial_length,
        )
        .map_err(Into::into)
    }
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        let settings = Settings::default();
        GameConfig {
            width: settings.grid().width,
            height: settings.grid().height,
            initial_speed_ms: millis(settings.initial_speed()),
            min_speed_ms: millis(settings.min_speed()),
            speed_step_ms: millis(settings.speed_step()),
            initial_length: settings.initial_length().get(),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LogConfig {
    /// File to which to write log messages.  If not set, nothing is logged.
    pub(crate) file: Option<PathBuf>,

    /// A `tracing_subscriber::EnvFilter` directive string, e.g. `"debug"`
    pub(crate) level: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid game configuration")]
    Invalid(#[from] SettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_is_default() {
        let config = toml::from_str::<Config>("").expect("empty config should parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.game.to_settings().ok(), Some(Settings::default()));
    }

    #[test]
    fn default_game_config_matches_settings() {
        assert_eq!(
            GameConfig::default(),
            GameConfig {
                width: 20,
                height: 20,
                initial_speed_ms: 600,
                min_speed_ms: 50,
                speed_step_ms: 5,
                initial_length: 3,
            }
        );
    }

    #[test]
    fn full_config() {
        let src = concat!(
            "[game]\n",
            "width = 30\n",
            "height = 15\n",
            "initial-speed-ms = 300\n",
            "min-speed-ms = 80\n",
            "speed-step-ms = 10\n",
            "initial-length = 5\n",
            "\n",
            "[log]\n",
            "file = \"/tmp/gridsnake.log\"\n",
            "level = \"gridsnake=trace\"\n",
        );
        let config = toml::from_str::<Config>(src).expect("config should parse");
        let settings = config.game.to_settings().expect("settings should be valid");
        assert_eq!(settings.grid(), Grid::new(30, 15));
        assert_eq!(settings.initial_speed(), Duration::from_millis(300));
        assert_eq!(settings.min_speed(), Duration::from_millis(80));
        assert_eq!(settings.speed_step(), Duration::from_millis(10));
        assert_eq!(settings.initial_length().get(), 5);
        assert_eq!(
            config.log,
            LogConfig {
                file: Some(PathBuf::from("/tmp/gridsnake.log")),
                level: Some(String::from("gridsnake=trace")),
            }
        );
    }

    #[test]
    fn partial_game_section() {
        let config =
            toml::from_str::<Config>("[game]\nwidth = 12\n").expect("config should parse");
        let settings = config.game.to_settings().expect("settings should be valid");
        assert_eq!(settings.grid(), Grid::new(12, 20));
        assert_eq!(settings.initial_speed(), Duration::from_millis(600));
    }

    #[test]
    fn unknown_key() {
        let r = toml::from_str::<Config>("[game]\ncolour = \"green\"\n");
        assert!(r.is_err());
    }

    #[test]
    fn invalid_values() {
        let config =
            toml::from_str::<Config>("[game]\ninitial-length = 0\n").expect("config should parse");
        assert!(matches!(
            config.game.to_settings(),
            Err(ConfigError::Invalid(SettingsError::ZeroLength))
        ));
    }

    #[test]
    fn load_missing() {
        let dir = tempfile::tempdir().expect("should be able to create a tempdir");
        let path = dir.path().join("config.toml");
        assert_eq!(
            Config::load(&path, true).ok(),
            Some(Config::default())
        );
        assert!(matches!(Config::load(&path, false), Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("should be able to create a tempfile");
        writeln!(file, "[game]\nheight = 10").expect("should be able to write to tempfile");
        let config = Config::load(file.path(), false).expect("config should load");
        assert_eq!(config.game.height, 10);
        assert_eq!(config.game.width, 20);
    }

    #[test]
    fn load_malformed() {
        let mut file = tempfile::NamedTempFile::new().expect("should be able to create a tempfile");
        writeln!(file, "[game\nheight = 10").expect("should be able to write to tempfile");
        assert!(matches!(Config::load(file.path(), false), Err(ConfigError::Parse(_))));
    }
}
