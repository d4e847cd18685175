//! Settings for the whole program, layered from defaults, an optional `morsel.toml`, and `MORSEL_*` environment
//! variables (nested keys use `__`, e.g. `MORSEL_WORDS__MAX_SIZE=5`).

use std::time::Duration;

use ::config::{Environment, File, FileFormat, Source};
use serde::Deserialize;
use tracing::trace;

use crate::{controller::GameSettings, words::MIN_WORD_SIZE, Error, Result};

pub const DEFAULT_WORD_LIST: &str = "https://www.mit.edu/~ecprice/wordlist.10000";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Terminal title.
    pub caption: String,
    /// Ticks per second.
    pub fps: u32,
    pub words: WordsSettings,
    pub game: GameSection,
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            caption: "Morse Code".into(),
            fps: 60,
            words: Default::default(),
            game: Default::default(),
            log: Default::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WordsSettings {
    pub url: String,
    pub min_size: usize,
    pub max_size: usize,
    /// Per request.
    pub timeout_secs: u64,
    /// Total time spent retrying a failed fetch before giving up.
    pub max_retry_secs: u64,
}

impl Default for WordsSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_WORD_LIST.into(),
            min_size: MIN_WORD_SIZE,
            max_size: 4,
            timeout_secs: 10,
            max_retry_secs: 30,
        }
    }
}

impl WordsSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn max_retry(&self) -> Duration {
        Duration::from_secs(self.max_retry_secs)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GameSection {
    pub max_lives: usize,
    pub cheat_millis: u64,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            max_lives: 5,
            cheat_millis: 1000,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogSettings {
    /// Where log lines go. The terminal belongs to the game, so never stdout.
    pub file: String,
    /// Used when `RUST_LOG` isn't set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: "morsel.log".into(),
            filter: "morsel=info".into(),
        }
    }
}

impl Settings {
    /// Load from `morsel.toml` in the working directory, if there is one, and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(File::with_name("morsel").required(false))
    }

    fn load_from(file: impl Source + Send + Sync + 'static) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("MORSEL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        trace!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Parse settings out of a TOML document, without looking anywhere else.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            min_size: self.words.min_size,
            max_size: self.words.max_size,
            max_lives: self.game.max_lives,
            cheat_duration: Duration::from_millis(self.game.cheat_millis),
        }
    }

    /// Check for settings that would make the game unplayable.
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(Error::invalid_config("fps must be at least 1"));
        }
        if self.words.timeout_secs == 0 {
            return Err(Error::invalid_config("the word list timeout must be at least a second"));
        }
        self.game_settings().validate()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_validate() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.game_settings(), GameSettings::default());
        assert_eq!(settings.words.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings = Settings::from_toml("caption = \"Dits\"\n[words]\nmax_size = 6\n").unwrap();
        assert_eq!(settings.caption, "Dits");
        assert_eq!(settings.words.max_size, 6);
        assert_eq!(settings.words.min_size, MIN_WORD_SIZE);
        assert_eq!(settings.game, GameSection::default());
        assert_eq!(settings.log, LogSettings::default());
    }

    #[test]
    fn bad_sizes_rejected() {
        let settings = Settings::from_toml("[words]\nmin_size = 5\nmax_size = 4\n").unwrap();
        assert!(matches!(settings.validate(), Err(Error::InvalidConfiguration(_))));
        let settings = Settings::from_toml("[words]\nmin_size = 0\n").unwrap();
        assert!(matches!(settings.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_rates_rejected() {
        let settings = Settings::from_toml("fps = 0").unwrap();
        assert!(settings.validate().is_err());
        let settings = Settings::from_toml("[game]\nmax_lives = 0").unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn wrong_types_are_config_errors() {
        let res = Settings::from_toml("fps = \"fast\"");
        assert!(matches!(res, Err(Error::Config(_))));
    }
}
