use thiserror::Error;

/// Everything that can go wrong in morsel, from loading settings to drawing a word.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// The settings describe a game that can't be played, e.g. a maximum word size below the minimum.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The word list couldn't be fetched, or it didn't contain any usable words.
    #[error("unable to fetch words: {0}")]
    WordSourceUnavailable(String),
    /// Asked to encode something that isn't an uppercase ASCII letter.
    #[error("no morse code for {0:?}")]
    UnknownLetter(char),
    /// Asked for the current word before any word was drawn.
    #[error("no word has been drawn yet")]
    NoWordDrawn,
    #[error("failed to load settings: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to set up logging: {0}")]
    Logging(String),
}

impl Error {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn unavailable(msg: impl Into<String>) -> Self {
        Self::WordSourceUnavailable(msg.into())
    }
}

pub type Result<T> = core::result::Result<T, Error>;
