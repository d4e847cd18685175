//! Where the hidden words come from.
//!
//! A [`WordSource`] keeps a shuffled bag of words and hands them out one at a time, never repeating one until the
//! bag is empty. Then it fetches the whole list again, reshuffles, and keeps going. The actual fetching is behind
//! [`Fetch`], so tests (and anything else) can supply words without the network.

use std::{collections::BTreeSet, time::Duration};

use backoff::ExponentialBackoff;
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use crate::{Error, Result};

/// The shortest word a [`WordSource`] will serve unless told otherwise.
pub const MIN_WORD_SIZE: usize = 3;

/// Something which can produce the raw word list: plain text, one word per line.
pub trait Fetch {
    fn fetch(&mut self) -> Result<String>;
}

/// Fetches the word list over HTTP, retrying transient failures with exponential backoff.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    url: String,
    max_retry: Duration,
}

impl HttpFetcher {
    /// Each request gives up after `timeout`; retries stop once `max_retry` has passed in total.
    pub fn new(url: impl Into<String>, timeout: Duration, max_retry: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::unavailable(format!("building http client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
            max_retry,
        })
    }

    fn get_once(&self) -> core::result::Result<String, backoff::Error<reqwest::Error>> {
        let res = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text());
        res.map_err(|e| match e.status() {
            // the server understood us and said no; asking again won't help
            Some(status) if status.is_client_error() => backoff::Error::permanent(e),
            _ => backoff::Error::transient(e),
        })
    }
}

impl Fetch for HttpFetcher {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    fn fetch(&mut self) -> Result<String> {
        let policy = ExponentialBackoff {
            max_elapsed_time: Some(self.max_retry),
            ..Default::default()
        };
        let text = backoff::retry_notify(
            policy,
            || self.get_once(),
            |err: reqwest::Error, wait: Duration| tracing::warn!("{}, retrying in {:?}", err, wait),
        )
        .map_err(|e| match e {
            backoff::Error::Permanent(e) => Error::unavailable(e.to_string()),
            backoff::Error::Transient { err, .. } => Error::unavailable(err.to_string()),
        })?;
        tracing::info!(bytes = text.len(), "fetched word list");
        Ok(text)
    }
}

/// Turn a raw word list into candidate words: trimmed, uppercased, only ASCII letters, within the size bounds, with
/// no duplicates.
pub fn filter_words(raw: &str, min_size: usize, max_size: usize) -> Vec<String> {
    let words: BTreeSet<_> = raw
        .lines()
        .map(str::trim)
        .filter(|w| (min_size..=max_size).contains(&w.len()))
        .filter(|w| w.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|w| w.to_ascii_uppercase())
        .collect();
    words.into_iter().collect()
}

/// A bag of words, drawn without replacement and refilled when empty.
pub struct WordSource<F: Fetch> {
    fetcher: F,
    min_size: usize,
    max_size: usize,
    bag: Vec<String>,
    current: Option<String>,
    rng: SmallRng,
}

impl<F: Fetch> WordSource<F> {
    /// Create a word source serving words of [`MIN_WORD_SIZE`] up to `max_size` letters.
    pub fn new(fetcher: F, max_size: usize) -> Result<Self> {
        Self::with_sizes(fetcher, MIN_WORD_SIZE, max_size)
    }

    /// Create a word source serving words of `min_size` to `max_size` letters, inclusive.
    ///
    /// This fetches the word list immediately. A list with no words in range is fine here; it only becomes an error
    /// once a word is actually drawn.
    pub fn with_sizes(fetcher: F, min_size: usize, max_size: usize) -> Result<Self> {
        if min_size == 0 {
            return Err(Error::invalid_config("minimum word size must be at least 1"));
        }
        if max_size < min_size {
            return Err(Error::invalid_config(format!(
                "maximum word size {} is below the minimum {}",
                max_size, min_size
            )));
        }
        let mut res = Self {
            fetcher,
            min_size,
            max_size,
            bag: vec![],
            current: None,
            rng: SmallRng::from_entropy(),
        };
        res.refill()?;
        Ok(res)
    }

    /// Fetch the full list again, filter and shuffle it, and replace the bag with it.
    #[tracing::instrument(skip(self), fields(min = self.min_size, max = self.max_size))]
    pub fn refill(&mut self) -> Result<()> {
        let raw = self.fetcher.fetch()?;
        let mut words = filter_words(&raw, self.min_size, self.max_size);
        words.shuffle(&mut self.rng);
        tracing::info!(count = words.len(), "refilled word bag");
        self.bag = words;
        Ok(())
    }

    /// Take the next word out of the bag, refilling it first if it's empty.
    pub fn next_word(&mut self) -> Result<String> {
        let word = match self.bag.pop() {
            Some(word) => word,
            None => {
                tracing::info!("word bag is empty, refilling");
                self.refill()?;
                self.bag.pop().ok_or_else(|| {
                    Error::unavailable(format!(
                        "the word list has no words of {} to {} letters",
                        self.min_size, self.max_size
                    ))
                })?
            }
        };
        tracing::debug!(%word, remaining = self.bag.len(), "drew word");
        self.current = Some(word.clone());
        Ok(word)
    }

    /// The word most recently returned by [`Self::next_word`].
    pub fn current_word(&self) -> Result<&str> {
        self.current.as_deref().ok_or(Error::NoWordDrawn)
    }

    /// How many words are left before the next refill.
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }
}
