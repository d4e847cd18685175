use std::{fs::OpenOptions, sync::Mutex};

use tracing::trace;
use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::LogSettings, Error, Result};

/// Parse a filter like `morsel=debug`.
fn filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| Error::Logging(format!("bad filter {:?}: {}", directives, e)))
}

/// Send logs to the configured file, filtered by `RUST_LOG` if it's set and the configured filter otherwise.
pub fn init(settings: &LogSettings) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(&settings.file)?;
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => filter(&directives)?,
        _ => filter(&settings.filter)?,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    trace!("finished");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_filter_parses() {
        filter(&LogSettings::default().filter).unwrap();
    }

    #[test]
    fn bad_filter_is_an_error() {
        assert!(matches!(filter("morsel=loudly"), Err(Error::Logging(_))));
    }
}
