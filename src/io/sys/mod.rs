//! Input/output backends. Each one is controlled by a feature named similarly and exports a type implementing
//! [`IoSystem`]; [`load`] picks the first one that initializes.

#[cfg(feature = "__sys")]
use std::collections::HashMap;

use crate::Result;

use super::{Action, Screen, XY};

#[cfg(feature = "sys_cli")]
pub mod ansi_cli;


/// An input/output system.
///
/// The output is called a "display" to distinguish it from the [`Screen`]. Everything here is called from the one
/// thread running the game loop, and nothing may block for long: input is polled, never waited on.
pub trait IoSystem {
    /// Actually render a [`Screen`] to the display.
    ///
    /// This must cope with a `Screen` of the wrong size, e.g. right after a resize.
    fn draw(&mut self, screen: &Screen) -> Result<()>;

    /// Get the size of the display, in characters.
    fn size(&self) -> XY;

    /// If the next user input is available, return it. Otherwise, return `None`.
    fn poll_input(&mut self) -> Result<Option<Action>>;

    /// Set the caption of the window or terminal, if it has one.
    fn set_title(&mut self, _title: &str) -> Result<()> {
        Ok(())
    }

    /// Dispose of any resources this system is handling, e.g. restoring the terminal.
    ///
    /// This will always be the last method called on this object, but it may be called more than once.
    fn stop(&mut self);
}

/// Based on IO system features enabled, attempt to initialize an IO system; in order:
///
/// - crossterm CLI (`sys_cli`)
///
/// The Err type is a map from the name of the system to the error that it hit.
#[cfg(feature = "__sys")]
pub fn load() -> core::result::Result<Box<dyn IoSystem>, HashMap<&'static str, crate::Error>> {
    let mut errors = HashMap::new();
    macro_rules! try_init {
        ( $name:ident: $( $init:tt )* ) => {
            match { $($init)* } {
                Ok(iosys) => return Ok(Box::new(iosys)),
                Err(e) => {
                    tracing::warn!(system = stringify!($name), "failed to initialize: {}", e);
                    errors.insert(stringify!($name), e);
                }
            }
        }
    }
    #[cfg(feature = "sys_cli")]
    {
        try_init! { ansi_cli: ansi_cli::AnsiSystem::new() }
    }
    Err(errors)
}
