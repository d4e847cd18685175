//! A terminal Morse code trainer.
//!
//! The player is shown the dots and dashes for one letter of a hidden word and has to type that letter before
//! running out of lives. The pieces, leaves first:
//!
//! - [`morse`], the letter to dot/dash table
//! - [`words`], the shuffled bag of hidden words and where it's fetched from
//! - [`round`], score, lives and progress through the current word
//! - [`controller`], the screen-flow state machine that ties them together and describes each [`frame`]
//! - [`render`] and [`io`], which put frames on a display and bring input back
//! - [`runner`], the main loop

pub mod config;
pub mod controller;
mod error;
pub mod frame;
pub mod io;
pub mod logging;
pub mod morse;
pub mod render;
pub mod round;
pub mod runner;
pub mod timing;
pub mod words;

pub use error::{Error, Result};
