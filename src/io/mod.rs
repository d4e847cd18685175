//! Everything between the game and the player: raw input [`Action`]s coming in, a [`Screen`] of formatted
//! characters going out, and the [`IoSystem`](sys::IoSystem) that connects them to a real terminal.

pub mod action;
pub mod fmt;
pub mod screen;
pub mod sys;
mod xy;

pub use self::{
    action::{Action, Key, MouseButton},
    screen::Screen,
    xy::XY,
};
