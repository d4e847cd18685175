//! Terminal text formatting, as several pieces:
//!
//! - [`Format`], the common ANSI formatting options
//! - [`Text`] and [`Cell`], which apply a `Format` to a string and a `char` respectively
//!     - Both implement [`Formatted`], so they share the builder methods on [`FormattedExt`]
//! - [`text!`](crate::text), which builds a `Vec<Text>` in one go

/// The color of a piece of formatted text. The numeric values are the ANSI color codes for each color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 60,
    BrightRed = 61,
    BrightGreen = 62,
    BrightYellow = 63,
    BrightBlue = 64,
    BrightMagenta = 65,
    BrightCyan = 66,
    BrightWhite = 67,
}

impl Color {
    /// The bright version of this color. Bright colors are their own bright version.
    pub fn bright(self) -> Color {
        match self {
            Color::Black => Color::BrightBlack,
            Color::Red => Color::BrightRed,
            Color::Green => Color::BrightGreen,
            Color::Yellow => Color::BrightYellow,
            Color::Blue => Color::BrightBlue,
            Color::Magenta => Color::BrightMagenta,
            Color::Cyan => Color::BrightCyan,
            Color::White => Color::BrightWhite,
            bright => bright,
        }
    }

    /// The normal version of this color. Normal colors are their own normal version.
    pub fn dim(self) -> Color {
        match self {
            Color::BrightBlack => Color::Black,
            Color::BrightRed => Color::Red,
            Color::BrightGreen => Color::Green,
            Color::BrightYellow => Color::Yellow,
            Color::BrightBlue => Color::Blue,
            Color::BrightMagenta => Color::Magenta,
            Color::BrightCyan => Color::Cyan,
            Color::BrightWhite => Color::White,
            normal => normal,
        }
    }
}

/// The format of a single formatted item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Format {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub underline: bool,
}

impl Format {
    pub const NONE: Self = Format {
        fg: Color::White,
        bg: Color::Black,
        bold: false,
        underline: false,
    };
}

impl Default for Format {
    fn default() -> Self {
        Self::NONE
    }
}

macro_rules! fmt_fn {
    ( $(
        $name:ident
        $(( $( $arg:ident: $type:ty ),* $(,)? ))?
        =>
        $field:ident
        = $val:expr
    ),* $(,)? ) => { $(
        #[must_use]
        fn $name(mut self $($(, $arg: $type )*)? ) -> Self {
            self.get_fmt_mut().$field = $val;
            self
        }
    )* };
}

/// Implemented by everything that carries a [`Format`].
pub trait Formatted {
    fn get_fmt(&self) -> &Format;
    fn get_fmt_mut(&mut self) -> &mut Format;
}

/// Builder-style formatting for anything [`Formatted`].
pub trait FormattedExt: Formatted + Sized {
    /// Copy another item's formatting into this one.
    #[must_use]
    fn fmt_of(mut self, rhs: &dyn Formatted) -> Self {
        *self.get_fmt_mut() = rhs.get_fmt().clone();
        self
    }
    fmt_fn! {
        fg(c: Color) => fg = c,
        bg(c: Color) => bg = c,
        bold => bold = true,
    }
}

impl<F: Formatted> FormattedExt for F {}

macro_rules! fmt_type {
    (
        $( #[$($attr:meta),* $(,)?] )*
        $svis:vis struct $name:ident { $( $fvis:vis $field:ident: $type:ty ),* $(,)? }
    ) => {
        $( #[$($attr),*] )*
        $svis struct $name {
            $( $fvis $field: $type, )*
            _fmt: $crate::io::fmt::Format,
        }
        impl $crate::io::fmt::Formatted for $name {
            fn get_fmt(&self) -> &$crate::io::fmt::Format {
                &self._fmt
            }
            fn get_fmt_mut(&mut self) -> &mut $crate::io::fmt::Format {
                &mut self._fmt
            }
        }
        impl $name {
            pub const fn of( $($field: $type),* ) -> Self {
                Self {
                    $( $field, )*
                    _fmt: $crate::io::fmt::Format::NONE,
                }
            }
        }
    };
}

fmt_type!(
    /// A single bit of formatted text. Usually built through [`text!`](crate::text), as a `Vec<Text>`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Text {
        pub text: String,
    }
);

impl Text {
    pub fn plain(s: &str) -> Text {
        Text::of(s.into())
    }

    /// How many cells this text takes up on screen.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Create a series of formatted [`Text`]s.
///
/// ```
/// # use morsel::text;
/// let score = 3;
/// let line = text![bold "Score: ", "{}"(score)];
/// assert_eq!(line.len(), 2);
/// ```
#[macro_export]
macro_rules! text {
    [ $(
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ),* $(,)? ] => {
        {
            #[allow(unused_imports)]
            use $crate::io::fmt::{FormattedExt as _};
            vec![
                $(
                    $crate::io::fmt::Text::of(
                        format!( $text $(, $( $arg ),* )? )
                    ) $( . $name () )*
                ),*
            ]
        }
    };
}

fmt_type! {
    /// A single character that's been formatted. This is really only meant to be used in `Screen`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Cell { pub ch: char }
}

impl Cell {
    /// A blank cell with default formatting.
    pub const BLANK: Cell = Cell::of(' ');
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn text_macro_applies_formats() {
        let n = 4;
        let line = text![bold "lives: ", "{}"(n)];
        assert_eq!(line[0].text, "lives: ");
        assert!(line[0].get_fmt().bold);
        assert_eq!(line[0].get_fmt().fg, Format::NONE.fg);
        assert_eq!(line[1].text, "4");
        assert_eq!(line[1].get_fmt(), &Format::NONE);
    }

    #[test]
    fn bright_and_dim_round_trip() {
        assert_eq!(Color::Green.bright(), Color::BrightGreen);
        assert_eq!(Color::BrightGreen.dim(), Color::Green);
        assert_eq!(Color::BrightRed.bright(), Color::BrightRed);
    }
}
