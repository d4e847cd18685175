//! What one tick of the game looks like, independent of how it gets drawn.

use crate::{
    io::{fmt::Color, XY},
    morse::Symbol,
};

/// How many ticks a cue holds each shade before swapping to the other one.
pub const BLINK_TICKS: usize = 4;

/// The label on the button that reveals the current letter.
pub const CHEAT_LABEL: &str = " ? Cheat ";

/// Which shade of a [`Cue`]'s color it starts on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Start bright, then fade to the normal shade.
    Up,
    /// Start on the normal shade, then flash bright.
    Down,
}

/// A short background flash, e.g. after a guess. Emitted once; the renderer plays it out over `steps` ticks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cue {
    pub color: Color,
    pub direction: Direction,
    pub steps: usize,
}

impl Cue {
    pub fn correct() -> Self {
        Self {
            color: Color::Green,
            direction: Direction::Up,
            steps: BLINK_TICKS * 6,
        }
    }

    pub fn incorrect() -> Self {
        Self {
            color: Color::Red,
            direction: Direction::Down,
            steps: BLINK_TICKS * 6,
        }
    }

    /// The background color on the `step`th tick of the cue.
    pub fn shade(&self, step: usize) -> Color {
        let first = (step / BLINK_TICKS) % 2 == 0;
        match (self.direction, first) {
            (Direction::Up, true) | (Direction::Down, false) => self.color.bright(),
            _ => self.color.dim(),
        }
    }
}

/// A rectangle of cells on screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub pos: XY,
    pub size: XY,
}

impl Rect {
    pub fn contains(&self, pt: XY) -> bool {
        let end = self.pos + self.size;
        (self.pos.x()..end.x()).contains(&pt.x()) && (self.pos.y()..end.y()).contains(&pt.y())
    }
}

/// Where the cheat button goes on a screen of the given size: top right, one cell in from the edges.
pub fn cheat_button(size: XY) -> Rect {
    let width = CHEAT_LABEL.chars().count();
    Rect {
        pos: XY(size.x().saturating_sub(width + 1), 1),
        size: XY(width, 1),
    }
}

/// Spread `n` items evenly across `width` columns, returning the column of each.
///
/// The gaps at either edge are the same size as the gaps between items.
pub fn spread(n: usize, width: usize) -> Vec<usize> {
    let gap = width / (n + 1);
    (0..n).map(|i| gap * (i + 1)).collect()
}

/// Everything the renderer needs to draw one tick.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frame {
    pub background: Color,
    pub foreground: Color,
    /// Lines of text, centered as a block in the middle of the screen. The first one is the title.
    pub headings: Vec<String>,
    /// The current letter's symbols, and the column each one is centered on.
    pub morse: Vec<(Symbol, usize)>,
    pub score: Option<usize>,
    pub guessed: Vec<char>,
    pub pending: Option<char>,
    /// Remaining and maximum lives.
    pub lives: Option<(usize, usize)>,
    /// Shown on top of everything else, just above the middle row.
    pub overlay: Option<String>,
    pub cue: Option<Cue>,
    pub cheat_button: Option<Rect>,
}

impl Frame {
    /// An otherwise empty frame with the given background.
    pub fn new(background: Color) -> Self {
        Self {
            background,
            foreground: Color::BrightWhite,
            headings: vec![],
            morse: vec![],
            score: None,
            guessed: vec![],
            pending: None,
            lives: None,
            overlay: None,
            cue: None,
            cheat_button: None,
        }
    }

    /// Set the heading lines.
    pub fn headings<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.headings = lines.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn spread_is_even() {
        assert_eq!(spread(3, 100), vec![25, 50, 75]);
        assert_eq!(spread(1, 10), vec![5]);
        assert_eq!(spread(0, 10), Vec::<usize>::new());
    }

    #[test]
    fn spread_stays_on_screen() {
        for n in 1..=4 {
            for width in 0..40 {
                assert!(spread(n, width).iter().all(|&col| col < width.max(1)));
            }
        }
    }

    #[test]
    fn cue_blinks() {
        let cue = Cue::correct();
        assert_eq!(cue.shade(0), Color::BrightGreen);
        assert_eq!(cue.shade(BLINK_TICKS - 1), Color::BrightGreen);
        assert_eq!(cue.shade(BLINK_TICKS), Color::Green);
        assert_eq!(cue.shade(BLINK_TICKS * 2), Color::BrightGreen);
    }

    #[test]
    fn wrong_guesses_flash_late() {
        let cue = Cue::incorrect();
        assert_eq!(cue.direction, Direction::Down);
        assert_eq!(cue.shade(0), Color::Red);
        assert_eq!(cue.shade(BLINK_TICKS), Color::BrightRed);
        assert_eq!(cue.shade(BLINK_TICKS * 2), Color::Red);
    }

    #[test]
    fn cheat_button_hit_test() {
        let button = cheat_button(XY(80, 24));
        assert_eq!(button.pos, XY(80 - CHEAT_LABEL.len() - 1, 1));
        assert!(button.contains(XY(75, 1)));
        assert!(!button.contains(XY(75, 2)));
        assert!(!button.contains(XY(79, 1)));
        assert!(!button.contains(XY(button.pos.x() - 1, 1)));
    }
}
