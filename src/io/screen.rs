//! The character grid everything gets drawn onto before it's handed to the display.

use core::ops;

use super::{
    fmt::{Cell, Color, Formatted, FormattedExt, Text},
    XY,
};

/// A text framebuffer.
///
/// Render things onto it, then hand it to an [`IoSystem`](super::sys::IoSystem) to display. This avoids flickering
/// and partial renders.
pub struct Screen {
    cells: Vec<Cell>,
    size: XY,
}

impl Screen {
    /// Create a new `Screen` in the given size.
    pub fn new(size: XY) -> Self {
        let mut res = Self {
            cells: vec![],
            size: XY(0, 0),
        };
        res.resize(size);
        res
    }

    /// How big this Screen is, in characters.
    pub fn size(&self) -> XY {
        self.size
    }

    /// Returns an iterator over the rows in a screen.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // `max(1)` so an empty screen yields no rows instead of panicking
        self.cells.chunks(self.size.x().max(1))
    }

    /// Resize the screen, clearing its contents at the same time. Does not reallocate unless the screen is growing.
    pub fn resize(&mut self, size: XY) {
        self.cells.truncate(0);
        self.cells.resize(size.x() * size.y(), Cell::BLANK);
        self.size = size;
    }

    /// Paint every cell's background, keeping its character.
    pub fn fill(&mut self, bg: Color) {
        for cell in &mut self.cells {
            cell.get_fmt_mut().bg = bg;
        }
    }

    /// Write some formatted text to the position on screen, keeping each cell's background.
    ///
    /// Doesn't handle newlines. Anything that would land off the screen is dropped.
    pub fn write(&mut self, pos: XY, text: Vec<Text>) {
        let XY(mut x, y) = pos;
        if y >= self.size.y() {
            return;
        }
        for chunk in text {
            for ch in chunk.text.chars() {
                if x >= self.size.x() {
                    return;
                }
                let bg = self[y][x].get_fmt().bg;
                self[y][x] = Cell::of(ch).fmt_of(&chunk).bg(bg);
                x += 1;
            }
        }
    }

    /// Write text so it's horizontally centered on row `y`.
    pub fn write_centered(&mut self, y: usize, text: Vec<Text>) {
        let width: usize = text.iter().map(Text::width).sum();
        let x = self.size.x().saturating_sub(width) / 2;
        self.write(XY(x, y), text)
    }

    /// The screen's contents as plain text, one line per row, trailing spaces trimmed.
    pub fn plain_text(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|c| c.ch).collect::<String>().trim_end().to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ops::Index<usize> for Screen {
    type Output = [Cell];
    fn index(&self, row: usize) -> &Self::Output {
        let start = row * self.size.x();
        let end = start + self.size.x();
        &self.cells[start..end]
    }
}

impl ops::IndexMut<usize> for Screen {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        let start = row * self.size.x();
        let end = start + self.size.x();
        &mut self.cells[start..end]
    }
}
