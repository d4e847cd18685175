//! Turns [`Frame`]s into something on the display.

use crate::{
    frame::{Cue, Frame, CHEAT_LABEL},
    io::{
        fmt::{Color, FormattedExt, Text},
        sys::IoSystem,
        Action, Screen, XY,
    },
    text, Result,
};

/// Owns the display for the whole run of the program.
///
/// The backend is stopped (e.g. the terminal restored) when this is dropped.
pub struct RenderContext {
    iosys: Box<dyn IoSystem>,
    screen: Screen,
    /// The cue being played, and how far into it we are.
    cue: Option<(Cue, usize)>,
}

impl RenderContext {
    pub fn new(mut iosys: Box<dyn IoSystem>, caption: &str) -> Result<Self> {
        iosys.set_title(caption)?;
        let screen = Screen::new(iosys.size());
        Ok(Self {
            iosys,
            screen,
            cue: None,
        })
    }

    pub fn size(&self) -> XY {
        self.iosys.size()
    }

    /// The next pending input, if there is one.
    pub fn poll_input(&mut self) -> Result<Option<Action>> {
        self.iosys.poll_input()
    }

    /// Whether a cue is still playing, so the display needs redrawing even if nothing else changed.
    pub fn animating(&self) -> bool {
        self.cue.is_some()
    }

    /// Paint a frame and put it on the display.
    pub fn present(&mut self, frame: &Frame) -> Result<()> {
        if let Some(cue) = frame.cue {
            self.cue = Some((cue, 0));
        }
        let background = match &mut self.cue {
            Some((cue, step)) => {
                let shade = cue.shade(*step);
                *step += 1;
                if *step >= cue.steps {
                    self.cue = None;
                }
                shade
            }
            None => frame.background,
        };

        self.screen.resize(self.iosys.size());
        self.screen.fill(background);
        paint(&mut self.screen, frame);
        self.iosys.draw(&self.screen)
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        self.iosys.stop();
    }
}

fn tint(line: Vec<Text>, color: Color) -> Vec<Text> {
    line.into_iter().map(|t| t.fg(color)).collect()
}

fn paint(screen: &mut Screen, frame: &Frame) {
    let size = screen.size();
    let middle = size.y() / 2;
    let fg = frame.foreground;

    let top = middle.saturating_sub(frame.headings.len() / 2);
    for (i, line) in frame.headings.iter().enumerate() {
        let mut line = tint(vec![Text::plain(line)], fg);
        if i == 0 {
            line = line.into_iter().map(|t| t.bold()).collect();
        }
        screen.write_centered(top + i, line);
    }

    for &(symbol, col) in &frame.morse {
        let glyph = symbol.glyph();
        let x = col.saturating_sub(glyph.chars().count() / 2);
        screen.write(XY(x, middle), tint(text![bold "{}"(glyph)], fg));
    }

    if let Some(score) = frame.score {
        screen.write(XY(2, 1), tint(text![bold "Score: ", "{}"(score)], fg));
    }

    if let Some(button) = frame.cheat_button {
        let label = text!["{}"(CHEAT_LABEL)]
            .into_iter()
            .map(|t| t.fg(Color::BrightWhite).bg(Color::Red).bold())
            .collect();
        screen.write(button.pos, label);
    }

    if let Some(letter) = frame.pending {
        screen.write_centered(middle + 2, tint(text![bold "{}"(letter)], fg));
    }

    if !frame.guessed.is_empty() {
        let letters: Vec<String> = frame.guessed.iter().map(char::to_string).collect();
        let mut line = tint(text!["Guessed: "], fg);
        line.push(Text::plain(&letters.join(" ")).fg(Color::Red).bold());
        screen.write_centered(size.y().saturating_sub(3), line);
    }

    if let Some((lives, max_lives)) = frame.lives {
        let mut line = tint(text!["Lives "], fg);
        line.push(Text::plain(&"■".repeat(lives)).fg(Color::Green));
        line.push(Text::plain(&"□".repeat(max_lives.saturating_sub(lives))).fg(Color::BrightBlack));
        screen.write_centered(size.y().saturating_sub(2), line);
    }

    if let Some(overlay) = &frame.overlay {
        let line = text![bold " {} "(overlay)]
            .into_iter()
            .map(|t| t.fg(Color::Black).bg(Color::BrightYellow))
            .collect();
        screen.write_centered(middle.saturating_sub(3), line);
    }
}
