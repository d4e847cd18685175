//! Which screen is showing, and how input moves the game between them.
//!
//! The flow is `Start → Instructions → Playing`, with `Playing` briefly flipping to `Cheat` to reveal a letter, and
//! going to `GameOver` when the lives run out. Any time a word can't be drawn the game shows `Unavailable` until the
//! player asks it to try again. Escape or closing the window quits from anywhere.

use std::time::Duration;

use tracing::{debug, error, info, trace};

use crate::{
    frame::{self, Cue, Frame},
    io::{fmt::Color, Action, Key, MouseButton, XY},
    morse,
    render::RenderContext,
    round::{Guess, RoundState},
    timing::Instant,
    words::{Fetch, WordSource, MIN_WORD_SIZE},
    Error, Result,
};

/// Tells the runner what to do after the controller handled something.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Response {
    /// Nothing in particular needs to be done.
    Nothing,
    /// The visual state has updated, and the screen needs to be redrawn.
    Redraw,
    /// The game should be exited.
    Quit,
}

/// The knobs of the game itself, as opposed to the program around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub min_size: usize,
    pub max_size: usize,
    pub max_lives: usize,
    /// How long the current letter stays revealed.
    pub cheat_duration: Duration,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            min_size: MIN_WORD_SIZE,
            max_size: 4,
            max_lives: 5,
            cheat_duration: Duration::from_secs(1),
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<()> {
        if self.min_size == 0 {
            return Err(Error::invalid_config("minimum word size must be at least 1"));
        }
        if self.max_size < self.min_size {
            return Err(Error::invalid_config(format!(
                "maximum word size {} is below the minimum {}",
                self.max_size, self.min_size
            )));
        }
        if self.max_lives == 0 {
            return Err(Error::invalid_config("the player needs at least one life"));
        }
        Ok(())
    }
}

/// The screen the player is looking at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Start,
    Instructions,
    Playing,
    /// The current letter is revealed until the given time.
    Cheat { until: Instant },
    /// The last life was lost on `word`.
    GameOver { word: String, score: usize },
    /// No word could be drawn; any key tries again.
    Unavailable { reason: String },
}

/// Drives the whole game. Owns the round and the word source, and describes what to draw.
pub struct ScreenController<F: Fetch + Clone> {
    settings: GameSettings,
    fetcher: F,
    words: Option<WordSource<F>>,
    round: Option<RoundState>,
    stage: Stage,
    /// Whether this tick already had a transition.
    acted: bool,
    cue: Option<Cue>,
    cheat_button: Option<frame::Rect>,
}

/// A key let go which counts as "any key".
fn any_key(action: &Action) -> bool {
    matches!(action, Action::KeyRelease { key } if !key.is_modifier())
}

impl<F: Fetch + Clone> ScreenController<F> {
    /// Nothing is fetched until the player gets past the instructions.
    pub fn new(settings: GameSettings, fetcher: F) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            fetcher,
            words: None,
            round: None,
            stage: Stage::Start,
            acted: false,
            cue: None,
            cheat_button: None,
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    fn transition(&mut self, to: Stage) -> Response {
        debug!(from = ?self.stage, to = ?to, "changing stage");
        self.stage = to;
        self.acted = true;
        Response::Redraw
    }

    /// Draw a word, creating the word source first if this is the first time.
    fn draw_word(&mut self) -> Result<String> {
        let words = match self.words.take() {
            Some(words) => words,
            None => WordSource::with_sizes(self.fetcher.clone(), self.settings.min_size, self.settings.max_size)?,
        };
        self.words.insert(words).next_word()
    }

    /// Put a new word in front of the player, starting a fresh round if there isn't one.
    fn begin_word(&mut self) -> Response {
        match self.draw_word() {
            Ok(word) => {
                match &mut self.round {
                    Some(round) => round.start_word(&word),
                    None => self.round = Some(RoundState::new(&word, self.settings.max_lives)),
                }
                self.transition(Stage::Playing)
            }
            Err(e) => {
                error!("can't start a word: {}", e);
                self.transition(Stage::Unavailable {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn reveal(&mut self) -> Response {
        info!("revealing the current letter");
        let until = Instant::now() + self.settings.cheat_duration;
        self.transition(Stage::Cheat { until })
    }

    fn guess(&mut self, ch: char) -> Response {
        let Some(round) = &mut self.round else {
            return Response::Nothing;
        };
        let target = round.target();
        let res = round.guess(ch);
        trace!(guess = %ch, %target, result = ?res, "guessed");
        match res {
            Guess::Ignored => Response::Nothing,
            Guess::Correct => {
                self.cue = Some(Cue::correct());
                self.acted = true;
                Response::Redraw
            }
            Guess::Completed => {
                self.cue = Some(Cue::correct());
                self.begin_word()
            }
            Guess::Incorrect => {
                self.cue = Some(Cue::incorrect());
                self.acted = true;
                Response::Redraw
            }
            Guess::Lost => {
                let (word, score) = (round.word(), round.score());
                info!(%word, score, "out of lives");
                self.cue = Some(Cue::incorrect());
                self.transition(Stage::GameOver { word, score })
            }
        }
    }

    /// Handle one input from the player.
    pub fn input(&mut self, action: Action) -> Response {
        if action.is_cancel() {
            info!("quit requested");
            return Response::Quit;
        }
        if action == Action::Redraw {
            return Response::Redraw;
        }
        if self.acted {
            trace!(?action, "already acted this tick, ignoring");
            return Response::Nothing;
        }

        match &self.stage {
            Stage::Start if any_key(&action) => self.transition(Stage::Instructions),
            Stage::Instructions if any_key(&action) => self.begin_word(),
            Stage::Playing => match action {
                Action::KeyPress { key: Key::Char(ch) } => {
                    let Some(round) = &mut self.round else {
                        return Response::Nothing;
                    };
                    let before = round.pending_guess();
                    round.press(ch);
                    if round.pending_guess() == before {
                        Response::Nothing
                    } else {
                        Response::Redraw
                    }
                }
                Action::KeyRelease { key: Key::Char('?') } => self.reveal(),
                Action::KeyRelease { key: Key::Char(ch) } => self.guess(ch),
                Action::MouseRelease {
                    pos,
                    button: MouseButton::Left,
                } if self.cheat_button.map_or(false, |b| b.contains(pos)) => self.reveal(),
                _ => Response::Nothing,
            },
            Stage::GameOver { .. } if any_key(&action) => {
                self.round = None;
                self.begin_word()
            }
            Stage::Unavailable { .. } if any_key(&action) => self.begin_word(),
            _ => Response::Nothing,
        }
    }

    /// Start a new tick. Expires the cheat once it's been up long enough.
    pub fn tick(&mut self) -> Response {
        self.acted = false;
        match &self.stage {
            Stage::Cheat { until } if Instant::now() >= *until => self.transition(Stage::Playing),
            _ => Response::Nothing,
        }
    }

    fn playing_frame(&mut self, size: XY) -> Frame {
        let mut frame = Frame::new(Color::BrightWhite);
        frame.foreground = Color::Black;
        let Some(round) = &self.round else {
            return frame;
        };

        let target = round.target();
        match morse::encode(target) {
            Ok(symbols) => {
                let cols = frame::spread(symbols.len(), size.x());
                frame.morse = symbols.iter().copied().zip(cols).collect();
            }
            Err(e) => error!("can't show the current letter: {}", e),
        }
        frame.score = Some(round.score());
        frame.guessed = round.guessed_letters().to_vec();
        frame.pending = round.pending_guess();
        frame.lives = Some((round.lives(), round.max_lives()));
        if let Stage::Cheat { .. } = self.stage {
            frame.overlay = Some(format!("The letter is {}", target));
        }

        let button = frame::cheat_button(size);
        frame.cheat_button = Some(button);
        self.cheat_button = Some(button);
        frame
    }

    /// Describe what the display should show right now, on a display of the given size.
    ///
    /// Any cue emitted since the last frame is handed off with this one.
    pub fn frame(&mut self, size: XY) -> Frame {
        self.cheat_button = None;
        let mut frame = match &self.stage {
            Stage::Start => Frame::new(Color::Red).headings(["Morse Code", "", "Press any key to start"]),
            Stage::Instructions => Frame::new(Color::BrightBlack).headings([
                "Instructions",
                "",
                "1. Each letter in a word is represented by a sequence of dots and dashes.",
                "2. Your mission is to enter the correct letter for each sequence of dots & dashes.",
                "",
                "Press any key to begin. Press ? or click Cheat to reveal a letter, Esc to quit.",
            ]),
            Stage::Playing | Stage::Cheat { .. } => self.playing_frame(size),
            Stage::GameOver { word, score } => Frame::new(Color::Black).headings([
                "Game Over".to_owned(),
                String::new(),
                format!("The word was {}", word),
                format!("Final score: {}", score),
                String::new(),
                "Press any key to play again".to_owned(),
            ]),
            Stage::Unavailable { reason } => Frame::new(Color::Black).headings([
                "Unable to fetch words".to_owned(),
                String::new(),
                reason.clone(),
                String::new(),
                "Press any key to try again".to_owned(),
            ]),
        };
        frame.cue = self.cue.take();
        frame
    }

    /// Build the current frame and present it.
    pub fn render(&mut self, ctx: &mut RenderContext) -> Result<()> {
        let frame = self.frame(ctx.size());
        ctx.present(&frame)
    }
}

#[cfg(test)]
mod test {
    use std::{cell::Cell, rc::Rc};

    use mock_instant::MockClock;
    use tracing_test::traced_test;

    use crate::words::test::{DownFetcher, StaticFetcher};

    use super::*;

    const SIZE: XY = XY(80, 24);

    fn press(ch: char) -> Action {
        Action::KeyPress { key: Key::Char(ch) }
    }

    fn release(ch: char) -> Action {
        Action::KeyRelease { key: Key::Char(ch) }
    }

    /// Type a letter: press, release, and move on to the next tick.
    fn type_letter<F: Fetch + Clone>(ctl: &mut ScreenController<F>, ch: char) -> Response {
        ctl.input(press(ch));
        let res = ctl.input(release(ch));
        ctl.tick();
        res
    }

    fn playing(words: &[&str]) -> ScreenController<StaticFetcher> {
        let mut ctl = ScreenController::new(GameSettings::default(), StaticFetcher::new(words)).unwrap();
        ctl.input(release(' '));
        ctl.tick();
        ctl.input(release(' '));
        ctl.tick();
        assert_eq!(ctl.stage(), &Stage::Playing);
        ctl
    }

    /// Fails while `down` is set, otherwise serves a fixed list.
    #[derive(Clone)]
    struct FlakyFetcher {
        down: Rc<Cell<bool>>,
        inner: StaticFetcher,
    }

    impl Fetch for FlakyFetcher {
        fn fetch(&mut self) -> Result<String> {
            if self.down.get() {
                Err(Error::unavailable("connection reset"))
            } else {
                self.inner.fetch()
            }
        }
    }

    #[test]
    fn start_to_instructions_to_playing() {
        let fetcher = StaticFetcher::new(&["cat"]);
        let calls = fetcher.calls.clone();
        let mut ctl = ScreenController::new(GameSettings::default(), fetcher).unwrap();
        assert_eq!(ctl.stage(), &Stage::Start);
        assert_eq!(ctl.input(release('x')), Response::Redraw);
        assert_eq!(ctl.stage(), &Stage::Instructions);
        assert_eq!(calls.get(), 0);
        ctl.tick();
        ctl.input(Action::KeyRelease { key: Key::Enter });
        assert_eq!(ctl.stage(), &Stage::Playing);
        let round = ctl.round().unwrap();
        assert_eq!(round.word(), "CAT");
        assert_eq!((round.score(), round.lives(), round.letter_index()), (0, 5, 0));
    }

    #[test]
    fn invalid_settings_rejected_up_front() {
        let settings = GameSettings {
            max_size: 2,
            ..Default::default()
        };
        let res = ScreenController::new(settings, StaticFetcher::new(&["cat"]));
        assert!(matches!(res, Err(Error::InvalidConfiguration(_))));
        let settings = GameSettings {
            max_lives: 0,
            ..Default::default()
        };
        assert!(ScreenController::new(settings, StaticFetcher::new(&["cat"])).is_err());
    }

    #[test]
    fn correct_then_wrong() {
        let mut ctl = playing(&["cat"]);
        type_letter(&mut ctl, 'c');
        let round = ctl.round().unwrap();
        assert_eq!((round.score(), round.letter_index(), round.lives()), (1, 1, 5));
        assert_eq!(ctl.frame(SIZE).cue, Some(Cue::correct()));

        type_letter(&mut ctl, 'x');
        let round = ctl.round().unwrap();
        assert_eq!((round.score(), round.letter_index(), round.lives()), (1, 1, 4));
        assert_eq!(round.guessed_letters(), &['X']);
        assert_eq!(ctl.frame(SIZE).cue, Some(Cue::incorrect()));
        // cues only go out once
        assert_eq!(ctl.frame(SIZE).cue, None);
    }

    #[test]
    fn finishing_a_word_draws_another() {
        let fetcher = StaticFetcher::new(&["cat"]);
        let calls = fetcher.calls.clone();
        let mut ctl = ScreenController::new(GameSettings::default(), fetcher).unwrap();
        for _ in 0..2 {
            ctl.input(release(' '));
            ctl.tick();
        }
        for ch in "cat".chars() {
            type_letter(&mut ctl, ch);
        }
        assert_eq!(ctl.stage(), &Stage::Playing);
        let round = ctl.round().unwrap();
        assert_eq!((round.score(), round.letter_index()), (3, 0));
        assert_eq!(round.word(), "CAT");
        // the one-word bag had to be refilled
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn pending_guess_shows_until_released() {
        let mut ctl = playing(&["cat"]);
        assert_eq!(ctl.input(press('q')), Response::Redraw);
        assert_eq!(ctl.frame(SIZE).pending, Some('Q'));
        assert_eq!(ctl.input(press('q')), Response::Nothing);
        ctl.input(release('q'));
        assert_eq!(ctl.frame(SIZE).pending, None);
    }

    #[test]
    fn non_letters_do_nothing() {
        let mut ctl = playing(&["cat"]);
        let before = ctl.round().cloned();
        assert_eq!(type_letter(&mut ctl, '5'), Response::Nothing);
        assert_eq!(ctl.input(Action::KeyRelease { key: Key::Tab }), Response::Nothing);
        assert_eq!(ctl.round().cloned(), before);
    }

    #[test]
    fn game_over_and_restart() {
        let mut ctl = playing(&["cat", "dog"]);
        let word = ctl.round().unwrap().word();
        let wrong = if word.starts_with('Q') { 'z' } else { 'q' };
        type_letter(&mut ctl, word.chars().next().unwrap());
        for _ in 0..5 {
            type_letter(&mut ctl, wrong);
        }
        assert_eq!(
            ctl.stage(),
            &Stage::GameOver {
                word: word.clone(),
                score: 1
            }
        );
        let headings = ctl.frame(SIZE).headings;
        assert!(headings.contains(&format!("The word was {}", word)));
        assert!(headings.contains(&"Final score: 1".to_owned()));

        // modifiers alone don't count as a key
        ctl.input(Action::KeyRelease { key: Key::LeftShift });
        assert!(matches!(ctl.stage(), Stage::GameOver { .. }));

        ctl.input(release('a'));
        assert_eq!(ctl.stage(), &Stage::Playing);
        let round = ctl.round().unwrap();
        assert_eq!((round.score(), round.lives(), round.letter_index()), (0, 5, 0));
        assert!(round.guessed_letters().is_empty());
    }

    #[test]
    fn cheat_reveals_without_changing_anything() {
        let mut ctl = playing(&["cat"]);
        type_letter(&mut ctl, 'x');
        let before = ctl.round().cloned();

        ctl.input(release('?'));
        assert!(matches!(ctl.stage(), Stage::Cheat { .. }));
        assert_eq!(ctl.frame(SIZE).overlay.as_deref(), Some("The letter is C"));
        // input is ignored while the letter is up
        ctl.tick();
        type_letter(&mut ctl, 'c');
        assert!(matches!(ctl.stage(), Stage::Cheat { .. }));
        assert_eq!(ctl.round().cloned(), before);

        MockClock::advance(Duration::from_millis(1100));
        assert_eq!(ctl.tick(), Response::Redraw);
        assert_eq!(ctl.stage(), &Stage::Playing);
        assert_eq!(ctl.round().cloned(), before);
        assert_eq!(ctl.frame(SIZE).overlay, None);
    }

    #[test]
    fn cheat_button_click() {
        let mut ctl = playing(&["cat"]);
        let button = ctl.frame(SIZE).cheat_button.unwrap();
        let miss = Action::MouseRelease {
            pos: XY(0, 0),
            button: MouseButton::Left,
        };
        assert_eq!(ctl.input(miss), Response::Nothing);
        let hit = Action::MouseRelease {
            pos: button.pos,
            button: MouseButton::Left,
        };
        assert_eq!(ctl.input(hit), Response::Redraw);
        assert!(matches!(ctl.stage(), Stage::Cheat { .. }));
    }

    #[test]
    fn cancel_quits_from_everywhere() {
        let cancels = [
            Action::Closed,
            Action::KeyPress { key: Key::Escape },
            Action::KeyRelease { key: Key::Escape },
        ];
        let mut ctl = ScreenController::new(GameSettings::default(), StaticFetcher::new(&["cat"])).unwrap();
        let check = |ctl: &mut ScreenController<StaticFetcher>| {
            for cancel in &cancels {
                assert_eq!(ctl.input(cancel.clone()), Response::Quit, "in {:?}", ctl.stage());
            }
        };
        check(&mut ctl);
        ctl.input(release(' '));
        check(&mut ctl);
        ctl.tick();
        ctl.input(release(' '));
        check(&mut ctl);
        ctl.tick();
        ctl.input(release('?'));
        check(&mut ctl);

        let mut down = ScreenController::new(GameSettings::default(), DownFetcher).unwrap();
        down.input(release(' '));
        down.tick();
        down.input(release(' '));
        assert!(matches!(down.stage(), Stage::Unavailable { .. }));
        assert_eq!(down.input(Action::Closed), Response::Quit);
    }

    #[test]
    fn one_transition_per_tick() {
        let mut ctl = ScreenController::new(GameSettings::default(), StaticFetcher::new(&["cat"])).unwrap();
        ctl.input(release('a'));
        ctl.input(release('b'));
        assert_eq!(ctl.stage(), &Stage::Instructions);
        ctl.tick();
        ctl.input(release('a'));
        ctl.input(release('c'));
        assert_eq!(ctl.stage(), &Stage::Playing);
        assert_eq!(ctl.round().unwrap().letter_index(), 0);
        ctl.tick();
        ctl.input(release('c'));
        ctl.input(release('a'));
        assert_eq!(ctl.round().unwrap().letter_index(), 1);
    }

    #[test]
    fn unavailable_then_recovers() {
        let down = Rc::new(Cell::new(true));
        let fetcher = FlakyFetcher {
            down: down.clone(),
            inner: StaticFetcher::new(&["cat"]),
        };
        let mut ctl = ScreenController::new(GameSettings::default(), fetcher).unwrap();
        ctl.input(release(' '));
        ctl.tick();
        ctl.input(release(' '));
        assert!(matches!(ctl.stage(), Stage::Unavailable { .. }));
        assert_eq!(ctl.frame(SIZE).headings[0], "Unable to fetch words");
        assert!(ctl.round().is_none());

        ctl.tick();
        ctl.input(release(' '));
        assert!(matches!(ctl.stage(), Stage::Unavailable { .. }));

        down.set(false);
        ctl.tick();
        ctl.input(release(' '));
        assert_eq!(ctl.stage(), &Stage::Playing);
        assert_eq!(ctl.round().unwrap().word(), "CAT");
    }

    #[test]
    #[traced_test]
    fn unavailability_is_logged() {
        let mut ctl = ScreenController::new(GameSettings::default(), DownFetcher).unwrap();
        ctl.input(release(' '));
        ctl.tick();
        ctl.input(release(' '));
        assert!(logs_contain("can't start a word"));
        assert!(logs_contain("connection refused"));
    }

    #[test]
    fn losing_the_source_mid_round_keeps_the_round() {
        let down = Rc::new(Cell::new(false));
        let fetcher = FlakyFetcher {
            down: down.clone(),
            inner: StaticFetcher::new(&["cat"]),
        };
        let mut ctl = ScreenController::new(GameSettings::default(), fetcher).unwrap();
        for _ in 0..2 {
            ctl.input(release(' '));
            ctl.tick();
        }
        down.set(true);
        for ch in "cat".chars() {
            type_letter(&mut ctl, ch);
        }
        assert!(matches!(ctl.stage(), Stage::Unavailable { .. }));
        let round = ctl.round().unwrap();
        assert_eq!(round.score(), 3);
        assert!(round.letter_index() < round.word().len());

        down.set(false);
        ctl.input(release(' '));
        assert_eq!(ctl.stage(), &Stage::Playing);
        assert_eq!(ctl.round().unwrap().score(), 3);
        assert_eq!(ctl.round().unwrap().letter_index(), 0);
    }

    #[test]
    fn playing_frame_describes_the_round() {
        let mut ctl = playing(&["cat"]);
        type_letter(&mut ctl, 'x');
        let frame = ctl.frame(SIZE);
        assert_eq!(frame.background, Color::BrightWhite);
        // C is -.-.
        let symbols: Vec<_> = frame.morse.iter().map(|(s, _)| s.to_string()).collect();
        assert_eq!(symbols.concat(), "-.-.");
        assert_eq!(frame.morse.iter().map(|(_, col)| *col).collect::<Vec<_>>(), vec![16, 32, 48, 64]);
        assert_eq!(frame.score, Some(0));
        assert_eq!(frame.guessed, vec!['X']);
        assert_eq!(frame.lives, Some((4, 5)));
        assert!(frame.cheat_button.is_some());
    }

    #[test]
    fn start_frames() {
        let mut ctl = ScreenController::new(GameSettings::default(), StaticFetcher::new(&["cat"])).unwrap();
        let frame = ctl.frame(SIZE);
        assert_eq!(frame.background, Color::Red);
        assert_eq!(frame.headings[0], "Morse Code");
        assert_eq!(frame.cheat_button, None);
        ctl.input(release(' '));
        assert_eq!(ctl.frame(SIZE).headings[0], "Instructions");
    }
}
