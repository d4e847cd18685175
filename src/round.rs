//! The state of one play session: which word, which letter, how many lives are left.

/// What a guess did to the round.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Guess {
    /// Right letter; move on to the next one in the word.
    Correct,
    /// Right letter, and it was the last one. The caller needs to [`RoundState::start_word`] a new word.
    Completed,
    /// Wrong letter; a life was lost but there are more.
    Incorrect,
    /// Wrong letter, and that was the last life.
    Lost,
    /// Not a letter at all. Nothing happened.
    Ignored,
}

/// Normalize a typed character into a guessable letter, if it is one.
pub fn normalize(ch: char) -> Option<char> {
    ch.is_ascii_alphabetic().then(|| ch.to_ascii_uppercase())
}

/// One play session's worth of progress.
///
/// `letter_index` always points at a letter of `word`. Finishing a word leaves it on the last letter until
/// [`Self::start_word`] installs the next one, so a failed draw can't leave it dangling.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RoundState {
    word: Vec<char>,
    letter_index: usize,
    score: usize,
    lives: usize,
    max_lives: usize,
    guessed_letters: Vec<char>,
    pending_guess: Option<char>,
}

impl RoundState {
    /// Start a fresh round on `word` with a full set of lives.
    ///
    /// Anything in `word` that isn't an ASCII letter is dropped.
    ///
    /// # Panics
    ///
    /// If `word` has no ASCII letters at all. [`crate::words::WordSource`] only hands out words that do.
    pub fn new(word: &str, max_lives: usize) -> Self {
        let mut res = Self {
            word: vec![],
            letter_index: 0,
            score: 0,
            lives: max_lives,
            max_lives,
            guessed_letters: vec![],
            pending_guess: None,
        };
        res.start_word(word);
        res
    }

    /// Move on to a new word, keeping score and lives.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`Self::new`]. The old word is left untouched if it does.
    pub fn start_word(&mut self, word: &str) {
        let letters: Vec<char> = word.chars().filter_map(normalize).collect();
        assert!(!letters.is_empty(), "no letters to guess in {:?}", word);
        self.word = letters;
        self.letter_index = 0;
        self.guessed_letters.clear();
        self.pending_guess = None;
    }

    /// A key is held down; remember it so it can be shown before it's committed.
    pub fn press(&mut self, ch: char) {
        if let Some(ch) = normalize(ch) {
            self.pending_guess = Some(ch);
        }
    }

    /// Commit a guess for the current letter.
    pub fn guess(&mut self, ch: char) -> Guess {
        let Some(guess) = normalize(ch) else {
            return Guess::Ignored;
        };
        self.pending_guess = None;
        if guess == self.target() {
            self.score += 1;
            self.guessed_letters.clear();
            if self.letter_index + 1 == self.word.len() {
                Guess::Completed
            } else {
                self.letter_index += 1;
                Guess::Correct
            }
        } else {
            self.guessed_letters.push(guess);
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                Guess::Lost
            } else {
                Guess::Incorrect
            }
        }
    }

    /// The letter the player is currently trying to guess.
    pub fn target(&self) -> char {
        self.word[self.letter_index]
    }

    pub fn word(&self) -> String {
        self.word.iter().collect()
    }

    pub fn letter_index(&self) -> usize {
        self.letter_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn lives(&self) -> usize {
        self.lives
    }

    pub fn max_lives(&self) -> usize {
        self.max_lives
    }

    /// Wrong guesses made against the current letter, oldest first.
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed_letters
    }

    pub fn pending_guess(&self) -> Option<char> {
        self.pending_guess
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }
}
