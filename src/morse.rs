//! The Morse alphabet, A through Z.

use core::fmt;

use crate::{Error, Result};

/// One element of a Morse sequence.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    /// How the symbol is drawn on screen.
    pub fn glyph(&self) -> &'static str {
        match self {
            Symbol::Dot => "●",
            Symbol::Dash => "━━━",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Dot => write!(f, "."),
            Symbol::Dash => write!(f, "-"),
        }
    }
}

/// Get the Morse sequence for an uppercase ASCII letter.
///
/// Anything else, lowercase letters included, is an [`Error::UnknownLetter`]. Normalize before calling.
pub fn encode(letter: char) -> Result<&'static [Symbol]> {
    use Symbol::{Dash, Dot};
    let seq: &'static [Symbol] = match letter {
        'A' => &[Dot, Dash],
        'B' => &[Dash, Dot, Dot, Dot],
        'C' => &[Dash, Dot, Dash, Dot],
        'D' => &[Dash, Dot, Dot],
        'E' => &[Dot],
        'F' => &[Dot, Dot, Dash, Dot],
        'G' => &[Dash, Dash, Dot],
        'H' => &[Dot, Dot, Dot, Dot],
        'I' => &[Dot, Dot],
        'J' => &[Dot, Dash, Dash, Dash],
        'K' => &[Dash, Dot, Dash],
        'L' => &[Dot, Dash, Dot, Dot],
        'M' => &[Dash, Dash],
        'N' => &[Dash, Dot],
        'O' => &[Dash, Dash, Dash],
        'P' => &[Dot, Dash, Dash, Dot],
        'Q' => &[Dash, Dash, Dot, Dash],
        'R' => &[Dot, Dash, Dot],
        'S' => &[Dot, Dot, Dot],
        'T' => &[Dash],
        'U' => &[Dot, Dot, Dash],
        'V' => &[Dot, Dot, Dot, Dash],
        'W' => &[Dot, Dash, Dash],
        'X' => &[Dash, Dot, Dot, Dash],
        'Y' => &[Dash, Dot, Dash, Dash],
        'Z' => &[Dash, Dash, Dot, Dot],
        other => return Err(Error::UnknownLetter(other)),
    };
    Ok(seq)
}

#[cfg(test)]
mod test {
    use super::*;

    fn dotted(letter: char) -> String {
        encode(letter).unwrap().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn every_letter_has_a_sequence() {
        for letter in 'A'..='Z' {
            let seq = encode(letter).unwrap();
            assert!(!seq.is_empty(), "{} has no symbols", letter);
            assert!(seq.len() <= 4, "{} has too many symbols", letter);
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        for letter in 'A'..='Z' {
            assert_eq!(encode(letter).unwrap(), encode(letter).unwrap());
        }
    }

    #[test]
    fn sequences_are_distinct() {
        let mut all: Vec<_> = ('A'..='Z').map(dotted).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 26);
    }

    #[test]
    fn known_letters() {
        assert_eq!(dotted('A'), ".-");
        assert_eq!(dotted('E'), ".");
        assert_eq!(dotted('Q'), "--.-");
        assert_eq!(dotted('S'), "...");
        assert_eq!(dotted('O'), "---");
        assert_eq!(dotted('T'), "-");
    }

    #[test]
    fn rejects_non_letters() {
        for ch in ['a', 'z', '1', ' ', '?', 'É'] {
            match encode(ch) {
                Err(Error::UnknownLetter(c)) => assert_eq!(c, ch),
                other => panic!("expected UnknownLetter for {:?}, got {:?}", ch, other),
            }
        }
    }
}
