//! Numeric catalog lookup.
//!
//! Visitors type the number printed next to a piece; after every digit
//! the pad is matched against the exhibition's dataset. Input is capped
//! at three digits and compared numerically, so leading zeros are
//! harmless.

use serde::{Deserialize, Serialize};

use crate::content::{Artwork, ArtworkCollection};

/// Maximum digits the pad accepts.
pub const MAX_DIGITS: usize = 3;

/// State of a lookup after a digit or clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome<'a> {
    /// No digits entered.
    Empty,
    /// Digits entered but no artwork carries that number.
    NotFound,
    /// An artwork matched.
    Found(&'a Artwork),
}

/// Digit accumulator for the number screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberPad {
    digits: String,
}

impl NumberPad {
    /// Create an empty pad.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Returns false (and changes nothing) for non-digit
    /// input or once the pad is full.
    pub fn push_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() || self.digits.len() >= MAX_DIGITS {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// The entered digits in order.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Whether any digit has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Whether the pad is at its digit cap.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.digits.len() >= MAX_DIGITS
    }

    /// Display string with underscore placeholders, e.g. `0 0 _`.
    #[must_use]
    pub fn display(&self) -> String {
        let mut slots: Vec<String> = self.digits.chars().map(String::from).collect();
        slots.resize(MAX_DIGITS, "_".to_string());
        slots.join(" ")
    }

    /// The entered number, ignoring leading zeros.
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        if self.digits.is_empty() {
            None
        } else {
            self.digits.parse().ok()
        }
    }

    /// Match the current input against a dataset.
    #[must_use]
    pub fn lookup<'a>(&self, collection: &'a ArtworkCollection) -> LookupOutcome<'a> {
        match self.value() {
            None => LookupOutcome::Empty,
            Some(number) => collection
                .find_by_number(number)
                .map_or(LookupOutcome::NotFound, LookupOutcome::Found),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Artwork;

    fn collection_with_number_seven() -> ArtworkCollection {
        ArtworkCollection {
            artworks: vec![
                Artwork {
                    id: "artwork-7".to_string(),
                    number: "7".to_string(),
                    title: "Ohne Titel".to_string(),
                    ..Artwork::default()
                },
                Artwork {
                    id: "artwork-12".to_string(),
                    number: "12".to_string(),
                    ..Artwork::default()
                },
            ],
            exhibition: None,
        }
    }

    #[test]
    fn leading_zeros_match_numerically() {
        let collection = collection_with_number_seven();
        let mut pad = NumberPad::new();
        for digit in ['0', '0', '7'] {
            assert!(pad.push_digit(digit));
        }
        let LookupOutcome::Found(artwork) = pad.lookup(&collection) else {
            panic!("expected a match");
        };
        assert_eq!(artwork.id, "artwork-7");
    }

    #[test]
    fn fourth_digit_is_a_noop() {
        let mut pad = NumberPad::new();
        for digit in ['1', '2', '3'] {
            assert!(pad.push_digit(digit));
        }
        assert!(pad.is_full());
        assert!(!pad.push_digit('4'));
        assert_eq!(pad.digits(), "123");
    }

    #[test]
    fn non_digits_are_rejected() {
        let mut pad = NumberPad::new();
        assert!(!pad.push_digit('x'));
        assert!(pad.is_empty());
    }

    #[test]
    fn clear_returns_to_empty_state() {
        let collection = collection_with_number_seven();
        let mut pad = NumberPad::new();
        pad.push_digit('7');
        assert!(matches!(pad.lookup(&collection), LookupOutcome::Found(_)));

        pad.clear();
        assert!(pad.is_empty());
        assert!(matches!(pad.lookup(&collection), LookupOutcome::Empty));
    }

    #[test]
    fn unmatched_number_is_not_found() {
        let collection = collection_with_number_seven();
        let mut pad = NumberPad::new();
        pad.push_digit('9');
        assert!(matches!(pad.lookup(&collection), LookupOutcome::NotFound));
    }

    #[test]
    fn display_pads_with_underscores() {
        let mut pad = NumberPad::new();
        assert_eq!(pad.display(), "_ _ _");
        pad.push_digit('0');
        pad.push_digit('0');
        assert_eq!(pad.display(), "0 0 _");
        pad.push_digit('7');
        assert_eq!(pad.display(), "0 0 7");
    }
}
