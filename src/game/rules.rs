//! Local word checks for Shiritori submissions
//!
//! Covers the synchronous part of the pipeline, in the authoritative
//! order: minimum length, duplicate, letter chain. The dictionary check
//! happens elsewhere and only for words that clear all three.

use std::collections::HashSet;

/// Minimum word length for valid submissions
pub const MIN_WORD_LENGTH: usize = 4;

/// Why a submission was rejected before reaching the dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Word is shorter than [`MIN_WORD_LENGTH`]
    TooShort { length: usize },
    /// Word was already played this game
    AlreadyUsed,
    /// Word does not start with the previous word's last letter
    WrongStartingLetter { required: char },
}

impl RejectReason {
    /// User-facing message for this rejection
    pub fn message(&self) -> String {
        match self {
            RejectReason::TooShort { .. } => {
                format!("Word must be at least {} letters.", MIN_WORD_LENGTH)
            }
            RejectReason::AlreadyUsed => "Word already used.".to_string(),
            RejectReason::WrongStartingLetter { required } => {
                format!("Word must start with '{}'.", required)
            }
        }
    }
}

/// Run the local checks on a normalized (trimmed, lowercase) word.
///
/// `used` is the set of lowercase words already played; `last_letter`
/// is the chain constraint, unset before the first accepted word.
pub fn check_word(
    word: &str,
    used: &HashSet<String>,
    last_letter: Option<char>,
) -> Result<(), RejectReason> {
    let length = word.chars().count();
    if length < MIN_WORD_LENGTH {
        return Err(RejectReason::TooShort { length });
    }
    if used.contains(word) {
        return Err(RejectReason::AlreadyUsed);
    }
    if let Some(required) = last_letter {
        if word.chars().next() != Some(required) {
            return Err(RejectReason::WrongStartingLetter { required });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn used(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_valid_word_no_constraint() {
        assert_eq!(check_word("goat", &used(&[]), None), Ok(()));
    }

    #[test]
    fn test_valid_word_matching_chain() {
        assert_eq!(check_word("tree", &used(&["goat"]), Some('t')), Ok(()));
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            check_word("cat", &used(&[]), None),
            Err(RejectReason::TooShort { length: 3 })
        );
        assert_eq!(
            check_word("", &used(&[]), None),
            Err(RejectReason::TooShort { length: 0 })
        );
    }

    #[test]
    fn test_duplicate() {
        assert_eq!(
            check_word("goat", &used(&["goat"]), None),
            Err(RejectReason::AlreadyUsed)
        );
    }

    #[test]
    fn test_wrong_starting_letter() {
        assert_eq!(
            check_word("bird", &used(&[]), Some('t')),
            Err(RejectReason::WrongStartingLetter { required: 't' })
        );
    }

    #[test]
    fn test_length_checked_before_duplicate() {
        // "cat" is both short and already used; length wins
        assert!(matches!(
            check_word("cat", &used(&["cat"]), Some('x')),
            Err(RejectReason::TooShort { .. })
        ));
    }

    #[test]
    fn test_duplicate_checked_before_chain() {
        // "goat" breaks the 'x' chain AND is a duplicate; the
        // duplicate check runs first
        assert_eq!(
            check_word("goat", &used(&["goat"]), Some('x')),
            Err(RejectReason::AlreadyUsed)
        );
    }

    #[test]
    fn test_four_letter_word_passes_length() {
        assert_eq!(check_word("frog", &used(&[]), None), Ok(()));
    }

    #[test]
    fn test_message_format() {
        assert_eq!(
            RejectReason::TooShort { length: 2 }.message(),
            "Word must be at least 4 letters."
        );
        assert_eq!(RejectReason::AlreadyUsed.message(), "Word already used.");
        assert_eq!(
            RejectReason::WrongStartingLetter { required: 'g' }.message(),
            "Word must start with 'g'."
        );
    }
}
