use std::collections::HashSet;

use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::error::{GameError, GameResult};

/// Returns a random permutation of `word`'s characters that never equals `word`.
///
/// A plain shuffle is tried first. When it lands on the identity, the first
/// character is swapped with the nearest character that differs from it, which
/// always yields a different arrangement. Words with fewer than two distinct
/// characters have no such arrangement and are rejected.
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> GameResult<String> {
    let original: Vec<char> = word.chars().collect();
    if !has_distinct_chars(&original) {
        return Err(GameError::UnscramblableWord(word.to_string()));
    }

    let mut chars = original.clone();
    chars.shuffle(rng);

    if chars == original {
        let first = chars[0];
        if let Some(idx) = chars.iter().position(|&c| c != first) {
            chars.swap(0, idx);
        }
    }

    let scrambled: String = chars.into_iter().collect();
    debug!("scrambled {word:?} into {scrambled:?}");
    Ok(scrambled)
}

/// Whether `word` has at least two distinct characters, i.e. a scramble exists.
pub fn can_scramble(word: &str) -> bool {
    has_distinct_chars(&word.chars().collect::<Vec<_>>())
}

fn has_distinct_chars(chars: &[char]) -> bool {
    chars.iter().collect::<HashSet<_>>().len() >= 2
}
