use include_dir::{include_dir, Dir};
use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

use crate::{
    error::{GameError, GameResult},
    scramble::can_scramble,
};

static WORDLIST_DIR: Dir = include_dir!("src/wordlists");

/// Points awarded for each correctly unscrambled word unless a list says otherwise.
pub const SCORE_INCREASE: u32 = 20;

fn default_score_increase() -> u32 {
    SCORE_INCREASE
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum, strum_macros::Display)]
pub enum BuiltinWordList {
    English,
    Animals,
}

#[derive(Deserialize)]
struct RawWordList {
    name: String,
    #[serde(default = "default_score_increase")]
    score_increase: u32,
    words: Vec<String>,
}

/// Immutable, ordered set of candidate words plus the points a correct guess is worth.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WordList {
    name: String,
    score_increase: u32,
    words: Vec<String>,
}

impl WordList {
    /// Builds a list, trimming entries and dropping blanks, case-insensitive
    /// duplicates and words that have no scramble distinct from themselves.
    pub fn from_words<I, S>(name: impl Into<String>, score_increase: u32, words: I) -> GameResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut seen = HashSet::new();
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .filter(|w| {
                let ok = can_scramble(w);
                if !ok {
                    warn!("dropping {w:?} from {name:?}: it cannot be scrambled");
                }
                ok
            })
            .filter(|w| seen.insert(w.to_lowercase()))
            .collect();

        if words.is_empty() {
            return Err(GameError::EmptyWordList(name));
        }

        Ok(Self {
            name,
            score_increase,
            words,
        })
    }

    pub fn builtin(list: BuiltinWordList) -> GameResult<Self> {
        Self::from_name(&list.to_string().to_lowercase())
    }

    pub fn from_name(name: &str) -> GameResult<Self> {
        let file = WORDLIST_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| GameError::UnknownWordList(name.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| GameError::UnknownWordList(name.to_string()))?;
        Self::from_json(contents)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        let raw: RawWordList = serde_json::from_str(json)?;
        Self::from_words(raw.name, raw.score_increase, raw.words)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score_increase(&self) -> u32 {
        self.score_increase
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Same list with a different score per correct guess.
    pub fn with_score_increase(mut self, score_increase: u32) -> Self {
        self.score_increase = score_increase;
        self
    }

    /// Draws uniformly among the words not yet in `used`.
    pub fn pick_unused<R: Rng + ?Sized>(
        &self,
        used: &HashSet<String>,
        rng: &mut R,
    ) -> GameResult<&str> {
        let remaining: Vec<&String> = self.words.iter().filter(|w| !used.contains(*w)).collect();

        let word: &String = *remaining.choose(rng).ok_or(GameError::ExhaustedWords {
            total: self.words.len(),
        })?;

        debug!(
            "picked {word:?} from {} remaining in {:?}",
            remaining.len(),
            self.name
        );
        Ok(word.as_str())
    }
}
