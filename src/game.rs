use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::{collections::HashSet, fmt};

use crate::{
    error::{GameError, GameResult},
    observable::{StateCell, StateView},
    scramble::scramble,
    words::WordList,
};

/// Everything a front end needs to draw the game. The answer is never part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameUiState {
    pub current_scrambled_word: String,
    pub is_guess_word_wrong: bool,
    pub score: u32,
    pub is_game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Wrong,
}

/// Owns one game session: the hidden answer, the words already shown, the
/// pending guess, and the published [`GameUiState`].
pub struct GameViewModel<R = StdRng> {
    ui_state: StateCell<GameUiState>,
    words: WordList,
    current_word: String,
    used_words: HashSet<String>,
    user_guess: String,
    rng: R,
}

// Hand-written so the answer never ends up in logs.
impl<R> fmt::Debug for GameViewModel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameViewModel")
            .field("ui_state", &self.ui_state)
            .field("word_list", &self.words.name())
            .field("used_words", &self.used_words.len())
            .field("user_guess", &self.user_guess)
            .finish_non_exhaustive()
    }
}

impl GameViewModel<StdRng> {
    pub fn new(words: WordList) -> GameResult<Self> {
        Self::with_rng(words, StdRng::from_entropy())
    }
}

impl<R: Rng> GameViewModel<R> {
    /// Starts a session with the given randomness source and deals the first word.
    pub fn with_rng(words: WordList, rng: R) -> GameResult<Self> {
        let mut vm = Self {
            ui_state: StateCell::new(GameUiState::default()),
            words,
            current_word: String::new(),
            used_words: HashSet::new(),
            user_guess: String::new(),
            rng,
        };
        vm.reset_game()?;
        Ok(vm)
    }

    pub fn ui_state(&self) -> StateView<GameUiState> {
        self.ui_state.view()
    }

    pub fn user_guess(&self) -> &str {
        &self.user_guess
    }

    pub fn update_user_guess(&mut self, guess: impl Into<String>) {
        self.user_guess = guess.into();
    }

    pub fn used_words(&self) -> &HashSet<String> {
        &self.used_words
    }

    pub fn words_remaining(&self) -> usize {
        self.words.len() - self.used_words.len()
    }

    pub fn score_increase(&self) -> u32 {
        self.words.score_increase()
    }

    pub fn word_list(&self) -> &WordList {
        &self.words
    }

    /// Compares the pending guess with the answer, ignoring case, and clears it.
    ///
    /// A correct guess scores and deals the next unused word in a single state
    /// update. If no unused word is left, the final score is still published
    /// with `is_game_over` set and `ExhaustedWords` is returned.
    pub fn check_user_guess(&mut self) -> GameResult<GuessOutcome> {
        let guess = std::mem::take(&mut self.user_guess);
        let state = self.ui_state.get();
        if state.is_game_over {
            return Err(self.exhausted());
        }

        debug!("checking guess {guess:?} against {:?}", self.current_word);
        if guess.to_lowercase() == self.current_word.to_lowercase() {
            self.next_round(state.score.saturating_add(self.words.score_increase()))?;
            Ok(GuessOutcome::Correct)
        } else {
            self.ui_state.update(|current| GameUiState {
                is_guess_word_wrong: true,
                ..current.clone()
            });
            Ok(GuessOutcome::Wrong)
        }
    }

    pub fn submit_guess(&mut self, guess: impl Into<String>) -> GameResult<GuessOutcome> {
        self.update_user_guess(guess);
        self.check_user_guess()
    }

    /// Moves on to the next unused word without scoring.
    pub fn skip_word(&mut self) -> GameResult<()> {
        self.user_guess.clear();
        let state = self.ui_state.get();
        if state.is_game_over {
            return Err(self.exhausted());
        }

        debug!("skipping {:?}", self.current_word);
        self.next_round(state.score)
    }

    /// Forgets every used word and deals a fresh one with the score back at zero.
    pub fn reset_game(&mut self) -> GameResult<()> {
        self.used_words.clear();
        self.user_guess.clear();

        let scrambled = self.pick_random_word_and_shuffle()?;
        info!("new game with {} words from {:?}", self.words.len(), self.words.name());
        self.ui_state.set(GameUiState {
            current_scrambled_word: scrambled,
            ..GameUiState::default()
        });
        Ok(())
    }

    fn next_round(&mut self, score: u32) -> GameResult<()> {
        match self.pick_random_word_and_shuffle() {
            Ok(scrambled) => {
                self.ui_state.set(GameUiState {
                    current_scrambled_word: scrambled,
                    is_guess_word_wrong: false,
                    score,
                    is_game_over: false,
                });
                Ok(())
            }
            Err(err @ GameError::ExhaustedWords { .. }) => {
                info!("game over with score {score}");
                self.current_word.clear();
                self.ui_state.set(GameUiState {
                    current_scrambled_word: String::new(),
                    is_guess_word_wrong: false,
                    score,
                    is_game_over: true,
                });
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Selects an unused word, scrambles it, and only then records it as used.
    fn pick_random_word_and_shuffle(&mut self) -> GameResult<String> {
        let word = self
            .words
            .pick_unused(&self.used_words, &mut self.rng)?
            .to_string();
        let scrambled = scramble(&word, &mut self.rng)?;

        self.used_words.insert(word.clone());
        self.current_word = word;
        Ok(scrambled)
    }

    fn exhausted(&self) -> GameError {
        GameError::ExhaustedWords {
            total: self.words.len(),
        }
    }
}
