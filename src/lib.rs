// Library surface for the binary, headless/integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod game;
pub mod observable;
pub mod runtime;
pub mod scramble;
pub mod ui;
pub mod words;

pub use error::{GameError, GameResult};
pub use game::{GameUiState, GameViewModel, GuessOutcome};
pub use words::{BuiltinWordList, WordList, SCORE_INCREASE};
