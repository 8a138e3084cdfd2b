use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("All {total} words in the list have already been used")]
    ExhaustedWords { total: usize },
    #[error("The word {0:?} has fewer than two distinct characters and cannot be scrambled")]
    UnscramblableWord(String),
    #[error("The word list {0:?} contains no usable words")]
    EmptyWordList(String),
    #[error("Word list {0:?} is not built in")]
    UnknownWordList(String),
    #[error("Unable to parse word list")]
    InvalidWordList(#[from] serde_json::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
