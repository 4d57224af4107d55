use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error("Not enough players")]
    NotEnoughPlayers,
    #[error("Too many players")]
    TooManyPlayers,
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Game state has not been initialized")]
    UninitializedState,
    #[error("Deck exhausted: needed {needed} cards but only {available} are available")]
    DeckExhausted { needed: usize, available: usize },
    #[error("Game is over")]
    GameOver,
    #[error("Corrupt game state: {0}")]
    CorruptState(&'static str),
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
