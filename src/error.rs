use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Not enough resources: need {cost}, have {available}")]
    InsufficientResources { cost: u64, available: u64 },
    #[error("No saved game found")]
    NoSavedState,
    #[error("Saved game could not be parsed")]
    CorruptSave(#[from] serde_json::Error),
    #[error("Saved game version {saved} is older than the minimum supported {min_compatible}")]
    IncompatibleSave { saved: u32, min_compatible: u32 },
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl GameError {
    /// True for outcomes that leave the game untouched and need no handling
    /// beyond telling the player.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            GameError::InsufficientResources { .. } | GameError::NoSavedState
        )
    }
}

pub type GameResult<T> = Result<T, GameError>;
