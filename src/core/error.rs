use thiserror::Error;

use crate::core::types::PlayerId;
use crate::turn::Phase;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("unknown tile: {0}")]
    UnknownTile(String),

    #[error("player {player:?} does not own tile {tile}")]
    NotOwner { player: PlayerId, tile: String },

    #[error("cannot place {requested} units with only {available} free")]
    InsufficientFreeUnits { requested: u32, available: u32 },

    #[error("cannot move {requested} units out of a tile holding {available}")]
    InsufficientUnits { requested: u32, available: u32 },

    #[error("unit count must be greater than zero")]
    NonPositiveCount,

    #[error("action is not legal during the {0:?} phase")]
    IllegalPhaseAction(Phase),

    #[error("no legal attack from {from} to {to}")]
    IllegalAttackLine { from: String, to: String },

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("invalid setup: {0}")]
    InvalidSetup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl GameError {
    /// Validation errors are recoverable: the play loop reports them and
    /// re-prompts the same agent without advancing state. Everything else
    /// aborts the game.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownTile(_)
                | Self::NotOwner { .. }
                | Self::InsufficientFreeUnits { .. }
                | Self::InsufficientUnits { .. }
                | Self::NonPositiveCount
                | Self::IllegalPhaseAction(_)
                | Self::IllegalAttackLine { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
