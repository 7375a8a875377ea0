//! Turn and phase state machine
//!
//! Tracks whose move it is and which phase of their turn is active.
//! Players sit in a fixed ring with a live flag per slot; elimination
//! clears the flag instead of removing the entry, so ids and turn order
//! never shift mid-game.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::PlayerId;

/// One of the three phases of a player's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Placement,
    Attack,
    Fortify,
}

/// Result of ending a turn: who plays next and who fell off the board
/// on the way there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTurn {
    pub player: PlayerId,
    pub eliminated: Vec<PlayerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnState {
    order: Vec<PlayerId>,
    live: Vec<bool>,
    current: usize,
    phase: Phase,
}

impl TurnState {
    /// Turn order follows the given list; the first player starts in
    /// Placement.
    pub fn new(players: &[PlayerId]) -> Self {
        Self {
            order: players.to_vec(),
            live: vec![true; players.len()],
            current: 0,
            phase: Phase::Placement,
        }
    }

    pub fn current_player(&self) -> PlayerId {
        self.order[self.current]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_live(&self, player: PlayerId) -> bool {
        self.order
            .iter()
            .position(|&p| p == player)
            .is_some_and(|idx| self.live[idx])
    }

    pub fn live_players(&self) -> Vec<PlayerId> {
        self.order
            .iter()
            .zip(&self.live)
            .filter(|(_, &live)| live)
            .map(|(&p, _)| p)
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|&&l| l).count()
    }

    /// First live slot strictly after `start`, wrapping around the ring.
    fn next_live_from(&self, start: usize) -> usize {
        let len = self.order.len();
        let mut idx = (start + 1) % len;
        while !self.live[idx] {
            idx = (idx + 1) % len;
        }
        idx
    }

    /// Placement moves to Attack once the pool is empty; while unowned
    /// tiles remain it instead hands Placement to the next live player.
    /// A non-empty pool with a full board means an action is still owed
    /// and there is no legal transition.
    pub fn advance_placement(&mut self, free_units: u32, unowned_remaining: bool) -> Result<()> {
        if free_units == 0 {
            self.phase = Phase::Attack;
            Ok(())
        } else if unowned_remaining {
            self.current = self.next_live_from(self.current);
            Ok(())
        } else {
            Err(GameError::InvariantViolation(format!(
                "{:?} still has {} units to place",
                self.current_player(),
                free_units
            )))
        }
    }

    /// Attack always yields to Fortify, whether the player stopped or ran
    /// out of lines.
    pub fn advance_attack(&mut self) {
        self.phase = Phase::Fortify;
    }

    /// Ends the turn. The next live player owning at least one tile
    /// becomes current; every zero-tile player encountered on the way is
    /// eliminated and skipped exactly once. `tile_count` reports current
    /// tile ownership. While `opening` is set no one is eliminated: a
    /// player who has not yet claimed a tile is still in the game.
    pub fn advance_fortify(
        &mut self,
        opening: bool,
        mut tile_count: impl FnMut(PlayerId) -> usize,
    ) -> Result<NewTurn> {
        let mut eliminated = Vec::new();
        let mut idx = self.next_live_from(self.current);
        while !opening && tile_count(self.order[idx]) == 0 {
            self.live[idx] = false;
            eliminated.push(self.order[idx]);
            if self.live_count() == 0 {
                return Err(GameError::InvariantViolation(
                    "every player was eliminated while ending a turn".to_string(),
                ));
            }
            idx = self.next_live_from(idx);
        }
        self.current = idx;
        self.phase = Phase::Placement;
        Ok(NewTurn {
            player: self.order[idx],
            eliminated,
        })
    }
}
