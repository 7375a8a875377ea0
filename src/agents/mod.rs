//! Decision-making collaborators
//!
//! The engine is agnostic to how a player decides; it only speaks this
//! trait. Implementations may be interactive, scripted, or learned. The
//! `state` slices passed to every hook are the flattened numeric board
//! encoding produced by `Game::state_vector`, whose dimensionality is
//! fixed for the whole game.

pub mod random;

pub use random::RandomAgent;

use crate::board::moves::{AttackLine, FortifyLine};
use crate::board::{Continent, Tile};

/// Which action an outcome notification refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Placement,
    Attack,
    Fortify,
}

/// A fortify decision: move `count` units along a legal line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortifyMove {
    pub from: String,
    pub to: String,
    pub count: u32,
}

pub trait Agent {
    /// Pick a tile and a unit count during Placement. `candidates` lists
    /// the tiles this decision may target (unowned tiles during the
    /// opening allocation, the player's own tiles afterwards).
    fn choose_placement(
        &mut self,
        candidates: &[String],
        free_units: u32,
        state: &[f32],
    ) -> (String, u32);

    /// Pick an attack line, or `None` to stop attacking this turn.
    fn choose_attack(&mut self, lines: &[AttackLine], state: &[f32]) -> Option<AttackLine>;

    /// Pick a fortify move, or `None` to skip the fortification.
    fn choose_fortify(&mut self, lines: &[FortifyLine], state: &[f32]) -> Option<FortifyMove>;

    /// After a conquest, pick how many units follow onto the captured
    /// tile. `candidates` is the inclusive range 1..attacker_units-1.
    fn choose_overtake(&mut self, candidates: &[u32], state: &[f32]) -> u32;

    /// Notification after the engine applied (or declined) an action.
    fn on_outcome(&mut self, kind: ActionKind, succeeded: bool, before: &[f32], after: &[f32]) {
        let _ = (kind, succeeded, before, after);
    }

    /// Reinforcements granted at the start of this player's turn.
    /// `owned_continents` holds only continents wholly owned by the
    /// player.
    fn refill(&mut self, owned_tiles: &[&Tile], owned_continents: &[&Continent]) -> u32;
}
