//! Tiles - the smallest ownable unit of the board

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::PlayerId;

/// A single territory.
///
/// Adjacency and continent membership are fixed at setup; owner and unit
/// count mutate throughout play. A tile with an owner always holds at
/// least one unit by the time control returns to an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub name: String,
    /// Name of the continent this tile belongs to
    pub continent: String,
    /// Names of neighboring tiles
    pub adjacent: BTreeSet<String>,
    pub owner: Option<PlayerId>,
    pub units: u32,
}

impl Tile {
    pub fn new(name: &str, continent: &str, adjacent: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.to_string(),
            continent: continent.to_string(),
            adjacent: adjacent.into_iter().collect(),
            owner: None,
            units: 0,
        }
    }

    pub fn is_adjacent(&self, other: &str) -> bool {
        self.adjacent.contains(other)
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}
