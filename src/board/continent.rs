//! Continents - fixed tile groups with an ownership bonus

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::board::tile::Tile;
use crate::core::types::PlayerId;

/// A fixed group of tiles granting a reinforcement bonus to a player who
/// owns all of them.
///
/// `owner` is derived: `Some(p)` iff every member tile is owned by `p`.
/// It is recomputed by `Board::conquer` after every ownership change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Continent {
    pub name: String,
    /// Bonus units granted per turn while wholly owned
    pub bonus: u32,
    /// Member tiles in declaration order
    pub tiles: Vec<String>,
    pub owner: Option<PlayerId>,
}

impl Continent {
    pub fn new(name: &str, bonus: u32, tiles: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            bonus,
            tiles,
            owner: None,
        }
    }

    /// Recompute the derived owner from member tile ownership.
    pub fn recompute_owner(&mut self, tiles: &BTreeMap<String, Tile>) {
        let first = self
            .tiles
            .first()
            .and_then(|name| tiles.get(name))
            .and_then(|tile| tile.owner);

        self.owner = match first {
            Some(player)
                if self
                    .tiles
                    .iter()
                    .all(|name| tiles.get(name).is_some_and(|t| t.owner == Some(player))) =>
            {
                Some(player)
            }
            _ => None,
        };
    }
}
