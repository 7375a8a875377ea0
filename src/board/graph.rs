//! The territory graph: every tile and continent, plus derived ownership
//!
//! `Board` owns the mutable per-tile state. `conquer` is the only path by
//! which tile (and therefore continent) ownership changes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::board::continent::Continent;
use crate::board::tile::Tile;
use crate::core::error::{GameError, Result};
use crate::core::types::PlayerId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Keyed by tile name; BTreeMap gives the deterministic name-sorted
    /// iteration the move enumerators and state vector rely on.
    tiles: BTreeMap<String, Tile>,
    continents: BTreeMap<String, Continent>,
}

impl Board {
    pub fn new(tiles: Vec<Tile>, continents: Vec<Continent>) -> Self {
        Self {
            tiles: tiles.into_iter().map(|t| (t.name.clone(), t)).collect(),
            continents: continents
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
        }
    }

    pub fn tile(&self, name: &str) -> Result<&Tile> {
        self.tiles
            .get(name)
            .ok_or_else(|| GameError::UnknownTile(name.to_string()))
    }

    pub(crate) fn tile_mut(&mut self, name: &str) -> Result<&mut Tile> {
        self.tiles
            .get_mut(name)
            .ok_or_else(|| GameError::UnknownTile(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Tile> {
        self.tiles.get(name)
    }

    /// All tiles in name order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// All continents in name order
    pub fn continents(&self) -> impl Iterator<Item = &Continent> {
        self.continents.values()
    }

    /// The fixed neighbor set of a tile
    pub fn adjacency(&self, name: &str) -> Result<&BTreeSet<String>> {
        Ok(&self.tile(name)?.adjacent)
    }

    /// Transfer ownership of a tile and recompute its continent's owner.
    ///
    /// Unit counts are untouched; callers are responsible for garrisoning
    /// the tile before handing control back to an agent.
    pub fn conquer(&mut self, name: &str, new_owner: PlayerId) -> Result<()> {
        let continent_name = {
            let tile = self.tile_mut(name)?;
            tile.owner = Some(new_owner);
            tile.continent.clone()
        };
        let tiles = &self.tiles;
        if let Some(continent) = self.continents.get_mut(&continent_name) {
            continent.recompute_owner(tiles);
        }
        Ok(())
    }

    pub fn has_unowned_tiles(&self) -> bool {
        self.tiles.values().any(|t| t.owner.is_none())
    }

    /// Names of all unowned tiles, in name order
    pub fn unowned_tiles(&self) -> Vec<String> {
        self.tiles
            .values()
            .filter(|t| t.owner.is_none())
            .map(|t| t.name.clone())
            .collect()
    }

    pub fn tiles_owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Tile> {
        self.tiles.values().filter(move |t| t.is_owned_by(player))
    }

    pub fn owned_tile_count(&self, player: PlayerId) -> usize {
        self.tiles_owned_by(player).count()
    }
}
