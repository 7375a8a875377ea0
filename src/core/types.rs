//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};

/// Unique identifier for players, stable for the whole game.
///
/// Ids are dense indices into the game's player list; elimination never
/// shifts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Index into player-ordered collections
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A player as the engine sees it.
///
/// Decision logic lives behind the `Agent` trait; the engine only reads
/// identity and mutates the free-unit pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Unplaced reinforcement pool
    pub free_units: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, free_units: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            free_units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_equality() {
        let a = PlayerId(1);
        let b = PlayerId(1);
        let c = PlayerId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_player_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<PlayerId, &str> = HashMap::new();
        map.insert(PlayerId(0), "red");
        assert_eq!(map.get(&PlayerId(0)), Some(&"red"));
    }

    #[test]
    fn test_player_id_index() {
        assert_eq!(PlayerId(3).index(), 3);
    }
}
