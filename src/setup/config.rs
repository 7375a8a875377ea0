//! Board configuration
//!
//! The full board description lives in one TOML file: continents with
//! their tiles and adjacency lists, bonus values, cards, the player list
//! and the opening allocation policy. `validate` runs every structural
//! check up front so the engine never has to re-validate the graph.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::cards::CardUnit;
use crate::core::error::{GameError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Seed for the game's dice and shuffles
    #[serde(default)]
    pub seed: u64,
    pub playstyle: Playstyle,
    pub continents: BTreeMap<String, ContinentConfig>,
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub cards: Vec<CardConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playstyle {
    pub init_allocation: InitAllocation,
}

/// How the opening board is seeded with owners and units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitAllocation {
    /// Tiles round-robin across players, starting units split as evenly
    /// as possible with the remainder on each player's earliest tiles
    UniformRandom,
    /// No automatic allocation; players place everything themselves
    Manual,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContinentConfig {
    pub bonus: u32,
    /// Tile name -> adjacency list
    pub tiles: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: AgentKind,
    /// Starting troop pool
    pub troops: u32,
}

/// Agent implementations the binary can construct. Interactive and
/// learned agents live outside this crate behind the `Agent` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardConfig {
    pub tile: Option<String>,
    pub unit: CardUnit,
}

impl GameConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Every tile declared across all continents, in iteration order
    pub fn tile_count(&self) -> usize {
        self.continents.values().map(|c| c.tiles.len()).sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.players.len() < 2 {
            return Err(GameError::InvalidSetup(format!(
                "need at least 2 players, got {}",
                self.players.len()
            )));
        }

        for player in &self.players {
            if player.troops == 0 {
                return Err(GameError::InvalidSetup(format!(
                    "player {} has no starting troops",
                    player.name
                )));
            }
        }

        // The board must partition fully into continents: a tile declared
        // twice would make continent ownership ambiguous.
        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for (continent_name, continent) in &self.continents {
            for tile_name in continent.tiles.keys() {
                if let Some(previous) = seen.insert(tile_name, continent_name) {
                    return Err(GameError::InvalidSetup(format!(
                        "tile {tile_name} declared in both {previous} and {continent_name}"
                    )));
                }
            }
        }
        if seen.is_empty() {
            return Err(GameError::InvalidSetup("board has no tiles".to_string()));
        }

        for continent in self.continents.values() {
            for (tile_name, adjacency) in &continent.tiles {
                for neighbor in adjacency {
                    if neighbor == tile_name {
                        return Err(GameError::InvalidSetup(format!(
                            "tile {tile_name} lists itself as a neighbor"
                        )));
                    }
                    if !seen.contains_key(neighbor.as_str()) {
                        return Err(GameError::InvalidSetup(format!(
                            "tile {tile_name} is adjacent to unknown tile {neighbor}"
                        )));
                    }
                }
            }
        }

        for card in &self.cards {
            if let Some(tile) = &card.tile {
                if !seen.contains_key(tile.as_str()) {
                    return Err(GameError::InvalidSetup(format!(
                        "card references unknown tile {tile}"
                    )));
                }
            }
        }

        if self.playstyle.init_allocation == InitAllocation::UniformRandom {
            // Round-robin assignment must leave every tile garrisoned:
            // each player needs at least one unit per tile they receive.
            let tiles = seen.len();
            let players = self.players.len();
            for (idx, player) in self.players.iter().enumerate() {
                let assigned = (tiles + players - 1 - idx) / players;
                if (player.troops as usize) < assigned {
                    return Err(GameError::InvalidSetup(format!(
                        "player {} starts with {} troops but would receive {} tiles",
                        player.name, player.troops, assigned
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        seed = 1

        [playstyle]
        init_allocation = "uniform_random"

        [continents.Midlands]
        bonus = 2
        [continents.Midlands.tiles]
        Alba = ["Brock"]
        Brock = ["Alba"]

        [[players]]
        name = "Red"
        kind = "random"
        troops = 5

        [[players]]
        name = "Blue"
        kind = "random"
        troops = 5

        [[cards]]
        tile = "Alba"
        unit = "soldier"

        [[cards]]
        unit = "wild"
    "#;

    #[test]
    fn test_minimal_config_parses() {
        let config = GameConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.seed, 1);
        assert_eq!(config.tile_count(), 2);
        assert_eq!(config.players.len(), 2);
        assert_eq!(config.cards.len(), 2);
        assert_eq!(config.cards[1].tile, None);
        assert_eq!(
            config.playstyle.init_allocation,
            InitAllocation::UniformRandom
        );
    }

    #[test]
    fn test_single_player_rejected() {
        let text = MINIMAL.replace(
            "[[players]]\n        name = \"Blue\"\n        kind = \"random\"\n        troops = 5",
            "",
        );
        assert!(matches!(
            GameConfig::from_toml(&text),
            Err(GameError::InvalidSetup(_))
        ));
    }

    #[test]
    fn test_unknown_neighbor_rejected() {
        let text = MINIMAL.replace("Alba = [\"Brock\"]", "Alba = [\"Atlantis\"]");
        let err = GameConfig::from_toml(&text).unwrap_err();
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_duplicate_tile_across_continents_rejected() {
        let text = format!(
            "{MINIMAL}\n[continents.Southreach]\nbonus = 1\n[continents.Southreach.tiles]\nAlba = [\"Brock\"]\n"
        );
        let err = GameConfig::from_toml(&text).unwrap_err();
        assert!(err.to_string().contains("declared in both"));
    }

    #[test]
    fn test_self_adjacency_rejected() {
        let text = MINIMAL.replace("Alba = [\"Brock\"]", "Alba = [\"Alba\"]");
        assert!(matches!(
            GameConfig::from_toml(&text),
            Err(GameError::InvalidSetup(_))
        ));
    }

    #[test]
    fn test_card_with_unknown_tile_rejected() {
        let text = MINIMAL.replace("tile = \"Alba\"", "tile = \"Atlantis\"");
        assert!(matches!(
            GameConfig::from_toml(&text),
            Err(GameError::InvalidSetup(_))
        ));
    }

    #[test]
    fn test_too_few_troops_for_uniform_allocation_rejected() {
        let text = MINIMAL.replace("troops = 5", "troops = 0");
        let err = GameConfig::from_toml(&text).unwrap_err();
        assert!(err.to_string().contains("troops"));
    }

    #[test]
    fn test_troops_below_tile_share_rejected() {
        // A third tile gives the first player a two-tile share.
        let text = MINIMAL
            .replace(
                "Brock = [\"Alba\"]",
                "Brock = [\"Alba\", \"Cairn\"]\n        Cairn = [\"Brock\"]",
            )
            .replace(
                "name = \"Red\"\n        kind = \"random\"\n        troops = 5",
                "name = \"Red\"\n        kind = \"random\"\n        troops = 1",
            );
        let err = GameConfig::from_toml(&text).unwrap_err();
        assert!(err.to_string().contains("would receive"));
    }
}
