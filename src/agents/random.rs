//! A seeded agent that picks uniformly among legal options
//!
//! Useful as a baseline opponent and for driving full games in tests.
//! It declines to attack 25% of the time and to fortify 10% of the time,
//! so no turn loops forever.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::agents::{Agent, FortifyMove};
use crate::board::moves::{AttackLine, FortifyLine};
use crate::board::{Continent, Tile};

const STOP_ATTACK_CHANCE: f64 = 0.25;
const SKIP_FORTIFY_CHANCE: f64 = 0.10;

/// Minimum reinforcement grant per turn
const MIN_REFILL: u32 = 3;

#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_placement(
        &mut self,
        candidates: &[String],
        free_units: u32,
        _state: &[f32],
    ) -> (String, u32) {
        let tile = candidates
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();
        let count = if free_units > 1 {
            self.rng.gen_range(1..=free_units)
        } else {
            free_units
        };
        (tile, count)
    }

    fn choose_attack(&mut self, lines: &[AttackLine], _state: &[f32]) -> Option<AttackLine> {
        if lines.is_empty() || self.rng.gen::<f64>() < STOP_ATTACK_CHANCE {
            return None;
        }
        lines.choose(&mut self.rng).cloned()
    }

    fn choose_fortify(&mut self, lines: &[FortifyLine], _state: &[f32]) -> Option<FortifyMove> {
        if lines.is_empty() || self.rng.gen::<f64>() < SKIP_FORTIFY_CHANCE {
            return None;
        }
        let line = lines.choose(&mut self.rng)?;
        let count = self.rng.gen_range(1..=line.max_units);
        Some(FortifyMove {
            from: line.from.clone(),
            to: line.to.clone(),
            count,
        })
    }

    fn choose_overtake(&mut self, candidates: &[u32], _state: &[f32]) -> u32 {
        candidates.choose(&mut self.rng).copied().unwrap_or(1)
    }

    fn refill(&mut self, owned_tiles: &[&Tile], owned_continents: &[&Continent]) -> u32 {
        let from_tiles = (owned_tiles.len() as u32 / 3).max(MIN_REFILL);
        let from_continents: u32 = owned_continents.iter().map(|c| c.bonus).sum();
        from_tiles + from_continents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_stays_within_pool_and_candidates() {
        let mut agent = RandomAgent::seeded(1);
        let candidates = vec!["Alba".to_string(), "Brock".to_string()];
        for _ in 0..50 {
            let (tile, count) = agent.choose_placement(&candidates, 7, &[]);
            assert!(candidates.contains(&tile));
            assert!((1..=7).contains(&count));
        }
    }

    #[test]
    fn test_no_attack_without_lines() {
        let mut agent = RandomAgent::seeded(1);
        assert_eq!(agent.choose_attack(&[], &[]), None);
    }

    #[test]
    fn test_attack_choice_comes_from_lines() {
        let mut agent = RandomAgent::seeded(2);
        let lines = vec![AttackLine {
            from: "Alba".to_string(),
            to: "Brock".to_string(),
        }];
        for _ in 0..50 {
            if let Some(line) = agent.choose_attack(&lines, &[]) {
                assert_eq!(line, lines[0]);
            }
        }
    }

    #[test]
    fn test_fortify_respects_max_units() {
        let mut agent = RandomAgent::seeded(3);
        let lines = vec![FortifyLine {
            from: "Alba".to_string(),
            to: "Brock".to_string(),
            max_units: 4,
        }];
        for _ in 0..200 {
            if let Some(mv) = agent.choose_fortify(&lines, &[]) {
                assert!((1..=4).contains(&mv.count));
            }
        }
    }

    #[test]
    fn test_overtake_picks_a_candidate() {
        let mut agent = RandomAgent::seeded(4);
        let candidates = vec![1, 2, 3];
        for _ in 0..50 {
            assert!(candidates.contains(&agent.choose_overtake(&candidates, &[])));
        }
    }

    #[test]
    fn test_refill_formula() {
        let mut agent = RandomAgent::seeded(5);
        let tiles: Vec<Tile> = (0..9)
            .map(|i| Tile::new(&format!("T{i}"), "Midlands", vec![]))
            .collect();
        let tile_refs: Vec<&Tile> = tiles.iter().collect();
        let continent = Continent::new("Midlands", 5, vec![]);

        // 9 tiles / 3 = 3, plus a wholly-owned continent bonus of 5
        assert_eq!(agent.refill(&tile_refs, &[&continent]), 8);
        // Few tiles still grant the minimum of 3
        assert_eq!(agent.refill(&tile_refs[..2], &[]), 3);
    }
}
