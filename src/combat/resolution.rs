//! Attack resolution between two adjacent tiles
//!
//! One call resolves one exchange of dice. Elimination transfers tile
//! ownership through `Board::conquer` but leaves the conquered tile at
//! zero units; the caller owes it a garrison of 1..=attacker_units-1
//! before control returns to an agent.

use rand_chacha::ChaCha8Rng;

use crate::board::graph::Board;
use crate::combat::dice::{attacker_dice, defender_dice, roll};
use crate::core::error::{GameError, Result};

/// Outcome of one resolved attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Defender has no units left; the tile changed hands
    DefenderEliminated,
    NoElimination,
}

/// Units lost on each side in a single exchange
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Losses {
    pub attacker: u32,
    pub defender: u32,
}

/// Pair sorted-descending rolls highest-vs-highest; the strictly higher
/// die takes a unit from the other side, ties go to the defender.
pub fn resolve_rolls(attacker: &[u8], defender: &[u8]) -> Losses {
    let mut losses = Losses::default();
    for (att, def) in attacker.iter().zip(defender.iter()) {
        if att > def {
            losses.defender += 1;
        } else {
            losses.attacker += 1;
        }
    }
    losses
}

/// Roll for both tiles and apply one exchange to the board.
///
/// The caller must have validated the line (ownership, adjacency, and
/// attacker units >= 2); reaching this with an attacker that throws no
/// dice is a bug, not a player error. A defender with no units (an
/// unclaimed tile during the opening) falls without an exchange.
pub fn resolve_attack(
    board: &mut Board,
    from: &str,
    to: &str,
    rng: &mut ChaCha8Rng,
) -> Result<AttackOutcome> {
    let attacker_units = board.tile(from)?.units;
    let defender_units = board.tile(to)?.units;

    let att_count = attacker_dice(attacker_units);
    if att_count == 0 {
        return Err(GameError::InvariantViolation(format!(
            "attack {from} -> {to} resolved with only {attacker_units} attacking units"
        )));
    }
    let def_count = defender_dice(defender_units);
    if def_count == 0 {
        let conqueror = board.tile(from)?.owner.ok_or_else(|| {
            GameError::InvariantViolation(format!("attacking tile {from} has no owner"))
        })?;
        board.conquer(to, conqueror)?;
        tracing::debug!(tile = to, player = conqueror.0, "undefended tile conquered");
        return Ok(AttackOutcome::DefenderEliminated);
    }

    let att_rolls = roll(rng, att_count);
    let def_rolls = roll(rng, def_count);
    let losses = resolve_rolls(&att_rolls, &def_rolls);
    tracing::debug!(
        from,
        to,
        ?att_rolls,
        ?def_rolls,
        attacker_lost = losses.attacker,
        defender_lost = losses.defender,
        "attack exchange"
    );

    {
        let attacker = board.tile_mut(from)?;
        attacker.units = attacker.units.saturating_sub(losses.attacker);
    }
    let remaining = {
        let defender = board.tile_mut(to)?;
        defender.units = defender.units.saturating_sub(losses.defender);
        defender.units
    };

    if remaining == 0 {
        let conqueror = board.tile(from)?.owner.ok_or_else(|| {
            GameError::InvariantViolation(format!("attacking tile {from} has no owner"))
        })?;
        board.conquer(to, conqueror)?;
        tracing::debug!(tile = to, player = conqueror.0, "tile conquered");
        Ok(AttackOutcome::DefenderEliminated)
    } else {
        Ok(AttackOutcome::NoElimination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::continent::Continent;
    use crate::board::tile::Tile;
    use crate::core::types::PlayerId;
    use rand::SeedableRng;

    fn border_board(attacker_units: u32, defender_units: u32) -> Board {
        let tiles = vec![
            Tile::new("Alba", "Midlands", vec!["Brock".to_string()]),
            Tile::new("Brock", "Midlands", vec!["Alba".to_string()]),
        ];
        let continents = vec![Continent::new(
            "Midlands",
            2,
            vec!["Alba".to_string(), "Brock".to_string()],
        )];
        let mut board = Board::new(tiles, continents);
        board.conquer("Alba", PlayerId(0)).unwrap();
        board.conquer("Brock", PlayerId(1)).unwrap();
        board.tile_mut("Alba").unwrap().units = attacker_units;
        board.tile_mut("Brock").unwrap().units = defender_units;
        board
    }

    #[test]
    fn test_attacker_sweeps_both_exchanges() {
        // [6,5] vs [4,3]: attacker wins both pairs
        let losses = resolve_rolls(&[6, 5], &[4, 3]);
        assert_eq!(losses, Losses { attacker: 0, defender: 2 });
    }

    #[test]
    fn test_tie_favors_defender() {
        let losses = resolve_rolls(&[3], &[3]);
        assert_eq!(losses, Losses { attacker: 1, defender: 0 });
    }

    #[test]
    fn test_split_exchange() {
        // [6,2] vs [5,3]: attacker takes the first pair, loses the second
        let losses = resolve_rolls(&[6, 2], &[5, 3]);
        assert_eq!(losses, Losses { attacker: 1, defender: 1 });
    }

    #[test]
    fn test_extra_attacker_dice_are_unpaired() {
        // 3 attacker dice vs 1 defender die: only one pair resolves
        let losses = resolve_rolls(&[6, 5, 4], &[2]);
        assert_eq!(losses, Losses { attacker: 0, defender: 1 });
    }

    #[test]
    fn test_resolution_moves_units_and_conquers_eventually() {
        let mut board = border_board(30, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let mut outcome = AttackOutcome::NoElimination;
        for _ in 0..100 {
            outcome = resolve_attack(&mut board, "Alba", "Brock", &mut rng).unwrap();
            if outcome == AttackOutcome::DefenderEliminated {
                break;
            }
        }
        assert_eq!(outcome, AttackOutcome::DefenderEliminated);
        assert_eq!(board.tile("Brock").unwrap().owner, Some(PlayerId(0)));
        assert_eq!(board.tile("Brock").unwrap().units, 0);
        // Attacker cannot lose a unit in the eliminating exchange
        assert!(board.tile("Alba").unwrap().units >= 2);
    }

    #[test]
    fn test_undefended_tile_falls_without_an_exchange() {
        let mut board = border_board(3, 2);
        board.tile_mut("Brock").unwrap().owner = None;
        board.tile_mut("Brock").unwrap().units = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let outcome = resolve_attack(&mut board, "Alba", "Brock", &mut rng).unwrap();
        assert_eq!(outcome, AttackOutcome::DefenderEliminated);
        assert_eq!(board.tile("Brock").unwrap().owner, Some(PlayerId(0)));
        assert_eq!(board.tile("Alba").unwrap().units, 3, "no dice were thrown");
    }

    #[test]
    fn test_attack_with_too_few_units_is_a_bug() {
        let mut board = border_board(1, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!(matches!(
            resolve_attack(&mut board, "Alba", "Brock", &mut rng),
            Err(GameError::InvariantViolation(_))
        ));
    }
}
