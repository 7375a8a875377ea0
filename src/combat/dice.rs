//! Dice tables
//!
//! How many six-sided dice each side throws, as a function of the units
//! on its tile.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Attacker throws one fewer die than units on the tile, capped at 3.
/// Tiles with fewer than 2 units cannot attack at all.
pub fn attacker_dice(units: u32) -> usize {
    match units {
        0 | 1 => 0,
        2 => 1,
        3 => 2,
        _ => 3,
    }
}

/// Defender throws 2 dice with 2 or more units, otherwise 1.
pub fn defender_dice(units: u32) -> usize {
    match units {
        0 => 0,
        1 => 1,
        _ => 2,
    }
}

/// Roll `count` d6, sorted descending for highest-vs-highest pairing.
pub fn roll(rng: &mut ChaCha8Rng, count: usize) -> Vec<u8> {
    let mut rolls: Vec<u8> = (0..count).map(|_| rng.gen_range(1..=6)).collect();
    rolls.sort_unstable_by(|a, b| b.cmp(a));
    rolls
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_attacker_dice_table() {
        assert_eq!(attacker_dice(0), 0);
        assert_eq!(attacker_dice(1), 0);
        assert_eq!(attacker_dice(2), 1);
        assert_eq!(attacker_dice(3), 2);
        assert_eq!(attacker_dice(4), 3);
        assert_eq!(attacker_dice(40), 3);
    }

    #[test]
    fn test_defender_dice_table() {
        assert_eq!(defender_dice(0), 0);
        assert_eq!(defender_dice(1), 1);
        assert_eq!(defender_dice(2), 2);
        assert_eq!(defender_dice(9), 2);
    }

    #[test]
    fn test_rolls_are_sorted_descending_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            let rolls = roll(&mut rng, 3);
            assert_eq!(rolls.len(), 3);
            assert!(rolls.windows(2).all(|w| w[0] >= w[1]));
            assert!(rolls.iter().all(|&d| (1..=6).contains(&d)));
        }
    }

    #[test]
    fn test_rolls_reproducible_for_a_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(roll(&mut a, 3), roll(&mut b, 3));
    }
}
