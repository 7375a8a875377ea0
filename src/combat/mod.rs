//! Dice-based combat resolution

pub mod dice;
pub mod resolution;

pub use dice::{attacker_dice, defender_dice};
pub use resolution::{resolve_attack, resolve_rolls, AttackOutcome, Losses};
