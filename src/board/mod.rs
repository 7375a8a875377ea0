//! The territory graph and everything derived from it

pub mod continent;
pub mod graph;
pub mod moves;
pub mod tile;

pub use continent::Continent;
pub use graph::Board;
pub use moves::{attack_lines, fortify_lines, AttackLine, FortifyLine};
pub use tile::Tile;
