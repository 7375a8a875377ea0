//! Hegemon - rules engine for a territory-conquest board game
//!
//! The engine owns the authoritative game state (territory graph, turn
//! machine, combat resolution, legal-move enumeration, win detection)
//! and drives it to completion by querying pluggable decision-making
//! agents through the `agents::Agent` trait.

pub mod agents;
pub mod board;
pub mod cards;
pub mod combat;
pub mod core;
pub mod engine;
pub mod setup;
pub mod turn;
