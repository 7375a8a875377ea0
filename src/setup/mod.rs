//! Game setup: configuration schema and validation

pub mod config;

pub use config::{
    AgentKind, CardConfig, ContinentConfig, GameConfig, InitAllocation, PlayerConfig, Playstyle,
};
