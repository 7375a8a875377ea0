//! Game orchestration: state ownership, action validation, play loop

pub mod game;
pub mod play;

pub use game::Game;
pub use play::{run, GameReport, MAX_REJECTIONS};
