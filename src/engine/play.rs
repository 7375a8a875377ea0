//! The agent-driven play loop
//!
//! Drives one game to completion: per phase, enumerate the legal
//! options, ask the acting player's agent to pick, validate and apply,
//! advance the turn machine. Exactly one decision is pending at any
//! time and the loop blocks on it; there is one logical thread of
//! control per game.
//!
//! Validation errors are never fatal: the rejection is logged and the
//! same agent is asked again with state unchanged. A bounded budget
//! keeps a misbehaving agent from spinning the loop forever.

use crate::agents::{ActionKind, Agent};
use crate::board::moves::{attack_lines, fortify_lines};
use crate::board::{Continent, Tile};
use crate::combat::AttackOutcome;
use crate::core::error::{GameError, Result};
use crate::core::types::PlayerId;
use crate::engine::game::Game;
use crate::turn::Phase;

/// Consecutive rejected decisions tolerated before the game aborts
pub const MAX_REJECTIONS: u32 = 32;

/// Summary of a completed game
#[derive(Debug, Clone)]
pub struct GameReport {
    pub winner: PlayerId,
    /// Number of phase dispatches it took
    pub steps: u64,
}

/// Play a game to completion. `agents[i]` decides for player `i`.
pub fn run(game: &mut Game, agents: &mut [Box<dyn Agent>]) -> Result<GameReport> {
    if agents.len() != game.players().len() {
        return Err(GameError::InvariantViolation(format!(
            "{} agents supplied for {} players",
            agents.len(),
            game.players().len()
        )));
    }

    // Uniform-random setup owes the opening player their first refill.
    if game.take_opening_refill() {
        apply_refill(game, agents, game.current_player());
    }

    let mut steps: u64 = 0;
    let mut rejections: u32 = 0;
    loop {
        if let Some(winner) = game.winner() {
            tracing::info!(
                winner = %game.player(winner).name,
                steps,
                "game over"
            );
            return Ok(GameReport { winner, steps });
        }

        let player = game.current_player();
        let outcome = match game.phase() {
            Phase::Placement => run_placement(game, agents),
            Phase::Attack => run_attack(game, agents),
            Phase::Fortify => run_fortify(game, agents),
        };
        steps += 1;

        match outcome {
            Ok(()) => rejections = 0,
            Err(err) if err.is_validation() => {
                rejections += 1;
                tracing::warn!(
                    player = %game.player(player).name,
                    %err,
                    "action rejected; asking again"
                );
                if rejections > MAX_REJECTIONS {
                    return Err(GameError::InvariantViolation(format!(
                        "agent for {} exceeded {MAX_REJECTIONS} rejected decisions (last: {err})",
                        game.player(player).name
                    )));
                }
            }
            Err(err) => return Err(err),
        }
    }
}

fn run_placement(game: &mut Game, agents: &mut [Box<dyn Agent>]) -> Result<()> {
    let player = game.current_player();
    let free = game.player(player).free_units;

    if game.board().has_unowned_tiles() {
        // Opening allocation: the pool can legitimately be empty when the
        // rotation reaches a player who spent everything claiming tiles.
        if free == 0 {
            return game.advance_placement();
        }
        let candidates = game.board().unowned_tiles();
        let state = game.state_vector();
        let (tile, count) = agents[player.index()].choose_placement(&candidates, free, &state);
        game.place(player, count, &tile)?;
        game.advance_placement()
    } else {
        let candidates: Vec<String> = game
            .board()
            .tiles_owned_by(player)
            .map(|t| t.name.clone())
            .collect();
        let state = game.state_vector();
        let (tile, count) = agents[player.index()].choose_placement(&candidates, free, &state);
        game.place(player, count, &tile)?;
        if game.player(player).free_units == 0 {
            game.advance_placement()?;
        }
        Ok(())
    }
}

fn run_attack(game: &mut Game, agents: &mut [Box<dyn Agent>]) -> Result<()> {
    let player = game.current_player();
    let lines = attack_lines(game.board(), player);
    if lines.is_empty() {
        game.end_attack_phase();
        return Ok(());
    }

    let before = game.state_vector();
    let Some(line) = agents[player.index()].choose_attack(&lines, &before) else {
        game.end_attack_phase();
        let after = game.state_vector();
        agents[player.index()].on_outcome(ActionKind::Attack, false, &before, &after);
        return Ok(());
    };

    let outcome = game.attack(&line.from, &line.to)?;
    if outcome == AttackOutcome::DefenderEliminated {
        // The eliminating exchange never costs the attacker a unit, so
        // the tile still holds >= 2 and the candidate range is nonempty.
        let available = game.board().tile(&line.from)?.units;
        let candidates: Vec<u32> = (1..available).collect();
        let count = choose_overtake_bounded(game, agents, player, &candidates)?;
        game.occupy(&line.from, &line.to, count)?;
    }
    let after = game.state_vector();
    agents[player.index()].on_outcome(ActionKind::Attack, true, &before, &after);
    Ok(())
}

/// Re-prompt an out-of-range overtake count instead of failing the
/// phase: the conquest has already happened and retrying the whole
/// attack would resolve it twice.
fn choose_overtake_bounded(
    game: &Game,
    agents: &mut [Box<dyn Agent>],
    player: PlayerId,
    candidates: &[u32],
) -> Result<u32> {
    let state = game.state_vector();
    for _ in 0..=MAX_REJECTIONS {
        let count = agents[player.index()].choose_overtake(candidates, &state);
        if candidates.contains(&count) {
            return Ok(count);
        }
        tracing::warn!(
            player = %game.player(player).name,
            count,
            "overtake count out of range; asking again"
        );
    }
    Err(GameError::InvariantViolation(format!(
        "agent for {} kept choosing an illegal overtake count",
        game.player(player).name
    )))
}

fn run_fortify(game: &mut Game, agents: &mut [Box<dyn Agent>]) -> Result<()> {
    let player = game.current_player();
    let lines = fortify_lines(game.board(), player);
    if !lines.is_empty() {
        let state = game.state_vector();
        if let Some(mv) = agents[player.index()].choose_fortify(&lines, &state) {
            game.fortify(&mv.from, &mv.to, mv.count)?;
        }
    }
    // Fortify happens at most once: the turn ends regardless.
    end_turn(game, agents)
}

fn end_turn(game: &mut Game, agents: &mut [Box<dyn Agent>]) -> Result<()> {
    let new_turn = game.end_turn()?;
    for eliminated in &new_turn.eliminated {
        tracing::info!(player = %game.player(*eliminated).name, "player eliminated");
    }
    apply_refill(game, agents, new_turn.player);
    Ok(())
}

/// Ask the incoming player's agent how many reinforcements it is owed
/// and credit them. The amount is an agent-side computation over the
/// player's tiles and wholly-owned continents.
fn apply_refill(game: &mut Game, agents: &mut [Box<dyn Agent>], player: PlayerId) {
    let granted = {
        let board = game.board();
        let owned: Vec<&Tile> = board.tiles_owned_by(player).collect();
        let continents: Vec<&Continent> = board
            .continents()
            .filter(|c| c.owner == Some(player))
            .collect();
        agents[player.index()].refill(&owned, &continents)
    };
    game.grant_units(player, granted);
}
