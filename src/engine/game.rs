//! The game orchestrator
//!
//! `Game` owns every piece of mutable state for one game instance: the
//! territory graph, the turn machine, the players, the deck, and the
//! seeded rng. Nothing here is process-wide; independent instances can
//! run in parallel with no shared state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;

use crate::board::{Board, Continent, Tile};
use crate::cards::{Card, Deck};
use crate::combat::{resolve_attack, AttackOutcome};
use crate::core::error::{GameError, Result};
use crate::core::types::{Player, PlayerId};
use crate::setup::{GameConfig, InitAllocation};
use crate::turn::{NewTurn, Phase, TurnState};

#[derive(Debug)]
pub struct Game {
    board: Board,
    turn: TurnState,
    players: Vec<Player>,
    deck: Deck,
    rng: ChaCha8Rng,
    /// Set when uniform-random allocation filled the board at setup, so
    /// the play loop grants the first player's refill before the first
    /// decision.
    opening_refill_pending: bool,
}

impl Game {
    /// Build a game from a validated configuration, seeding the rng with
    /// `seed` (dice, shuffles, nothing else).
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        let mut tiles = Vec::new();
        let mut continents = Vec::new();
        for (continent_name, continent_config) in &config.continents {
            let member_names: Vec<String> = continent_config.tiles.keys().cloned().collect();
            continents.push(Continent::new(
                continent_name,
                continent_config.bonus,
                member_names,
            ));
            for (tile_name, adjacency) in &continent_config.tiles {
                tiles.push(Tile::new(tile_name, continent_name, adjacency.clone()));
            }
        }

        let players: Vec<Player> = config
            .players
            .iter()
            .enumerate()
            .map(|(idx, p)| Player::new(PlayerId(idx as u32), &p.name, p.troops))
            .collect();
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut deck = Deck::new(
            config
                .cards
                .iter()
                .map(|c| Card {
                    tile: c.tile.clone(),
                    unit: c.unit,
                })
                .collect(),
        );
        deck.shuffle(&mut rng);

        let mut game = Self {
            board: Board::new(tiles, continents),
            turn: TurnState::new(&ids),
            players,
            deck,
            rng,
            opening_refill_pending: false,
        };

        if config.playstyle.init_allocation == InitAllocation::UniformRandom {
            game.allocate_uniform_random()?;
            game.opening_refill_pending = true;
        }

        Ok(game)
    }

    /// Round-robin every tile across the players, splitting each pool as
    /// evenly as the tile share allows; remainder units land on the
    /// player's earliest tiles in board iteration order.
    fn allocate_uniform_random(&mut self) -> Result<()> {
        let tile_names: Vec<String> = self.board.tiles().map(|t| t.name.clone()).collect();
        let player_count = self.players.len();
        let tiles_per_player = tile_names.len() as f64 / player_count as f64;

        let mut base = Vec::with_capacity(player_count);
        let mut remainder = Vec::with_capacity(player_count);
        for player in &self.players {
            let min = (player.free_units as f64 / tiles_per_player).floor() as u32;
            base.push(min);
            remainder.push(player.free_units - (tiles_per_player * min as f64) as u32);
        }

        for (idx, name) in tile_names.iter().enumerate() {
            let slot = idx % player_count;
            let owner = self.players[slot].id;
            self.board.conquer(name, owner)?;

            let mut grant = base[slot];
            if remainder[slot] > 0 {
                grant += 1;
                remainder[slot] -= 1;
            }
            let pool = self.players[slot].free_units;
            let grant = grant.min(pool);
            if grant == 0 {
                return Err(GameError::InvariantViolation(format!(
                    "player {} ran out of units while garrisoning {name}",
                    self.players[slot].name
                )));
            }
            self.players[slot].free_units -= grant;
            self.board.tile_mut(name)?.units += grant;
        }
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn.current_player()
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase()
    }

    pub fn live_players(&self) -> Vec<PlayerId> {
        self.turn.live_players()
    }

    pub(crate) fn take_opening_refill(&mut self) -> bool {
        std::mem::take(&mut self.opening_refill_pending)
    }

    /// Add reinforcements to a player's pool
    pub fn grant_units(&mut self, player: PlayerId, count: u32) {
        self.players[player.index()].free_units += count;
        tracing::debug!(
            player = %self.players[player.index()].name,
            count,
            "reinforcements granted"
        );
    }

    /// Place `count` units from the current player's pool onto a tile
    /// that is unowned or already theirs. Rejections leave all state
    /// untouched.
    pub fn place(&mut self, player: PlayerId, count: u32, tile_name: &str) -> Result<()> {
        if self.turn.phase() != Phase::Placement || self.turn.current_player() != player {
            return Err(GameError::IllegalPhaseAction(self.turn.phase()));
        }
        if count == 0 {
            return Err(GameError::NonPositiveCount);
        }
        let available = self.players[player.index()].free_units;
        if count > available {
            return Err(GameError::InsufficientFreeUnits {
                requested: count,
                available,
            });
        }
        let tile = self.board.tile(tile_name)?;
        if tile.owner.is_some_and(|owner| owner != player) {
            return Err(GameError::NotOwner {
                player,
                tile: tile_name.to_string(),
            });
        }

        if tile.owner.is_none() {
            self.board.conquer(tile_name, player)?;
        }
        self.players[player.index()].free_units -= count;
        self.board.tile_mut(tile_name)?.units += count;
        tracing::debug!(
            player = %self.players[player.index()].name,
            tile = tile_name,
            count,
            "units placed"
        );
        Ok(())
    }

    /// Move `count` units between two tiles, keeping at least one behind.
    pub fn fortify(&mut self, from: &str, to: &str, count: u32) -> Result<()> {
        self.transfer(from, to, count)?;
        tracing::debug!(from, to, count, "fortified");
        Ok(())
    }

    /// Garrison a freshly conquered tile with 1..=from.units-1 units.
    pub fn occupy(&mut self, from: &str, to: &str, count: u32) -> Result<()> {
        self.transfer(from, to, count)?;
        tracing::debug!(from, to, count, "conquered tile occupied");
        Ok(())
    }

    fn transfer(&mut self, from: &str, to: &str, count: u32) -> Result<()> {
        if count == 0 {
            return Err(GameError::NonPositiveCount);
        }
        let available = self.board.tile(from)?.units;
        self.board.tile(to)?;
        if count >= available {
            return Err(GameError::InsufficientUnits {
                requested: count,
                available,
            });
        }
        self.board.tile_mut(from)?.units -= count;
        self.board.tile_mut(to)?.units += count;
        Ok(())
    }

    /// Resolve one attack exchange along a legal line.
    pub fn attack(&mut self, from: &str, to: &str) -> Result<AttackOutcome> {
        if self.turn.phase() != Phase::Attack {
            return Err(GameError::IllegalPhaseAction(self.turn.phase()));
        }
        let player = self.turn.current_player();
        let attacker = self.board.tile(from)?;
        if !attacker.is_owned_by(player) {
            return Err(GameError::NotOwner {
                player,
                tile: from.to_string(),
            });
        }
        if attacker.units < 2 {
            return Err(GameError::InsufficientUnits {
                requested: 2,
                available: attacker.units,
            });
        }
        let defender = self.board.tile(to)?;
        if defender.is_owned_by(player) || !attacker.is_adjacent(to) {
            return Err(GameError::IllegalAttackLine {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        resolve_attack(&mut self.board, from, to, &mut self.rng)
    }

    /// Advance out of Placement: next player while the opening allocation
    /// runs, Attack once the pool is empty.
    pub fn advance_placement(&mut self) -> Result<()> {
        let free = self.players[self.turn.current_player().index()].free_units;
        let unowned = self.board.has_unowned_tiles();
        self.turn.advance_placement(free, unowned)
    }

    /// Stop attacking (voluntarily or for lack of lines)
    pub fn end_attack_phase(&mut self) {
        self.turn.advance_attack();
    }

    /// End the turn: advances to the next live tile-holding player,
    /// eliminating any empty-handed players passed over. No one is
    /// eliminated while unclaimed tiles remain.
    pub fn end_turn(&mut self) -> Result<NewTurn> {
        let board = &self.board;
        self.turn
            .advance_fortify(board.has_unowned_tiles(), |player| {
                board.owned_tile_count(player)
            })
    }

    /// The winner, if the game is over: one player owning every continent
    /// (equivalently, on a fully partitioned board, every tile).
    pub fn winner(&self) -> Option<PlayerId> {
        let mut owners = self.board.continents().map(|c| c.owner);
        let first = owners.next()??;
        owners.all(|owner| owner == Some(first)).then_some(first)
    }

    /// Flattened numeric board encoding for agents.
    ///
    /// For each tile in name order, one slot per player holding the unit
    /// count if that player owns the tile (else 0), followed by a one-hot
    /// 3-vector for the active phase. Length is fixed for the whole game:
    /// `tiles * players + 3`.
    pub fn state_vector(&self) -> Vec<f32> {
        let mut state = Vec::with_capacity(self.board.tile_count() * self.players.len() + 3);
        for tile in self.board.tiles() {
            for player in &self.players {
                state.push(if tile.owner == Some(player.id) {
                    tile.units as f32
                } else {
                    0.0
                });
            }
        }
        state.extend(match self.turn.phase() {
            Phase::Placement => [1.0, 0.0, 0.0],
            Phase::Attack => [0.0, 1.0, 0.0],
            Phase::Fortify => [0.0, 0.0, 1.0],
        });
        state
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.player(self.turn.current_player());
        writeln!(f, "{} to play ({:?})", current.name, self.turn.phase())?;
        for tile in self.board.tiles() {
            let owner = match tile.owner {
                Some(id) => self.player(id).name.as_str(),
                None => "-",
            };
            writeln!(f, "  {:<16} {:<10} {:>4}", tile.name, owner, tile.units)?;
        }
        Ok(())
    }
}
