//! Legal-move enumeration
//!
//! Both enumerations are recomputed per call from current ownership and
//! are deterministic for a fixed board state: tiles iterate in name order
//! and neighbor sets are ordered. Agents may index into the returned
//! sequences.

use std::collections::BTreeSet;

use crate::board::graph::Board;
use crate::core::types::PlayerId;

/// An ordered (attacker tile, defender tile) pair eligible for combat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackLine {
    pub from: String,
    pub to: String,
}

/// An ordered (source, destination) pair within one connected same-owner
/// group, with the largest unit count that may move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortifyLine {
    pub from: String,
    pub to: String,
    /// Source units minus the one that must stay behind
    pub max_units: u32,
}

/// Every (owned tile with >1 unit, adjacent enemy-or-unowned tile) pair.
pub fn attack_lines(board: &Board, player: PlayerId) -> Vec<AttackLine> {
    let mut lines = Vec::new();
    for tile in board.tiles() {
        if !tile.is_owned_by(player) || tile.units <= 1 {
            continue;
        }
        for neighbor in &tile.adjacent {
            if board.get(neighbor).is_some_and(|n| !n.is_owned_by(player)) {
                lines.push(AttackLine {
                    from: tile.name.clone(),
                    to: neighbor.clone(),
                });
            }
        }
    }
    lines
}

/// Every ordered pair of distinct tiles within a connected group of the
/// player's mutually-adjacent tiles, where the source can spare a unit.
///
/// Groups are built by union-merging same-owner adjacent pairs; a group
/// only exists once it has two members, so isolated tiles never fortify.
pub fn fortify_lines(board: &Board, player: PlayerId) -> Vec<FortifyLine> {
    let mut groups: Vec<BTreeSet<String>> = Vec::new();

    for tile in board.tiles() {
        if !tile.is_owned_by(player) {
            continue;
        }
        for neighbor in &tile.adjacent {
            if !board.get(neighbor).is_some_and(|n| n.is_owned_by(player)) {
                continue;
            }
            merge_pair(&mut groups, &tile.name, neighbor);
        }
    }

    let mut lines = Vec::new();
    for group in &groups {
        for from in group {
            let units = board.get(from).map_or(0, |t| t.units);
            if units <= 1 {
                continue;
            }
            for to in group {
                if to != from {
                    lines.push(FortifyLine {
                        from: from.clone(),
                        to: to.clone(),
                        max_units: units - 1,
                    });
                }
            }
        }
    }
    lines
}

/// Union-merge an adjacent same-owner pair into the group set. A pair
/// bridging two existing groups collapses them into one.
fn merge_pair(groups: &mut Vec<BTreeSet<String>>, a: &str, b: &str) {
    let hits: Vec<usize> = groups
        .iter()
        .enumerate()
        .filter(|(_, g)| g.contains(a) || g.contains(b))
        .map(|(idx, _)| idx)
        .collect();

    match hits.as_slice() {
        [] => {
            let mut group = BTreeSet::new();
            group.insert(a.to_string());
            group.insert(b.to_string());
            groups.push(group);
        }
        [first] => {
            groups[*first].insert(a.to_string());
            groups[*first].insert(b.to_string());
        }
        [first, rest @ ..] => {
            let first = *first;
            groups[first].insert(a.to_string());
            groups[first].insert(b.to_string());
            // Drain bridged groups back to front so indices stay valid
            for &idx in rest.iter().rev() {
                let merged = groups.remove(idx);
                groups[first].extend(merged);
            }
        }
    }
}
