//! Bomb-threat and adjacency predicates.
//! This module exists to keep danger classification pure and snapshot-based.
//! It does not own reachability data, so it stays valid when no RMap exists.

use super::manhattan;
use crate::state::State;
use crate::types::{Item, Pos};

/// True if `pos` lies in the blast cross of a bomb at `bomb_pos` with the
/// given strength: same row within ±strength columns, or same column within
/// ±strength rows.
pub fn in_bomb_range(bomb_pos: Pos, strength: i32, pos: Pos) -> bool {
    (pos.y == bomb_pos.y && (bomb_pos.x - strength..=bomb_pos.x + strength).contains(&pos.x))
        || (pos.x == bomb_pos.x && (bomb_pos.y - strength..=bomb_pos.y + strength).contains(&pos.y))
}

/// Remaining fuse ticks of the most imminent bomb threatening `pos`;
/// 0 when no armed bomb covers the cell.
pub fn danger_at(state: &State, pos: Pos) -> u32 {
    let mut min_fuse = 0;
    for bomb in &state.bombs {
        if in_bomb_range(bomb.pos, bomb.strength, pos)
            && (min_fuse == 0 || bomb.time_left < min_fuse)
        {
            min_fuse = bomb.time_left;
        }
    }
    min_fuse
}

pub fn agent_danger(state: &State, agent_id: usize) -> u32 {
    danger_at(state, state.agent(agent_id).pos)
}

/// True if any living enemy lies within Manhattan `distance` of the agent.
pub fn adjacent_enemy(state: &State, agent_id: usize, distance: u32) -> bool {
    let origin = state.agent(agent_id).pos;
    state
        .agents
        .iter()
        .any(|a| a.id != agent_id && !a.dead && manhattan(a.pos, origin) <= distance)
}

/// True if any cell holding `item` lies within Manhattan `distance` of the agent.
pub fn adjacent_item(state: &State, agent_id: usize, distance: u32, item: Item) -> bool {
    let origin = state.agent(agent_id).pos;
    let d = distance as i32;
    for dy in -d..=d {
        for dx in -d..=d {
            if dy.abs() + dx.abs() > d {
                continue;
            }
            let pos = Pos { y: origin.y + dy, x: origin.x + dx };
            if state.in_bounds(pos) && state.item_at(pos) == item {
                return true;
            }
        }
    }
    false
}
