//! Movement primitives: RMap queries translated into candidate moves.
//! Every primitive appends to a caller-supplied queue and never clears it,
//! so candidates compose across calls within one decision. A primitive that
//! finds nothing leaves the queue untouched.

use super::MoveQueue;
use super::danger::danger_at;
use super::rmap::RMap;
use crate::state::State;
use crate::types::{BOARD_SIZE, DIRECTIONS, Move, Pos, desired_position};

/// First step of the path from the RMap source to `target`, reconstructed by
/// walking predecessors back to the source.
///
/// Caller contract: `target` must be reachable and distinct from the source
/// (check [`RMap::is_reachable`] first). Violations are not runtime-checked.
pub fn move_towards_position(r: &RMap, target: Pos) -> Move {
    debug_assert!(r.is_reachable(target) && target != r.source);
    let mut current = target;
    for _ in 0..BOARD_SIZE * BOARD_SIZE {
        let pred = Pos::from_flat_index(r.predecessor(current));
        if pred == r.source {
            return direction_towards(r.source, current);
        }
        current = pred;
    }
    Move::Idle
}

fn direction_towards(from: Pos, to: Pos) -> Move {
    *DIRECTIONS
        .iter()
        .find(|m| desired_position(from, **m) == to)
        .expect("predecessor step must be axis-aligned and adjacent")
}

/// Enqueues the first step toward every qualifying cell attaining the minimum
/// RMap distance within Manhattan `radius` of the source. Ties are preserved
/// in scan order; the ranking stage breaks them, not the scan.
fn enqueue_towards_nearest<F>(r: &RMap, radius: u32, q: &mut MoveQueue, qualifies: F)
where
    F: Fn(Pos) -> bool,
{
    let rad = radius as i32;
    let mut min_dist = u16::MAX;
    for dy in -rad..=rad {
        for dx in -rad..=rad {
            if dy.abs() + dx.abs() > rad {
                continue;
            }
            let pos = Pos { y: r.source.y + dy, x: r.source.x + dx };
            if pos == r.source || !r.is_reachable(pos) || !qualifies(pos) {
                continue;
            }
            min_dist = min_dist.min(r.distance(pos));
        }
    }
    if min_dist == u16::MAX {
        return;
    }
    for dy in -rad..=rad {
        for dx in -rad..=rad {
            if dy.abs() + dx.abs() > rad {
                continue;
            }
            let pos = Pos { y: r.source.y + dy, x: r.source.x + dx };
            if pos == r.source || r.distance(pos) != min_dist || !qualifies(pos) {
                continue;
            }
            if q.is_full() {
                return;
            }
            q.push(move_towards_position(r, pos));
        }
    }
}

/// Enqueues steps toward the closest reachable cells within `radius` that are
/// safe: no bomb threat, or strictly more fuse time than `danger_threshold`
/// (`None` disables the filter).
///
/// Known limitation kept from the reference behavior: only each candidate
/// cell's own danger is checked, not hazards along the path to it.
pub fn move_towards_safe_place(
    state: &State,
    r: &RMap,
    radius: u32,
    q: &mut MoveQueue,
    danger_threshold: Option<u32>,
) {
    enqueue_towards_nearest(r, radius, q, |pos| {
        let danger = danger_at(state, pos);
        match danger_threshold {
            None => true,
            Some(threshold) => danger == 0 || danger > threshold,
        }
    });
}

/// Enqueues steps toward the closest power-up within `radius`.
pub fn move_towards_powerup(state: &State, r: &RMap, radius: u32, q: &mut MoveQueue) {
    enqueue_towards_nearest(r, radius, q, |pos| state.item_at(pos).is_powerup());
}

/// Enqueues steps toward the closest living enemy within `radius`.
pub fn move_towards_enemy(state: &State, r: &RMap, radius: u32, q: &mut MoveQueue) {
    enqueue_towards_nearest(r, radius, q, |pos| {
        state.agents.iter().any(|a| !a.dead && a.pos == pos && a.pos != r.source)
    });
}

/// Enqueues every axis-aligned neighbor of `pos` that is walkable and free of
/// any immediate bomb threat. Last-resort fallback.
pub fn safe_directions(state: &State, q: &mut MoveQueue, pos: Pos) {
    for m in DIRECTIONS {
        let n = desired_position(pos, m);
        if state.is_walkable(n) && danger_at(state, n) == 0 && !q.is_full() {
            q.push(m);
        }
    }
}
