//! Strategy toolbox consumed by the decision policy.
//! This module exists so map analysis and movement primitives stay reusable
//! across agent implementations. It does not own per-tick decision flow.

pub mod danger;
pub mod movement;
pub mod ranking;
pub mod rmap;

use arrayvec::ArrayVec;

use crate::types::{DIRECTIONS, MOVE_COUNT, Move, Pos, desired_position};

/// Bounded queue of candidate moves accumulated within one decision.
pub type MoveQueue = ArrayVec<Move, MOVE_COUNT>;

/// The four axis-aligned neighbors of `p`, in move evaluation order.
pub fn neighbors(p: Pos) -> [Pos; 4] {
    DIRECTIONS.map(|m| desired_position(p, m))
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
