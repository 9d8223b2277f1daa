//! Candidate ranking against the recent-position window.
//! This module exists to keep oscillation handling separate from the scans
//! that produce candidates. It does not own the history itself.

use super::MoveQueue;
use crate::types::{Pos, desired_position};

/// Reorders `q` in place so that candidates leading to positions found in
/// `recent` come first and candidates leading to unvisited positions sit at
/// the very back. The history is walked newest to oldest, so within the
/// visited block the most recently revisited destinations drift furthest from
/// the tail that the sampler draws from.
pub fn sort_directions(q: &mut MoveQueue, recent: &[Pos], origin: Pos) {
    let moves = q.len();
    let mut moved = 0;

    // `recent` is a FIFO, newest entries at the end.
    for visited in recent.iter().rev() {
        let mut found = false;
        for i in 0..moves - moved {
            if desired_position(origin, q[i]) == *visited {
                let m = q.remove(i);
                q.push(m);
                found = true;
                break;
            }
        }
        if found {
            moved += 1;
            if moved == moves {
                break;
            }
        }
    }

    // Rotate the unvisited remainder behind the visited block.
    for _ in 0..moves - moved {
        let m = q.remove(0);
        q.push(m);
    }
}

/// Period-2 cycle check: true iff every retained position matches the one two
/// slots after it, over the first half of the window. Windows shorter than
/// three entries count as looping, matching the reference behavior for a
/// freshly reset history.
pub fn has_position_loop(recent: &[Pos]) -> bool {
    for i in 0..recent.len() / 2 {
        if i + 2 >= recent.len() {
            break;
        }
        if recent[i] != recent[i + 2] {
            return false;
        }
    }
    true
}
