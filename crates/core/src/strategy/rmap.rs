//! Reachable-area map construction.
//! This module exists so path queries stay a single BFS pass per decision.
//! It does not own danger analysis or candidate-move selection.

use std::collections::VecDeque;

use bitflags::bitflags;

use super::neighbors;
use crate::state::State;
use crate::types::{BOARD_SIZE, Pos};

bitflags! {
    /// Facts discovered while filling an [`RMap`], checked in O(1) afterwards
    /// instead of rescanning the board.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct RMapInfo: u32 {
        const ENEMY_REACHED = 1 << 0;
        const POWERUP_REACHED = 1 << 1;
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
struct RCell {
    /// BFS hop count plus one; raw 0 means the cell was never reached.
    dist: u16,
    /// Flattened index of the BFS parent.
    pred: u16,
}

/// Per-tick reachable map rooted at one agent's position. Re-filled every
/// decision, never carried across ticks.
#[derive(Clone)]
pub struct RMap {
    cells: [[RCell; BOARD_SIZE]; BOARD_SIZE],
    pub info: RMapInfo,
    pub source: Pos,
}

impl RMap {
    pub fn new() -> Self {
        Self {
            cells: [[RCell::default(); BOARD_SIZE]; BOARD_SIZE],
            info: RMapInfo::empty(),
            source: Pos { y: 0, x: 0 },
        }
    }

    fn in_bounds(pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < BOARD_SIZE
            && (pos.y as usize) < BOARD_SIZE
    }

    /// Stored walking distance from the source to `pos`: hop count plus one,
    /// so 0 always means "unreachable". Out-of-bounds queries return 0.
    pub fn distance(&self, pos: Pos) -> u16 {
        if !Self::in_bounds(pos) {
            return 0;
        }
        self.cells[pos.y as usize][pos.x as usize].dist
    }

    pub fn set_distance(&mut self, pos: Pos, dist: u16) {
        if !Self::in_bounds(pos) {
            return;
        }
        self.cells[pos.y as usize][pos.x as usize].dist = dist;
    }

    /// Flattened index `x + BOARD_SIZE * y` of the BFS parent of `pos`;
    /// 0 for out-of-bounds or never-visited cells.
    pub fn predecessor(&self, pos: Pos) -> u16 {
        if !Self::in_bounds(pos) {
            return 0;
        }
        self.cells[pos.y as usize][pos.x as usize].pred
    }

    pub fn set_predecessor(&mut self, pos: Pos, pred: Pos) {
        if !Self::in_bounds(pos) {
            return;
        }
        self.cells[pos.y as usize][pos.x as usize].pred = pred.flat_index();
    }

    pub fn is_reachable(&self, pos: Pos) -> bool {
        self.distance(pos) != 0
    }

    fn clear(&mut self) {
        self.cells = [[RCell::default(); BOARD_SIZE]; BOARD_SIZE];
        self.info = RMapInfo::empty();
    }

    /// Pretty-prints the hop-count grid; unreached cells render as dots.
    /// Diagnostic only, not part of the decision contract.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in 0..BOARD_SIZE as i32 {
            for x in 0..BOARD_SIZE as i32 {
                let dist = self.distance(Pos { y, x });
                if dist == 0 {
                    out.push_str("   .");
                } else {
                    out.push_str(&format!("{:>4}", dist - 1));
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Default for RMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Fills `r` from the current position of `agent_id` using breadth-first
/// search over 4-directional neighbors. A neighbor is stepped onto when its
/// cell is walkable or occupied by a living enemy; enemy cells still record a
/// distance and predecessor so they can be targeted. Distance is set at most
/// once per cell, so ties resolve by visitation order.
pub fn fill_rmap(state: &State, r: &mut RMap, agent_id: usize) {
    let source = state.agent(agent_id).pos;
    r.clear();
    r.source = source;
    r.set_distance(source, 1);

    let mut queue = VecDeque::with_capacity(BOARD_SIZE * BOARD_SIZE);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let dist = r.distance(current);
        for neighbor in neighbors(current) {
            if !state.in_bounds(neighbor) || r.distance(neighbor) != 0 {
                continue;
            }
            let item = state.item_at(neighbor);
            let enemy = state.enemy_at(neighbor, agent_id);
            if !item.is_walkable() && !enemy {
                continue;
            }
            if enemy {
                r.info |= RMapInfo::ENEMY_REACHED;
            }
            if item.is_powerup() {
                r.info |= RMapInfo::POWERUP_REACHED;
            }
            r.set_distance(neighbor, dist + 1);
            r.set_predecessor(neighbor, current);
            queue.push_back(neighbor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use crate::types::Item;

    #[test]
    fn source_cell_is_always_reachable_with_biased_distance_one() {
        let (state, id) = lone_agent_state(Pos { y: 5, x: 5 });
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);
        assert!(r.is_reachable(r.source));
        assert_eq!(r.distance(r.source), 1);
    }

    #[test]
    fn open_board_distances_equal_hop_count_plus_one() {
        let (state, id) = lone_agent_state(Pos { y: 0, x: 0 });
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);
        for y in 0..BOARD_SIZE as i32 {
            for x in 0..BOARD_SIZE as i32 {
                let pos = Pos { y, x };
                assert_eq!(r.distance(pos) as i32, y + x + 1, "wrong distance at {pos:?}");
            }
        }
    }

    #[test]
    fn walls_block_and_unreached_cells_decode_to_zero() {
        let (mut state, id) = lone_agent_state(Pos { y: 5, x: 2 });
        // Wall off the right half of the board along x = 6.
        for y in 0..BOARD_SIZE as i32 {
            state.set_item(Pos { y, x: 6 }, Item::Rigid);
        }
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);
        assert!(r.is_reachable(Pos { y: 0, x: 5 }));
        for y in 0..BOARD_SIZE as i32 {
            assert_eq!(r.distance(Pos { y, x: 6 }), 0);
            assert_eq!(r.distance(Pos { y, x: 8 }), 0);
        }
    }

    #[test]
    fn predecessor_walk_reaches_source_in_distance_minus_one_steps() {
        let (mut state, id) = lone_agent_state(Pos { y: 5, x: 5 });
        state.set_item(Pos { y: 5, x: 6 }, Item::Rigid);
        state.set_item(Pos { y: 4, x: 6 }, Item::Rigid);
        state.set_item(Pos { y: 6, x: 6 }, Item::Rigid);
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);

        let target = Pos { y: 5, x: 7 };
        assert!(r.is_reachable(target));
        let mut current = target;
        let mut steps = 0;
        while current != r.source {
            current = Pos::from_flat_index(r.predecessor(current));
            steps += 1;
            assert!(steps <= BOARD_SIZE * BOARD_SIZE, "predecessor walk did not terminate");
        }
        assert_eq!(steps, usize::from(r.distance(target)) - 1);
    }

    #[test]
    fn out_of_bounds_queries_report_unreachable() {
        let (state, id) = lone_agent_state(Pos { y: 5, x: 5 });
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);
        assert_eq!(r.distance(Pos { y: -1, x: 5 }), 0);
        assert_eq!(r.predecessor(Pos { y: 5, x: 11 }), 0);
        assert!(!r.is_reachable(Pos { y: 11, x: 11 }));
    }

    #[test]
    fn traversal_flags_report_enemies_and_powerups() {
        let (mut state, id) = lone_agent_state(Pos { y: 1, x: 1 });
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);
        assert_eq!(r.info, RMapInfo::empty());

        state.set_item(Pos { y: 3, x: 3 }, Item::ExtraBomb);
        state.add_agent(Pos { y: 7, x: 7 });
        fill_rmap(&state, &mut r, id);
        assert!(r.info.contains(RMapInfo::POWERUP_REACHED));
        assert!(r.info.contains(RMapInfo::ENEMY_REACHED));
    }

    #[test]
    fn enemy_cells_are_reachable_targets_but_walls_are_not() {
        let (mut state, id) = lone_agent_state(Pos { y: 1, x: 1 });
        let enemy_pos = Pos { y: 1, x: 4 };
        state.add_agent(enemy_pos);
        state.set_item(Pos { y: 4, x: 1 }, Item::Wood);
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);
        assert_eq!(r.distance(enemy_pos), 4);
        assert_eq!(r.distance(Pos { y: 4, x: 1 }), 0);
    }

    #[test]
    fn refilling_resets_stale_cells_and_flags() {
        let (mut state, id) = lone_agent_state(Pos { y: 5, x: 5 });
        state.set_item(Pos { y: 5, x: 6 }, Item::Kick);
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);
        assert!(r.info.contains(RMapInfo::POWERUP_REACHED));

        state.set_item(Pos { y: 5, x: 6 }, Item::Passage);
        // Box the agent in completely.
        for n in neighbors(Pos { y: 5, x: 5 }) {
            state.set_item(n, Item::Rigid);
        }
        fill_rmap(&state, &mut r, id);
        assert_eq!(r.info, RMapInfo::empty());
        assert_eq!(r.distance(Pos { y: 5, x: 6 }), 0);
        assert!(r.is_reachable(r.source));
    }

    #[test]
    fn render_marks_unreached_cells_with_dots() {
        let (mut state, id) = lone_agent_state(Pos { y: 5, x: 5 });
        for n in neighbors(Pos { y: 5, x: 5 }) {
            state.set_item(n, Item::Rigid);
        }
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);
        let rendered = r.render();
        assert_eq!(rendered.lines().count(), BOARD_SIZE);
        assert!(rendered.contains('.'));
        assert!(rendered.contains('0'));
    }
}
