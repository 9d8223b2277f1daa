use serde::{Deserialize, Serialize};

use crate::types::{BOARD_SIZE, Item, Pos};

/// Read-only snapshot of one agent, as supplied by the harness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub id: usize,
    pub pos: Pos,
    pub bomb_count: u32,
    pub max_bomb_count: u32,
    pub dead: bool,
}

/// An armed bomb on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Pos,
    pub strength: i32,
    pub time_left: u32,
}

/// One tick's board snapshot. The decision core only reads it; applying the
/// chosen action is the harness's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub items: [[Item; BOARD_SIZE]; BOARD_SIZE],
    pub agents: Vec<AgentInfo>,
    pub bombs: Vec<Bomb>,
}

impl State {
    pub fn new() -> Self {
        Self {
            items: [[Item::Passage; BOARD_SIZE]; BOARD_SIZE],
            agents: Vec::new(),
            bombs: Vec::new(),
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < BOARD_SIZE
            && (pos.y as usize) < BOARD_SIZE
    }

    /// Cell contents at `pos`; out-of-bounds queries read as `Rigid`.
    pub fn item_at(&self, pos: Pos) -> Item {
        if !self.in_bounds(pos) {
            return Item::Rigid;
        }
        self.items[pos.y as usize][pos.x as usize]
    }

    pub fn set_item(&mut self, pos: Pos, item: Item) {
        if !self.in_bounds(pos) {
            return;
        }
        self.items[pos.y as usize][pos.x as usize] = item;
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.item_at(pos).is_walkable()
    }

    /// Agents are stored in id order.
    pub fn agent(&self, id: usize) -> &AgentInfo {
        &self.agents[id]
    }

    /// True if a living agent other than `self_id` stands on `pos`.
    pub fn enemy_at(&self, pos: Pos, self_id: usize) -> bool {
        self.agents.iter().any(|a| a.id != self_id && !a.dead && a.pos == pos)
    }

    /// Appends an agent with one bomb of capacity and returns its id.
    pub fn add_agent(&mut self, pos: Pos) -> usize {
        let id = self.agents.len();
        self.agents.push(AgentInfo { id, pos, bomb_count: 0, max_bomb_count: 1, dead: false });
        id
    }

    /// Arms a bomb and marks its cell on the item grid.
    pub fn drop_bomb(&mut self, pos: Pos, strength: i32, time_left: u32) {
        self.set_item(pos, Item::Bomb);
        self.bombs.push(Bomb { pos, strength, time_left });
    }

    /// Canonical hash of the snapshot, used by the determinism harnesses.
    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        for row in &self.items {
            for item in row {
                hasher.write_u8(*item as u8);
            }
        }
        for a in &self.agents {
            hasher.write_u64(a.id as u64);
            hasher.write_i32(a.pos.y);
            hasher.write_i32(a.pos.x);
            hasher.write_u32(a.bomb_count);
            hasher.write_u32(a.max_bomb_count);
            hasher.write_u8(a.dead as u8);
        }
        for b in &self.bombs {
            hasher.write_i32(b.pos.y);
            hasher.write_i32(b.pos.x);
            hasher.write_i32(b.strength);
            hasher.write_u32(b.time_left);
        }
        hasher.finish()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_cells_read_as_rigid() {
        let state = State::new();
        assert_eq!(state.item_at(Pos { y: -1, x: 0 }), Item::Rigid);
        assert_eq!(state.item_at(Pos { y: 0, x: BOARD_SIZE as i32 }), Item::Rigid);
        assert!(!state.is_walkable(Pos { y: BOARD_SIZE as i32, x: 0 }));
    }

    #[test]
    fn set_item_outside_board_is_ignored() {
        let mut state = State::new();
        state.set_item(Pos { y: -3, x: 4 }, Item::Wood);
        assert_eq!(state, State::new());
    }

    #[test]
    fn enemy_at_skips_self_and_dead_agents() {
        let mut state = State::new();
        let me = state.add_agent(Pos { y: 1, x: 1 });
        let other = state.add_agent(Pos { y: 2, x: 1 });
        assert!(!state.enemy_at(Pos { y: 1, x: 1 }, me));
        assert!(state.enemy_at(Pos { y: 2, x: 1 }, me));
        state.agents[other].dead = true;
        assert!(!state.enemy_at(Pos { y: 2, x: 1 }, me));
    }

    #[test]
    fn snapshot_hash_tracks_board_and_bomb_changes() {
        let mut state = State::new();
        state.add_agent(Pos { y: 1, x: 1 });
        let base = state.snapshot_hash();
        assert_eq!(base, state.snapshot_hash());

        let mut changed = state.clone();
        changed.set_item(Pos { y: 4, x: 4 }, Item::Wood);
        assert_ne!(base, changed.snapshot_hash());

        let mut bombed = state.clone();
        bombed.drop_bomb(Pos { y: 5, x: 5 }, 2, 8);
        assert_ne!(base, bombed.snapshot_hash());
    }
}
