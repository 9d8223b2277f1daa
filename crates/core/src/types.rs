use serde::{Deserialize, Serialize};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 11;
/// Number of `Move` variants.
pub const MOVE_COUNT: usize = 6;
/// Maximum number of agents in one game.
pub const AGENT_COUNT: usize = 4;
/// Capacity of the recent-position window kept by each agent.
pub const RECENT_POSITIONS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    /// Flattened board index `x + BOARD_SIZE * y`, the encoding used for
    /// reachable-map predecessors.
    pub fn flat_index(self) -> u16 {
        (self.x as usize + BOARD_SIZE * self.y as usize) as u16
    }

    pub fn from_flat_index(index: u16) -> Self {
        let index = index as usize;
        Pos { y: (index / BOARD_SIZE) as i32, x: (index % BOARD_SIZE) as i32 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Idle,
    Up,
    Down,
    Left,
    Right,
    Bomb,
}

/// The four directional moves, in fixed evaluation order.
pub const DIRECTIONS: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

/// Position an agent at `pos` intends to occupy after playing `m`.
/// `Idle` and `Bomb` keep the agent in place.
pub fn desired_position(pos: Pos, m: Move) -> Pos {
    match m {
        Move::Up => Pos { y: pos.y - 1, x: pos.x },
        Move::Down => Pos { y: pos.y + 1, x: pos.x },
        Move::Left => Pos { y: pos.y, x: pos.x - 1 },
        Move::Right => Pos { y: pos.y, x: pos.x + 1 },
        Move::Idle | Move::Bomb => pos,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    #[default]
    Passage,
    Rigid,
    Wood,
    Bomb,
    ExtraBomb,
    IncrRange,
    Kick,
}

impl Item {
    /// Agents may step onto passages and power-ups only.
    pub fn is_walkable(self) -> bool {
        self == Item::Passage || self.is_powerup()
    }

    pub fn is_powerup(self) -> bool {
        matches!(self, Item::ExtraBomb | Item::IncrRange | Item::Kick)
    }
}

/// Policy branch that produced an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionReason {
    EscapeDanger,
    BreakOscillation,
    HoldPosition,
    PlaceBomb,
    ChaseEnemy,
    CollectPowerup,
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionEvent {
    BranchChosen { reason: DecisionReason, action: Move },
}
