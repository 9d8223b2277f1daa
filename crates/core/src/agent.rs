//! The per-tick decision policy.
//! This module exists to compose map analysis, danger checks and candidate
//! ranking into exactly one action per tick. It does not own the board
//! snapshot or apply actions; the harness does both.

use arrayvec::ArrayVec;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::state::State;
use crate::strategy::MoveQueue;
use crate::strategy::danger::{adjacent_enemy, adjacent_item, agent_danger};
use crate::strategy::movement::{
    move_towards_enemy, move_towards_powerup, move_towards_safe_place, safe_directions,
};
use crate::strategy::ranking::{has_position_loop, sort_directions};
use crate::strategy::rmap::{RMap, fill_rmap};
use crate::types::{
    DIRECTIONS, DecisionEvent, DecisionReason, Item, Move, Pos, RECENT_POSITIONS,
    desired_position,
};

/// Manhattan distance at which a nearby enemy justifies dropping a bomb.
const BOMB_ENEMY_DISTANCE: u32 = 2;
/// Manhattan distance at which destructible wood justifies dropping a bomb.
const BOMB_WOOD_DISTANCE: u32 = 1;
/// Search radius when chasing enemies.
const ENEMY_CHASE_RADIUS: u32 = 7;
/// Search radius when collecting power-ups.
const POWERUP_RADIUS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rule {
    EscapeDanger,
    Offense,
    CollectPowerup,
    Fallback,
}

/// Rules evaluated in strict priority order; the first one that yields an
/// action wins the tick.
const PRIORITY: [Rule; 4] =
    [Rule::EscapeDanger, Rule::Offense, Rule::CollectPowerup, Rule::Fallback];

/// Heuristic scripted agent. Owns the only state that survives across ticks:
/// its RNG and the window of recently intended destinations.
pub struct SimpleAgent {
    id: usize,
    rng: ChaCha8Rng,
    recent_positions: ArrayVec<Pos, RECENT_POSITIONS>,
    log: Vec<DecisionEvent>,
}

impl SimpleAgent {
    pub fn new(id: usize, seed: u64) -> Self {
        Self {
            id,
            rng: ChaCha8Rng::seed_from_u64(seed),
            recent_positions: ArrayVec::new(),
            log: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn log(&self) -> &[DecisionEvent] {
        &self.log
    }

    /// Clears everything carried across ticks, for reuse across episodes.
    /// The RNG keeps its stream.
    pub fn reset(&mut self) {
        self.recent_positions.clear();
        self.log.clear();
    }

    /// Decides one action for the current tick. The intended destination is
    /// recorded in the recent-position window whether or not the harness
    /// later lets the action succeed.
    pub fn act(&mut self, state: &State) -> Move {
        let (action, reason) = self.decide(state);
        let origin = state.agent(self.id).pos;
        let intended = desired_position(origin, action);
        if self.recent_positions.is_full() {
            self.recent_positions.remove(0);
        }
        self.recent_positions.push(intended);
        self.log.push(DecisionEvent::BranchChosen { reason, action });
        action
    }

    fn decide(&mut self, state: &State) -> (Move, DecisionReason) {
        let mut rmap = RMap::new();
        fill_rmap(state, &mut rmap, self.id);

        for rule in PRIORITY {
            if let Some(decision) = self.apply_rule(rule, state, &rmap) {
                return decision;
            }
        }
        (Move::Idle, DecisionReason::HoldPosition)
    }

    fn apply_rule(
        &mut self,
        rule: Rule,
        state: &State,
        rmap: &RMap,
    ) -> Option<(Move, DecisionReason)> {
        let me = *state.agent(self.id);
        match rule {
            Rule::EscapeDanger => {
                let danger = agent_danger(state, self.id);
                if danger == 0 {
                    return None;
                }
                let mut q = MoveQueue::new();
                move_towards_safe_place(state, rmap, danger, &mut q, Some(danger));
                if let Some(action) = self.sample(&mut q, me.pos, true) {
                    return Some((action, DecisionReason::EscapeDanger));
                }
                // No better place in reach. Break a standstill cycle with a
                // random step, otherwise wait for the situation to change.
                if has_position_loop(&self.recent_positions) {
                    return Some((self.random_direction(), DecisionReason::BreakOscillation));
                }
                Some((Move::Idle, DecisionReason::HoldPosition))
            }
            Rule::Offense => {
                if me.bomb_count >= me.max_bomb_count {
                    return None;
                }
                if adjacent_enemy(state, self.id, BOMB_ENEMY_DISTANCE)
                    || adjacent_item(state, self.id, BOMB_WOOD_DISTANCE, Item::Wood)
                {
                    return Some((Move::Bomb, DecisionReason::PlaceBomb));
                }
                if has_position_loop(&self.recent_positions) {
                    let action = self.safe_single_step(state, false);
                    return Some((action, DecisionReason::BreakOscillation));
                }
                let mut q = MoveQueue::new();
                move_towards_enemy(state, rmap, ENEMY_CHASE_RADIUS, &mut q);
                self.sample(&mut q, me.pos, false)
                    .map(|action| (action, DecisionReason::ChaseEnemy))
            }
            Rule::CollectPowerup => {
                let mut q = MoveQueue::new();
                move_towards_powerup(state, rmap, POWERUP_RADIUS, &mut q);
                self.sample(&mut q, me.pos, false)
                    .map(|action| (action, DecisionReason::CollectPowerup))
            }
            Rule::Fallback => {
                let action = self.safe_single_step(state, true);
                Some((action, DecisionReason::Fallback))
            }
        }
    }

    fn safe_single_step(&mut self, state: &State, avoid_recent: bool) -> Move {
        let origin = state.agent(self.id).pos;
        let mut q = MoveQueue::new();
        safe_directions(state, &mut q, origin);
        self.sample(&mut q, origin, avoid_recent).unwrap_or(Move::Idle)
    }

    /// Draws one candidate. With recency avoidance the queue is ranked first
    /// and the draw comes from the tail (last or second-to-last), preferring
    /// destinations absent from the recent-position window.
    fn sample(&mut self, q: &mut MoveQueue, origin: Pos, avoid_recent: bool) -> Option<Move> {
        if q.is_empty() {
            return None;
        }
        if avoid_recent {
            sort_directions(q, &self.recent_positions, origin);
            let span = q.len().min(2);
            let offset = self.rng.next_u64() as usize % span;
            Some(q[q.len() - 1 - offset])
        } else {
            Some(q[self.rng.next_u64() as usize % q.len()])
        }
    }

    fn random_direction(&mut self) -> Move {
        DIRECTIONS[self.rng.next_u64() as usize % DIRECTIONS.len()]
    }
}
