//! Shared test fixtures for the core test suites.
//! This module exists to avoid repeating board and agent setup across tests.
//! It does not own production decision logic.

use crate::state::State;
use crate::types::Pos;

/// Open board (all passages) holding a single agent at `pos`.
pub(crate) fn lone_agent_state(pos: Pos) -> (State, usize) {
    let mut state = State::new();
    let id = state.add_agent(pos);
    (state, id)
}
