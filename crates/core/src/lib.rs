pub mod agent;
pub mod state;
pub mod strategy;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use agent::SimpleAgent;
pub use state::{AgentInfo, Bomb, State};
pub use strategy::MoveQueue;
pub use types::*;
