pub mod config;
pub mod service;
pub mod store;


pub use config::{ConfigError, GameConfig};
pub use service::opponent::{Opponent, RandomOpponent, ScriptedOpponent};
pub use service::round_machine::{RoundStateMachine, REVEAL_DELAY, SUSPENSE_DELAY};
pub use store::GameStore;
