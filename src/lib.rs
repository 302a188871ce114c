//! Block Miner — an idle mining clicker.
//!
//! The crate is the game core: state, transitions, achievements and saves.
//! Drawing the page and wiring buttons is left to the host, which drives a
//! [`Session`] and re-reads [`GameEngine::state`] after every call.

pub mod actions;
pub mod config;
mod console;
pub mod engine;
pub mod error;
pub mod save;
pub mod session;
pub mod state;
pub mod time;

pub use actions::Action;
pub use config::EngineConfig;
pub use engine::{GameEngine, Outcome};
pub use error::{GameError, GameResult};
pub use save::{MemoryStore, SaveStore};
pub use session::Session;
pub use state::{derive_achievements, Achievement, GameState, LogEntry};
