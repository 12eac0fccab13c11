pub mod api;
pub mod config;
pub mod error;
pub mod game;
pub mod session;

pub use config::Config;
pub use error::{GameError, Result};
