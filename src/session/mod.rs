pub mod manager;

pub use manager::{GameSessionManager, SessionStats};
