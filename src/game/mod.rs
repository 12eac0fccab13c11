pub mod board;
pub mod rules;
pub mod state;
pub mod types;

pub use board::*;
pub use rules::*;
pub use state::*;
pub use types::*;
