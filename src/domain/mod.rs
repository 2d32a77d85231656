mod class_order;
pub mod encoding;
pub mod models;
mod progress;
mod state;

pub use class_order::ClassOrder;
pub use models::*;
pub use progress::CycleProgress;
pub use state::LeagueState;
