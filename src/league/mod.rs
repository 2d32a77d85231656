pub mod cycle;
pub mod match_generator;
pub mod promotion;
pub mod standings;
pub mod validator;

pub use cycle::{CloseReadiness, ClosureReport, CycleController, CyclePhase, Resolution};
pub use promotion::{ClassMove, Movement};
