pub mod filters;
pub mod flow;
pub mod orchestrator;
pub mod risk;
pub mod types;

pub use flow::*;
pub use orchestrator::*;
pub use types::*;
