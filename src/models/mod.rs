pub mod brand;
pub mod context;
pub mod enums;
pub mod rule;
pub mod substance;

pub use brand::*;
pub use context::*;
pub use rule::*;
pub use substance::*;
