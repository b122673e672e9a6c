pub mod generate;
pub mod plan;

pub use generate::*;
pub use plan::*;
