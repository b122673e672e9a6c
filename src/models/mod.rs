pub mod config;
pub mod method;
pub mod rendered;
pub mod scenario;

pub use config::*;
pub use method::*;
pub use rendered::*;
pub use scenario::*;
