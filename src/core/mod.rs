pub mod backend;
pub mod config;
pub mod extractor;
pub mod java_text;
pub mod ollama;
pub mod pipeline;
pub mod planner;
pub mod prompts;
pub mod rate_limit;
pub mod renderer;
pub mod suite;

pub use backend::*;
pub use config::*;
pub use extractor::*;
pub use ollama::*;
pub use pipeline::*;
pub use planner::*;
pub use prompts::*;
pub use rate_limit::*;
pub use renderer::*;
pub use suite::*;
