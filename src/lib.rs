#![allow(dead_code)]
//! junitgen - LLM-assisted JUnit test drafting with deterministic fallback
//!
//! junitgen reads one Java source file, finds its testable methods, plans the
//! scenarios each method needs, and renders every scenario either through an
//! Ollama model or through a fixed template when the model is unavailable.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (generate, plan)
//! - **core**: Pipeline stages (extractor, planner, renderer), backend client, config loading
//! - **models**: Data structures (config, method and scenario descriptors, rendered tests)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{JunitGenError, Result};
