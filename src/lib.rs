//! Prompt template library with `{{variable}}` substitution and side-by-side
//! comparison across LLM providers.

pub mod arena;
pub mod config;
pub mod errors;
pub mod library;
pub mod log;
pub mod model;
pub mod provider;
pub mod store;
pub mod template;
pub mod ux;
