//! Reflekta - psychological analysis core
//!
//! Turns a running journaling conversation into a structured psychological
//! profile and a bounded emotional-intelligence score, with provider
//! fallback, retries and content-addressed caching.

pub mod cache;
pub mod emotion;
pub mod error;
pub mod fingerprint;
pub mod normalize;
pub mod orchestrator;
pub mod prompts;
pub mod provider;
pub mod score;
pub mod types;

pub use cache::{AnalysisCache, CacheStats};
pub use error::{ReflektaError, Result};
pub use fingerprint::Fingerprint;
pub use orchestrator::{Analyzer, RetryPolicy};
pub use score::ScoreEngine;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
