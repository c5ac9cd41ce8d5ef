//! The generation capability seam.
//!
//! Everything the pipeline knows about text generation is this trait: a
//! fallible, asynchronous text-to-text call with no determinism guarantee.
//! One capability instance is bound per stage; the stage's instruction
//! profile is fixed at construction and only the composed input varies per
//! call.

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiCapability, GeminiConfig};

use async_trait::async_trait;

use crate::errors::GenerationError;

/// An opaque, fallible text-to-text generation capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationCapability: Send + Sync {
    /// Generates output text for `input`.
    ///
    /// Performs exactly one attempt; timeouts and provider errors surface as
    /// [`GenerationError`] without retries.
    async fn generate(&self, input: &str) -> Result<String, GenerationError>;
}
