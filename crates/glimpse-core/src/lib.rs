//! Glimpse Core - keyword extraction over repeated vision-LLM sampling.
//!
//! Glimpse asks a vision model the same "list keywords for this image"
//! question many times, then aggregates the noisy comma-separated replies
//! into one ranked, deduplicated keyword list.
//!
//! # Architecture
//!
//! ```text
//! Image → Sampler (N sequential probes) → replies
//!       → count → top-N → substring merge → rank → sentence + table
//! ```
//!
//! The sampler is the only fallible stage and swallows per-iteration
//! failures; the aggregation passes are pure functions that cannot fail.
//!
//! # Usage
//!
//! ```rust,ignore
//! use glimpse_core::{aggregate, Config, ImageInput, Sampler, SampleOptions, VisionProviderFactory};
//!
//! #[tokio::main]
//! async fn main() -> glimpse_core::Result<()> {
//!     let config = Config::load()?;
//!     let provider = VisionProviderFactory::create("ollama", &config.llm, None)?;
//!     let image = ImageInput::load("./cat.jpg".as_ref()).await?;
//!
//!     let sampler = Sampler::new(provider, SampleOptions::default());
//!     let outcomes = sampler.sample(&image, |_| {}).await;
//!     let replies = glimpse_core::successful_replies(&outcomes);
//!
//!     let ranked = aggregate::aggregate(&replies, 10);
//!     println!("{:?}", ranked);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod aggregate;
pub mod config;
pub mod error;
pub mod llm;
pub mod output;
pub mod sampler;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, GlimpseError, Result, SampleError, SampleResult};
pub use llm::{ImageInput, LlmRequest, LlmResponse, VisionProvider, VisionProviderFactory};
pub use output::{render_table, OutputFormat};
pub use sampler::{successful_replies, SampleOptions, SampleOutcome, Sampler};
pub use types::{ExtractionReport, KeywordCount};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
