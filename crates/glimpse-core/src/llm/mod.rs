//! Vision LLM integration for keyword sampling.
//!
//! Provides a provider abstraction over multiple vision-LLM backends
//! (Ollama, Anthropic, OpenAI). The sampler drives a provider through
//! repeated keyword probes; each backend only has to answer one request
//! shape: image in, free text out.

pub(crate) mod anthropic;
pub(crate) mod ollama;
pub(crate) mod openai;
pub(crate) mod provider;
pub(crate) mod retry;

pub use provider::{ImageInput, LlmRequest, LlmResponse, VisionProvider, VisionProviderFactory};
