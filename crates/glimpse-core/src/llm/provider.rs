//! Vision provider trait and request/response types.
//!
//! Defines the interface that all vision-LLM providers implement, plus the
//! factory that creates the right provider from CLI flags and config.

use crate::config::LlmConfig;
use crate::error::SampleError;
use async_trait::async_trait;
use base64::Engine;
use std::path::Path;
use std::time::Duration;

/// The prompt sent on every sampling iteration. Deliberately repetitive and
/// imperative — vision models drift into prose without it.
const KEYWORD_PROMPT: &str = "List at least fifteen (15) keywords separated by commas. \
     Terms that visibly describe this image. \
     Visible descriptive elements. \
     Important identification information. \
     Do not write a sentence.";

/// Base64-encoded image ready to send to an LLM API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and format string.
    ///
    /// The format is the image format identifier (e.g., "jpeg", "png", "webp").
    pub fn from_bytes(bytes: &[u8], format: &str) -> Self {
        let media_type = match format {
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            other => {
                tracing::warn!("Unknown image format '{other}', defaulting to image/jpeg");
                "image/jpeg"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Read an image file from disk, inferring the format from its extension.
    pub async fn load(path: &Path) -> Result<Self, SampleError> {
        if !path.exists() {
            return Err(SampleError::ImageNotFound(path.to_path_buf()));
        }
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SampleError::ImageRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "jpeg".to_string());
        Ok(Self::from_bytes(&bytes, &format))
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// A single keyword-probe request.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The image to describe
    pub image: ImageInput,
    /// Text prompt for the model
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl LlmRequest {
    /// Build the keyword probe sent on every sampling iteration.
    pub fn keyword_probe(image: ImageInput, temperature: f32, max_tokens: u32) -> Self {
        Self {
            image,
            prompt: KEYWORD_PROMPT.to_string(),
            max_tokens,
            temperature,
        }
    }
}

/// The response from a vision-LLM call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text, expected (not guaranteed) to be comma-separated terms
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all vision-LLM providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn VisionProvider>` for dynamic dispatch).
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name for logging (e.g., "anthropic", "ollama").
    fn name(&self) -> &str;

    /// Configured model identifier.
    fn model(&self) -> &str;

    /// Check whether the provider is configured and reachable.
    async fn is_available(&self) -> bool;

    /// Run one keyword probe against the model.
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, SampleError>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the appropriate provider from CLI flags and config.
pub struct VisionProviderFactory;

impl VisionProviderFactory {
    /// Create a vision provider based on provider name, config, and optional
    /// model override.
    ///
    /// # Arguments
    /// * `provider` - Provider identifier ("ollama", "anthropic", "openai")
    /// * `config` - The full LLM config section
    /// * `model_override` - Optional model name that overrides the config default
    pub fn create(
        provider: &str,
        config: &LlmConfig,
        model_override: Option<&str>,
    ) -> Result<Box<dyn VisionProvider>, SampleError> {
        match provider {
            "ollama" => {
                let cfg = config.ollama.clone().unwrap_or_default();
                let model = model_override
                    .map(String::from)
                    .unwrap_or(cfg.model.clone());
                Ok(Box::new(super::ollama::OllamaProvider::new(
                    &cfg.endpoint,
                    &model,
                )))
            }
            "anthropic" => {
                let cfg = config.anthropic.clone().unwrap_or_default();
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| SampleError::Llm {
                    message: "Anthropic API key not set. Set ANTHROPIC_API_KEY env var."
                        .to_string(),
                    status_code: None,
                })?;
                let model = model_override
                    .map(String::from)
                    .unwrap_or(cfg.model.clone());
                Ok(Box::new(super::anthropic::AnthropicProvider::new(
                    &api_key, &model,
                )))
            }
            "openai" => {
                let cfg = config.openai.clone().unwrap_or_default();
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| SampleError::Llm {
                    message: "OpenAI API key not set. Set OPENAI_API_KEY env var.".to_string(),
                    status_code: None,
                })?;
                let model = model_override
                    .map(String::from)
                    .unwrap_or(cfg.model.clone());
                Ok(Box::new(super::openai::OpenAiProvider::new(
                    &api_key, &model,
                )))
            }
            other => Err(SampleError::Llm {
                message: format!("Unknown LLM provider: {other}"),
                status_code: None,
            }),
        }
    }
}
