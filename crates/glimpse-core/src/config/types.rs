//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};

/// Sampling loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of sampling iterations per image
    pub iterations: u32,

    /// Sampling temperature — kept fairly high on purpose, variance across
    /// iterations is the frequency signal the aggregator feeds on
    pub temperature: f32,

    /// Maximum tokens per reply
    pub max_tokens: u32,

    /// Per-iteration call timeout in milliseconds
    pub timeout_ms: u64,

    /// Max retry attempts per iteration for transient failures
    pub retry_attempts: u32,

    /// Base delay between retries in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            iterations: 30,
            temperature: 0.8,
            max_tokens: 200,
            timeout_ms: 120_000,
            retry_attempts: 2,
            retry_delay_ms: 1000,
        }
    }
}

/// Keyword aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// How many of the most frequent raw keywords enter the merge pass
    pub top_n: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("text", "json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Vision LLM provider configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Default provider ("ollama", "anthropic", "openai")
    pub provider: String,

    /// Ollama (local) configuration
    pub ollama: Option<OllamaConfig>,

    /// Anthropic configuration
    pub anthropic: Option<AnthropicConfig>,

    /// OpenAI configuration
    pub openai: Option<OpenAiConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            ollama: None,
            anthropic: None,
            openai: None,
        }
    }
}

/// Ollama configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama API endpoint
    pub endpoint: String,

    /// Model name
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "llava:13b".to_string(),
        }
    }
}

/// Anthropic configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: "${ANTHROPIC_API_KEY}".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
        }
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}
