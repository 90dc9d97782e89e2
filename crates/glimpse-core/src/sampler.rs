//! Sequential keyword sampling engine.
//!
//! Drives a vision provider through repeated keyword probes against a single
//! image. Iterations run strictly one at a time — the point of sampling is to
//! collect many independent draws from the same stateful local model, and
//! local inference is the rate limiter anyway. A failed iteration is retried
//! while the failure looks transient, then recorded and skipped; it never
//! aborts the batch.

use super::llm::retry;
use super::llm::{ImageInput, LlmRequest, VisionProvider};

/// Configuration for the sampling loop.
#[derive(Debug, Clone)]
pub struct SampleOptions {
    /// Number of sampling iterations
    pub iterations: u32,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum retries per iteration
    pub retry_attempts: u32,
    /// Base backoff delay in milliseconds
    pub retry_delay_ms: u64,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens per reply
    pub max_tokens: u32,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            iterations: 30,
            timeout_ms: 120_000,
            retry_attempts: 2,
            retry_delay_ms: 1000,
            temperature: 0.8,
            max_tokens: 200,
        }
    }
}

/// Outcome of one sampling iteration.
#[derive(Debug, Clone)]
pub enum SampleOutcome {
    /// The model answered; raw free text, hopefully comma-separated terms
    Reply(String),
    /// The iteration failed after exhausting retries and was skipped
    Failed { iteration: u32, reason: String },
}

impl SampleOutcome {
    pub fn is_reply(&self) -> bool {
        matches!(self, SampleOutcome::Reply(_))
    }
}

/// Extract the successful replies from a batch of outcomes, in order.
pub fn successful_replies(outcomes: &[SampleOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|o| match o {
            SampleOutcome::Reply(text) => Some(text.clone()),
            SampleOutcome::Failed { .. } => None,
        })
        .collect()
}

/// Sequential sampling engine over a boxed vision provider.
pub struct Sampler {
    provider: Box<dyn VisionProvider>,
    options: SampleOptions,
}

impl Sampler {
    pub fn new(provider: Box<dyn VisionProvider>, options: SampleOptions) -> Self {
        Self { provider, options }
    }

    /// Model identifier the sampler will query.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Run the full sampling batch against one image.
    ///
    /// Calls `on_outcome` once per finished iteration so the CLI can advance
    /// its progress bar. Returns every outcome in iteration order; callers
    /// usually feed [`successful_replies`] into the aggregator.
    pub async fn sample<F>(&self, image: &ImageInput, mut on_outcome: F) -> Vec<SampleOutcome>
    where
        F: FnMut(&SampleOutcome),
    {
        let mut outcomes = Vec::with_capacity(self.options.iterations as usize);

        for iteration in 0..self.options.iterations {
            let outcome = self.sample_once(image, iteration).await;
            if let SampleOutcome::Failed { reason, .. } = &outcome {
                tracing::warn!(
                    "Sampling iteration {}/{} failed: {reason}",
                    iteration + 1,
                    self.options.iterations
                );
            }
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Run one iteration with retry on transient failures.
    async fn sample_once(&self, image: &ImageInput, iteration: u32) -> SampleOutcome {
        let request =
            LlmRequest::keyword_probe(image.clone(), self.options.temperature, self.options.max_tokens);

        let mut last_error = String::new();
        for attempt in 0..=self.options.retry_attempts {
            if attempt > 0 {
                let delay = retry::backoff_duration(attempt - 1, self.options.retry_delay_ms);
                tracing::debug!(
                    "Retry {attempt}/{} for iteration {iteration} after {delay:?}",
                    self.options.retry_attempts
                );
                tokio::time::sleep(delay).await;
            }

            match tokio::time::timeout(
                std::time::Duration::from_millis(self.options.timeout_ms),
                self.provider.generate(&request),
            )
            .await
            {
                Ok(Ok(response)) => {
                    tracing::debug!(
                        "Iteration {iteration} replied in {}ms",
                        response.latency_ms
                    );
                    return SampleOutcome::Reply(response.text);
                }
                Ok(Err(e)) => {
                    last_error = e.to_string();
                    if !retry::is_retryable(&e) {
                        break;
                    }
                }
                Err(_) => {
                    last_error = format!("Timeout after {}ms", self.options.timeout_ms);
                    // Timeouts are retryable
                }
            }
        }

        SampleOutcome::Failed {
            iteration,
            reason: last_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SampleError;
    use crate::llm::{LlmResponse, VisionProvider};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// A configurable mock vision provider for testing sampler behavior.
    ///
    /// Each call to `generate()` invokes the response factory with the current
    /// call index, allowing callers to return different results per attempt.
    struct MockProvider {
        /// Factory that produces a response for each call index.
        response_fn: Box<dyn Fn(u32) -> Result<LlmResponse, SampleError> + Send + Sync>,
        /// Tracks how many times `generate` was called.
        call_count: Arc<AtomicU32>,
        /// Optional delay before returning.
        delay: Option<Duration>,
    }

    impl MockProvider {
        fn from_fn(
            response_fn: impl Fn(u32) -> Result<LlmResponse, SampleError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                response_fn: Box::new(response_fn),
                call_count: Arc::new(AtomicU32::new(0)),
                delay: None,
            }
        }

        fn success(text: &str) -> Self {
            let text = text.to_string();
            Self::from_fn(move |_| Ok(reply(&text)))
        }

        fn failing(status_code: Option<u16>, message: &str) -> Self {
            let message = message.to_string();
            Self::from_fn(move |_| {
                Err(SampleError::Llm {
                    message: message.clone(),
                    status_code,
                })
            })
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Get a shared handle to the call counter (clone before moving provider).
        fn call_count_handle(&self) -> Arc<AtomicU32> {
            self.call_count.clone()
        }
    }

    fn reply(text: &str) -> LlmResponse {
        LlmResponse {
            text: text.to_string(),
            model: "mock-v1".to_string(),
            tokens_used: Some(42),
            latency_ms: 10,
        }
    }

    #[async_trait]
    impl VisionProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-v1"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn generate(&self, _request: &LlmRequest) -> Result<LlmResponse, SampleError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            (self.response_fn)(idx)
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(60)
        }
    }

    fn fast_options(iterations: u32) -> SampleOptions {
        SampleOptions {
            iterations,
            timeout_ms: 5000,
            retry_attempts: 0,
            retry_delay_ms: 10,
            ..SampleOptions::default()
        }
    }

    fn test_image() -> ImageInput {
        ImageInput::from_bytes(&[1, 2, 3], "jpeg")
    }

    #[tokio::test]
    async fn test_sampler_collects_all_replies() {
        let provider = MockProvider::success("cat, whiskers, feline");
        let sampler = Sampler::new(Box::new(provider), fast_options(5));

        let outcomes = sampler.sample(&test_image(), |_| {}).await;

        assert_eq!(outcomes.len(), 5);
        let replies = successful_replies(&outcomes);
        assert_eq!(replies.len(), 5);
        assert_eq!(replies[0], "cat, whiskers, feline");
    }

    #[tokio::test]
    async fn test_sampler_skips_failed_iterations() {
        // Every other call fails with a non-retryable error
        let provider = MockProvider::from_fn(|idx| {
            if idx % 2 == 0 {
                Ok(reply("dog, park"))
            } else {
                Err(SampleError::Llm {
                    message: "model not found".to_string(),
                    status_code: Some(404),
                })
            }
        });
        let sampler = Sampler::new(Box::new(provider), fast_options(6));

        let outcomes = sampler.sample(&test_image(), |_| {}).await;

        assert_eq!(outcomes.len(), 6);
        assert_eq!(successful_replies(&outcomes).len(), 3);
        assert_eq!(outcomes.iter().filter(|o| !o.is_reply()).count(), 3);
    }

    #[tokio::test]
    async fn test_sampler_all_failures_yields_no_replies() {
        let provider = MockProvider::failing(Some(404), "model not found");
        let sampler = Sampler::new(Box::new(provider), fast_options(4));

        let outcomes = sampler.sample(&test_image(), |_| {}).await;

        assert_eq!(outcomes.len(), 4);
        assert!(successful_replies(&outcomes).is_empty());
        match &outcomes[0] {
            SampleOutcome::Failed { iteration, reason } => {
                assert_eq!(*iteration, 0);
                assert!(reason.contains("model not found"));
            }
            SampleOutcome::Reply(_) => panic!("Expected failure"),
        }
    }

    #[tokio::test]
    async fn test_sampler_zero_iterations() {
        let provider = MockProvider::success("unused");
        let call_count = provider.call_count_handle();
        let sampler = Sampler::new(Box::new(provider), fast_options(0));

        let outcomes = sampler.sample(&test_image(), |_| {}).await;

        assert!(outcomes.is_empty());
        assert_eq!(call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sampler_retries_transient_error() {
        // First call: 429 (retryable), second call: success
        let provider = MockProvider::from_fn(|idx| {
            if idx == 0 {
                Err(SampleError::Llm {
                    message: "rate limited".to_string(),
                    status_code: Some(429),
                })
            } else {
                Ok(reply("beach, sand, waves"))
            }
        });
        let call_count = provider.call_count_handle();
        let options = SampleOptions {
            retry_attempts: 1,
            ..fast_options(1)
        };
        let sampler = Sampler::new(Box::new(provider), options);

        let outcomes = sampler.sample(&test_image(), |_| {}).await;

        assert_eq!(successful_replies(&outcomes), vec!["beach, sand, waves"]);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sampler_no_retry_on_auth_error() {
        let provider = MockProvider::failing(Some(401), "unauthorized");
        let call_count = provider.call_count_handle();
        let options = SampleOptions {
            retry_attempts: 3, // Would retry 3 times if retryable
            ..fast_options(1)
        };
        let sampler = Sampler::new(Box::new(provider), options);

        let outcomes = sampler.sample(&test_image(), |_| {}).await;

        assert!(successful_replies(&outcomes).is_empty());
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sampler_exhausts_retries() {
        let provider = MockProvider::failing(Some(503), "service unavailable");
        let call_count = provider.call_count_handle();
        let options = SampleOptions {
            retry_attempts: 2,
            ..fast_options(1)
        };
        let sampler = Sampler::new(Box::new(provider), options);

        let outcomes = sampler.sample(&test_image(), |_| {}).await;

        assert!(successful_replies(&outcomes).is_empty());
        // 1 initial + 2 retries = 3 total calls
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_sampler_timeout_is_skipped() {
        // Provider sleeps longer than the sampler's per-request timeout
        let provider = MockProvider::success("too slow").with_delay(Duration::from_secs(5));
        let options = SampleOptions {
            timeout_ms: 50,
            ..fast_options(1)
        };
        let sampler = Sampler::new(Box::new(provider), options);

        let outcomes = sampler.sample(&test_image(), |_| {}).await;

        match &outcomes[0] {
            SampleOutcome::Failed { reason, .. } => {
                assert!(reason.contains("Timeout"), "Expected timeout, got: {reason}");
            }
            SampleOutcome::Reply(_) => panic!("Expected timeout failure"),
        }
    }

    #[tokio::test]
    async fn test_sampler_progress_callback_fires_per_iteration() {
        let provider = MockProvider::success("cat");
        let sampler = Sampler::new(Box::new(provider), fast_options(7));

        let mut seen = 0u32;
        sampler.sample(&test_image(), |_| seen += 1).await;

        assert_eq!(seen, 7);
    }
}
