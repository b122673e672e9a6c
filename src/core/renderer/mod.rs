//! Test rendering: backend generation with a deterministic fallback.

mod fallback;
mod sanitize;

pub use fallback::*;
pub use sanitize::*;

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::backend::{CompletionBackend, CompletionRequest};
use crate::core::pipeline::CancellationFlag;
use crate::core::prompts::{assemble_scenario_prompt, SYSTEM_PROMPT_TEST};
use crate::core::rate_limit::CallGate;
use crate::error::{BackendError, GenerationFailure};
use crate::models::{BackendConfig, Provenance, RenderedTest, ScenarioDescriptor};

/// Renders scenarios one at a time.
///
/// With no backend every scenario goes straight to its template.
pub struct Renderer<'b, B> {
    class_name: String,
    backend: Option<&'b B>,
    gate: CallGate,
    config: BackendConfig,
}

impl<'b, B: CompletionBackend> Renderer<'b, B> {
    pub fn new(
        class_name: impl Into<String>,
        backend: Option<&'b B>,
        config: BackendConfig,
        min_call_delay: Duration,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            backend,
            gate: CallGate::new(min_call_delay),
            config,
        }
    }

    /// Render one scenario. Never fails: backend and sanitization problems
    /// are logged and answered with the fallback template.
    pub async fn render(&mut self, scenario: &ScenarioDescriptor<'_>) -> RenderedTest {
        let never = CancellationFlag::new();
        match self.render_unless_cancelled(scenario, &never).await {
            Some(rendered) => rendered,
            None => self.fallback(scenario),
        }
    }

    /// Like [`Renderer::render`], but gives up with `None` when `cancel` is
    /// set before the backend call starts, including while waiting on the
    /// call gate. A call already in flight is allowed to finish.
    pub async fn render_unless_cancelled(
        &mut self,
        scenario: &ScenarioDescriptor<'_>,
        cancel: &CancellationFlag,
    ) -> Option<RenderedTest> {
        if cancel.is_cancelled() {
            return None;
        }

        let Some(backend) = self.backend else {
            debug!("No backend configured, using template for {}", scenario.test_name);
            return Some(self.fallback(scenario));
        };

        let request = self.request(scenario);
        debug!("Prompt for {}:\n{}", scenario.test_name, request.prompt);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Cancelled while waiting to render {}", scenario.test_name);
                return None;
            }
            _ = self.gate.wait() => {}
        }

        let rendered = match self.generate(backend, &request, &scenario.test_name).await {
            Ok(source) => {
                info!("  {} [generated]", scenario.test_name);
                RenderedTest {
                    test_name: scenario.test_name.clone(),
                    source,
                    backend: Provenance::Generated,
                }
            }
            Err(e) => {
                warn!("  {} [fallback]: {}", scenario.test_name, e);
                self.fallback(scenario)
            }
        };
        Some(rendered)
    }

    fn request(&self, scenario: &ScenarioDescriptor<'_>) -> CompletionRequest {
        CompletionRequest {
            system_prompt: Some(SYSTEM_PROMPT_TEST.to_string()),
            prompt: assemble_scenario_prompt(&self.class_name, scenario),
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
        }
    }

    async fn generate(
        &mut self,
        backend: &B,
        request: &CompletionRequest,
        test_name: &str,
    ) -> Result<String, GenerationFailure> {
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let reply = tokio::time::timeout(timeout, backend.complete(request)).await;
        self.gate.finished();

        let reply = reply.map_err(|_| BackendError::Timeout(self.config.timeout_seconds))??;
        Ok(sanitize_reply(&reply, test_name)?)
    }

    fn fallback(&self, scenario: &ScenarioDescriptor<'_>) -> RenderedTest {
        RenderedTest {
            test_name: scenario.test_name.clone(),
            source: render_fallback(&self.class_name, scenario),
            backend: Provenance::Fallback,
        }
    }
}
