//! Extract, plan, render, assemble: the whole run over one source text.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{info, warn};

use crate::core::backend::CompletionBackend;
use crate::core::extractor::extract;
use crate::core::planner::plan_all;
use crate::core::renderer::Renderer;
use crate::core::suite::assemble_suite;
use crate::error::ExtractionError;
use crate::models::{Config, Provenance, TestSuiteDocument};

/// Shared stop request, checked between scenarios and awaited while the
/// renderer waits on the call gate
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<CancelState>);

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called
    pub async fn cancelled(&self) {
        loop {
            // register before checking so a concurrent cancel is not missed
            let notified = self.0.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Per-run counts of how tests were produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub methods: usize,
    pub scenarios: usize,
    pub generated: usize,
    pub fallback: usize,
    /// Set when the run stopped before rendering every scenario
    pub cancelled: bool,
}

impl fmt::Display for RenderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Methods:   {}", self.methods)?;
        writeln!(f, "Scenarios: {}", self.scenarios)?;
        writeln!(f, "Generated: {}", self.generated)?;
        write!(f, "Fallback:  {}", self.fallback)?;
        if self.cancelled {
            write!(f, "\nCancelled: {} scenario(s) not rendered",
                self.scenarios - self.generated - self.fallback)?;
        }
        Ok(())
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub document: TestSuiteDocument,
    pub summary: RenderSummary,
}

/// Run the pipeline over one Java source text.
///
/// Only extraction failures are errors. Without a backend every scenario is
/// rendered from templates. Cancellation lets an in-flight backend call
/// finish, starts no new one, and still returns the tests rendered so far.
pub async fn run_pipeline<B: CompletionBackend>(
    source: &str,
    backend: Option<&B>,
    config: &Config,
    cancel: &CancellationFlag,
) -> Result<PipelineOutput, ExtractionError> {
    let unit = extract(source)?;
    info!("Found class: {}", unit.class_name);
    info!("Found {} testable methods", unit.methods.len());

    if unit.methods.is_empty() {
        return Err(ExtractionError::NoTestableMethods(unit.class_name));
    }

    let scenarios = plan_all(&unit.methods);
    info!("Planned {} test scenarios", scenarios.len());

    let mut renderer = Renderer::new(
        unit.class_name.clone(),
        backend,
        config.backend.clone(),
        config.behavior.min_call_delay(),
    );

    let mut summary = RenderSummary {
        methods: unit.methods.len(),
        scenarios: scenarios.len(),
        ..RenderSummary::default()
    };
    let mut tests = Vec::with_capacity(scenarios.len());

    for scenario in &scenarios {
        let Some(rendered) = renderer.render_unless_cancelled(scenario, cancel).await else {
            warn!("Cancelled after {} of {} scenarios", tests.len(), scenarios.len());
            summary.cancelled = true;
            break;
        };

        match rendered.backend {
            Provenance::Generated => summary.generated += 1,
            Provenance::Fallback => summary.fallback += 1,
        }
        tests.push(rendered);
    }

    let document = assemble_suite(&unit, tests);
    Ok(PipelineOutput { document, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::CompletionRequest;
    use crate::error::BackendError;

    struct Unreachable;

    impl CompletionBackend for Unreachable {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, BackendError> {
            Err(BackendError::Timeout(1))
        }
    }

    const SOURCE: &str = "public class Counter {\n    public int inc(int x) {\n        return x + 1;\n    }\n}\n";

    #[tokio::test]
    async fn test_pipeline_offline() {
        let output = run_pipeline::<Unreachable>(SOURCE, None, &Config::default(), &CancellationFlag::new())
            .await
            .unwrap();
        assert_eq!(output.summary.methods, 1);
        assert_eq!(output.summary.scenarios, 2);
        assert_eq!(output.summary.fallback, 2);
        assert_eq!(output.summary.generated, 0);
        assert!(!output.summary.cancelled);
        assert_eq!(output.document.class_name, "CounterTest");
    }

    #[tokio::test]
    async fn test_pipeline_no_methods() {
        let err = run_pipeline::<Unreachable>(
            "public class Empty {}",
            None,
            &Config::default(),
            &CancellationFlag::new(),
        )
        .await
        .unwrap_err();
        assert_eq!(err, ExtractionError::NoTestableMethods("Empty".to_string()));
    }

    #[tokio::test]
    async fn test_pipeline_cancelled_before_start() {
        let cancel = CancellationFlag::new();
        cancel.cancel();
        let output = run_pipeline::<Unreachable>(SOURCE, None, &Config::default(), &cancel)
            .await
            .unwrap();
        assert!(output.summary.cancelled);
        assert!(output.document.tests.is_empty());
        assert!(output.summary.to_string().contains("Cancelled: 2 scenario(s) not rendered"));
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let cancel = CancellationFlag::new();
        let waiter = cancel.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });
        tokio::task::yield_now().await;
        cancel.cancel();
        handle.await.unwrap();
        assert!(cancel.is_cancelled());

        // already cancelled: returns at once
        cancel.cancelled().await;
    }

    #[test]
    fn test_summary_display() {
        let summary = RenderSummary { methods: 2, scenarios: 5, generated: 3, fallback: 2, cancelled: false };
        assert_eq!(
            summary.to_string(),
            "Methods:   2\nScenarios: 5\nGenerated: 3\nFallback:  2"
        );
    }
}
