//! Sequential Planner → Reviewer → Finalizer runner.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{PublishflowError, TransportError};
use crate::events::{EventSink, NoOpEventSink, PipelineEvent};
use crate::extract::StructuredCaller;
use crate::observability::{SpanTimer, StageSpanAttributes};
use crate::stages::{
    run_finalizer, run_planner, run_reviewer, PublishPackage, StageKind, StageReport, StageResult,
};
use crate::utils::generate_run_id;

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fail the run when a stage degrades instead of continuing with
    /// defaults.
    #[serde(default)]
    pub fail_on_degraded: bool,
}

impl PipelineConfig {
    /// Creates a new config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether degraded stages are fatal.
    #[must_use]
    pub fn with_fail_on_degraded(mut self, fail: bool) -> Self {
        self.fail_on_degraded = fail;
        self
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Run identifier, also carried by every emitted event.
    pub run_id: Uuid,
    /// Planner output.
    pub planner: StageResult,
    /// Reviewer output.
    pub reviewer: StageResult,
    /// Hardened Finalizer output.
    pub finalized: StageResult,
    /// Publish package.
    pub publish: PublishPackage,
    /// Stages that degraded to defaults, in execution order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_stages: Vec<StageKind>,
}

/// Runs the three stages strictly in order. Each stage waits for the
/// previous one; a transport error ends the run without partial output.
#[derive(Clone)]
pub struct PublishPipeline {
    caller: StructuredCaller,
    sink: Arc<dyn EventSink>,
    config: PipelineConfig,
}

impl std::fmt::Debug for PublishPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishPipeline")
            .field("caller", &self.caller)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PublishPipeline {
    /// Creates a pipeline that discards events.
    #[must_use]
    pub fn new(caller: StructuredCaller) -> Self {
        Self {
            caller,
            sink: Arc::new(NoOpEventSink),
            config: PipelineConfig::default(),
        }
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the run configuration.
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the pipeline over one blog post.
    pub async fn run(&self, title: &str, content: &str) -> Result<PipelineRun, PublishflowError> {
        let run_id = generate_run_id();
        let timer = SpanTimer::start("pipeline");
        let mut degraded_stages = Vec::new();

        tracing::info!(%run_id, title, "Pipeline started");

        let planner = self
            .run_stage(
                run_id,
                StageKind::Planner,
                run_planner(&self.caller, title, content),
            )
            .await?;
        if planner.degraded {
            degraded_stages.push(StageKind::Planner);
        }
        let planner = planner.into_output();

        let reviewer = self
            .run_stage(run_id, StageKind::Reviewer, run_reviewer(&self.caller, &planner))
            .await?;
        if reviewer.degraded {
            degraded_stages.push(StageKind::Reviewer);
        }
        let reviewer = reviewer.into_output();

        let finalizer = self
            .run_stage(
                run_id,
                StageKind::Finalizer,
                run_finalizer(&self.caller, title, content, &planner, &reviewer),
            )
            .await?;
        if finalizer.degraded {
            degraded_stages.push(StageKind::Finalizer);
        }
        let output = finalizer.into_output();

        let duration_ms = timer.finish();
        self.sink
            .emit(
                &PipelineEvent::new("pipeline.completed", run_id).with_data(json!({
                    "duration_ms": duration_ms,
                    "degraded_stages": degraded_stages,
                })),
            )
            .await;
        tracing::info!(%run_id, duration_ms, ?degraded_stages, "Pipeline completed");

        Ok(PipelineRun {
            run_id,
            planner,
            reviewer,
            finalized: output.finalized,
            publish: output.publish,
            degraded_stages,
        })
    }

    async fn run_stage<T, F>(
        &self,
        run_id: Uuid,
        stage: StageKind,
        call: F,
    ) -> Result<StageReport<T>, PublishflowError>
    where
        F: Future<Output = Result<StageReport<T>, TransportError>>,
    {
        self.sink
            .emit(&PipelineEvent::new("stage.started", run_id).with_stage(stage))
            .await;
        let timer = SpanTimer::start(stage.to_string());
        let attrs = StageSpanAttributes::new(stage).with_run_id(run_id.to_string());

        let report = match call.await {
            Ok(report) => report,
            Err(err) => {
                let attrs = attrs
                    .with_duration_ms(timer.finish())
                    .with_error(err.to_string());
                tracing::error!(%run_id, %stage, error = %err, "Stage failed");
                self.emit_failed(
                    run_id,
                    stage,
                    json!({
                        "error": err.to_string(),
                        "transport": err.to_dict(),
                        "attributes": attrs.to_attributes(),
                    }),
                )
                .await;
                return Err(err.into());
            }
        };

        let duration_ms = timer.finish();
        let attrs = attrs
            .with_outcome(report.attempts, report.degraded)
            .with_duration_ms(duration_ms);
        self.sink
            .emit(
                &PipelineEvent::new("stage.completed", run_id)
                    .with_stage(stage)
                    .with_data(json!({
                        "duration_ms": duration_ms,
                        "attempts": report.attempts,
                        "degraded": report.degraded,
                        "attributes": attrs.to_attributes(),
                    })),
            )
            .await;

        if report.degraded {
            tracing::warn!(%run_id, %stage, attempts = report.attempts, "Stage degraded to defaults");
            if self.config.fail_on_degraded {
                let err = PublishflowError::Degraded {
                    stage,
                    attempts: report.attempts,
                };
                let attrs = attrs.with_error(err.to_string());
                self.emit_failed(
                    run_id,
                    stage,
                    json!({
                        "error": err.to_string(),
                        "attributes": attrs.to_attributes(),
                    }),
                )
                .await;
                return Err(err);
            }
        } else {
            tracing::info!(%run_id, %stage, attempts = report.attempts, duration_ms, "Stage completed");
        }

        Ok(report)
    }

    async fn emit_failed(&self, run_id: Uuid, stage: StageKind, data: serde_json::Value) {
        self.sink
            .emit(
                &PipelineEvent::new("pipeline.failed", run_id)
                    .with_stage(stage)
                    .with_data(data),
            )
            .await;
    }
}
