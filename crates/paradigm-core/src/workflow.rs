//! The transform workflow
//!
//! Orchestrates one command invocation end to end: fetch the active
//! document, invoke the engine, replace the document on success, leave
//! it untouched on failure. All outcomes are reported through the
//! host's notification sink; nothing here returns an error to the
//! caller and nothing can crash the host process.

use paradigm_engine::{TransformEngine, TransformMode, TransformRequest};

use crate::error::WorkflowError;
use crate::host::{EditorHost, Notice};
use crate::invoker::{invoke, TransformOutcome};
use crate::replace::replace;

/// One-shot workflow over a host and an engine. Holds no state across
/// invocations.
pub struct TransformWorkflow<'a> {
    host: &'a dyn EditorHost,
    engine: &'a dyn TransformEngine,
}

impl<'a> TransformWorkflow<'a> {
    pub fn new(host: &'a dyn EditorHost, engine: &'a dyn TransformEngine) -> Self {
        Self { host, engine }
    }

    /// Transform the active document towards `mode`.
    ///
    /// Side effects only: the document is mutated if and only if the
    /// engine succeeds and the document has not changed underneath the
    /// pending transformation. Every [`WorkflowError`] is terminal to
    /// this invocation and surfaced as a notice, never propagated.
    pub async fn run(&self, mode: TransformMode) {
        match self.try_run(mode).await {
            Ok(()) => {}
            Err(WorkflowError::NoActiveDocument) => {
                self.host
                    .notify(Notice::Log, "Open the file you would like to transform")
                    .await;
            }
            Err(WorkflowError::Transformation(cause)) => {
                tracing::warn!(error = %cause, "transformation failed");
                self.host
                    .notify(Notice::Warning, &format!("Transformation failed: {}", cause))
                    .await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not apply transformation");
                self.host
                    .notify(Notice::Log, &format!("Could not apply transformation: {}", err))
                    .await;
            }
        }
    }

    async fn try_run(&self, mode: TransformMode) -> Result<(), WorkflowError> {
        let doc = self
            .host
            .active_document()
            .await
            .ok_or(WorkflowError::NoActiveDocument)?;
        let state = self
            .host
            .document_state(&doc)
            .await
            .ok_or(WorkflowError::NoActiveDocument)?;

        self.host
            .notify(Notice::Info, &format!("Transforming {}", doc.name))
            .await;

        // The version token in the handle is the one the source was
        // read at; replace() compares against it after the engine runs.
        let doc = crate::document::DocumentHandle {
            version: state.version,
            ..doc
        };

        let request = TransformRequest::new(state.text, mode);
        match invoke(self.engine, request) {
            TransformOutcome::Success(text) => {
                replace(self.host, &doc, text).await?;
                tracing::info!(doc = %doc.id, mode = %mode, "transformation applied");
                self.host.format_document(&doc).await;
                Ok(())
            }
            TransformOutcome::Failure(cause) => Err(WorkflowError::Transformation(cause)),
        }
    }

    /// Liveness check: ask the engine for a greeting and show it.
    pub async fn greet(&self, name: &str) {
        match self.engine.greet(name) {
            Ok(greeting) => self.host.notify(Notice::Info, &greeting).await,
            Err(err) => {
                tracing::warn!(error = %err, "greeting failed");
                self.host
                    .notify(Notice::Log, &format!("Greeting failed: {}", err))
                    .await;
            }
        }
    }
}
