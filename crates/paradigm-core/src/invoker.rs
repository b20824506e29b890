//! Transformation invoker
//!
//! Normalizes a single engine call into a result-or-failure value. One
//! attempt only; a failed call is surfaced immediately.

use paradigm_engine::{EngineError, TransformEngine, TransformRequest};

/// Outcome of one transformation: exactly one of the two, never a
/// partial or streamed result.
#[derive(Debug)]
pub enum TransformOutcome {
    Success(String),
    Failure(EngineError),
}

/// Invoke the engine once with the given request
pub fn invoke(engine: &dyn TransformEngine, request: TransformRequest) -> TransformOutcome {
    tracing::debug!(
        engine = engine.name(),
        mode = %request.mode,
        bytes = request.source.len(),
        "invoking transformation engine"
    );
    match engine.transform(&request) {
        Ok(text) => TransformOutcome::Success(text),
        Err(err) => TransformOutcome::Failure(err),
    }
}
