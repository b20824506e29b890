//! The engine contract
//!
//! A [`TransformEngine`] is the external collaborator that performs the
//! actual rewrite. The workflow treats it as a black box: one call, one
//! result, no retries. Implementations must not mutate anything the
//! caller can observe besides their own process state.

use crate::error::Result;
use crate::request::TransformRequest;

/// Contract for transformation engines
pub trait TransformEngine: Send + Sync {
    /// Identifier for this engine (e.g., "process", "mock")
    fn name(&self) -> &'static str;

    /// Transform the request's source into the requested style.
    ///
    /// A single failed call is surfaced immediately; callers never
    /// retry. No validation of the source is performed here beyond
    /// passing it through verbatim.
    fn transform(&self, request: &TransformRequest) -> Result<String>;

    /// Greeting call, used as a liveness/smoke check from the command
    /// surface.
    fn greet(&self, name: &str) -> Result<String>;
}
