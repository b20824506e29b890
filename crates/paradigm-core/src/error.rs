//! Workflow error taxonomy
//!
//! Failures are terminal to the current invocation only. They never
//! escape the workflow and never crash the host process.

use thiserror::Error;

use crate::host::HostError;
use paradigm_engine::EngineError;

/// Errors that can end a transform invocation
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// No document is focused in the host editor
    #[error("No active document")]
    NoActiveDocument,

    /// The transformation engine signalled failure; the document was
    /// not touched
    #[error("Transformation failed: {0}")]
    Transformation(#[from] EngineError),

    /// The document changed while the transformation was pending
    #[error("Document changed during transformation (version {expected} -> {found})")]
    StaleDocument { expected: i32, found: i32 },

    /// The host rejected the atomic edit (e.g., document closed)
    #[error("Edit rejected by host: {0}")]
    EditRejected(#[from] HostError),
}
