//! Core workflow for paradigm
//!
//! This library owns the editor-integration workflow around an external
//! OOP⇄FP transformation engine:
//! - Acquire the active document from the host editor
//! - Invoke the engine with the full source and a target mode
//! - Atomically replace the whole document with the result
//! - Leave the document byte-for-byte untouched on any failure
//!
//! The host editor is consumed through the narrow [`host::EditorHost`]
//! trait, so the same workflow runs behind an LSP server or a plain
//! file-based CLI.

pub mod document;
pub mod error;
pub mod host;
pub mod invoker;
pub mod registry;
pub mod replace;
pub mod workflow;

pub use document::{DocumentHandle, DocumentPosition, DocumentRange, DocumentState};
pub use error::WorkflowError;
pub use host::{DocumentEdit, EditorHost, HostError, Notice};
pub use invoker::{invoke, TransformOutcome};
pub use registry::{Command, CommandRegistry};
pub use workflow::TransformWorkflow;
