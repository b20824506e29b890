//! The consumed editor surface
//!
//! Everything the workflow needs from the host editor, and nothing
//! more: an active-document accessor, a state reader, one atomic edit
//! transaction, a fire-and-forget format request, and a notification
//! sink. The LSP server and the CLI each implement this once.

use async_trait::async_trait;
use thiserror::Error;

use crate::document::{DocumentHandle, DocumentPosition, DocumentRange, DocumentState};

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Visible informational message
    Info,
    /// Visible warning message
    Warning,
    /// Log/console-level message, not surfaced as a dialog
    Log,
}

/// A whole-document edit: delete the given range, then insert the new
/// text at the range's start, as one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEdit {
    pub delete: DocumentRange,
    pub insert_at: DocumentPosition,
    pub new_text: String,
}

/// Errors the host can report when asked to apply an edit
#[derive(Error, Debug)]
pub enum HostError {
    /// The document disappeared between acquisition and edit
    #[error("document is no longer open: {0}")]
    DocumentClosed(String),

    /// The host refused the edit transaction
    #[error("{0}")]
    Rejected(String),
}

/// Host editor surface consumed by the workflow
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// The currently focused document, if any
    async fn active_document(&self) -> Option<DocumentHandle>;

    /// The document's current full text and version token
    async fn document_state(&self, doc: &DocumentHandle) -> Option<DocumentState>;

    /// Apply one atomic edit transaction. Either the whole edit applies
    /// or none of it does; no partial state is ever observable.
    async fn apply_edit(&self, doc: &DocumentHandle, edit: DocumentEdit) -> Result<(), HostError>;

    /// Request the host's default document formatting, best-effort.
    /// Failure here never rolls back a previously applied edit.
    async fn format_document(&self, doc: &DocumentHandle);

    /// Emit a user-facing notice
    async fn notify(&self, level: Notice, message: &str);
}
