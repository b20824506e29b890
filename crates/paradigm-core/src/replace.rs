//! Full-document replacement
//!
//! The replace range is computed from the document's *current* text at
//! replace time, not from the snapshot the transformation ran on. If
//! the host's version token moved while the transformation was pending,
//! the replace aborts rather than install text derived from a stale
//! source.

use crate::document::{full_document_range, DocumentHandle};
use crate::error::WorkflowError;
use crate::host::{DocumentEdit, EditorHost, HostError};

/// Build the whole-document edit for installing `new_text` over
/// `current_text`: delete the full range, insert at its start.
pub fn full_document_edit(current_text: &str, new_text: String) -> DocumentEdit {
    let range = full_document_range(current_text);
    DocumentEdit {
        delete: range,
        insert_at: range.start,
        new_text,
    }
}

/// Replace the entire document with `new_text` in one atomic edit
/// transaction. `doc.version` is the token captured when the source was
/// read; a mismatch with the host's current token aborts the replace.
pub async fn replace(
    host: &dyn EditorHost,
    doc: &DocumentHandle,
    new_text: String,
) -> Result<(), WorkflowError> {
    let state = host
        .document_state(doc)
        .await
        .ok_or_else(|| HostError::DocumentClosed(doc.id.clone()))?;

    if state.version != doc.version {
        return Err(WorkflowError::StaleDocument {
            expected: doc.version,
            found: state.version,
        });
    }

    let edit = full_document_edit(&state.text, new_text);
    tracing::debug!(
        doc = %doc.id,
        end_line = edit.delete.end.line,
        "applying whole-document edit"
    );
    host.apply_edit(doc, edit).await?;
    Ok(())
}
