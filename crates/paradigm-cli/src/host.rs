//! File-backed editor host
//!
//! Treats one file on disk as the active document. The atomic edit
//! transaction is a full splice performed in memory and written out in
//! a single `fs::write`, so a failed transformation never leaves a
//! half-written file behind.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use paradigm_core::document::byte_offset;
use paradigm_core::{DocumentEdit, DocumentHandle, DocumentState, EditorHost, HostError, Notice};

/// Editor host over a single file
pub struct FileHost {
    input: PathBuf,
    output: PathBuf,
    quiet: bool,
}

impl FileHost {
    /// Host that edits `input` in place
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        Self {
            output: input.clone(),
            input,
            quiet: false,
        }
    }

    /// Write the result somewhere other than the input file
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Suppress informational output (tests)
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.input).ok()
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

#[async_trait]
impl EditorHost for FileHost {
    async fn active_document(&self) -> Option<DocumentHandle> {
        if !self.input.is_file() {
            return None;
        }
        Some(DocumentHandle {
            id: self.input.display().to_string(),
            name: Self::file_name(&self.input),
            // A file has no change counter; the single-threaded CLI
            // cannot race itself, so the token is constant.
            version: 0,
        })
    }

    async fn document_state(&self, _doc: &DocumentHandle) -> Option<DocumentState> {
        self.read().map(|text| DocumentState { text, version: 0 })
    }

    async fn apply_edit(&self, doc: &DocumentHandle, edit: DocumentEdit) -> Result<(), HostError> {
        let text = self
            .read()
            .ok_or_else(|| HostError::DocumentClosed(doc.id.clone()))?;

        let start = byte_offset(&text, edit.delete.start);
        let end = byte_offset(&text, edit.delete.end);

        let mut next = String::with_capacity(text.len() - (end - start) + edit.new_text.len());
        next.push_str(&text[..start]);
        next.push_str(&edit.new_text);
        next.push_str(&text[end..]);

        fs::write(&self.output, next).map_err(|e| HostError::Rejected(e.to_string()))
    }

    async fn format_document(&self, _doc: &DocumentHandle) {
        // No formatter on the CLI path; the LSP client owns formatting.
    }

    async fn notify(&self, level: Notice, message: &str) {
        match level {
            Notice::Info if !self.quiet => println!("{}", message),
            Notice::Info => {}
            Notice::Warning | Notice::Log => eprintln!("{}", message),
        }
    }
}
