//! Document identity, positions and range math
//!
//! Positions are `(line, character)` pairs with characters counted in
//! UTF-16 code units, matching how editors address text. The full
//! document range is always recomputed from the text it is about to be
//! applied to, never reused from an earlier snapshot.

/// Identity of the document a workflow invocation operates on.
///
/// `id` is the host's stable identifier (an LSP URI, a file path);
/// `name` is only ever used for user messaging. `version` is the host's
/// change counter at the moment the document was acquired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    pub id: String,
    pub name: String,
    pub version: i32,
}

/// A document's content as read from the host at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    pub text: String,
    pub version: i32,
}

/// A `(line, character)` position, zero-indexed, UTF-16 columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentPosition {
    pub line: u32,
    pub character: u32,
}

impl DocumentPosition {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A half-open `[start, end)` region of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentRange {
    pub start: DocumentPosition,
    pub end: DocumentPosition,
}

/// Compute the range spanning the entire document: start of the first
/// line to the end of the last line. For an empty document this
/// degenerates to the single position `(0, 0)`.
pub fn full_document_range(text: &str) -> DocumentRange {
    let mut lines = 0u32;
    let mut last_line = "";
    for line in text.split('\n') {
        lines += 1;
        last_line = line;
    }
    let end_character: u32 = last_line.chars().map(|c| c.len_utf16() as u32).sum();
    DocumentRange {
        start: DocumentPosition::new(0, 0),
        end: DocumentPosition::new(lines.saturating_sub(1), end_character),
    }
}

/// Convert a position into a byte offset within `text`.
///
/// Positions past the end of a line clamp to the line end; positions
/// past the last line clamp to the end of the text.
pub fn byte_offset(text: &str, position: DocumentPosition) -> usize {
    let mut offset = 0usize;
    for (idx, line) in text.split('\n').enumerate() {
        if idx as u32 == position.line {
            let mut units = 0u32;
            for ch in line.chars() {
                if units >= position.character {
                    break;
                }
                units += ch.len_utf16() as u32;
                offset += ch.len_utf8();
            }
            return offset;
        }
        // +1 for the '\n' separator
        offset += line.len() + 1;
    }
    text.len()
}
