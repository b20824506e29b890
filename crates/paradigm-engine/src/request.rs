//! Transformation request types
//!
//! A request pairs the source text with the target style. Requests are
//! pure inputs: nothing here is persisted across invocations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target style of the transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Rewrite towards an object-oriented decomposition (traits/impls)
    Oop,
    /// Rewrite towards a functional decomposition (enums/matches)
    Functional,
}

impl TransformMode {
    /// Whether this mode targets the object-oriented style
    pub fn is_oop(self) -> bool {
        matches!(self, TransformMode::Oop)
    }

    /// Short flag value used on engine command lines
    pub fn flag(self) -> &'static str {
        match self {
            TransformMode::Oop => "oop",
            TransformMode::Functional => "fp",
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// A single transformation request: full source text plus target mode
#[derive(Debug, Clone)]
pub struct TransformRequest {
    /// The document's full text, passed through verbatim
    pub source: String,
    /// Target style
    pub mode: TransformMode,
}

impl TransformRequest {
    /// Create a new request
    pub fn new(source: impl Into<String>, mode: TransformMode) -> Self {
        Self {
            source: source.into(),
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flags() {
        assert_eq!(TransformMode::Oop.flag(), "oop");
        assert_eq!(TransformMode::Functional.flag(), "fp");
        assert!(TransformMode::Oop.is_oop());
        assert!(!TransformMode::Functional.is_oop());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(TransformMode::Functional.to_string(), "fp");
    }

    #[test]
    fn test_request_passes_source_verbatim() {
        let request = TransformRequest::new("  weird\tsource\n", TransformMode::Oop);
        assert_eq!(request.source, "  weird\tsource\n");
    }
}
