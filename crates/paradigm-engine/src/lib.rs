//! Transformation engine adapters for paradigm
//!
//! The actual source-to-source rewrite (OOP design ⇄ functional design)
//! lives in an external engine executable. This crate owns the seam:
//! the [`TransformEngine`] trait the workflow talks to, the request and
//! mode types that cross it, and a subprocess-backed implementation.
//!
//! # Example
//!
//! ```ignore
//! use paradigm_engine::{ProcessEngine, TransformEngine, TransformMode, TransformRequest};
//!
//! let engine = ProcessEngine::new("rewriter");
//! let request = TransformRequest::new("trait Shape { fn area(&self) -> f64; }", TransformMode::Functional);
//! let output = engine.transform(&request)?;
//! ```

pub mod engine;
pub mod error;
pub mod process;
pub mod request;

pub use engine::TransformEngine;
pub use error::{EngineError, Result};
pub use process::ProcessEngine;
pub use request::{TransformMode, TransformRequest};
