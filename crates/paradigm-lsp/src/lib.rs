//! paradigm Language Server
//!
//! Exposes the whole-document OOP⇄FP transformation to editors through
//! LSP `workspace/executeCommand`:
//! - `paradigm.transformToOop`: rewrite towards the OOP style
//! - `paradigm.transformToFp`: rewrite towards the functional style
//! - `paradigm.greet`: engine liveness check
//!
//! The transformed text is installed through `workspace/applyEdit` as a
//! single atomic delete+insert transaction covering the entire
//! document; on engine failure the document is never touched.
//!
//! # Binary Usage
//!
//! ```bash
//! # Start the language server (typically launched by an editor)
//! paradigm-lsp
//!
//! # With debug logging
//! RUST_LOG=debug paradigm-lsp
//! ```

pub mod config;
pub mod server;

// Re-export main entry point
pub use server::run_server;

pub use config::Settings;
