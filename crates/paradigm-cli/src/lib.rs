//! paradigm CLI - file-based front end to the transform workflow
//!
//! The file named on the command line plays the role of the active
//! document: the same workflow that backs the language server reads it,
//! runs the external engine, and splices the result back in place (or
//! into `--output`). On engine failure the file is left untouched.

pub mod app;
pub mod host;

pub use app::run;
pub use host::FileHost;
