//! Subprocess-backed transformation engine
//!
//! Spawns a configured external executable, feeds it the source text on
//! stdin and reads the transformed text from stdout. The target style
//! is injected into the argument list through a `{mode}` placeholder,
//! the greeting name through `{name}`.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::engine::TransformEngine;
use crate::error::{EngineError, Result};
use crate::request::TransformRequest;

/// Placeholder replaced with the mode flag (`oop` / `fp`) in args
pub const MODE_PLACEHOLDER: &str = "{mode}";
/// Placeholder replaced with the greeting name in greet args
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Transformation engine that shells out to an external executable
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    command: String,
    args: Vec<String>,
    greet_args: Vec<String>,
}

impl ProcessEngine {
    /// Create an engine with the default argument layout:
    /// `<command> transform --stdin --to {mode}` and `<command> greet {name}`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: vec![
                "transform".to_string(),
                "--stdin".to_string(),
                "--to".to_string(),
                MODE_PLACEHOLDER.to_string(),
            ],
            greet_args: vec!["greet".to_string(), NAME_PLACEHOLDER.to_string()],
        }
    }

    /// Override the transform argument list (placeholders substituted)
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Override the greet argument list (placeholders substituted)
    pub fn with_greet_args(mut self, greet_args: Vec<String>) -> Self {
        self.greet_args = greet_args;
        self
    }

    /// The configured executable
    pub fn command(&self) -> &str {
        &self.command
    }

    fn substituted_args(&self, args: &[String], key: &str, value: &str) -> Vec<String> {
        args.iter().map(|a| a.replace(key, value)).collect()
    }

    /// Run the executable, writing `input` to stdin, and return stdout.
    fn run(&self, args: Vec<String>, input: &str) -> Result<String> {
        log::debug!("Spawning engine: {} {:?}", self.command, args);

        let mut child = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                EngineError::Unavailable(format!("failed to start '{}': {}", self.command, e))
            })?;

        // Feed stdin from a separate thread while draining stdout here.
        // An engine that streams output as it reads would otherwise
        // deadlock with the parent once both pipe buffers fill.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = input.to_string();
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            match writer.join() {
                // The engine may legitimately exit without reading all
                // of its input; log and judge it by its exit status.
                Ok(Err(e)) => log::debug!("Engine '{}' closed stdin early: {}", self.command, e),
                Ok(Ok(())) => {}
                Err(_) => {
                    return Err(EngineError::InvalidOutput(
                        "stdin writer thread panicked".to_string(),
                    ))
                }
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::warn!(
                "Engine '{}' exited with {:?}: {}",
                self.command,
                output.status.code(),
                stderr
            );
            return Err(EngineError::Failed {
                code: output.status.code(),
                message: if stderr.is_empty() {
                    "engine reported failure".to_string()
                } else {
                    stderr
                },
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|e| EngineError::InvalidOutput(format!("stdout is not UTF-8: {}", e)))
    }
}

impl TransformEngine for ProcessEngine {
    fn name(&self) -> &'static str {
        "process"
    }

    fn transform(&self, request: &TransformRequest) -> Result<String> {
        let args = self.substituted_args(&self.args, MODE_PLACEHOLDER, request.mode.flag());
        self.run(args, &request.source)
    }

    fn greet(&self, name: &str) -> Result<String> {
        let args = self.substituted_args(&self.greet_args, NAME_PLACEHOLDER, name);
        let greeting = self.run(args, "")?;
        Ok(greeting.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::TransformMode;

    #[test]
    fn test_mode_placeholder_substitution() {
        let engine = ProcessEngine::new("rewriter");
        let args = engine.substituted_args(&engine.args, MODE_PLACEHOLDER, "fp");
        assert_eq!(args, vec!["transform", "--stdin", "--to", "fp"]);
    }

    #[test]
    fn test_name_placeholder_substitution() {
        let engine = ProcessEngine::new("rewriter");
        let args = engine.substituted_args(&engine.greet_args, NAME_PLACEHOLDER, "James");
        assert_eq!(args, vec!["greet", "James"]);
    }

    #[test]
    fn test_missing_executable_is_unavailable() {
        let engine = ProcessEngine::new("definitely-not-a-real-binary-71c2");
        let request = TransformRequest::new("fn main() {}", TransformMode::Oop);
        let err = engine.transform(&request).unwrap_err();
        assert!(matches!(err, EngineError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_identity_engine_via_cat() {
        // `cat` echoes stdin, so it acts as an identity transformer.
        let engine = ProcessEngine::new("cat").with_args(vec![]);
        let request = TransformRequest::new("enum Exp { Lit(i64) }", TransformMode::Functional);
        let out = engine.transform(&request).unwrap();
        assert_eq!(out, "enum Exp { Lit(i64) }");
    }

    #[cfg(unix)]
    #[test]
    fn test_large_input_streams_through() {
        // `cat` streams output while still reading input, so a document
        // much larger than the OS pipe buffers exercises concurrent
        // stdin/stdout traffic end to end.
        let engine = ProcessEngine::new("cat").with_args(vec![]);
        let source = "fn f() { /* padding line */ }\n".repeat(40_000);
        assert!(source.len() > 1024 * 1024);

        let request = TransformRequest::new(source.clone(), TransformMode::Oop);
        let out = engine.transform(&request).unwrap();
        assert_eq!(out, source);
    }

    #[cfg(unix)]
    #[test]
    fn test_greet_via_echo() {
        let engine = ProcessEngine::new("echo")
            .with_greet_args(vec!["Hello".to_string(), NAME_PLACEHOLDER.to_string()]);
        let greeting = engine.greet("James").unwrap();
        assert_eq!(greeting, "Hello James");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failed() {
        let engine = ProcessEngine::new("false").with_args(vec![]);
        let request = TransformRequest::new("x", TransformMode::Oop);
        let err = engine.transform(&request).unwrap_err();
        assert!(matches!(err, EngineError::Failed { .. }));
    }
}
