//! End-to-end workflow tests over the file host
//!
//! Drives the same workflow the binary uses, with scripted engines in
//! place of the external executable.

use std::fs;
use std::io::Write;
use std::sync::Mutex;

use tempfile::NamedTempFile;

use paradigm_cli::FileHost;
use paradigm_core::TransformWorkflow;
use paradigm_engine::{EngineError, TransformEngine, TransformMode, TransformRequest};

struct FixedEngine {
    output: Option<String>,
    requests: Mutex<Vec<(String, TransformMode)>>,
}

impl FixedEngine {
    fn returning(output: &str) -> Self {
        Self {
            output: Some(output.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            output: None,
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl TransformEngine for FixedEngine {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn transform(&self, request: &TransformRequest) -> paradigm_engine::Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((request.source.clone(), request.mode));
        match &self.output {
            Some(text) => Ok(text.clone()),
            None => Err(EngineError::Failed {
                code: Some(2),
                message: "cannot transform this input".to_string(),
            }),
        }
    }

    fn greet(&self, name: &str) -> paradigm_engine::Result<String> {
        Ok(format!("Hello {}", name))
    }
}

fn file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[tokio::test]
async fn transform_replaces_file_contents_exactly() {
    let file = file_with("def f(x): return x");
    let engine = FixedEngine::returning("const f = x => x;");
    let host = FileHost::new(file.path()).quiet();

    TransformWorkflow::new(&host, &engine)
        .run(TransformMode::Functional)
        .await;

    assert_eq!(
        fs::read_to_string(file.path()).unwrap(),
        "const f = x => x;"
    );
    let requests = engine.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "def f(x): return x");
    assert_eq!(requests[0].1, TransformMode::Functional);
}

#[tokio::test]
async fn failed_transform_leaves_file_untouched() {
    let file = file_with("trait Shape { fn area(&self) -> f64; }");
    let engine = FixedEngine::failing();
    let host = FileHost::new(file.path()).quiet();

    TransformWorkflow::new(&host, &engine)
        .run(TransformMode::Oop)
        .await;

    assert_eq!(
        fs::read_to_string(file.path()).unwrap(),
        "trait Shape { fn area(&self) -> f64; }"
    );
}

#[tokio::test]
async fn missing_file_never_calls_the_engine() {
    let engine = FixedEngine::returning("unused");
    let host = FileHost::new("/nowhere/missing.rs").quiet();

    TransformWorkflow::new(&host, &engine)
        .run(TransformMode::Oop)
        .await;

    assert!(engine.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn multiline_file_is_fully_replaced() {
    let file = file_with("enum Exp {\n    Lit(i64),\n    Add(Box<Exp>, Box<Exp>),\n}\n");
    let engine = FixedEngine::returning("trait Exp { fn eval(&self) -> i64; }\n");
    let host = FileHost::new(file.path()).quiet();

    TransformWorkflow::new(&host, &engine)
        .run(TransformMode::Oop)
        .await;

    let result = fs::read_to_string(file.path()).unwrap();
    assert_eq!(result, "trait Exp { fn eval(&self) -> i64; }\n");
    // No residue of the old enum body
    assert!(!result.contains("Lit"));
}

#[tokio::test]
async fn empty_file_is_transformable() {
    let file = file_with("");
    let engine = FixedEngine::returning("fn main() {}");
    let host = FileHost::new(file.path()).quiet();

    TransformWorkflow::new(&host, &engine)
        .run(TransformMode::Functional)
        .await;

    assert_eq!(fs::read_to_string(file.path()).unwrap(), "fn main() {}");
}
