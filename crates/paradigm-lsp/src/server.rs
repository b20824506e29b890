//! LSP server backend
//!
//! Tracks open documents with full-text sync, exposes the transform
//! commands through `workspace/executeCommand`, and implements the
//! workflow's [`EditorHost`] over the LSP client: the atomic
//! whole-document edit goes out as `workspace/applyEdit`, notices as
//! `window/showMessage` / `window/logMessage`, and the best-effort
//! format request as a custom `paradigm/formatDocument` notification.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, DidSaveTextDocumentParams, ExecuteCommandOptions,
    ExecuteCommandParams, InitializeParams, InitializeResult, InitializedParams, MessageType,
    Position, Range, ServerCapabilities, ServerInfo, TextDocumentSyncCapability,
    TextDocumentSyncKind, TextEdit, Url, WorkDoneProgressOptions, WorkspaceEdit,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use paradigm_core::{
    Command, CommandRegistry, DocumentEdit, DocumentHandle, DocumentPosition, DocumentState,
    EditorHost, HostError, Notice, TransformWorkflow,
};

use crate::config::Settings;

/// Custom client notification asking the editor to run its default
/// document formatting on a file. Fire-and-forget; clients that do not
/// handle it lose only the cosmetic reformat.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatDocumentParams {
    pub uri: Url,
}

pub enum FormatDocument {}

impl Notification for FormatDocument {
    type Params = FormatDocumentParams;
    const METHOD: &'static str = "paradigm/formatDocument";
}

/// One tracked open document
#[derive(Debug, Clone)]
struct TrackedDocument {
    text: String,
    version: i32,
}

/// LSP backend state
pub struct Backend {
    /// LSP client for edits and notifications
    client: Client,
    /// Document store for open documents
    documents: Arc<RwLock<HashMap<Url, TrackedDocument>>>,
    /// Most recently opened/changed/saved document
    active: Arc<RwLock<Option<Url>>>,
    /// Command surface, torn down on shutdown
    registry: Arc<RwLock<CommandRegistry>>,
    /// Server settings
    settings: Arc<RwLock<Settings>>,
}

impl Backend {
    /// Create a new backend instance
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            active: Arc::new(RwLock::new(None)),
            registry: Arc::new(RwLock::new(CommandRegistry::with_defaults())),
            settings: Arc::new(RwLock::new(Settings::default())),
        }
    }

    /// Store document text and mark it active
    async fn track_document(&self, uri: Url, text: String, version: i32) {
        let mut docs = self.documents.write().await;
        docs.insert(uri.clone(), TrackedDocument { text, version });
        drop(docs);
        *self.active.write().await = Some(uri);
    }

    /// Remove document from the store
    async fn untrack_document(&self, uri: &Url) {
        self.documents.write().await.remove(uri);
        let mut active = self.active.write().await;
        if active.as_ref() == Some(uri) {
            *active = None;
        }
    }

    /// Resolve the document a command should act on: an explicit URI
    /// argument wins, otherwise the most recently touched document.
    async fn resolve_target(&self, arguments: &[Value]) -> Option<Url> {
        if let Some(arg) = arguments.first() {
            if let Some(raw) = arg.as_str() {
                match Url::parse(raw) {
                    Ok(url) => return Some(url),
                    Err(e) => warn!("Ignoring malformed command argument '{}': {}", raw, e),
                }
            }
        }
        self.active.read().await.clone()
    }

    fn handle_for(uri: &Url, doc: &TrackedDocument) -> DocumentHandle {
        DocumentHandle {
            id: uri.to_string(),
            name: display_name(uri),
            version: doc.version,
        }
    }
}

/// Host view a single command invocation runs against. Pinning the
/// target URI here keeps the workflow independent of focus changes that
/// happen while it is suspended.
struct LspHost<'a> {
    backend: &'a Backend,
    target: Option<Url>,
}

#[async_trait]
impl EditorHost for LspHost<'_> {
    async fn active_document(&self) -> Option<DocumentHandle> {
        let uri = self.target.clone()?;
        let docs = self.backend.documents.read().await;
        let doc = docs.get(&uri)?;
        Some(Backend::handle_for(&uri, doc))
    }

    async fn document_state(&self, doc: &DocumentHandle) -> Option<DocumentState> {
        let uri = Url::parse(&doc.id).ok()?;
        let docs = self.backend.documents.read().await;
        docs.get(&uri).map(|d| DocumentState {
            text: d.text.clone(),
            version: d.version,
        })
    }

    async fn apply_edit(&self, doc: &DocumentHandle, edit: DocumentEdit) -> std::result::Result<(), HostError> {
        let uri = Url::parse(&doc.id)
            .map_err(|_| HostError::DocumentClosed(doc.id.clone()))?;

        let mut changes = HashMap::new();
        changes.insert(uri, to_text_edits(edit));
        let workspace_edit = WorkspaceEdit {
            changes: Some(changes),
            document_changes: None,
            change_annotations: None,
        };

        let response = self
            .backend
            .client
            .apply_edit(workspace_edit)
            .await
            .map_err(|e| HostError::Rejected(e.to_string()))?;

        if response.applied {
            Ok(())
        } else {
            Err(HostError::Rejected(
                response
                    .failure_reason
                    .unwrap_or_else(|| "edit not applied".to_string()),
            ))
        }
    }

    async fn format_document(&self, doc: &DocumentHandle) {
        let Ok(uri) = Url::parse(&doc.id) else {
            return;
        };
        debug!("Requesting client-side formatting for {}", uri);
        self.backend
            .client
            .send_notification::<FormatDocument>(FormatDocumentParams { uri })
            .await;
    }

    async fn notify(&self, level: Notice, message: &str) {
        match level {
            Notice::Info => {
                self.backend
                    .client
                    .show_message(MessageType::INFO, message)
                    .await
            }
            Notice::Warning => {
                self.backend
                    .client
                    .show_message(MessageType::WARNING, message)
                    .await
            }
            Notice::Log => {
                self.backend
                    .client
                    .log_message(MessageType::LOG, message)
                    .await
            }
        }
    }
}

/// The delete+insert pair installing the transformed text: delete the
/// full document range, insert the new text at its start, in one
/// `workspace/applyEdit` transaction.
fn to_text_edits(edit: DocumentEdit) -> Vec<TextEdit> {
    vec![
        TextEdit {
            range: to_lsp_range(edit.delete),
            new_text: String::new(),
        },
        TextEdit {
            range: Range {
                start: to_lsp_position(edit.insert_at),
                end: to_lsp_position(edit.insert_at),
            },
            new_text: edit.new_text,
        },
    ]
}

fn to_lsp_position(position: DocumentPosition) -> Position {
    Position::new(position.line, position.character)
}

fn to_lsp_range(range: paradigm_core::DocumentRange) -> Range {
    Range {
        start: to_lsp_position(range.start),
        end: to_lsp_position(range.end),
    }
}

/// Last path segment of a file URI, for user messaging
fn display_name(uri: &Url) -> String {
    uri.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| uri.as_str())
        .to_string()
}

/// Resolve the server's starting settings: explicit
/// `initializationOptions` win, then a `paradigm.toml` in the workspace
/// root, then the defaults.
fn initial_settings(options: Option<Value>, workspace_root: Option<&std::path::Path>) -> Settings {
    if let Some(options) = options {
        match serde_json::from_value::<Settings>(options) {
            Ok(settings) => {
                debug!("Loaded settings from initializationOptions: {:?}", settings);
                return settings;
            }
            Err(e) => warn!("Invalid initializationOptions, using defaults: {}", e),
        }
    }

    if let Some(root) = workspace_root {
        let path = root.join("paradigm.toml");
        if let Ok(text) = std::fs::read_to_string(&path) {
            match Settings::from_toml_str(&text) {
                Ok(settings) => {
                    debug!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => warn!("Ignoring invalid {}: {}", path.display(), e),
            }
        }
    }

    Settings::default()
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("paradigm LSP server initializing");

        #[allow(deprecated)]
        let workspace_root = params.root_uri.as_ref().and_then(|u| u.to_file_path().ok());
        *self.settings.write().await =
            initial_settings(params.initialization_options, workspace_root.as_deref());

        let commands = self.registry.read().await.ids();

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands,
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "paradigm-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("paradigm LSP server initialized");
        self.client
            .log_message(MessageType::INFO, "paradigm language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("paradigm LSP server shutting down");
        // Explicit command surface teardown
        self.registry.write().await.clear();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("Document opened: {}", params.text_document.uri);
        self.track_document(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        )
        .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("Document changed: {}", params.text_document.uri);
        // Full sync: the entire content is in the first change
        if let Some(change) = params.content_changes.into_iter().next() {
            self.track_document(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            )
            .await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!("Document saved: {}", params.text_document.uri);
        if let Some(text) = params.text {
            let uri = params.text_document.uri;
            let version = {
                let docs = self.documents.read().await;
                docs.get(&uri).map(|d| d.version).unwrap_or(0)
            };
            self.track_document(uri, text, version).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);
        self.untrack_document(&params.text_document.uri).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        match serde_json::from_value::<Settings>(params.settings) {
            Ok(settings) => {
                debug!("Settings updated: {:?}", settings);
                *self.settings.write().await = settings;
            }
            Err(e) => warn!("Ignoring invalid configuration update: {}", e),
        }
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        debug!("Command invoked: {}", params.command);

        let Some(command) = self.registry.read().await.lookup(&params.command) else {
            warn!("Unknown command: {}", params.command);
            return Ok(None);
        };

        let target = self.resolve_target(&params.arguments).await;
        let host = LspHost {
            backend: self,
            target,
        };
        let settings = self.settings.read().await.clone();
        let engine = settings.engine.to_engine();
        let workflow = TransformWorkflow::new(&host, &engine);

        match command {
            Command::Transform(mode) => workflow.run(mode).await,
            Command::Greet => workflow.greet(&settings.greeting.name).await,
        }

        Ok(None)
    }
}

/// Run the language server over stdio
pub async fn run_server() {
    info!(
        "Starting paradigm language server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use paradigm_core::document::full_document_range;
    use paradigm_core::replace::full_document_edit;

    #[test]
    fn test_edit_pair_deletes_then_inserts() {
        let edit = full_document_edit("line1\nline2", "new".to_string());
        let edits = to_text_edits(edit);

        assert_eq!(edits.len(), 2);
        // Delete covers the whole document
        assert_eq!(edits[0].range.start, Position::new(0, 0));
        assert_eq!(edits[0].range.end, Position::new(1, 5));
        assert!(edits[0].new_text.is_empty());
        // Insert is zero-width at the document start
        assert_eq!(edits[1].range.start, Position::new(0, 0));
        assert_eq!(edits[1].range.end, Position::new(0, 0));
        assert_eq!(edits[1].new_text, "new");
    }

    #[test]
    fn test_edit_pair_on_empty_document() {
        let edit = full_document_edit("", "content".to_string());
        let edits = to_text_edits(edit);
        assert_eq!(edits[0].range.start, edits[0].range.end);
        assert_eq!(edits[1].new_text, "content");
    }

    #[test]
    fn test_range_conversion() {
        let range = full_document_range("a\nbc");
        let lsp = to_lsp_range(range);
        assert_eq!(lsp.start, Position::new(0, 0));
        assert_eq!(lsp.end, Position::new(1, 2));
    }

    #[test]
    fn test_display_name() {
        let uri = Url::parse("file:///home/user/src/shape.rs").unwrap();
        assert_eq!(display_name(&uri), "shape.rs");
    }

    #[test]
    fn test_display_name_without_path() {
        let uri = Url::parse("untitled:Untitled-1").unwrap();
        // Non-hierarchical URIs fall back to the full string
        assert_eq!(display_name(&uri), "untitled:Untitled-1");
    }

    #[test]
    fn test_format_notification_method() {
        assert_eq!(FormatDocument::METHOD, "paradigm/formatDocument");
    }

    #[test]
    fn test_initial_settings_prefer_initialization_options() {
        let options = serde_json::json!({ "engine": { "command": "from-options" } });
        let settings = initial_settings(Some(options), None);
        assert_eq!(settings.engine.command, "from-options");
    }

    #[test]
    fn test_initial_settings_read_workspace_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("paradigm.toml"),
            "[engine]\ncommand = \"from-toml\"\n",
        )
        .unwrap();

        let settings = initial_settings(None, Some(dir.path()));
        assert_eq!(settings.engine.command, "from-toml");
    }

    #[test]
    fn test_initial_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        // No paradigm.toml in the root
        let settings = initial_settings(None, Some(dir.path()));
        assert_eq!(settings.engine.command, "paradigm-rewrite");

        // Invalid toml is ignored, not fatal
        std::fs::write(dir.path().join("paradigm.toml"), "engine = 3").unwrap();
        let settings = initial_settings(None, Some(dir.path()));
        assert_eq!(settings.engine.command, "paradigm-rewrite");
    }

    #[test]
    fn test_default_registry_matches_capabilities() {
        let registry = CommandRegistry::with_defaults();
        let ids = registry.ids();
        assert!(ids.contains(&"paradigm.transformToOop".to_string()));
        assert!(ids.contains(&"paradigm.transformToFp".to_string()));
        assert!(ids.contains(&"paradigm.greet".to_string()));
    }
}
