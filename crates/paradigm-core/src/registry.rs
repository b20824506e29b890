//! Command surface
//!
//! An explicit registry mapping command identifiers to handler kinds,
//! registered once at startup and torn down explicitly. Both the LSP
//! server (executeCommand capability + dispatch) and the CLI resolve
//! through this map; there is no reflection-based discovery.

use std::collections::HashMap;

use paradigm_engine::TransformMode;

/// Transform the active document towards the OOP style
pub const CMD_TRANSFORM_OOP: &str = "paradigm.transformToOop";
/// Transform the active document towards the functional style
pub const CMD_TRANSFORM_FP: &str = "paradigm.transformToFp";
/// Show the engine's greeting (liveness check)
pub const CMD_GREET: &str = "paradigm.greet";

/// What a registered command does when invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the transform workflow with a fixed mode
    Transform(TransformMode),
    /// Call the engine's greeting and display it
    Greet,
}

/// Identifier → handler map for the command surface
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the three standard entry points registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(CMD_TRANSFORM_OOP, Command::Transform(TransformMode::Oop));
        registry.register(
            CMD_TRANSFORM_FP,
            Command::Transform(TransformMode::Functional),
        );
        registry.register(CMD_GREET, Command::Greet);
        registry
    }

    /// Register (or replace) a command binding
    pub fn register(&mut self, id: impl Into<String>, command: Command) {
        self.commands.insert(id.into(), command);
    }

    /// Remove a single binding
    pub fn unregister(&mut self, id: &str) -> Option<Command> {
        self.commands.remove(id)
    }

    /// Tear down all bindings
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Resolve an identifier
    pub fn lookup(&self, id: &str) -> Option<Command> {
        self.commands.get(id).copied()
    }

    /// All registered identifiers, sorted for stable capability lists
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.commands.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
