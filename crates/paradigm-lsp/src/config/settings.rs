//! Configuration settings
//!
//! Loaded from LSP `initializationOptions` (JSON) or from a
//! `paradigm.toml` string; every field has a default so partial
//! configurations are fine.

use serde::{Deserialize, Serialize};

use paradigm_engine::ProcessEngine;

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Transformation engine settings
    pub engine: EngineSettings,
    /// Greeting command settings
    pub greeting: GreetingSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// External transformation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Engine executable
    pub command: String,
    /// Transform arguments; `{mode}` is replaced with `oop` or `fp`
    pub args: Vec<String>,
    /// Greeting arguments; `{name}` is replaced with the greeting name
    pub greet_args: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let defaults = ProcessEngine::new("paradigm-rewrite");
        Self {
            command: defaults.command().to_string(),
            args: vec![
                "transform".to_string(),
                "--stdin".to_string(),
                "--to".to_string(),
                "{mode}".to_string(),
            ],
            greet_args: vec!["greet".to_string(), "{name}".to_string()],
        }
    }
}

impl EngineSettings {
    /// Build the subprocess engine described by these settings
    pub fn to_engine(&self) -> ProcessEngine {
        ProcessEngine::new(&self.command)
            .with_args(self.args.clone())
            .with_greet_args(self.greet_args.clone())
    }
}

/// Greeting command configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GreetingSettings {
    /// Name passed to the engine's greeting call
    pub name: String,
}

impl Default for GreetingSettings {
    fn default() -> Self {
        Self {
            name: "world".to_string(),
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.engine.command, "paradigm-rewrite");
        assert_eq!(settings.greeting.name, "world");
        assert!(settings.engine.args.contains(&"{mode}".to_string()));
    }

    #[test]
    fn test_from_toml_partial() {
        let settings = Settings::from_toml_str(
            r#"
            [engine]
            command = "my-rewriter"

            [greeting]
            name = "James"
            "#,
        )
        .unwrap();
        assert_eq!(settings.engine.command, "my-rewriter");
        assert_eq!(settings.greeting.name, "James");
        // Unspecified fields keep their defaults
        assert!(!settings.engine.args.is_empty());
    }

    #[test]
    fn test_from_json_initialization_options() {
        let value = serde_json::json!({
            "engine": { "command": "rw", "args": ["--to", "{mode}"] }
        });
        let settings: Settings = serde_json::from_value(value).unwrap();
        assert_eq!(settings.engine.command, "rw");
        assert_eq!(settings.engine.args, vec!["--to", "{mode}"]);
    }

    #[test]
    fn test_to_engine_uses_command() {
        let settings = Settings::default();
        let engine = settings.engine.to_engine();
        assert_eq!(engine.command(), "paradigm-rewrite");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Settings::from_toml_str("engine = 3").is_err());
    }
}
