//! Server configuration

mod settings;

pub use settings::{EngineSettings, GreetingSettings, Settings};
