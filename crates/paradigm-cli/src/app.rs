//! CLI application logic

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use paradigm_core::TransformWorkflow;
use paradigm_engine::{ProcessEngine, TransformEngine, TransformMode};

use crate::host::FileHost;

/// Target style on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetStyle {
    /// Object-oriented decomposition (traits/impls)
    Oop,
    /// Functional decomposition (enums/matches)
    Fp,
}

impl From<TargetStyle> for TransformMode {
    fn from(style: TargetStyle) -> Self {
        match style {
            TargetStyle::Oop => TransformMode::Oop,
            TargetStyle::Fp => TransformMode::Functional,
        }
    }
}

#[derive(Parser)]
#[command(name = "paradigm")]
#[command(author, version, about = "Move source files between OOP and functional designs", long_about = None)]
struct Cli {
    /// Transformation engine executable
    #[arg(long, global = true, default_value = "paradigm-rewrite")]
    engine: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a source file in place
    Transform {
        /// The file to transform
        path: PathBuf,

        /// Target style
        #[arg(long, value_enum)]
        to: TargetStyle,

        /// Write the result here instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the engine's greeting (checks the engine is reachable)
    Greet {
        /// Name to greet
        #[arg(default_value = "world")]
        name: String,
    },
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let engine = ProcessEngine::new(&cli.engine);

    match cli.command {
        Commands::Transform { path, to, output } => {
            anyhow::ensure!(
                path.is_file(),
                "no such file: {}",
                path.display()
            );
            let mut host = FileHost::new(&path);
            if let Some(output) = output {
                host = host.with_output(output);
            }
            TransformWorkflow::new(&host, &engine)
                .run(TransformMode::from(to))
                .await;
            Ok(())
        }
        Commands::Greet { name } => {
            let greeting = engine
                .greet(&name)
                .with_context(|| format!("engine '{}' could not greet", cli.engine))?;
            println!("{}", greeting);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_target_style_maps_to_mode() {
        assert!(TransformMode::from(TargetStyle::Oop).is_oop());
        assert!(!TransformMode::from(TargetStyle::Fp).is_oop());
    }

    #[test]
    fn test_transform_args() {
        let cli = Cli::parse_from(["paradigm", "transform", "src/shape.rs", "--to", "fp"]);
        match cli.command {
            Commands::Transform { path, to, output } => {
                assert_eq!(path, PathBuf::from("src/shape.rs"));
                assert!(matches!(to, TargetStyle::Fp));
                assert!(output.is_none());
            }
            _ => panic!("expected transform subcommand"),
        }
    }

    #[test]
    fn test_engine_override() {
        let cli = Cli::parse_from(["paradigm", "--engine", "my-rw", "greet", "James"]);
        assert_eq!(cli.engine, "my-rw");
        match cli.command {
            Commands::Greet { name } => assert_eq!(name, "James"),
            _ => panic!("expected greet subcommand"),
        }
    }
}
