//! `workflow-designer` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`       — start the HTTP API.
//! - `simulate`    — validate a workflow JSON file and print its trace.
//! - `automations` — list the builtin automation actions.
//! - `new`         — write a starter workflow document.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use automations::BuiltinCatalog;
use engine::{document, simulate, NodeType, Position, SimulationResult, WorkflowData};

#[derive(Parser)]
#[command(
    name = "workflow-designer",
    about = "Validate and simulate designer workflows",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API.
    Serve {
        #[arg(long, env = "WORKFLOW_DESIGNER_BIND", default_value = "127.0.0.1:8080")]
        bind: String,
        /// Maximum number of simulation runs kept in memory.
        #[arg(long, env = "WORKFLOW_DESIGNER_HISTORY_CAPACITY", default_value_t = 50)]
        history_capacity: usize,
    },
    /// Simulate a workflow JSON file.
    Simulate {
        /// Path to the workflow JSON file.
        path: PathBuf,
        /// Print the raw simulation result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the builtin automation actions.
    Automations,
    /// Write a starter Start -> Task -> End workflow.
    New {
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, history_capacity } => {
            info!("Starting API server on {bind}");
            api::serve(api::ServerConfig { bind, history_capacity }).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Simulate { path, json } => run_simulate(&path, json),
        Command::Automations => {
            for action in BuiltinCatalog::actions() {
                println!("{:<18} {:<24} {}", action.id, action.label, action.params.join(", "));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::New { path, force } => {
            write_starter(&path, force)?;
            println!("Wrote starter workflow to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_simulate(path: &Path, json: bool) -> anyhow::Result<ExitCode> {
    let workflow = match document::import_file(path) {
        Ok(wf) => wf,
        Err(e) => {
            debug!("import failed: {e}");
            eprintln!("❌ {}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    let result = simulate(&workflow);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(if result.success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn print_result(result: &SimulationResult) {
    if result.success {
        println!("✅ Workflow is valid. {} steps:", result.steps.len());
        for (i, step) in result.steps.iter().enumerate() {
            println!(
                "  {:>2}. [{}] {} - {}",
                i + 1,
                step.timestamp.format("%H:%M:%S"),
                step.node_title,
                step.message
            );
        }
    } else {
        eprintln!("❌ Validation failed:");
        for error in &result.errors {
            eprintln!("  - {error}");
        }
    }
}

fn starter_workflow() -> WorkflowData {
    let mut wf = WorkflowData::default();
    let ids: Vec<String> = [NodeType::Start, NodeType::Task, NodeType::End]
        .into_iter()
        .zip(0u32..)
        .map(|(node_type, row)| {
            let y = 50.0 + 150.0 * f64::from(row);
            wf.add_default_node(node_type, Position::new(250.0, y))
        })
        .collect();
    for pair in ids.windows(2) {
        wf.connect(&pair[0], &pair[1]);
    }
    wf
}

fn write_starter(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    document::export_file(&starter_workflow(), path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_workflow_simulates_cleanly() {
        let result = simulate(&starter_workflow());
        assert!(result.success, "{:?}", result.errors);
        assert_eq!(result.steps.len(), 3);
    }

    #[test]
    fn simulate_fails_on_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(run_simulate(&path, false).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn simulate_fails_on_invalid_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-end.json");
        let mut wf = starter_workflow();
        let end_id = wf.nodes[2].id.clone();
        wf.delete_node(&end_id);
        document::export_file(&wf, &path).unwrap();
        assert_eq!(run_simulate(&path, true).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn simulate_succeeds_on_starter_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("starter.json");
        write_starter(&path, false).unwrap();
        assert_eq!(run_simulate(&path, false).unwrap(), ExitCode::SUCCESS);
        assert!(write_starter(&path, false).is_err());
    }

    #[test]
    fn cli_parses_serve_flags() {
        let cli = Cli::try_parse_from([
            "workflow-designer",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--history-capacity",
            "5",
        ])
        .unwrap();
        match cli.command {
            Command::Serve { bind, history_capacity } => {
                assert_eq!(bind, "0.0.0.0:9000");
                assert_eq!(history_capacity, 5);
            }
            _ => panic!("expected serve"),
        }
    }
}
