//! dcm — run docker-compose across every project of a workspace.
//!
//! # Usage
//!
//! ```text
//! dcm up <project-or-group>
//! dcm down|restart|status|logs [project-or-group]
//! dcm list [--json]
//! dcm inspect <project-or-group>
//! dcm validate
//! dcm init [--force]
//! dcm version
//! ```
//!
//! The workspace descriptor (`workspace.json`, `workspace.yaml` or
//! `workspace.yml`) is searched for from the current directory upwards.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use commands::{
    init::InitArgs,
    inspect::InspectArgs,
    lifecycle::{TargetArgs, UpArgs},
    list::ListArgs,
};
use dcm_core::Operation;
use dcm_runner::ComposeCommand;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "dcm",
    version,
    about = "Start, stop and inspect docker-compose projects across a workspace",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Orchestration command run in each project directory.
    #[arg(
        long,
        global = true,
        env = "DCM_COMPOSE",
        default_value = dcm_runner::command::DEFAULT_COMPOSE,
        value_name = "CMD"
    )]
    compose: ComposeCommand,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a group, or a single project when no group has that name.
    Up(UpArgs),

    /// Stop every project, or only the given group/project.
    Down(TargetArgs),

    /// Restart every project, or only the given group/project.
    Restart(TargetArgs),

    /// Show container status for every project, or the given group/project.
    Status(TargetArgs),

    /// Show logs for every project, or the given group/project.
    Logs(TargetArgs),

    /// List projects and groups.
    List(ListArgs),

    /// Show how a name resolves and the plan it would run.
    Inspect(InspectArgs),

    /// Check every group and project in the workspace.
    Validate,

    /// Write a starter workspace.json in the current directory.
    Init(InitArgs),

    /// Print the dcm version.
    Version,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    // Commands that do not need a workspace.
    match command {
        Commands::Version => {
            println!("dcm v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Init(args) => return args.run(),
        _ => {}
    }

    let workspace = commands::load_workspace()?;
    let compose = &cli.compose;

    match command {
        Commands::Up(args) => {
            commands::lifecycle::run(&workspace, compose, Operation::Up, Some(&args.target))
        }
        Commands::Down(args) => args.run(&workspace, compose, Operation::Down),
        Commands::Restart(args) => args.run(&workspace, compose, Operation::Restart),
        Commands::Status(args) => args.run(&workspace, compose, Operation::Status),
        Commands::Logs(args) => args.run(&workspace, compose, Operation::Logs),
        Commands::List(args) => args.run(&workspace),
        Commands::Inspect(args) => args.run(&workspace),
        Commands::Validate => commands::validate::run(&workspace),
        Commands::Init(_) | Commands::Version => Ok(()),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
