use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use traderoute_cli::commands::regions::handle_regions_command;
use traderoute_cli::commands::route::{handle_route_command, RouteCommandArgs, RouteStatus};
use traderoute_cli::commands::terrain::handle_terrain_command;
use traderoute_cli::commands::CommandContext;
use traderoute_cli::output::OutputFormat;

/// Exit status for a well-formed request whose goal cannot be reached.
const EXIT_UNREACHABLE: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Trade route planning utilities")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Dataset file (SQLite or `.json`) or a directory containing `trade_routes.db`.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// JSON file with `caravan_speed` and `sailing_speed`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the fastest route between two regions.
    Route(RouteCommandArgs),
    /// List regions and how many trade routes touch each one.
    Regions,
    /// Print the terrain speed table.
    Terrain,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = CommandContext {
        data: cli.global.data,
        config: cli.global.config,
        format: cli.global.format,
    };

    match cli.command {
        Command::Route(args) => match handle_route_command(&ctx, &args)? {
            RouteStatus::Found => Ok(ExitCode::SUCCESS),
            RouteStatus::Unreachable => Ok(ExitCode::from(EXIT_UNREACHABLE)),
        },
        Command::Regions => handle_regions_command(&ctx).map(|()| ExitCode::SUCCESS),
        Command::Terrain => handle_terrain_command(&ctx).map(|()| ExitCode::SUCCESS),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
