use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "shardgrid",
    about = "shardgrid — split a test suite into balanced process groups",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition items into process groups.
    ///
    /// Items are read from a .json array, a .toml file with `items = [...]`,
    /// or a plain list with one id per line. Settings from shardgrid.toml
    /// (or --config) apply first; flags override them.
    Plan(commands::plan::PlanArgs),
    /// Write a starter shardgrid.toml
    Init {
        /// Directory to write into (default: current directory)
        #[arg(short, long, default_value = ".")]
        path: String,
        /// Default number of process groups
        #[arg(short = 'n', long, default_value_t = 2)]
        groups: usize,
        /// Runtime log to size items with
        #[arg(long)]
        runtime_log: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::from_default_env())?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan(args) => commands::plan::plan(&args),
        Commands::Init { path, groups, runtime_log } => {
            commands::init::init(&path, groups, runtime_log.as_deref())
        }
    }
}

/// Info for every shardgrid crate, on top of whatever `RUST_LOG` asks for.
fn log_filter(filter: EnvFilter) -> anyhow::Result<EnvFilter> {
    Ok(filter
        .add_directive("shardgrid=info".parse()?)
        .add_directive("shardgrid_planner=info".parse()?)
        .add_directive("shardgrid_runtime=info".parse()?))
}
