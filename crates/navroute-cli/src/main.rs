use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use navroute_cli::commands::resolve::{handle_resolve_command, ResolveCommandArgs};
use navroute_cli::commands::route::{handle_route_command, AlgorithmArg, RouteCommandArgs};
use navroute_cli::commands::GlobalOptions;
use navroute_cli::output::OutputFormat;
use navroute_lib::Coordinate;

#[derive(Parser, Debug)]
#[command(author, version, about = "Airway route finder over CSV navigation data")]
struct Cli {
    /// Directory holding Waypoints.txt and the optional navaid, airway and direct files.
    /// Defaults to $NAVROUTE_DATA_DIR, then the current directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Skip records that reference unknown waypoints instead of failing.
    #[arg(long, global = true)]
    lenient: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two waypoints.
    Route(RouteArgs),
    /// Show which waypoint a name resolves to.
    Resolve {
        /// Waypoint name.
        name: String,
        /// Reference location (LAT,LON) used when the name is shared.
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        near: Option<Coordinate>,
    },
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Starting waypoint name.
    #[arg(long = "from")]
    from: String,
    /// Destination waypoint name.
    #[arg(long = "to")]
    to: String,
    /// Location (LAT,LON) near the intended start when its name is shared.
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    from_near: Option<Coordinate>,
    /// Location (LAT,LON) near the intended destination when its name is shared.
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    to_near: Option<Coordinate>,
    /// Search algorithm.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
    algorithm: AlgorithmArg,
    /// Give up after expanding this many waypoints.
    #[arg(long)]
    max_expansions: Option<usize>,
}

impl From<RouteArgs> for RouteCommandArgs {
    fn from(args: RouteArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            from_near: args.from_near,
            to_near: args.to_near,
            algorithm: args.algorithm,
            max_expansions: args.max_expansions,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = GlobalOptions {
        data_dir: cli.data_dir,
        lenient: cli.lenient,
    };

    match cli.command {
        Command::Route(args) => handle_route_command(&options, cli.format, &args.into()),
        Command::Resolve { name, near } => {
            handle_resolve_command(&options, cli.format, &ResolveCommandArgs { name, near })
        }
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
