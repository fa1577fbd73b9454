use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use navigator_cli::commands::find::handle_find_command;
use navigator_cli::commands::floors::handle_floors_command;
use navigator_cli::commands::load_map_with_tags;
use navigator_cli::commands::nearest::{handle_nearest_command, NearestCommandArgs};
use navigator_cli::commands::route::{
    handle_route_command, AlgorithmArg, Destination, RouteCommandArgs,
};
use navigator_cli::location::FloorPoint;
use navigator_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor floor-plan queries and route planning")]
struct Cli {
    /// Floor-plan document (JSON).
    #[arg(long)]
    map: PathBuf,

    /// Tag document (JSON) to attach to the floor plan.
    #[arg(long)]
    tags: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a walking route, possibly across floors.
    Route {
        /// Start location as FLOOR:X,Y.
        #[arg(long = "from")]
        from: FloorPoint,
        /// Goal location as FLOOR:X,Y.
        #[arg(long = "to", required_unless_present = "to_name", conflicts_with = "to_name")]
        to: Option<FloorPoint>,
        /// Goal given as a guide node name or tag value.
        #[arg(long = "to-name")]
        to_name: Option<String>,
        /// Single-floor search algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
        algorithm: AlgorithmArg,
        /// Include the raw start and goal points in the route.
        #[arg(long)]
        anchor: bool,
    },
    /// Search guide nodes by name or tag value.
    Find {
        /// Case-insensitive text to look for.
        #[arg(long)]
        name: String,
    },
    /// List the guide nodes closest to a location.
    Nearest {
        /// Location as FLOOR:X,Y.
        #[arg(long)]
        at: FloorPoint,
        /// Maximum number of nodes to list.
        #[arg(long, default_value_t = 3)]
        k: usize,
        /// Only list nodes within this distance.
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Summarise each floor of the map.
    Floors,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let map = load_map_with_tags(&cli.map, cli.tags.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Route {
            from,
            to,
            to_name,
            algorithm,
            anchor,
        } => {
            let to = match (to, to_name) {
                (Some(point), _) => Destination::Point(point),
                (None, Some(name)) => Destination::Name(name),
                (None, None) => anyhow::bail!("either --to or --to-name is required"),
            };
            let args = RouteCommandArgs {
                from,
                to,
                algorithm,
                anchor,
            };
            handle_route_command(&mut stdout, &map, cli.format, &args)
        }
        Command::Find { name } => handle_find_command(&mut stdout, &map, cli.format, &name),
        Command::Nearest { at, k, radius } => {
            let args = NearestCommandArgs { at, k, radius };
            handle_nearest_command(&mut stdout, &map, cli.format, &args)
        }
        Command::Floors => handle_floors_command(&mut stdout, &map, cli.format),
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
