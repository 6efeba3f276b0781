mod config;
mod estimate;
mod replay;
mod schema;

use clap::{Parser, Subcommand};
use kinemeter_api::GridPos;
use kinemeter_core::{Result, SamplingConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "kinemeter",
    version,
    about = "Estimates stress load and capacity of kinetic block networks",
    long_about = "Kinemeter explores the kinetic network connected to an origin block with a bounded \
                  breadth-first search and aggregates a heuristic stress estimate. The same throttled, \
                  cached sampler used by overlays can be replayed tick by tick from the command line."
)]
pub struct Cli {
    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Sampling configuration file (defaults to ~/.kinemeter/config.json)
    #[arg(long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single exploration from an origin block
    Estimate {
        /// World file describing the block grid
        #[arg(value_name = "WORLD")]
        world: PathBuf,

        /// Origin position as x,y,z
        #[arg(long, allow_hyphen_values = true)]
        origin: GridPos,

        /// Override the configured node budget
        #[arg(long)]
        max_nodes: Option<u32>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drive the throttled sampler for a number of ticks
    #[command(
        long_about = "Runs the same per-tick sampler an overlay would, pinned to one origin, and prints \
                      whether each tick was served from cache, freshly explored, or idle."
    )]
    Replay {
        /// World file describing the block grid
        #[arg(value_name = "WORLD")]
        world: PathBuf,

        /// Origin position as x,y,z
        #[arg(long, allow_hyphen_values = true)]
        origin: GridPos,

        /// Number of ticks to simulate, starting at tick 0
        #[arg(long, default_value_t = 40)]
        ticks: u32,
    },
    /// Show or initialise the sampling configuration
    Config {
        /// Write the default configuration instead of printing the current one
        #[arg(long)]
        init: bool,
    },
    /// Print the JSON schema of the snapshot handed to renderers
    Schema,
}

pub(crate) fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(kinemeter_core::config::default_config_path)
}

pub(crate) fn load_config(explicit: Option<&Path>) -> Result<SamplingConfig> {
    SamplingConfig::load(&config_path(explicit))
}

pub fn run() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = kinemeter_core::logging::init_logging("cli", cli.verbose);
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Estimate {
            world,
            origin,
            max_nodes,
            json,
        } => estimate::run(&world, origin, max_nodes, json, config),
        Commands::Replay {
            world,
            origin,
            ticks,
        } => replay::run(&world, origin, ticks, config),
        Commands::Config { init } => config::run(init, config),
        Commands::Schema => schema::run(),
    };

    if let Err(e) = &result {
        tracing::error!("Command failed: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_negative_origin() {
        let cli = Cli::try_parse_from([
            "kinemeter",
            "estimate",
            "world.json",
            "--origin",
            "-4,64,-12",
            "--max-nodes",
            "128",
        ])
        .unwrap();
        match cli.command {
            Commands::Estimate {
                origin, max_nodes, ..
            } => {
                assert_eq!(origin, GridPos::new(-4, 64, -12));
                assert_eq!(max_nodes, Some(128));
            }
            _ => panic!("expected estimate command"),
        }
    }

    #[test]
    fn test_rejects_malformed_origin() {
        let parsed = Cli::try_parse_from(["kinemeter", "replay", "world.json", "--origin", "1,2"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_config_flag_is_accepted_by_every_command() {
        let cli = Cli::try_parse_from([
            "kinemeter",
            "replay",
            "world.json",
            "--origin",
            "0,64,0",
            "--config",
            "tuned.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("tuned.json")));
        assert!(matches!(cli.command, Commands::Replay { ticks: 40, .. }));

        let cli = Cli::try_parse_from(["kinemeter", "config", "--config", "tuned.json", "--init"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("tuned.json")));
        assert!(matches!(cli.command, Commands::Config { init: true }));
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kinemeter.json");
        assert_eq!(config_path(Some(path.as_path())), path);
        assert_eq!(
            load_config(Some(path.as_path())).unwrap(),
            SamplingConfig::default()
        );
    }
}
