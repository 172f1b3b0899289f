//! CLI frontend for the Dojo interactive fiction engine.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dojo_training::TrainingConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::commands::Context;

#[derive(Parser)]
#[command(
    name = "dojo",
    about = "Dojo: a scene-graph interactive fiction engine",
    version,
    propagate_version = true
)]
struct Cli {
    /// World file mapping scene IDs to scenes (JSON)
    #[arg(short, long, global = true, default_value = "scenes.json")]
    world: PathBuf,

    /// Directory holding one JSON record per player
    #[arg(short, long, global = true, default_value = "players")]
    players: PathBuf,

    #[command(flatten)]
    training: TrainingArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Longest training budget `chrono::Duration` can hold, in seconds.
const MAX_DURATION_SECS: i64 = i64::MAX / 1000;

#[derive(Args)]
struct TrainingArgs {
    /// Seconds between training ticks
    #[arg(long, global = true, default_value = "600", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Seconds after which a training stops on its own
    #[arg(long, global = true, default_value = "86400", value_parser = clap::value_parser!(i64).range(0..=MAX_DURATION_SECS))]
    max_duration: i64,

    /// Mana spent per training tick
    #[arg(long, global = true, default_value = "10", value_parser = clap::value_parser!(i64).range(0..))]
    cost: i64,
}

impl From<&TrainingArgs> for TrainingConfig {
    fn from(args: &TrainingArgs) -> Self {
        TrainingConfig::default()
            .with_interval(Duration::from_secs(args.interval))
            .with_max_duration(chrono::Duration::seconds(args.max_duration))
            .with_cost(args.cost)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show a scene to a player
    Start {
        /// Player ID
        player: String,

        /// Scene to show
        #[arg(default_value = commands::DEFAULT_SCENE)]
        scene: String,
    },

    /// Take an action on a scene
    Act {
        /// Player ID
        player: String,

        /// Scene the action belongs to
        scene: String,

        /// Action number as listed under the scene (starting at 1)
        action: usize,
    },

    /// Play interactively, with training running in the background
    Play {
        /// Player ID
        player: String,

        /// Scene to start in
        #[arg(default_value = commands::DEFAULT_SCENE)]
        scene: String,
    },

    /// Advance every player's training on the configured interval
    Train {
        /// Run a single tick and exit
        #[arg(long)]
        once: bool,
    },

    /// Show a player's stored state
    Show {
        /// Player ID
        player: String,
    },

    /// Validate the world file
    Check,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "dojo=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let ctx = Context {
        world: cli.world,
        players: cli.players,
        training: TrainingConfig::from(&cli.training),
    };

    let result = match cli.command {
        Commands::Start { player, scene } => commands::start::run(&ctx, &player, &scene),
        Commands::Act {
            player,
            scene,
            action,
        } => commands::act::run(&ctx, &player, &scene, action),
        Commands::Play { player, scene } => commands::play::run(&ctx, &player, &scene).await,
        Commands::Train { once } => commands::train::run(&ctx, once).await,
        Commands::Show { player } => commands::show::run(&ctx, &player),
        Commands::Check => commands::check::run(&ctx),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
