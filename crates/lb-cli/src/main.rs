//! CLI host for Luckbox outcome packs.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "luckbox",
    about = "Luckbox: draw, resolve and run luck-weighted outcomes",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every outcome in a pack
    List {
        /// Pack directory (containing data/<namespace>/outcomes)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Path prefix of identifier-only outcomes
        #[arg(long, default_value = "nonrandom/")]
        reserved_prefix: String,
    },

    /// Draw outcomes repeatedly and compare observed and expected shares
    Draw {
        /// Pack directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Luck bias
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        luck: i32,

        /// Number of draws
        #[arg(short, long, default_value = "1000")]
        count: usize,

        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Path prefix of identifier-only outcomes
        #[arg(long, default_value = "nonrandom/")]
        reserved_prefix: String,
    },

    /// Resolve a template string and print the result
    Resolve {
        /// Template text, e.g. "{blockPosY}+3"
        template: String,

        /// Triggering block position as x,y,z
        #[arg(short, long, default_value = "0,64,0", allow_hyphen_values = true)]
        pos: String,

        /// Name of the acting player
        #[arg(long)]
        player: Option<String>,

        /// Player position as x,y,z (default: centre of --pos)
        #[arg(long, allow_hyphen_values = true)]
        player_pos: Option<String>,

        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Trigger one outcome and tick the scheduler
    Run {
        /// Outcome identifier (default: a random draw)
        id: Option<String>,

        /// Pack directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Luck bias for the random draw
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        luck: i32,

        /// Ticks to advance after triggering
        #[arg(short, long, default_value = "20")]
        ticks: u32,

        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Triggering block position as x,y,z
        #[arg(short, long, default_value = "0,64,0", allow_hyphen_values = true)]
        pos: String,

        /// Name of the acting player
        #[arg(long, default_value = "Steve")]
        player: String,

        /// Path prefix of identifier-only outcomes
        #[arg(long, default_value = "nonrandom/")]
        reserved_prefix: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            dir,
            reserved_prefix,
        } => commands::list::run(&dir, &reserved_prefix),
        Commands::Draw {
            dir,
            luck,
            count,
            seed,
            reserved_prefix,
        } => commands::draw::run(&dir, luck, count, seed, &reserved_prefix),
        Commands::Resolve {
            template,
            pos,
            player,
            player_pos,
            seed,
        } => commands::resolve::run(&template, &pos, player.as_deref(), player_pos.as_deref(), seed),
        Commands::Run {
            id,
            dir,
            luck,
            ticks,
            seed,
            pos,
            player,
            reserved_prefix,
        } => commands::run::run(
            &dir,
            id.as_deref(),
            &commands::run::RunOptions {
                luck,
                ticks,
                seed,
                pos,
                player,
                reserved_prefix,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
