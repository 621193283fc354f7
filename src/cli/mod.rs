use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "gymflow")]
#[command(about = "Guided workout sessions in your terminal")]
#[command(long_about = "Gymflow plays a workout one exercise at a time: a short countdown, \
                       then a timer per exercise that advances on its own. Get started with \
                       'gymflow list' to see what is available.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available workouts
    List {
        /// Read workouts from a directory of JSON files instead of the studio API
        #[arg(long, help = "Directory holding <id>.json workout files")]
        dir: Option<PathBuf>,
    },
    /// Show one workout after normalization
    Show {
        /// Workout identifier
        id: String,
        #[arg(long, help = "Directory holding <id>.json workout files")]
        dir: Option<PathBuf>,
    },
    /// Play a guided session for a workout
    Run {
        /// Workout identifier
        id: String,
        #[arg(long, help = "Directory holding <id>.json workout files")]
        dir: Option<PathBuf>,
        /// Startup countdown in seconds
        #[arg(long, help = "Seconds of countdown before the first exercise (default from config)")]
        countdown: Option<u32>,
        /// Real-time length of one tick
        #[arg(long = "tick-ms", help = "Milliseconds per tick, 1000 for real time (default from config)")]
        tick_ms: Option<u64>,
        /// Print snapshots as JSON lines
        #[arg(long, help = "Emit each snapshot as a JSON line instead of text")]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}
