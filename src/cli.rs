//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Neon Tetris - survive each level's countdown in the terminal
#[derive(Parser, Debug)]
#[command(name = "neon-tetris", version)]
#[command(about = "Survival-timer falling-block puzzle for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Randomizer seed (defaults to one derived from the system clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Log file for interactive play (the terminal belongs to the game)
    #[arg(long, default_value = "neon-tetris.log")]
    pub log_file: PathBuf,

    /// Terminal columns per board cell
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=4))]
    pub cell_width: u16,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scripted session headlessly and print JSON observations
    Replay {
        /// Randomizer seed
        #[arg(long, default_value_t = 1)]
        seed: u32,

        /// Script tokens, e.g. "startGame wait:1000 moveLeft rotateCw"
        #[arg(long)]
        script: String,

        /// Print an observation after every step, not just the last
        #[arg(long)]
        every_step: bool,
    },
}
