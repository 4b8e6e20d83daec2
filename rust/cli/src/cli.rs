//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fivedraw",
    version,
    about = "Five-card-draw video poker in the terminal"
)]
pub struct FivedrawCli {
    /// Raise engine logging to debug (RUST_LOG still wins)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play an interactive session
    Play {
        /// Deck seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Pause for every card reveal instead of showing results at once
        #[arg(long)]
        animate: bool,
        /// Reveal playback speed in percent (100 = normal)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
        speed: Option<u32>,
        /// Append every resolved round to this JSONL file
        #[arg(long)]
        history: Option<String>,
    },
    /// Deal one hand and show its ranking
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate five cards, e.g. `AS KS QS JS 10S`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Show the paytable
    Paytable {
        /// Wager to scale the payouts to
        #[arg(long, default_value_t = 10)]
        bet: u32,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print a ChaCha20 sample and the shuffled deck for a seed
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Deal { .. } => "deal",
            Commands::Eval { .. } => "eval",
            Commands::Paytable { .. } => "paytable",
            Commands::Cfg => "cfg",
            Commands::Rng { .. } => "rng",
        }
    }
}
