use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Conway's Game of Life on a 80x25 torus, in the terminal.
///
/// While running: `q` quits, `-` slows down, `+` speeds up and `=` resets the speed.
///
/// Without `--input` or `--random`, a pattern piped on stdin is used (one row per line, `1` for a
/// live cell). Otherwise a menu is shown.
#[derive(Parser, Debug)]
#[command(name = "life-term", version)]
pub struct Args {
    /// Read the seed from a file, one row per line
    #[arg(short = 'i', long, conflicts_with = "random")]
    pub input: Option<PathBuf>,

    /// Start from a random seed instead of showing the menu
    #[arg(short = 'r', long)]
    pub random: bool,

    /// How long the final frame stays up, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub pause_ms: u64,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    pub fn final_pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}
