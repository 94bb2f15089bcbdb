use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "statline",
    about = "Sample memory, CPU and user sessions at a fixed interval"
)]
pub struct Cli {
    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of samples to take
    #[arg(long)]
    pub samples: Option<usize>,

    /// Seconds between samples
    #[arg(long)]
    pub tdelay: Option<u64>,

    /// Show memory and CPU statistics
    #[arg(long, default_value_t = false)]
    pub system: bool,

    /// Show logged-in user sessions
    #[arg(long, default_value_t = false)]
    pub user: bool,

    /// Print one block per sample instead of redrawing in place
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    /// Append ASCII graphs to memory and CPU rows
    #[arg(long, default_value_t = false)]
    pub graphics: bool,

    /// Samples, then delay, as plain integers
    #[arg(value_name = "N")]
    pub positional: Vec<String>,
}
