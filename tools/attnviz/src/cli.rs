use attnviz_globals::GlobalOpts;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "attnviz",
    version = env!("CARGO_PKG_VERSION"),
    about = "Toy attention-matrix visualizer for the terminal."
)]
pub struct Cli {
    #[command(flatten)]
    pub g: GlobalOpts,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Render the matrix once and exit
    Show(StateArgs),
    /// Read commands from stdin and redraw after each one
    Interactive(StateArgs),
    /// Shuffle many times and report how uniform the orders are
    Stats(StatsArgs),
}

/// Initial state. Values are taken as typed; anything unparseable is 0.
#[derive(Args, Debug, Clone)]
pub struct StateArgs {
    /// Value for token A
    #[arg(long = "a", value_name = "VALUE", default_value = "1", allow_hyphen_values = true)]
    pub a: String,

    /// Value for token B
    #[arg(long = "b", value_name = "VALUE", default_value = "2", allow_hyphen_values = true)]
    pub b: String,

    /// Value for token C
    #[arg(long = "c", value_name = "VALUE", default_value = "3", allow_hyphen_values = true)]
    pub c: String,

    /// Enable positional bias (bias = 0.1i * 0.1j)
    #[arg(long)]
    pub bias: bool,

    /// Shuffle once before the first render
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for shuffles (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Number of shuffles to run
    #[arg(long, default_value_t = 60_000)]
    pub trials: usize,

    /// Seed for the run (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}
