mod cli;
mod output;
mod repl;

use crate::cli::{Cli, Cmd, StateArgs, StatsArgs};
use crate::output::{emit, open_writer, render_state, render_stats};
use attnviz_core_kernel::{Order, Token, TokenValues, parse_value, shuffle_histogram};
use attnviz_core_state::VisualizerState;
use attnviz_globals::{GlobalOpts, get_globals, init_globals};
use clap::Parser;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => {
            debug!("rng seeded with {}", s);
            StdRng::seed_from_u64(s)
        }
        None => StdRng::from_os_rng(),
    }
}

/// Startup state: values from the flags, identity order, optionally one
/// shuffle before the first draw.
fn initial_state(args: &StateArgs, rng: &mut StdRng) -> VisualizerState {
    let values = TokenValues::from_pairs([
        (Token::A, parse_value(&args.a)),
        (Token::B, parse_value(&args.b)),
        (Token::C, parse_value(&args.c)),
    ]);

    let mut state = VisualizerState::new(values, Order::default(), args.bias);
    if args.shuffle {
        state.shuffle_with(rng);
    }
    state
}

pub fn run_show_cmd(args: StateArgs, globals: &GlobalOpts) -> anyhow::Result<()> {
    debug!("attnviz::show {:?}", args);
    let mut rng = make_rng(args.seed);
    let state = initial_state(&args, &mut rng);

    let mut writer = open_writer(globals)?;
    emit(&mut writer, &render_state(&state, globals)?)
}

pub async fn run_interactive_cmd(args: StateArgs, globals: &GlobalOpts) -> anyhow::Result<()> {
    debug!("attnviz::interactive {:?}", args);
    let mut rng = make_rng(args.seed);
    let state = initial_state(&args, &mut rng);

    let mut writer = open_writer(globals)?;
    let last = repl::run(state, &mut rng, globals, &mut writer).await?;
    debug!("final order {} bias {}", last.order(), last.bias());
    Ok(())
}

pub fn run_stats_cmd(args: StatsArgs, globals: &GlobalOpts) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "running {} shuffles on {} threads (seed {})",
        args.trials,
        rayon::current_num_threads(),
        seed
    );

    let h = shuffle_histogram(&Order::default(), args.trials, seed);

    let mut writer = open_writer(globals)?;
    emit(&mut writer, &render_stats(&h, globals)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_globals(cli.g)?;
    let globals = get_globals();

    match cli.cmd {
        Cmd::Show(args) => run_show_cmd(args, globals),
        Cmd::Interactive(args) => run_interactive_cmd(args, globals).await,
        Cmd::Stats(args) => run_stats_cmd(args, globals),
    }
}
