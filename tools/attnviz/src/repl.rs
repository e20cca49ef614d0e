use crate::output::{emit, render_state};
use anyhow::Result;
use attnviz_core_state::command::HELP;
use attnviz_core_state::{Command, Outcome, VisualizerState};
use attnviz_globals::GlobalOpts;
use log::{debug, info, warn};
use rand::Rng;
use std::io::{IsTerminal, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "attnviz> ";

/// Read commands line by line until `quit` or end of input. Each line is
/// applied and drawn before the next one is read.
pub async fn run<R: Rng>(
    mut state: VisualizerState,
    rng: &mut R,
    globals: &GlobalOpts,
    writer: &mut dyn Write,
) -> Result<VisualizerState> {
    let prompt = globals.output.is_none() && std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    emit(writer, &render_state(&state, globals)?)?;

    loop {
        if prompt {
            write!(writer, "{}", PROMPT)?;
            writer.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            debug!("repl: end of input");
            break;
        };

        match step(&mut state, &line, rng, globals)? {
            Step::Draw(text) => emit(writer, &text)?,
            Step::Quiet => {}
            Step::Quit => break,
        }
    }

    info!("leaving interactive session");
    Ok(state)
}

#[derive(Debug, PartialEq)]
pub enum Step {
    Draw(String),
    Quiet,
    Quit,
}

/// One line of input against the state. Lines that do not parse are logged
/// and skipped; only output failures are errors.
pub fn step<R: Rng>(
    state: &mut VisualizerState,
    line: &str,
    rng: &mut R,
    globals: &GlobalOpts,
) -> Result<Step> {
    let cmd = match line.parse::<Command>() {
        Ok(cmd) => cmd,
        Err(e) => {
            warn!("{}", e);
            return Ok(Step::Quiet);
        }
    };
    debug!("repl: {:?}", cmd);

    match state.apply(cmd, rng) {
        Outcome::Redraw | Outcome::Show => Ok(Step::Draw(render_state(state, globals)?)),
        Outcome::Help => Ok(Step::Draw(HELP.to_string())),
        Outcome::Quit => Ok(Step::Quit),
    }
}
