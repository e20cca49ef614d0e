use anyhow::Context;
use attnviz_core_kernel::{Rgb, Token};
use attnviz_core_state::VisualizerState;
use log::debug;
use serde::Serialize;
use std::fmt::Write as _;

pub mod stats;

pub const TITLE: &str = "Attention Visualizer";
pub const SUBTITLE: &str = "Value Matrix with Positional Bias";
pub const BIAS_LABEL: &str = "Enable Positional Bias (bias = 0.1i * 0.1j)";
pub const ORDER_HEADING: &str = "Current Token Order";
pub const OBSERVATION: &str = "\
Without positional bias, token order affects matrix organization but not values.
With positional bias enabled, both matrix organization and values change with shuffling,
as bias is computed based on positions in the current sequence.";

const CELL_WIDTH: usize = 8;

/// Which flavour of output the caller wants.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Style {
    /// 24-bit ANSI backgrounds on matrix cells.
    Color,
    Plain,
}

/// `A(1)`, or `?(0)` for a position that names no token.
pub fn token_label(state: &VisualizerState, token: Option<Token>) -> String {
    match token {
        Some(t) => format!("{}({})", t, state.values().get(t)),
        None => "?(0)".to_string(),
    }
}

pub fn matrix_title(bias: bool) -> String {
    if bias {
        "Value Matrix (with Positional Bias)".to_string()
    } else {
        "Value Matrix (Direct Multiplication)".to_string()
    }
}

pub fn render_header() -> String {
    format!("{}\n{}", TITLE, SUBTITLE)
}

pub fn render_inputs(state: &VisualizerState) -> String {
    let mut out = String::new();
    for (i, (token, value)) in state.values().iter().enumerate() {
        if i > 0 {
            out.push_str("   ");
        }
        let _ = write!(out, "Token {} Value: {}", token, value);
    }
    let mark = if state.bias() { "x" } else { " " };
    let _ = write!(out, "\n[{}] {}", mark, BIAS_LABEL);
    out
}

pub fn render_order(state: &VisualizerState) -> String {
    let strip = state
        .ordered_tokens()
        .into_iter()
        .map(|t| token_label(state, t))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n  {}", ORDER_HEADING, strip)
}

fn paint(cell: &str, color: Rgb, style: Style) -> String {
    match style {
        Style::Plain => cell.to_string(),
        // dark text on the light end of the ramp, light text on the blue end
        Style::Color => {
            let fg = if color.r < 128 { 255 } else { 0 };
            format!(
                "\x1b[48;2;{};{};{}m\x1b[38;2;{fg};{fg};{fg}m{}\x1b[0m",
                color.r, color.g, color.b, cell
            )
        }
    }
}

/// Matrix table: header row of `token(value)` labels, one row per display
/// position, cells to two decimals.
pub fn render_matrix(state: &VisualizerState, style: Style) -> String {
    let tokens = state.ordered_tokens();
    let mut out = String::new();

    let _ = writeln!(out, "{}", matrix_title(state.bias()));
    let _ = write!(out, "{:>6}", "");
    for &t in &tokens {
        let _ = write!(out, "{:>w$}", token_label(state, t), w = CELL_WIDTH);
    }

    for (i, row) in state.matrix().rows().iter().enumerate() {
        let row_label = tokens
            .get(i)
            .copied()
            .flatten()
            .map_or("?", Token::label);
        let _ = write!(out, "\n{:>6}", row_label);
        for (j, value) in row.iter().enumerate() {
            let cell = format!("{:>w$.2}", value, w = CELL_WIDTH);
            let color = state.color_at(i, j).unwrap_or(Rgb::WHITE);
            out.push_str(&paint(&cell, color, style));
        }
    }

    out
}

pub fn render_observation() -> String {
    format!("Observation\n{}", OBSERVATION)
}

/// Full screen, top to bottom, the way the widget lays it out.
pub fn render_screen(state: &VisualizerState, style: Style) -> String {
    debug!("render_screen: style={:?}", style);
    [
        render_header(),
        render_inputs(state),
        render_order(state),
        render_matrix(state, style),
        render_observation(),
    ]
    .join("\n\n")
}

/// Serializable snapshot of a state and everything derived from it.
#[derive(Debug, Serialize)]
pub struct Report {
    pub values: attnviz_core_kernel::TokenValues,
    pub order: attnviz_core_kernel::Order,
    pub labels: Vec<String>,
    pub bias: bool,
    pub title: String,
    pub matrix: attnviz_core_kernel::Matrix,
    pub colors: Vec<Vec<Rgb>>,
}

impl Report {
    pub fn from_state(state: &VisualizerState) -> Self {
        let labels = state
            .ordered_tokens()
            .into_iter()
            .map(|t| token_label(state, t))
            .collect();

        let n = state.matrix().size();
        let colors = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| state.color_at(i, j).unwrap_or(Rgb::WHITE))
                    .collect()
            })
            .collect();

        Self {
            values: *state.values(),
            order: state.order().clone(),
            labels,
            bias: state.bias(),
            title: matrix_title(state.bias()),
            matrix: state.matrix().clone(),
            colors,
        }
    }
}

pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("serializing report as json")
}

pub fn to_yaml<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_yaml::to_string(value).context("serializing report as yaml")
}
