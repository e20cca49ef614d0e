//! Matrix engine for the toy attention visualizer.
//!
//! Everything here is a pure function of the caller's state:
//!
//! - [`matrix::compute_matrix`] builds the value matrix for a token table,
//!   display order and bias flag
//! - [`color::color_for`] maps a cell to its grey-to-blue color
//! - [`order::shuffle`] draws a new display order (Fisher-Yates)
//! - [`parse::parse_value`] turns user text into a token value, never failing
//!
//! [`stats`] runs shuffles in bulk on the rayon pool to check uniformity.

pub mod color;
pub mod matrix;
pub mod order;
pub mod parse;
pub mod stats;
pub mod token;

pub use color::{Rgb, color_for};
pub use matrix::{Matrix, compute_matrix, positional_bias};
pub use order::{Order, shuffle};
pub use parse::parse_value;
pub use stats::{ShuffleHistogram, shuffle_histogram};
pub use token::{TOKEN_COUNT, Token, TokenValues};
