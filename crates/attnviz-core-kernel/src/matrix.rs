use crate::order::Order;
use crate::token::TokenValues;
use log::debug;
use serde::Serialize;

const BIAS_STEP: f64 = 0.1;

/// Additive term that depends only on display positions, never on which
/// token sits there.
#[inline(always)]
pub fn positional_bias(i: usize, j: usize, enabled: bool) -> f64 {
    if !enabled {
        return 0.0;
    }
    (BIAS_STEP * i as f64) * (BIAS_STEP * j as f64)
}

/// Square grid of cell values, one row per display position.
#[derive(Clone, PartialEq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.rows.get(i).and_then(|r| r.get(j)).copied()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Largest cell, `None` for an empty matrix.
    pub fn max_value(&self) -> Option<f64> {
        self.values().reduce(f64::max)
    }

    /// Every cell, sorted. Two matrices with equal multisets of values
    /// compare equal here regardless of layout.
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut v: Vec<f64> = self.values().collect();
        v.sort_by(f64::total_cmp);
        v
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (0..n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

/// Build the value matrix for the current state.
///
/// cell(i, j) = V[token at position i] * V[token at position j] + bias(i, j)
///
/// Products are taken in f64, so no i64 input can overflow. Order indices
/// that do not name a token contribute 0.
pub fn compute_matrix(values: &TokenValues, order: &Order, bias_enabled: bool) -> Matrix {
    let weights: Vec<f64> = order
        .as_slice()
        .iter()
        .map(|&idx| values.value_at(idx) as f64)
        .collect();

    // one row per position; every row is as long as `weights`
    let rows: Vec<Vec<f64>> = weights
        .iter()
        .enumerate()
        .map(|(i, &wi)| {
            weights
                .iter()
                .enumerate()
                .map(|(j, &wj)| wi * wj + positional_bias(i, j, bias_enabled))
                .collect()
        })
        .collect();

    debug!(
        "compute_matrix: order={} bias={} rows={:?}",
        order, bias_enabled, rows
    );

    Matrix { rows }
}
