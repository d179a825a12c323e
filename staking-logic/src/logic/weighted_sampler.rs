//! src/logic/weighted_sampler.rs
//!
//! @description
//! This module implements Vose's alias method for drawing an index with probability
//! proportional to its weight. Building the table is O(n); every draw afterwards is
//! O(1) and consumes exactly one uniform index and one uniform real.
//!
//! @logic
//! 1. Normalisation: each weight is scaled to `weight * n / total`, so the average
//!    cell holds exactly 1.0 of probability mass.
//! 2. Partition: indices below 1.0 go to the `small` stack, the rest to `large`.
//! 3. Pairing: a small cell is topped up by a large one. The large index becomes the
//!    small cell's alias and gives up `1 - prob[small]` of its own mass, after which it
//!    is reclassified.
//! 4. Drain: anything left on either stack is only off by rounding and is forced to 1.0.
//! 5. Sampling: pick a cell uniformly, then keep it with probability `prob[cell]`,
//!    otherwise return its alias.
//!
//! @notes
//! - The caller's weight slice is never modified.
//! - A zero-weight index can never be returned: its cell always defers to its alias,
//!   and nothing names it as an alias.

use rand::Rng;

use crate::error::LogicError;

/// Precomputed alias table over a fixed list of weights.
#[derive(Clone, Debug)]
pub struct AliasTable {
    prob: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasTable {
    /// Builds the table for `weights`.
    ///
    /// # Errors
    /// * `EmptyWeights` if the slice is empty.
    /// * `InvalidWeight` for a negative, NaN or infinite entry.
    /// * `DegenerateTotal` if the weights sum to zero (or overflow).
    pub fn new(weights: &[f64]) -> Result<Self, LogicError> {
        if weights.is_empty() {
            return Err(LogicError::EmptyWeights);
        }

        let mut total = 0.0;
        for (index, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(LogicError::InvalidWeight { index, weight });
            }
            total += weight;
        }
        if !(total > 0.0 && total.is_finite()) {
            return Err(LogicError::DegenerateTotal { total });
        }

        let n = weights.len();
        let scale = n as f64 / total;
        let mut prob: Vec<f64> = weights.iter().map(|weight| weight * scale).collect();
        let mut alias: Vec<usize> = (0..n).collect();

        let (mut small, mut large): (Vec<usize>, Vec<usize>) =
            (0..n).partition(|&index| prob[index] < 1.0);

        while let (Some(&less), Some(&more)) = (small.last(), large.last()) {
            small.pop();
            large.pop();
            alias[less] = more;
            prob[more] -= 1.0 - prob[less];
            if prob[more] < 1.0 {
                small.push(more);
            } else {
                large.push(more);
            }
        }
        // Whatever remains is full up to rounding error.
        for index in small.into_iter().chain(large) {
            prob[index] = 1.0;
        }

        Ok(Self { prob, alias })
    }

    /// Draws one index into the original weight slice.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let cell = rng.gen_range(0..self.prob.len());
        let keep: f64 = rng.gen();
        if keep < self.prob[cell] {
            cell
        } else {
            self.alias[cell]
        }
    }

    pub fn len(&self) -> usize {
        self.prob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    /// The exact probability that `sample` returns `index`, read back from the table.
    pub fn probability(&self, index: usize) -> f64 {
        if index >= self.prob.len() {
            return 0.0;
        }
        let aliased: f64 = self
            .alias
            .iter()
            .enumerate()
            .filter(|&(cell, &target)| target == index && cell != index)
            .map(|(cell, _)| 1.0 - self.prob[cell])
            .sum();
        (self.prob[index] + aliased) / self.prob.len() as f64
    }
}
