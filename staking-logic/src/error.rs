//! src/error.rs
//!
//! @description
//! Errors raised by the algorithms in this crate. All of them describe caller
//! mistakes (bad weights, a zero-sized container); none are transient.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogicError {
    // ========================================
    // Weighted Sampling Errors
    // ========================================
    #[error("Cannot sample from an empty weight list.")]
    EmptyWeights,

    #[error("Invalid weight {weight} at index {index}: weights must be finite and non-negative.")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("Total weight must be positive and finite, got {total}.")]
    DegenerateTotal { total: f64 },

    // ========================================
    // Layout Errors
    // ========================================
    #[error("Container must have a positive finite size, got {width}x{height}.")]
    DegenerateContainer { width: f64, height: f64 },
}
