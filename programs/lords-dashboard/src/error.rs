//! src/error.rs
//!
//! @description
//! This module defines the error type for the Lords dashboard. Every variant carries
//! a message that can be shown to the user as-is, so the UI never has to translate
//! error codes itself.
//!
//! @dependencies
//! - `thiserror`: Derives `Display` and `Error` from the messages below.

use thiserror::Error;

use staking_logic::LogicError;

#[derive(Error, Debug)]
pub enum DashboardError {
    // ========================================
    // Raffle Errors
    // ========================================
    #[error("No eligible participants for the raffle.")]
    NoEligibleParticipants,

    #[error("No winners to export.")]
    NoWinnersToExport,

    // ========================================
    // Map Errors
    // ========================================
    #[error("Invalid map container: {width}x{height}. Both sides must be positive.")]
    InvalidContainer { width: f64, height: f64 },

    #[error("Bubble {index} does not exist; the map has {len} bubbles.")]
    BubbleOutOfRange { index: usize, len: usize },

    // ========================================
    // Wrapped Errors
    // ========================================
    #[error(transparent)]
    Logic(#[from] LogicError),

    #[error("Invalid input data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
