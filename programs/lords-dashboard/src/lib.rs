//! src/lib.rs
//!
//! @description
//! This is the main entry point for the Lords dashboard library. It turns indexed
//! token and owner data into the two interactive tools of the dashboard: the staking
//! raffle (participant intake, weighted draws, CSV export) and the stakers bubble
//! map (packing, zoom, pan, drag and selection).
//!
//! The numeric core lives in the `staking-logic` crate. This crate owns the data
//! model, validation, logging and configuration around it.
//!
//! The library is structured into modules:
//! - `state`: Records, results, viewport state, constants and configuration.
//! - `instructions`: One module per dashboard operation.
//! - `error`: The dashboard error type.

pub mod error;
pub mod instructions;
pub mod state;

pub use error::{DashboardError, Result};
pub use instructions::*;
pub use state::*;
