//! src/state/mod.rs
//!
//! @description
//! This module serves as the central hub for the dashboard's data model: owner
//! records, raffle participants and results, the bubble map and its viewport, plus
//! the constants and configuration that tune them.

pub mod bubble_map;
pub mod config;
pub mod constants;
pub mod owner;
pub mod participant;
pub mod raffle;
pub mod viewport;

pub use bubble_map::*;
pub use config::*;
pub use constants::*;
pub use owner::*;
pub use participant::*;
pub use raffle::*;
pub use viewport::*;
