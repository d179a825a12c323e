//! src/lib.rs
//!
//! @description
//! This is the main library entry point for the `staking-logic` crate, which contains
//! the numeric and geometric core of the Wild Forest Lords dashboard. Nothing in this
//! crate performs I/O; every function takes its inputs by reference, draws randomness
//! from a caller-supplied `rand::Rng`, and returns freshly built values.
//!
//! The library is structured into modules:
//! - `types`: Shared value types (points, sizes, bubbles).
//! - `error`: The error type returned by the algorithms.
//! - `logic`: The weighted sampler and the bubble packer.
//!
//! @dependencies
//! - `rand`: Uniform random source for sampling and placement.
//! - `serde`: Value types cross into the UI layer as JSON.
//! - `thiserror`: Error derivation.

pub mod error;
pub mod logic;
pub mod types;

pub use error::LogicError;
pub use logic::bubble_sizing::{canvas_size, RadiusScale};
pub use logic::circle_packer::{pack_circles, PackedLayout, PackerParams};
pub use logic::geometry::{clamp_into, collides, count_overlapping_pairs, first_collision};
pub use logic::weighted_sampler::AliasTable;
pub use types::{Bubble, Point, Size};
