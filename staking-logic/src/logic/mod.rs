//! src/logic/mod.rs
//!
//! @description
//! This module serves as the central hub for the reusable algorithms behind the
//! raffle and the stakers map. Orchestration (which participants are eligible,
//! which owners become bubbles, logging) lives in the dashboard crate; the code
//! here only does the math.
//!
//! @modules
//! - `weighted_sampler`: Alias-method sampling of an index proportional to weight.
//! - `geometry`: Collision tests and canvas clamping shared by packing and dragging.
//! - `bubble_sizing`: Canvas growth and the weight-to-radius function.
//! - `circle_packer`: Center-biased placement of non-overlapping bubbles.

pub mod bubble_sizing;
pub mod circle_packer;
pub mod geometry;
pub mod weighted_sampler;
