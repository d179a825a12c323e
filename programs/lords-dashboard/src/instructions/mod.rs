//! src/instructions/mod.rs
//!
//! @description
//! This module aggregates every dashboard operation. Each submodule holds one
//! operation (or a small family of them, such as zooming) as free functions over
//! the types in `state`, and none of them keep state between calls.

// Raffle operations
pub mod build_participants;
pub mod draw_winners;
pub mod export_winners;

// Stakers map operations
pub mod pack_bubbles;
pub mod zoom;
pub mod pan;
pub mod drag_bubble;
pub mod select_bubble;

// Re-export all public items from the submodules.
pub use build_participants::*;
pub use draw_winners::*;
pub use export_winners::*;
pub use pack_bubbles::*;
pub use zoom::*;
pub use pan::*;
pub use drag_bubble::*;
pub use select_bubble::*;
