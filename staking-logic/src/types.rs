//! src/types.rs
//!
//! @description
//! This module defines the value types shared by the sampler, the packer and the
//! dashboard crate. They are plain `Copy` data so that layout and viewport
//! transitions can hand out new values instead of mutating shared state.
//!
//! Key Structs:
//! - Point: A position or offset in canvas space.
//! - Size: A width/height pair for canvases and containers.
//! - Bubble: One placed circle, pointing back at its source entity by index.

use serde::{Deserialize, Serialize};

/// A position (or a delta) in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The dimensions of a canvas or of the visible container around it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or not finite. Any ratio taken
    /// against a degenerate size is meaningless, so callers short-circuit on it.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A circle placed on the canvas.
///
/// `entity` is the index of the weighted input this bubble was built from. It is a
/// relation only: the bubble never owns or borrows the record it stands for.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bubble {
    pub entity: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Bubble {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Bubble) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether `point` lies inside the circle (boundary included).
    pub fn contains(&self, point: Point) -> bool {
        (self.x - point.x).hypot(self.y - point.y) <= self.radius
    }
}
