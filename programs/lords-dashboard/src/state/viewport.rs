//! src/state/viewport.rs
//!
//! @description
//! Zoom and pan state of the stakers map. `ViewportState` is a plain value: every
//! transition in `instructions::zoom` and `instructions::pan` takes a state and
//! returns a new one, already clamped.
//!
//! Invariants held after every transition:
//! - `zoom` lies in the frame's `ZoomBounds`.
//! - `|pan.x|` and `|pan.y|` never exceed the pan limits of the current zoom, so the
//!   scaled canvas cannot be dragged fully out of the container.

use serde::{Deserialize, Serialize};
use staking_logic::{Point, Size};

use super::constants::DEFAULT_ZOOM;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    pub zoom: f64,
    /// Offset of the canvas center from the container center, in screen pixels.
    pub pan: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Point::ORIGIN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl ZoomBounds {
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.min(self.max).max(self.min)
    }

    pub fn contains(&self, zoom: f64) -> bool {
        zoom >= self.min && zoom <= self.max
    }
}

/// What the viewport math needs to know about the map being shown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFrame {
    pub canvas: Size,
    pub container: Size,
    pub bubble_count: usize,
}

impl MapFrame {
    pub fn new(canvas: Size, container: Size, bubble_count: usize) -> Self {
        Self {
            canvas,
            container,
            bubble_count,
        }
    }

    /// Zoom and pan short-circuit to their defaults on a degenerate frame.
    pub fn is_degenerate(&self) -> bool {
        self.canvas.is_degenerate() || self.container.is_degenerate()
    }
}
