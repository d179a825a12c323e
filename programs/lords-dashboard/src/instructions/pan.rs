//! src/instructions/pan.rs
//!
//! @description
//! Panning the stakers map. Pointer movement is scaled by a speed factor that grows
//! as the map is zoomed out, then the offset is clamped so the scaled canvas cannot
//! leave the container entirely.

use staking_logic::Point;

use crate::state::{MapFrame, ViewportConfig, ViewportState};

/// Multiplier applied to pointer deltas at `zoom`.
pub fn pan_speed(zoom: f64, cfg: &ViewportConfig) -> f64 {
    cfg.pan_base_speed + (1.0 - zoom) * cfg.pan_zoom_gain
}

/// Largest allowed `|pan.x|` and `|pan.y|` at `zoom`.
pub fn pan_limits(frame: &MapFrame, zoom: f64) -> Point {
    if frame.is_degenerate() || zoom.is_nan() || zoom <= 0.0 {
        return Point::ORIGIN;
    }
    let limit = |canvas: f64, container: f64| ((canvas * zoom - container) / (2.0 * zoom)).max(0.0);
    Point::new(
        limit(frame.canvas.width, frame.container.width),
        limit(frame.canvas.height, frame.container.height),
    )
}

/// Pulls the pan offset back inside the limits of the state's zoom.
pub fn clamp_pan(state: ViewportState, frame: &MapFrame) -> ViewportState {
    if frame.is_degenerate() {
        return state;
    }
    let limits = pan_limits(frame, state.zoom);
    ViewportState {
        zoom: state.zoom,
        pan: Point::new(
            state.pan.x.min(limits.x).max(-limits.x),
            state.pan.y.min(limits.y).max(-limits.y),
        ),
    }
}

/// Pans by a pointer delta in screen pixels.
pub fn pan(state: ViewportState, delta: Point, frame: &MapFrame, cfg: &ViewportConfig) -> ViewportState {
    if frame.is_degenerate() || !(delta.x.is_finite() && delta.y.is_finite()) {
        return state;
    }
    let speed = pan_speed(state.zoom, cfg);
    let moved = ViewportState {
        zoom: state.zoom,
        pan: Point::new(state.pan.x + delta.x * speed, state.pan.y + delta.y * speed),
    };
    clamp_pan(moved, frame)
}
