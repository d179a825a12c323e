//! src/instructions/zoom.rs
//!
//! @description
//! Zoom limits for the stakers map and the zoom transitions of `ViewportState`.
//!
//! @logic
//! 1. Minimum zoom: the zoom at which the canvas fills 80% of the container. Maps
//!    with more than 50 bubbles may go below it (down to a cap that falls with the
//!    bubble count); smaller maps are held between 0.6 and 0.8. Never below 0.2.
//! 2. Maximum zoom: `min(1.5, canvas width / container width)`, and never below
//!    the minimum.
//! 3. Ideal zoom: the fit-to-container zoom times 0.95, capped lower for dense
//!    maps, then clamped into the bounds.
//! 4. Every transition clamps the zoom and then re-clamps the pan offset for the
//!    new zoom.
//!
//! @notes
//! - A frame with a zero or non-finite side short-circuits to zoom 1.
//! - An empty map starts at zoom 1, still clamped into the bounds.

use tracing::debug;

use crate::instructions::pan::clamp_pan;
use crate::state::{
    MapFrame, ViewportConfig, ViewportState, ZoomBounds, DEFAULT_ZOOM, IDEAL_ZOOM_CAPS, MIN_ZOOM_CAPS,
    SPARSE_MIN_ZOOM_RANGE,
};

/// Canvas-to-container fit ratio: the zoom at which the canvas exactly fits.
fn fit_zoom(frame: &MapFrame) -> f64 {
    (frame.container.width / frame.canvas.width).min(frame.container.height / frame.canvas.height)
}

pub fn min_zoom(frame: &MapFrame, cfg: &ViewportConfig) -> f64 {
    if frame.is_degenerate() {
        return DEFAULT_ZOOM;
    }
    let base = fit_zoom(frame) * cfg.min_zoom_container_ratio;
    let adjusted = match MIN_ZOOM_CAPS.iter().find(|(above, _)| frame.bubble_count > *above) {
        Some(&(_, cap)) => base.min(cap),
        None => base.max(SPARSE_MIN_ZOOM_RANGE.0).min(SPARSE_MIN_ZOOM_RANGE.1),
    };
    adjusted.max(cfg.min_zoom_floor)
}

pub fn max_zoom(frame: &MapFrame, cfg: &ViewportConfig) -> f64 {
    if frame.is_degenerate() {
        return DEFAULT_ZOOM;
    }
    cfg.max_zoom_cap.min(frame.canvas.width / frame.container.width)
}

pub fn zoom_bounds(frame: &MapFrame, cfg: &ViewportConfig) -> ZoomBounds {
    let min = min_zoom(frame, cfg);
    ZoomBounds {
        min,
        max: max_zoom(frame, cfg).max(min),
    }
}

pub fn ideal_zoom(frame: &MapFrame, cfg: &ViewportConfig) -> f64 {
    if frame.is_degenerate() {
        return DEFAULT_ZOOM;
    }
    if frame.bubble_count == 0 {
        return zoom_bounds(frame, cfg).clamp(DEFAULT_ZOOM);
    }
    let mut zoom = fit_zoom(frame) * cfg.ideal_zoom_margin;
    if let Some(&(_, cap)) = IDEAL_ZOOM_CAPS.iter().find(|(above, _)| frame.bubble_count > *above) {
        zoom = zoom.min(cap);
    }
    zoom_bounds(frame, cfg).clamp(zoom)
}

/// Moves to `zoom`, clamped into the bounds, keeping the pan offset valid.
pub fn set_zoom(state: ViewportState, zoom: f64, frame: &MapFrame, cfg: &ViewportConfig) -> ViewportState {
    let zoom = if zoom.is_finite() { zoom } else { state.zoom };
    let next = ViewportState {
        zoom: zoom_bounds(frame, cfg).clamp(zoom),
        pan: state.pan,
    };
    clamp_pan(next, frame)
}

pub fn zoom_in(state: ViewportState, frame: &MapFrame, cfg: &ViewportConfig) -> ViewportState {
    set_zoom(state, state.zoom + cfg.zoom_step, frame, cfg)
}

pub fn zoom_out(state: ViewportState, frame: &MapFrame, cfg: &ViewportConfig) -> ViewportState {
    set_zoom(state, state.zoom - cfg.zoom_step, frame, cfg)
}

/// One wheel tick: scrolling up zooms in, scrolling down zooms out.
pub fn wheel(state: ViewportState, delta_y: f64, frame: &MapFrame, cfg: &ViewportConfig) -> ViewportState {
    if delta_y < 0.0 {
        zoom_in(state, frame, cfg)
    } else if delta_y > 0.0 {
        zoom_out(state, frame, cfg)
    } else {
        state
    }
}

/// Back to the ideal zoom, centered.
pub fn reset_view(frame: &MapFrame, cfg: &ViewportConfig) -> ViewportState {
    let state = ViewportState {
        zoom: ideal_zoom(frame, cfg),
        ..ViewportState::default()
    };
    debug!(zoom = state.zoom, "Reset map view");
    state
}
