//! src/logic/bubble_sizing.rs
//!
//! @description
//! Decides how large the map canvas is and how large each bubble is, before any
//! bubble is placed.
//!
//! @logic
//! 1. Canvas: a sparse map uses the container scaled by a fixed margin. Past the
//!    density threshold the canvas grows with `sqrt(count / threshold)`, keeps the
//!    container's aspect ratio, and is capped at a multiple of the container that
//!    itself grows slowly with the count.
//! 2. Radius bounds: looked up from a table banded on bubble count (denser maps get
//!    smaller circles), divided by a density factor, then scaled by the square root
//!    of how much larger the canvas is than the container.
//! 3. Radius function: `min + (weight / max_weight)^exponent * (max - min)`. The
//!    exponent (0.3) compresses the range so a few whales do not eat the canvas.
//! 4. Fill guard: if the bubbles would cover more than `max_fill_ratio` of the
//!    usable canvas, both bounds shrink by the same factor.
//!
//! @dependencies
//! - `crate::logic::circle_packer::PackerParams`: Every tunable used here.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::logic::circle_packer::PackerParams;
use crate::types::Size;

/// Radius bounds by bubble count: (count strictly above, min radius, max radius).
/// Values are divided by the density factor before use.
const RADIUS_BANDS: [(usize, f64, f64); 5] = [
    (800, 28.0, 85.0),
    (500, 32.0, 92.0),
    (300, 35.0, 100.0),
    (150, 40.0, 110.0),
    (50, 45.0, 120.0),
];

/// Bounds for maps at or below the lowest band. Not density-scaled.
const SPARSE_RADIUS_BOUNDS: (f64, f64) = (50.0, 130.0);

/// Bubble count at which the density factor equals 1.
const DENSITY_REFERENCE_COUNT: f64 = 100.0;

/// Computes the canvas size for `count` bubbles shown in `container`.
pub fn canvas_size(count: usize, container: Size, params: &PackerParams) -> Size {
    let mut width = container.width * params.base_canvas_scale;
    let mut height = container.height * params.base_canvas_scale;

    if count > params.density_threshold && params.density_threshold > 0 {
        let growth = (count as f64 / params.density_threshold as f64).sqrt() * params.density_factor;
        width = container.width * growth;
        height = width / container.aspect_ratio();

        width = width.max(container.width * params.min_canvas_scale);
        height = height.max(container.height * params.min_canvas_scale);

        let cap = (count as f64 / params.canvas_cap_divisor)
            .sqrt()
            .max(params.min_canvas_cap)
            .min(params.max_canvas_cap);
        width = width.min(container.width * cap);
        height = height.min(container.height * cap);
    }

    Size::new(width, height)
}

/// The monotonic weight-to-radius mapping for one layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusScale {
    pub min_radius: f64,
    pub max_radius: f64,
    pub max_weight: f64,
    pub exponent: f64,
}

impl RadiusScale {
    /// Derives the scale for `weights` (already floored at 1) on `canvas`.
    pub fn for_layout(weights: &[f64], canvas: Size, container: Size, params: &PackerParams) -> Self {
        let count = weights.len();
        let max_weight = weights.iter().copied().fold(1.0_f64, f64::max);

        let density = (count as f64 / DENSITY_REFERENCE_COUNT).powf(0.25);
        let (mut min_radius, mut max_radius) = match RADIUS_BANDS
            .iter()
            .find(|(above, _, _)| count > *above)
        {
            Some(&(_, min, max)) => (min / density, max / density),
            None => SPARSE_RADIUS_BOUNDS,
        };

        let container_scale = (canvas.width / container.width).min(canvas.height / container.height);
        min_radius = params.min_radius_floor.max(min_radius * container_scale.sqrt());
        max_radius = params.max_radius_floor.max(max_radius * container_scale.sqrt());

        let mut scale = Self {
            min_radius,
            max_radius,
            max_weight,
            exponent: params.radius_exponent,
        };

        let padding = canvas.min_side() * params.padding_ratio;
        let usable_area = (canvas.width - 2.0 * padding) * (canvas.height - 2.0 * padding);
        let covered: f64 = weights.iter().map(|&weight| PI * scale.radius(weight).powi(2)).sum();
        let budget = usable_area * params.max_fill_ratio;
        if covered > budget && budget > 0.0 {
            let shrink = (budget / covered).sqrt();
            scale.min_radius *= shrink;
            scale.max_radius *= shrink;
        }

        scale
    }

    pub fn radius(&self, weight: f64) -> f64 {
        let normalized = (weight / self.max_weight).clamp(0.0, 1.0).powf(self.exponent);
        self.min_radius + normalized * (self.max_radius - self.min_radius)
    }
}
