//! src/logic/circle_packer.rs
//!
//! @description
//! This module places one bubble per weighted entity on the map canvas. It is a
//! best-effort packer: bubbles are kept apart wherever the try budget allows, and an
//! entity that cannot find a free spot is still placed (possibly overlapping) rather
//! than dropped.
//!
//! @logic
//! 1. Sizing: the canvas and the radius scale come from `bubble_sizing`.
//! 2. Grid: the usable area is cut into square cells of `cell_size_factor` times the
//!    average bubble diameter, ordered by distance from the grid center.
//! 3. Placement, heaviest entity first, up to `max_tries` candidates each:
//!    - tries below `grid_phase_tries`: the next unused cell, jittered inside it;
//!    - tries below `polar_phase_tries`: a polar point whose distance from the
//!      center is `rand * rand`, which favours the middle;
//!    - later tries: a uniform point anywhere in the usable area.
//!    Every candidate is clamped inside the canvas and accepted if it clears all
//!    bubbles placed so far. The last try is accepted regardless.
//!
//! @notes
//! - The phase boundaries are heuristics and live in `PackerParams`, not in code.
//! - Output order is placement order (heaviest first); `Bubble::entity` points back
//!   into the caller's weight slice.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::LogicError;
use crate::logic::bubble_sizing::{canvas_size, RadiusScale};
use crate::logic::geometry::{clamp_into, first_collision};
use crate::types::{Bubble, Point, Size};

/// Tunables for canvas sizing and bubble placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackerParams {
    /// Canvas size relative to the container for sparse maps.
    pub base_canvas_scale: f64,
    /// Bubble count above which the canvas starts growing.
    pub density_threshold: usize,
    /// Multiplier on `sqrt(count / density_threshold)` once growing.
    pub density_factor: f64,
    /// Lower bound on a grown canvas, relative to the container.
    pub min_canvas_scale: f64,
    /// The growth cap is `sqrt(count / canvas_cap_divisor)` clamped to
    /// `[min_canvas_cap, max_canvas_cap]` container multiples.
    pub canvas_cap_divisor: f64,
    pub min_canvas_cap: f64,
    pub max_canvas_cap: f64,
    pub radius_exponent: f64,
    pub min_radius_floor: f64,
    pub max_radius_floor: f64,
    /// Canvas padding as a fraction of the shorter canvas side.
    pub padding_ratio: f64,
    /// Grid cell edge as a multiple of the average bubble diameter.
    pub cell_size_factor: f64,
    pub overlap_factor: f64,
    pub grid_phase_tries: usize,
    pub polar_phase_tries: usize,
    pub max_tries: usize,
    /// Largest share of the usable canvas the bubbles may cover.
    pub max_fill_ratio: f64,
}

impl Default for PackerParams {
    fn default() -> Self {
        Self {
            base_canvas_scale: 1.15,
            density_threshold: 20,
            density_factor: 1.32,
            min_canvas_scale: 1.25,
            canvas_cap_divisor: 50.0,
            min_canvas_cap: 3.0,
            max_canvas_cap: 8.0,
            radius_exponent: 0.3,
            min_radius_floor: 18.0,
            max_radius_floor: 40.0,
            padding_ratio: 0.005,
            cell_size_factor: 1.5,
            overlap_factor: 1.05,
            grid_phase_tries: 80,
            polar_phase_tries: 150,
            max_tries: 300,
            max_fill_ratio: 0.35,
        }
    }
}

/// The result of one packing run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackedLayout {
    pub canvas: Size,
    pub radius_scale: RadiusScale,
    pub bubbles: Vec<Bubble>,
    /// Bubbles accepted on the final try while still overlapping a neighbour.
    pub degraded: usize,
}

/// Center-first queue of grid cells, consumed one cell per grid-phase try.
struct CellGrid {
    padding: f64,
    cell_size: f64,
    cells: Vec<(usize, usize)>,
    next: usize,
}

impl CellGrid {
    fn new(usable: Size, padding: f64, cell_size: f64) -> Self {
        let (columns, rows) = if cell_size > 0.0 && cell_size.is_finite() {
            (
                (usable.width / cell_size).floor() as usize,
                (usable.height / cell_size).floor() as usize,
            )
        } else {
            (0, 0)
        };

        let mut cells: Vec<(usize, usize)> = (0..columns)
            .flat_map(|column| (0..rows).map(move |row| (column, row)))
            .collect();

        let center_x = columns as f64 / 2.0;
        let center_y = rows as f64 / 2.0;
        let distance = |&(column, row): &(usize, usize)| {
            (column as f64 - center_x).hypot(row as f64 - center_y)
        };
        cells.sort_by(|a, b| distance(a).partial_cmp(&distance(b)).unwrap_or(Ordering::Equal));

        Self {
            padding,
            cell_size,
            cells,
            next: 0,
        }
    }

    /// A jittered point in the next unused cell, or `None` once all are taken.
    fn next_point<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Point> {
        let &(column, row) = self.cells.get(self.next)?;
        self.next += 1;
        Some(Point::new(
            self.padding + (column as f64 + 0.2 + rng.gen::<f64>() * 0.6) * self.cell_size,
            self.padding + (row as f64 + 0.2 + rng.gen::<f64>() * 0.6) * self.cell_size,
        ))
    }
}

fn uniform_point<R: Rng + ?Sized>(rng: &mut R, padding: f64, usable: Size) -> Point {
    Point::new(
        padding + rng.gen::<f64>() * usable.width,
        padding + rng.gen::<f64>() * usable.height,
    )
}

fn center_biased_point<R: Rng + ?Sized>(rng: &mut R, padding: f64, usable: Size) -> Point {
    let angle = rng.gen::<f64>() * TAU;
    let reach = rng.gen::<f64>() * rng.gen::<f64>();
    Point::new(
        padding + usable.width / 2.0 + angle.cos() * (usable.width / 2.0) * reach,
        padding + usable.height / 2.0 + angle.sin() * (usable.height / 2.0) * reach,
    )
}

/// Packs one bubble per entry of `weights` for a map shown in `container`.
///
/// Weights below 1 (and non-finite weights) are treated as 1.
///
/// # Returns
/// A `PackedLayout` with exactly `weights.len()` bubbles.
///
/// # Errors
/// `DegenerateContainer` if `container` has a zero, negative or non-finite side.
pub fn pack_circles<R: Rng + ?Sized>(
    weights: &[f64],
    container: Size,
    params: &PackerParams,
    rng: &mut R,
) -> Result<PackedLayout, LogicError> {
    if container.is_degenerate() {
        return Err(LogicError::DegenerateContainer {
            width: container.width,
            height: container.height,
        });
    }

    let canvas = canvas_size(weights.len(), container, params);
    let weights: Vec<f64> = weights
        .iter()
        .map(|&weight| if weight.is_finite() { weight.max(1.0) } else { 1.0 })
        .collect();
    let radius_scale = RadiusScale::for_layout(&weights, canvas, container, params);

    if weights.is_empty() {
        return Ok(PackedLayout {
            canvas,
            radius_scale,
            bubbles: Vec::new(),
            degraded: 0,
        });
    }

    let padding = canvas.min_side() * params.padding_ratio;
    let usable = Size::new(canvas.width - padding * 2.0, canvas.height - padding * 2.0);

    let average_weight = weights.iter().sum::<f64>() / weights.len() as f64;
    let cell_size = radius_scale.radius(average_weight) * 2.0 * params.cell_size_factor;
    let mut grid = CellGrid::new(usable, padding, cell_size);

    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].partial_cmp(&weights[a]).unwrap_or(Ordering::Equal));

    let max_tries = params.max_tries.max(1);
    let mut bubbles: Vec<Bubble> = Vec::with_capacity(weights.len());
    let mut degraded = 0;

    for entity in order {
        let radius = radius_scale.radius(weights[entity]);

        for attempt in 1..=max_tries {
            let candidate = if attempt < params.grid_phase_tries {
                grid.next_point(rng)
                    .unwrap_or_else(|| uniform_point(rng, padding, usable))
            } else if attempt < params.polar_phase_tries {
                center_biased_point(rng, padding, usable)
            } else {
                uniform_point(rng, padding, usable)
            };

            let mut bubble = Bubble {
                entity,
                x: candidate.x,
                y: candidate.y,
                radius,
            };
            clamp_into(&mut bubble, canvas, padding);

            let blocked = first_collision(&bubble, &bubbles, None, params.overlap_factor).is_some();
            if !blocked || attempt == max_tries {
                if blocked {
                    degraded += 1;
                }
                bubbles.push(bubble);
                break;
            }
        }
    }

    Ok(PackedLayout {
        canvas,
        radius_scale,
        bubbles,
        degraded,
    })
}
