//! src/logic/geometry.rs
//!
//! @description
//! Circle-versus-circle tests and canvas clamping. Packing uses these to accept or
//! reject candidate positions; the map uses them to push neighbours away from a
//! dragged bubble.
//!
//! Two bubbles collide when their centers are closer than the sum of their radii
//! times an overlap factor (1.05 by default), which keeps a thin visible gap
//! between touching circles.

use crate::types::{Bubble, Size};

/// Whether `a` and `b` sit closer than `(a.radius + b.radius) * overlap_factor`.
pub fn collides(a: &Bubble, b: &Bubble, overlap_factor: f64) -> bool {
    a.distance_to(b) < (a.radius + b.radius) * overlap_factor
}

/// Index of the first bubble in `placed` that `candidate` collides with.
/// `skip` excludes one index, typically the candidate's own slot.
pub fn first_collision(
    candidate: &Bubble,
    placed: &[Bubble],
    skip: Option<usize>,
    overlap_factor: f64,
) -> Option<usize> {
    placed
        .iter()
        .enumerate()
        .filter(|&(index, _)| Some(index) != skip)
        .find(|(_, other)| collides(candidate, other, overlap_factor))
        .map(|(index, _)| index)
}

/// Number of unordered pairs in `bubbles` that collide.
pub fn count_overlapping_pairs(bubbles: &[Bubble], overlap_factor: f64) -> usize {
    let mut count = 0;
    for (index, a) in bubbles.iter().enumerate() {
        count += bubbles[index + 1..]
            .iter()
            .filter(|b| collides(a, b, overlap_factor))
            .count();
    }
    count
}

/// Clamps `value` into `[low, high]`, preferring `low` when the range is inverted.
///
/// An inverted range happens when a bubble is wider than the canvas minus padding;
/// `f64::clamp` would panic there.
pub fn clamp_axis(value: f64, low: f64, high: f64) -> f64 {
    value.min(high).max(low)
}

/// Moves `bubble` so that it lies fully inside `canvas` shrunk by `padding`.
pub fn clamp_into(bubble: &mut Bubble, canvas: Size, padding: f64) {
    bubble.x = clamp_axis(
        bubble.x,
        padding + bubble.radius,
        canvas.width - padding - bubble.radius,
    );
    bubble.y = clamp_axis(
        bubble.y,
        padding + bubble.radius,
        canvas.height - padding - bubble.radius,
    );
}
