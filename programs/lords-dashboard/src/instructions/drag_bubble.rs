//! src/instructions/drag_bubble.rs
//!
//! @description
//! Dragging one bubble around the map, pushing aside the bubbles it runs into.
//!
//! @logic
//! 1. `begin_drag` records the pointer and bubble positions at press.
//! 2. On every move, the bubble goes to its press position plus the pointer delta
//!    times the pan speed, clamped inside the canvas minus a drag padding.
//! 3. One relaxation pass: for every other bubble that collides with the dragged
//!    one, both move apart along the line between their centers by half the
//!    overlap each, and both are clamped again. Bubbles pushed this way are not
//!    checked against each other.
//!
//! @notes
//! - The input bubbles are never modified; a new vector is returned.

use staking_logic::{clamp_into, collides, Bubble, Point, Size};

use crate::error::{DashboardError, Result};
use crate::instructions::pan::pan_speed;
use crate::state::{DragSession, ViewportConfig};

fn check_index(bubbles: &[Bubble], index: usize) -> Result<()> {
    if index >= bubbles.len() {
        return Err(DashboardError::BubbleOutOfRange {
            index,
            len: bubbles.len(),
        });
    }
    Ok(())
}

/// Starts dragging the bubble at `index` from screen position `pointer`.
pub fn begin_drag(bubbles: &[Bubble], index: usize, pointer: Point) -> Result<DragSession> {
    // --- Validation ---
    check_index(bubbles, index)?;

    Ok(DragSession {
        index,
        pointer_start: pointer,
        bubble_start: bubbles[index].center(),
        moved: false,
    })
}

/// Moves the dragged bubble to follow `pointer` and resolves direct collisions.
///
/// # Returns
/// The updated session and the new bubble positions.
pub fn drag_bubble(
    bubbles: &[Bubble],
    session: &DragSession,
    pointer: Point,
    canvas: Size,
    zoom: f64,
    cfg: &ViewportConfig,
) -> Result<(DragSession, Vec<Bubble>)> {
    // --- Validation ---
    check_index(bubbles, session.index)?;
    let mut updated = bubbles.to_vec();
    if canvas.is_degenerate() || !(pointer.x.is_finite() && pointer.y.is_finite()) {
        return Ok((*session, updated));
    }

    let speed = pan_speed(zoom, cfg);
    let padding = canvas.min_side() * cfg.drag_padding_ratio;

    let mut dragged = updated[session.index];
    dragged.x = session.bubble_start.x + (pointer.x - session.pointer_start.x) * speed;
    dragged.y = session.bubble_start.y + (pointer.y - session.pointer_start.y) * speed;
    clamp_into(&mut dragged, canvas, padding);

    for (index, other) in updated.iter_mut().enumerate() {
        if index == session.index || !collides(&dragged, other, cfg.overlap_factor) {
            continue;
        }
        let min_distance = (dragged.radius + other.radius) * cfg.overlap_factor;
        let push = (min_distance - dragged.distance_to(other)) * 0.5;
        let angle = (dragged.y - other.y).atan2(dragged.x - other.x);
        let (sin, cos) = angle.sin_cos();

        other.x -= cos * push;
        other.y -= sin * push;
        clamp_into(other, canvas, padding);

        dragged.x += cos * push;
        dragged.y += sin * push;
        clamp_into(&mut dragged, canvas, padding);
    }
    updated[session.index] = dragged;

    let next = DragSession {
        moved: session.moved || pointer != session.pointer_start,
        ..*session
    };
    Ok((next, updated))
}
