//! src/instructions/select_bubble.rs
//!
//! @description
//! Turning pointer input on the map into a bubble selection.
//!
//! A pointer press on a bubble always starts a drag session. Releasing it without
//! any movement counts as a click and selects that bubble; releasing after a move
//! leaves the selection as it was. Pointer positions are mapped back to canvas
//! coordinates to find the bubble under them.

use staking_logic::Point;

use crate::state::{BubbleLayout, DragSession, MapFrame, Selection, ViewportState};

/// Ends a drag session, turning it into a click when the pointer never moved.
pub fn release_bubble(session: DragSession, selection: Selection) -> Selection {
    if session.moved {
        selection
    } else {
        selection.select(session.index)
    }
}

/// Converts a pointer position relative to the container's top-left corner into
/// canvas coordinates, undoing pan and zoom.
pub fn screen_to_canvas(pointer: Point, state: &ViewportState, frame: &MapFrame) -> Option<Point> {
    if frame.is_degenerate() || state.zoom.is_nan() || state.zoom <= 0.0 {
        return None;
    }
    let offset_x = pointer.x - frame.container.width / 2.0 - state.pan.x;
    let offset_y = pointer.y - frame.container.height / 2.0 - state.pan.y;
    Some(Point::new(
        frame.canvas.width / 2.0 + offset_x / state.zoom,
        frame.canvas.height / 2.0 + offset_y / state.zoom,
    ))
}

/// Index of the bubble under the pointer, if any.
pub fn bubble_at(layout: &BubbleLayout, state: &ViewportState, pointer: Point) -> Option<usize> {
    let point = screen_to_canvas(pointer, state, &layout.frame())?;
    layout.hit_test(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OwnerRecord;
    use staking_logic::{Bubble, RadiusScale, Size};

    fn session(moved: bool) -> DragSession {
        DragSession {
            index: 4,
            pointer_start: Point::ORIGIN,
            bubble_start: Point::ORIGIN,
            moved,
        }
    }

    #[test]
    fn test_click_selects_and_drag_does_not() {
        let selection = Selection::default();
        let clicked = release_bubble(session(false), selection);
        assert!(clicked.is_selected(4));

        let dragged = release_bubble(session(true), selection.select(1));
        assert!(dragged.is_selected(1));
        assert!(!dragged.is_selected(4));
    }

    #[test]
    fn test_screen_to_canvas_undoes_pan_and_zoom() {
        let frame = MapFrame::new(Size::new(2000.0, 1000.0), Size::new(1000.0, 500.0), 1);
        let state = ViewportState {
            zoom: 0.5,
            pan: Point::new(10.0, -20.0),
        };
        let center = screen_to_canvas(Point::new(510.0, 230.0), &state, &frame).unwrap();
        assert_eq!(center, Point::new(1000.0, 500.0));
        let right = screen_to_canvas(Point::new(610.0, 230.0), &state, &frame).unwrap();
        assert_eq!(right, Point::new(1200.0, 500.0));
    }

    #[test]
    fn test_bubble_at_finds_topmost_bubble() {
        let layout = BubbleLayout {
            container: Size::new(1000.0, 500.0),
            canvas: Size::new(1000.0, 500.0),
            radius_scale: RadiusScale {
                min_radius: 10.0,
                max_radius: 50.0,
                max_weight: 1.0,
                exponent: 0.3,
            },
            bubbles: vec![
                Bubble { entity: 0, x: 500.0, y: 250.0, radius: 50.0 },
                Bubble { entity: 1, x: 520.0, y: 250.0, radius: 10.0 },
            ],
            stakers: vec![OwnerRecord::default(), OwnerRecord::default()],
            degraded: 0,
        };
        let state = ViewportState::default();
        assert_eq!(bubble_at(&layout, &state, Point::new(520.0, 250.0)), Some(1));
        assert_eq!(bubble_at(&layout, &state, Point::new(480.0, 250.0)), Some(0));
        assert_eq!(bubble_at(&layout, &state, Point::new(10.0, 10.0)), None);
    }
}
