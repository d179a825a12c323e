//! src/state/bubble_map.rs
//!
//! @description
//! The packed stakers map and the transient state of pointer interaction with it.
//!
//! Key features:
//! - `BubbleLayout`: one bubble per staker. `Bubble::entity` indexes `stakers`.
//! - `DragSession`: a bubble being dragged, from pointer press to release.
//! - `Selection`: at most one bubble selected for the detail panel.

use serde::{Deserialize, Serialize};
use staking_logic::{Bubble, Point, RadiusScale, Size};

use super::owner::OwnerRecord;
use super::viewport::MapFrame;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleLayout {
    pub container: Size,
    pub canvas: Size,
    pub radius_scale: RadiusScale,
    /// In placement order, heaviest staker first.
    pub bubbles: Vec<Bubble>,
    /// Owners with at least one staked Lord, in the order they were supplied.
    pub stakers: Vec<OwnerRecord>,
    /// Bubbles placed on their last try without a free spot.
    pub degraded: usize,
}

impl BubbleLayout {
    /// The owner shown by the bubble at `index`.
    pub fn owner_of(&self, index: usize) -> Option<&OwnerRecord> {
        self.bubbles
            .get(index)
            .and_then(|bubble| self.stakers.get(bubble.entity))
    }

    pub fn frame(&self) -> MapFrame {
        MapFrame::new(self.canvas, self.container, self.bubbles.len())
    }

    /// Topmost bubble under `point`, in canvas coordinates.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.bubbles.iter().rposition(|bubble| bubble.contains(point))
    }
}

/// A bubble being dragged. Positions are recomputed from the press point on every
/// move, so rounding never accumulates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragSession {
    pub index: usize,
    /// Pointer position at press, in screen pixels.
    pub pointer_start: Point,
    /// Bubble center at press, in canvas units.
    pub bubble_start: Point,
    /// Whether the pointer has moved since the press.
    pub moved: bool,
}

/// Selecting replaces any earlier selection, so only one bubble is ever selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub selected: Option<usize>,
}

impl Selection {
    pub fn select(self, index: usize) -> Self {
        Self {
            selected: Some(index),
        }
    }

    pub fn close(self) -> Self {
        Self { selected: None }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_selection_and_close() {
        let selection = Selection::default().select(1).select(2);
        assert_eq!(selection.selected, Some(2));
        assert_eq!(selection.close().selected, None);
    }

    #[test]
    fn test_is_selected_matches_only_the_selected_index() {
        let selection = Selection::default();
        assert!(!selection.is_selected(0));
        let selection = selection.select(3);
        assert!(selection.is_selected(3));
        assert!(!selection.is_selected(0));
        assert!(!selection.close().is_selected(3));
    }
}
