//! src/state/config.rs
//!
//! @description
//! Defines `DashboardConfig`, the single place where packing and viewport tunables
//! are kept. Every field has a default matching the shipped behaviour, so a config
//! file only needs to name the values it changes.
//!
//! Key features:
//! - `packer`: canvas growth, radius bounds, placement try budget (see `PackerParams`).
//! - `viewport`: zoom step and limits, pan speed, drag padding.

use std::path::Path;

use serde::{Deserialize, Serialize};
use staking_logic::PackerParams;
use tracing::info;

use crate::error::Result;

/// Tunables for zooming, panning and dragging the stakers map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Zoom change per wheel tick or button press.
    pub zoom_step: f64,
    /// Fraction of the fit-to-container zoom used as the ideal zoom.
    pub ideal_zoom_margin: f64,
    /// Absolute upper bound on zoom.
    pub max_zoom_cap: f64,
    /// The minimum zoom shows the canvas at this fraction of the container.
    pub min_zoom_container_ratio: f64,
    /// The minimum zoom never drops below this.
    pub min_zoom_floor: f64,
    /// Pointer deltas are multiplied by `pan_base_speed + (1 - zoom) * pan_zoom_gain`.
    pub pan_base_speed: f64,
    pub pan_zoom_gain: f64,
    /// Dragged bubbles stay this fraction of the shorter canvas side away from the edge.
    pub drag_padding_ratio: f64,
    pub overlap_factor: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_step: 0.1,
            ideal_zoom_margin: 0.95,
            max_zoom_cap: 1.5,
            min_zoom_container_ratio: 0.8,
            min_zoom_floor: 0.2,
            pan_base_speed: 1.3,
            pan_zoom_gain: 0.6,
            drag_padding_ratio: 0.05,
            overlap_factor: 1.05,
        }
    }
}

/// All dashboard tunables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub packer: PackerParams,
    pub viewport: ViewportConfig,
}

impl DashboardConfig {
    /// Parses a JSON document. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::from_json(&std::fs::read_to_string(path)?)?;
        info!(path = %path.display(), "Loaded dashboard config");
        Ok(config)
    }
}
