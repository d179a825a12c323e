//! src/instructions/pack_bubbles.rs
//!
//! @description
//! Builds the stakers map: one bubble per owner with at least one staked Lord,
//! sized by staked count, and the viewport the map opens with.
//!
//! @logic
//! 1. Validates the container. A zero or non-finite side is `InvalidContainer`.
//! 2. Keeps owners with `staked_count > 0` and uses the staked count as the weight.
//! 3. Packs the circles with `staking_logic::pack_circles`.
//! 4. The initial viewport is the ideal zoom with no pan.

use rand::Rng;
use staking_logic::{pack_circles, PackerParams, Size};
use tracing::{info, warn};

use crate::error::{DashboardError, Result};
use crate::instructions::zoom::reset_view;
use crate::state::{BubbleLayout, OwnerRecord, ViewportConfig, ViewportState};

/// Packs one bubble per staker inside a canvas sized for `container`.
pub fn pack_bubbles<R: Rng + ?Sized>(
    owners: &[OwnerRecord],
    container: Size,
    params: &PackerParams,
    rng: &mut R,
) -> Result<BubbleLayout> {
    // --- Validation ---
    if container.is_degenerate() {
        return Err(DashboardError::InvalidContainer {
            width: container.width,
            height: container.height,
        });
    }

    let stakers: Vec<OwnerRecord> = owners.iter().filter(|o| o.staked_count > 0).cloned().collect();
    let weights: Vec<f64> = stakers.iter().map(|o| f64::from(o.staked_count)).collect();

    let packed = pack_circles(&weights, container, params, rng)?;

    info!(
        stakers = stakers.len(),
        canvas_width = packed.canvas.width,
        canvas_height = packed.canvas.height,
        min_radius = packed.radius_scale.min_radius,
        max_radius = packed.radius_scale.max_radius,
        "Packed stakers map"
    );
    if packed.degraded > 0 {
        warn!(degraded = packed.degraded, "Some bubbles were placed without a free spot");
    }

    Ok(BubbleLayout {
        container,
        canvas: packed.canvas,
        radius_scale: packed.radius_scale,
        bubbles: packed.bubbles,
        stakers,
        degraded: packed.degraded,
    })
}

/// The viewport a freshly packed map opens with.
pub fn initial_viewport(layout: &BubbleLayout, cfg: &ViewportConfig) -> ViewportState {
    let state = reset_view(&layout.frame(), cfg);
    info!(zoom = state.zoom, "Initialised map viewport");
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn owner(address: &str, staked: u32) -> OwnerRecord {
        OwnerRecord {
            address: address.into(),
            total_lords: staked + 1,
            staked_count: staked,
            raffle_power: f64::from(staked),
            ..OwnerRecord::default()
        }
    }

    #[test]
    fn test_only_stakers_become_bubbles() {
        let owners = vec![owner("0xa", 3), owner("0xb", 0), owner("0xc", 9)];
        let mut rng = StdRng::seed_from_u64(8);
        let layout = pack_bubbles(&owners, Size::new(1000.0, 800.0), &PackerParams::default(), &mut rng).unwrap();

        assert_eq!(layout.bubbles.len(), 2);
        assert_eq!(layout.stakers.len(), 2);
        // Heaviest staker is placed first.
        assert_eq!(layout.owner_of(0).map(|o| o.address.as_str()), Some("0xc"));
        assert!(layout.owner_of(2).is_none());
    }

    #[test]
    fn test_invalid_container() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = pack_bubbles(&[owner("0xa", 1)], Size::new(0.0, 10.0), &PackerParams::default(), &mut rng);
        assert!(matches!(result, Err(DashboardError::InvalidContainer { .. })));
    }

    #[test]
    fn test_initial_viewport_is_centered_and_in_bounds() {
        let owners: Vec<OwnerRecord> = (1..=40).map(|i| owner(&format!("0x{i}"), i)).collect();
        let mut rng = StdRng::seed_from_u64(2);
        let layout = pack_bubbles(&owners, Size::new(1000.0, 800.0), &PackerParams::default(), &mut rng).unwrap();
        let cfg = ViewportConfig::default();
        let state = initial_viewport(&layout, &cfg);

        assert_eq!(state.pan, staking_logic::Point::ORIGIN);
        assert!(crate::instructions::zoom::zoom_bounds(&layout.frame(), &cfg).contains(state.zoom));
    }
}
