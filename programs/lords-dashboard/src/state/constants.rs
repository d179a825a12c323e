//! src/state/constants.rs
//!
//! @description
//! Fixed constants shared across the dashboard. Anything a deployment might want to
//! tune lives in `config.rs` instead.

/// Number of hex digits after the `0x` prefix of a wallet address.
pub const ADDRESS_HEX_DIGITS: usize = 40;

/// Zoom used whenever container or canvas dimensions are unusable.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Ideal-zoom caps by bubble count: (count strictly above, cap).
pub const IDEAL_ZOOM_CAPS: [(usize, f64); 2] = [(300, 0.85), (100, 0.9)];

/// Minimum-zoom caps by bubble count: (count strictly above, cap).
/// Denser maps may be zoomed out further.
pub const MIN_ZOOM_CAPS: [(usize, f64); 4] = [(500, 0.25), (200, 0.3), (100, 0.4), (50, 0.5)];

/// Range the minimum zoom is held to for maps of 50 bubbles or fewer.
pub const SPARSE_MIN_ZOOM_RANGE: (f64, f64) = (0.6, 0.8);

/// Win chances are printed with at least this many decimals...
pub const WIN_CHANCE_MIN_DECIMALS: usize = 2;
/// ...and at most this many before switching to exponential notation.
pub const WIN_CHANCE_MAX_DECIMALS: usize = 8;
pub const WIN_CHANCE_EXPONENTIAL_BELOW: f64 = 1e-8;

pub const WINNERS_CSV_HEADERS: [&str; 5] = ["Type", "Number", "Address", "Raffle Power", "Win Chance (%)"];
