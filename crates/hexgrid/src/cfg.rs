//! Numeric constants and tolerances shared by resolver and layout.
//!
//! Policy
//! - Tolerances are fixed constants, not knobs.
//! - Resolver fit checks and derived counts compare with `EDGE_EPS`, so a
//!   grid sized to fill an axis exactly is not rejected over rounding.
//! - Layout uses the coarser `OFFSET_TOLERANCE` twice: to decide whether the
//!   leftover height is about one half-hexagon, and for the ceiling guard.
//!   A grid accepted by the first test may overshoot the margin by at most
//!   `OFFSET_TOLERANCE / 2` at either end, and the guard keeps those rows.

/// sin(60°) = √3 / 2.
pub const SIN_60: f64 = 0.866_025_403_784_438_6;

/// Slack for resolver fit checks and derived row/column counts.
pub const EDGE_EPS: f64 = 1e-9;

/// Slack for the stagger decision and the per-column ceiling guard.
pub const OFFSET_TOLERANCE: f64 = 1e-3;

/// Width across flats used when no constraint is given.
pub const DEFAULT_HEX_WIDTH: f64 = 1.0;

/// Side length matching `DEFAULT_HEX_WIDTH` (≈ 0.577).
#[inline]
pub fn default_side() -> f64 {
    DEFAULT_HEX_WIDTH / (2.0 * SIN_60)
}

/// `needed` fits into `available` up to `EDGE_EPS`.
#[inline]
pub(crate) fn fits(needed: f64, available: f64) -> bool {
    needed <= available + EDGE_EPS
}
