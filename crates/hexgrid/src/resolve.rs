//! Dimension resolver: partial constraints → hexagon size and grid counts.
//!
//! Policy (strict priority)
//! 1. An explicit width fixes the hexagon; explicit rows/cols are only
//!    validated against the printable area (`FitError` on overflow).
//! 2. Otherwise rows and/or cols bound the hexagon; the smaller of the two
//!    candidate sizes wins so both axes fit.
//! 3. Otherwise the default hexagon (`cfg::DEFAULT_HEX_WIDTH`).
//! 4. Whatever count is still open is the largest that fits at that size.
//!
//! The row check for an explicit width reserves one extra half-hexagon
//! (`rows·2dy + dy`) so staggered columns keep every row; derived row counts
//! do not, and the layout stage drops the trailing row of raised columns
//! instead.

use std::fmt;

use crate::cfg::{default_side, fits, EDGE_EPS, SIN_60};
use crate::page::PageSpec;

/// Caller-supplied sizing constraints; any subset may be absent.
///
/// Pre: present values are positive (enforced by the caller).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HexConstraints {
    /// Width across flats (`2·dy`).
    pub width: Option<f64>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

impl HexConstraints {
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }
    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }
}

/// Which rule sized the hexagon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sizing {
    /// Explicit width.
    Width,
    /// Row count was the binding bound.
    RowBound,
    /// Column count was the binding bound.
    ColumnBound,
    /// No constraint given.
    Default,
}

/// Fully resolved grid dimensions.
///
/// Invariants:
/// - `dx = side/2`, `dy = side·sin 60°` (up to rounding of the sizing source).
/// - `rows·2dy <= printable height` and `cols·(side+dx) + dx <= printable width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedGrid {
    pub side: f64,
    pub dx: f64,
    pub dy: f64,
    pub rows: usize,
    pub cols: usize,
    pub sizing: Sizing,
}

impl ResolvedGrid {
    /// Grid for a caller-chosen side length.
    pub fn from_side(side: f64, rows: usize, cols: usize, sizing: Sizing) -> Self {
        Self {
            side,
            dx: side / 2.0,
            dy: side * SIN_60,
            rows,
            cols,
            sizing,
        }
    }

    /// Width across flats.
    #[inline]
    pub fn hex_width(&self) -> f64 {
        2.0 * self.dy
    }
    /// Vertical distance between consecutive anchors in a column.
    #[inline]
    pub fn row_pitch(&self) -> f64 {
        2.0 * self.dy
    }
    /// Horizontal distance between consecutive columns.
    #[inline]
    pub fn column_pitch(&self) -> f64 {
        self.side + self.dx
    }
    /// Total horizontal extent of all columns.
    #[inline]
    pub fn span_width(&self) -> f64 {
        self.cols as f64 * self.column_pitch() + self.dx
    }
}

/// Explicit width together with explicit rows/cols overflows the page.
#[derive(Clone, Debug, PartialEq)]
pub enum FitError {
    /// `rows·2dy + dy` exceeds the printable height.
    Rows {
        rows: usize,
        needed: f64,
        available: f64,
    },
    /// `cols·(side+dx) + dx` exceeds the printable width.
    Cols {
        cols: usize,
        needed: f64,
        available: f64,
    },
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::Rows {
                rows,
                needed,
                available,
            } => write!(
                f,
                "too large to fit on page: {rows} rows need height {needed:.3}, printable height is {available:.3}"
            ),
            FitError::Cols {
                cols,
                needed,
                available,
            } => write!(
                f,
                "too large to fit on page: {cols} columns need width {needed:.3}, printable width is {available:.3}"
            ),
        }
    }
}

impl std::error::Error for FitError {}

/// Hexagon size before counts are filled in.
#[derive(Clone, Copy, Debug)]
struct Hex {
    side: f64,
    dx: f64,
    dy: f64,
}

impl Hex {
    fn from_side(side: f64) -> Self {
        Self {
            side,
            dx: side / 2.0,
            dy: side * SIN_60,
        }
    }
    /// Keeps `dy` exact when the rise is the sizing source.
    fn from_rise(dy: f64) -> Self {
        let side = dy / SIN_60;
        Self {
            side,
            dx: side / 2.0,
            dy,
        }
    }
}

/// Resolve hexagon size and grid counts for `page`.
///
/// Errors only when an explicit width is combined with an explicit row or
/// column count that cannot fit; nothing is clamped.
pub fn resolve(page: &PageSpec, constraints: &HexConstraints) -> Result<ResolvedGrid, FitError> {
    let avail_w = page.printable_width();
    let avail_h = page.printable_height();

    let (hex, sizing) = match (constraints.width, constraints.rows, constraints.cols) {
        (Some(width), rows, cols) => {
            let hex = Hex::from_rise(width / 2.0);
            if let Some(rows) = rows {
                let needed = rows as f64 * 2.0 * hex.dy + hex.dy;
                if !fits(needed, avail_h) {
                    return Err(FitError::Rows {
                        rows,
                        needed,
                        available: avail_h,
                    });
                }
            }
            if let Some(cols) = cols {
                let needed = cols as f64 * (hex.side + hex.dx) + hex.dx;
                if !fits(needed, avail_w) {
                    return Err(FitError::Cols {
                        cols,
                        needed,
                        available: avail_w,
                    });
                }
            }
            (hex, Sizing::Width)
        }
        (None, None, None) => (Hex::from_side(default_side()), Sizing::Default),
        (None, rows, cols) => {
            // Counts go through f64 so huge values cannot overflow.
            let max_rise = rows.map_or(avail_h / 2.0, |r| avail_h / (2.0 * r as f64 + 1.0));
            let max_side = cols.map_or(avail_w / 2.0, |c| avail_w / (3.0 * c as f64 + 1.0) * 2.0);
            if max_side < max_rise / SIN_60 {
                (Hex::from_side(max_side), Sizing::ColumnBound)
            } else {
                (Hex::from_rise(max_rise), Sizing::RowBound)
            }
        }
    };

    let rows = constraints
        .rows
        .unwrap_or_else(|| count_fitting(avail_h, 2.0 * hex.dy));
    let cols = constraints
        .cols
        .unwrap_or_else(|| count_fitting(avail_w - hex.dx, hex.side + hex.dx));

    Ok(ResolvedGrid {
        side: hex.side,
        dx: hex.dx,
        dy: hex.dy,
        rows,
        cols,
        sizing,
    })
}

/// `⌊span / pitch⌋`, clamped at zero.
fn count_fitting(span: f64, pitch: f64) -> usize {
    let n = ((span + EDGE_EPS) / pitch).floor();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}
