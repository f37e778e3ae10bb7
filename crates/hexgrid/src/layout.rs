//! Tiling layout: resolved grid → anchor points of every hexagon.
//!
//! Model
//! - Columns advance by `side + dx`; anchors in a column advance by `2·dy`.
//! - Every other column is raised by `dy` (brick pattern). Which parity is
//!   raised depends on one global decision: if the printable height leaves at
//!   least `dy` above the `rows·2dy` block, raised columns still hold all
//!   rows, so the block is centered together with that extra half-row and the
//!   first column is raised. Otherwise the block is centered on its own, the
//!   first column stays down, and raised columns lose their trailing row.
//! - The ceiling guard in `Tiling::column` is what drops that trailing row.
//!   With an offset-enabled layout it never fires.
//!
//! An anchor is the bottom-left vertex of a hexagon's bottom edge; the
//! hexagon spans `[x − dx, x + side + dx] × [y, y + 2dy]`.

use nalgebra::Vector2;

use crate::cfg::OFFSET_TOLERANCE;
use crate::page::PageSpec;
use crate::resolve::ResolvedGrid;

/// Start vertex of one hexagon outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub col: usize,
    pub row: usize,
    pub at: Vector2<f64>,
}

/// Global placement decision for a grid on a page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tiling {
    pub page: PageSpec,
    pub grid: ResolvedGrid,
    /// x of the first column's anchors.
    pub start_x: f64,
    /// y of the lowest anchor in a column that is not raised.
    pub start_y: f64,
    /// First column raised (and raised columns keep all rows).
    pub offset_enabled: bool,
}

impl Tiling {
    pub fn new(page: &PageSpec, grid: ResolvedGrid) -> Self {
        let block = grid.rows as f64 * grid.row_pitch();
        let leftover = page.printable_height() - block;
        let offset_enabled = leftover >= grid.dy - OFFSET_TOLERANCE;
        let start_y = if offset_enabled {
            (page.height - block - grid.dy) / 2.0
        } else {
            (page.height - block) / 2.0
        };
        let start_x = (page.width - grid.span_width()) / 2.0 + grid.dx;
        Self {
            page: *page,
            grid,
            start_x,
            start_y,
            offset_enabled,
        }
    }

    /// Column `col` sits `dy` higher than its unraised neighbours.
    #[inline]
    pub fn is_raised(&self, col: usize) -> bool {
        (col % 2 == 0) == self.offset_enabled
    }

    #[inline]
    pub fn column_x(&self, col: usize) -> f64 {
        self.start_x + col as f64 * self.grid.column_pitch()
    }

    /// y of the lowest anchor in column `col`.
    #[inline]
    pub fn column_base(&self, col: usize) -> f64 {
        if self.is_raised(col) {
            self.start_y + self.grid.dy
        } else {
            self.start_y
        }
    }

    /// Anchors of one column, bottom to top. Stops early when a hexagon would
    /// cross the top margin.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Anchor> + '_ {
        let x = self.column_x(col);
        let base = self.column_base(col);
        let pitch = self.grid.row_pitch();
        let height = 2.0 * self.grid.dy;
        let ceiling = self.page.ceiling() + OFFSET_TOLERANCE;
        (0..self.grid.rows)
            .map(move |row| Anchor {
                col,
                row,
                at: Vector2::new(x, base + row as f64 * pitch),
            })
            .take_while(move |a| a.at.y + height <= ceiling)
    }

    /// All anchors, column-major.
    pub fn anchors(&self) -> impl Iterator<Item = Anchor> + '_ {
        (0..self.grid.cols).flat_map(move |col| self.column(col))
    }

    /// Number of hexagons emitted in column `col`.
    pub fn column_len(&self, col: usize) -> usize {
        self.column(col).count()
    }

    /// Distance from the page bottom to the lowest hexagon.
    #[inline]
    pub fn bottom_margin(&self) -> f64 {
        self.start_y
    }

    /// Distance from the page's left edge to the leftmost hexagon vertex.
    #[inline]
    pub fn left_margin(&self) -> f64 {
        self.start_x - self.grid.dx
    }
}

/// Anchors for `grid` on `page`, column-major then bottom-to-top.
pub fn layout(page: &PageSpec, grid: &ResolvedGrid) -> Vec<Anchor> {
    Tiling::new(page, *grid).anchors().collect()
}
