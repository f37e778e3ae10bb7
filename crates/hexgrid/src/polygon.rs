//! Hexagon outlines and the resolve → layout → expand pipeline.

use nalgebra::Vector2;

use crate::layout::{Anchor, Tiling};
use crate::page::PageSpec;
use crate::resolve::{resolve, FitError, HexConstraints, ResolvedGrid};

/// Closed flat-top hexagon outline: six vertices plus the start repeated.
///
/// Order (from the anchor, counter-clockwise): bottom edge, lower-right,
/// upper-right, top edge, upper-left, lower-left, back to the anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexagonPolygon {
    pub points: [Vector2<f64>; 7],
}

impl HexagonPolygon {
    /// Expand `anchor` by the cumulative moves
    /// `(+side,0) (+dx,+dy) (−dx,+dy) (−side,0) (−dx,−dy) (+dx,−dy)`.
    pub fn from_anchor(anchor: &Anchor, grid: &ResolvedGrid) -> Self {
        let (side, dx, dy) = (grid.side, grid.dx, grid.dy);
        let moves = [
            Vector2::new(side, 0.0),
            Vector2::new(dx, dy),
            Vector2::new(-dx, dy),
            Vector2::new(-side, 0.0),
            Vector2::new(-dx, -dy),
            Vector2::new(dx, -dy),
        ];
        let mut points = [anchor.at; 7];
        for (k, m) in moves.iter().enumerate() {
            points[k + 1] = points[k] + m;
        }
        Self { points }
    }

    /// The six distinct corners.
    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.points[..6]
    }

    /// Relative moves between consecutive points (what a `rlineto` path strokes).
    pub fn moves(&self) -> impl Iterator<Item = Vector2<f64>> + '_ {
        self.points.windows(2).map(|w| w[1] - w[0])
    }

    /// Six boundary segments `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Axis-aligned bounding box `(min, max)`.
    pub fn bounds(&self) -> (Vector2<f64>, Vector2<f64>) {
        let mut lo = self.points[0];
        let mut hi = self.points[0];
        for p in &self.points[1..] {
            lo = lo.inf(p);
            hi = hi.sup(p);
        }
        (lo, hi)
    }
}

/// Output of the full pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub grid: ResolvedGrid,
    pub tiling: Tiling,
    pub anchors: Vec<Anchor>,
    pub polygons: Vec<HexagonPolygon>,
}

/// Resolve, lay out and expand every hexagon for `page`.
pub fn generate(page: &PageSpec, constraints: &HexConstraints) -> Result<Layout, FitError> {
    let grid = resolve(page, constraints)?;
    let tiling = Tiling::new(page, grid);
    let anchors: Vec<Anchor> = tiling.anchors().collect();
    let polygons = anchors
        .iter()
        .map(|a| HexagonPolygon::from_anchor(a, &grid))
        .collect();
    Ok(Layout {
        grid,
        tiling,
        anchors,
        polygons,
    })
}
