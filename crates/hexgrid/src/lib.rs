//! Printable hexagon grids: sizing and tiling of flat-top hexagons on a page.
//!
//! Pipeline
//! - `resolve`: page + partial constraints (width / rows / cols) → `ResolvedGrid`.
//! - `layout`: `ResolvedGrid` → column-major `Anchor`s with staggered columns.
//! - `polygon`: each `Anchor` → closed 7-point `HexagonPolygon`.
//!
//! All functions are pure. Nothing here logs or touches the filesystem; the
//! `cli` crate owns option parsing, diagnostics, and output formats.
//!
//! Units
//! - One linear unit throughout (centimeters for the bundled page presets).

pub mod cfg;
pub mod layout;
pub mod page;
pub mod polygon;
pub mod resolve;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use layout::{layout, Anchor, Tiling};
pub use page::PageSpec;
pub use polygon::{generate, HexagonPolygon, Layout};
pub use resolve::{resolve, FitError, HexConstraints, ResolvedGrid, Sizing};

/// Common exports for callers that just want a grid on a page.
pub mod prelude {
    pub use crate::layout::{layout, Anchor, Tiling};
    pub use crate::page::PageSpec;
    pub use crate::polygon::{generate, HexagonPolygon, Layout};
    pub use crate::resolve::{resolve, FitError, HexConstraints, ResolvedGrid, Sizing};
    pub use nalgebra::Vector2 as Vec2;
}

#[cfg(test)]
mod tests;
