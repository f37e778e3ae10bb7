//! Vector output for a generated grid: PostScript, SVG, JSON.
//!
//! All writers stroke one closed path per hexagon in layout order. Coordinates
//! arrive in centimeters with the origin at the page's bottom-left corner.

use anyhow::{Context, Result};
use clap::ValueEnum;
use hexgrid::{Layout, PageSpec, Sizing};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// PostScript points per centimeter.
const PT_PER_CM: f64 = 72.0 / 2.54;
/// Stroke width in centimeters.
const LINE_WIDTH: f64 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// PostScript page
    Ps,
    /// SVG image sized in centimeters
    Svg,
    /// Grid parameters and polygon coordinates
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Ps => "ps",
            Format::Svg => "svg",
            Format::Json => "json",
        }
    }
}

/// `out` with the format's extension added if it has none.
pub fn output_path(out: &Path, format: Format) -> PathBuf {
    if out.extension().is_some() {
        out.to_path_buf()
    } else {
        out.with_extension(format.extension())
    }
}

/// Grid parameters as reported in JSON output and provenance sidecars.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridSummary {
    pub rows: usize,
    pub cols: usize,
    pub side: f64,
    pub dx: f64,
    pub dy: f64,
    pub width: f64,
    pub sizing: &'static str,
    pub staggered: bool,
    pub bottom_margin: f64,
    pub left_margin: f64,
    pub hexagons: usize,
}

impl GridSummary {
    pub fn of(layout: &Layout) -> Self {
        let g = &layout.grid;
        Self {
            rows: g.rows,
            cols: g.cols,
            side: g.side,
            dx: g.dx,
            dy: g.dy,
            width: g.hex_width(),
            sizing: match g.sizing {
                Sizing::Width => "width",
                Sizing::RowBound => "rows",
                Sizing::ColumnBound => "cols",
                Sizing::Default => "default",
            },
            staggered: layout.tiling.offset_enabled,
            bottom_margin: layout.tiling.bottom_margin(),
            left_margin: layout.tiling.left_margin(),
            hexagons: layout.polygons.len(),
        }
    }
}

/// Operator-facing statistics block (written to stderr with `--debug`).
pub fn stats(layout: &Layout) -> String {
    let s = GridSummary::of(layout);
    format!(
        "rows:  {:2}\t\tcols:  {:2}\nside:  {:.3}\t\twidth:  {:.3}\nbottom margin:  {:.3}\tleft margin:  {:.3}\n",
        s.rows, s.cols, s.side, s.width, s.bottom_margin, s.left_margin
    )
}

/// Write `layout` to `path` in `format`, creating parent directories.
pub fn write(path: &Path, format: Format, page: &PageSpec, layout: &Layout) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    let written = match format {
        Format::Ps => write_postscript(&mut w, page, layout),
        Format::Svg => write_svg(&mut w, page, layout),
        Format::Json => write_json(&mut w, page, layout),
    };
    written
        .and_then(|()| w.flush())
        .with_context(|| format!("writing {}", path.display()))
}

pub fn write_postscript<W: Write>(w: &mut W, page: &PageSpec, layout: &Layout) -> io::Result<()> {
    let (pw, ph) = (page.width * PT_PER_CM, page.height * PT_PER_CM);
    writeln!(w, "%!PS-Adobe-3.0")?;
    writeln!(w, "%%Creator: hexgrid {}", hexgrid::VERSION)?;
    writeln!(w, "%%BoundingBox: 0 0 {} {}", pw.ceil(), ph.ceil())?;
    writeln!(w, "%%HiResBoundingBox: 0 0 {pw:.3} {ph:.3}")?;
    writeln!(w, "%%Pages: 1")?;
    writeln!(w, "%%EndComments")?;
    writeln!(w, "%%Page: 1 1")?;
    writeln!(w, "{:.3} setlinewidth 1 setlinejoin", LINE_WIDTH * PT_PER_CM)?;
    for hex in &layout.polygons {
        let start = hex.points[0] * PT_PER_CM;
        write!(w, "newpath {:.3} {:.3} moveto", start.x, start.y)?;
        // The sixth move returns to the start; closepath draws it.
        for m in hex.moves().take(5) {
            let m = m * PT_PER_CM;
            write!(w, " {:.3} {:.3} rlineto", m.x, m.y)?;
        }
        writeln!(w, " closepath stroke")?;
    }
    writeln!(w, "showpage")?;
    writeln!(w, "%%EOF")
}

pub fn write_svg<W: Write>(w: &mut W, page: &PageSpec, layout: &Layout) -> io::Result<()> {
    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        w,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}cm" height="{1}cm" viewBox="0 0 {0} {1}">"#,
        page.width, page.height
    )?;
    writeln!(
        w,
        r#"<g fill="none" stroke="black" stroke-width="{LINE_WIDTH}" stroke-linejoin="round">"#
    )?;
    for hex in &layout.polygons {
        let start = hex.points[0];
        // SVG y grows downwards.
        write!(w, r#"<path d="M{:.4} {:.4}"#, start.x, page.height - start.y)?;
        for m in hex.moves().take(5) {
            write!(w, " l{:.4} {:.4}", m.x, -m.y)?;
        }
        writeln!(w, r#" z"/>"#)?;
    }
    writeln!(w, "</g>")?;
    writeln!(w, "</svg>")
}

#[derive(Serialize)]
struct JsonDoc<'a> {
    version: &'a str,
    page: JsonPage,
    grid: GridSummary,
    polygons: Vec<[[f64; 2]; 7]>,
}

#[derive(Serialize)]
struct JsonPage {
    width: f64,
    height: f64,
    margin: f64,
}

pub fn write_json<W: Write>(w: &mut W, page: &PageSpec, layout: &Layout) -> io::Result<()> {
    let doc = JsonDoc {
        version: hexgrid::VERSION,
        page: JsonPage {
            width: page.width,
            height: page.height,
            margin: page.margin,
        },
        grid: GridSummary::of(layout),
        polygons: layout
            .polygons
            .iter()
            .map(|h| h.points.map(|p| [p.x, p.y]))
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *w, &doc)?;
    writeln!(w)
}
