use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use hexgrid::{generate, HexConstraints, PageSpec};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod render;

use render::{Format, GridSummary};

#[derive(Parser, Debug)]
#[command(name = "hexgrid")]
#[command(about = "Print a page-filling grid of flat-top hexagons")]
struct Cmd {
    /// Width of a hexagon (across flats) in centimeters
    #[arg(short, long, value_parser = positive_length)]
    width: Option<f64>,
    /// Number of rows to print
    #[arg(short, long, value_parser = positive_count)]
    rows: Option<usize>,
    /// Number of columns to print
    #[arg(short, long, value_parser = positive_count)]
    cols: Option<usize>,
    /// Output file; the format's extension is added when missing
    #[arg(short, long, default_value = "hexgrid")]
    out: PathBuf,
    #[arg(short, long, value_enum, default_value_t = Format::Ps)]
    format: Format,
    /// Page preset; --page-width/--page-height/--margin override it
    #[arg(long, value_enum, default_value_t = PagePreset::Letter)]
    page: PagePreset,
    #[arg(long, value_parser = positive_length)]
    page_width: Option<f64>,
    #[arg(long, value_parser = positive_length)]
    page_height: Option<f64>,
    /// Minimum margin on every side
    #[arg(long)]
    margin: Option<f64>,
    /// Print grid statistics to stderr
    #[arg(short, long)]
    debug: bool,
    /// Also write <stem>.provenance.json next to the output
    #[arg(long)]
    provenance: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PagePreset {
    /// US Letter, 21.6 x 27.9 cm
    Letter,
    /// ISO A4, 21.0 x 29.7 cm
    A4,
}

impl Cmd {
    fn page_spec(&self) -> Result<PageSpec> {
        let base = match self.page {
            PagePreset::Letter => PageSpec::LETTER,
            PagePreset::A4 => PageSpec::A4,
        };
        let width = self.page_width.unwrap_or(base.width);
        let height = self.page_height.unwrap_or(base.height);
        let margin = self.margin.unwrap_or(base.margin);
        PageSpec::new(width, height, margin).ok_or_else(|| {
            anyhow!("page {width} x {height} with margin {margin} leaves no printable area")
        })
    }

    fn constraints(&self) -> HexConstraints {
        HexConstraints {
            width: self.width,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

fn positive_length(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("expected a positive length, got {s}"))
    }
}

fn positive_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("expected at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("{e}")),
    }
}

/// Quiet unless `-d`, like the stats block.
fn log_level(cmd: &Cmd) -> Level {
    if cmd.debug {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = log_level(&cmd);
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    run(cmd)
}

fn run(cmd: Cmd) -> Result<()> {
    let page = cmd.page_spec()?;
    let constraints = cmd.constraints();
    tracing::info!(
        width = ?constraints.width,
        rows = ?constraints.rows,
        cols = ?constraints.cols,
        page_width = page.width,
        page_height = page.height,
        margin = page.margin,
        "resolve"
    );
    let layout = generate(&page, &constraints)?;
    tracing::debug!(
        sizing = ?layout.grid.sizing,
        staggered = layout.tiling.offset_enabled,
        hexagons = layout.polygons.len(),
        "layout"
    );
    if cmd.debug {
        eprint!("{}", render::stats(&layout));
    }

    let path = render::output_path(&cmd.out, cmd.format);
    render::write(&path, cmd.format, &page, &layout)?;
    tracing::info!(out = %path.display(), hexagons = layout.polygons.len(), "wrote");

    if cmd.provenance {
        let payload = provenance::Payload {
            params: serde_json::json!({
                "width": constraints.width,
                "rows": constraints.rows,
                "cols": constraints.cols,
                "page": { "width": page.width, "height": page.height, "margin": page.margin },
                "format": cmd.format.extension(),
            }),
            grid: GridSummary::of(&layout),
        };
        let prov = provenance::write_sidecar(&path, payload)?;
        tracing::info!(provenance = %prov.display(), "provenance");
    }
    Ok(())
}
