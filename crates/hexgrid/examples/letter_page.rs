//! Print the grid a Letter page gets for a few common constraint sets.
//!
//! Run: `cargo run -p hexgrid --example letter_page`

use hexgrid::{generate, HexConstraints, PageSpec};

fn main() {
    let page = PageSpec::LETTER;
    let cases = [
        ("default", HexConstraints::default()),
        ("width 2", HexConstraints::default().with_width(2.0)),
        ("5 x 3", HexConstraints::default().with_rows(5).with_cols(3)),
        ("width 10, 3 rows", HexConstraints::default().with_width(10.0).with_rows(3)),
    ];
    for (name, constraints) in cases {
        match generate(&page, &constraints) {
            Ok(out) => println!(
                "{name:>18}: rows={:2} cols={:2} side={:.3} width={:.3} hexagons={} stagger={}",
                out.grid.rows,
                out.grid.cols,
                out.grid.side,
                out.grid.hex_width(),
                out.polygons.len(),
                out.tiling.offset_enabled,
            ),
            Err(e) => println!("{name:>18}: {e}"),
        }
    }
}
