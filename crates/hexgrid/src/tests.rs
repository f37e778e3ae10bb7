use super::*;
use crate::cfg::{default_side, OFFSET_TOLERANCE, SIN_60};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

const TOL: f64 = 1e-3;

fn letter() -> PageSpec {
    PageSpec::LETTER
}

#[test]
fn width_only_derives_counts() {
    let g = resolve(&letter(), &HexConstraints::default().with_width(2.0)).unwrap();
    assert_eq!(g.sizing, Sizing::Width);
    assert!((g.dy - 1.0).abs() < 1e-12);
    assert!((g.side - 1.1547).abs() < 1e-4);
    assert!((g.dx - 0.5774).abs() < 1e-4);
    assert_eq!(g.rows, 13);
    assert_eq!(g.cols, 11);
}

#[test]
fn rows_and_cols_pick_binding_axis() {
    let c = HexConstraints::default().with_rows(5).with_cols(3);
    let g = resolve(&letter(), &c).unwrap();
    assert_eq!((g.rows, g.cols), (5, 3));
    // maxRise = 26.4 / 11 = 2.4 is tighter than maxSide = 4.02 → row-bound.
    assert_eq!(g.sizing, Sizing::RowBound);
    assert!((g.dy - 2.4).abs() < 1e-12);
    let height = 5.0 * 2.0 * g.dy + g.dy;
    let width = 3.0 * (g.side + g.dx) + g.dx;
    assert!((height - 26.4).abs() < 1e-9);
    assert!(width <= 20.1);
}

#[test]
fn many_columns_are_column_bound() {
    let c = HexConstraints::default().with_rows(2).with_cols(20);
    let g = resolve(&letter(), &c).unwrap();
    assert_eq!(g.sizing, Sizing::ColumnBound);
    let width = 20.0 * (g.side + g.dx) + g.dx;
    assert!((width - 20.1).abs() < 1e-9);
    assert!(2.0 * 2.0 * g.dy + g.dy <= 26.4);
}

#[test]
fn oversized_width_with_rows_is_fit_error() {
    let c = HexConstraints::default().with_width(10.0).with_rows(3);
    match resolve(&letter(), &c) {
        Err(FitError::Rows {
            rows,
            needed,
            available,
        }) => {
            assert_eq!(rows, 3);
            assert!((needed - 35.0).abs() < 1e-9);
            assert!((available - 26.4).abs() < 1e-9);
        }
        other => panic!("expected row fit error, got {other:?}"),
    }
}

#[test]
fn oversized_width_with_cols_is_fit_error() {
    let c = HexConstraints::default().with_width(10.0).with_cols(5);
    let err = resolve(&letter(), &c).unwrap_err();
    assert!(matches!(err, FitError::Cols { cols: 5, .. }));
    assert!(err.to_string().contains("too large to fit on page"));
}

#[test]
fn explicit_width_wins_when_feasible() {
    let c = HexConstraints::default()
        .with_width(2.0)
        .with_rows(5)
        .with_cols(4);
    let g = resolve(&letter(), &c).unwrap();
    assert_eq!(g.side, 1.0 / SIN_60);
    assert_eq!((g.rows, g.cols), (5, 4));
}

#[test]
fn single_count_is_kept_exactly() {
    let g = resolve(&letter(), &HexConstraints::default().with_rows(7)).unwrap();
    assert_eq!(g.rows, 7);
    assert!(g.cols >= 1);
    let g = resolve(&letter(), &HexConstraints::default().with_cols(4)).unwrap();
    assert_eq!(g.cols, 4);
    assert!(g.rows >= 1);
}

#[test]
fn no_constraints_use_default_hexagon() {
    let g = resolve(&letter(), &HexConstraints::default()).unwrap();
    assert_eq!(g.sizing, Sizing::Default);
    assert_eq!(g.side, default_side());
    assert!((g.hex_width() - 1.0).abs() < 1e-12);
    assert_eq!(g.rows, 26);
    assert_eq!(g.cols, 22);
}

#[test]
fn page_rejects_empty_printable_area() {
    assert!(PageSpec::new(10.0, 10.0, 5.0).is_none());
    assert!(PageSpec::new(10.0, 10.0, -1.0).is_none());
    assert!(PageSpec::new(f64::NAN, 10.0, 1.0).is_none());
    let p = PageSpec::new(10.0, 12.0, 0.0).unwrap();
    assert_eq!(p.printable_height(), 12.0);
}

#[test]
fn short_leftover_drops_last_row_of_raised_columns() {
    // 26.4 - 13·2 = 0.4 < dy: no stagger slack.
    let g = resolve(&letter(), &HexConstraints::default().with_width(2.0)).unwrap();
    let t = Tiling::new(&letter(), g);
    assert!(!t.offset_enabled);
    assert!(!t.is_raised(0));
    assert!(t.is_raised(1));
    assert!((t.bottom_margin() - 0.95).abs() < 1e-9);
    assert_eq!(t.column_len(0), 13);
    assert_eq!(t.column_len(1), 12);
    assert_eq!(layout(&letter(), &g).len(), 6 * 13 + 5 * 12);
}

#[test]
fn exact_stagger_slack_keeps_all_rows() {
    let c = HexConstraints::default().with_rows(5).with_cols(3);
    let g = resolve(&letter(), &c).unwrap();
    let t = Tiling::new(&letter(), g);
    assert!(t.offset_enabled);
    assert!(t.is_raised(0) && !t.is_raised(1) && t.is_raised(2));
    for col in 0..3 {
        assert_eq!(t.column_len(col), 5);
    }
    assert!((t.bottom_margin() - 0.75).abs() < 1e-9);
}

#[test]
fn stagger_within_tolerance_keeps_top_rows() {
    // Leftover is dy minus half the offset tolerance.
    let margin = 0.75;
    let page = PageSpec::new(21.6, 2.0 * margin + 4.0 * 2.0 + 1.0 - 0.0005, margin).unwrap();
    let g = resolve(&page, &HexConstraints::default().with_width(2.0)).unwrap();
    assert_eq!(g.rows, 4);
    let t = Tiling::new(&page, g);
    assert!(t.offset_enabled);
    for col in 0..g.cols {
        assert_eq!(t.column_len(col), 4, "column {col}");
    }
    assert!(t.bottom_margin() >= margin - OFFSET_TOLERANCE / 2.0);
    let top = (0..g.cols)
        .flat_map(|col| t.column(col))
        .map(|a| a.at.y + g.hex_width())
        .fold(f64::MIN, f64::max);
    assert!(top <= page.ceiling() + OFFSET_TOLERANCE / 2.0);
}

#[test]
fn huge_counts_do_not_overflow() {
    let g = resolve(&letter(), &HexConstraints::default().with_rows(usize::MAX)).unwrap();
    assert_eq!(g.rows, usize::MAX);
    assert_eq!(g.sizing, Sizing::RowBound);
    assert!(g.dy > 0.0 && g.dy.is_finite());

    let cols = usize::MAX / 2;
    let g = resolve(&letter(), &HexConstraints::default().with_cols(cols)).unwrap();
    assert_eq!(g.cols, cols);
    assert_eq!(g.sizing, Sizing::ColumnBound);
    assert!(g.side > 0.0 && g.side.is_finite());

    let c = HexConstraints::default()
        .with_rows(usize::MAX)
        .with_cols(usize::MAX);
    let g = resolve(&letter(), &c).unwrap();
    assert_eq!((g.rows, g.cols), (usize::MAX, usize::MAX));
}

#[test]
fn anchors_are_column_major() {
    let g = resolve(&letter(), &HexConstraints::default().with_rows(4).with_cols(3)).unwrap();
    let anchors = layout(&letter(), &g);
    let order: Vec<(usize, usize)> = anchors.iter().map(|a| (a.col, a.row)).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    for w in anchors.windows(2) {
        if w[0].col == w[1].col {
            assert!((w[1].at.y - w[0].at.y - g.row_pitch()).abs() < 1e-9);
        } else {
            assert!((w[1].at.x - w[0].at.x - g.column_pitch()).abs() < 1e-9);
        }
    }
}

#[test]
fn grid_is_centered_horizontally() {
    let g = resolve(&letter(), &HexConstraints::default().with_width(2.0)).unwrap();
    let t = Tiling::new(&letter(), g);
    let left = t.left_margin();
    let right = letter().width - (t.column_x(g.cols - 1) + g.side + g.dx);
    assert!((left - right).abs() < 1e-9);
    assert!(left >= letter().margin);
}

#[test]
fn polygon_is_closed_regular_hexagon() {
    let g = ResolvedGrid::from_side(1.5, 1, 1, Sizing::Width);
    assert_eq!(g.sizing, Sizing::Width);
    let a = Anchor {
        col: 0,
        row: 0,
        at: nalgebra::vector![2.0, 3.0],
    };
    let h = HexagonPolygon::from_anchor(&a, &g);
    assert_eq!(h.points[0], a.at);
    assert!((h.points[6] - h.points[0]).norm() < 1e-12);
    assert_eq!(h.vertices().len(), 6);
    for (from, to) in h.edges() {
        assert!(((to - from).norm() - 1.5).abs() < 1e-12);
    }
    // Flat top and bottom.
    assert!((h.points[1].y - h.points[0].y).abs() < 1e-12);
    assert!((h.points[4].y - h.points[3].y).abs() < 1e-12);
    let (lo, hi) = h.bounds();
    assert!((hi.x - lo.x - 3.0).abs() < 1e-12);
    assert!((hi.y - lo.y - g.hex_width()).abs() < 1e-12);
    assert!((lo.x - (2.0 - g.dx)).abs() < 1e-12);
}

#[test]
fn generate_propagates_fit_error() {
    let c = HexConstraints::default().with_width(10.0).with_rows(3);
    assert!(generate(&letter(), &c).is_err());
    let out = generate(&letter(), &HexConstraints::default().with_width(2.0)).unwrap();
    assert_eq!(out.polygons.len(), out.anchors.len());
    assert_eq!(out.grid.rows, 13);
}

#[test]
fn generate_randomized_seeded_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let page = PageSpec::new(
            rng.gen_range(5.0..40.0),
            rng.gen_range(5.0..40.0),
            rng.gen_range(0.0..1.5),
        )
        .unwrap();
        let mut c = HexConstraints::default();
        if rng.gen_bool(0.5) {
            c = c.with_rows(rng.gen_range(1..12));
        }
        if rng.gen_bool(0.5) {
            c = c.with_cols(rng.gen_range(1..12));
        }
        let a = generate(&page, &c).unwrap();
        let b = generate(&page, &c).unwrap();
        assert_eq!(a, b);
        if let Some(rows) = c.rows {
            assert_eq!(a.grid.rows, rows);
        }
        if let Some(cols) = c.cols {
            assert_eq!(a.grid.cols, cols);
        }
    }
}

fn page_strategy() -> impl Strategy<Value = PageSpec> {
    (5.0f64..40.0, 5.0f64..40.0, 0.0f64..1.5)
        .prop_filter_map("printable area", |(w, h, m)| PageSpec::new(w, h, m))
}

fn constraints_strategy() -> impl Strategy<Value = HexConstraints> {
    (
        proptest::option::of(0.2f64..6.0),
        proptest::option::of(1usize..20),
        proptest::option::of(1usize..20),
    )
        .prop_map(|(width, rows, cols)| HexConstraints { width, rows, cols })
}

proptest! {
    #[test]
    fn hexagons_stay_inside_printable_area(page in page_strategy(), c in constraints_strategy()) {
        let Ok(out) = generate(&page, &c) else {
            // Only an explicit width with explicit counts may fail.
            prop_assert!(c.width.is_some() && (c.rows.is_some() || c.cols.is_some()));
            return Ok(());
        };
        for h in &out.polygons {
            let (lo, hi) = h.bounds();
            prop_assert!(lo.x >= page.margin - TOL);
            prop_assert!(lo.y >= page.margin - TOL);
            prop_assert!(hi.x <= page.width - page.margin + TOL);
            prop_assert!(hi.y <= page.height - page.margin + TOL);
        }
    }

    #[test]
    fn adjacent_columns_differ_by_half_hexagon(page in page_strategy(), c in constraints_strategy()) {
        if let Ok(g) = resolve(&page, &c) {
            let t = Tiling::new(&page, g);
            for col in 1..g.cols {
                let step = (t.column_base(col) - t.column_base(col - 1)).abs();
                prop_assert!((step - g.dy).abs() < 1e-9 * g.dy.max(1.0));
                prop_assert_ne!(t.is_raised(col), t.is_raised(col - 1));
            }
        }
    }

    #[test]
    fn resolve_is_pure(page in page_strategy(), c in constraints_strategy()) {
        prop_assert_eq!(resolve(&page, &c), resolve(&page, &c));
        if let Ok(g) = resolve(&page, &c) {
            prop_assert_eq!(layout(&page, &g), layout(&page, &g));
        }
    }

    #[test]
    fn width_sets_side_when_feasible(page in page_strategy(), width in 0.2f64..6.0, rows in 1usize..20, cols in 1usize..20) {
        let c = HexConstraints { width: Some(width), rows: Some(rows), cols: Some(cols) };
        if let Ok(g) = resolve(&page, &c) {
            prop_assert_eq!(g.side, width / 2.0 / SIN_60);
            prop_assert_eq!(g.dy, width / 2.0);
            prop_assert_eq!((g.rows, g.cols), (rows, cols));
        }
    }

    #[test]
    fn derived_counts_fit(page in page_strategy(), width in 0.2f64..6.0) {
        let g = resolve(&page, &HexConstraints::default().with_width(width)).unwrap();
        prop_assert!(g.rows as f64 * g.row_pitch() <= page.printable_height() + 1e-9);
        prop_assert!(g.span_width() <= page.printable_width() + 1e-9 || g.cols == 0);
    }
}
