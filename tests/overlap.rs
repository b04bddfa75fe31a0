// End-to-end checks of the overlap engine plus the report sink: build
// records the way the adapters would, run the engine, compare report bytes.

use geo::{line_string, LineString};

use gridcross::{
    compute_overlaps, write_report, Anchor, GeometryRecord, GridKind, REPORT_HEADER,
};

/// Axis-aligned closed square ring with lower-left corner (x, y).
fn square(x: f64, y: f64, size: f64) -> LineString<f64> {
    line_string![
        (x: x, y: y),
        (x: x + size, y: y),
        (x: x + size, y: y + size),
        (x: x, y: y + size),
        (x: x, y: y),
    ]
}

fn report_text(coarse: &[GeometryRecord], fine: &[GeometryRecord], threshold: f64) -> String {
    let overlaps = compute_overlaps(coarse, fine, threshold).unwrap();
    let mut buf = Vec::new();
    write_report(&mut buf, &overlaps).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn contained_tile_produces_the_golden_line() {
    // 1x1 degree coarse swath, fine tile half its side fully inside.
    let coarse = vec![GeometryRecord::coarse(
        "034038",
        GridKind::CoarseDescending,
        vec![line_string![
            (x: -122.0, y: 40.0),
            (x: -121.0, y: 40.0),
            (x: -121.0, y: 41.0),
            (x: -122.0, y: 41.0),
            (x: -122.0, y: 40.0),
        ]],
    )];
    let fine = vec![GeometryRecord::fine(
        "T10SEG",
        vec![square(-121.75, 40.25, 0.5)],
        Some(Anchor::new("-121.5", "40.5")),
    )];

    let text = report_text(&coarse, &fine, 0.1);
    assert_eq!(
        text,
        "PathRow S2TileID S2ULX S2ULY PercentOfS2\n034038 T10SEG -121.5 40.5 100.0\n"
    );
}

#[test]
fn one_percent_corner_overlap_reports_one_point_zero() {
    let coarse = vec![GeometryRecord::coarse(
        "034038",
        GridKind::CoarseDescending,
        vec![square(-122.0, 40.0, 1.0)],
    )];
    // 0.5x0.5 fine tile whose 0.05x0.05 corner pokes into the coarse square:
    // intersection area is exactly 1% of the fine area.
    let fine = vec![GeometryRecord::fine(
        "T10SEG",
        vec![square(-121.05, 40.95, 0.5)],
        Some(Anchor::new("-121.05", "41.45")),
    )];

    let text = report_text(&coarse, &fine, 0.1);
    let line = text.lines().nth(1).unwrap();
    assert!(line.ends_with(" 1.0"), "unexpected line: {line}");
}

#[test]
fn tile_outside_the_swath_emits_no_line() {
    let coarse = vec![GeometryRecord::coarse(
        "034038",
        GridKind::CoarseDescending,
        vec![square(-122.0, 40.0, 1.0)],
    )];
    let fine = vec![GeometryRecord::fine(
        "T99ZZZ",
        vec![square(10.0, 10.0, 0.5)],
        Some(Anchor::new("10.0", "10.5")),
    )];

    assert_eq!(report_text(&coarse, &fine, 0.1), format!("{REPORT_HEADER}\n"));
}

#[test]
fn two_ring_fine_record_emits_only_the_qualifying_ring() {
    let coarse = vec![GeometryRecord::coarse(
        "034038",
        GridKind::CoarseDescending,
        vec![square(0.0, 0.0, 1.0)],
    )];
    // First ring is half-covered, the second is disjoint.
    let fine = vec![GeometryRecord::fine(
        "T10SEG",
        vec![square(0.5, 0.0, 1.0), square(40.0, 40.0, 1.0)],
        Some(Anchor::new("0.5", "1.0")),
    )];

    let text = report_text(&coarse, &fine, 0.1);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with(" 50.0"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let coarse = vec![
        GeometryRecord::coarse("033038", GridKind::CoarseDescending, vec![square(0.0, 0.0, 3.0)]),
        GeometryRecord::coarse("034038", GridKind::CoarseDescending, vec![square(1.0, 0.0, 3.0)]),
    ];
    let fine = vec![
        GeometryRecord::fine("TAAAAA", vec![square(0.5, 0.5, 1.0)], Some(Anchor::new("0.5", "1.5"))),
        GeometryRecord::fine("TBBBBB", vec![square(2.0, 0.5, 1.0)], Some(Anchor::new("2.0", "1.5"))),
    ];

    let first = report_text(&coarse, &fine, 0.1);
    let second = report_text(&coarse, &fine, 0.1);
    assert_eq!(first, second);

    // Coarse records in supplied order, fine records within each.
    let lines: Vec<&str> = first.lines().collect();
    assert!(lines[1].starts_with("033038 TAAAAA"));
    assert!(lines[2].starts_with("033038 TBBBBB"));
    assert!(lines[3].starts_with("034038 TAAAAA"));
    assert!(lines[4].starts_with("034038 TBBBBB"));
}

#[test]
fn degenerate_fine_ring_aborts_without_output() {
    let coarse = vec![GeometryRecord::coarse(
        "034038",
        GridKind::CoarseDescending,
        vec![square(0.0, 0.0, 1.0)],
    )];
    let collapsed = line_string![
        (x: 5.0, y: 5.0),
        (x: 5.0, y: 5.0),
        (x: 5.0, y: 5.0),
        (x: 5.0, y: 5.0),
    ];
    let fine = vec![
        GeometryRecord::fine("TGOOD1", vec![square(0.25, 0.25, 0.5)], Some(Anchor::new("0", "0"))),
        GeometryRecord::fine("TBAD99", vec![collapsed], Some(Anchor::new("5", "5"))),
    ];

    let err = compute_overlaps(&coarse, &fine, 0.1).unwrap_err();
    assert!(err.to_string().contains("TBAD99"));
}

#[test]
fn threshold_equality_is_excluded() {
    let coarse = vec![GeometryRecord::coarse(
        "034038",
        GridKind::CoarseDescending,
        vec![square(0.0, 0.0, 1.0)],
    )];
    // Exactly 25% of the fine tile overlaps the swath.
    let fine = vec![GeometryRecord::fine(
        "T10SEG",
        vec![square(0.5, 0.5, 1.0)],
        Some(Anchor::new("0.5", "1.5")),
    )];

    let at_threshold = compute_overlaps(&coarse, &fine, 25.0).unwrap();
    assert!(at_threshold.is_empty());

    let below_threshold = compute_overlaps(&coarse, &fine, 24.999).unwrap();
    assert_eq!(below_threshold.len(), 1);
}
