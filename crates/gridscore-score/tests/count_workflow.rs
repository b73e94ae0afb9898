//! End-to-end reduce + classify runs for the published workflows.

use geo::{coord, point, polygon, Geometry, Rect};
use gridscore_core::{CancelToken, ReducePolicy, Score, ScoreTable};
use gridscore_geom::{Crs, Feature};
use gridscore_grid::CellArena;
use gridscore_score::{classify, reduce, CellIndex};

/// 2x2 grid of unit-square cells over [0,2]x[0,2].
fn unit_grid() -> CellArena {
    let mut a = CellArena::new(1.0, 1.0, Crs::Epsg(3857));
    for y in 0..2 {
        for x in 0..2 {
            a.push_cell(Rect::new(
                coord! { x: f64::from(x), y: f64::from(y) },
                coord! { x: f64::from(x + 1), y: f64::from(y + 1) },
            ));
        }
    }
    a
}

fn score_layer(arena: &mut CellArena, features: &[Feature], policy: ReducePolicy, table: &ScoreTable) {
    let index = CellIndex::build(arena);
    reduce(arena, &index, features, &policy, &CancelToken::new()).unwrap();
    classify(arena, table);
}

#[test]
fn one_point_per_cell_scores_three() {
    let mut arena = unit_grid();
    let features: Vec<Feature> = [(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]
        .iter()
        .map(|&(x, y)| Feature::bare(Geometry::Point(point!(x: x, y: y))))
        .collect();
    score_layer(
        &mut arena,
        &features,
        ReducePolicy::Count,
        &ScoreTable::feature_count(),
    );
    for cell in arena.cells() {
        assert_eq!(cell.statistic, 1.0);
        assert_eq!(cell.score, Some(Score(3)));
    }
}

#[test]
fn multiplicity_scores_five_and_absence_scores_zero() {
    let mut arena = unit_grid();
    let features = vec![
        Feature::bare(Geometry::Point(point!(x: 0.3, y: 0.3))),
        Feature::bare(Geometry::Point(point!(x: 0.6, y: 0.6))),
    ];
    score_layer(
        &mut arena,
        &features,
        ReducePolicy::Count,
        &ScoreTable::feature_count(),
    );
    assert_eq!(arena.cells()[0].statistic, 2.0);
    assert_eq!(arena.cells()[0].score, Some(Score(5)));
    // The other three cells saw no features.
    for cell in &arena.cells()[1..] {
        assert_eq!(cell.statistic, 0.0);
        assert_eq!(cell.score, Some(Score(0)));
    }
}

#[test]
fn block_perimeter_boundary_cases() {
    // A square with side s has perimeter 4s; pick sides that land the
    // published cutoffs exactly. The grid cell is large enough that the
    // blocks sit inside the first cell.
    let mut arena = CellArena::new(1000.0, 1000.0, Crs::Epsg(3857));
    arena.push_cell(Rect::new(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 1000.0, y: 1000.0 },
    ));
    arena.push_cell(Rect::new(
        coord! { x: 1000.0, y: 0.0 },
        coord! { x: 2000.0, y: 1000.0 },
    ));

    // Perimeter exactly 750 (side 187.5) in cell 0; cell 1 left empty.
    let block = Feature::bare(Geometry::Polygon(polygon![
        (x: 10.0, y: 10.0),
        (x: 197.5, y: 10.0),
        (x: 197.5, y: 197.5),
        (x: 10.0, y: 197.5),
        (x: 10.0, y: 10.0),
    ]));
    score_layer(
        &mut arena,
        &[block],
        ReducePolicy::MaxPerimeter,
        &ScoreTable::block_perimeter(),
    );
    assert_eq!(arena.cells()[0].statistic, 750.0);
    assert_eq!(arena.cells()[0].score, Some(Score(3)));
    assert_eq!(arena.cells()[1].score, Some(Score(0)));
}

#[test]
fn perimeter_751_drops_to_two() {
    let mut arena = CellArena::new(1000.0, 1000.0, Crs::Epsg(3857));
    arena.push_cell(Rect::new(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 1000.0, y: 1000.0 },
    ));
    // Side 187.75 -> perimeter 751.
    let block = Feature::bare(Geometry::Polygon(polygon![
        (x: 10.0, y: 10.0),
        (x: 197.75, y: 10.0),
        (x: 197.75, y: 197.75),
        (x: 10.0, y: 197.75),
        (x: 10.0, y: 10.0),
    ]));
    score_layer(
        &mut arena,
        &[block],
        ReducePolicy::MaxPerimeter,
        &ScoreTable::block_perimeter(),
    );
    assert_eq!(arena.cells()[0].statistic, 751.0);
    assert_eq!(arena.cells()[0].score, Some(Score(2)));
}
