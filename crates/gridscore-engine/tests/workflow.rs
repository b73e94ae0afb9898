//! End-to-end workflow runs against small synthetic study areas.

use gridscore_core::{ReducePolicy, Score, ScoreBand, ScoreTable};
use gridscore_engine::{LayerConfig, Workflow, WorkflowConfig, WorkflowError};
use gridscore_geom::GeometryKind;
use gridscore_test_utils::{
    line_feature, point_feature, square_boundary, square_feature, two_island_boundary,
    with_attribute, TEST_CRS,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const NODATA: u16 = 65_535;

fn config(work_dir: &Path) -> WorkflowConfig {
    WorkflowConfig {
        target_crs: TEST_CRS,
        h_spacing: 10.0,
        v_spacing: 10.0,
        pixel_size: 10.0,
        nodata: NODATA,
        work_dir: work_dir.to_path_buf(),
        stem: "study".to_string(),
    }
}

fn point_count_layer(name: &str) -> LayerConfig {
    LayerConfig {
        name: name.to_string(),
        geometry: GeometryKind::Point,
        policy: ReducePolicy::Count,
        table: ScoreTable::feature_count(),
    }
}

#[test]
fn count_layer_end_to_end() {
    let dir = tempdir().unwrap();
    let workflow = Workflow::new(config(dir.path())).unwrap();
    let boundary = square_boundary(50.0);

    // One point each in four distinct cells, two points sharing a fifth.
    let features = vec![
        point_feature(5.0, 5.0),
        point_feature(15.0, 15.0),
        point_feature(25.0, 25.0),
        point_feature(35.0, 35.0),
        point_feature(44.0, 44.0),
        point_feature(46.0, 46.0),
    ];
    let layers = vec![(point_count_layer("wells"), features)];

    let output = workflow.run(&boundary, &layers).unwrap();
    assert_eq!(output.cell_count, 25);
    assert!(output.grid_path.exists());

    let wells = &output.layers["wells"];
    assert!(wells.grid_path.exists());
    assert!(wells.raster_path.exists());

    // Single occupancy scores 3, double occupancy 5, empty cells 0.
    assert_eq!(wells.surface.value_at(5.0, 5.0), Some(3));
    assert_eq!(wells.surface.value_at(35.0, 35.0), Some(3));
    assert_eq!(wells.surface.value_at(45.0, 45.0), Some(5));
    assert_eq!(wells.surface.value_at(5.0, 45.0), Some(0));

    let scored = wells
        .grid
        .cells()
        .iter()
        .filter(|c| c.score == Some(Score(3)))
        .count();
    assert_eq!(scored, 4);
}

#[test]
fn line_layer_spans_two_islands() {
    let dir = tempdir().unwrap();
    let workflow = Workflow::new(config(dir.path())).unwrap();
    // Two 30 m islands separated by a 10 m channel: 9 cells each.
    let boundary = two_island_boundary(30.0, 10.0);

    let table = ScoreTable::new(vec![ScoreBand::above(50.0, Score(5))], Score(0));
    let layer = LayerConfig {
        name: "pipelines".to_string(),
        geometry: GeometryKind::Line,
        policy: ReducePolicy::MaxLength,
        table,
    };
    // A 60 m line through the bottom row of both islands.
    let features = vec![line_feature(&[(5.0, 5.0), (65.0, 5.0)])];

    let output = workflow.run(&boundary, &[(layer, features)]).unwrap();
    assert_eq!(output.cell_count, 18);

    let pipelines = &output.layers["pipelines"];
    let crossed = pipelines
        .grid
        .cells()
        .iter()
        .filter(|c| c.score == Some(Score(5)))
        .count();
    assert_eq!(crossed, 6);

    // The raster spans the channel too; uncelled pixels hold NoData.
    assert_eq!(pipelines.surface.value_at(5.0, 5.0), Some(5));
    assert_eq!(pipelines.surface.value_at(35.0, 5.0), Some(NODATA));
    assert_eq!(pipelines.surface.value_at(5.0, 25.0), Some(0));
}

#[test]
fn max_score_layer_keeps_highest_attribute() {
    let dir = tempdir().unwrap();
    let workflow = Workflow::new(config(dir.path())).unwrap();
    let boundary = square_boundary(50.0);

    let table = ScoreTable::new(
        vec![
            ScoreBand::between(3.0, 5.0, Score(4)),
            ScoreBand::between(1.0, 3.0, Score(2)),
        ],
        Score(0),
    );
    let layer = LayerConfig {
        name: "hazards".to_string(),
        geometry: GeometryKind::Point,
        policy: ReducePolicy::MaxScore {
            attribute: "severity".to_string(),
        },
        table,
    };
    // Two points share a cell; the higher severity wins it.
    let features = vec![
        with_attribute(point_feature(5.0, 5.0), "severity", 2.0),
        with_attribute(point_feature(7.0, 7.0), "severity", 4.0),
        with_attribute(point_feature(25.0, 25.0), "severity", 2.0),
    ];

    let output = workflow.run(&boundary, &[(layer, features)]).unwrap();
    let hazards = &output.layers["hazards"];
    assert_eq!(hazards.surface.value_at(5.0, 5.0), Some(4));
    assert_eq!(hazards.surface.value_at(25.0, 25.0), Some(2));
    assert_eq!(hazards.surface.value_at(45.0, 45.0), Some(0));
}

#[test]
fn scored_grid_geojson_carries_scores() {
    let dir = tempdir().unwrap();
    let workflow = Workflow::new(config(dir.path())).unwrap();
    let boundary = square_boundary(50.0);
    let layers = vec![(point_count_layer("wells"), vec![point_feature(5.0, 5.0)])];

    let output = workflow.run(&boundary, &layers).unwrap();
    let text = fs::read_to_string(&output.layers["wells"].grid_path).unwrap();
    let gj: serde_json::Value = serde_json::from_str(&text).unwrap();

    let features = gj["features"].as_array().unwrap();
    assert_eq!(features.len(), 25);
    let scores: Vec<u64> = features
        .iter()
        .map(|f| f["properties"]["score"].as_u64().unwrap())
        .collect();
    assert_eq!(scores.iter().filter(|&&s| s == 3).count(), 1);
    assert_eq!(scores.iter().filter(|&&s| s == 0).count(), 24);
}

#[test]
fn rerun_reuses_cached_grid() {
    let dir = tempdir().unwrap();
    let boundary = square_boundary(50.0);
    let layers = vec![(point_count_layer("wells"), vec![point_feature(5.0, 5.0)])];

    let first = Workflow::new(config(dir.path())).unwrap();
    let out1 = first.run(&boundary, &layers).unwrap();
    let grid_bytes = fs::read(&out1.grid_path).unwrap();

    let second = Workflow::new(config(dir.path())).unwrap();
    let out2 = second.run(&boundary, &layers).unwrap();

    assert_eq!(out1.cell_count, out2.cell_count);
    assert_eq!(fs::read(&out2.grid_path).unwrap(), grid_bytes);
    assert_eq!(
        out1.layers["wells"].surface.data(),
        out2.layers["wells"].surface.data()
    );
}

#[test]
fn cancelled_run_leaves_no_layer_outputs() {
    let dir = tempdir().unwrap();
    let workflow = Workflow::new(config(dir.path())).unwrap();
    workflow.cancel_token().cancel();

    let boundary = square_boundary(50.0);
    let layers = vec![(point_count_layer("wells"), vec![point_feature(5.0, 5.0)])];
    let err = workflow.run(&boundary, &layers).unwrap_err();
    assert!(matches!(err, WorkflowError::Cancelled));

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert!(entries.is_empty());
}

#[test]
fn mismatched_geometry_kind_is_ignored() {
    let dir = tempdir().unwrap();
    let workflow = Workflow::new(config(dir.path())).unwrap();
    let boundary = square_boundary(50.0);

    // A polygon feature in a point layer never reaches the reducer.
    let layers = vec![(
        point_count_layer("wells"),
        vec![square_feature(2.0, 2.0, 6.0)],
    )];
    let output = workflow.run(&boundary, &layers).unwrap();
    assert!(output.layers["wells"]
        .grid
        .cells()
        .iter()
        .all(|c| c.score == Some(Score(0))));
}

#[test]
fn invalid_layer_rejected_before_any_work() {
    let dir = tempdir().unwrap();
    let workflow = Workflow::new(config(dir.path())).unwrap();
    let boundary = square_boundary(50.0);

    let bad = LayerConfig {
        name: String::new(),
        geometry: GeometryKind::Point,
        policy: ReducePolicy::Count,
        table: ScoreTable::feature_count(),
    };
    let err = workflow.run(&boundary, &[(bad, vec![])]).unwrap_err();
    assert!(matches!(err, WorkflowError::Config(_)));

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert!(entries.is_empty());
}
