use tagmap::{
    DataPoint, LinearTransform, MonospaceMeasurer, OverflowPolicy, Point, TagMapBuilder,
    TagMapError, TagMapper, VisParams, Viewport,
};

fn view() -> LinearTransform {
    LinearTransform::centered(Point::new(0.0, 0.0), 20.0, Viewport::new(800.0, 600.0))
}

/// Test 1: Calling the pipeline before loading data
#[test]
fn test_uninitialized_mapper_fails_fast() {
    let mapper = TagMapper::with_default_measurer().unwrap();
    for result in [
        mapper.tags(&view()).map(|t| t.len()),
        mapper.layout(&view()).map(|t| t.len()),
        mapper.sized_tags(&view()).map(|t| t.len()),
        mapper.aggregate_tags(&view()).map(|t| t.len()),
    ] {
        assert!(matches!(result, Err(TagMapError::NotInitialized(_))));
    }
}

/// Test 2: Empty dataset is not an error
#[test]
fn test_empty_dataset() {
    let mut mapper = TagMapper::with_default_measurer().unwrap();
    mapper.set_data(&[]).unwrap();
    assert_eq!(mapper.label_count(), 0);
    assert!(mapper.extract_clusters(&view()).unwrap().is_empty());
    assert!(mapper.sized_tags(&view()).unwrap().is_empty());
    assert!(mapper.tags(&view()).unwrap().is_empty());
}

/// Test 3: Single-point label groups
#[test]
fn test_single_point_groups() {
    let mut mapper = TagMapper::with_default_measurer().unwrap();
    mapper
        .set_data(&[
            DataPoint::new("#one", Point::new(0.0, 0.0), 2.0),
            DataPoint::new("#two", Point::new(10.0, 10.0), 2.0),
        ])
        .unwrap();

    let hierarchy = mapper.hierarchy().unwrap();
    for (_, tree) in hierarchy.iter() {
        assert_eq!(tree.node_count(), 1);
        assert!(tree.node(tree.root()).is_leaf());
    }

    let tags = mapper.tags(&view()).unwrap();
    assert_eq!(tags.len(), 2);
    // equal weights: degenerate midpoint font
    assert!(tags.iter().all(|t| t.font_size == 23.0));
}

/// Test 4: Points outside the viewport never produce tags
#[test]
fn test_offscreen_points() {
    let mut mapper = TagMapper::with_default_measurer().unwrap();
    mapper
        .set_data(&[
            DataPoint::new("#far", Point::new(170.0, 80.0), 9.0),
            DataPoint::new("#near", Point::new(1.0, 1.0), 1.0),
        ])
        .unwrap();

    let tags = mapper.tags(&view()).unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].term, "#near");
}

/// Test 5: Threshold excludes light tags entirely
#[test]
fn test_threshold_filtering() {
    let mut mapper = TagMapBuilder::new()
        .vis_params(VisParams::default().with_weight_threshold(5.0))
        .build(MonospaceMeasurer::default())
        .unwrap();
    mapper
        .set_data(&[
            DataPoint::new("#kept", Point::new(0.0, 0.0), 5.0),
            DataPoint::new("#gone", Point::new(5.0, 5.0), 4.999),
        ])
        .unwrap();

    let tags = mapper.tags(&view()).unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].term, "#kept");
}

/// Test 6: Invalid records are skipped, not fatal
#[test]
fn test_invalid_records_skipped() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut mapper = TagMapper::with_default_measurer().unwrap();
    mapper
        .set_data(&[
            DataPoint::new("#ok", Point::new(0.0, 0.0), 1.0),
            DataPoint::new("#nan", Point::new(f64::NAN, 0.0), 1.0),
            DataPoint::new("#inf", Point::new(0.0, 0.0), f64::INFINITY),
            DataPoint::new("#neg", Point::new(0.0, 0.0), -2.0),
            DataPoint::new("", Point::new(0.0, 0.0), 1.0),
        ])
        .unwrap();
    assert_eq!(mapper.label_count(), 1);
    assert_eq!(mapper.point_count(), 1);
}

/// Test 7: Zero weights with a zero threshold
#[test]
fn test_zero_weights() {
    let mut mapper = TagMapBuilder::new()
        .vis_params(VisParams::default().with_weight_threshold(0.0))
        .build(MonospaceMeasurer::default())
        .unwrap();
    mapper
        .set_data(&[
            DataPoint::new("#zero", Point::new(-5.0, 0.0), 0.0),
            DataPoint::new("#some", Point::new(5.0, 0.0), 4.0),
        ])
        .unwrap();

    let tags = mapper.tags(&view()).unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].term, "#some");
    assert_eq!(tags[0].font_size, 32.0);
    assert_eq!(tags[1].font_size, 14.0);
}

/// Test 8: Rejected configuration leaves the mapper usable
#[test]
fn test_rejected_configuration() {
    let mut mapper = TagMapper::with_default_measurer().unwrap();
    let cases = [
        VisParams::default().with_font_range(20.0, 10.0),
        VisParams::default().with_font_range(0.0, 10.0),
        VisParams::default().with_color_scheme(Vec::<String>::new()),
        VisParams::default().with_color_scheme(["#1d91c0", "not-a-color"]),
        VisParams::default().with_max_dist(-1.0),
        VisParams::default().with_weight_threshold(f64::NAN),
    ];
    for params in cases {
        assert!(matches!(
            mapper.set_vis_params(params),
            Err(TagMapError::InvalidConfig(_))
        ));
    }
    assert_eq!(mapper.vis_params(), &VisParams::default());
}

/// Test 9: Unicode terms are measured and ordered by characters
#[test]
fn test_unicode_terms() {
    let mut mapper = TagMapper::with_default_measurer().unwrap();
    mapper
        .set_data(&[
            DataPoint::new("東京タワー", Point::new(-8.0, 0.0), 3.0),
            DataPoint::new("#abcdef", Point::new(8.0, 0.0), 3.0),
        ])
        .unwrap();
    let tags = mapper.sized_tags(&view()).unwrap();
    assert_eq!(tags[0].term, "東京タワー");
    assert_eq!(tags[0].width, 5.0 * 23.0 * 0.6);
}

/// Test 10: Force placement still keeps every tag inside the output
#[test]
fn test_force_place_duplicates() {
    let mut mapper = TagMapBuilder::new()
        .vis_params(VisParams::default().with_overflow(OverflowPolicy::ForcePlace))
        .build(MonospaceMeasurer::default())
        .unwrap();
    let data: Vec<DataPoint> = (0..5)
        .map(|i| DataPoint::new(format!("#dup{i}"), Point::new(0.0, 0.0), 2.0))
        .collect();
    mapper.set_data(&data).unwrap();

    let tags = mapper.tags(&view()).unwrap();
    assert_eq!(tags.len(), 5);
}

/// Test 11: Strict loading rejects the dataset instead of skipping records
#[test]
fn test_strict_loading_rejects_malformed_records() {
    struct Row {
        tag: &'static str,
        lon: f64,
        lat: f64,
    }
    let rows = [
        Row { tag: "#ok", lon: 0.0, lat: 0.0 },
        Row { tag: "", lon: 1.0, lat: 1.0 },
    ];

    let mut mapper = TagMapper::with_default_measurer().unwrap();
    let result = mapper.set_data_with_strict(&rows, |r| r.tag, |r| Point::new(r.lon, r.lat), |_| 1.0);
    assert!(matches!(result, Err(TagMapError::InvalidInput(_))));
    assert!(!mapper.is_initialized());

    mapper
        .set_data_with_strict(&rows[..1], |r| r.tag, |r| Point::new(r.lon, r.lat), |_| 1.0)
        .unwrap();
    assert_eq!(mapper.point_count(), 1);
}

/// Test 12: Weights whose sum overflows never reach sizing or placement
#[test]
fn test_overflowing_weight_sum_is_rejected() {
    let mut mapper = TagMapper::with_default_measurer().unwrap();
    mapper
        .set_data(&[
            DataPoint::new("#huge", Point::new(0.0, 0.0), 1e308),
            DataPoint::new("#huge", Point::new(0.0, 0.0), 1e308),
            DataPoint::new("#fine", Point::new(5.0, 5.0), 2.0),
        ])
        .unwrap();

    let tags = mapper.tags(&view()).unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].term, "#fine");
    assert!(tags[0].font_size.is_finite());
    assert!(tags[0].size.is_finite());
}
