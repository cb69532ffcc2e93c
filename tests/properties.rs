use proptest::prelude::*;
use tagmap::{
    ClusterConfig, DataPoint, DistanceMetric, LinearTransform, MonospaceMeasurer, Point,
    TagMapBuilder, TagMapper, VisParams, Viewport,
};

const LABELS: [&str; 4] = ["#a", "#bb", "#ccc", "#dddd"];

fn records() -> impl Strategy<Value = Vec<DataPoint>> {
    prop::collection::vec(
        (0..LABELS.len(), -1.0f64..1.0, -1.0f64..1.0, 0.1f64..10.0),
        1..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(label, x, y, w)| DataPoint::new(LABELS[label], Point::new(x, y), w))
            .collect()
    })
}

fn build_mapper(params: VisParams, data: &[DataPoint]) -> TagMapper {
    let mut mapper = TagMapBuilder::new()
        .vis_params(params)
        .cluster_config(ClusterConfig::default().with_distance_metric(DistanceMetric::Euclidean))
        .build(MonospaceMeasurer::default())
        .unwrap();
    mapper.set_data(data).unwrap();
    mapper
}

/// Keeps the whole [-1, 1] square on screen for scales up to 300.
fn view(scale: f64) -> LinearTransform {
    LinearTransform::centered(Point::new(0.0, 0.0), scale, Viewport::new(800.0, 800.0))
}

proptest! {
    #[test]
    fn prop_placed_tags_never_overlap(data in records(), scale in 5.0f64..300.0) {
        let mapper = build_mapper(VisParams::default().with_weight_threshold(0.0), &data);
        let placed = mapper.layout(&view(scale)).unwrap();
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                prop_assert!(
                    !a.bbox().intersects(&b.bbox()),
                    "{} overlaps {}", a.term, b.term
                );
            }
        }
    }

    #[test]
    fn prop_weight_is_conserved(data in records(), scale in 5.0f64..300.0) {
        let mapper = build_mapper(VisParams::default().with_weight_threshold(0.0), &data);
        let tags = mapper.aggregate_tags(&view(scale)).unwrap();

        for tag in &tags {
            let sum: f64 = tag.members.iter().map(|p| p.weight).sum();
            prop_assert!((tag.weight - sum).abs() < 1e-9);
        }

        let members: usize = tags.iter().map(|t| t.count()).sum();
        prop_assert_eq!(members, data.len());
        let total: f64 = data.iter().map(|d| d.weight).sum();
        let aggregated: f64 = tags.iter().map(|t| t.weight).sum();
        prop_assert!((total - aggregated).abs() < 1e-6);
    }

    #[test]
    fn prop_threshold_filters(data in records(), threshold in 0.0f64..30.0, scale in 5.0f64..300.0) {
        let mapper = build_mapper(VisParams::default().with_weight_threshold(threshold), &data);
        for tag in mapper.tags(&view(scale)).unwrap() {
            prop_assert!(tag.weight >= threshold);
        }
    }

    #[test]
    fn prop_equal_weights_get_midpoint(
        points in prop::collection::vec((0..LABELS.len(), -1.0f64..1.0, -1.0f64..1.0), 1..40),
        weight in 1.0f64..10.0,
        scale in 5.0f64..300.0,
    ) {
        let data: Vec<DataPoint> = points
            .into_iter()
            .map(|(label, x, y)| DataPoint::new(LABELS[label], Point::new(x, y), weight))
            .collect();
        // Zoomed in far enough that nothing merges, so every tag weighs the same.
        let mapper = build_mapper(VisParams::default().with_max_dist(0.0), &data);
        for tag in mapper.sized_tags(&view(scale)).unwrap() {
            prop_assert_eq!(tag.font_size, 23.0);
        }
    }

    #[test]
    fn prop_layout_is_deterministic(data in records(), scale in 5.0f64..300.0) {
        let mapper = build_mapper(VisParams::default(), &data);
        let first = mapper.tags(&view(scale)).unwrap();
        let second = mapper.tags(&view(scale)).unwrap();
        prop_assert_eq!(first, second);

        let rebuilt = build_mapper(VisParams::default(), &data);
        prop_assert_eq!(mapper.tags(&view(scale)).unwrap(), rebuilt.tags(&view(scale)).unwrap());
    }

    #[test]
    fn prop_zooming_in_never_loses_leaves(data in records(), scale in 5.0f64..150.0, factor in 1.0f64..2.0) {
        let mapper = build_mapper(VisParams::default(), &data);
        let coarse = mapper.extract_clusters(&view(scale)).unwrap();
        let fine = mapper.extract_clusters(&view(scale * factor)).unwrap();

        for (c, f) in coarse.iter().zip(fine.iter()) {
            prop_assert_eq!(c.label, f.label);
            let leaves = |s: &tagmap::SelectedClusters<'_>| {
                s.nodes.iter().filter(|&&id| s.tree.node(id).is_leaf()).count()
            };
            prop_assert!(leaves(f) >= leaves(c));
        }
    }
}
