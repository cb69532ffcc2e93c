//! Tag map pipeline facade.
//!
//! [`TagMapper`] owns the per-dataset cluster trees and the visualization
//! parameters. Loading data is a full rebuild; every view call afterwards is
//! a view-only recompute that reuses the cached trees.

use crate::compute::aggregate::{Tag, aggregate_tags};
use crate::compute::cluster::{
    ClusterStrategy, Hierarchy, LabelGroups, SelectedClusters, SingleLinkage, extract_clusters,
    group_by_label, try_group_by_label,
};
use crate::compute::color::ColorMapper;
use crate::compute::layout::{order_tags, place_tags, size_tags};
use crate::compute::scale::FontScale;
use crate::config::VisParams;
use crate::error::{Result, TagMapError};
use crate::measure::{MonospaceMeasurer, TextMeasurer};
use crate::view::ViewTransform;
use geo::Point;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tagmap_types::point::DataPoint;

/// A placed tag, ready for a generic label renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTag {
    pub term: String,
    /// Placed center, unprojected back to geographic coordinates
    pub position: Point,
    /// Pixel height of the tag's box
    pub size: f64,
    pub font_size: f64,
    pub weight: f64,
    /// Straight-alpha RGBA
    pub color: [u8; 4],
}

/// Occlusion-free tag map over weighted, labelled points.
///
/// # Examples
///
/// ```rust
/// use tagmap::{DataPoint, LinearTransform, Point, TagMapper, Viewport};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut mapper = TagMapper::with_default_measurer()?;
/// mapper.set_data(&[
///     DataPoint::new("#coffee", Point::new(0.0, 0.0), 3.0),
///     DataPoint::new("#coffee", Point::new(0.1, 0.0), 2.0),
///     DataPoint::new("#tea", Point::new(5.0, 5.0), 1.0),
/// ])?;
///
/// let view = LinearTransform::centered(Point::new(2.5, 2.5), 40.0, Viewport::new(800.0, 600.0));
/// let tags = mapper.tags(&view)?;
/// assert_eq!(tags[0].term, "#coffee");
/// assert_eq!(tags[0].weight, 5.0);
/// # Ok(())
/// # }
/// ```
pub struct TagMapper<M = MonospaceMeasurer> {
    measurer: M,
    params: VisParams,
    colors: ColorMapper,
    strategy: Box<dyn ClusterStrategy + Send + Sync>,
    hierarchy: Option<Arc<Hierarchy>>,
}

impl TagMapper<MonospaceMeasurer> {
    /// Mapper measuring text with [`MonospaceMeasurer::default`].
    pub fn with_default_measurer() -> Result<Self> {
        Self::new(MonospaceMeasurer::default())
    }
}

impl<M: TextMeasurer> TagMapper<M> {
    /// Mapper with default parameters and single-linkage clustering.
    pub fn new(measurer: M) -> Result<Self> {
        Self::with_parts(
            measurer,
            VisParams::default(),
            Box::new(SingleLinkage::default()),
        )
    }

    pub(crate) fn with_parts(
        measurer: M,
        params: VisParams,
        strategy: Box<dyn ClusterStrategy + Send + Sync>,
    ) -> Result<Self> {
        let colors = ColorMapper::new(&params)?;
        Ok(Self {
            measurer,
            params,
            colors,
            strategy,
            hierarchy: None,
        })
    }

    /// Replace the visualization parameters. Validated before anything changes.
    pub fn set_vis_params(&mut self, params: VisParams) -> Result<()> {
        self.colors = ColorMapper::new(&params)?;
        self.params = params;
        Ok(())
    }

    pub fn vis_params(&self) -> &VisParams {
        &self.params
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Load [`DataPoint`] records. See [`TagMapper::set_data_with`].
    pub fn set_data(&mut self, data: &[DataPoint]) -> Result<()> {
        self.set_data_with(data, |r| r.label.as_str(), |r| r.position, |r| r.weight)
    }

    /// Load records of any shape through accessor functions, rebuilding every
    /// cluster tree.
    ///
    /// Records with an empty label, non-finite coordinates, or a negative or
    /// non-finite weight are skipped with a warning. An empty dataset is
    /// valid and yields no tags.
    pub fn set_data_with<T, L, P, W>(
        &mut self,
        data: &[T],
        get_label: L,
        get_position: P,
        get_weight: W,
    ) -> Result<()>
    where
        L: for<'r> Fn(&'r T) -> &'r str,
        P: Fn(&T) -> Point,
        W: Fn(&T) -> f64,
    {
        let start = Instant::now();
        let groups = group_by_label(data, get_label, get_position, get_weight);
        self.rebuild(groups, start)
    }

    /// Load [`DataPoint`] records, rejecting the whole dataset if any record
    /// is malformed. See [`TagMapper::set_data_with_strict`].
    pub fn set_data_strict(&mut self, data: &[DataPoint]) -> Result<()> {
        self.set_data_with_strict(data, |r| r.label.as_str(), |r| r.position, |r| r.weight)
    }

    /// Strict form of [`TagMapper::set_data_with`].
    ///
    /// # Errors
    ///
    /// [`TagMapError::InvalidInput`] for the first record with an empty label,
    /// non-finite coordinates, or a negative or non-finite weight. The
    /// previously loaded dataset, if any, stays in place.
    pub fn set_data_with_strict<T, L, P, W>(
        &mut self,
        data: &[T],
        get_label: L,
        get_position: P,
        get_weight: W,
    ) -> Result<()>
    where
        L: for<'r> Fn(&'r T) -> &'r str,
        P: Fn(&T) -> Point,
        W: Fn(&T) -> f64,
    {
        let start = Instant::now();
        let groups = try_group_by_label(data, get_label, get_position, get_weight)?;
        self.rebuild(groups, start)
    }

    fn rebuild(&mut self, groups: LabelGroups, start: Instant) -> Result<()> {
        let hierarchy = Hierarchy::build(groups, self.strategy.as_ref())?;

        log::debug!(
            "Built {} cluster trees over {} points in {:?}",
            hierarchy.len(),
            hierarchy.point_count(),
            start.elapsed()
        );

        self.hierarchy = Some(Arc::new(hierarchy));
        Ok(())
    }

    /// Drop the loaded dataset.
    pub fn clear(&mut self) {
        self.hierarchy = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.hierarchy.is_some()
    }

    /// Cached cluster trees, shareable across threads for read-only use.
    pub fn hierarchy(&self) -> Option<Arc<Hierarchy>> {
        self.hierarchy.clone()
    }

    /// Number of distinct labels loaded; zero before any data.
    pub fn label_count(&self) -> usize {
        self.hierarchy.as_ref().map_or(0, |h| h.len())
    }

    /// Number of points kept after validation; zero before any data.
    pub fn point_count(&self) -> usize {
        self.hierarchy.as_ref().map_or(0, |h| h.point_count())
    }

    fn loaded(&self) -> Result<&Hierarchy> {
        self.hierarchy.as_deref().ok_or_else(|| {
            TagMapError::NotInitialized("no dataset loaded; call set_data first".into())
        })
    }

    /// Nodes selected at `view`, per label.
    pub fn extract_clusters<V: ViewTransform + ?Sized>(
        &self,
        view: &V,
    ) -> Result<Vec<SelectedClusters<'_>>> {
        let hierarchy = self.loaded()?;
        let start = Instant::now();
        let selected = extract_clusters(hierarchy, view, self.params.max_dist);

        log::debug!(
            "Extracted {} clusters across {} labels in {:?}",
            selected.iter().map(|s| s.nodes.len()).sum::<usize>(),
            selected.len(),
            start.elapsed()
        );
        Ok(selected)
    }

    /// Tags for every selected cluster that meets the weight threshold,
    /// unsized and unordered.
    pub fn aggregate_tags<V: ViewTransform + ?Sized>(&self, view: &V) -> Result<Vec<Tag>> {
        let selected = self.extract_clusters(view)?;
        Ok(aggregate_tags(&selected, view, self.params.weight_threshold))
    }

    /// Every tag ordered by priority and sized, without collision handling.
    pub fn sized_tags<V: ViewTransform + ?Sized>(&self, view: &V) -> Result<Vec<Tag>> {
        let mut tags = self.aggregate_tags(view)?;
        order_tags(&mut tags);
        let scale = FontScale::from_tags(
            &tags,
            self.params.min_font_size,
            self.params.max_font_size,
        );
        size_tags(&mut tags, &scale, &self.measurer);
        Ok(tags)
    }

    /// Placed tags in placement order, centers in pixels.
    pub fn layout<V: ViewTransform + ?Sized>(&self, view: &V) -> Result<Vec<Tag>> {
        let tags = self.sized_tags(view)?;
        let candidates = tags.len();
        let start = Instant::now();
        let placed = place_tags(tags, self.params.overflow);

        log::debug!(
            "Placed {} of {} tags in {:?}",
            placed.len(),
            candidates,
            start.elapsed()
        );
        Ok(placed)
    }

    /// Run the view-only pipeline and shape the result for rendering.
    ///
    /// # Errors
    ///
    /// [`TagMapError::NotInitialized`] when no dataset has been loaded.
    pub fn tags<V: ViewTransform + ?Sized>(&self, view: &V) -> Result<Vec<RenderedTag>> {
        let placed = self.layout(view)?;
        Ok(placed
            .into_iter()
            .map(|tag| self.render(tag, view))
            .collect())
    }

    fn render<V: ViewTransform + ?Sized>(&self, tag: Tag, view: &V) -> RenderedTag {
        RenderedTag {
            position: view.unproject(tag.center),
            size: tag.height,
            font_size: tag.font_size,
            weight: tag.weight,
            color: self.colors.color_for(tag.font_size),
            term: tag.term,
        }
    }
}

impl<M> std::fmt::Debug for TagMapper<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagMapper")
            .field("params", &self.params)
            .field("labels", &self.hierarchy.as_ref().map(|h| h.len()))
            .field("points", &self.hierarchy.as_ref().map(|h| h.point_count()))
            .finish()
    }
}
