use tracing::debug;

use crate::core::{Annotation, AnnotationTick, RenderContext, Sample, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::PlacedAnnotation;
use crate::render::{RasterSurface, VectorSurface};
use crate::runtime::{AnimationDriver, FrameScheduler, ResizeDebouncer};

use super::{AxisLayout, ChartConfig};

/// Animated single-series line chart.
///
/// The chart owns its two drawing layers and the host's frame scheduler.
/// Every setter re-runs a render pass; with animation enabled the pass
/// requests frames that the host feeds back through [`LineChart::on_frame`].
/// Dropping the chart (or calling [`LineChart::detach`]) cancels any
/// outstanding frame request.
#[derive(Debug)]
pub struct LineChart<V: VectorSurface, R: RasterSurface, F: FrameScheduler> {
    pub(super) vector: V,
    pub(super) raster: R,
    pub(super) scheduler: F,
    pub(super) config: ChartConfig,
    pub(super) viewport: Viewport,
    pub(super) data: Vec<Sample>,
    pub(super) simplified: Vec<Sample>,
    pub(super) annotations: Vec<Annotation>,
    pub(super) annotation_ticks: Vec<AnnotationTick>,
    pub(super) animation: AnimationDriver,
    pub(super) debouncer: ResizeDebouncer,
    pub(super) layout: Option<AxisLayout>,
    pub(super) markers: Vec<PlacedAnnotation>,
    pub(super) attached: bool,
}

impl<V: VectorSurface, R: RasterSurface, F: FrameScheduler> LineChart<V, R, F> {
    pub fn new(
        vector: V,
        raster: R,
        scheduler: F,
        viewport: Viewport,
        config: ChartConfig,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        config.validate()?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "create line chart"
        );

        let debouncer = ResizeDebouncer::new(config.resize_debounce_ms);
        Ok(Self {
            vector,
            raster,
            scheduler,
            config,
            viewport,
            data: Vec::new(),
            simplified: Vec::new(),
            annotations: Vec::new(),
            annotation_ticks: Vec::new(),
            animation: AnimationDriver::new(),
            debouncer,
            layout: None,
            markers: Vec::new(),
            attached: true,
        })
    }

    /// Releases the pending frame and any pending resize. Later frames are
    /// ignored until the next setter or resize re-attaches the chart.
    pub fn detach(&mut self) {
        self.animation.cancel(&mut self.scheduler);
        self.debouncer.cancel();
        self.attached = false;
        debug!("detach line chart");
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn data(&self) -> &[Sample] {
        &self.data
    }

    /// Points actually drawn at progress 1.
    #[must_use]
    pub fn simplified(&self) -> &[Sample] {
        &self.simplified
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn annotation_ticks(&self) -> &[AnnotationTick] {
        &self.annotation_ticks
    }

    #[must_use]
    pub fn enable_animation(&self) -> bool {
        self.config.enable_animation
    }

    #[must_use]
    pub fn animation_duration_ms(&self) -> f64 {
        self.config.animation_duration_ms
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.animation.progress()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// Layout of the last completed pass.
    #[must_use]
    pub fn axis_layout(&self) -> Option<&AxisLayout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn render_context(&self) -> Option<&RenderContext> {
        self.layout.as_ref().map(|layout| &layout.context)
    }

    /// Overlays placed when the last animation finished.
    #[must_use]
    pub fn markers(&self) -> &[PlacedAnnotation] {
        &self.markers
    }

    #[must_use]
    pub fn vector_surface(&self) -> &V {
        &self.vector
    }

    pub fn vector_surface_mut(&mut self) -> &mut V {
        &mut self.vector
    }

    #[must_use]
    pub fn raster_surface(&self) -> &R {
        &self.raster
    }

    pub fn raster_surface_mut(&mut self) -> &mut R {
        &mut self.raster
    }

    #[must_use]
    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl<V: VectorSurface, R: RasterSurface, F: FrameScheduler> Drop for LineChart<V, R, F> {
    fn drop(&mut self) {
        self.animation.cancel(&mut self.scheduler);
    }
}
