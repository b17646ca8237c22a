//! Explicit plot state and per-redraw frames.
//!
//! Everything a redraw depends on (selected channel pair, axis-limit mode,
//! dye-line toggle, current viewport) lives in [`PlotState`] and is passed in,
//! so a frame can be computed without a live UI.

use tracing::debug;

use crate::channel::ChannelPair;
use crate::config::PlotConfig;
use crate::dataset::Dataset;
use crate::dye_lines::{DyeLineSet, build_dye_lines};
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::interaction::{pan_viewport, zoom_to_rect, zoom_viewport};
use crate::limits::AxisLimitMode;
use crate::render::{RenderList, build_render_list};
use crate::spots::SpotPoint;
use crate::style::Theme;
use crate::transform::Transform;
use crate::view::Viewport;

/// Interactive state of one channel-pair scatter plot.
#[derive(Debug, Clone)]
pub struct PlotState {
    pair: Option<ChannelPair>,
    limits: AxisLimitMode,
    show_dye_lines: bool,
    viewport: Option<Viewport>,
}

impl PlotState {
    /// Create a state with nothing selected.
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            pair: None,
            limits: AxisLimitMode::Auto,
            show_dye_lines: config.show_dye_lines,
            viewport: None,
        }
    }

    /// Create a state showing the first channel pair of a dataset.
    pub fn for_dataset(dataset: &Dataset, config: &PlotConfig) -> Self {
        let mut state = Self::new(config);
        state.pair = dataset.pairs().first().cloned();
        state
    }

    /// Selected channel pair.
    pub fn pair(&self) -> Option<&ChannelPair> {
        self.pair.as_ref()
    }

    /// Active axis-limit mode.
    pub fn limits(&self) -> AxisLimitMode {
        self.limits
    }

    /// Whether dye lines are drawn.
    pub fn show_dye_lines(&self) -> bool {
        self.show_dye_lines
    }

    /// Viewport used by the last frame.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Select the channel pair shown on the axes.
    ///
    /// A fixed viewport belongs to the previous pair's intensities, so the
    /// mode falls back to automatic limits.
    pub fn select_pair(&mut self, pair: ChannelPair) {
        if self.pair.as_ref() == Some(&pair) {
            return;
        }
        if matches!(self.limits, AxisLimitMode::Fixed { .. }) {
            self.limits = AxisLimitMode::Auto;
        }
        self.pair = Some(pair);
    }

    /// Change the axis-limit mode.
    pub fn set_limits(&mut self, limits: AxisLimitMode) {
        self.limits = limits;
    }

    /// Show or hide dye lines.
    pub fn set_show_dye_lines(&mut self, show: bool) {
        self.show_dye_lines = show;
    }

    /// Flip dye-line visibility, returning the new value.
    pub fn toggle_dye_lines(&mut self) -> bool {
        self.show_dye_lines = !self.show_dye_lines;
        self.show_dye_lines
    }

    /// Pan by a pixel delta against the last frame's transform.
    pub fn pan(&mut self, delta_pixels: ScreenPoint, transform: &Transform) {
        if let Some(viewport) = self.viewport {
            self.fix(pan_viewport(viewport, delta_pixels, transform));
        }
    }

    /// Zoom around a data-space center. Factors below one zoom in.
    pub fn zoom(&mut self, center: Point, factor_x: f64, factor_y: f64) {
        if let Some(viewport) = self.viewport {
            self.fix(zoom_viewport(viewport, center, factor_x, factor_y));
        }
    }

    /// Zoom to a screen rectangle.
    pub fn zoom_to(&mut self, rect: ScreenRect, transform: &Transform) {
        if let Some(viewport) = self.viewport {
            self.fix(zoom_to_rect(viewport, rect, transform));
        }
    }

    fn fix(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            debug!(?viewport, "ignoring degenerate viewport");
            return;
        }
        self.limits = AxisLimitMode::Fixed { viewport };
        self.viewport = Some(viewport);
    }

    /// Compute the frame for the current state.
    ///
    /// Returns `None` until a channel pair is selected or when no viewport can
    /// be resolved (no plottable spots under a data-driven mode).
    pub fn frame<'a>(
        &mut self,
        dataset: &'a Dataset,
        config: &PlotConfig,
        theme: &Theme,
    ) -> Option<PlotFrame<'a>> {
        let pair = self.pair.clone()?;
        let spots = dataset.spots().project(&pair);
        let points: Vec<Point> = spots.iter().map(|spot| spot.point).collect();
        let viewport = self
            .limits
            .resolve(&points, config.padding_frac, config.min_padding)?;
        self.viewport = Some(viewport);

        let dye_lines = match (self.show_dye_lines, dataset.dyes()) {
            (true, Some(dyes)) => build_dye_lines(
                dyes,
                dataset.channels(),
                &pair,
                &viewport,
                &theme.palette,
                config.dye_line_options(),
            ),
            _ => DyeLineSet::default(),
        };

        Some(PlotFrame {
            pair,
            viewport,
            spots,
            dye_lines,
        })
    }
}

/// Everything needed to draw one redraw of a plot.
#[derive(Debug, Clone)]
pub struct PlotFrame<'a> {
    /// Channel pair on the axes.
    pub pair: ChannelPair,
    /// Visible data rectangle.
    pub viewport: Viewport,
    /// Spots projected onto the pair.
    pub spots: Vec<SpotPoint<'a>>,
    /// Visible dye lines.
    pub dye_lines: DyeLineSet,
}

impl PlotFrame<'_> {
    /// Transform for drawing this frame into `screen`.
    pub fn transform(&self, screen: ScreenRect) -> Option<Transform> {
        Transform::new(self.viewport, screen)
    }

    /// Render list for drawing this frame into `screen`.
    pub fn render(&self, screen: ScreenRect, theme: &Theme) -> Option<RenderList> {
        let transform = self.transform(screen)?;
        Some(build_render_list(
            &self.spots,
            self.dye_lines.lines(),
            &transform,
            theme,
        ))
    }
}
