//! spotplot draws spectral-unmixing QC plots for spot data.
//! Spots are scattered on a pair of channel intensities, overlaid with one
//! line per dye that follows the dye's mixing ratio through the origin and is
//! clipped to the visible rectangle.

#![forbid(unsafe_code)]

pub mod channel;
pub mod clip;
pub mod config;
pub mod dataset;
pub mod dye;
pub mod dye_lines;
pub mod error;
pub mod geom;
#[cfg(feature = "gpui")]
pub mod gpui_backend;
pub mod interaction;
pub mod limits;
pub mod render;
pub mod spots;
pub mod state;
pub mod style;
pub mod transform;
pub mod view;

pub use channel::{ChannelId, ChannelIndex, ChannelPair};
pub use clip::{ClippedSegment, Direction, clip_line_through_origin};
pub use config::PlotConfig;
pub use dataset::{Dataset, DatasetPayload};
pub use dye::DyeMatrix;
pub use dye_lines::{DyeLine, DyeLineOptions, DyeLineSet, DyeLineStats, build_dye_lines};
pub use error::{ConfigError, DatasetError};
pub use geom::{Point, ScreenPoint, ScreenRect};
pub use limits::AxisLimitMode;
pub use render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RenderCommand, RenderList, TextStyle,
    build_render_list,
};
pub use spots::{Spot, SpotPoint, SpotRecord, SpotTable};
pub use state::{PlotFrame, PlotState};
pub use style::{ChannelPalette, Theme};
pub use transform::Transform;
pub use view::{Range, Viewport};
