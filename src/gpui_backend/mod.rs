//! GPUI integration for spotplot.
//!
//! Paints a [`RenderList`](crate::render::RenderList) produced from a
//! [`PlotFrame`](crate::state::PlotFrame) into a GPUI window. Layout and input
//! wiring stay with the host view.

mod paint;

pub use paint::{paint_render_list, screen_rect};
