//! series-tooltip: nearby-series resolution for time-series dashboard charts.
//!
//! Given a pointer position over a chart, the crate works out which series
//! sit close enough to the cursor to show in a tooltip, which of those to
//! emphasize, and which annotation markers share the cursor's column. The
//! chart renderer stays behind the [`render::ChartSurface`] trait.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{NearbySeriesInfo, TooltipConfig, TooltipController, TooltipView};
pub use error::{TooltipError, TooltipResult};
