//! Tooltip pipeline: pointer sample → grid coordinates → nearby series →
//! session state → presentation view.

mod coordinate_adapter;
mod nearby_series;
mod tooltip_config;
mod tooltip_controller;
mod tooltip_placement;

pub use coordinate_adapter::{CursorResolution, cursor_targets_chart, resolve_cursor};
pub use nearby_series::{
    ANNOTATION_MARKER_COLOR, DEFAULT_MARKER_COLOR, NearbyQuery, NearbyResolution,
    NearbySeriesInfo, check_for_nearby_series, get_nearby_series_data, resolve_nearby_series,
};
pub use tooltip_config::TooltipConfig;
pub use tooltip_controller::{TooltipController, TooltipView};
pub use tooltip_placement::{
    CURSOR_PADDING_X, CURSOR_PADDING_Y, FALLBACK_CHART_WIDTH, TooltipPlacement, TooltipSize,
    tooltip_placement,
};
