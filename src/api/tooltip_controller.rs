use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::TimeSeriesDataSet;
use crate::error::TooltipResult;
use crate::extensions::{TooltipContent, select_tooltip_content};
use crate::interaction::{CursorCoordinates, PinState, TooltipSession};
use crate::render::{ChartSurface, VisualCommand, apply_commands};

use super::nearby_series::{NearbySeriesInfo, get_nearby_series_data};
use super::tooltip_config::TooltipConfig;
use super::tooltip_placement::{TooltipPlacement, TooltipSize, tooltip_placement};

/// Everything the presentation layer needs to draw one tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipView {
    pub entries: Vec<NearbySeriesInfo>,
    pub content: TooltipContent,
    /// Offer a "show all series" toggle.
    pub show_all_available: bool,
    pub pin_state: PinState,
    pub placement: TooltipPlacement,
    pub wrap_labels: bool,
}

/// Drives the tooltip of one chart instance: resolves nearby series on
/// pointer input, keeps the pin/show-all session, and forwards emphasis
/// commands to the chart surface.
pub struct TooltipController<S: ChartSurface> {
    surface: S,
    data: TimeSeriesDataSet,
    config: TooltipConfig,
    session: TooltipSession,
    last_cursor: Option<CursorCoordinates>,
    tooltip_size: TooltipSize,
    viewport_height: Option<f64>,
}

impl<S: ChartSurface> TooltipController<S> {
    pub fn new(surface: S, data: TimeSeriesDataSet, config: TooltipConfig) -> TooltipResult<Self> {
        config.validate()?;
        Ok(Self {
            surface,
            data,
            config,
            session: TooltipSession::default(),
            last_cursor: None,
            tooltip_size: TooltipSize::default(),
            viewport_height: None,
        })
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn data(&self) -> &TimeSeriesDataSet {
        &self.data
    }

    /// Replaces the dataset. Call `refresh` to re-resolve at the current cursor.
    pub fn set_data(&mut self, data: TimeSeriesDataSet) {
        debug!(total_series = data.total_series(), "tooltip dataset replaced");
        self.data = data;
    }

    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TooltipConfig) -> TooltipResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn session(&self) -> &TooltipSession {
        &self.session
    }

    /// Size of the rendered tooltip box, as measured by the presentation layer.
    pub fn set_tooltip_size(&mut self, size: TooltipSize) {
        self.tooltip_size = size;
    }

    pub fn set_viewport_height(&mut self, viewport_height: Option<f64>) {
        self.viewport_height = viewport_height;
    }

    /// Handles pointer movement and returns the tooltip to show, if any.
    pub fn pointer_move(&mut self, cursor: CursorCoordinates) -> Option<TooltipView> {
        self.last_cursor = Some(cursor);
        self.refresh()
    }

    /// Re-resolves at the last known cursor, e.g. after a data or toggle change.
    pub fn refresh(&mut self) -> Option<TooltipView> {
        if self.config.hidden {
            return None;
        }
        let live = self.last_cursor.as_ref()?;
        let target = live.target.as_ref()?;
        if !self.session.is_pinned() && !target.is_canvas() {
            trace!("pointer is not over a chart canvas");
            return None;
        }

        let resolution = get_nearby_series_data(
            live,
            self.session.pinned_position(),
            &self.data,
            Some(&self.surface),
            self.config.unit.as_ref(),
            self.session.show_all_series(),
            &self.config.tuning,
        );
        apply_commands(&mut self.surface, &resolution.commands);
        if resolution.entries.is_empty() {
            return None;
        }

        let entries = resolution.entries;
        let content = select_tooltip_content(&entries, self.config.plugin.as_ref());
        let show_all_available = self
            .session
            .show_all_available(entries.len(), self.data.total_series());
        let chart_width = self
            .surface
            .width()
            .unwrap_or(self.config.fallback_chart_width);
        let placement = tooltip_placement(
            self.session.effective_cursor(live),
            chart_width,
            self.tooltip_size,
            self.viewport_height,
        );

        Some(TooltipView {
            entries,
            content,
            show_all_available,
            pin_state: self.session.pin_state(),
            placement,
            wrap_labels: self.config.wrap_labels,
        })
    }

    /// Marks the pointer as outside the chart.
    ///
    /// A pinned tooltip survives; otherwise every series is de-emphasized.
    pub fn pointer_leave(&mut self) {
        self.last_cursor = None;
        if self.session.is_pinned() {
            return;
        }
        let command = VisualCommand::de_emphasize(0..self.data.total_series());
        self.surface.dispatch(&command);
    }

    /// Pins the tooltip at the last pointer position.
    ///
    /// Returns `false` when already pinned or no pointer position is known.
    pub fn pin(&mut self) -> bool {
        match &self.last_cursor {
            Some(cursor) => self.session.pin(cursor.clone()),
            None => false,
        }
    }

    pub fn unpin(&mut self) -> bool {
        self.session.unpin()
    }

    /// Only takes effect while pinned.
    pub fn set_show_all_series(&mut self, show_all: bool) -> bool {
        self.session.set_show_all_series(show_all)
    }
}
