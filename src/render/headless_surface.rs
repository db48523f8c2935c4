use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    ContainerId, GridPoint, LinearScale, PixelPoint, PlotRect, Series, TimeSeriesDataSet,
    nice_step,
};
use crate::error::{TooltipError, TooltipResult};

use super::{AxisPair, ChartSurface, CommandKind, VisualCommand};

/// Target tick count used to derive the value-axis interval.
const VALUE_AXIS_SPLIT_NUMBER: f64 = 5.0;
/// Headroom added above and below the data range when autoscaling.
const AUTOSCALE_PADDING_RATIO: f64 = 0.1;

/// Coarse x axis and hidden y axis carrying annotation markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationAxis {
    pub column_count: usize,
    pub y_domain: (f64, f64),
}

impl AnnotationAxis {
    #[must_use]
    pub fn new(column_count: usize) -> Self {
        Self {
            column_count,
            y_domain: (0.0, 1.0),
        }
    }
}

/// Emphasis state a series was last left in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesEmphasis {
    Emphasized { fades_others: bool },
    Normal,
}

#[derive(Debug, Clone, Copy)]
struct BandAxis {
    scale: LinearScale,
    column_count: usize,
}

impl BandAxis {
    /// Columns sit at band centers: column `i` spans `[i - 0.5, i + 0.5]`.
    fn new(column_count: usize, pixel_start: f64, pixel_end: f64) -> TooltipResult<Self> {
        if column_count == 0 {
            return Err(TooltipError::InvalidData(
                "category axis needs at least one column".to_owned(),
            ));
        }
        let scale = LinearScale::new(-0.5, column_count as f64 - 0.5, pixel_start, pixel_end)?;
        Ok(Self {
            scale,
            column_count,
        })
    }

    fn column_at(self, pixel: f64) -> Option<f64> {
        let raw = self.scale.pixel_to_domain(pixel)?;
        let max = (self.column_count - 1) as f64;
        Some(raw.round().clamp(0.0, max))
    }

    fn pixel_at(self, column: usize) -> Option<f64> {
        self.scale.domain_to_pixel(column as f64)
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisGrid {
    x: BandAxis,
    y: LinearScale,
}

impl AxisGrid {
    fn new(rect: PlotRect, column_count: usize, y_domain: (f64, f64)) -> TooltipResult<Self> {
        Ok(Self {
            x: BandAxis::new(column_count, rect.left, rect.right())?,
            y: LinearScale::new(y_domain.0, y_domain.1, rect.bottom(), rect.top)?,
        })
    }

    fn invert(self, pixel: PixelPoint) -> GridPoint {
        GridPoint::from_parts(self.x.column_at(pixel.x), self.y.pixel_to_domain(pixel.y))
    }
}

/// In-process chart surface backed by linear scales.
///
/// Stands in for a real rendering engine in tests, benches and headless
/// hosts. Dispatched commands are recorded in order and folded into a
/// per-series emphasis state.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    root: ContainerId,
    rect: PlotRect,
    primary: AxisGrid,
    annotation: Option<AxisGrid>,
    y_interval: f64,
    dispatched: Vec<VisualCommand>,
    emphasis: IndexMap<usize, SeriesEmphasis>,
}

impl HeadlessSurface {
    pub fn new(
        root: ContainerId,
        rect: PlotRect,
        column_count: usize,
        y_domain: (f64, f64),
    ) -> TooltipResult<Self> {
        if !rect.is_valid() {
            return Err(TooltipError::InvalidPlotArea {
                width: rect.width,
                height: rect.height,
            });
        }
        let primary = AxisGrid::new(rect, column_count, y_domain)?;
        let y_interval = nice_step((y_domain.1 - y_domain.0).abs() / VALUE_AXIS_SPLIT_NUMBER);
        Ok(Self {
            root,
            rect,
            primary,
            annotation: None,
            y_interval,
            dispatched: Vec::new(),
            emphasis: IndexMap::new(),
        })
    }

    /// Builds a surface whose axes fit the dataset: one column per primary
    /// x value, a padded value domain, and an annotation axis when the
    /// dataset carries one.
    pub fn from_data_set(
        root: ContainerId,
        rect: PlotRect,
        data: &TimeSeriesDataSet,
    ) -> TooltipResult<Self> {
        let surface = Self::new(root, rect, data.x_axis.len(), autoscale_y_domain(data))?;
        match &data.x_axis_alt {
            Some(alt) if !alt.is_empty() => {
                surface.with_annotation_axis(AnnotationAxis::new(alt.len()))
            }
            _ => Ok(surface),
        }
    }

    pub fn with_annotation_axis(mut self, axis: AnnotationAxis) -> TooltipResult<Self> {
        self.annotation = Some(AxisGrid::new(self.rect, axis.column_count, axis.y_domain)?);
        Ok(self)
    }

    /// Overrides the derived value-axis tick interval.
    pub fn with_y_interval(mut self, y_interval: f64) -> TooltipResult<Self> {
        if !y_interval.is_finite() || y_interval <= 0.0 {
            return Err(TooltipError::InvalidData(
                "y interval must be finite and > 0".to_owned(),
            ));
        }
        self.y_interval = y_interval;
        Ok(self)
    }

    #[must_use]
    pub fn plot_rect(&self) -> PlotRect {
        self.rect
    }

    /// Forward projection of a column/value pair, handy for building pointer
    /// positions in tests.
    #[must_use]
    pub fn pixel_for(&self, axes: AxisPair, column: usize, value: f64) -> Option<PixelPoint> {
        let grid = self.grid(axes)?;
        Some(PixelPoint::new(
            grid.x.pixel_at(column)?,
            grid.y.domain_to_pixel(value)?,
        ))
    }

    #[must_use]
    pub fn dispatched(&self) -> &[VisualCommand] {
        &self.dispatched
    }

    pub fn clear_dispatched(&mut self) {
        self.dispatched.clear();
    }

    #[must_use]
    pub fn emphasis_of(&self, series_idx: usize) -> SeriesEmphasis {
        self.emphasis
            .get(&series_idx)
            .copied()
            .unwrap_or(SeriesEmphasis::Normal)
    }

    /// Series currently emphasized, in the order they were last touched.
    #[must_use]
    pub fn emphasized_series(&self) -> Vec<usize> {
        self.emphasis
            .iter()
            .filter(|(_, state)| matches!(state, SeriesEmphasis::Emphasized { .. }))
            .map(|(idx, _)| *idx)
            .collect()
    }

    fn grid(&self, axes: AxisPair) -> Option<AxisGrid> {
        match axes {
            AxisPair::PRIMARY => Some(self.primary),
            AxisPair::ANNOTATION => self.annotation,
            _ => None,
        }
    }
}

impl ChartSurface for HeadlessSurface {
    fn convert_from_pixel(&self, axes: AxisPair, pixel: PixelPoint) -> Option<GridPoint> {
        Some(self.grid(axes)?.invert(pixel))
    }

    fn contains_pixel(&self, pixel: PixelPoint) -> bool {
        self.rect.contains(pixel)
    }

    /// Plot width plus symmetric horizontal margins.
    fn width(&self) -> Option<f64> {
        Some(self.rect.right() + self.rect.left)
    }

    fn root_container(&self) -> ContainerId {
        self.root
    }

    fn y_axis_interval(&self) -> Option<f64> {
        Some(self.y_interval)
    }

    fn dispatch(&mut self, command: &VisualCommand) {
        let state = match command.kind {
            CommandKind::Emphasize => SeriesEmphasis::Emphasized {
                fades_others: !command.suppress_opacity_fade,
            },
            CommandKind::DeEmphasize => SeriesEmphasis::Normal,
        };
        for idx in &command.series_indices {
            self.emphasis.shift_remove(idx);
            self.emphasis.insert(*idx, state);
        }
        self.dispatched.push(command.clone());
    }
}

fn autoscale_y_domain(data: &TimeSeriesDataSet) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in &data.time_series {
        let Series::Line(line) = series else {
            continue;
        };
        for value in line.data.iter().filter_map(|value| value.as_number()) {
            if value.is_finite() {
                min = min.min(value);
                max = max.max(value);
            }
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span == 0.0 {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * AUTOSCALE_PADDING_RATIO };
        return (min - pad, max + pad);
    }
    let pad = span * AUTOSCALE_PADDING_RATIO;
    (min - pad, max + pad)
}
