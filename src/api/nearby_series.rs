use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AnnotationSeries, ContinuousSeries, EventRecord, GridPoint, NearbyTuning, Series, SeriesKind,
    TimeSeriesDataSet, UnitConfig, format_timestamp_millis, format_value,
    is_within_percentage_range, normalize_timestamp_millis,
};
use crate::interaction::CursorCoordinates;
use crate::render::{ChartSurface, VisualCommand};

use super::coordinate_adapter::resolve_cursor;

/// Marker color reserved for annotation matches.
pub const ANNOTATION_MARKER_COLOR: &str = "#00FFFF";
/// Marker color for line series without a color of their own.
pub const DEFAULT_MARKER_COLOR: &str = "#000";

/// One tooltip row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySeriesInfo {
    pub series_idx: Option<usize>,
    pub datum_idx: Option<usize>,
    pub series_name: String,
    /// Milliseconds since the epoch.
    pub date: f64,
    pub marker_color: String,
    pub x: f64,
    pub y: f64,
    pub formatted_y: String,
    pub is_closest_to_cursor: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_type: Option<SeriesKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventRecord>>,
}

impl NearbySeriesInfo {
    /// UTC rendering of `date` for the tooltip header.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        format_timestamp_millis(self.date)
    }
}

/// Entries in discovery order plus the visual commands the renderer should
/// apply to reflect them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NearbyResolution {
    pub entries: Vec<NearbySeriesInfo>,
    pub commands: Vec<VisualCommand>,
}

impl NearbyResolution {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indices of the series whose rows are emphasized.
    pub fn emphasized_series(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.is_closest_to_cursor)
            .filter_map(|entry| entry.series_idx)
    }
}

/// Inputs of a single resolution pass.
#[derive(Debug, Clone, Copy)]
pub struct NearbyQuery<'a> {
    pub data: &'a TimeSeriesDataSet,
    pub cursor: GridPoint,
    pub y_buffer: f64,
    pub unit: Option<&'a UnitConfig>,
    /// Cursor on the annotation axis pair, when the chart has one.
    pub annotation_cursor: Option<GridPoint>,
}

/// Finds the series close to the cursor with the default tuning.
#[must_use]
pub fn check_for_nearby_series(
    data: &TimeSeriesDataSet,
    cursor: GridPoint,
    y_buffer: f64,
    unit: Option<&UnitConfig>,
    annotation_cursor: Option<GridPoint>,
) -> NearbyResolution {
    resolve_nearby_series(
        NearbyQuery {
            data,
            cursor,
            y_buffer,
            unit,
            annotation_cursor,
        },
        &NearbyTuning::default(),
    )
}

/// Finds the series close to the cursor.
///
/// Continuous series match only at the cursor's exact column, when their
/// value lies within `y_buffer` of the cursor. Annotation series match when
/// their marker sits on the cursor's annotation column. Scanning stops once
/// `tuning.series_scan_limit` entries have accumulated.
#[must_use]
pub fn resolve_nearby_series(query: NearbyQuery<'_>, tuning: &NearbyTuning) -> NearbyResolution {
    let Some((cursor_x, cursor_y)) = query.cursor.coords() else {
        trace!("cursor grid point incomplete; nothing nearby");
        return NearbyResolution::default();
    };
    let annotation_x = query
        .annotation_cursor
        .and_then(GridPoint::finite_coords)
        .map(|(x, _)| x);

    let data = query.data;
    let total_series = data.total_series();
    let emphasis_percent = tuning.emphasis_percent(total_series);

    let mut entries = Vec::new();
    let mut nearby = Vec::new();
    let mut emphasized = Vec::new();
    let mut non_emphasized = Vec::new();

    for (series_idx, series) in data.time_series.iter().enumerate() {
        if entries.len() >= tuning.series_scan_limit {
            debug!(
                limit = tuning.series_scan_limit,
                series_idx, "series scan limit reached"
            );
            break;
        }

        match series {
            Series::Malformed(_) => {
                trace!(series_idx, "malformed series skipped");
            }
            Series::Scatter(annotation) => {
                let Some(annotation_x) = annotation_x else {
                    continue;
                };
                if let Some(entry) =
                    match_annotation(data, series_idx, annotation, annotation_x, query.unit)
                {
                    entries.push(entry);
                }
            }
            Series::Line(line) => {
                let Some(mut entry) = match_continuous(
                    data,
                    series_idx,
                    line,
                    (cursor_x, cursor_y),
                    query.y_buffer,
                    query.unit,
                ) else {
                    continue;
                };
                entry.is_closest_to_cursor =
                    is_within_percentage_range(cursor_y, entry.y, emphasis_percent);
                if entry.is_closest_to_cursor {
                    emphasized.push(series_idx);
                } else {
                    non_emphasized.push(series_idx);
                }
                nearby.push(series_idx);
                entries.push(entry);
            }
        }
    }

    trace!(
        total_series,
        matched = entries.len(),
        emphasized = emphasized.len(),
        "resolved nearby series"
    );

    // With nothing emphasized, highlight every nearby series without fading
    // the rest of the chart.
    let mut commands = Vec::with_capacity(2);
    commands.push(VisualCommand::de_emphasize(non_emphasized));
    if emphasized.is_empty() {
        commands.push(VisualCommand::highlight(nearby));
    } else {
        commands.push(VisualCommand::emphasize(emphasized));
    }
    NearbyResolution { entries, commands }
}

fn match_annotation(
    data: &TimeSeriesDataSet,
    series_idx: usize,
    series: &AnnotationSeries,
    cursor_x: f64,
    unit: Option<&UnitConfig>,
) -> Option<NearbySeriesInfo> {
    let Some(anchor) = series.anchor() else {
        trace!(series_idx, "annotation series without markers skipped");
        return None;
    };
    if anchor.x_index as f64 != cursor_x {
        return None;
    }
    let x_axis_alt = data.x_axis_alt.as_ref()?;

    let x_value = x_axis_alt.get(anchor.x_index).copied().unwrap_or(0.0);
    let y_value = 0.0;
    Some(NearbySeriesInfo {
        series_idx: Some(series_idx),
        datum_idx: Some(anchor.x_index),
        series_name: series.name.clone(),
        date: x_value,
        marker_color: ANNOTATION_MARKER_COLOR.to_owned(),
        x: x_value,
        y: y_value,
        formatted_y: format_value(y_value, unit),
        is_closest_to_cursor: false,
        series_type: Some(SeriesKind::Scatter),
        events: Some(anchor.events.clone()),
    })
}

fn match_continuous(
    data: &TimeSeriesDataSet,
    series_idx: usize,
    series: &ContinuousSeries,
    (cursor_x, cursor_y): (f64, f64),
    y_buffer: f64,
    unit: Option<&UnitConfig>,
) -> Option<NearbySeriesInfo> {
    let datum_idx = exact_column(cursor_x)?;
    let y_value = series.value_at(datum_idx).as_number()?;
    let x_value = *data.x_axis.get(datum_idx)?;

    let within_buffer = cursor_y <= y_value + y_buffer && cursor_y >= y_value - y_buffer;
    if !within_buffer {
        return None;
    }

    Some(NearbySeriesInfo {
        series_idx: Some(series_idx),
        datum_idx: Some(datum_idx),
        series_name: series.name.clone(),
        date: normalize_timestamp_millis(x_value),
        marker_color: series
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_MARKER_COLOR.to_owned()),
        x: x_value,
        y: y_value,
        formatted_y: format_value(y_value, unit),
        is_closest_to_cursor: false,
        series_type: Some(SeriesKind::Line),
        events: None,
    })
}

/// Column index the cursor sits on exactly; fractional positions match nothing.
fn exact_column(cursor_x: f64) -> Option<usize> {
    if !cursor_x.is_finite() || cursor_x < 0.0 || cursor_x.fract() != 0.0 {
        return None;
    }
    Some(cursor_x as usize)
}

/// Resolves nearby series for a pointer sample against a chart surface.
///
/// The pinned cursor, when present, replaces the live one. Returns an empty
/// resolution when the surface is missing or not laid out, or the pointer is
/// over another chart; when the pointer is off the plotting rectangle the
/// resolution carries a de-emphasize command for every series.
#[must_use]
pub fn get_nearby_series_data<S: ChartSurface + ?Sized>(
    live: &CursorCoordinates,
    pinned: Option<&CursorCoordinates>,
    data: &TimeSeriesDataSet,
    surface: Option<&S>,
    unit: Option<&UnitConfig>,
    show_all_series: bool,
    tuning: &NearbyTuning,
) -> NearbyResolution {
    let Some(surface) = surface else {
        return NearbyResolution::default();
    };

    let total_series = data.total_series();
    let cursor = resolve_cursor(live, pinned, surface, total_series);
    if !cursor.chart_matched {
        debug!("pointer target does not belong to this chart");
        return NearbyResolution::default();
    }
    let Some(y_interval) = surface.y_axis_interval() else {
        debug!("value axis not laid out; skipping nearby series");
        return NearbyResolution::default();
    };

    let Some(grid) = cursor.cursor else {
        return NearbyResolution {
            entries: Vec::new(),
            commands: cursor.commands,
        };
    };

    let y_buffer = tuning.y_buffer(y_interval, total_series, show_all_series);
    resolve_nearby_series(
        NearbyQuery {
            data,
            cursor: grid,
            y_buffer,
            unit,
            annotation_cursor: cursor.annotation_cursor,
        },
        tuning,
    )
}
