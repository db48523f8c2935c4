use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{TooltipError, TooltipResult};

/// Gap sentinel used on the wire for "line break here".
pub const GAP_SENTINEL: &str = "-";

/// Discriminates the two series shapes sharing a chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Scatter,
}

/// One column value of a continuous series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeriesValue", into = "RawSeriesValue")]
pub enum SeriesValue {
    Number(f64),
    /// No sample at this column.
    Null,
    /// Explicit gap marker.
    Gap,
}

impl SeriesValue {
    /// Numeric value when the column holds a sample.
    #[must_use]
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Null | Self::Gap => None,
        }
    }
}

impl From<f64> for SeriesValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for SeriesValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSeriesValue {
    Number(f64),
    Marker(String),
    Null,
}

impl TryFrom<RawSeriesValue> for SeriesValue {
    type Error = String;

    fn try_from(raw: RawSeriesValue) -> Result<Self, Self::Error> {
        match raw {
            RawSeriesValue::Number(value) => Ok(Self::Number(value)),
            RawSeriesValue::Null => Ok(Self::Null),
            RawSeriesValue::Marker(marker) if marker == GAP_SENTINEL => Ok(Self::Gap),
            RawSeriesValue::Marker(marker) => Err(format!(
                "unexpected series value marker `{marker}`, expected `{GAP_SENTINEL}`"
            )),
        }
    }
}

impl From<SeriesValue> for RawSeriesValue {
    fn from(value: SeriesValue) -> Self {
        match value {
            SeriesValue::Number(value) => Self::Number(value),
            SeriesValue::Null => Self::Null,
            SeriesValue::Gap => Self::Marker(GAP_SENTINEL.to_owned()),
        }
    }
}

/// Line series whose values join positionally against the primary x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousSeries {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub data: Vec<SeriesValue>,
}

impl ContinuousSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<SeriesValue>) -> Self {
        Self {
            name: name.into(),
            color: None,
            data,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Value at a column; out-of-range columns read as absent.
    #[must_use]
    pub fn value_at(&self, column: usize) -> SeriesValue {
        self.data.get(column).copied().unwrap_or(SeriesValue::Null)
    }
}

/// A single point-in-time event attached to an annotation marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub category: String,
    pub timestamp: f64,
    /// Any additional fields, in source order.
    #[serde(flatten)]
    pub attributes: IndexMap<String, serde_json::Value>,
}

impl EventRecord {
    #[must_use]
    pub fn new(category: impl Into<String>, timestamp: f64) -> Self {
        Self {
            category: category.into(),
            timestamp,
            attributes: IndexMap::new(),
        }
    }
}

/// Encoded placement of an annotation marker: a column on the coarse
/// annotation x axis, a fixed y level, and the events collapsed onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAnnotationPosition", into = "RawAnnotationPosition")]
pub struct AnnotationPosition {
    pub x_index: usize,
    pub y_level: f64,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawAnnotationPosition {
    WithEvents(usize, f64, Vec<EventRecord>),
    Bare(usize, f64),
}

impl From<RawAnnotationPosition> for AnnotationPosition {
    fn from(raw: RawAnnotationPosition) -> Self {
        match raw {
            RawAnnotationPosition::WithEvents(x_index, y_level, events) => Self {
                x_index,
                y_level,
                events,
            },
            RawAnnotationPosition::Bare(x_index, y_level) => Self {
                x_index,
                y_level,
                events: Vec::new(),
            },
        }
    }
}

impl From<AnnotationPosition> for RawAnnotationPosition {
    fn from(position: AnnotationPosition) -> Self {
        Self::WithEvents(position.x_index, position.y_level, position.events)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationDatum {
    pub value: AnnotationPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_color: Option<String>,
}

impl AnnotationDatum {
    #[must_use]
    pub fn new(x_index: usize, y_level: f64, events: Vec<EventRecord>) -> Self {
        Self {
            value: AnnotationPosition {
                x_index,
                y_level,
                events,
            },
            category_color: None,
        }
    }
}

/// Discrete event markers living on the annotation axis pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSeries {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub data: Vec<AnnotationDatum>,
}

impl AnnotationSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<AnnotationDatum>) -> Self {
        Self {
            name: name.into(),
            color: None,
            data,
        }
    }

    /// The marker this series is placed by. Only the first datum counts.
    #[must_use]
    pub fn anchor(&self) -> Option<&AnnotationPosition> {
        self.data.first().map(|datum| &datum.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Series {
    Line(ContinuousSeries),
    Scatter(AnnotationSeries),
    /// Payload entry that failed to decode, kept verbatim so later series
    /// keep their chart index. Never matched.
    #[serde(untagged)]
    Malformed(serde_json::Value),
}

impl Series {
    /// `None` for malformed entries.
    #[must_use]
    pub fn kind(&self) -> Option<SeriesKind> {
        match self {
            Self::Line(_) => Some(SeriesKind::Line),
            Self::Scatter(_) => Some(SeriesKind::Scatter),
            Self::Malformed(_) => None,
        }
    }

    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Line(series) => &series.name,
            Self::Scatter(series) => &series.name,
            Self::Malformed(_) => "",
        }
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Line(series) => series.color.as_deref(),
            Self::Scatter(series) => series.color.as_deref(),
            Self::Malformed(_) => None,
        }
    }
}

/// Full dataset rendered by one chart instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesDataSet {
    #[serde(default)]
    pub time_series: Vec<Series>,
    #[serde(default)]
    pub x_axis: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_alt: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_ms: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataSet {
    #[serde(default)]
    time_series: Vec<serde_json::Value>,
    #[serde(default)]
    x_axis: Vec<f64>,
    #[serde(default)]
    x_axis_alt: Option<Vec<f64>>,
    #[serde(default)]
    range_ms: Option<f64>,
}

/// Decodes one typed payload entry. Only the tagged shapes are accepted here;
/// anything else is reported so the caller can keep a placeholder.
fn decode_series(value: serde_json::Value) -> Result<Series, String> {
    let tag = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);
    match tag.as_deref() {
        Some("line") => serde_json::from_value(value)
            .map(Series::Line)
            .map_err(|e| e.to_string()),
        Some("scatter") => serde_json::from_value(value)
            .map(Series::Scatter)
            .map_err(|e| e.to_string()),
        Some(other) => Err(format!("unknown series type `{other}`")),
        None => Err("series entry is not an object".to_owned()),
    }
}

impl TimeSeriesDataSet {
    #[must_use]
    pub fn new(time_series: Vec<Series>, x_axis: Vec<f64>) -> Self {
        Self {
            time_series,
            x_axis,
            x_axis_alt: None,
            range_ms: None,
        }
    }

    #[must_use]
    pub fn with_annotation_axis(mut self, x_axis_alt: Vec<f64>) -> Self {
        self.x_axis_alt = Some(x_axis_alt);
        self
    }

    /// Number of payload series, malformed entries included.
    #[must_use]
    pub fn total_series(&self) -> usize {
        self.time_series.len()
    }

    /// Parses a dataset payload.
    ///
    /// Series without a `type` field are read as line series. A series that
    /// fails to decode is kept as [`Series::Malformed`] in its slot, so
    /// indices match the chart the payload was rendered into.
    pub fn from_json_str(input: &str) -> TooltipResult<Self> {
        let raw: RawDataSet = serde_json::from_str(input).map_err(|e| {
            TooltipError::InvalidData(format!("failed to parse dataset json payload: {e}"))
        })?;

        let series_count = raw.time_series.len();
        let mut time_series = Vec::with_capacity(series_count);
        let mut malformed_count = 0usize;
        for (series_idx, value) in raw.time_series.into_iter().enumerate() {
            let mut typed = value.clone();
            if let Some(object) = typed.as_object_mut() {
                object
                    .entry("type")
                    .or_insert_with(|| serde_json::Value::from("line"));
            }
            match decode_series(typed) {
                Ok(series) => time_series.push(series),
                Err(err) => {
                    warn!(series_idx, error = %err, "keeping malformed series as placeholder");
                    malformed_count += 1;
                    time_series.push(Series::Malformed(value));
                }
            }
        }
        debug!(series_count, malformed_count, "loaded dataset");

        Ok(Self {
            time_series,
            x_axis: raw.x_axis,
            x_axis_alt: raw.x_axis_alt,
            range_ms: raw.range_ms,
        })
    }

    pub fn to_json_pretty(&self) -> TooltipResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TooltipError::Serialization(format!("failed to serialize dataset: {e}"))
        })
    }
}
