use serde::{Deserialize, Serialize};

use crate::error::{TooltipError, TooltipResult};

/// Maximum number of tooltip entries accumulated per resolution pass.
pub const OPTIMIZED_MODE_SERIES_LIMIT: usize = 1000;
/// Above this many series the buffer and emphasis band start shrinking.
pub const SHOW_FEWER_SERIES_LIMIT: usize = 5;
/// Buffer multiplier applied when few series are present (higher == more series shown).
pub const INCREASE_NEARBY_SERIES_MULTIPLIER: f64 = 5.5;
/// Buffer multiplier divided by the series count when many series are present.
pub const DYNAMIC_NEARBY_SERIES_MULTIPLIER: f64 = 30.0;
/// Buffer never drops below this fraction of one y-axis tick.
pub const Y_BUFFER_FLOOR_RATIO: f64 = 0.3;
/// Buffer multiplier in show-all mode; roughly the whole visible grid.
pub const SHOW_ALL_SERIES_MULTIPLIER: f64 = 10.0;

/// Tunable constants of the nearby-series heuristics.
///
/// `Default` reproduces the fixed dashboard behavior; hosts may widen or
/// narrow the tooltip net per chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearbyTuning {
    pub show_fewer_series_limit: usize,
    pub buffer_floor_ratio: f64,
    pub dynamic_multiplier: f64,
    pub increase_multiplier: f64,
    pub show_all_multiplier: f64,
    /// Minimum emphasis band (percent) once the series count exceeds the limit.
    pub emphasis_percent_many: f64,
    /// Minimum emphasis band (percent) for small series counts.
    pub emphasis_percent_few: f64,
    pub series_scan_limit: usize,
}

impl Default for NearbyTuning {
    fn default() -> Self {
        Self {
            show_fewer_series_limit: SHOW_FEWER_SERIES_LIMIT,
            buffer_floor_ratio: Y_BUFFER_FLOOR_RATIO,
            dynamic_multiplier: DYNAMIC_NEARBY_SERIES_MULTIPLIER,
            increase_multiplier: INCREASE_NEARBY_SERIES_MULTIPLIER,
            show_all_multiplier: SHOW_ALL_SERIES_MULTIPLIER,
            emphasis_percent_many: 2.0,
            emphasis_percent_few: 5.0,
            series_scan_limit: OPTIMIZED_MODE_SERIES_LIMIT,
        }
    }
}

impl NearbyTuning {
    pub fn validate(self) -> TooltipResult<Self> {
        for (value, name) in [
            (self.buffer_floor_ratio, "buffer_floor_ratio"),
            (self.dynamic_multiplier, "dynamic_multiplier"),
            (self.increase_multiplier, "increase_multiplier"),
            (self.show_all_multiplier, "show_all_multiplier"),
            (self.emphasis_percent_many, "emphasis_percent_many"),
            (self.emphasis_percent_few, "emphasis_percent_few"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TooltipError::InvalidData(format!(
                    "nearby tuning `{name}` must be finite and > 0"
                )));
            }
        }
        if self.series_scan_limit == 0 {
            return Err(TooltipError::InvalidData(
                "nearby tuning `series_scan_limit` must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Y-axis tolerance window around the cursor.
    ///
    /// Shrinks as `total_series` grows past the limit, but never below
    /// `buffer_floor_ratio` of one tick.
    #[must_use]
    pub fn y_buffer(&self, y_interval: f64, total_series: usize, show_all_series: bool) -> f64 {
        if show_all_series {
            return y_interval * self.show_all_multiplier;
        }

        let y_buffer_min = y_interval * self.buffer_floor_ratio;
        if total_series > self.show_fewer_series_limit {
            let adjusted_buffer = (y_interval * self.dynamic_multiplier) / total_series as f64;
            return y_buffer_min.max(adjusted_buffer);
        }

        y_buffer_min.max(y_interval * self.increase_multiplier)
    }

    /// Percent band inside which a nearby match counts as emphasized.
    #[must_use]
    pub fn emphasis_percent(&self, total_series: usize) -> f64 {
        let min_percent = if total_series > self.show_fewer_series_limit {
            self.emphasis_percent_many
        } else {
            self.emphasis_percent_few
        };
        if total_series == 0 {
            return min_percent;
        }
        min_percent.max(100.0 / total_series as f64)
    }
}

/// Y buffer with the default tuning.
#[must_use]
pub fn get_y_buffer(y_interval: f64, total_series: usize, show_all_series: bool) -> f64 {
    NearbyTuning::default().y_buffer(y_interval, total_series, show_all_series)
}

/// Returns true when `value_to_check` lies within `percentage` percent of
/// `base_value`, inclusive.
///
/// The band is scaled by `base_value` itself, so its absolute width follows
/// the matched value's magnitude. A negative base yields an empty band.
#[must_use]
pub fn is_within_percentage_range(value_to_check: f64, base_value: f64, percentage: f64) -> bool {
    let range = (percentage / 100.0) * base_value;
    let lower_bound = base_value - range;
    let upper_bound = base_value + range;
    value_to_check >= lower_bound && value_to_check <= upper_bound
}
