pub mod proximity;
pub mod scale;
pub mod series;
pub mod time;
pub mod types;
pub mod units;

pub use proximity::{
    NearbyTuning, OPTIMIZED_MODE_SERIES_LIMIT, get_y_buffer, is_within_percentage_range,
};
pub use scale::{LinearScale, nice_step};
pub use series::{
    AnnotationDatum, AnnotationPosition, AnnotationSeries, ContinuousSeries, EventRecord, Series,
    SeriesKind, SeriesValue, TimeSeriesDataSet,
};
pub use time::{datetime_to_unix_millis, format_timestamp_millis, normalize_timestamp_millis};
pub use types::{ContainerId, GridPoint, PixelPoint, PlotRect};
pub use units::{TimeUnit, UnitConfig, format_value};
