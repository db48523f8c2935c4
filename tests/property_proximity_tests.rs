use series_tooltip::core::{get_y_buffer, is_within_percentage_range};
use proptest::prelude::*;

proptest! {
    #[test]
    fn buffer_never_drops_below_floor(
        y_interval in 0.001f64..10_000.0,
        total_series in 0usize..5_000,
    ) {
        let buffer = get_y_buffer(y_interval, total_series, false);
        prop_assert!(buffer >= y_interval * 0.3 - 1e-12);
    }

    #[test]
    fn buffer_is_non_increasing_in_series_count(
        y_interval in 0.001f64..10_000.0,
        total_series in 0usize..5_000,
    ) {
        let fewer = get_y_buffer(y_interval, total_series, false);
        let more = get_y_buffer(y_interval, total_series + 1, false);
        prop_assert!(more <= fewer);
    }

    #[test]
    fn show_all_buffer_covers_regular_buffer(
        y_interval in 0.001f64..10_000.0,
        total_series in 0usize..5_000,
    ) {
        prop_assert!(get_y_buffer(y_interval, total_series, true)
            >= get_y_buffer(y_interval, total_series, false));
    }

    #[test]
    fn base_value_is_always_within_its_own_positive_range(
        base in 0.0f64..1e9,
        percentage in 0.0f64..100.0,
    ) {
        prop_assert!(is_within_percentage_range(base, base, percentage));
    }
}
