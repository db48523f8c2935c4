use criterion::{Criterion, criterion_group, criterion_main};
use series_tooltip::api::{check_for_nearby_series, get_nearby_series_data};
use series_tooltip::core::{
    ContainerId, ContinuousSeries, GridPoint, NearbyTuning, PlotRect, Series, SeriesValue,
    TimeSeriesDataSet, get_y_buffer,
};
use series_tooltip::interaction::{CursorCoordinates, PointerTarget};
use series_tooltip::render::{AxisPair, HeadlessSurface};
use std::hint::black_box;

fn generated_data(series_count: usize, columns: usize) -> TimeSeriesDataSet {
    let time_series = (0..series_count)
        .map(|s| {
            let data = (0..columns)
                .map(|c| SeriesValue::from(50.0 + ((s * 7 + c * 3) % 100) as f64 * 0.5))
                .collect();
            Series::Line(ContinuousSeries::new(format!("series-{s}"), data))
        })
        .collect();
    let x_axis = (0..columns)
        .map(|c| 1_673_784_000_000.0 + c as f64 * 15_000.0)
        .collect();
    TimeSeriesDataSet::new(time_series, x_axis)
}

fn bench_resolve_2k_series(c: &mut Criterion) {
    let data = generated_data(2_000, 240);
    let cursor = GridPoint::new(120.0, 75.0);
    let y_buffer = get_y_buffer(10.0, data.total_series(), false);

    c.bench_function("resolve_nearby_2k_series", |b| {
        b.iter(|| {
            let _ = check_for_nearby_series(
                black_box(&data),
                black_box(cursor),
                black_box(y_buffer),
                None,
                None,
            );
        })
    });
}

fn bench_resolve_show_all_2k_series(c: &mut Criterion) {
    let data = generated_data(2_000, 240);
    let cursor = GridPoint::new(120.0, 75.0);
    let y_buffer = get_y_buffer(10.0, data.total_series(), true);

    c.bench_function("resolve_nearby_show_all_2k_series", |b| {
        b.iter(|| {
            let _ = check_for_nearby_series(
                black_box(&data),
                black_box(cursor),
                black_box(y_buffer),
                None,
                None,
            );
        })
    });
}

fn bench_pointer_pipeline_500_series(c: &mut Criterion) {
    let data = generated_data(500, 240);
    let rect = PlotRect::new(40.0, 10.0, 1_200.0, 600.0).expect("valid plot rect");
    let surface = HeadlessSurface::from_data_set(ContainerId(1), rect, &data).expect("surface");
    let pixel = surface
        .pixel_for(AxisPair::PRIMARY, 120, 75.0)
        .expect("pixel");
    let cursor = CursorCoordinates::at(
        pixel,
        Some(PointerTarget::canvas_in(ContainerId(2), ContainerId(1))),
    );
    let tuning = NearbyTuning::default();

    c.bench_function("pointer_pipeline_500_series", |b| {
        b.iter(|| {
            let _ = get_nearby_series_data(
                black_box(&cursor),
                None,
                black_box(&data),
                Some(&surface),
                None,
                false,
                &tuning,
            );
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_2k_series,
    bench_resolve_show_all_2k_series,
    bench_pointer_pipeline_500_series
);
criterion_main!(benches);
