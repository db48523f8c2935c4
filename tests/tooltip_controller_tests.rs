use series_tooltip::api::{CURSOR_PADDING_X, CURSOR_PADDING_Y, TooltipSize};
use series_tooltip::core::{
    AnnotationDatum, AnnotationSeries, ContainerId, ContinuousSeries, EventRecord, PixelPoint,
    PlotRect, Series, SeriesKind, SeriesValue, TimeSeriesDataSet,
};
use series_tooltip::extensions::{TooltipContent, TooltipPluginConfig};
use series_tooltip::interaction::{CursorCoordinates, PinState, PointerTarget, TargetKind};
use series_tooltip::render::{
    AnnotationAxis, AxisPair, ChartSurface, CommandKind, HeadlessSurface, SeriesEmphasis,
    VisualCommand,
};
use series_tooltip::{TooltipConfig, TooltipController};

const ROOT: ContainerId = ContainerId(1);
const WRAPPER: ContainerId = ContainerId(2);

fn line_data() -> TimeSeriesDataSet {
    let series = [1.0, 5.0, 9.0]
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            Series::Line(ContinuousSeries::new(
                format!("s{idx}"),
                vec![SeriesValue::from(value); 3],
            ))
        })
        .collect();
    TimeSeriesDataSet::new(series, vec![1_000.0, 2_000.0, 3_000.0])
}

fn surface() -> HeadlessSurface {
    let rect = PlotRect::new(20.0, 10.0, 300.0, 200.0).expect("rect");
    HeadlessSurface::new(ROOT, rect, 3, (0.0, 10.0))
        .and_then(|surface| surface.with_y_interval(0.2))
        .expect("surface")
}

fn controller(config: TooltipConfig) -> TooltipController<HeadlessSurface> {
    TooltipController::new(surface(), line_data(), config).expect("controller")
}

fn canvas_cursor(
    controller: &TooltipController<HeadlessSurface>,
    column: usize,
    value: f64,
) -> CursorCoordinates {
    let pixel = controller
        .surface()
        .pixel_for(AxisPair::PRIMARY, column, value)
        .expect("pixel");
    CursorCoordinates::at(pixel, Some(PointerTarget::canvas_in(WRAPPER, ROOT)))
}

#[test]
fn pointer_over_series_shows_tooltip_and_emphasizes() {
    let mut controller = controller(TooltipConfig::default());
    let cursor = canvas_cursor(&controller, 1, 5.0);

    let view = controller.pointer_move(cursor.clone()).expect("tooltip");

    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].series_name, "s1");
    assert!(view.entries[0].is_closest_to_cursor);
    assert_eq!(view.content, TooltipContent::Default);
    assert_eq!(view.pin_state, PinState::Unpinned);
    assert!(!view.show_all_available);
    assert!(view.wrap_labels);
    assert_eq!(view.placement.x, cursor.viewport.x + CURSOR_PADDING_X);
    assert_eq!(view.placement.y, cursor.viewport.y + CURSOR_PADDING_Y);
    assert_eq!(controller.surface().emphasized_series(), vec![1]);
    assert_eq!(
        controller.surface().emphasis_of(1),
        SeriesEmphasis::Emphasized { fades_others: true }
    );
}

#[test]
fn tooltip_flips_left_past_chart_middle() {
    let mut controller = controller(TooltipConfig::default());
    controller.set_tooltip_size(TooltipSize {
        width: 120.0,
        height: 40.0,
    });
    let cursor = canvas_cursor(&controller, 2, 5.0);

    let view = controller.pointer_move(cursor.clone()).expect("tooltip");
    assert_eq!(view.placement.x, cursor.viewport.x - 120.0 - CURSOR_PADDING_X);
}

#[test]
fn non_canvas_target_hides_unpinned_tooltip() {
    let mut controller = controller(TooltipConfig::default());
    let pixel = controller
        .surface()
        .pixel_for(AxisPair::PRIMARY, 1, 5.0)
        .expect("pixel");

    let over_label = CursorCoordinates::at(
        pixel,
        Some(PointerTarget::new(TargetKind::Other, [WRAPPER, ROOT])),
    );
    assert!(controller.pointer_move(over_label).is_none());

    let no_target = CursorCoordinates::at(pixel, None);
    assert!(controller.pointer_move(no_target).is_none());
    assert!(controller.surface().dispatched().is_empty());
}

#[test]
fn pointer_over_other_chart_is_ignored() {
    let mut controller = controller(TooltipConfig::default());
    let pixel = controller
        .surface()
        .pixel_for(AxisPair::PRIMARY, 1, 5.0)
        .expect("pixel");
    let foreign = CursorCoordinates::at(
        pixel,
        Some(PointerTarget::canvas_in(WRAPPER, ContainerId(42))),
    );

    assert!(controller.pointer_move(foreign).is_none());
    assert!(controller.surface().dispatched().is_empty());
}

#[test]
fn hidden_tooltip_never_resolves() {
    let config = TooltipConfig {
        hidden: true,
        ..TooltipConfig::default()
    };
    let mut controller = controller(config);
    let cursor = canvas_cursor(&controller, 1, 5.0);

    assert!(controller.pointer_move(cursor).is_none());
    assert!(controller.surface().dispatched().is_empty());
}

#[test]
fn empty_column_still_applies_commands() {
    let mut controller = controller(TooltipConfig::default());
    let cursor = canvas_cursor(&controller, 1, 3.0);

    assert!(controller.pointer_move(cursor).is_none());
    let dispatched = controller.surface().dispatched();
    assert_eq!(dispatched.len(), 2);
    assert_eq!(dispatched[0].kind, CommandKind::DeEmphasize);
    assert!(dispatched[1].suppress_opacity_fade);
    assert!(dispatched[1].series_indices.is_empty());
}

#[test]
fn off_grid_pointer_clears_emphasis() {
    let mut controller = controller(TooltipConfig::default());
    let on = canvas_cursor(&controller, 1, 5.0);
    controller.pointer_move(on).expect("tooltip");
    assert_eq!(controller.surface().emphasized_series(), vec![1]);

    let off = CursorCoordinates::at(
        PixelPoint::new(5.0, 5.0),
        Some(PointerTarget::canvas_in(WRAPPER, ROOT)),
    );
    assert!(controller.pointer_move(off).is_none());
    assert!(controller.surface().emphasized_series().is_empty());
    assert_eq!(
        controller.surface().dispatched().last(),
        Some(&VisualCommand::de_emphasize(0..3))
    );
}

#[test]
fn pinned_tooltip_survives_pointer_moving_away() {
    let mut controller = controller(TooltipConfig::default());
    let cursor = canvas_cursor(&controller, 1, 5.0);
    controller.pointer_move(cursor.clone()).expect("tooltip");
    assert!(controller.pin());
    assert!(!controller.pin());

    let over_tooltip = CursorCoordinates::at(
        PixelPoint::new(600.0, 400.0),
        Some(PointerTarget::new(TargetKind::Other, [ContainerId(9)])),
    );
    let view = controller.pointer_move(over_tooltip).expect("pinned tooltip");

    assert_eq!(view.pin_state, PinState::Pinned);
    assert_eq!(view.entries[0].series_name, "s1");
    assert_eq!(view.placement.x, cursor.viewport.x + CURSOR_PADDING_X);
    assert!(view.show_all_available);

    assert!(controller.unpin());
    assert!(!controller.unpin());
    assert_eq!(controller.session().pin_state(), PinState::Unpinned);
}

#[test]
fn pin_needs_a_known_pointer() {
    let mut controller = controller(TooltipConfig::default());
    assert!(!controller.pin());
}

#[test]
fn show_all_toggle_only_while_pinned() {
    let mut controller = controller(TooltipConfig::default());
    assert!(!controller.set_show_all_series(true));

    let cursor = canvas_cursor(&controller, 1, 5.0);
    controller.pointer_move(cursor).expect("tooltip");
    controller.pin();
    assert!(controller.set_show_all_series(true));

    let view = controller.refresh().expect("tooltip");
    assert!(!view.show_all_available);

    controller.unpin();
    assert!(!controller.session().show_all_series());
}

#[test]
fn pointer_leave_de_emphasizes_unless_pinned() {
    let mut controller = controller(TooltipConfig::default());
    let cursor = canvas_cursor(&controller, 1, 5.0);
    controller.pointer_move(cursor.clone()).expect("tooltip");

    controller.pointer_leave();
    assert!(controller.surface().emphasized_series().is_empty());
    assert!(controller.refresh().is_none());

    controller.pointer_move(cursor).expect("tooltip");
    controller.pin();
    controller.surface_mut().clear_dispatched();
    controller.pointer_leave();
    assert!(controller.surface().dispatched().is_empty());
    assert_eq!(controller.surface().emphasized_series(), vec![1]);
}

#[test]
fn plugin_takes_over_annotation_only_tooltips() {
    let events = vec![EventRecord::new("deploy", 2_500.0)];
    let data = TimeSeriesDataSet::new(
        vec![Series::Scatter(AnnotationSeries::new(
            "events",
            vec![AnnotationDatum::new(1, 0.5, events)],
        ))],
        vec![1_000.0, 2_000.0, 3_000.0],
    )
    .with_annotation_axis(vec![1_000.0, 2_000.0, 3_000.0]);
    let surface = surface()
        .with_annotation_axis(AnnotationAxis::new(3))
        .expect("annotation axis");
    let config = TooltipConfig::default()
        .with_plugin(TooltipPluginConfig::new("annotation-card", SeriesKind::Scatter));
    let mut controller = TooltipController::new(surface, data, config).expect("controller");

    let cursor = canvas_cursor(&controller, 1, 5.0);
    let view = controller.pointer_move(cursor).expect("tooltip");

    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].series_type, Some(SeriesKind::Scatter));
    assert_eq!(view.entries[0].date, 2_000.0);
    assert_eq!(
        view.content,
        TooltipContent::Plugin {
            id: "annotation-card".to_owned()
        }
    );
}

#[test]
fn plugin_stays_inactive_for_mixed_rows() {
    let config = TooltipConfig::default()
        .with_plugin(TooltipPluginConfig::new("annotation-card", SeriesKind::Scatter));
    let mut controller = controller(config);
    let cursor = canvas_cursor(&controller, 1, 5.0);

    let view = controller.pointer_move(cursor).expect("tooltip");
    assert_eq!(view.content, TooltipContent::Default);
}

#[test]
fn replaced_data_is_used_on_refresh() {
    let mut controller = controller(TooltipConfig::default());
    let cursor = canvas_cursor(&controller, 1, 5.0);
    controller.pointer_move(cursor).expect("tooltip");

    let mut data = line_data();
    data.time_series.truncate(1);
    controller.set_data(data);
    assert!(controller.refresh().is_none());
}

#[test]
fn invalid_config_is_rejected() {
    let config = TooltipConfig {
        fallback_chart_width: 0.0,
        ..TooltipConfig::default()
    };
    assert!(TooltipController::new(surface(), line_data(), config).is_err());

    let mut controller = controller(TooltipConfig::default());
    let bad = TooltipConfig {
        fallback_chart_width: f64::NAN,
        ..TooltipConfig::default()
    };
    assert!(controller.set_config(bad).is_err());
    assert_eq!(controller.surface().width(), Some(340.0));
}
