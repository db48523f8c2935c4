use chrono::{TimeZone, Utc};
use series_tooltip::core::{
    Series, SeriesKind, SeriesValue, TimeSeriesDataSet, datetime_to_unix_millis,
    format_timestamp_millis,
};

#[test]
fn parses_mixed_series_payload() {
    let payload = r##"{
        "timeSeries": [
            { "type": "line", "name": "cpu", "color": "#ff0000", "data": [1.5, null, "-", 3] },
            { "name": "mem", "data": [2, 2, 2, 2] },
            {
                "type": "scatter",
                "name": "events",
                "data": [
                    { "value": [2, 0.5, [{ "category": "deploy", "timestamp": 1673784000000, "service": "api", "version": 3 }]] }
                ]
            }
        ],
        "xAxis": [1673784000000, 1673784060000, 1673784120000, 1673784180000],
        "xAxisAlt": [1673784000000, 1673784600000, 1673785200000],
        "rangeMs": 180000
    }"##;

    let data = TimeSeriesDataSet::from_json_str(payload).expect("dataset");

    assert_eq!(data.total_series(), 3);
    assert_eq!(data.x_axis.len(), 4);
    assert_eq!(data.x_axis_alt.as_ref().map(Vec::len), Some(3));
    assert_eq!(data.range_ms, Some(180_000.0));

    let Series::Line(cpu) = &data.time_series[0] else {
        panic!("expected line series");
    };
    assert_eq!(cpu.color.as_deref(), Some("#ff0000"));
    assert_eq!(
        cpu.data,
        vec![
            SeriesValue::Number(1.5),
            SeriesValue::Null,
            SeriesValue::Gap,
            SeriesValue::Number(3.0),
        ]
    );

    assert_eq!(data.time_series[1].kind(), Some(SeriesKind::Line));
    assert_eq!(data.time_series[1].name(), "mem");

    let Series::Scatter(events) = &data.time_series[2] else {
        panic!("expected scatter series");
    };
    let anchor = events.anchor().expect("anchor");
    assert_eq!(anchor.x_index, 2);
    assert_eq!(anchor.y_level, 0.5);
    assert_eq!(anchor.events.len(), 1);
    let event = &anchor.events[0];
    assert_eq!(event.category, "deploy");
    assert_eq!(
        event.attributes.keys().collect::<Vec<_>>(),
        vec!["service", "version"]
    );
    assert_eq!(event.attributes["service"], serde_json::json!("api"));
}

#[test]
fn annotation_tuple_without_events_reads_empty() {
    let payload = r#"{
        "timeSeries": [{ "type": "scatter", "name": "bare", "data": [{ "value": [1, 0.5] }] }],
        "xAxis": [0, 1]
    }"#;

    let data = TimeSeriesDataSet::from_json_str(payload).expect("dataset");
    let Series::Scatter(bare) = &data.time_series[0] else {
        panic!("expected scatter series");
    };
    let anchor = bare.anchor().expect("anchor");
    assert_eq!(anchor.x_index, 1);
    assert!(anchor.events.is_empty());
}

#[test]
fn malformed_series_keep_their_slot() {
    let payload = r#"{
        "timeSeries": [
            { "type": "line", "name": "ok", "data": [1] },
            { "type": "line", "name": "bad marker", "data": ["x"] },
            { "type": "bar", "name": "unknown kind", "data": [1] },
            "not an object",
            { "type": "scatter", "name": "bad tuple", "data": [{ "value": [1] }] },
            { "name": "last", "data": [2] }
        ],
        "xAxis": [0]
    }"#;

    let data = TimeSeriesDataSet::from_json_str(payload).expect("dataset");

    assert_eq!(data.total_series(), 6);
    let malformed: Vec<_> = data
        .time_series
        .iter()
        .map(Series::is_malformed)
        .collect();
    assert_eq!(malformed, vec![false, true, true, true, true, false]);
    assert_eq!(data.time_series[0].name(), "ok");
    assert_eq!(data.time_series[5].name(), "last");
    assert_eq!(data.time_series[3].kind(), None);
    assert_eq!(
        data.time_series[3],
        Series::Malformed(serde_json::json!("not an object"))
    );
}

#[test]
fn malformed_series_survive_pretty_json() {
    let payload = r#"{
        "timeSeries": [{ "type": "line", "name": "bad", "data": ["x"] }, { "name": "good", "data": [1] }],
        "xAxis": [0]
    }"#;
    let data = TimeSeriesDataSet::from_json_str(payload).expect("dataset");

    let json = data.to_json_pretty().expect("json");
    let reparsed = TimeSeriesDataSet::from_json_str(&json).expect("reparse");
    assert_eq!(reparsed.total_series(), 2);
    assert!(reparsed.time_series[0].is_malformed());
    assert_eq!(reparsed.time_series[1].name(), "good");
}

#[test]
fn invalid_payload_is_an_error() {
    assert!(TimeSeriesDataSet::from_json_str("{").is_err());
    assert!(TimeSeriesDataSet::from_json_str(r#"{ "xAxis": "nope" }"#).is_err());
}

#[test]
fn empty_payload_reads_as_empty_dataset() {
    let data = TimeSeriesDataSet::from_json_str("{}").expect("dataset");
    assert_eq!(data, TimeSeriesDataSet::default());
}

#[test]
fn pretty_json_round_trips_gap_markers() {
    let payload = r#"{
        "timeSeries": [{ "type": "line", "name": "cpu", "data": [1, "-", null] }],
        "xAxis": [0, 1, 2]
    }"#;
    let data = TimeSeriesDataSet::from_json_str(payload).expect("dataset");

    let json = data.to_json_pretty().expect("json");
    assert!(json.contains("\"timeSeries\""));
    assert!(json.contains("\"-\""));
    assert!(!json.contains("xAxisAlt"));
    assert_eq!(TimeSeriesDataSet::from_json_str(&json).expect("reparse"), data);
}

#[test]
fn chrono_timestamps_feed_the_x_axis() {
    let start = Utc
        .with_ymd_and_hms(2023, 1, 15, 12, 0, 0)
        .single()
        .expect("valid date");
    let millis = datetime_to_unix_millis(start);

    assert_eq!(millis, 1_673_784_000_000.0);
    assert_eq!(format_timestamp_millis(millis), "2023-01-15 12:00:00");
}
