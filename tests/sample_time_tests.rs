use chrono::{TimeZone, Utc};
use linechart_rs::core::{Annotation, Sample};
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn sample_from_time_uses_unix_seconds() {
    let time = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .expect("valid time");
    let sample = Sample::from_time(time, 12.5);
    assert_eq!(sample.x, 1_704_164_645.0);
    assert_eq!(sample.y, 12.5);
}

#[test]
fn sample_from_decimal_keeps_value() {
    let time = Utc.timestamp_millis_opt(1_500).single().expect("valid time");
    let value = Decimal::from_str("101.25").expect("decimal");
    let sample = Sample::from_decimal_time(time, value).expect("decimal sample");
    assert_eq!(sample.x, 1.5);
    assert_eq!(sample.y, 101.25);
}

#[test]
fn annotation_exposes_its_sample() {
    let annotation = Annotation::new(3.0, 4.0, "<b>peak</b>");
    assert_eq!(annotation.sample(), Sample::new(3.0, 4.0));
    assert_eq!(annotation.render, "<b>peak</b>");
}
