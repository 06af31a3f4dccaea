use chrono::NaiveDate;
use clinic_core::{percentage, AttendanceCounts, AttendanceStatus, ReportPayload, YearMonth};

#[test]
fn payload_tolerates_malformed_dates() {
    let json = r#"{
        "records": [
            {"date": "2024-02-10", "indicators": {"Adesao": {"value": 90}}},
            {"date": "not a date", "indicators": {}},
            {"date": null},
            {"date": 1704412800000}
        ]
    }"#;

    let payload: ReportPayload = serde_json::from_str(json).unwrap();
    assert_eq!(payload.records.len(), 4);
    assert_eq!(
        payload.records[0].date,
        NaiveDate::from_ymd_opt(2024, 2, 10).and_then(|d| d.and_hms_opt(0, 0, 0))
    );
    assert!(payload.records[1].date.is_none());
    assert!(payload.records[2].date.is_none());
    assert_eq!(
        payload.records[3].date.map(|d| d.date()),
        NaiveDate::from_ymd_opt(2024, 1, 5)
    );
    assert!(payload.goal_evolution.is_empty());
}

#[test]
fn rfc3339_offsets_keep_wall_clock_time() {
    let json = r#"{"records": [{"date": "2024-02-10T23:30:00-03:00"}]}"#;
    let payload: ReportPayload = serde_json::from_str(json).unwrap();
    let date = payload.records[0].date.unwrap();
    assert_eq!(date.date(), NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
}

#[test]
fn empty_bucket_rates_are_zero() {
    let rates = AttendanceCounts::default().rates();
    assert_eq!(rates.present, 0.0);
    assert_eq!(rates.absent, 0.0);
    assert_eq!(rates.unknown, 0.0);
    assert_eq!(percentage(0, 0), 0.0);
}

#[test]
fn rates_round_to_one_decimal() {
    let mut counts = AttendanceCounts::default();
    counts.record(AttendanceStatus::Present);
    counts.record(AttendanceStatus::Absent);
    counts.record(AttendanceStatus::Unknown);

    assert_eq!(counts.total, 3);
    assert_eq!(counts.rates().present, 33.3);
    assert_eq!(percentage(2, 3), 66.7);
}

#[test]
fn year_month_orders_chronologically() {
    let dec = YearMonth::of(NaiveDate::from_ymd_opt(2023, 12, 5).unwrap());
    let jan = YearMonth::of(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    assert!(dec < jan);
    assert_eq!(jan.to_string(), "01/2024");
}
