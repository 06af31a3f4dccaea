#![allow(dead_code)]

use std::fs;

use chrono::NaiveDate;
use clinic_core::{Appointment, DateWindow, ReportPayload};
use clinic_report::{parse_appointments_str, parse_report_str};

pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture is readable")
}

pub fn patient_report() -> ReportPayload {
    parse_report_str(&read_fixture("patient_report.json")).expect("report fixture parses")
}

pub fn appointments() -> Vec<Appointment> {
    parse_appointments_str(&read_fixture("appointments.json")).expect("appointments parse")
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateWindow {
    DateWindow::new(
        Some(day(start.0, start.1, start.2)),
        Some(day(end.0, end.1, end.2)),
    )
}

pub fn february() -> DateWindow {
    window((2024, 2, 1), (2024, 2, 29))
}
