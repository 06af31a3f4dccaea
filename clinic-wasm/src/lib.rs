//! Framework-neutral WASM <-> JavaScript bridge for the patient report.

use chrono::NaiveDate;
use clinic_core::{Appointment, DateWindow, ReportConfig, ReportError, ReportPayload};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsReportConfig {
    #[serde(default)]
    default_window_days: Option<u32>,
    #[serde(default)]
    indicator_limit: Option<usize>,
    #[serde(default)]
    attendance_context_limit: Option<usize>,
    #[serde(default)]
    mark_empty_goals: Option<bool>,
}

impl From<JsReportConfig> for ReportConfig {
    fn from(cfg: JsReportConfig) -> Self {
        let mut base = ReportConfig::default();
        if let Some(days) = cfg.default_window_days {
            base.default_window_days = days;
        }
        if let Some(limit) = cfg.indicator_limit {
            base.indicator_limit = limit;
        }
        if let Some(limit) = cfg.attendance_context_limit {
            base.attendance_context_limit = limit;
        }
        if let Some(mark) = cfg.mark_empty_goals {
            base.mark_empty_goals = mark;
        }
        base
    }
}

fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn read_config(config: Option<JsValue>) -> Result<ReportConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsReportConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            Ok(ReportConfig::from(cfg))
        }
        _ => Ok(ReportConfig::default()),
    }
}

fn read_report(report: JsValue) -> Result<ReportPayload, JsValue> {
    let value = from_value::<serde_json::Value>(report)
        .map_err(|err| JsValue::from_str(&format!("Could not read report JSON: {err}")))?;
    clinic_report::parse_report_value(&value).map_err(report_error)
}

fn read_appointments(appointments: JsValue) -> Result<Vec<Appointment>, JsValue> {
    if appointments.is_undefined() || appointments.is_null() {
        return Ok(Vec::new());
    }
    let value = from_value::<serde_json::Value>(appointments)
        .map_err(|err| JsValue::from_str(&format!("Could not read appointments JSON: {err}")))?;
    clinic_report::parse_appointments_value(&value).map_err(report_error)
}

fn read_window(window: JsValue) -> Result<DateWindow, JsValue> {
    if window.is_undefined() || window.is_null() {
        return Ok(DateWindow::unbounded());
    }
    from_value(window).map_err(|err| JsValue::from_str(&format!("Could not read window: {err}")))
}

fn report_error(err: ReportError) -> JsValue {
    JsValue::from_str(&format!("Report error: {err}"))
}

/// Context string for the question-answering backend.
#[wasm_bindgen(js_name = buildAiContext)]
pub fn build_ai_context(
    report: JsValue,
    appointments: JsValue,
    window: JsValue,
    config: Option<JsValue>,
) -> Result<String, JsValue> {
    init();
    let report = read_report(report)?;
    let appointments = read_appointments(appointments)?;
    let window = read_window(window)?;
    let config = read_config(config)?;

    Ok(clinic_report::build_ai_context(
        &report,
        &appointments,
        &window,
        &config,
    ))
}

/// Per-mode view data for the report screen.
#[wasm_bindgen(js_name = summarizeReport)]
pub fn summarize_report(
    report: JsValue,
    appointments: JsValue,
    window: JsValue,
) -> Result<JsValue, JsValue> {
    init();
    let report = read_report(report)?;
    let appointments = read_appointments(appointments)?;
    let window = read_window(window)?;

    let summary = clinic_report::summarize_report(&report, &appointments, &window);
    to_value(&summary).map_err(|err| JsValue::from_str(&format!("Could not serialize summary: {err}")))
}

#[wasm_bindgen(js_name = aggregateAttendance)]
pub fn aggregate_attendance(appointments: JsValue, window: JsValue) -> Result<JsValue, JsValue> {
    init();
    let appointments = read_appointments(appointments)?;
    let window = read_window(window)?;

    let summary = clinic_report::aggregate_attendance(&appointments, &window);
    to_value(&summary)
        .map_err(|err| JsValue::from_str(&format!("Could not serialize attendance: {err}")))
}

/// Window selected when the report first opens, ending at `today` (`YYYY-MM-DD`).
#[wasm_bindgen(js_name = defaultWindow)]
pub fn default_window(today: &str, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d")
        .map_err(|err| JsValue::from_str(&format!("Invalid date {today}: {err}")))?;
    let config = read_config(config)?;
    let window = DateWindow::last_days(today, config.default_window_days);
    to_value(&window).map_err(|err| JsValue::from_str(&format!("Could not serialize window: {err}")))
}

/// Plain-text rendering of an assistant answer.
#[wasm_bindgen(js_name = stripMarkdown)]
pub fn strip_markdown(text: &str) -> String {
    clinic_report::strip_markdown(text)
}

/// Answer text from a raw backend reply, markdown removed.
#[wasm_bindgen(js_name = readAnswer)]
pub fn read_answer(reply: JsValue) -> Result<String, JsValue> {
    let value = from_value::<serde_json::Value>(reply)
        .map_err(|err| JsValue::from_str(&format!("Could not read reply: {err}")))?;
    clinic_report::parse_answer_value(&value)
        .map(|answer| clinic_report::strip_markdown(&answer))
        .map_err(report_error)
}
