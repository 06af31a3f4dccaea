//! Report payload parsing and the windowed aggregations of the patient report.

use clinic_core::{Appointment, DateWindow, ReportError, ReportPayload, ReportSummary};
use serde::Deserialize;
use serde_json::Value;

pub mod assistant;
pub mod attendance;
pub mod context;
pub mod format;
pub mod goals;
pub mod indicators;
pub mod markdown;

pub use assistant::{parse_answer_str, parse_answer_value, AskRequest, AskResponse};
pub use attendance::{aggregate_attendance, recent_appointments};
pub use context::build_ai_context;
pub use format::NO_DATA_MARKER;
pub use goals::{aggregate_goal_evolution, goal_series};
pub use indicators::{aggregate_indicators, indicator_history, latest_indicators};
pub use markdown::strip_markdown;

/// Parse a report payload from a JSON string.
pub fn parse_report_str(report_json: &str) -> Result<ReportPayload, ReportError> {
    let value: Value =
        serde_json::from_str(report_json).map_err(|err| ReportError::Parse(err.to_string()))?;
    parse_report_value(&value)
}

/// Parse a report payload from a `serde_json::Value`.
///
/// Goals keyed by id without an inner `goalId` inherit the key.
pub fn parse_report_value(report: &Value) -> Result<ReportPayload, ReportError> {
    if !report.is_object() {
        return Err(ReportError::Parse(
            "Expected the report payload to be a JSON object".to_string(),
        ));
    }

    let mut payload =
        ReportPayload::deserialize(report).map_err(|err| ReportError::Parse(err.to_string()))?;

    for (goal_id, goal) in payload.goal_evolution.iter_mut() {
        if goal.goal_id.is_empty() {
            goal.goal_id = goal_id.clone();
        }
    }

    tracing::debug!(
        records = payload.records.len(),
        goals = payload.goal_evolution.len(),
        kpis = payload.kpis.len(),
        "parsed report payload"
    );
    Ok(payload)
}

/// Parse appointments from a JSON string.
pub fn parse_appointments_str(appointments_json: &str) -> Result<Vec<Appointment>, ReportError> {
    let value: Value = serde_json::from_str(appointments_json)
        .map_err(|err| ReportError::Parse(err.to_string()))?;
    parse_appointments_value(&value)
}

/// Accepts a bare array or an object wrapping it under `appointments` or `data`.
pub fn parse_appointments_value(value: &Value) -> Result<Vec<Appointment>, ReportError> {
    let list = match value {
        Value::Array(_) => value,
        Value::Object(obj) => obj
            .get("appointments")
            .or_else(|| obj.get("data"))
            .ok_or(ReportError::MissingData)?,
        _ => {
            return Err(ReportError::Parse(
                "Expected an array of appointments".to_string(),
            ))
        }
    };

    Vec::<Appointment>::deserialize(list).map_err(|err| ReportError::Parse(err.to_string()))
}

/// View data for every display mode of the report, for one window.
pub fn summarize_report(
    report: &ReportPayload,
    appointments: &[Appointment],
    window: &DateWindow,
) -> ReportSummary {
    ReportSummary {
        window: *window,
        latest_indicators: latest_indicators(&report.records, window),
        indicator_history: indicator_history(&report.records, window),
        goal_series: goal_series(&report.goal_evolution, window),
        attendance: aggregate_attendance(appointments, window),
    }
}
