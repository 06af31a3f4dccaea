//! Core types for the clinic patient report: payload model, reporting window,
//! aggregation outputs, roles and configuration.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub mod dates;
pub mod role;
pub mod window;

pub use role::{navigation_for, Capability, NavItem, Role, NAVIGATION};
pub use window::{filter_by_window, DateWindow};

/// Tunables for the report view and the assistant context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Length of the window selected when the report is first opened.
    pub default_window_days: u32,
    /// Maximum number of calculated records listed in the indicator section.
    pub indicator_limit: usize,
    /// Maximum number of appointments listed in the assistant context.
    pub attendance_context_limit: usize,
    /// Emit a "no data" line for each goal without entries instead of skipping it.
    pub mark_empty_goals: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_window_days: 30,
            indicator_limit: 15,
            attendance_context_limit: 10,
            mark_empty_goals: false,
        }
    }
}

/// Display modes offered by the report view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    #[default]
    Summary,
    Pie,
    Monthly,
    Professional,
}

impl ReportMode {
    pub const ALL: [ReportMode; 4] = [
        ReportMode::Summary,
        ReportMode::Pie,
        ReportMode::Monthly,
        ReportMode::Professional,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportMode::Summary => "Resumo",
            ReportMode::Pie => "Distribuição",
            ReportMode::Monthly => "Evolução mensal",
            ReportMode::Professional => "Por profissional",
        }
    }
}

/// A named percentage computed by the reporting backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct IndicatorValue {
    #[serde(default)]
    pub value: f64,
}

/// One "global calculated response": the indicators computed for a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedRecord {
    #[serde(default, deserialize_with = "dates::lenient")]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub indicators: BTreeMap<String, IndicatorValue>,
}

/// A question label paired with the value its formula produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComputedFormula {
    #[serde(default)]
    pub question_label: String,
    #[serde(default)]
    pub numeric_value: f64,
}

/// A dated progress entry for a therapeutic goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalEntry {
    #[serde(default, deserialize_with = "dates::lenient")]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub computed_formulas: Vec<ComputedFormula>,
}

/// Time series of one therapeutic goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalEvolution {
    #[serde(default)]
    pub goal_id: String,
    #[serde(default)]
    pub goal_description: String,
    #[serde(default)]
    pub entries: Vec<GoalEntry>,
}

/// Current (non-historical) values of a goal at report generation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    #[serde(default)]
    pub goal_description: Option<String>,
    #[serde(default)]
    pub indicators: BTreeMap<String, IndicatorValue>,
}

/// Appointment snapshot as served by the scheduling backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default, deserialize_with = "dates::lenient")]
    pub date_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub attended: Option<bool>,
    #[serde(default)]
    pub attendance_type: String,
    #[serde(default)]
    pub professional_id: String,
    #[serde(default)]
    pub professional_name: Option<String>,
}

impl Appointment {
    pub fn status(&self) -> AttendanceStatus {
        match self.attended {
            Some(true) => AttendanceStatus::Present,
            Some(false) => AttendanceStatus::Absent,
            None => AttendanceStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Unknown,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "presente",
            AttendanceStatus::Absent => "falta",
            AttendanceStatus::Unknown => "não informado",
        }
    }
}

/// Aggregate root fetched once when the report view mounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub records: Vec<CalculatedRecord>,
    #[serde(default)]
    pub goal_evolution: BTreeMap<String, GoalEvolution>,
    #[serde(default)]
    pub kpis: BTreeMap<String, KpiSnapshot>,
}

/// Present/absent/unknown tally for a bucket of appointments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AttendanceCounts {
    pub total: u32,
    pub present: u32,
    pub absent: u32,
    pub unknown: u32,
}

impl AttendanceCounts {
    pub fn record(&mut self, status: AttendanceStatus) {
        self.total += 1;
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn rates(&self) -> AttendanceRates {
        AttendanceRates {
            present: percentage(self.present, self.total),
            absent: percentage(self.absent, self.total),
            unknown: percentage(self.unknown, self.total),
        }
    }
}

/// Percentages of a bucket, rounded to one decimal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AttendanceRates {
    pub present: f64,
    pub absent: f64,
    pub unknown: f64,
}

/// `count / total * 100` rounded to one decimal; an empty bucket yields 0.
pub fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = f64::from(count) / f64::from(total) * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Calendar month key, ordered chronologically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyAttendance {
    pub month: YearMonth,
    pub counts: AttendanceCounts,
    pub rates: AttendanceRates,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfessionalAttendance {
    pub professional_id: String,
    pub professional_name: Option<String>,
    pub counts: AttendanceCounts,
    pub rates: AttendanceRates,
}

impl ProfessionalAttendance {
    pub fn display_name(&self) -> &str {
        self.professional_name
            .as_deref()
            .unwrap_or(self.professional_id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeAttendance {
    pub attendance_type: String,
    pub counts: AttendanceCounts,
    pub rates: AttendanceRates,
}

/// Attendance statistics for the appointments inside a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AttendanceSummary {
    pub counts: AttendanceCounts,
    pub rates: AttendanceRates,
    pub by_month: Vec<MonthlyAttendance>,
    pub by_professional: Vec<ProfessionalAttendance>,
    pub by_type: Vec<TypeAttendance>,
}

/// One indicator reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorPoint {
    pub date: Option<NaiveDateTime>,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalPoint {
    pub date: Option<NaiveDateTime>,
    pub label: String,
    pub value: f64,
}

/// In-window series of one goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalSeries {
    pub goal_id: String,
    pub goal_description: String,
    pub points: Vec<GoalPoint>,
}

/// Everything the report view renders for a given window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReportSummary {
    pub window: DateWindow,
    pub latest_indicators: Vec<IndicatorPoint>,
    /// Every in-window reading, oldest first.
    pub indicator_history: Vec<IndicatorPoint>,
    pub goal_series: Vec<GoalSeries>,
    pub attendance: AttendanceSummary,
}

/// Errors raised at the I/O and parsing boundaries of the report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Input is missing required data")]
    MissingData,
    #[error("Could not read data: {0}")]
    Parse(String),
    #[error("Assistant request failed: {0}")]
    Assistant(String),
    #[error("Other error: {0}")]
    Other(String),
}
