//! Pure helpers behind the report view; compiled on every target.

use chrono::NaiveDate;
use clinic_core::{AttendanceRates, DateWindow, ReportConfig, ReportError, Role};
use serde::Deserialize;

/// Options passed by the host page when mounting the view.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MountOptions {
    #[serde(default, alias = "tipo_usuario")]
    pub user_type: Option<String>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub config: Option<ReportConfig>,
}

impl MountOptions {
    pub fn role(&self) -> Result<Role, ReportError> {
        match self.user_type.as_deref() {
            Some(value) => value.parse(),
            None => Err(ReportError::MissingData),
        }
    }

    pub fn initial_window(&self, fallback_today: NaiveDate) -> DateWindow {
        let config = self.config.clone().unwrap_or_default();
        DateWindow::last_days(
            self.today.unwrap_or(fallback_today),
            config.default_window_days,
        )
    }
}

/// Value of an `<input type="date">`; empty or invalid clears the bound.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// CSS `conic-gradient` for the presence/absence/unknown pie.
pub fn pie_gradient(rates: &AttendanceRates) -> String {
    let present = rates.present.clamp(0.0, 100.0);
    let absent = (present + rates.absent).clamp(0.0, 100.0);
    if present == 0.0 && absent == 0.0 && rates.unknown == 0.0 {
        return "conic-gradient(var(--clinic-empty) 0 100%)".to_string();
    }
    format!(
        "conic-gradient(var(--clinic-present) 0 {present}%, var(--clinic-absent) {present}% {absent}%, var(--clinic-unknown) {absent}% 100%)"
    )
}

/// Bar width for a percentage, as a CSS length.
pub fn bar_width(rate: f64) -> String {
    if !rate.is_finite() {
        return "0%".to_string();
    }
    format!("{}%", rate.clamp(0.0, 100.0))
}
