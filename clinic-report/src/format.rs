use chrono::NaiveDateTime;
use clinic_core::DateWindow;

/// Line emitted whenever a section has nothing inside the window.
pub const NO_DATA_MARKER: &str = "Sem dados no período selecionado.";

pub(crate) fn format_date(date: Option<NaiveDateTime>) -> String {
    date.map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "sem data".to_string())
}

pub(crate) fn format_datetime(date: Option<NaiveDateTime>) -> String {
    date.map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| "sem data".to_string())
}

/// Integral values print without decimals, everything else as-is.
pub fn format_numeric(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

pub fn format_window(window: &DateWindow) -> String {
    let day = |date: chrono::NaiveDate| date.format("%d/%m/%Y").to_string();
    match (window.start, window.end) {
        (Some(start), Some(end)) => format!("{} a {}", day(start), day(end)),
        (Some(start), None) => format!("a partir de {}", day(start)),
        (None, Some(end)) => format!("até {}", day(end)),
        (None, None) => "todo o histórico".to_string(),
    }
}
