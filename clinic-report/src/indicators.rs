//! Global calculated responses: text block for the assistant and series for charts.

use std::fmt::Write;

use clinic_core::{filter_by_window, CalculatedRecord, DateWindow, IndicatorPoint};

use crate::format::{format_date, format_numeric, NO_DATA_MARKER};

/// Text block listing at most `limit` in-window records in upstream order.
///
/// Never empty: with nothing to list it holds [`NO_DATA_MARKER`].
pub fn aggregate_indicators(
    records: &[CalculatedRecord],
    window: &DateWindow,
    limit: usize,
) -> String {
    let filtered = filter_by_window(records, |record| record.date, window);
    tracing::debug!(
        total = records.len(),
        in_window = filtered.len(),
        limit,
        "aggregating indicators"
    );

    let mut output = String::new();
    if filtered.is_empty() || limit == 0 {
        let _ = writeln!(output, "{NO_DATA_MARKER}");
        return output;
    }

    for record in filtered.into_iter().take(limit) {
        let _ = writeln!(output, "{}:", format_date(record.date));
        if record.indicators.is_empty() {
            let _ = writeln!(output, "  (nenhum indicador calculado)");
        }
        for (name, indicator) in &record.indicators {
            let _ = writeln!(output, "  {name}: {}%", format_numeric(indicator.value));
        }
    }

    output
}

/// Every in-window reading, oldest first. Undated records keep their relative order at the end.
pub fn indicator_history(records: &[CalculatedRecord], window: &DateWindow) -> Vec<IndicatorPoint> {
    let mut filtered = filter_by_window(records, |record| record.date, window);
    filtered.sort_by_key(|record| (record.date.is_none(), record.date));

    filtered
        .into_iter()
        .flat_map(|record| {
            record.indicators.iter().map(|(name, indicator)| IndicatorPoint {
                date: record.date,
                name: name.clone(),
                value: indicator.value,
            })
        })
        .collect()
}

/// Indicators of the most recent in-window record.
pub fn latest_indicators(records: &[CalculatedRecord], window: &DateWindow) -> Vec<IndicatorPoint> {
    let filtered = filter_by_window(records, |record| record.date, window);
    let latest = filtered
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.date > best.date {
                candidate
            } else {
                best
            }
        });

    latest
        .map(|record| {
            record
                .indicators
                .iter()
                .map(|(name, indicator)| IndicatorPoint {
                    date: record.date,
                    name: name.clone(),
                    value: indicator.value,
                })
                .collect()
        })
        .unwrap_or_default()
}
