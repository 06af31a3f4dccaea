use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;

use clinic_core::{
    filter_by_window, DateWindow, GoalEvolution, GoalPoint, GoalSeries, ReportConfig,
};

use crate::format::{format_date, format_numeric, NO_DATA_MARKER};

pub(crate) fn goal_title<'a>(goal_id: &str, description: &'a str) -> Cow<'a, str> {
    if description.trim().is_empty() {
        Cow::Owned(format!("Meta {goal_id}"))
    } else {
        Cow::Borrowed(description)
    }
}

/// Per-goal text block of in-window entries.
///
/// Goals without entries in the window are skipped unless
/// `config.mark_empty_goals` is set. When nothing at all is written the
/// section carries the shared "no data" marker.
pub fn aggregate_goal_evolution(
    goals: &BTreeMap<String, GoalEvolution>,
    window: &DateWindow,
    config: &ReportConfig,
) -> String {
    let mut output = String::new();
    let mut written = 0usize;

    for (goal_id, goal) in goals {
        let entries = filter_by_window(&goal.entries, |entry| entry.date, window);
        let title = goal_title(goal_id, &goal.goal_description);

        if entries.is_empty() {
            if config.mark_empty_goals {
                let _ = writeln!(output, "{title}: {NO_DATA_MARKER}");
                written += 1;
            }
            continue;
        }

        let _ = writeln!(output, "{title}");
        for entry in entries {
            let pairs = entry
                .computed_formulas
                .iter()
                .map(|formula| {
                    format!(
                        "{}={}%",
                        formula.question_label,
                        format_numeric(formula.numeric_value)
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(output, "  {}: {pairs}", format_date(entry.date));
        }
        written += 1;
    }

    tracing::debug!(goals = goals.len(), written, "aggregated goal evolution");

    if written == 0 {
        let _ = writeln!(output, "{NO_DATA_MARKER}");
    }
    output
}

/// Chart series per goal, skipping goals with no entries in the window.
pub fn goal_series(goals: &BTreeMap<String, GoalEvolution>, window: &DateWindow) -> Vec<GoalSeries> {
    goals
        .iter()
        .filter_map(|(goal_id, goal)| {
            let entries = filter_by_window(&goal.entries, |entry| entry.date, window);
            if entries.is_empty() {
                return None;
            }

            let points = entries
                .into_iter()
                .flat_map(|entry| {
                    entry.computed_formulas.iter().map(|formula| GoalPoint {
                        date: entry.date,
                        label: formula.question_label.clone(),
                        value: formula.numeric_value,
                    })
                })
                .collect();

            Some(GoalSeries {
                goal_id: goal_id.clone(),
                goal_description: goal_title(goal_id, &goal.goal_description).into_owned(),
                points,
            })
        })
        .collect()
}
