//! Flat text summary handed to the question-answering backend.

use std::fmt::Write;

use clinic_core::{Appointment, DateWindow, ReportConfig, ReportPayload};

use crate::attendance::{aggregate_attendance, recent_appointments};
use crate::format::{format_datetime, format_numeric, format_window, NO_DATA_MARKER};
use crate::goals::{aggregate_goal_evolution, goal_title};
use crate::indicators::aggregate_indicators;

/// Serialize the report for the assistant.
///
/// Indicators, goal evolution and attendance follow `window`; KPI snapshots
/// describe the current state and are never filtered.
pub fn build_ai_context(
    report: &ReportPayload,
    appointments: &[Appointment],
    window: &DateWindow,
    config: &ReportConfig,
) -> String {
    let mut output = String::new();

    match (&report.patient_name, &report.patient_id) {
        (Some(name), Some(id)) => {
            let _ = writeln!(output, "Paciente: {name} (id {id})");
        }
        (Some(name), None) => {
            let _ = writeln!(output, "Paciente: {name}");
        }
        (None, Some(id)) => {
            let _ = writeln!(output, "Paciente: id {id}");
        }
        (None, None) => {}
    }
    let _ = writeln!(output, "Período analisado: {}", format_window(window));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Indicadores globais");
    output.push_str(&aggregate_indicators(
        &report.records,
        window,
        config.indicator_limit,
    ));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Evolução das metas terapêuticas");
    output.push_str(&aggregate_goal_evolution(
        &report.goal_evolution,
        window,
        config,
    ));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Frequência nos atendimentos");
    write_attendance(&mut output, appointments, window, config);

    let _ = writeln!(output);
    let _ = writeln!(output, "## KPIs atuais por meta");
    write_kpis(&mut output, report);

    tracing::debug!(chars = output.len(), "built assistant context");
    output
}

fn write_attendance(
    output: &mut String,
    appointments: &[Appointment],
    window: &DateWindow,
    config: &ReportConfig,
) {
    let summary = aggregate_attendance(appointments, window);
    if summary.counts.total == 0 {
        let _ = writeln!(output, "{NO_DATA_MARKER}");
        return;
    }

    let _ = writeln!(
        output,
        "Total: {} | Presenças: {} ({}%) | Faltas: {} ({}%) | Não informado: {} ({}%)",
        summary.counts.total,
        summary.counts.present,
        format_numeric(summary.rates.present),
        summary.counts.absent,
        format_numeric(summary.rates.absent),
        summary.counts.unknown,
        format_numeric(summary.rates.unknown),
    );

    let recent = recent_appointments(appointments, window, config.attendance_context_limit);
    if recent.is_empty() {
        return;
    }
    let _ = writeln!(output, "Últimos atendimentos:");
    for appointment in recent {
        let professional = appointment
            .professional_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| appointment.professional_id.trim());
        let kind = if appointment.attendance_type.is_empty() {
            "-"
        } else {
            appointment.attendance_type.as_str()
        };
        let _ = writeln!(
            output,
            "- {} | {} | {} | {}",
            format_datetime(appointment.date_time),
            kind,
            if professional.is_empty() { "-" } else { professional },
            appointment.status().label()
        );
    }
}

fn write_kpis(output: &mut String, report: &ReportPayload) {
    if report.kpis.is_empty() {
        let _ = writeln!(output, "Nenhum KPI disponível.");
        return;
    }

    for (goal_id, snapshot) in &report.kpis {
        let description = snapshot
            .goal_description
            .as_deref()
            .or_else(|| {
                report
                    .goal_evolution
                    .get(goal_id)
                    .map(|goal| goal.goal_description.as_str())
            })
            .unwrap_or_default();
        let _ = writeln!(output, "{}:", goal_title(goal_id, description));
        if snapshot.indicators.is_empty() {
            let _ = writeln!(output, "  (sem valores)");
        }
        for (name, indicator) in &snapshot.indicators {
            let _ = writeln!(output, "  {name}: {}%", format_numeric(indicator.value));
        }
    }
}
