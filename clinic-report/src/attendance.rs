use std::collections::BTreeMap;

use clinic_core::{
    filter_by_window, Appointment, AttendanceCounts, AttendanceSummary, DateWindow,
    MonthlyAttendance, ProfessionalAttendance, TypeAttendance, YearMonth,
};

const UNASSIGNED_PROFESSIONAL: &str = "Não atribuído";
const UNSPECIFIED_TYPE: &str = "Não informado";

#[derive(Default)]
struct ProfessionalAccumulator {
    name: Option<String>,
    counts: AttendanceCounts,
}

/// Present/absent/unknown statistics for the appointments inside `window`.
///
/// Undated appointments only pass an unbounded window. They then count in the
/// totals and the professional and type groups, but belong to no month, so the
/// monthly totals can add up to less than `counts.total`.
pub fn aggregate_attendance(appointments: &[Appointment], window: &DateWindow) -> AttendanceSummary {
    let filtered = filter_by_window(appointments, |appointment| appointment.date_time, window);

    let mut counts = AttendanceCounts::default();
    let mut by_month: BTreeMap<YearMonth, AttendanceCounts> = BTreeMap::new();
    let mut by_professional: BTreeMap<String, ProfessionalAccumulator> = BTreeMap::new();
    let mut by_type: BTreeMap<String, AttendanceCounts> = BTreeMap::new();

    for appointment in &filtered {
        let status = appointment.status();
        counts.record(status);

        if let Some(at) = appointment.date_time {
            by_month
                .entry(YearMonth::of(at.date()))
                .or_default()
                .record(status);
        }

        let professional = by_professional
            .entry(appointment.professional_id.trim().to_string())
            .or_default();
        professional.counts.record(status);
        if professional.name.is_none() {
            professional.name = appointment
                .professional_name
                .as_ref()
                .filter(|name| !name.trim().is_empty())
                .cloned();
        }

        let kind = appointment.attendance_type.trim();
        let kind = if kind.is_empty() { UNSPECIFIED_TYPE } else { kind };
        by_type.entry(kind.to_string()).or_default().record(status);
    }

    tracing::debug!(
        total = appointments.len(),
        in_window = filtered.len(),
        months = by_month.len(),
        professionals = by_professional.len(),
        "aggregated attendance"
    );

    AttendanceSummary {
        counts,
        rates: counts.rates(),
        by_month: by_month
            .into_iter()
            .map(|(month, counts)| MonthlyAttendance {
                month,
                counts,
                rates: counts.rates(),
            })
            .collect(),
        by_professional: by_professional
            .into_iter()
            .map(|(professional_id, acc)| {
                let professional_name = match acc.name {
                    Some(name) => Some(name),
                    None if professional_id.is_empty() => Some(UNASSIGNED_PROFESSIONAL.to_string()),
                    None => None,
                };
                ProfessionalAttendance {
                    professional_id,
                    professional_name,
                    counts: acc.counts,
                    rates: acc.counts.rates(),
                }
            })
            .collect(),
        by_type: by_type
            .into_iter()
            .map(|(attendance_type, counts)| TypeAttendance {
                attendance_type,
                counts,
                rates: counts.rates(),
            })
            .collect(),
    }
}

/// In-window appointments, most recent first, capped at `limit`.
pub fn recent_appointments<'a>(
    appointments: &'a [Appointment],
    window: &DateWindow,
    limit: usize,
) -> Vec<&'a Appointment> {
    let mut filtered = filter_by_window(appointments, |appointment| appointment.date_time, window);
    filtered.sort_by(|a, b| b.date_time.cmp(&a.date_time));
    filtered.truncate(limit);
    filtered
}
