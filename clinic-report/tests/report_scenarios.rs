mod common;

use std::collections::BTreeMap;

use clinic_core::{
    Appointment, CalculatedRecord, DateWindow, GoalEntry, GoalEvolution, IndicatorValue,
    ReportConfig,
};
use clinic_report::{
    aggregate_attendance, aggregate_goal_evolution, aggregate_indicators, build_ai_context,
    summarize_report, NO_DATA_MARKER,
};
use common::{appointments, day, february, patient_report, read_fixture, window};

fn record(date: &str, indicators: &[(&str, f64)]) -> CalculatedRecord {
    CalculatedRecord {
        date: clinic_core::dates::parse_datetime(date),
        indicators: indicators
            .iter()
            .map(|(name, value)| (name.to_string(), IndicatorValue { value: *value }))
            .collect(),
    }
}

fn appointment(attended: Option<bool>) -> Appointment {
    Appointment {
        date_time: clinic_core::dates::parse_datetime("2024-02-10T10:00:00"),
        attended,
        attendance_type: "Psicologia".to_string(),
        professional_id: "prof-1".to_string(),
        professional_name: None,
    }
}

#[test]
fn indicators_outside_window_are_left_out() {
    let records = vec![
        record("2024-01-05", &[("Adesao", 80.0)]),
        record("2024-02-10", &[("Adesao", 90.0)]),
    ];

    let text = aggregate_indicators(&records, &window((2024, 2, 1), (2024, 2, 28)), 15);

    assert!(text.contains("Adesao: 90%"));
    assert!(!text.contains("Adesao: 80%"));
    assert!(text.contains("10/02/2024"));
}

#[test]
fn empty_indicator_window_states_absence() {
    let records = vec![record("2024-01-05", &[("Adesao", 80.0)])];
    let text = aggregate_indicators(&records, &february(), 15);
    assert_eq!(text.trim_end(), NO_DATA_MARKER);
}

#[test]
fn attendance_counts_every_status() {
    let appointments = vec![
        appointment(Some(true)),
        appointment(Some(false)),
        appointment(None),
        appointment(Some(true)),
    ];

    let summary = aggregate_attendance(&appointments, &DateWindow::unbounded());

    assert_eq!(summary.counts.present, 2);
    assert_eq!(summary.counts.absent, 1);
    assert_eq!(summary.counts.unknown, 1);
    assert_eq!(summary.rates.present, 50.0);
    assert_eq!(summary.rates.absent, 25.0);
}

#[test]
fn goal_without_entries_in_window_has_no_section() {
    let mut goals = BTreeMap::new();
    goals.insert(
        "g9".to_string(),
        GoalEvolution {
            goal_id: "g9".to_string(),
            goal_description: "Alimentação independente".to_string(),
            entries: vec![GoalEntry {
                date: clinic_core::dates::parse_datetime("2023-06-01"),
                computed_formulas: Vec::new(),
            }],
        },
    );

    let text = aggregate_goal_evolution(&goals, &february(), &ReportConfig::default());
    assert!(!text.contains("Alimentação independente"));
    assert_eq!(text.trim_end(), NO_DATA_MARKER);

    let marked = ReportConfig {
        mark_empty_goals: true,
        ..ReportConfig::default()
    };
    let text = aggregate_goal_evolution(&goals, &february(), &marked);
    assert_eq!(
        text.trim_end(),
        format!("Alimentação independente: {NO_DATA_MARKER}")
    );
}

#[test]
fn inverted_window_yields_no_matches() {
    let report = patient_report();
    let inverted = window((2024, 3, 10), (2024, 3, 1));

    let summary = summarize_report(&report, &appointments(), &inverted);
    assert!(summary.latest_indicators.is_empty());
    assert!(summary.goal_series.is_empty());
    assert_eq!(summary.attendance.counts.total, 0);
    assert_eq!(summary.attendance.rates.present, 0.0);

    let text = aggregate_indicators(&report.records, &inverted, 15);
    assert_eq!(text.trim_end(), NO_DATA_MARKER);
}

#[test]
fn february_context_matches_golden() {
    let context = build_ai_context(
        &patient_report(),
        &appointments(),
        &february(),
        &ReportConfig::default(),
    );
    let expected = read_fixture("february_context.txt");
    assert_eq!(context.trim_end(), expected.trim_end());
}

#[test]
fn kpis_ignore_the_window() {
    let context = build_ai_context(
        &patient_report(),
        &[],
        &window((2030, 1, 1), (2030, 1, 31)),
        &ReportConfig::default(),
    );

    assert!(context.contains("Pedidos: 65%"));
    assert!(context.contains("Encaixe: 55%"));
    assert!(!context.contains("Adesao"));
}

#[test]
fn context_lists_at_most_the_configured_appointments() {
    let appointments: Vec<Appointment> = (1..=20)
        .map(|d| Appointment {
            date_time: day(2024, 2, d).and_hms_opt(10, 0, 0),
            attended: Some(d % 2 == 0),
            attendance_type: "Psicologia".to_string(),
            professional_id: "prof-1".to_string(),
            professional_name: None,
        })
        .collect();

    let context = build_ai_context(
        &patient_report(),
        &appointments,
        &february(),
        &ReportConfig::default(),
    );

    let listed: Vec<&str> = context
        .lines()
        .filter(|line| line.contains("| Psicologia |"))
        .collect();
    assert_eq!(listed.len(), 10);
    assert!(listed[0].starts_with("- 20/02/2024"));
    assert!(context.contains("Total: 20 | Presenças: 10 (50%)"));
}

#[test]
fn summary_groups_attendance_by_month_and_professional() {
    let summary = summarize_report(&patient_report(), &appointments(), &DateWindow::unbounded());
    let attendance = &summary.attendance;

    let months: Vec<String> = attendance.by_month.iter().map(|m| m.month.to_string()).collect();
    assert_eq!(months, vec!["01/2024", "02/2024"]);
    assert_eq!(attendance.by_month[1].counts.total, 3);

    let lima = &attendance.by_professional[0];
    assert_eq!(lima.professional_id, "prof-1");
    assert_eq!(lima.display_name(), "Dra. Lima");
    assert_eq!(lima.counts.total, 3);
    assert_eq!(lima.rates.present, 66.7);

    let types: Vec<&str> = attendance
        .by_type
        .iter()
        .map(|t| t.attendance_type.as_str())
        .collect();
    assert_eq!(types, vec!["Fonoaudiologia", "Terapia ocupacional"]);
}

#[test]
fn summary_reports_latest_in_window_indicators() {
    let summary = summarize_report(&patient_report(), &[], &february());

    let latest: Vec<(&str, f64)> = summary
        .latest_indicators
        .iter()
        .map(|p| (p.name.as_str(), p.value))
        .collect();
    assert_eq!(latest, vec![("Adesao", 92.5), ("Autonomia", 70.0)]);

    let history_dates: Vec<_> = summary
        .indicator_history
        .iter()
        .filter_map(|p| p.date.map(|d| d.date()))
        .collect();
    assert_eq!(
        history_dates,
        vec![day(2024, 2, 10), day(2024, 2, 20), day(2024, 2, 20)]
    );

    assert_eq!(summary.goal_series.len(), 1);
    assert_eq!(summary.goal_series[0].goal_id, "g1");
    assert_eq!(summary.goal_series[0].points.len(), 2);
}

#[test]
fn blank_professional_name_falls_back_to_id() {
    let mut unnamed = appointment(Some(true));
    unnamed.professional_id = "prof-9".to_string();
    unnamed.professional_name = Some("  ".to_string());

    let context = build_ai_context(
        &patient_report(),
        &[unnamed],
        &february(),
        &ReportConfig::default(),
    );

    assert!(context.contains("| Psicologia | prof-9 | "));
}

#[test]
fn zero_indicator_limit_still_states_absence() {
    let records = vec![record("2024-02-10", &[("Adesao", 90.0)])];
    let text = aggregate_indicators(&records, &DateWindow::unbounded(), 0);
    assert_eq!(text.trim(), NO_DATA_MARKER);

    let config = ReportConfig {
        indicator_limit: 0,
        ..ReportConfig::default()
    };
    let context = build_ai_context(&patient_report(), &[], &february(), &config);
    let section = context
        .split("## Indicadores globais")
        .nth(1)
        .and_then(|rest| rest.split("## ").next())
        .unwrap_or_default();
    assert!(section.contains(NO_DATA_MARKER));
}

#[test]
fn undated_appointments_count_but_have_no_month() {
    let mut undated = appointment(Some(false));
    undated.date_time = None;
    let appointments = vec![appointment(Some(true)), undated];

    let summary = aggregate_attendance(&appointments, &DateWindow::unbounded());
    assert_eq!(summary.counts.total, 2);
    let monthly: u32 = summary.by_month.iter().map(|m| m.counts.total).sum();
    assert_eq!(monthly, 1);
    assert_eq!(summary.by_professional[0].counts.total, 2);

    let summary = aggregate_attendance(&appointments, &february());
    assert_eq!(summary.counts.total, 1);
}
