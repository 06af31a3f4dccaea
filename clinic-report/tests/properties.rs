use clinic_core::{Appointment, CalculatedRecord, DateWindow, IndicatorValue};
use clinic_report::format::NO_DATA_MARKER;
use clinic_report::{aggregate_attendance, aggregate_indicators};
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = Option<chrono::NaiveDateTime>> {
    proptest::option::weighted(
        0.9,
        (0i64..730).prop_map(|days| {
            chrono::NaiveDate::from_ymd_opt(2023, 1, 1)
                .and_then(|d| d.and_hms_opt(12, 0, 0))
                .map(|d| d + chrono::Duration::days(days))
                .expect("valid base date")
        }),
    )
}

fn arb_window() -> impl Strategy<Value = DateWindow> {
    let side = || {
        proptest::option::of((0i64..730).prop_map(|days| {
            chrono::NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid base date")
                + chrono::Duration::days(days)
        }))
    };
    (side(), side()).prop_map(|(start, end)| DateWindow::new(start, end))
}

fn arb_appointment() -> impl Strategy<Value = Appointment> {
    (arb_date(), proptest::option::of(any::<bool>()), 0u8..4).prop_map(
        |(date_time, attended, professional)| Appointment {
            date_time,
            attended,
            attendance_type: "Psicologia".to_string(),
            professional_id: format!("prof-{professional}"),
            professional_name: None,
        },
    )
}

fn arb_record() -> impl Strategy<Value = CalculatedRecord> {
    (arb_date(), 0.0f64..100.0).prop_map(|(date, value)| CalculatedRecord {
        date,
        indicators: [("Adesao".to_string(), IndicatorValue { value })]
            .into_iter()
            .collect(),
    })
}

proptest! {
    #[test]
    fn prop_attendance_rates_are_finite(
        appointments in proptest::collection::vec(arb_appointment(), 0..60),
        window in arb_window(),
    ) {
        let summary = aggregate_attendance(&appointments, &window);
        let mut all_rates = vec![summary.rates];
        all_rates.extend(summary.by_month.iter().map(|m| m.rates));
        all_rates.extend(summary.by_professional.iter().map(|p| p.rates));
        all_rates.extend(summary.by_type.iter().map(|t| t.rates));

        for rates in all_rates {
            for value in [rates.present, rates.absent, rates.unknown] {
                prop_assert!(value.is_finite());
                prop_assert!((0.0..=100.0).contains(&value));
            }
        }
        if summary.counts.total == 0 {
            prop_assert_eq!(summary.rates.present, 0.0);
        }
        prop_assert_eq!(
            summary.counts.total,
            summary.counts.present + summary.counts.absent + summary.counts.unknown
        );
    }

    #[test]
    fn prop_indicator_block_respects_limit(
        records in proptest::collection::vec(arb_record(), 0..80),
        limit in 0usize..20,
    ) {
        let text = aggregate_indicators(&records, &DateWindow::unbounded(), limit);
        let headers = text.lines().filter(|line| line.ends_with(':')).count();
        let readings = text.lines().filter(|line| line.starts_with("  Adesao:")).count();
        prop_assert!(headers <= limit);
        prop_assert!(readings <= limit);
        prop_assert!(!text.trim().is_empty());
        if headers == 0 {
            prop_assert_eq!(text.trim(), NO_DATA_MARKER);
        }
    }
}
