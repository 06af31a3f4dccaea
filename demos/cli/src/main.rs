use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use clinic_core::{Appointment, DateWindow, ReportConfig, ReportPayload};
use clinic_report::format::{format_numeric, format_window};
use clinic_report::{
    aggregate_goal_evolution, aggregate_indicators, build_ai_context, parse_answer_value,
    parse_appointments_str, parse_report_str, strip_markdown, summarize_report, AskRequest,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "clinic-cli",
    about = "Patient report summaries and assistant context from report JSON."
)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the context sent to the assistant
    Context(ReportArgs),
    /// Print indicators, goals and attendance for the window
    Summary(ReportArgs),
    /// Ask the assistant a question about the report
    Ask {
        #[command(flatten)]
        report: ReportArgs,
        /// Question-answering endpoint.
        #[arg(long)]
        endpoint: String,
        #[arg(short, long)]
        question: String,
        /// Request timeout in seconds.
        #[arg(long, default_value_t = 120)]
        timeout: u64,
    },
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Report payload JSON file.
    #[arg(short, long)]
    report: PathBuf,
    /// Appointments JSON file.
    #[arg(short, long)]
    appointments: Option<PathBuf>,
    /// First day of the window (YYYY-MM-DD).
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day of the window (YYYY-MM-DD).
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Ignore the window and use the whole history.
    #[arg(long, conflicts_with_all = ["start", "end"])]
    all: bool,
    /// TOML file overriding report settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of calculated records listed.
    #[arg(long)]
    indicator_limit: Option<usize>,
}

struct LoadedReport {
    report: ReportPayload,
    appointments: Vec<Appointment>,
    window: DateWindow,
    config: ReportConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Context(args) => {
            let loaded = load(&args)?;
            print!(
                "{}",
                build_ai_context(
                    &loaded.report,
                    &loaded.appointments,
                    &loaded.window,
                    &loaded.config
                )
            );
        }
        Command::Summary(args) => {
            let loaded = load(&args)?;
            print_summary(&loaded);
        }
        Command::Ask {
            report,
            endpoint,
            question,
            timeout,
        } => {
            let loaded = load(&report)?;
            let answer = ask(&loaded, &endpoint, &question, Duration::from_secs(timeout))?;
            println!("{answer}");
        }
    }

    Ok(())
}

fn load(args: &ReportArgs) -> anyhow::Result<LoadedReport> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => ReportConfig::default(),
    };
    if let Some(limit) = args.indicator_limit {
        config.indicator_limit = limit;
    }

    let data = std::fs::read_to_string(&args.report)
        .with_context(|| format!("Could not read report file {:?}", args.report))?;
    let report = parse_report_str(&data)
        .with_context(|| format!("Invalid report payload in {:?}", args.report))?;

    let appointments = match &args.appointments {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read appointments file {path:?}"))?;
            parse_appointments_str(&data)
                .with_context(|| format!("Invalid appointments in {path:?}"))?
        }
        None => Vec::new(),
    };

    let window = resolve_window(args, &config, Local::now().date_naive());
    if window.is_inverted() {
        tracing::warn!("start date is after end date, every section will be empty");
    }
    info!(
        window = %format_window(&window),
        records = report.records.len(),
        appointments = appointments.len(),
        "report loaded"
    );

    Ok(LoadedReport {
        report,
        appointments,
        window,
        config,
    })
}

fn read_config(path: &Path) -> anyhow::Result<ReportConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {path:?}"))?;
    let config: ReportConfig =
        toml::from_str(&text).with_context(|| format!("Invalid config file {path:?}"))?;
    debug!(?config, "loaded config");
    Ok(config)
}

fn resolve_window(args: &ReportArgs, config: &ReportConfig, today: NaiveDate) -> DateWindow {
    if args.all {
        return DateWindow::unbounded();
    }
    match (args.start, args.end) {
        (None, None) => DateWindow::last_days(today, config.default_window_days),
        (start, end) => DateWindow::new(start, end),
    }
}

fn print_summary(loaded: &LoadedReport) {
    let summary = summarize_report(&loaded.report, &loaded.appointments, &loaded.window);
    let attendance = &summary.attendance;

    println!("Window: {}", format_window(&loaded.window));
    println!();
    println!("Indicators");
    print!(
        "{}",
        aggregate_indicators(
            &loaded.report.records,
            &loaded.window,
            loaded.config.indicator_limit
        )
    );
    println!();
    println!("Goals");
    print!(
        "{}",
        aggregate_goal_evolution(&loaded.report.goal_evolution, &loaded.window, &loaded.config)
    );
    println!();
    println!(
        "Attendance: {} total, {} present ({}%), {} absent ({}%), {} unknown ({}%)",
        attendance.counts.total,
        attendance.counts.present,
        format_numeric(attendance.rates.present),
        attendance.counts.absent,
        format_numeric(attendance.rates.absent),
        attendance.counts.unknown,
        format_numeric(attendance.rates.unknown),
    );
    for month in &attendance.by_month {
        println!(
            "  {}: {}/{} present ({}%)",
            month.month,
            month.counts.present,
            month.counts.total,
            format_numeric(month.rates.present)
        );
    }
    for professional in &attendance.by_professional {
        println!(
            "  {}: {}/{} present ({}%)",
            professional.display_name(),
            professional.counts.present,
            professional.counts.total,
            format_numeric(professional.rates.present)
        );
    }
}

fn ask(
    loaded: &LoadedReport,
    endpoint: &str,
    question: &str,
    timeout: Duration,
) -> anyhow::Result<String> {
    let request = AskRequest::for_report(
        question,
        &loaded.report,
        &loaded.appointments,
        &loaded.window,
        &loaded.config,
    )
    .context("Question must not be empty")?;
    debug!(context_chars = request.context.len(), "sending question");

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("Could not build HTTP client")?;
    let response = client
        .post(endpoint)
        .json(&request)
        .send()
        .with_context(|| format!("Request to {endpoint} failed"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        bail!("Assistant returned {status}: {body}");
    }

    let reply: serde_json::Value = response
        .json()
        .context("Assistant reply is not valid JSON")?;
    let answer = parse_answer_value(&reply)?;
    Ok(strip_markdown(&answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(start: Option<NaiveDate>, end: Option<NaiveDate>, all: bool) -> ReportArgs {
        ReportArgs {
            report: PathBuf::from("report.json"),
            appointments: None,
            start,
            end,
            all,
            config: None,
            indicator_limit: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_window_spans_configured_days() {
        let config = ReportConfig::default();
        let window = resolve_window(&args(None, None, false), &config, day(2024, 3, 31));
        assert_eq!(window, DateWindow::new(Some(day(2024, 3, 1)), Some(day(2024, 3, 31))));
    }

    #[test]
    fn explicit_bounds_and_all_flag() {
        let config = ReportConfig::default();
        let window = resolve_window(&args(Some(day(2024, 1, 1)), None, false), &config, day(2024, 3, 31));
        assert_eq!(window, DateWindow::new(Some(day(2024, 1, 1)), None));

        let window = resolve_window(&args(None, None, true), &config, day(2024, 3, 31));
        assert!(window.is_unbounded());
    }

    #[test]
    fn partial_toml_config_keeps_defaults() {
        let config: ReportConfig = toml::from_str("indicator_limit = 5\n").unwrap();
        assert_eq!(config.indicator_limit, 5);
        assert_eq!(config.default_window_days, 30);
    }
}
