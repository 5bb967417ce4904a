//! Colorful console output for scheduling runs.
//!
//! Provides a custom `tracing` layer that formats orchestrator lifecycle
//! events and constraint diagnostics with colors.
//!
//! ## Log levels
//!
//! - **INFO/ERROR**: orchestrator state transitions (`init` through `done`)
//! - **DEBUG/WARN**: constraint-level diagnostics (skipped constraints,
//!   oversized windows, fairness early-exits)

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use shiftforge_core::{Schedule, SolveStatus};
use shiftforge_solver::ValidationReport;

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the scheduling console output.
///
/// Safe to call multiple times - only the first call has effect. Prints the
/// shiftforge banner and installs the [`SchedulerConsoleLayer`] on the
/// global `tracing` subscriber.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive("shiftforge_solver=info".parse().unwrap())
            .from_env_lossy()
            .add_directive("shiftforge_scoring=debug".parse().unwrap());

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SchedulerConsoleLayer)
            .try_init();
    });
}

// Marks the start of a run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since the run started.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    (now_nanos - start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____  _     _  __ _  __                        _____
/ ___|| |__ (_)/ _| |/ _| ___  _ __ __ _  ___  |  ___|__  _ __ __ _  ___
\___ \| '_ \| | |_| | |_ / _ \| '__/ _` |/ _ \ | |_ / _ \| '__/ _` |/ _ \
 ___) | | | | |  _| |  _| (_) | | | (_| |  __/ |  _| (_) | | | (_| |  __/
|____/|_| |_|_|_| |_|_|  \___/|_|  \__, |\___| |_|  \___/|_|  \__, |\___|
                                   |___/                      |___/
"#;

    let version_line = format!(
        "                       v{} - Constraint-Based Shift Scheduler\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats scheduling run events with colors.
pub struct SchedulerConsoleLayer;

impl<S: Subscriber> Layer<S> for SchedulerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("shiftforge_solver")
            && !target.starts_with("shiftforge_scoring")
            && !target.starts_with("shiftforge::")
        {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    state: Option<String>,
    status: Option<String>,
    issue_count: Option<u64>,
    time_limit_seconds: Option<u64>,
    wall_time_ms: Option<u64>,
    active_workers: Option<u64>,
    shift_type: Option<String>,
    window: Option<u64>,
    num_periods: Option<u64>,
    message: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "state" => self.state = Some(s.trim_matches('"').to_string()),
            "status" => self.status = Some(s.trim_matches('"').to_string()),
            "message" => self.message = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "issue_count" => self.issue_count = Some(value),
            "time_limit_seconds" => self.time_limit_seconds = Some(value),
            "wall_time_ms" => self.wall_time_ms = Some(value),
            "active_workers" => self.active_workers = Some(value),
            "window" => self.window = Some(value),
            "num_periods" => self.num_periods = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "state" => self.state = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "shift_type" => self.shift_type = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.state.as_deref() {
        Some("init") => format_init(),
        Some("pre_check") => format_pre_check(v, level),
        Some("build") => format_build(),
        Some("solve") => format_solve(v, level),
        Some("extract") => format_extract(),
        Some("done") => format_done(v),
        Some(_) | None => format_diagnostic(v, level),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_init() -> String {
    mark_run_start();
    format!(
        "{} {} starting scheduling run",
        format_elapsed(),
        "▶".bright_green().bold(),
    )
}

fn format_pre_check(v: &EventVisitor, level: Level) -> String {
    if level == Level::ERROR {
        let issues = v.issue_count.unwrap_or(0);
        return format!(
            "{} {} model is infeasible before solving │ {} fatal issue(s)",
            format_elapsed(),
            "✗".bright_red().bold(),
            issues.to_formatted_string(&Locale::en).bright_red(),
        );
    }
    format!(
        "{} {} running pre-solve feasibility checks",
        format_elapsed(),
        "▶".bright_blue(),
    )
}

fn format_build() -> String {
    format!(
        "{} {} building variables and constraints",
        format_elapsed(),
        "▶".bright_blue(),
    )
}

fn format_solve(v: &EventVisitor, level: Level) -> String {
    if let Some(wall_time) = v.wall_time_ms {
        let status = v.status.as_deref().unwrap_or("unknown");
        return format!(
            "{} {} solve finished │ {} │ {}",
            format_elapsed(),
            "■".bright_cyan().bold(),
            format_status(status),
            format_duration_ms(wall_time).yellow(),
        );
    }
    let _ = level;
    let time_limit = v.time_limit_seconds.unwrap_or(0);
    let mut output = format!(
        "{} {} solving",
        format_elapsed(),
        "▶".bright_green().bold(),
    );
    if time_limit > 0 {
        output.push_str(&format!(
            " │ {}s limit",
            time_limit.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }
    output
}

fn format_extract() -> String {
    format!(
        "{} {} extracting schedule",
        format_elapsed(),
        "▶".bright_blue(),
    )
}

fn format_done(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let is_ok = status == "Optimal" || status == "Feasible";

    let mut output = format!(
        "{} {} scheduling run complete │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_status(status),
    );

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    let status_text = if is_ok {
        "SCHEDULE PRODUCED"
    } else {
        "NO SCHEDULE PRODUCED"
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_colored = if is_ok {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.bright_red().bold().to_string()
    };
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_diagnostic(v: &EventVisitor, level: Level) -> String {
    let icon = if level == Level::WARN {
        "⚠".yellow().to_string()
    } else {
        "·".bright_black().to_string()
    };
    let message = v.message.as_deref().unwrap_or("constraint diagnostic");

    let mut parts = Vec::new();
    if let Some(shift_type) = &v.shift_type {
        parts.push(format!("shift '{}'", shift_type.bright_yellow()));
    }
    if let Some(window) = v.window {
        parts.push(format!(
            "window {}",
            window.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }
    if let Some(num_periods) = v.num_periods {
        parts.push(format!(
            "horizon {}",
            num_periods.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }
    if let Some(active_workers) = v.active_workers {
        parts.push(format!(
            "{} active worker(s)",
            active_workers.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    let detail = if parts.is_empty() {
        String::new()
    } else {
        format!(" │ {}", parts.join(" │ "))
    };

    format!(
        "{} {} {}{}",
        format_elapsed(),
        icon,
        message.bright_black(),
        detail
    )
}

fn format_status(status: &str) -> String {
    match status {
        "Optimal" => status.bright_green().bold().to_string(),
        "Feasible" => status.bright_green().to_string(),
        "Infeasible" => status.bright_red().bold().to_string(),
        _ => status.yellow().to_string(),
    }
}

/// Prints a colored summary box for a completed schedule, independent of
/// `tracing` - useful for a CLI's final report once a run has finished.
pub fn print_summary(schedule: &Schedule) {
    let status = match schedule.status {
        SolveStatus::Optimal => "Optimal",
        SolveStatus::Feasible => "Feasible",
        SolveStatus::Infeasible => "Infeasible",
        SolveStatus::Unknown => "Unknown",
        SolveStatus::PreSolveInfeasible => "PreSolveInfeasible",
    };

    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "{} schedule '{}' │ {} │ {}",
        "■".bright_cyan().bold(),
        schedule.schedule_id,
        format_status(status),
        format_duration_ms((schedule.solve_time_seconds * 1000.0) as u64).yellow(),
    );

    if let Some(objective) = schedule.objective_value {
        let _ = writeln!(stdout, "  objective: {}", format!("{objective:.1}").bright_yellow());
    }

    let mut stats: Vec<_> = schedule.statistics.values().collect();
    stats.sort_by(|a, b| b.weighted_penalty.partial_cmp(&a.weighted_penalty).unwrap());
    for stat in stats {
        if stat.active_violations == 0 {
            continue;
        }
        let _ = writeln!(
            stdout,
            "  {} │ {} violation(s) │ penalty {}",
            stat.constraint_name.white().bold(),
            stat.active_violations.to_formatted_string(&Locale::en).bright_yellow(),
            format!("{:.1}", stat.weighted_penalty).bright_red(),
        );
    }
    let _ = stdout.flush();
}

/// Prints a colored list of validation findings, or a single confirming
/// line when the report is clean.
pub fn print_validation(report: &ValidationReport) {
    let mut stdout = io::stdout().lock();
    if report.is_valid() {
        let _ = writeln!(stdout, "{} schedule is valid", "✓".bright_green().bold());
        return;
    }
    let _ = writeln!(
        stdout,
        "{} {} violation(s), {} warning(s)",
        "✗".bright_red().bold(),
        report.violations.len(),
        report.warnings.len()
    );
    for finding in &report.violations {
        let _ = writeln!(stdout, "  - {finding}");
    }
    for finding in &report.warnings {
        let _ = writeln!(stdout, "  - (warning) {finding}");
    }
    let _ = stdout.flush();
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sub_second_durations_in_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
    }

    #[test]
    fn formats_minute_scale_durations() {
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn lifecycle_events_dispatch_on_state_field() {
        let mut v = EventVisitor::default();
        v.state = Some("done".to_string());
        v.status = Some("Optimal".to_string());
        let output = format_event(&v, Level::INFO);
        assert!(output.contains("scheduling run complete"));
    }

    #[test]
    fn events_without_state_fall_back_to_diagnostic() {
        let mut v = EventVisitor::default();
        v.message = Some("frequency: no shift_type parameter configured, skipping".to_string());
        let output = format_event(&v, Level::DEBUG);
        assert!(output.contains("frequency"));
    }
}
