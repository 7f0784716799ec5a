//! Terminal display for the domain-sweep CLI.
//!
//! Progress bars and the header/summary lines all go to stderr so stdout
//! stays clean for `--json` and `--dry-run` output.

use console::{style, Term};
use domain_sweep_lib::{ProbeOutcome, RunConfig, ScanSummary, SweepObserver, WhoisRecord};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const SCAN_TEMPLATE: &str =
    "{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, eta {eta}) {msg}";
const WHOIS_TEMPLATE: &str = "{spinner:.cyan} [{elapsed_precise}] [{bar:40.green/white}] {pos}/{len} {msg}";

// ── Progress ─────────────────────────────────────────────────────────────────

/// Draws one bar for the DNS scan and one for WHOIS enrichment.
///
/// When disabled every bar is hidden, so the hooks stay cheap no-ops.
pub struct ProgressReporter {
    enabled: bool,
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    /// Bars are shown only if `enabled` and stderr is a terminal.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: enabled && Term::stderr().is_term(),
            current: Mutex::new(None),
        }
    }

    fn start_bar(&self, total: usize, template: &str, message: &str) {
        let bar = if self.enabled {
            ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr())
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░ "),
        );
        bar.set_message(message.to_string());
        if self.enabled {
            bar.enable_steady_tick(Duration::from_millis(100));
        }

        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(current) = self.current.lock() {
            if let Some(bar) = current.as_ref() {
                f(bar);
            }
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(bar) = current.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl SweepObserver for ProgressReporter {
    fn scan_started(&self, total: usize) {
        self.start_bar(total, SCAN_TEMPLATE, "probing NS records");
    }

    fn probe_completed(&self, outcome: &ProbeOutcome) {
        self.with_bar(|bar| {
            bar.inc(1);
            if outcome.available {
                bar.set_message(format!("last available: {}", outcome.domain));
            }
        });
    }

    fn scan_finished(&self, _summary: &ScanSummary) {
        self.finish_bar();
    }

    fn whois_started(&self, total: usize) {
        self.start_bar(total, WHOIS_TEMPLATE, "WHOIS");
    }

    fn whois_completed(&self, record: &WhoisRecord) {
        self.with_bar(|bar| {
            bar.inc(1);
            bar.set_message(record.domain.to_string());
        });
    }

    fn whois_finished(&self) {
        self.finish_bar();
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a run.
pub fn print_header(candidates: usize, config: &RunConfig) {
    eprintln!(
        "{} {} {}",
        style("domain-sweep").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "· Sweeping {} candidate{}",
            candidates,
            if candidates == 1 { "" } else { "s" }
        ))
        .dim(),
    );

    let nameservers: Vec<String> = config.nameservers.iter().map(|ns| ns.to_string()).collect();
    let meta_parts = [
        format!("TLDs: {}", config.tlds.join(" ")),
        format!("Lengths: {}-{}", config.min_len, config.max_len),
        format!("Concurrency: {}", config.concurrency),
        format!("DNS: {}", nameservers.join(", ")),
    ];
    eprintln!("{}", style(meta_parts.join(" | ")).dim());
    eprintln!();
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Format the one-line run summary without styling.
pub fn summary_line(summary: &ScanSummary) -> String {
    format!(
        "{} domain{} in {:.1}s | {} available | {} registered",
        summary.processed,
        if summary.processed == 1 { "" } else { "s" },
        summary.elapsed.as_secs_f64(),
        summary.available_count(),
        summary.registered_count(),
    )
}

/// Print the styled run summary.
pub fn print_summary(summary: &ScanSummary, whois_failures: usize) {
    if console::colors_enabled_stderr() {
        eprintln!(
            "  {}",
            style("────────────────────────────────────────────────────").dim()
        );
        eprintln!(
            "  {} domain{} in {:.1}s  {}  {}  {}  {}",
            style(summary.processed).bold(),
            if summary.processed == 1 { "" } else { "s" },
            summary.elapsed.as_secs_f64(),
            style("|").dim(),
            style(format!("{} available", summary.available_count())).green(),
            style("|").dim(),
            style(format!("{} registered", summary.registered_count())).red(),
        );
    } else {
        // Plain line for logs and pipes
        eprintln!("{}", summary_line(summary));
    }
    if whois_failures > 0 {
        eprintln!(
            "  {}",
            style(format!(
                "{} WHOIS lookup{} failed (see --json for details)",
                whois_failures,
                if whois_failures == 1 { "" } else { "s" }
            ))
            .yellow()
        );
    }
}
