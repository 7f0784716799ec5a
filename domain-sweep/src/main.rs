//! Domain Sweep CLI Application
//!
//! A command-line interface that enumerates every short name over an alphabet,
//! probes each one with a DNS NS query, and writes the names nobody has
//! registered. This CLI application is a thin shell around domain-sweep-lib.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use console::style;
use domain_sweep_lib::{
    enumerate_candidates, is_whois_available, parse_duration, parse_nameservers, write_available,
    ConfigManager, DomainSweeper, FileConfig, RunConfig,
};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-sweep
#[derive(Parser, Debug)]
#[command(name = "domain-sweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sweep a short-name space for unregistered domains via DNS NS queries")]
#[command(
    long_about = "Enumerate every name over an alphabet within a length range, across a set of TLDs, and probe each with a DNS NS query.\n\nNames that get an NXDOMAIN or empty answer are written to the output file, then looked up with WHOIS one at a time."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// TLD suffixes to sweep, e.g. `.com .net` or `.com,.net` (required unless set in the config file)
    #[arg(short = 't', long = "tlds", value_name = "TLD", num_args = 1.., value_delimiter = ',', help_heading = "Search Space")]
    pub tlds: Option<Vec<String>>,

    /// Alphabet to build names from (required unless set in the config file)
    #[arg(
        short = 'c',
        long = "chars",
        value_name = "CHARS",
        help_heading = "Search Space"
    )]
    pub chars: Option<String>,

    /// Minimum name length (default: 3)
    #[arg(long = "min-len", value_name = "N", help_heading = "Search Space")]
    pub min_len: Option<usize>,

    /// Maximum name length (default: 3)
    #[arg(long = "max-len", value_name = "N", help_heading = "Search Space")]
    pub max_len: Option<usize>,

    /// Print the candidate list and count without any network access
    #[arg(long = "dry-run", help_heading = "Search Space")]
    pub dry_run: bool,

    /// Max DNS queries in flight (default: 500)
    #[arg(
        short = 'C',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub concurrency: Option<usize>,

    /// Upstream nameservers, IP or IP:port, space or comma separated (default: 1.1.1.1:53)
    #[arg(long = "dns", value_name = "ADDR", num_args = 0.., value_delimiter = ',', help_heading = "Protocol")]
    pub dns: Option<Vec<String>>,

    /// Per-query DNS timeout, e.g. 500ms, 5s
    #[arg(long = "dns-timeout", value_name = "DUR", help_heading = "Protocol")]
    pub dns_timeout: Option<String>,

    /// Per-lookup WHOIS timeout, e.g. 30s
    #[arg(long = "whois-timeout", value_name = "DUR", help_heading = "Protocol")]
    pub whois_timeout: Option<String>,

    /// Skip WHOIS lookups for available domains
    #[arg(long = "no-whois", help_heading = "Protocol")]
    pub no_whois: bool,

    /// File to write available domains to (default: available.txt)
    #[arg(short = 'o', long = "out", value_name = "FILE", help_heading = "Output")]
    pub out: Option<PathBuf>,

    /// Print the full report, including WHOIS detail, as JSON on stdout
    #[arg(short = 'j', long = "json", help_heading = "Output")]
    pub json: bool,

    /// Hide progress bars, header and summary
    #[arg(short = 'q', long = "quiet", help_heading = "Output")]
    pub quiet: bool,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show debug-level log output
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    init_logging(&args);

    if let Err(e) = run_sweep(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Validate command line arguments that can be checked without a config file
fn validate_args(args: &Args) -> Result<(), String> {
    if args.concurrency == Some(0) {
        return Err("Concurrency must be at least 1".to_string());
    }

    if args.min_len == Some(0) {
        return Err("--min-len must be at least 1".to_string());
    }

    if let (Some(min_len), Some(max_len)) = (args.min_len, args.max_len) {
        if min_len > max_len {
            return Err(format!(
                "--min-len ({}) cannot be greater than --max-len ({})",
                min_len, max_len
            ));
        }
    }

    if let Some(chars) = &args.chars {
        if chars.is_empty() {
            return Err("--chars cannot be empty".to_string());
        }
    }

    for (flag, value) in [
        ("--dns-timeout", &args.dns_timeout),
        ("--whois-timeout", &args.whois_timeout),
    ] {
        if let Some(value) = value {
            if parse_duration(value).is_none() {
                return Err(format!(
                    "Invalid {} '{}'. Use format like '500ms', '5s', '2m'",
                    flag, value
                ));
            }
        }
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` wins when set.
fn init_logging(args: &Args) {
    let level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,domain_sweep={level},domain_sweep_lib={level}",
            level = level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(args.debug)
        .init();
}

async fn run_sweep(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args)?;

    if args.dry_run {
        return print_candidates(&config, args.json);
    }

    let sweeper = DomainSweeper::new(config)?;
    let show_progress = !args.quiet && !args.json;

    if sweeper.config().whois_enabled && !is_whois_available().await {
        tracing::warn!("`whois` command not found, use --no-whois to skip enrichment");
    }

    if show_progress {
        ui::print_header(sweeper.candidate_count(), sweeper.config());
    }

    let reporter = ui::ProgressReporter::new(show_progress);
    let report = sweeper.run(&reporter).await;

    write_available(&sweeper.config().output_path, report.available_domains())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if !args.quiet {
        let whois_failures = report.whois.iter().filter(|r| !r.succeeded).count();
        ui::print_summary(&report.scan, whois_failures);
        eprintln!(
            "  {}",
            style(format!(
                "Wrote {} domain{} to {}",
                report.scan.available_count(),
                if report.scan.available_count() == 1 { "" } else { "s" },
                sweeper.config().output_path.display()
            ))
            .dim()
        );
    }

    Ok(())
}

/// Print every candidate on stdout and the count on stderr.
fn print_candidates(config: &RunConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let candidates = enumerate_candidates(config)?;
    let total = candidates.len();

    if json {
        let names: Vec<_> = candidates.collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for domain in candidates {
            writeln!(out, "{}", domain)?;
        }
        out.flush()?;
    }

    eprintln!("{} domains would be checked", total);
    Ok(())
}

/// Build the run configuration: defaults, then config file, then CLI flags.
fn build_config(args: &Args) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let config_manager = ConfigManager::new();

    let file_config = if let Some(explicit_config_path) = &args.config {
        tracing::info!(path = %explicit_config_path, "using explicit config file");
        config_manager
            .load_file(explicit_config_path)
            .map_err(|e| {
                format!(
                    "Failed to load config file '{}': {}",
                    explicit_config_path, e
                )
            })?
    } else {
        config_manager.discover_and_load()?
    };

    let config = merge_file_config_into_run_config(RunConfig::default(), &file_config)?;
    let config = apply_cli_args_to_config(config, args)?;

    if config.alphabet.is_empty() {
        return Err("No alphabet given. Use -c/--chars or set 'chars' in the config file".into());
    }
    if config.tlds.is_empty() {
        return Err("No TLDs given. Use -t/--tlds or set 'tlds' in the config file".into());
    }

    Ok(config)
}

/// Merge FileConfig into RunConfig
fn merge_file_config_into_run_config(
    config: RunConfig,
    file_config: &FileConfig,
) -> Result<RunConfig, Box<dyn std::error::Error>> {
    match &file_config.defaults {
        Some(defaults) => Ok(defaults.apply_to(config)?),
        None => Ok(config),
    }
}

/// Apply CLI arguments to config (highest precedence)
fn apply_cli_args_to_config(
    mut config: RunConfig,
    args: &Args,
) -> Result<RunConfig, Box<dyn std::error::Error>> {
    if let Some(chars) = &args.chars {
        config = config.with_alphabet(chars);
    }
    if let Some(tlds) = &args.tlds {
        config = config.with_tlds(tlds);
    }
    if let Some(min_len) = args.min_len {
        config.min_len = min_len;
    }
    if let Some(max_len) = args.max_len {
        config.max_len = max_len;
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(dns) = &args.dns {
        config = config.with_nameservers(parse_nameservers(dns)?);
    }
    if let Some(out) = &args.out {
        config = config.with_output_path(out.clone());
    }
    if let Some(timeout) = &args.dns_timeout {
        config = config.with_dns_timeout(parse_duration(timeout));
    }
    if let Some(timeout) = &args.whois_timeout {
        config = config.with_whois_timeout(parse_duration(timeout));
    }
    if args.no_whois {
        config = config.with_whois(false);
    }
    Ok(config)
}
