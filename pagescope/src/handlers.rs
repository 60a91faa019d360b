use clap::ArgMatches;
use colored::Colorize;
use pagescope_core::report::{ReportFormat, generate_report, save_report};
use pagescope_core::server::{ServeOptions, start};
use pagescope_scanner::AnalyzerConfig;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, debug};
use url::Url;

// Re-export analysis types and functions from pagescope-core
pub use pagescope_core::analyze::{
    AnalyzeOptions, AnalyzeProgressCallback, PageReport, execute_analysis, extract_host,
};

/// Load URLs from either a file or a single URL argument
pub fn load_urls_from_source(
    url: Option<&str>,
    hosts_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(hosts_file_path) = hosts_file {
        load_urls_from_file(hosts_file_path)
    } else if let Some(url) = url {
        Ok(vec![url.to_string()])
    } else {
        Err("Either --url or --hosts-file must be provided".to_string())
    }
}

/// Load and parse URLs from a file. Blank lines and `#` comments are skipped.
pub fn load_urls_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hosts file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(parse_url_line)
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as an http(s) URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    if let Ok(url) = Url::parse(line)
        && matches!(url.scheme(), "http" | "https")
    {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("{}  Skipping invalid URL '{}'", "⚠".yellow(), line);
    None
}

/// Build the engine configuration from the shared tuning flags
pub fn analyzer_config_from_args(args: &ArgMatches) -> AnalyzerConfig {
    let defaults = AnalyzerConfig::default();
    let seconds = |name: &str| args.get_one::<u64>(name).copied().map(Duration::from_secs);

    AnalyzerConfig {
        fetch_timeout: seconds("timeout").unwrap_or(defaults.fetch_timeout),
        probe_timeout: seconds("probe-timeout").unwrap_or(defaults.probe_timeout),
        probe_workers: args
            .get_one::<usize>("threads")
            .copied()
            .unwrap_or(defaults.probe_workers)
            .max(1),
        link_deadline: match seconds("deadline") {
            Some(d) if d.is_zero() => None,
            Some(d) => Some(d),
            None => defaults.link_deadline,
        },
        user_agent: defaults.user_agent,
    }
}

/// Expand `~` in a user-supplied output path
pub fn expand_output_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Install the stderr log subscriber. `--verbose` lowers the level to DEBUG.
pub fn init_logging(verbose: bool, baseline: Level) {
    let level = if verbose { Level::DEBUG } else { baseline };
    // A subscriber may already be installed when handlers run in-process more than once.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub async fn handle_analyze(sub_matches: &ArgMatches) {
    let quiet = sub_matches.get_flag("quiet");
    init_logging(sub_matches.get_flag("verbose"), Level::WARN);

    let url = sub_matches.get_one::<String>("url").map(String::as_str);
    let hosts_file = sub_matches.get_one::<PathBuf>("hosts-file");
    let format_name = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let output = sub_matches.get_one::<String>("output").map(|p| expand_output_path(p));

    let urls = match load_urls_from_source(url, hosts_file) {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let Some(format) = ReportFormat::from_str(format_name) else {
        eprintln!("{} Unknown report format '{}'", "✗".red().bold(), format_name);
        std::process::exit(1);
    };

    let config = analyzer_config_from_args(sub_matches);
    debug!("Analyzer configuration: {:?}", config);

    if !quiet {
        println!("\n{}  Analyzing {} page(s)", "→".blue().bold(), urls.len());
        println!("Probe workers: {}", config.probe_workers);
        println!("Fetch timeout: {}s", config.fetch_timeout.as_secs());
        match config.link_deadline {
            Some(deadline) => println!("Link deadline: {}s\n", deadline.as_secs()),
            None => println!("Link deadline: none\n"),
        }
    }

    let options = AnalyzeOptions {
        urls,
        config,
        show_progress_bars: !quiet,
    };

    let progress_callback: Option<AnalyzeProgressCallback> = if quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            println!("{}", msg);
        }))
    };

    let pages = match execute_analysis(options, progress_callback).await {
        Ok(pages) => pages,
        Err(e) => {
            eprintln!("{} Analysis failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let report = match generate_report(&pages, format) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} Failed to render report: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = save_report(&report, &path) {
                eprintln!(
                    "{} Failed to save report to {}: {}",
                    "✗".red().bold(),
                    path.display(),
                    e
                );
                std::process::exit(1);
            }
            if !quiet {
                println!(
                    "\n{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => {
            if !quiet {
                println!("\n{} Analysis complete!\n", "✓".green().bold());
            }
            print!("{}", report);
        }
    }

    if pages.iter().all(|page| !page.is_success()) {
        std::process::exit(2);
    }
}

pub async fn handle_serve(sub_matches: &ArgMatches) {
    init_logging(sub_matches.get_flag("verbose"), Level::INFO);

    let defaults = ServeOptions::default();
    let options = ServeOptions {
        host: sub_matches
            .get_one::<String>("host")
            .cloned()
            .unwrap_or(defaults.host),
        port: sub_matches
            .get_one::<u16>("port")
            .copied()
            .unwrap_or(defaults.port),
        allowed_origin: sub_matches
            .get_one::<String>("allow-origin")
            .cloned()
            .unwrap_or(defaults.allowed_origin),
        config: analyzer_config_from_args(sub_matches),
    };

    if !sub_matches.get_flag("quiet") {
        println!(
            "{} Serving on {}:{} (CORS origin {})",
            "→".blue().bold(),
            options.host,
            options.port,
            options.allowed_origin.bright_white()
        );
        println!("Press Ctrl-C to stop.\n");
    }

    if let Err(e) = start(options).await {
        eprintln!("{} Service failed: {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
