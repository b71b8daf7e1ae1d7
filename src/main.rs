//! Geo Gallery Sorter - sorts photos by capture date and place
//!
//! Moves each file of the input folder into a Year/Month/Location tree,
//! using EXIF dates, file timestamps and reverse geocoded GPS positions.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use geo_gallery_sorter::i18n::Strings;
use geo_gallery_sorter::{Cli, Config, ProcessingStatus, Processor, RunOutcome};
use std::path::{Path, PathBuf};
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI Output Module
mod cli_output {
    //! Colored, consistently formatted console output.

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    /// Print a separator line
    pub fn print_separator() {
        let _ = stdout().execute(Print(&format!("{}\n", "─".repeat(60))));
    }

    /// Print a success message
    pub fn print_success(msg: &str) {
        let _ = stdout().execute(Print(style("✓ ").with(CliTheme::SUCCESS).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print a warning message
    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print an error message
    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print a hint message
    pub fn print_hint(msg: &str) {
        let _ = stdout().execute(Print(style("→ ").with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print a key/value pair
    pub fn print_key_value(key: &str, value: &str, value_color: Option<Color>) {
        let key_styled = style(key).with(CliTheme::HINT);
        let value_styled = match value_color {
            Some(color) => style(value).with(color),
            None => style(value).bold(),
        };
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(key_styled));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(value_styled));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print a statistics line
    pub fn print_stat(key: &str, value: &str, color: Color) {
        print_key_value(key, value, Some(color));
    }

    /// Print one processed file
    pub fn print_result(status_icon: &str, status_color: Color, source: &str, dest_or_msg: &str) {
        let icon_styled = style(status_icon).with(status_color).bold();
        let source_styled = style(source).italic();
        let msg_styled = style(dest_or_msg).with(CliTheme::HINT);

        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(icon_styled));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(source_styled));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(msg_styled));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print the log file path
    pub fn print_log_path(label: &str, path: &str) {
        let _ = stdout().execute(Print("\n"));
        let _ = stdout().execute(Print(style("  📁 ").with(CliTheme::ACCENT)));
        let _ = stdout().execute(Print(style(format!("{} ", label)).with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", path)));
    }

    /// Print an empty line
    pub fn print_blank() {
        let _ = stdout().execute(Print("\n"));
    }
}

fn main() -> Result<()> {
    use cli_output::*;

    let cli = Cli::parse();

    if let Some(ref path) = cli.write_sample_config {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Config::sample_config())?;
        print_success(&format!(
            "{} {}",
            Strings::sample_config_written(),
            path.display()
        ));
        return Ok(());
    }

    // Log and Config directories live next to the executable
    let exe_dir = get_executable_dir()?;
    let log_path = get_log_path(&exe_dir, &cli);
    let _guard = setup_logging(&cli, &log_path)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Geo Gallery Sorter starting"
    );

    let config = load_config(&cli, &exe_dir)?;
    if config.verbose {
        info!(?config, "Configuration loaded");
    }
    info!(log_file = %log_path.display(), "Log file location");

    print_separator();
    print_hint(&format!(
        "{} '{}'",
        Strings::starting_sort(),
        config.input_dir.display()
    ));

    let dry_run = config.dry_run;
    let mut processor = Processor::new(config)?;

    match processor.run() {
        Ok(RunOutcome::InputCreated(input_dir)) => {
            print_error(&format!(
                "{} '{}'",
                Strings::input_dir_missing(),
                input_dir.display()
            ));
            print_hint(Strings::input_dir_created_hint());
            Ok(())
        }
        Ok(RunOutcome::Completed(results)) => {
            print_blank();
            if results.is_empty() {
                print_warning(Strings::no_files_found());
            }

            for result in &results {
                let source = result.source.display().to_string();
                let dest = result
                    .destination
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                match result.status {
                    ProcessingStatus::Moved => {
                        print_result("✓", CliTheme::SUCCESS, &source, &format!("→ {}", dest));
                    }
                    ProcessingStatus::DryRun => {
                        print_result("~", CliTheme::ACCENT, &source, &format!("→ {}", dest));
                    }
                    ProcessingStatus::Failed => {
                        let error_msg = result.error.as_deref().unwrap_or(Strings::unknown_error());
                        print_result("✗", CliTheme::ERROR, &source, error_msg);
                    }
                }
            }

            let stats = processor.stats();
            print_blank();
            print_separator();
            print_stat(
                Strings::stat_total_files(),
                &stats.total_files.to_string(),
                CliTheme::ACCENT,
            );
            if dry_run {
                print_stat(
                    Strings::stat_would_move(),
                    &stats.dry_run.to_string(),
                    CliTheme::ACCENT,
                );
            } else {
                print_stat(
                    Strings::stat_moved(),
                    &stats.moved.to_string(),
                    CliTheme::SUCCESS,
                );
            }
            print_stat(
                Strings::stat_failed(),
                &stats.failed.to_string(),
                CliTheme::ERROR,
            );
            print_stat(
                Strings::stat_geocoder_lookups(),
                &stats.geocode_lookups.to_string(),
                CliTheme::HINT,
            );
            print_stat(
                Strings::stat_cache_hits(),
                &stats.cache_hits.to_string(),
                CliTheme::HINT,
            );

            let failed: Vec<_> = results
                .iter()
                .filter(|r| r.status == ProcessingStatus::Failed)
                .collect();
            if !failed.is_empty() {
                print_separator();
                print_error(Strings::failed_files());
                for result in &failed {
                    print_key_value(
                        &result.source.display().to_string(),
                        result.error.as_deref().unwrap_or(Strings::unknown_error()),
                        Some(CliTheme::ERROR),
                    );
                }
            }

            print_separator();
            if dry_run {
                print_warning(Strings::dry_run_notice());
            } else {
                print_success(Strings::processing_complete());
            }
            print_log_path(Strings::log_saved_to(), &log_path.display().to_string());

            info!(log_file = %log_path.display(), "Processing complete. Log saved to");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Processing failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Get the directory where the executable is located
fn get_executable_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    Ok(exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Determine the log file path based on config file or timestamp
fn get_log_path(exe_dir: &Path, cli: &Cli) -> PathBuf {
    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| exe_dir.join("Log"));
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    match cli.config_name() {
        Some(config_name) => log_dir.join(format!("{}_{}.log", config_name, timestamp)),
        None => log_dir.join(format!("Sort_{}.log", timestamp)),
    }
}

/// Resolve a config argument to an existing file.
///
/// `trip` finds `trip`, `trip.toml`, or `<exe dir>/Config/trip.toml`, in that
/// order. When none exists the argument is returned as given so loading
/// reports the path the user typed.
fn resolve_config_path(exe_dir: &Path, config_path: &Path) -> PathBuf {
    let file_name = config_path.file_name().unwrap_or(config_path.as_os_str());
    [
        config_path.to_path_buf(),
        toml_default(config_path),
        toml_default(&exe_dir.join("Config").join(file_name)),
    ]
    .into_iter()
    .find(|candidate| candidate.exists())
    .unwrap_or_else(|| config_path.to_path_buf())
}

fn toml_default(path: &Path) -> PathBuf {
    match path.extension() {
        Some(_) => path.to_path_buf(),
        None => path.with_extension("toml"),
    }
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli, exe_dir: &Path) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        let resolved_path = resolve_config_path(exe_dir, config_path);
        info!(config_file = %resolved_path.display(), "Loading configuration from file");
        let file_config = Config::load_from_file(&resolved_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    Ok(config)
}

/// Log to a fresh file (plain or JSON lines) and mirror to stderr.
///
/// The returned guard flushes the file writer when dropped.
fn setup_logging(cli: &Cli, log_path: &Path) -> Result<WorkerGuard> {
    let default_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let (file_writer, guard) = tracing_appender::non_blocking(std::fs::File::create(log_path)?);

    let file_layer = if cli.json_log {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(file_writer)
            .boxed()
    } else {
        fmt::layer()
            .with_ansi(false)
            .with_writer(file_writer)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(guard)
}
