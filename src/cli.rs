//! CLI argument parsing with clap

use crate::config::{Config, MonthLanguage};
use clap::Parser;
use std::path::PathBuf;

/// Geo Gallery Sorter - sort photos by date and place
///
/// Moves every file in the input folder into
/// `<output>/<year>/<month>/<location>/<year>_<name>`, using the EXIF capture
/// date (or the file modification time) and the place name found for the
/// photo's GPS position.
#[derive(Parser, Debug)]
#[command(name = "geo-gallery-sorter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Folder with the photos to sort
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Root folder of the sorted tree
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Location folder for photos that cannot be placed
    #[arg(short = 'd', long)]
    pub default_location: Option<String>,

    /// Month folder naming
    #[arg(short = 'm', long, value_enum)]
    pub month_language: Option<MonthLanguage>,

    /// Nominatim reverse geocoding endpoint
    #[arg(long, env = "GEO_SORTER_GEOCODER_URL")]
    pub geocoder_url: Option<String>,

    /// Language for place names (e.g. "de", "en")
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Geocoding timeout in seconds
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Dry run mode - show what would be done without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,

    /// Folder for log files (default: "Log" next to the executable)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Write a commented sample configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    pub write_sample_config: Option<PathBuf>,
}

impl Cli {
    /// Get config file name (without extension) for log naming
    pub fn config_name(&self) -> Option<String> {
        self.config.as_ref().and_then(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref input) = self.input {
            config.input_dir = input.clone();
        }
        if let Some(ref output) = self.output {
            config.output_dir = output.clone();
        }
        if let Some(ref label) = self.default_location {
            config.default_location = label.clone();
        }
        if let Some(month_language) = self.month_language {
            config.month_language = month_language;
        }
        if let Some(ref url) = self.geocoder_url {
            config.geocoder.endpoint = url.clone();
        }
        if let Some(ref language) = self.language {
            config.geocoder.language = language.clone();
        }
        if let Some(timeout) = self.timeout {
            config.geocoder.timeout_secs = timeout;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}
