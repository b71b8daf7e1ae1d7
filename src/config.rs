//! Configuration types for the gallery sorter

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Month names used for the month folder level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MonthLanguage {
    /// 01_January .. 12_December
    #[default]
    English,
    /// 01_Januar .. 12_Dezember
    German,
}

const ENGLISH_MONTHS: [&str; 12] = [
    "01_January",
    "02_February",
    "03_March",
    "04_April",
    "05_May",
    "06_June",
    "07_July",
    "08_August",
    "09_September",
    "10_October",
    "11_November",
    "12_December",
];

const GERMAN_MONTHS: [&str; 12] = [
    "01_Januar",
    "02_Februar",
    "03_Maerz",
    "04_April",
    "05_Mai",
    "06_Juni",
    "07_Juli",
    "08_August",
    "09_September",
    "10_Oktober",
    "11_November",
    "12_Dezember",
];

impl MonthLanguage {
    /// Folder name for a month number; out-of-range months render as two digits
    pub fn label(&self, month: u32) -> String {
        let table = match self {
            MonthLanguage::English => &ENGLISH_MONTHS,
            MonthLanguage::German => &GERMAN_MONTHS,
        };
        match month {
            1..=12 => table[(month - 1) as usize].to_string(),
            _ => format!("{:02}", month),
        }
    }
}

/// Reverse geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Nominatim `/reverse` endpoint
    pub endpoint: String,

    /// Preferred language for returned address fields
    pub language: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header; Nominatim rejects anonymous clients
    pub user_agent: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/reverse".into(),
            language: "de".into(),
            timeout_secs: 10,
            user_agent: concat!("geo-gallery-sorter/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

/// Configuration for the gallery sorter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned (non-recursively) for images
    pub input_dir: PathBuf,

    /// Root of the Year/Month/Location tree
    pub output_dir: PathBuf,

    /// Location folder used when a photo cannot be placed
    pub default_location: String,

    /// Month folder naming
    pub month_language: MonthLanguage,

    /// Reverse geocoding service
    pub geocoder: GeocoderConfig,

    /// Dry run mode - don't actually move files
    pub dry_run: bool,

    /// Verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input_Image"),
            output_dir: PathBuf::from("Bilder_Sortiert"),
            default_location: "Unknown_Location".into(),
            month_language: MonthLanguage::default(),
            geocoder: GeocoderConfig::default(),
            dry_run: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Month folder name for a month number
    pub fn month_label(&self, month: u32) -> String {
        self.month_language.label(month)
    }

    /// Check settings that would produce a broken output tree
    pub fn validate(&self) -> Result<(), ConfigError> {
        let label = self.default_location.trim();
        if label.is_empty() {
            return Err(ConfigError::Invalid(
                "default_location must not be empty".into(),
            ));
        }
        if label.contains(['/', '\\']) || label == "." || label == ".." {
            return Err(ConfigError::Invalid(format!(
                "default_location '{}' must be a single folder name",
                self.default_location
            )));
        }
        if self.geocoder.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "geocoder.timeout_secs must be greater than 0".into(),
            ));
        }
        if lexical(&self.output_dir).starts_with(lexical(&self.input_dir)) {
            return Err(ConfigError::Invalid(format!(
                "output_dir '{}' must not be inside input_dir '{}'",
                self.output_dir.display(),
                self.input_dir.display()
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            source: e,
        })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Geo Gallery Sorter Configuration File
# This file uses TOML format (https://toml.io)

# Folder with the photos to sort (only files directly inside are processed)
input_dir = "input_Image"

# Root of the sorted tree: <output_dir>/<year>/<month>/<location>/<year>_<name>
output_dir = "Bilder_Sortiert"

# Location folder for photos without GPS data or when lookup fails
default_location = "Unknown_Location"

# Month folder names: "english" (01_January) or "german" (01_Januar)
month_language = "english"

# Dry run mode - show what would be done without moving anything
dry_run = false

# Verbose output - show detailed processing information
verbose = false

[geocoder]
# OpenStreetMap Nominatim reverse endpoint
endpoint = "https://nominatim.openstreetmap.org/reverse"

# Language for place names
language = "de"

# Seconds to wait for each lookup
timeout_secs = 10

# Identify yourself, see https://operations.osmfoundation.org/policies/nominatim/
user_agent = "geo-gallery-sorter"
"#
        .to_string()
    }
}

/// Path without `.` components, for comparing paths that may not exist yet
fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError {
        source: toml::ser::Error,
    },
    /// Settings that cannot produce a valid output tree
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
            ConfigError::Invalid(message) => write!(f, "Invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_month_labels() {
        assert_eq!(MonthLanguage::English.label(1), "01_January");
        assert_eq!(MonthLanguage::English.label(12), "12_December");
        assert_eq!(MonthLanguage::German.label(3), "03_Maerz");
        assert_eq!(MonthLanguage::German.label(10), "10_Oktober");
        assert_eq!(MonthLanguage::English.label(0), "00");
        assert_eq!(MonthLanguage::German.label(13), "13");
    }

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(&Config::sample_config()).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("input_Image"));
        assert_eq!(config.default_location, "Unknown_Location");
        assert_eq!(config.month_language, MonthLanguage::English);
        assert_eq!(config.geocoder.language, "de");
        assert_eq!(config.geocoder.timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            output_dir = "Sorted"
            month_language = "german"

            [geocoder]
            timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("Sorted"));
        assert_eq!(config.input_dir, PathBuf::from("input_Image"));
        assert_eq!(config.month_label(5), "05_Mai");
        assert_eq!(config.geocoder.timeout_secs, 3);
        assert_eq!(config.geocoder.language, "de");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Config").join("trip.toml");

        let config = Config {
            default_location: "Unbekannter_Ort".into(),
            month_language: MonthLanguage::German,
            ..Config::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.default_location, "Unbekannter_Ort");
        assert_eq!(loaded.month_language, MonthLanguage::German);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load_from_file(dir.path().join("missing.toml")),
            Err(ConfigError::ReadError { .. })
        ));

        let path = dir.path().join("broken.toml");
        fs::write(&path, "month_language = 7").unwrap();
        assert!(matches!(
            Config::load_from_file(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.default_location = "  ".into();
        assert!(config.validate().is_err());

        config.default_location = "a/b".into();
        assert!(config.validate().is_err());

        config.default_location = "Unknown".into();
        config.geocoder.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.geocoder.timeout_secs = 5;
        config.output_dir = config.input_dir.clone();
        assert!(config.validate().is_err());

        config.input_dir = PathBuf::from("photos");
        config.output_dir = PathBuf::from("./photos/sorted");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.output_dir = PathBuf::from("photos_sorted");
        assert!(config.validate().is_ok());

        config.output_dir = PathBuf::from("../photos");
        assert!(config.validate().is_ok());
    }
}
