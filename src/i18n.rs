//! Internationalization (i18n) module
//!
//! Provides language detection and localized strings for the CLI interface.
//! Supports English and German.
//! Note: Log messages remain in English for consistency.

use std::sync::OnceLock;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    German,
}

/// Global language instance
static LANGUAGE: OnceLock<Language> = OnceLock::new();

/// Initialize and get the current language based on system locale
pub fn get_language() -> Language {
    *LANGUAGE.get_or_init(detect_language)
}

/// Detect system language from environment variables
fn detect_language() -> Language {
    let locale = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_MESSAGES"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default();

    language_from_locale(&locale)
}

fn language_from_locale(locale: &str) -> Language {
    let locale = locale.to_lowercase();
    if locale.starts_with("de") || locale.contains("german") {
        Language::German
    } else {
        Language::English
    }
}

/// Localized strings for the CLI interface
pub struct Strings;

impl Strings {
    pub fn starting_sort() -> &'static str {
        match get_language() {
            Language::English => "Sorting images in folder:",
            Language::German => "Starte Sortierung für Bilder im Ordner:",
        }
    }

    pub fn input_dir_missing() -> &'static str {
        match get_language() {
            Language::English => "Input folder not found:",
            Language::German => "Der Eingabeordner wurde nicht gefunden:",
        }
    }

    pub fn input_dir_created_hint() -> &'static str {
        match get_language() {
            Language::English => "An empty folder has been created. Please add your images to it.",
            Language::German => "Ein leerer Ordner wurde erstellt. Bitte füge deine Bilder hinzu.",
        }
    }

    pub fn no_files_found() -> &'static str {
        match get_language() {
            Language::English => "No files found in the input folder.",
            Language::German => "Keine Dateien im Eingabeordner gefunden.",
        }
    }

    pub fn processing_complete() -> &'static str {
        match get_language() {
            Language::English => "Sorting completed successfully.",
            Language::German => "Sortierung erfolgreich abgeschlossen.",
        }
    }

    pub fn stat_total_files() -> &'static str {
        match get_language() {
            Language::English => "Total files",
            Language::German => "Dateien gesamt",
        }
    }

    pub fn stat_moved() -> &'static str {
        match get_language() {
            Language::English => "Moved",
            Language::German => "Verschoben",
        }
    }

    pub fn stat_failed() -> &'static str {
        match get_language() {
            Language::English => "Failed",
            Language::German => "Fehlgeschlagen",
        }
    }

    pub fn stat_would_move() -> &'static str {
        match get_language() {
            Language::English => "Would move",
            Language::German => "Würde verschieben",
        }
    }

    pub fn stat_geocoder_lookups() -> &'static str {
        match get_language() {
            Language::English => "Geocoder lookups",
            Language::German => "Ortsabfragen",
        }
    }

    pub fn stat_cache_hits() -> &'static str {
        match get_language() {
            Language::English => "Cache hits",
            Language::German => "Cache-Treffer",
        }
    }

    pub fn failed_files() -> &'static str {
        match get_language() {
            Language::English => "Failed files:",
            Language::German => "Fehlgeschlagene Dateien:",
        }
    }

    pub fn dry_run_notice() -> &'static str {
        match get_language() {
            Language::English => "Dry run: no files were moved.",
            Language::German => "Testlauf: es wurden keine Dateien verschoben.",
        }
    }

    pub fn log_saved_to() -> &'static str {
        match get_language() {
            Language::English => "Log file:",
            Language::German => "Logdatei:",
        }
    }

    pub fn sample_config_written() -> &'static str {
        match get_language() {
            Language::English => "Sample configuration written to",
            Language::German => "Beispielkonfiguration gespeichert unter",
        }
    }

    pub fn unknown_error() -> &'static str {
        match get_language() {
            Language::English => "Unknown error",
            Language::German => "Unbekannter Fehler",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_locale() {
        assert_eq!(language_from_locale("de_DE.UTF-8"), Language::German);
        assert_eq!(language_from_locale("de_AT"), Language::German);
        assert_eq!(language_from_locale("en_US.UTF-8"), Language::English);
        assert_eq!(language_from_locale("C"), Language::English);
        assert_eq!(language_from_locale(""), Language::English);
    }

    #[test]
    fn test_strings_exist() {
        // Ensure all string functions return non-empty strings
        assert!(!Strings::starting_sort().is_empty());
        assert!(!Strings::processing_complete().is_empty());
        assert!(!Strings::input_dir_created_hint().is_empty());
    }
}
