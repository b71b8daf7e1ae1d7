//! Batch processor
//!
//! Handles the core logic of:
//! - Scanning the input directory (files directly inside it only)
//! - Resolving capture date and location per file
//! - Moving each file into `<output>/<year>/<month>/<location>/<year>_<name>`

use crate::config::Config;
use crate::error::{Error, Result};
use crate::location::{
    LocationCache, LocationOutcome, LocationResolver, NominatimGeocoder, ReverseGeocoder,
};
use crate::time::{CaptureDate, resolve_date};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, error, info, span, warn};
use walkdir::WalkDir;

/// Result of processing a single file
#[derive(Debug, Clone)]
pub struct FileResult {
    /// Source file path
    pub source: PathBuf,
    /// Destination file path (once it could be built)
    pub destination: Option<PathBuf>,
    /// Resolved year and month
    pub date: Option<CaptureDate>,
    /// Location resolution outcome
    pub location: Option<LocationOutcome>,
    /// Processing status
    pub status: ProcessingStatus,
    /// Error message (if failed)
    pub error: Option<String>,
}

/// Status of file processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    /// File was moved into the sorted tree
    Moved,
    /// Dry run - would have moved
    DryRun,
    /// Processing failed, file left in place
    Failed,
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The input directory was missing and has been created empty
    InputCreated(PathBuf),
    /// Every file in the input directory was attempted
    Completed(Vec<FileResult>),
}

/// Processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total_files: usize,
    pub moved: usize,
    pub dry_run: usize,
    pub failed: usize,
    /// Requests sent to the geocoder
    pub geocode_lookups: usize,
    /// Locations answered from the run's cache
    pub cache_hits: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, result: &FileResult) {
        match result.status {
            ProcessingStatus::Moved => self.moved += 1,
            ProcessingStatus::DryRun => self.dry_run += 1,
            ProcessingStatus::Failed => self.failed += 1,
        }
        match result.location {
            Some(LocationOutcome::Resolved {
                from_cache: true, ..
            }) => self.cache_hits += 1,
            Some(LocationOutcome::NoGpsData) | None => {}
            Some(_) => self.geocode_lookups += 1,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Total: {}, Moved: {}, Dry run: {}, Failed: {}, Geocoder lookups: {}, Cache hits: {}",
            self.total_files,
            self.moved,
            self.dry_run,
            self.failed,
            self.geocode_lookups,
            self.cache_hits
        )
    }
}

/// Sorts the input directory into the output tree
pub struct Processor {
    config: Config,
    resolver: LocationResolver,
    stats: ProcessingStats,
}

impl Processor {
    /// Create a processor that geocodes through Nominatim
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let geocoder = NominatimGeocoder::new(&config.geocoder);
        Ok(Self::with_geocoder(config, Box::new(geocoder)))
    }

    /// Create a processor with a specific geocoder
    pub fn with_geocoder(config: Config, geocoder: Box<dyn ReverseGeocoder>) -> Self {
        Self {
            config,
            resolver: LocationResolver::new(geocoder),
            stats: ProcessingStats::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Statistics of the last run
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Run the processing pipeline
    pub fn run(&mut self) -> Result<RunOutcome> {
        let _span = span!(Level::INFO, "processor_run").entered();
        self.stats = ProcessingStats::new();

        let input_dir = &self.config.input_dir;
        if !input_dir.is_dir() {
            warn!(input = %input_dir.display(), "Input directory not found, creating it");
            fs::create_dir_all(input_dir)?;
            return Ok(RunOutcome::InputCreated(input_dir.clone()));
        }

        if !self.config.dry_run {
            fs::create_dir_all(&self.config.output_dir)?;
        }

        info!(input = %input_dir.display(), "Scanning input directory...");
        let files = self.collect_files()?;
        info!(count = files.len(), "Found files");
        self.stats.total_files = files.len();

        // One cache per run
        let mut cache = LocationCache::new();
        let mut results = Vec::with_capacity(files.len());

        for path in &files {
            let result = self.process_single_file(path, &mut cache);
            self.stats.record(&result);
            results.push(result);
        }

        info!(
            cached_locations = cache.len(),
            "Sorting finished. {}",
            self.stats.summary()
        );

        Ok(RunOutcome::Completed(results))
    }

    /// Regular files directly inside the input directory, sorted by name
    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.config.input_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            } else {
                debug!(path = %entry.path().display(), "Skipping non-file entry");
            }
        }

        Ok(files)
    }

    fn process_single_file(&self, source: &Path, cache: &mut LocationCache) -> FileResult {
        let _file_span = span!(Level::DEBUG, "process_file", ?source).entered();

        let mut result = FileResult {
            source: source.to_path_buf(),
            destination: None,
            date: None,
            location: None,
            status: ProcessingStatus::Failed,
            error: None,
        };

        match self.sort_file(source, cache, &mut result) {
            Ok(status) => result.status = status,
            Err(e) => {
                error!(source = %source.display(), error = %e, "Failed to process file");
                result.error = Some(e.to_string());
            }
        }

        result
    }

    fn sort_file(
        &self,
        source: &Path,
        cache: &mut LocationCache,
        result: &mut FileResult,
    ) -> Result<ProcessingStatus> {
        let date = resolve_date(source)?;
        result.date = Some(date);
        let month_label = self.config.month_label(date.month);

        let location = self.resolver.resolve(source, cache);
        let location_label = location.label(&self.config.default_location).to_string();
        result.location = Some(location);

        let destination = build_destination_path(
            &self.config.output_dir,
            date.year,
            &month_label,
            &location_label,
            source,
        )?;
        result.destination = Some(destination.clone());

        if self.config.dry_run {
            info!(
                source = %source.display(),
                destination = %destination.display(),
                "Dry run: would move"
            );
            return Ok(ProcessingStatus::DryRun);
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        if destination.exists() {
            warn!(destination = %destination.display(), "Overwriting existing file");
        }

        move_file(source, &destination)?;
        info!(
            source = %source.display(),
            destination = %destination.display(),
            "Moved"
        );

        Ok(ProcessingStatus::Moved)
    }
}

/// Build `<output_root>/<year>/<month_label>/<location>/<year>_<file name>`
pub fn build_destination_path(
    output_root: &Path,
    year: i32,
    month_label: &str,
    location: &str,
    source: &Path,
) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| Error::InvalidFileName {
        path: source.to_path_buf(),
    })?;

    let mut new_name = OsString::from(format!("{}_", year));
    new_name.push(file_name);

    Ok(output_root
        .join(year.to_string())
        .join(month_label)
        .join(location)
        .join(new_name))
}

/// Move a file; the destination directory must exist
fn move_file(source: &Path, dest: &Path) -> Result<()> {
    // Try rename first (same filesystem)
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }

    // Cross-filesystem moves: copy, keep the modification time, delete
    fs::copy(source, dest)?;
    if let Ok(metadata) = fs::metadata(source)
        && let Ok(mtime) = metadata.modified()
    {
        let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
    }
    fs::remove_file(source)?;

    Ok(())
}
