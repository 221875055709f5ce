//! # File I/O Module
//!
//! Row sources and result sinks at the edge of the engine:
//! - **CSV rows**: header row plus one beam per line, every cell read as text
//! - **JSON rows**: an array of objects with numbers, strings or nulls
//! - **Summary CSV**: one line per input row; rows without a result keep
//!   empty cells and carry the error code instead
//! - **Report JSON**: the full [`BatchReport`], written atomically
//!   (write to .tmp, fsync, rename) and version-checked on load
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{read_rows_csv, save_report, write_summary_csv};
//! use calc_core::processor::BatchProcessor;
//! use calc_core::report::ProcessorSettings;
//! use std::path::Path;
//!
//! let rows = read_rows_csv(Path::new("beams.csv"))?;
//! let batch = BatchProcessor::new(ProcessorSettings::default())?;
//! let report = batch.run_report("beams.csv", &rows);
//!
//! save_report(&report, Path::new("beams.report.json"))?;
//! write_summary_csv(&report, Path::new("beams.summary.csv"))?;
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::errors::{CalcError, CalcResult};
use crate::processor::BeamOutcome;
use crate::report::{BatchReport, ProcessorSettings, SCHEMA_VERSION};
use crate::rows::{BeamRow, RowValue};

/// Read beam rows from CSV text.
///
/// Headers are required. Short rows are allowed; their missing trailing
/// cells are simply absent from the row.
pub fn read_rows<R: Read>(reader: R) -> CalcResult<Vec<BeamRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: BeamRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| {
                let value = if cell.is_empty() {
                    RowValue::Empty
                } else {
                    RowValue::from(cell)
                };
                (header.as_str(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Read beam rows from a CSV file.
pub fn read_rows_csv(path: &Path) -> CalcResult<Vec<BeamRow>> {
    let file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;
    read_rows(file)
}

/// Read beam rows from a JSON file holding an array of objects.
pub fn read_rows_json(path: &Path) -> CalcResult<Vec<BeamRow>> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON rows in {}: {}", path.display(), e)))
}

/// Load processor settings from a JSON file. Missing keys take defaults.
pub fn load_settings(path: &Path) -> CalcResult<ProcessorSettings> {
    let contents = read_to_string(path)?;
    let settings: ProcessorSettings = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid settings in {}: {}", path.display(), e)))?;
    settings.validate()?;
    Ok(settings)
}

/// One line of the summary CSV
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    row_index: usize,
    status: &'static str,
    beam_type: Option<&'static str>,
    left_support: Option<&'a str>,
    right_support: Option<&'a str>,
    left_reaction: Option<f64>,
    right_reaction: Option<f64>,
    fixed_moment: Option<f64>,
    max_shear: Option<f64>,
    max_moment: Option<f64>,
    error_code: Option<&'static str>,
    error: Option<String>,
}

impl SummaryRow<'_> {
    /// A row without results: every result cell stays empty
    fn unsolved(row_index: usize, status: &'static str, error: &CalcError) -> Self {
        SummaryRow {
            row_index,
            status,
            beam_type: None,
            left_support: None,
            right_support: None,
            left_reaction: None,
            right_reaction: None,
            fixed_moment: None,
            max_shear: None,
            max_moment: None,
            error_code: Some(error.error_code()),
            error: Some(error.to_string()),
        }
    }
}

/// Write the per-row summary of a report as CSV.
pub fn write_summary<W: Write>(report: &BatchReport, writer: W) -> CalcResult<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for item in &report.items {
        let line = match &item.outcome {
            BeamOutcome::Solved { record } => SummaryRow {
                row_index: item.row_index,
                status: "solved",
                beam_type: Some(record.beam_type.label()),
                left_support: Some(record.left_support.label()),
                right_support: Some(record.right_support.label()),
                left_reaction: Some(record.left_reaction),
                right_reaction: Some(record.right_reaction),
                fixed_moment: Some(record.fixed_moment),
                max_shear: Some(record.max_shear),
                max_moment: Some(record.max_moment),
                error_code: None,
                error: None,
            },
            BeamOutcome::Unclassified { error } => SummaryRow::unsolved(item.row_index, "unclassified", error),
            BeamOutcome::Failed { error } => SummaryRow::unsolved(item.row_index, "failed", error),
        };
        writer.serialize(line)?;
    }

    writer
        .flush()
        .map_err(|e| CalcError::file_error("flush", "summary", e.to_string()))?;
    Ok(())
}

/// Write the per-row summary of a report to a CSV file.
pub fn write_summary_csv(report: &BatchReport, path: &Path) -> CalcResult<()> {
    let file = File::create(path)
        .map_err(|e| CalcError::file_error("create", path.display().to_string(), e.to_string()))?;
    write_summary(report, file)
}

/// Save a report with atomic write semantics.
///
/// 1. Serialize the report to JSON
/// 2. Write to a temporary file (`<path>.tmp`)
/// 3. Sync to disk
/// 4. Rename over the target
pub fn save_report(report: &BatchReport, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(report).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a report and check its schema version.
pub fn load_report(path: &Path) -> CalcResult<BatchReport> {
    let contents = read_to_string(path)?;

    let report: BatchReport = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&report.meta.version)?;

    Ok(report)
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match; under 0.x a newer minor version is rejected too.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
