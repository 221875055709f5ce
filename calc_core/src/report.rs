//! # Batch Report Data Structures
//!
//! `BatchReport` is the root container written after a batch run. It
//! serializes to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! BatchReport
//! ├── meta: ReportMetadata (schema version, run id, source, timestamp)
//! ├── settings: ProcessorSettings (sample count, defaults)
//! └── items: Vec<BatchItem> (one per input row, in input order)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::DEFAULT_NUM_POINTS;
use crate::errors::{CalcError, CalcResult};
use crate::processor::{BatchItem, BeamOutcome, BeamRecord};

/// Current schema version for report files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Settings applied to every beam of a batch.
///
/// Missing keys take their defaults when loaded from JSON:
///
/// ```rust
/// use calc_core::report::ProcessorSettings;
///
/// let settings: ProcessorSettings = serde_json::from_str(r#"{"num_points": 51}"#).unwrap();
/// assert_eq!(settings.num_points, 51);
/// assert_eq!(settings.default_left_support, "pin");
/// assert!(!settings.apply_moment_loads);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorSettings {
    /// Number of equally spaced diagram samples, both ends included
    pub num_points: usize,

    /// Left support used when a row leaves it blank
    pub default_left_support: String,

    /// Read the applied moment columns from rows. When off, the applied
    /// moment is taken as zero for every beam.
    pub apply_moment_loads: bool,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        ProcessorSettings {
            num_points: DEFAULT_NUM_POINTS,
            default_left_support: "pin".to_string(),
            apply_moment_loads: false,
        }
    }
}

impl ProcessorSettings {
    /// Validate settings before a run.
    pub fn validate(&self) -> CalcResult<()> {
        if self.num_points < 2 {
            return Err(CalcError::invalid_input(
                "num_points",
                self.num_points.to_string(),
                "At least two sample points are needed",
            ));
        }
        if self.default_left_support.trim().is_empty() {
            return Err(CalcError::invalid_input(
                "default_left_support",
                "",
                "Default left support cannot be blank",
            ));
        }
        Ok(())
    }
}

/// Report metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Unique id of this run
    pub run_id: Uuid,

    /// Where the rows came from (file name, "demo", ...)
    pub source: String,

    /// When the report was produced
    pub generated: DateTime<Utc>,
}

/// Per-status counts of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub solved: usize,
    pub unclassified: usize,
    pub failed: usize,
}

/// Root container of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub meta: ReportMetadata,
    pub settings: ProcessorSettings,
    /// One item per input row, ordered by row index
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn new(source: impl Into<String>, settings: ProcessorSettings, items: Vec<BatchItem>) -> Self {
        BatchReport {
            meta: ReportMetadata {
                version: SCHEMA_VERSION.to_string(),
                run_id: Uuid::new_v4(),
                source: source.into(),
                generated: Utc::now(),
            },
            settings,
            items,
        }
    }

    /// Count items by outcome
    pub fn summary(&self) -> BatchSummary {
        self.items.iter().fold(
            BatchSummary {
                total: self.items.len(),
                ..BatchSummary::default()
            },
            |mut acc, item| {
                match item.outcome {
                    BeamOutcome::Solved { .. } => acc.solved += 1,
                    BeamOutcome::Unclassified { .. } => acc.unclassified += 1,
                    BeamOutcome::Failed { .. } => acc.failed += 1,
                }
                acc
            },
        )
    }

    /// Solved records with their row index
    pub fn records(&self) -> impl Iterator<Item = (usize, &BeamRecord)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            BeamOutcome::Solved { record } => Some((item.row_index, record.as_ref())),
            _ => None,
        })
    }

    /// Errors (unclassified or failed) with their row index
    pub fn errors(&self) -> impl Iterator<Item = (usize, &CalcError)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            BeamOutcome::Unclassified { error } | BeamOutcome::Failed { error } => Some((item.row_index, error)),
            BeamOutcome::Solved { .. } => None,
        })
    }
}
