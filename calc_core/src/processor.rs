//! # Row Processing
//!
//! [`BeamProcessor`] turns one parameter row into a result record:
//!
//! ```text
//! BeamRow ─extract─▶ BeamSpec ─classify─▶ BeamType ─solve─▶ Reactions ─sample─▶ BeamRecord
//! ```
//!
//! [`BatchProcessor`] applies it to an ordered sequence of rows. Each row is
//! independent; a row that cannot be solved becomes an error item carrying
//! its row index, and the batch moves on.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::processor::{BatchProcessor, BeamOutcome};
//! use calc_core::report::ProcessorSettings;
//! use calc_core::rows::BeamRow;
//!
//! let rows = vec![
//!     BeamRow::from_pairs([("Length", "10"), ("Left Support", "pin"), ("Point Load", "10"), ("Point Location", "5")]),
//!     BeamRow::from_pairs([("Length", "4"), ("Left Support", "free"), ("Right Support", "roller")]),
//! ];
//!
//! let batch = BatchProcessor::new(ProcessorSettings::default()).unwrap();
//! let items = batch.run(&rows);
//!
//! assert_eq!(items.len(), 2);
//! assert!(matches!(items[0].outcome, BeamOutcome::Solved { .. }));
//! assert!(matches!(items[1].outcome, BeamOutcome::Unclassified { .. }));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{calculate_classified, BeamSpec};
use crate::errors::{CalcError, CalcResult};
use crate::report::{BatchReport, ProcessorSettings};
use crate::rows::{columns, BeamRow};
use crate::supports::{classify, fixed_end, BeamType, End, Support};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Output record of one solved beam.
///
/// All numbers are rounded to three decimals; the arrays have one entry per
/// sample position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamRecord {
    pub beam_type: BeamType,

    /// Support at the left end, which carries `left_reaction`
    pub left_support: Support,
    /// Support at the right end, which carries `right_reaction`
    pub right_support: Support,
    /// The right support was not given and was inferred from the left one
    pub right_support_inferred: bool,

    /// Vertical reaction at the left support (kN)
    pub left_reaction: f64,
    /// Vertical reaction at the right support (kN)
    pub right_reaction: f64,
    /// Fixed-end moment (kNm), 0 for simply supported beams
    pub fixed_moment: f64,
    /// End carrying `fixed_moment` (cantilevers only)
    pub fixed_end: Option<End>,

    pub max_shear: f64,
    pub max_shear_position: f64,
    pub max_moment: f64,
    pub max_moment_position: f64,

    pub x_positions: Vec<f64>,
    pub shear_array: Vec<f64>,
    pub moment_array: Vec<f64>,

    /// Columns that fell back to their default value
    pub defaulted_fields: Vec<String>,
    /// Non-fatal notes, e.g. a support pair treated as simply supported
    pub warnings: Vec<String>,
}

/// Result of processing one row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BeamOutcome {
    Solved { record: Box<BeamRecord> },
    /// Supports could not be classified; nothing was solved
    Unclassified { error: CalcError },
    /// Processing the row failed (invalid geometry, bad settings, ...)
    Failed { error: CalcError },
}

impl BeamOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, BeamOutcome::Solved { .. })
    }

    pub fn record(&self) -> Option<&BeamRecord> {
        match self {
            BeamOutcome::Solved { record } => Some(record.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CalcError> {
        match self {
            BeamOutcome::Solved { .. } => None,
            BeamOutcome::Unclassified { error } | BeamOutcome::Failed { error } => Some(error),
        }
    }
}

/// One batch entry, tied to the position of its input row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub row_index: usize,
    pub outcome: BeamOutcome,
}

/// Beam parameters pulled from a row, with the defaulting decisions made on
/// the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedBeam {
    pub spec: BeamSpec,
    pub right_support_inferred: bool,
    /// Normalized names of the columns that took their default
    pub defaulted_fields: Vec<String>,
}

/// Processes single rows with a fixed set of settings.
#[derive(Debug, Clone)]
pub struct BeamProcessor {
    settings: ProcessorSettings,
}

impl BeamProcessor {
    /// Create a processor; fails if the settings are invalid.
    pub fn new(settings: ProcessorSettings) -> CalcResult<Self> {
        settings.validate()?;
        Ok(BeamProcessor { settings })
    }

    pub fn settings(&self) -> &ProcessorSettings {
        &self.settings
    }

    /// Pull beam parameters out of a row. Never fails: anything missing or
    /// unreadable takes its default and is listed in `defaulted_fields`.
    pub fn extract(&self, row: &BeamRow) -> ExtractedBeam {
        let mut defaulted = Vec::new();

        let mut number = |header: &str| -> f64 {
            let extracted = row.number(header, 0.0);
            if extracted.is_defaulted() {
                defaulted.push(header.to_string());
            }
            extracted.value
        };

        let length_m = number(columns::LENGTH);
        let point_load_kn = number(columns::POINT_LOAD);
        let point_location_m = number(columns::POINT_LOCATION);
        let dist_load_kn_per_m = number(columns::DIST_LOAD);
        let dist_extent_m = number(columns::DIST_EXTENT);
        let dist_start_m = number(columns::DIST_START);
        let (moment_knm, moment_location_m) = if self.settings.apply_moment_loads {
            (number(columns::MOMENT), number(columns::MOMENT_LOCATION))
        } else {
            (0.0, 0.0)
        };

        let left = row.text(columns::LEFT_SUPPORT, &self.settings.default_left_support);
        if left.is_defaulted() {
            defaulted.push(columns::LEFT_SUPPORT.to_string());
        }
        let left_support = Support::parse(&left.value);

        let right = row.text(columns::RIGHT_SUPPORT, "");
        let right_support_inferred = right.is_defaulted();
        let right_support = if right_support_inferred {
            left_support.inferred_opposite()
        } else {
            Support::parse(&right.value)
        };

        ExtractedBeam {
            spec: BeamSpec {
                length_m,
                left_support,
                right_support,
                point_load_kn,
                point_location_m,
                dist_load_kn_per_m,
                dist_extent_m,
                dist_start_m,
                moment_knm,
                moment_location_m,
            },
            right_support_inferred,
            defaulted_fields: defaulted,
        }
    }

    /// Process one row.
    ///
    /// Returns `Ok(Unclassified)` when the supports cannot be classified, and
    /// `Err` for any other failure (the batch records those as `Failed`).
    pub fn process(&self, row: &BeamRow) -> CalcResult<BeamOutcome> {
        let extracted = self.extract(row);
        self.process_extracted(extracted)
    }

    /// Process parameters that were already extracted.
    pub fn process_extracted(&self, extracted: ExtractedBeam) -> CalcResult<BeamOutcome> {
        let ExtractedBeam {
            spec,
            right_support_inferred,
            defaulted_fields,
        } = extracted;

        for field in &defaulted_fields {
            tracing::debug!(field = %field, "column missing or unreadable, using default");
        }

        let classification = classify(&spec.left_support, &spec.right_support);
        if classification.beam_type == BeamType::Unknown {
            return Ok(BeamOutcome::Unclassified {
                error: CalcError::unresolved_supports(spec.left_support.label(), spec.right_support.label()),
            });
        }

        let mut warnings = Vec::new();
        if classification.fallback {
            let message = format!(
                "support pair ({}, {}) is not pin/roller or fixed/free; treated as simply supported",
                spec.left_support, spec.right_support
            );
            tracing::warn!(left = %spec.left_support, right = %spec.right_support, "{}", message);
            warnings.push(message);
        }

        let diagram = calculate_classified(&spec, classification.beam_type, self.settings.num_points)?;
        let reactions = diagram.reactions;

        let fixed_end = match classification.beam_type {
            BeamType::Cantilever => fixed_end(&spec.left_support, &spec.right_support),
            _ => None,
        };

        let record = BeamRecord {
            beam_type: diagram.beam_type,
            left_support: spec.left_support.clone(),
            right_support: spec.right_support.clone(),
            right_support_inferred,
            left_reaction: reactions.left_kn,
            right_reaction: reactions.right_kn,
            fixed_moment: reactions.fixed_moment_knm(),
            fixed_end,
            max_shear: diagram.max_abs_shear_kn,
            max_shear_position: diagram.max_shear_position_m,
            max_moment: diagram.max_abs_moment_knm,
            max_moment_position: diagram.max_moment_position_m,
            x_positions: diagram.positions(),
            shear_array: diagram.shears(),
            moment_array: diagram.moments(),
            defaulted_fields,
            warnings,
        };

        tracing::debug!(
            beam_type = %record.beam_type,
            left_reaction = record.left_reaction,
            right_reaction = record.right_reaction,
            max_moment = record.max_moment,
            "beam solved"
        );

        Ok(BeamOutcome::Solved {
            record: Box::new(record),
        })
    }
}

/// Runs a [`BeamProcessor`] over many rows.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    beam: BeamProcessor,
}

impl BatchProcessor {
    pub fn new(settings: ProcessorSettings) -> CalcResult<Self> {
        Ok(BatchProcessor {
            beam: BeamProcessor::new(settings)?,
        })
    }

    pub fn settings(&self) -> &ProcessorSettings {
        self.beam.settings()
    }

    /// Process a single row inside the isolation boundary.
    pub fn run_row(&self, row_index: usize, row: &BeamRow) -> BatchItem {
        let outcome = match self.beam.process(row) {
            Ok(outcome) => outcome,
            Err(error) => BeamOutcome::Failed { error },
        };

        match &outcome {
            BeamOutcome::Solved { .. } => {}
            BeamOutcome::Unclassified { error } => {
                tracing::warn!(row = row_index, code = error.error_code(), "{}", error);
            }
            BeamOutcome::Failed { error } => {
                tracing::warn!(row = row_index, code = error.error_code(), "row skipped: {}", error);
            }
        }

        BatchItem { row_index, outcome }
    }

    /// Process every row. The output has one item per row, in row order.
    pub fn run(&self, rows: &[BeamRow]) -> Vec<BatchItem> {
        tracing::info!(rows = rows.len(), num_points = self.settings().num_points, "processing beam batch");

        #[cfg(feature = "parallel")]
        let items: Vec<BatchItem> = rows
            .par_iter()
            .enumerate()
            .map(|(i, row)| self.run_row(i, row))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let items: Vec<BatchItem> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.run_row(i, row))
            .collect();

        let solved = items.iter().filter(|item| item.outcome.is_solved()).count();
        tracing::info!(solved, errors = items.len() - solved, "beam batch finished");

        items
    }

    /// Process every row and wrap the items in a [`BatchReport`].
    pub fn run_report(&self, source: impl Into<String>, rows: &[BeamRow]) -> BatchReport {
        let items = self.run(rows);
        BatchReport::new(source, self.settings().clone(), items)
    }
}
