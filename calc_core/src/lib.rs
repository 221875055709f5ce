//! # calc_core - Single-Span Beam Statics Engine
//!
//! `calc_core` computes support reactions and shear/bending moment diagrams
//! for a single-span beam carrying one point load, one uniformly distributed
//! load and one applied moment, either simply supported (pin/roller) or as a
//! cantilever (fixed/free). All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Row-Isolated**: One bad row in a batch never stops the others
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::processor::BeamProcessor;
//! use calc_core::report::ProcessorSettings;
//! use calc_core::rows::BeamRow;
//!
//! let processor = BeamProcessor::new(ProcessorSettings::default()).unwrap();
//! let row = BeamRow::from_pairs([("Length", "4"), ("Left Support", "fixed"), ("Point Load", "8"), ("Point Location", "4")]);
//!
//! let outcome = processor.process(&row).unwrap();
//! let record = outcome.record().unwrap();
//! assert_eq!(record.left_reaction, 8.0);
//! assert_eq!(record.fixed_moment, 32.0);
//! ```
//!
//! ## Modules
//!
//! - [`supports`] - Support labels and beam type classification
//! - [`calculations`] - Reactions, internal forces and diagram sampling
//! - [`rows`] - Loosely typed parameter rows and defaulting extraction
//! - [`processor`] - Single-row and batch processing
//! - [`report`] - Batch report and processor settings
//! - [`errors`] - Structured error types
//! - [`file_io`] - CSV/JSON row sources and result sinks

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod processor;
pub mod report;
pub mod rows;
pub mod supports;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, BeamSpec, DiagramResult, Reactions};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_report, read_rows_csv, save_report, write_summary_csv};
pub use processor::{BatchItem, BatchProcessor, BeamOutcome, BeamProcessor, BeamRecord};
pub use report::{BatchReport, ProcessorSettings};
pub use rows::BeamRow;
pub use supports::{classify, BeamType, Support};
