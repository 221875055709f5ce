//! # Beam Statics CLI
//!
//! Batch driver for `calc_core`. Reads beam rows from CSV (or a JSON array),
//! solves every row and prints a per-row summary.
//!
//! ```text
//! calc_cli <rows.csv|rows.json> [--points N] [--report out.json]
//!          [--summary out.csv] [--settings settings.json] [--apply-moments]
//! ```
//!
//! Without an input path the built-in demonstration beams are solved.

mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use calc_core::errors::{CalcError, CalcResult};
use calc_core::file_io::{load_settings, read_rows_csv, read_rows_json, save_report, write_summary_csv};
use calc_core::processor::{BatchProcessor, BeamOutcome};
use calc_core::report::{BatchReport, ProcessorSettings};
use calc_core::rows::{columns, BeamRow};

const USAGE: &str = "\
Usage: calc_cli [rows.csv|rows.json] [options]

Options:
  --points N           Diagram samples per beam (default 100)
  --report PATH        Write the full JSON report
  --summary PATH       Write a per-row summary CSV
  --settings PATH      Load processor settings from JSON
  --apply-moments      Include the applied moment columns
  -h, --help           Show this help";

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    points: Option<usize>,
    report: Option<PathBuf>,
    summary: Option<PathBuf>,
    settings: Option<PathBuf>,
    apply_moments: bool,
    help: bool,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> CalcResult<Args> {
    let mut args = Args::default();
    let mut raw = raw.into_iter();

    while let Some(arg) = raw.next() {
        let mut value = |flag: &str| {
            raw.next()
                .ok_or_else(|| CalcError::missing_field(format!("value for {}", flag)))
        };

        match arg.as_str() {
            "-h" | "--help" => args.help = true,
            "--apply-moments" => args.apply_moments = true,
            "--points" => {
                let v = value("--points")?;
                let points = v
                    .parse()
                    .map_err(|_| CalcError::invalid_input("--points", v.clone(), "Expected a whole number"))?;
                args.points = Some(points);
            }
            "--report" => args.report = Some(PathBuf::from(value("--report")?)),
            "--summary" => args.summary = Some(PathBuf::from(value("--summary")?)),
            "--settings" => args.settings = Some(PathBuf::from(value("--settings")?)),
            other if other.starts_with('-') => {
                return Err(CalcError::invalid_input("argument", other, "Unknown option"));
            }
            other => {
                if args.input.is_some() {
                    return Err(CalcError::invalid_input("argument", other, "Only one input file is accepted"));
                }
                args.input = Some(PathBuf::from(other));
            }
        }
    }

    Ok(args)
}

/// File settings first, then command line overrides
fn resolve_settings(args: &Args) -> CalcResult<ProcessorSettings> {
    let mut settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => ProcessorSettings::default(),
    };
    if let Some(points) = args.points {
        settings.num_points = points;
    }
    if args.apply_moments {
        settings.apply_moment_loads = true;
    }
    Ok(settings)
}

fn read_input(path: &Path) -> CalcResult<Vec<BeamRow>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        read_rows_json(path)
    } else {
        read_rows_csv(path)
    }
}

/// Demonstration beams covering both beam types, the fallback and an
/// unresolvable support pair.
fn demo_rows() -> Vec<BeamRow> {
    vec![
        BeamRow::from_pairs([
            (columns::LENGTH, "10"),
            (columns::LEFT_SUPPORT, "pin"),
            (columns::RIGHT_SUPPORT, "roller"),
            (columns::POINT_LOAD, "10"),
            (columns::POINT_LOCATION, "5"),
        ]),
        BeamRow::from_pairs([
            (columns::LENGTH, "4"),
            (columns::LEFT_SUPPORT, "fixed"),
            (columns::RIGHT_SUPPORT, "free"),
            (columns::POINT_LOAD, "8"),
            (columns::POINT_LOCATION, "4"),
        ]),
        BeamRow::from_pairs([
            (columns::LENGTH, "6"),
            (columns::LEFT_SUPPORT, "pin"),
            (columns::RIGHT_SUPPORT, "roller"),
            (columns::DIST_LOAD, "2"),
            (columns::DIST_EXTENT, "6"),
            (columns::DIST_START, "0"),
        ]),
        BeamRow::from_pairs([
            (columns::LENGTH, "5"),
            (columns::LEFT_SUPPORT, "roller"),
            (columns::RIGHT_SUPPORT, "roller"),
            (columns::POINT_LOAD, "4"),
            (columns::POINT_LOCATION, "1"),
        ]),
        BeamRow::from_pairs([
            (columns::LENGTH, "5"),
            (columns::LEFT_SUPPORT, "free"),
            (columns::RIGHT_SUPPORT, "roller"),
        ]),
    ]
}

fn print_report(report: &BatchReport) {
    println!("═══════════════════════════════════════");
    println!("  BEAM RESULTS ({})", report.meta.source);
    println!("═══════════════════════════════════════");

    for item in &report.items {
        println!();
        match &item.outcome {
            BeamOutcome::Solved { record } => {
                println!(
                    "Row {}: {} ({} / {}{})",
                    item.row_index,
                    record.beam_type,
                    record.left_support,
                    record.right_support,
                    if record.right_support_inferred { ", inferred" } else { "" }
                );
                println!("  R_left  = {:.3} kN", record.left_reaction);
                println!("  R_right = {:.3} kN", record.right_reaction);
                if record.fixed_moment != 0.0 {
                    println!("  M_fixed = {:.3} kNm", record.fixed_moment);
                }
                println!("  |V|max  = {:.3} kN at x = {:.3} m", record.max_shear, record.max_shear_position);
                println!("  |M|max  = {:.3} kNm at x = {:.3} m", record.max_moment, record.max_moment_position);
                for warning in &record.warnings {
                    println!("  [WARN] {}", warning);
                }
            }
            BeamOutcome::Unclassified { error } => {
                println!("Row {}: [UNCLASSIFIED] {}", item.row_index, error);
            }
            BeamOutcome::Failed { error } => {
                println!("Row {}: [FAIL] {} ({})", item.row_index, error, error.error_code());
            }
        }
    }

    let summary = report.summary();
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  {} rows: {} solved, {} unclassified, {} failed",
        summary.total, summary.solved, summary.unclassified, summary.failed
    );
    println!("═══════════════════════════════════════");
}

fn run(args: &Args) -> CalcResult<()> {
    let settings = resolve_settings(args)?;
    let batch = BatchProcessor::new(settings)?;

    let (source, rows) = match &args.input {
        Some(path) => (path.display().to_string(), read_input(path)?),
        None => ("demo".to_string(), demo_rows()),
    };
    tracing::info!(source = %source, rows = rows.len(), "rows loaded");

    let report = batch.run_report(source, &rows);
    print_report(&report);

    if let Some(path) = &args.report {
        save_report(&report, path)?;
        tracing::info!(path = %path.display(), "report written");
    }
    if let Some(path) = &args.summary {
        write_summary_csv(&report, path)?;
        tracing::info!(path = %path.display(), "summary written");
    }

    Ok(())
}

fn main() -> ExitCode {
    logging::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
