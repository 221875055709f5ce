//! # Beam Parameter Rows
//!
//! A row is one line of a parameter table: header-keyed cells that may hold a
//! number, text, or nothing. Rows come from spreadsheets and CSV files, so
//! they are untrusted and loosely typed.
//!
//! Field extraction never fails. A missing key, an empty/null-like cell or a
//! value that does not convert resolves to the caller's default, and the
//! returned [`Extracted`] records why, so defaulting stays visible.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::rows::{BeamRow, DefaultReason, ValueSource, columns};
//!
//! let row = BeamRow::from_pairs([("Length", "6"), ("Point Load", "heavy")]);
//!
//! let length = row.number(columns::LENGTH, 0.0);
//! assert_eq!(length.value, 6.0);
//! assert_eq!(length.source, ValueSource::Provided);
//!
//! let point = row.number(columns::POINT_LOAD, 0.0);
//! assert_eq!(point.value, 0.0);
//! assert_eq!(point.source, ValueSource::Defaulted(DefaultReason::NotNumeric));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized column names understood by the beam processor
pub mod columns {
    pub const LENGTH: &str = "length";
    pub const LEFT_SUPPORT: &str = "left support";
    pub const RIGHT_SUPPORT: &str = "right support";
    pub const POINT_LOAD: &str = "point load";
    pub const POINT_LOCATION: &str = "point location";
    pub const DIST_LOAD: &str = "distributed load";
    pub const DIST_EXTENT: &str = "distributed extent";
    pub const DIST_START: &str = "distributed start";
    pub const MOMENT: &str = "applied moment";
    pub const MOMENT_LOCATION: &str = "applied moment location";

    /// Alternative headers seen in older sheets, mapped to the names above
    pub(crate) const ALIASES: &[(&str, &str)] = &[
        ("span", LENGTH),
        ("beam length", LENGTH),
        ("udl", DIST_LOAD),
        ("moment", MOMENT),
        ("moment location", MOMENT_LOCATION),
    ];
}

/// One cell of a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Number(f64),
    Text(String),
    /// Blank cell or JSON null
    Empty,
    /// Any other JSON value (bool, array, object); never convertible
    Other(serde_json::Value),
}

impl From<f64> for RowValue {
    fn from(v: f64) -> Self {
        RowValue::Number(v)
    }
}

impl From<&str> for RowValue {
    fn from(v: &str) -> Self {
        RowValue::Text(v.to_string())
    }
}

impl From<String> for RowValue {
    fn from(v: String) -> Self {
        RowValue::Text(v)
    }
}

impl<T: Into<RowValue>> From<Option<T>> for RowValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RowValue::Empty, Into::into)
    }
}

/// Why a field fell back to its default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultReason {
    /// The column is not present in the row
    Missing,
    /// Blank cell, null, or a null-like token such as `NaN` or `None`
    Null,
    /// Text that does not parse as a finite number, or a value of the
    /// wrong kind altogether (bool, list, object)
    NotNumeric,
}

/// Where an extracted value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    Provided,
    Defaulted(DefaultReason),
}

/// A field value together with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Extracted<T> {
    fn provided(value: T) -> Self {
        Extracted {
            value,
            source: ValueSource::Provided,
        }
    }

    fn defaulted(value: T, reason: DefaultReason) -> Self {
        Extracted {
            value,
            source: ValueSource::Defaulted(reason),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self.source, ValueSource::Defaulted(_))
    }
}

const NULL_TOKENS: &[&str] = &["nan", "none", "null", "na", "n/a", "-"];

/// Normalize a header: trim, lowercase, `_`/`-` to spaces, collapse runs of
/// whitespace, and resolve known aliases.
pub fn normalize_header(header: &str) -> String {
    let spaced: String = header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    let normalized = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    columns::ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(normalized)
}

fn is_null_token(text: &str) -> bool {
    text.is_empty() || NULL_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t))
}

/// A header-keyed parameter row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, RowValue>", into = "BTreeMap<String, RowValue>")]
pub struct BeamRow {
    cells: BTreeMap<String, RowValue>,
}

impl From<BTreeMap<String, RowValue>> for BeamRow {
    fn from(raw: BTreeMap<String, RowValue>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<BeamRow> for BTreeMap<String, RowValue> {
    fn from(row: BeamRow) -> Self {
        row.cells
    }
}

impl<K: AsRef<str>, V: Into<RowValue>> FromIterator<(K, V)> for BeamRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = BeamRow::default();
        for (key, value) in iter {
            row.insert(key.as_ref(), value);
        }
        row
    }
}

impl BeamRow {
    /// Build a row from `(header, value)` pairs
    pub fn from_pairs<K: AsRef<str>, V: Into<RowValue>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        pairs.into_iter().collect()
    }

    /// Set a cell; the header is normalized
    pub fn insert(&mut self, header: &str, value: impl Into<RowValue>) {
        self.cells.insert(normalize_header(header), value.into());
    }

    /// Raw cell lookup by (normalized) header
    pub fn get(&self, header: &str) -> Option<&RowValue> {
        self.cells.get(&normalize_header(header))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Numeric field with a default.
    pub fn number(&self, header: &str, default: f64) -> Extracted<f64> {
        match self.get(header) {
            None => Extracted::defaulted(default, DefaultReason::Missing),
            Some(RowValue::Empty) => Extracted::defaulted(default, DefaultReason::Null),
            Some(RowValue::Number(v)) if v.is_nan() => Extracted::defaulted(default, DefaultReason::Null),
            Some(RowValue::Number(v)) if v.is_infinite() => {
                Extracted::defaulted(default, DefaultReason::NotNumeric)
            }
            Some(RowValue::Number(v)) => Extracted::provided(*v),
            Some(RowValue::Text(text)) => {
                let text = text.trim();
                if is_null_token(text) {
                    return Extracted::defaulted(default, DefaultReason::Null);
                }
                match text.parse::<f64>() {
                    Ok(v) if v.is_finite() => Extracted::provided(v),
                    _ => Extracted::defaulted(default, DefaultReason::NotNumeric),
                }
            }
            Some(RowValue::Other(_)) => Extracted::defaulted(default, DefaultReason::NotNumeric),
        }
    }

    /// Text field with a default. Numbers are rendered as text; blank and
    /// null-like cells fall back to the default.
    pub fn text(&self, header: &str, default: &str) -> Extracted<String> {
        match self.get(header) {
            None => Extracted::defaulted(default.to_string(), DefaultReason::Missing),
            Some(RowValue::Empty) => Extracted::defaulted(default.to_string(), DefaultReason::Null),
            Some(RowValue::Number(v)) if !v.is_finite() => {
                Extracted::defaulted(default.to_string(), DefaultReason::Null)
            }
            Some(RowValue::Number(v)) => Extracted::provided(v.to_string()),
            Some(RowValue::Text(text)) => {
                let trimmed = text.trim();
                if is_null_token(trimmed) {
                    Extracted::defaulted(default.to_string(), DefaultReason::Null)
                } else {
                    Extracted::provided(trimmed.to_string())
                }
            }
            Some(RowValue::Other(_)) => Extracted::defaulted(default.to_string(), DefaultReason::NotNumeric),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_normalization() {
        assert_eq!(normalize_header("  Point_Load "), "point load");
        assert_eq!(normalize_header("Left-Support"), "left support");
        assert_eq!(normalize_header("Distributed   Start"), "distributed start");
        assert_eq!(normalize_header("Span"), "length");
        assert_eq!(normalize_header("UDL"), "distributed load");
    }

    #[test]
    fn test_number_provided() {
        let row = BeamRow::from_pairs([("length", RowValue::Number(4.5))]);
        assert_eq!(row.number(columns::LENGTH, 0.0), Extracted::provided(4.5));

        let row = BeamRow::from_pairs([("length", " 12.25 ")]);
        assert_eq!(row.number(columns::LENGTH, 0.0).value, 12.25);
    }

    #[test]
    fn test_number_defaults() {
        let row = BeamRow::from_pairs([
            ("point load", RowValue::Empty),
            ("point location", RowValue::Number(f64::NAN)),
            ("distributed load", RowValue::from("abc")),
            ("distributed start", RowValue::from("NaN")),
            ("distributed extent", RowValue::Number(f64::INFINITY)),
        ]);

        let cases = [
            (columns::LENGTH, DefaultReason::Missing),
            (columns::POINT_LOAD, DefaultReason::Null),
            (columns::POINT_LOCATION, DefaultReason::Null),
            (columns::DIST_LOAD, DefaultReason::NotNumeric),
            (columns::DIST_START, DefaultReason::Null),
            (columns::DIST_EXTENT, DefaultReason::NotNumeric),
        ];
        for (header, reason) in cases {
            let extracted = row.number(header, 0.0);
            assert_eq!(extracted.value, 0.0, "{}", header);
            assert_eq!(extracted.source, ValueSource::Defaulted(reason), "{}", header);
        }
    }

    #[test]
    fn test_text_extraction() {
        let row = BeamRow::from_pairs([
            ("left support", RowValue::from(" Fixed ")),
            ("right support", RowValue::from("")),
        ]);

        assert_eq!(row.text(columns::LEFT_SUPPORT, "pin").value, "Fixed");
        let right = row.text(columns::RIGHT_SUPPORT, "");
        assert_eq!(right.value, "");
        assert_eq!(right.source, ValueSource::Defaulted(DefaultReason::Null));
        assert!(row.text("label", "B-1").is_defaulted());
    }

    #[test]
    fn test_option_values() {
        let row = BeamRow::from_pairs([("length", Option::<f64>::None), ("span", Some(3.0))]);
        // Both headers normalize to `length`; the later cell wins
        assert_eq!(row.len(), 1);
        assert_eq!(row.number(columns::LENGTH, 0.0).value, 3.0);
    }

    #[test]
    fn test_json_rows() {
        let json = r#"{"Length": 6, "Left Support": "pin", "Point Load": null, "Point Location": "2.5"}"#;
        let row: BeamRow = serde_json::from_str(json).unwrap();

        assert_eq!(row.number(columns::LENGTH, 0.0).value, 6.0);
        assert_eq!(row.text(columns::LEFT_SUPPORT, "").value, "pin");
        assert!(row.number(columns::POINT_LOAD, 0.0).is_defaulted());
        assert_eq!(row.number(columns::POINT_LOCATION, 0.0).value, 2.5);
    }

    #[test]
    fn test_json_cells_of_the_wrong_kind_default() {
        let json = r#"{"Length": 5, "Point Load": true, "Left Support": ["pin"], "Point Location": {"m": 2}}"#;
        let row: BeamRow = serde_json::from_str(json).unwrap();

        assert_eq!(row.number(columns::LENGTH, 0.0).value, 5.0);
        let load = row.number(columns::POINT_LOAD, 0.0);
        assert_eq!(load.value, 0.0);
        assert_eq!(load.source, ValueSource::Defaulted(DefaultReason::NotNumeric));
        assert!(row.number(columns::POINT_LOCATION, 0.0).is_defaulted());

        let left = row.text(columns::LEFT_SUPPORT, "pin");
        assert_eq!(left.value, "pin");
        assert_eq!(left.source, ValueSource::Defaulted(DefaultReason::NotNumeric));

        // Serializing keeps the original value
        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["point load"], serde_json::Value::Bool(true));
    }
}
