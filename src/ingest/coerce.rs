//! Schema realignment and type coercion.
//!
//! Physical column 0 is the header artifact, so the true first data column is
//! physical index 1. Cells are assigned to fields purely by position against
//! [`schema::FIELDS`]; short rows pad trailing fields with null and surplus
//! cells past the schema are dropped.
//!
//! Coercion is lenient by policy: a numeric cell that fails to parse keeps
//! its raw text instead of rejecting the row. Null detection (an empty cell
//! or the exact literal `nan`) always runs before any type rule.

use mongodb::bson::{Bson, Document};
use serde::Serialize;
use tracing::{debug, instrument};

use super::RawTable;
use crate::schema::{self, FieldType};

/// A coerced cell. Modeled separately from BSON so coercion is testable
/// without a database in the loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl From<CellValue> for Bson {
    fn from(value: CellValue) -> Bson {
        match value {
            CellValue::Int(v) => Bson::Int64(v),
            CellValue::Float(v) => Bson::Double(v),
            CellValue::Bool(v) => Bson::Boolean(v),
            CellValue::Text(v) => Bson::String(v),
            CellValue::Null => Bson::Null,
        }
    }
}

/// Tokens accepted as true for boolean fields, compared after uppercasing.
const TRUTHY: [&str; 4] = ["YES", "TRUE", "1", "Y"];

/// Coerce one raw cell under the given policy.
///
/// Numeric parsing trims surrounding whitespace; everything else sees the
/// cell exactly as the file stored it.
pub fn coerce_cell(raw: &str, policy: FieldType) -> CellValue {
    if raw.is_empty() || raw == "nan" {
        return CellValue::Null;
    }
    match policy {
        // Parsed through f64 first so exports that stored "5.0" for an
        // integer field still land as 5. Truncation, not rounding. NaN and
        // the infinities have no integer form; they keep the raw text.
        FieldType::Integer => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Int(v as i64),
            _ => CellValue::Text(raw.to_string()),
        },
        FieldType::Float => match raw.trim().parse::<f64>() {
            Ok(v) => CellValue::Float(v),
            Err(_) => CellValue::Text(raw.to_string()),
        },
        FieldType::Boolean => {
            CellValue::Bool(TRUTHY.contains(&raw.to_uppercase().as_str()))
        }
        FieldType::Text => CellValue::Text(raw.to_string()),
    }
}

/// Realign one raw row onto the declared schema and coerce every cell.
///
/// The returned document always has exactly [`schema::FIELD_COUNT`] fields.
pub fn realign_row(row: &[String]) -> Document {
    let mut doc = Document::new();
    for (i, (name, policy)) in schema::FIELDS.iter().enumerate() {
        // +1 skips the header-artifact column.
        let value = match row.get(i + 1) {
            Some(cell) => coerce_cell(cell, *policy),
            None => CellValue::Null,
        };
        doc.insert(*name, Bson::from(value));
    }
    doc
}

/// Coerce a whole raw table into records, preserving row order.
#[instrument(level = "info", skip(table), fields(rows = table.rows.len()))]
pub fn build_records(table: &RawTable) -> Vec<Document> {
    let records: Vec<Document> = table.rows.iter().map(|row| realign_row(row)).collect();
    debug!(records = records.len(), "rows realigned and coerced");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FIELD_COUNT;

    fn row_of(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn integer_policy_truncates_through_float() {
        assert_eq!(coerce_cell("5.0", FieldType::Integer), CellValue::Int(5));
        assert_eq!(coerce_cell("1002", FieldType::Integer), CellValue::Int(1002));
        assert_eq!(coerce_cell("3.9", FieldType::Integer), CellValue::Int(3));
    }

    #[test]
    fn integer_policy_falls_back_to_text() {
        assert_eq!(
            coerce_cell("abc", FieldType::Integer),
            CellValue::Text("abc".into())
        );
    }

    #[test]
    fn integer_policy_keeps_nonfinite_numerics_as_text() {
        // "NaN" and the infinities parse as f64 but have no integer form;
        // casting would fabricate 0 or i64::MAX, so they take the text
        // fallback like any other unconvertible cell.
        for cell in ["NaN", "inf", "-inf", "Infinity"] {
            assert_eq!(
                coerce_cell(cell, FieldType::Integer),
                CellValue::Text(cell.into()),
                "{cell} must fall back to text"
            );
        }
    }

    #[test]
    fn numeric_parsing_tolerates_surrounding_whitespace() {
        assert_eq!(coerce_cell(" 5.0 ", FieldType::Integer), CellValue::Int(5));
        assert_eq!(coerce_cell(" 3.7 ", FieldType::Float), CellValue::Float(3.7));
    }

    #[test]
    fn float_policy_parses_or_falls_back() {
        assert_eq!(coerce_cell("3.7", FieldType::Float), CellValue::Float(3.7));
        assert_eq!(
            coerce_cell("n/a", FieldType::Float),
            CellValue::Text("n/a".into())
        );
    }

    #[test]
    fn boolean_policy_matches_truthy_tokens() {
        for token in ["yes", "YES", "1", "Y", "true", "True"] {
            assert_eq!(
                coerce_cell(token, FieldType::Boolean),
                CellValue::Bool(true),
                "{token} should be true"
            );
        }
        for token in ["no", "0", "N", "false", "maybe"] {
            assert_eq!(
                coerce_cell(token, FieldType::Boolean),
                CellValue::Bool(false),
                "{token} should be false"
            );
        }
    }

    #[test]
    fn null_detection_runs_before_every_policy() {
        for policy in [
            FieldType::Integer,
            FieldType::Float,
            FieldType::Boolean,
            FieldType::Text,
        ] {
            assert_eq!(coerce_cell("", policy), CellValue::Null);
            assert_eq!(coerce_cell("nan", policy), CellValue::Null);
        }
        // Case-sensitive: only the lowercase literal is a null marker.
        assert_eq!(
            coerce_cell("NaN", FieldType::Text),
            CellValue::Text("NaN".into())
        );
    }

    #[test]
    fn whitespace_only_cells_are_not_null() {
        // Only the empty cell and the literal "nan" null out; padding is
        // data and text fields keep it verbatim.
        assert_eq!(
            coerce_cell("   ", FieldType::Text),
            CellValue::Text("   ".into())
        );
        assert_eq!(
            coerce_cell("   ", FieldType::Float),
            CellValue::Text("   ".into())
        );
        assert_eq!(coerce_cell("   ", FieldType::Boolean), CellValue::Bool(false));
    }

    #[test]
    fn text_policy_passes_cells_through_unchanged() {
        assert_eq!(
            coerce_cell("  Ada Lovelace  ", FieldType::Text),
            CellValue::Text("  Ada Lovelace  ".into())
        );
    }

    #[test]
    fn short_rows_pad_trailing_fields_with_null() {
        // Artifact column plus three data cells; the remaining 68 fields
        // must still exist, as nulls.
        let doc = realign_row(&row_of(&["", "1001", "Ada Lovelace", "F"]));
        assert_eq!(doc.len(), FIELD_COUNT);
        assert_eq!(doc.get("alumni_id"), Some(&Bson::Int64(1001)));
        assert_eq!(doc.get("full_name"), Some(&Bson::String("Ada Lovelace".into())));
        assert_eq!(doc.get("school_name"), Some(&Bson::Null));
    }

    #[test]
    fn long_rows_drop_surplus_cells() {
        let mut cells = vec![String::from("artifact")];
        cells.extend((0..FIELD_COUNT + 10).map(|i| i.to_string()));
        let doc = realign_row(&cells);
        assert_eq!(doc.len(), FIELD_COUNT);
        // Last schema field takes the 71st data cell, not one of the surplus.
        assert_eq!(
            doc.get("school_name"),
            Some(&Bson::String((FIELD_COUNT - 1).to_string()))
        );
    }

    #[test]
    fn realigned_record_coerces_by_field_policy() {
        let mut cells = vec![String::new(); FIELD_COUNT + 1];
        cells[1] = "1002".into(); // alumni_id
        cells[8] = "3.7".into(); // gpa
        cells[38] = "Y".into(); // mentorship_interest
        let doc = realign_row(&cells);

        assert_eq!(doc.get("alumni_id"), Some(&Bson::Int64(1002)));
        assert_eq!(doc.get("gpa"), Some(&Bson::Double(3.7)));
        assert_eq!(doc.get("mentorship_interest"), Some(&Bson::Boolean(true)));
        assert_eq!(doc.get("email"), Some(&Bson::Null));
    }

    #[test]
    fn cell_values_serialize_to_their_natural_json() {
        assert_eq!(serde_json::to_string(&CellValue::Int(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&CellValue::Float(3.7)).unwrap(), "3.7");
        assert_eq!(serde_json::to_string(&CellValue::Bool(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&CellValue::Null).unwrap(), "null");
    }

    #[test]
    fn build_records_preserves_row_order() {
        let table = RawTable {
            rows: vec![
                row_of(&["", "1", "first"]),
                row_of(&["", "2", "second"]),
                row_of(&["", "3", "third"]),
            ],
            column_count: 3,
        };
        let records = build_records(&table);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("alumni_id"), Some(&Bson::Int64(1)));
        assert_eq!(records[2].get("full_name"), Some(&Bson::String("third".into())));
    }
}
