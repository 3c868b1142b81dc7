use chrono::NaiveDate;

use crate::datatypes::{ColumnType, Value};
use crate::table::Error;

/// An ordered set of type probes with their matching parsers.
///
/// Probes run in declaration order so that more specific types win. The set
/// is immutable once built; construct it at program start and pass it by
/// reference wherever inference or parsing happens.
pub struct TypeRegistry {
    probes: Vec<(ColumnType, fn(&str) -> bool)>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self {
            probes: vec![
                (ColumnType::Int64, probe_int),
                (ColumnType::Float64, probe_float),
                (ColumnType::Bool, probe_bool),
                (ColumnType::Date, probe_date),
            ],
        }
    }
}

impl TypeRegistry {
    /// Classifies a decoded field, falling back to `Utf8` when no probe
    /// matches.
    #[must_use]
    pub fn probe(&self, field: &str) -> ColumnType {
        for (column_type, accepts) in &self.probes {
            if accepts(field) {
                return *column_type;
            }
        }
        ColumnType::Utf8
    }

    /// Parses a decoded field as `column_type`.
    ///
    /// Returns `None` when the text falls outside the type's domain; text
    /// accepted by the matching probe never does.
    #[must_use]
    pub fn parse(&self, column_type: ColumnType, field: &str) -> Option<Value> {
        match column_type {
            ColumnType::Int64 => field.parse::<i64>().ok().map(Value::Int),
            ColumnType::Float64 => field.parse::<f64>().ok().map(Value::Float),
            ColumnType::Bool => match field {
                "true" | "True" => Some(Value::Bool(true)),
                "false" | "False" => Some(Value::Bool(false)),
                _ => None,
            },
            ColumnType::Date => parse_date(field).map(Value::Date),
            ColumnType::Utf8 => Some(Value::Text(field.to_string())),
        }
    }

    /// Infers each column's type from the first data row, then parses the
    /// whole matrix with the chosen parsers.
    ///
    /// Inference looks only at row 0; later rows never refine the decision.
    /// An empty field in a non-text column becomes `Value::Absent`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` when a non-empty field on a later row does not
    /// parse as the inferred column type.
    pub fn parse_table(
        &self,
        header: &[String],
        rows: &[Vec<String>],
    ) -> Result<(Vec<ColumnType>, Vec<Vec<Value>>), Error> {
        let width = header.len();
        let types: Vec<ColumnType> = (0..width)
            .map(|j| {
                rows.first()
                    .map_or(ColumnType::Utf8, |row| self.probe(&row[j]))
            })
            .collect();

        let mut cells = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let mut parsed = Vec::with_capacity(width);
            for (j, column_type) in types.iter().enumerate() {
                let field = &row[j];
                if field.is_empty() && *column_type != ColumnType::Utf8 {
                    parsed.push(Value::Absent);
                    continue;
                }
                match self.parse(*column_type, field) {
                    Some(value) => parsed.push(value),
                    None => {
                        return Err(Error::Parse {
                            column: header[j].clone(),
                            row: i,
                            value: field.clone(),
                            expected: *column_type,
                        });
                    }
                }
            }
            cells.push(parsed);
        }
        Ok((types, cells))
    }
}

fn probe_int(field: &str) -> bool {
    field.parse::<i64>().is_ok()
}

fn probe_float(field: &str) -> bool {
    field.parse::<f64>().is_ok()
}

fn probe_bool(field: &str) -> bool {
    matches!(field, "true" | "false" | "True" | "False")
}

fn probe_date(field: &str) -> bool {
    parse_date(field).is_some()
}

/// Parses an ISO-8601 calendar date, tolerating `/` as the separator.
fn parse_date(field: &str) -> Option<NaiveDate> {
    field.replace('/', "-").parse::<NaiveDate>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn probe_order_prefers_specific_types() {
        let registry = TypeRegistry::default();
        assert_eq!(registry.probe("42"), ColumnType::Int64);
        assert_eq!(registry.probe("-3"), ColumnType::Int64);
        assert_eq!(registry.probe("4.5e3"), ColumnType::Float64);
        assert_eq!(registry.probe("True"), ColumnType::Bool);
        assert_eq!(registry.probe("2021-01-01"), ColumnType::Date);
        assert_eq!(registry.probe("2021/01/01"), ColumnType::Date);
        assert_eq!(registry.probe("hello"), ColumnType::Utf8);
        assert_eq!(registry.probe(""), ColumnType::Utf8);
    }

    #[test]
    fn bool_probe_is_case_sensitive() {
        let registry = TypeRegistry::default();
        assert_eq!(registry.probe("TRUE"), ColumnType::Utf8);
        assert_eq!(registry.probe("False"), ColumnType::Bool);
    }

    #[test]
    fn parsers_mirror_probes() {
        let registry = TypeRegistry::default();
        for field in &["17", "-0.5", "False", "2022/02/02", "plain text"] {
            let column_type = registry.probe(field);
            assert!(registry.parse(column_type, field).is_some());
        }
    }

    #[test]
    fn parse_values() {
        let registry = TypeRegistry::default();
        assert_eq!(
            registry.parse(ColumnType::Int64, "12"),
            Some(Value::Int(12))
        );
        assert_eq!(
            registry.parse(ColumnType::Date, "2021/03/04"),
            Some(Value::Date(NaiveDate::from_ymd(2021, 3, 4)))
        );
        assert_eq!(registry.parse(ColumnType::Int64, "12x"), None);
        assert_eq!(registry.parse(ColumnType::Int64, " 12"), None);
    }

    #[test]
    fn inference_uses_row_zero_only() {
        let registry = TypeRegistry::default();
        let header = strings(&["d"]);
        let rows = vec![strings(&["2021-01-01"]), strings(&["2022-02-02"])];
        let (types, cells) = registry.parse_table(&header, &rows).unwrap();
        assert_eq!(types, vec![ColumnType::Date]);
        assert_eq!(
            cells[1][0],
            Value::Date(NaiveDate::from_ymd(2022, 2, 2))
        );
    }

    #[test]
    fn later_row_mismatch_is_fatal() {
        let registry = TypeRegistry::default();
        let header = strings(&["n"]);
        let rows = vec![strings(&["1"]), strings(&["2"]), strings(&["x"])];
        let err = registry.parse_table(&header, &rows).unwrap_err();
        match err {
            Error::Parse {
                column,
                row,
                value,
                expected,
            } => {
                assert_eq!(column, "n");
                assert_eq!(row, 2);
                assert_eq!(value, "x");
                assert_eq!(expected, ColumnType::Int64);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn empty_field_in_typed_column_is_absent() {
        let registry = TypeRegistry::default();
        let header = strings(&["n", "s"]);
        let rows = vec![strings(&["1", "a"]), strings(&["", ""])];
        let (types, cells) = registry.parse_table(&header, &rows).unwrap();
        assert_eq!(types, vec![ColumnType::Int64, ColumnType::Utf8]);
        assert_eq!(cells[1][0], Value::Absent);
        assert_eq!(cells[1][1], Value::Text(String::new()));
    }

    #[test]
    fn no_data_rows_infers_text() {
        let registry = TypeRegistry::default();
        let header = strings(&["a", "b"]);
        let (types, cells) = registry.parse_table(&header, &[]).unwrap();
        assert_eq!(types, vec![ColumnType::Utf8, ColumnType::Utf8]);
        assert!(cells.is_empty());
    }
}
