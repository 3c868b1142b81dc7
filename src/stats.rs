use num_traits::ToPrimitive;
use statistical::mean;

use crate::datatypes::{ColumnType, Value};
use crate::table::{DataFrame, Error};

/// A numeric column pulled out of a frame, in its native domain.
enum Numeric {
    Int(Vec<i64>),
    Float(Vec<f64>),
}

impl DataFrame {
    /// Computes the arithmetic mean of a numeric column.
    ///
    /// Integer columns accumulate in `i64` and convert to `f64` at the end;
    /// float columns go through the statistics helper.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` on an empty frame, `Error::ColumnNotFound` for
    /// an unknown label, `Error::NotNumeric` unless the column is Int64 or
    /// Float64, and `Error::Absent` when a cell holds no value.
    pub fn mean(&self, name: &str) -> Result<f64, Error> {
        match self.numeric_values(name)? {
            Numeric::Int(values) => {
                let total = values.iter().sum::<i64>().to_f64().unwrap_or_default();
                let count = values.len().to_f64().unwrap_or_default();
                Ok(total / count)
            }
            Numeric::Float(values) => Ok(mean(&values)),
        }
    }

    /// Finds the maximum of a numeric column, widened to `f64`.
    ///
    /// The first row's value seeds the running extreme.
    ///
    /// # Errors
    ///
    /// Same conditions as [`mean`](Self::mean).
    pub fn max(&self, name: &str) -> Result<f64, Error> {
        match self.numeric_values(name)? {
            Numeric::Int(values) => {
                let mut extreme = values[0];
                for &v in &values[1..] {
                    if v > extreme {
                        extreme = v;
                    }
                }
                Ok(extreme.to_f64().unwrap_or_default())
            }
            Numeric::Float(values) => {
                let mut extreme = values[0];
                for &v in &values[1..] {
                    if v > extreme {
                        extreme = v;
                    }
                }
                Ok(extreme)
            }
        }
    }

    /// Finds the minimum of a numeric column, widened to `f64`.
    ///
    /// The first row's value seeds the running extreme.
    ///
    /// # Errors
    ///
    /// Same conditions as [`mean`](Self::mean).
    pub fn min(&self, name: &str) -> Result<f64, Error> {
        match self.numeric_values(name)? {
            Numeric::Int(values) => {
                let mut extreme = values[0];
                for &v in &values[1..] {
                    if v < extreme {
                        extreme = v;
                    }
                }
                Ok(extreme.to_f64().unwrap_or_default())
            }
            Numeric::Float(values) => {
                let mut extreme = values[0];
                for &v in &values[1..] {
                    if v < extreme {
                        extreme = v;
                    }
                }
                Ok(extreme)
            }
        }
    }

    fn numeric_values(&self, name: &str) -> Result<Numeric, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let j = self.column_index(name)?;
        match self.column_types()[j] {
            Some(ColumnType::Int64) => {
                let mut values = Vec::new();
                for (i, value) in self.column_cells(j).enumerate() {
                    match value {
                        Value::Int(x) => values.push(*x),
                        Value::Absent => {
                            return Err(Error::Absent {
                                column: name.to_string(),
                                row: i,
                            });
                        }
                        other => return Err(not_numeric(name, other)),
                    }
                }
                Ok(Numeric::Int(values))
            }
            Some(ColumnType::Float64) => {
                let mut values = Vec::new();
                for (i, value) in self.column_cells(j).enumerate() {
                    match value {
                        Value::Float(x) => values.push(*x),
                        Value::Absent => {
                            return Err(Error::Absent {
                                column: name.to_string(),
                                row: i,
                            });
                        }
                        other => return Err(not_numeric(name, other)),
                    }
                }
                Ok(Numeric::Float(values))
            }
            Some(other) => Err(Error::NotNumeric {
                column: name.to_string(),
                actual: other.to_string(),
            }),
            None => Err(Error::NotNumeric {
                column: name.to_string(),
                actual: "untyped".to_string(),
            }),
        }
    }
}

fn not_numeric(name: &str, value: &Value) -> Error {
    Error::NotNumeric {
        column: name.to_string(),
        actual: value
            .column_type()
            .map_or_else(|| "untyped".to_string(), |t| t.to_string()),
    }
}
