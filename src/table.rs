use std::fmt;
use std::io::Read;
use thiserror::Error;

use crate::csv::{reader, writer};
use crate::datatypes::{ColumnType, Value};
use crate::parse::TypeRegistry;

/// The delimited-text variants the load path understands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputFormat {
    CommaSeparated,
    TabSeparated,
}

impl InputFormat {
    fn delimiter(self) -> char {
        match self {
            Self::CommaSeparated => ',',
            Self::TabSeparated => '\t',
        }
    }
}

/// The ways a frame operation can fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("data frame is empty")]
    Empty,
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("no data available")]
    NoData,
    #[error("column {0:?} not found")]
    ColumnNotFound(String),
    #[error("row {0:?} not found")]
    RowNotFound(String),
    #[error("index {index} is out of bounds for an axis of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("column {column:?} row {row}: cannot parse {value:?} as {expected}")]
    Parse {
        column: String,
        row: usize,
        value: String,
        expected: ColumnType,
    },
    #[error("column {column:?} is {actual}, not numeric")]
    NotNumeric { column: String, actual: String },
    #[error("column {column:?} has no value at row {row}")]
    Absent { column: String, row: usize },
    #[error("no columns requested")]
    EmptySelection,
    #[error("row and column cannot both cover the whole frame")]
    FullTableSelection,
}

/// One axis of a [`get_elem`](DataFrame::get_elem) request.
#[derive(Clone, Copy, Debug)]
pub enum Selector<'a> {
    Index(usize),
    Label(&'a str),
    All,
}

impl From<usize> for Selector<'static> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for Selector<'a> {
    fn from(label: &'a str) -> Self {
        Self::Label(label)
    }
}

/// What [`get_elem`](DataFrame::get_elem) resolves to.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Cell(Value),
    Vector(Vec<Value>),
}

/// Tabular data with labeled, typed columns, stored row-major.
#[derive(Clone, Debug)]
pub struct DataFrame {
    cells: Vec<Vec<Value>>,
    col_label: Vec<String>,
    row_label: Vec<String>,
    col_type: Vec<Option<ColumnType>>,
}

impl DataFrame {
    /// Creates a blank `width` × `height` frame for cell-by-cell population.
    ///
    /// Every cell starts out `Absent`, labels default to the row or column
    /// index as text, and no column types are declared.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![Value::Absent; width]; height],
            col_label: (0..width).map(|j| j.to_string()).collect(),
            row_label: (0..height).map(|i| i.to_string()).collect(),
            col_type: vec![None; width],
        }
    }

    /// Loads a frame from delimited text, inferring each column's type from
    /// the first data row.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, the input holds no rows at all, or
    /// a field on a row after the first does not parse as its column's
    /// inferred type.
    pub fn from_reader<R: Read>(input: R, format: InputFormat) -> Result<Self, Error> {
        Self::from_reader_with(input, format, &TypeRegistry::default())
    }

    /// Loads a frame like [`from_reader`](Self::from_reader) with an
    /// explicit probe registry.
    ///
    /// # Errors
    ///
    /// Same as [`from_reader`](Self::from_reader).
    pub fn from_reader_with<R: Read>(
        mut input: R,
        format: InputFormat,
        registry: &TypeRegistry,
    ) -> Result<Self, Error> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        let (header, rows) = reader::read_table(&text, format.delimiter())?;
        let (types, cells) = registry.parse_table(&header, &rows)?;
        let height = cells.len();
        Ok(Self {
            cells,
            col_label: header,
            row_label: (0..height).map(|i| i.to_string()).collect(),
            col_type: types.into_iter().map(Some).collect(),
        })
    }

    /// Returns whether the frame has no addressable cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() || self.cells[0].is_empty()
    }

    /// Returns the number of cells, rows × columns.
    #[must_use]
    pub fn size(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.cells.len() * self.cells[0].len()
        }
    }

    /// Returns the dimensions as `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        if self.is_empty() {
            (0, 0)
        } else {
            (self.cells.len(), self.cells[0].len())
        }
    }

    /// Returns the number of axes; always 2.
    #[must_use]
    pub fn ndim(&self) -> usize {
        2
    }

    /// Returns the column labels in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.col_label
    }

    /// Returns the row labels in order.
    #[must_use]
    pub fn row_labels(&self) -> &[String] {
        &self.row_label
    }

    /// Returns the per-column types; `None` marks an undeclared column.
    #[must_use]
    pub fn column_types(&self) -> &[Option<ColumnType>] {
        &self.col_type
    }

    fn width(&self) -> usize {
        self.col_label.len()
    }

    fn height(&self) -> usize {
        self.row_label.len()
    }

    pub(crate) fn column_index(&self, name: &str) -> Result<usize, Error> {
        self.col_label
            .iter()
            .position(|label| label == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    fn row_index(&self, name: &str) -> Result<usize, Error> {
        self.row_label
            .iter()
            .position(|label| label == name)
            .ok_or_else(|| Error::RowNotFound(name.to_string()))
    }

    pub(crate) fn row_cells(&self, i: usize) -> impl Iterator<Item = &Value> + '_ {
        self.cells[i].iter()
    }

    pub(crate) fn column_cells(&self, j: usize) -> impl Iterator<Item = &Value> + '_ {
        self.cells.iter().map(move |row| &row[j])
    }

    /// Removes the first column labeled `name` and returns its values in row
    /// order.
    ///
    /// The frame is rebuilt one column narrower; column labels and types
    /// shrink with it, row labels stay. The new backing store replaces the
    /// old one atomically, so no view of the old matrix survives.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` on an empty frame and `Error::ColumnNotFound`
    /// when no column carries `name`.
    pub fn pop(&mut self, name: &str) -> Result<Vec<Value>, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let target = self.column_index(name)?;
        let mut popped = Vec::with_capacity(self.cells.len());
        let mut rebuilt = Vec::with_capacity(self.cells.len());
        for row in self.cells.drain(..) {
            let mut narrowed = Vec::with_capacity(row.len() - 1);
            for (j, value) in row.into_iter().enumerate() {
                if j == target {
                    popped.push(value);
                } else {
                    narrowed.push(value);
                }
            }
            rebuilt.push(narrowed);
        }
        self.cells = rebuilt;
        self.col_label.remove(target);
        self.col_type.remove(target);
        Ok(popped)
    }

    /// Builds a new frame from the named columns, in the order given.
    ///
    /// Row order and row labels are preserved. Repeated names produce
    /// repeated columns, and each name resolves to its first match.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` on an empty frame, `Error::EmptySelection`
    /// when `names` is empty, and `Error::ColumnNotFound` for an unknown
    /// name.
    pub fn get(&self, names: &[&str]) -> Result<Self, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        if names.is_empty() {
            return Err(Error::EmptySelection);
        }
        let indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.subset(&indices))
    }

    /// Builds a new frame from the columns at `indices`, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` on an empty frame, `Error::EmptySelection`
    /// when `indices` is empty, and `Error::IndexOutOfBounds` for an index
    /// outside the frame's width.
    pub fn get_at(&self, indices: &[usize]) -> Result<Self, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        if indices.is_empty() {
            return Err(Error::EmptySelection);
        }
        for &index in indices {
            if index >= self.width() {
                return Err(Error::IndexOutOfBounds {
                    index,
                    len: self.width(),
                });
            }
        }
        Ok(self.subset(indices))
    }

    fn subset(&self, indices: &[usize]) -> Self {
        Self {
            cells: self
                .cells
                .iter()
                .map(|row| indices.iter().map(|&j| row[j].clone()).collect())
                .collect(),
            col_label: indices.iter().map(|&j| self.col_label[j].clone()).collect(),
            row_label: self.row_label.clone(),
            col_type: indices.iter().map(|&j| self.col_type[j]).collect(),
        }
    }

    /// Flexible element access.
    ///
    /// Two concrete selectors name a single cell. Selecting `All` on exactly
    /// one axis returns the other axis's full vector in original order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` on an empty frame, `Error::FullTableSelection`
    /// when both selectors are `All`, `Error::IndexOutOfBounds` for an
    /// out-of-range index, and a not-found error for an unknown label.
    pub fn get_elem(&self, row: Selector, col: Selector) -> Result<Selection, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let row_index = match row {
            Selector::Index(index) => {
                if index >= self.height() {
                    return Err(Error::IndexOutOfBounds {
                        index,
                        len: self.height(),
                    });
                }
                Some(index)
            }
            Selector::Label(label) => Some(self.row_index(label)?),
            Selector::All => None,
        };
        let col_index = match col {
            Selector::Index(index) => {
                if index >= self.width() {
                    return Err(Error::IndexOutOfBounds {
                        index,
                        len: self.width(),
                    });
                }
                Some(index)
            }
            Selector::Label(label) => Some(self.column_index(label)?),
            Selector::All => None,
        };
        match (row_index, col_index) {
            (Some(i), Some(j)) => Ok(Selection::Cell(self.cells[i][j].clone())),
            (Some(i), None) => Ok(Selection::Vector(self.cells[i].clone())),
            (None, Some(j)) => Ok(Selection::Vector(
                self.cells.iter().map(|row| row[j].clone()).collect(),
            )),
            (None, None) => Err(Error::FullTableSelection),
        }
    }

    /// Writes a cell on the programmatic-construction path.
    ///
    /// Declared column types are never changed by a cell write.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` when `row` or `col` is outside the
    /// frame.
    pub fn set(&mut self, row: usize, col: usize, value: Value) -> Result<(), Error> {
        if row >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: row,
                len: self.height(),
            });
        }
        if col >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: col,
                len: self.width(),
            });
        }
        self.cells[row][col] = value;
        Ok(())
    }

    /// Relabels a column.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` when `col` is outside the frame's
    /// width.
    pub fn set_col_label(&mut self, col: usize, label: &str) -> Result<(), Error> {
        if col >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: col,
                len: self.width(),
            });
        }
        self.col_label[col] = label.to_string();
        Ok(())
    }

    /// Relabels a row.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` when `row` is outside the frame's
    /// height.
    pub fn set_row_label(&mut self, row: usize, label: &str) -> Result<(), Error> {
        if row >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: row,
                len: self.height(),
            });
        }
        self.row_label[row] = label.to_string();
        Ok(())
    }

    /// Serializes the frame as comma-separated text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` on an empty frame.
    pub fn to_csv(&self) -> Result<String, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        Ok(writer::to_csv(self))
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\t")?;
        for label in &self.col_label {
            write!(f, "\t{}", label)?;
        }
        writeln!(f)?;
        for (label, row) in self.row_label.iter().zip(&self.cells) {
            write!(f, "{}", label)?;
            for value in row {
                write!(f, "\t{}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
