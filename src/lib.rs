mod csv;
mod datatypes;
mod parse;
mod stats;
mod table;
mod token;

pub use datatypes::{ColumnType, Value};
pub use parse::TypeRegistry;
pub use table::{DataFrame, Error, InputFormat, Selection, Selector};
