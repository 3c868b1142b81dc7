//! An interface to CSV (comma-separated values).

pub(crate) mod reader;
pub(crate) mod writer;
