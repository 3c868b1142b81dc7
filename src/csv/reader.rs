use crate::table::Error;
use crate::token::{self, FieldKind, RawField};

/// Turns a raw token into its logical string value.
///
/// Bare tokens pass through verbatim. Quoted tokens lose exactly one leading
/// and one trailing quote, then every doubled quote collapses to a single
/// one; no other escapes exist. An empty field decodes to the empty string.
/// This step cannot fail on well-formed tokenizer output.
pub(crate) fn decode(field: &RawField) -> String {
    match field.kind {
        FieldKind::Bare => field.text.clone(),
        FieldKind::Quoted => {
            let chopped = &field.text[1..field.text.len() - 1];
            chopped.replace("\"\"", "\"")
        }
        FieldKind::Empty => String::new(),
    }
}

/// Tokenizes and decodes delimited text into a header plus data rows.
///
/// # Errors
///
/// Returns `Error::NoData` when the input holds no rows at all.
pub(crate) fn read_table(
    input: &str,
    delimiter: char,
) -> Result<(Vec<String>, Vec<Vec<String>>), Error> {
    let raw = token::tokenize(input, delimiter).ok_or(Error::NoData)?;
    let header = raw.header.iter().map(decode).collect();
    let rows = raw
        .rows
        .iter()
        .map(|row| row.iter().map(decode).collect())
        .collect();
    Ok((header, rows))
}
