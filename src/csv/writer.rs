use itertools::Itertools;

use crate::table::DataFrame;

/// Serializes a frame as comma-separated text.
///
/// A field is quoted, with internal quotes doubled, only when its text
/// contains the delimiter. Fields holding just quotes or line breaks stay
/// bare, a weaker rule than RFC 4180 that round-trips against the reader
/// whenever no field contains a comma.
pub(crate) fn to_csv(frame: &DataFrame) -> String {
    let mut out = String::new();
    out.push_str(&frame.columns().iter().map(|label| escape(label)).join(","));
    out.push('\n');
    for i in 0..frame.shape().0 {
        out.push_str(
            &frame
                .row_cells(i)
                .map(|value| escape(&value.to_string()))
                .join(","),
        );
        out.push('\n');
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains(',') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
