//! Scanning of raw delimited text into rows of classified fields.

/// How a raw field was written in the input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FieldKind {
    /// An unquoted run of characters.
    Bare,
    /// A quoted token, still wearing its surrounding quotes.
    Quoted,
    /// Nothing between two delimiters.
    Empty,
}

/// One raw field as it appeared in the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RawField {
    pub text: String,
    pub kind: FieldKind,
}

impl RawField {
    fn empty() -> Self {
        Self {
            text: String::new(),
            kind: FieldKind::Empty,
        }
    }
}

/// Tokenized input: a header row plus data rows, all of the header's width.
#[derive(Debug)]
pub(crate) struct RawTable {
    pub header: Vec<RawField>,
    pub rows: Vec<Vec<RawField>>,
}

/// Splits `input` into a header row and data rows of raw fields.
///
/// Quoted fields may contain the delimiter, doubled quotes, and line breaks.
/// Data rows shorter than the header are padded with empty fields and longer
/// ones are truncated, so structural mismatch never reaches the consumer.
/// Returns `None` when the input holds no rows at all.
pub(crate) fn tokenize(input: &str, delimiter: char) -> Option<RawTable> {
    let mut rows = scan(input, delimiter);
    if rows.is_empty() {
        return None;
    }
    let header = rows.remove(0);
    let width = header.len();
    for row in &mut rows {
        row.resize(width, RawField::empty());
    }
    Some(RawTable { header, rows })
}

fn scan(input: &str, delimiter: char) -> Vec<Vec<RawField>> {
    let mut rows = Vec::new();
    let mut row: Vec<RawField> = Vec::new();
    let mut text = String::new();
    let mut kind = FieldKind::Empty;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == delimiter {
            row.push(RawField {
                text: std::mem::take(&mut text),
                kind,
            });
            kind = FieldKind::Empty;
        } else if c == '\n' || c == '\r' {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            row.push(RawField {
                text: std::mem::take(&mut text),
                kind,
            });
            kind = FieldKind::Empty;
            rows.push(std::mem::take(&mut row));
        } else if c == '"' && kind == FieldKind::Empty {
            kind = FieldKind::Quoted;
            text.push('"');
            let mut closed = false;
            while let Some(q) = chars.next() {
                if q == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        text.push_str("\"\"");
                    } else {
                        text.push('"');
                        closed = true;
                        break;
                    }
                } else {
                    text.push(q);
                }
            }
            // end of input closes an unterminated quote
            if !closed {
                text.push('"');
            }
        } else {
            if kind == FieldKind::Empty {
                kind = FieldKind::Bare;
            }
            text.push(c);
        }
    }

    // a pending field means the last line had no trailing newline
    if !row.is_empty() || kind != FieldKind::Empty || !text.is_empty() {
        row.push(RawField { text, kind });
        rows.push(row);
    }
    rows
}
