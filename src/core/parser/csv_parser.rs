//! CSV parser for relationship data
//!
//! The first record is a header. Columns are addressed by name, so their order
//! doesn't matter and extra columns are ignored.

use std::error::Error;
use std::fs;
use std::path::Path;

/// Columns every relationship file must provide
pub const REQUIRED_COLUMNS: [&str; 4] = ["source", "target", "uninfected", "infected"];

/// One data row, fields exactly as written (paths still escaped)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationRow {
    /// Escaped source path
    pub source: String,
    /// Escaped target path
    pub target: String,
    /// Marker in the uninfected condition (`+`, `-` or `?`)
    pub uninfected: String,
    /// Marker in the infected condition (`+`, `-` or `?`)
    pub infected: String,
}

/// Parse a relationship CSV file
///
/// # Errors
/// Returns an error if the file cannot be read or its content is not a valid
/// relationship table (see [`parse_relations_str`])
pub fn parse_relations_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RelationRow>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    parse_relations_str(&content)
}

/// Parse relationship CSV content
///
/// Rows shorter than the header get empty trailing fields.
///
/// # Errors
/// Returns an error if the header is missing, lacks a required column, or a
/// quoted field is never closed
pub fn parse_relations_str(content: &str) -> Result<Vec<RelationRow>, Box<dyn Error>> {
    let mut records = split_records(content)?.into_iter();
    let headers = records.next().ok_or("Empty CSV: no header row found")?;

    let [source, target, uninfected, infected] = column_indices(&headers)?;

    let rows = records
        .map(|fields| {
            let field = |idx: usize| fields.get(idx).cloned().unwrap_or_default();
            RelationRow {
                source: field(source),
                target: field(target),
                uninfected: field(uninfected),
                infected: field(infected),
            }
        })
        .collect();

    Ok(rows)
}

/// Locate the required columns in the header
fn column_indices(headers: &[String]) -> Result<[usize; 4], Box<dyn Error>> {
    let mut indices = [0; 4];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("Missing required column '{name}'"))?;
    }
    Ok(indices)
}

/// Split CSV text into records of fields
///
/// Double-quoted fields may contain commas, newlines and `""` for a literal
/// quote. Blank lines produce no record.
fn split_records(content: &str) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_line = 0;
    let mut line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                line += 1;
                finish_record(&mut records, &mut record, &mut field);
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(format!("Unterminated quoted field starting on line {quote_line}").into());
    }
    finish_record(&mut records, &mut record, &mut field);

    Ok(records)
}

fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    record.push(std::mem::take(field));
    let fields = std::mem::take(record);
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        records.push(fields);
    }
}
