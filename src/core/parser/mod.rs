//! Input parsing: relationship CSV files and escaped taxonomy paths

pub mod csv_parser;
pub mod unescape;

pub use csv_parser::{parse_relations_csv, parse_relations_str, RelationRow};
pub use unescape::unescape;
