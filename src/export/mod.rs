//! Roster export formats.

mod csv;

pub use self::csv::{CSV_HEADERS, csv_file_name, to_csv_string, write_csv};
