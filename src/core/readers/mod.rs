//! Format readers turning a source file into [`ImportRow`]s.
//!
//! Every reader loads the whole file into memory, and every failure is
//! reported as [`ImportError::FormatRead`] tagged with the reader's format.

pub mod csv;
pub mod json;
pub mod txt;
pub mod xml;

pub use self::csv::CsvReader;
pub use self::json::JsonReader;
pub use self::txt::TxtReader;
pub use self::xml::XmlReader;

use crate::domain::model::{FileType, HeaderPolicy};
use crate::domain::ports::RowSource;
use crate::utils::error::{ImportError, Result};
use std::path::Path;

/// Cell values recognised as column titles when sniffing a header line.
const HEADER_NAMES: [&str; 6] = ["fname", "lname", "emailaddress", "firstname", "lastname", "email"];

/// One reader per supported format.
pub fn default_readers(header_policy: HeaderPolicy) -> Vec<Box<dyn RowSource>> {
    vec![
        Box::new(CsvReader::new(header_policy)),
        Box::new(JsonReader),
        Box::new(TxtReader::new(header_policy)),
        Box::new(XmlReader),
    ]
}

pub(crate) fn read_text(file_type: FileType, path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ImportError::format_read(file_type, e))
}

/// Whether the record at position 0 should be dropped.
pub(crate) fn skip_first_record(policy: HeaderPolicy, first: &[String]) -> bool {
    match policy {
        HeaderPolicy::FirstRow => true,
        HeaderPolicy::Detect => looks_like_header(first),
        HeaderPolicy::None => false,
    }
}

fn looks_like_header(fields: &[String]) -> bool {
    fields.iter().any(|field| {
        let field = field.trim().to_ascii_lowercase();
        HEADER_NAMES.contains(&field.as_str())
    })
}
