use super::skip_first_record;
use crate::domain::model::{FileType, HeaderPolicy, ImportRow};
use crate::domain::ports::RowSource;
use crate::utils::error::{ImportError, Result};
use csv::ReaderBuilder;
use std::path::Path;

/// Reads comma separated files with quoting support.
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    header_policy: HeaderPolicy,
}

impl CsvReader {
    pub fn new(header_policy: HeaderPolicy) -> Self {
        Self { header_policy }
    }

    /// Parse CSV text into rows. Records may have any number of fields.
    pub fn parse(&self, content: &str) -> Result<Vec<ImportRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| ImportError::format_read(FileType::Csv, e))?;
            let fields: Vec<String> = record.iter().map(str::to_string).collect();

            if index == 0 && skip_first_record(self.header_policy, &fields) {
                tracing::debug!("Skipping CSV header: {:?}", fields);
                continue;
            }

            rows.push(ImportRow::from_positional(index + 1, &fields));
        }

        Ok(rows)
    }
}

impl RowSource for CsvReader {
    fn file_type(&self) -> FileType {
        FileType::Csv
    }

    fn read_rows(&self, path: &Path) -> Result<Vec<ImportRow>> {
        let content = super::read_text(FileType::Csv, path)?;
        self.parse(&content)
    }
}
