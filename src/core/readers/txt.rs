use super::skip_first_record;
use crate::domain::model::{FileType, HeaderPolicy, ImportRow};
use crate::domain::ports::RowSource;
use crate::utils::error::Result;
use std::path::Path;

/// Reads plain text files with one comma separated record per line.
///
/// Fields are split on every `,`; quoting is not understood, so a comma inside
/// a quoted value splits it.
#[derive(Debug, Clone, Default)]
pub struct TxtReader {
    header_policy: HeaderPolicy,
}

impl TxtReader {
    pub fn new(header_policy: HeaderPolicy) -> Self {
        Self { header_policy }
    }

    pub fn parse(&self, content: &str) -> Vec<ImportRow> {
        let mut rows = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let fields: Vec<String> = line.split(',').map(str::to_string).collect();

            if index == 0 && skip_first_record(self.header_policy, &fields) {
                tracing::debug!("Skipping TXT header: {}", line);
                continue;
            }

            rows.push(ImportRow::from_positional(index + 1, &fields));
        }

        rows
    }
}

impl RowSource for TxtReader {
    fn file_type(&self) -> FileType {
        FileType::Txt
    }

    fn read_rows(&self, path: &Path) -> Result<Vec<ImportRow>> {
        let content = super::read_text(FileType::Txt, path)?;
        Ok(self.parse(&content))
    }
}
