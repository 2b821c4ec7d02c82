use crate::domain::model::{FileType, ImportRow};
use crate::domain::ports::RowSource;
use crate::utils::error::{ImportError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Reads a JSON document holding a collection of customer records.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

impl JsonReader {
    pub fn parse(&self, content: &str) -> Result<Vec<ImportRow>> {
        let document: Value =
            serde_json::from_str(content).map_err(|e| ImportError::format_read(FileType::Json, e))?;

        let records: Vec<&Value> = match &document {
            Value::Array(items) => items.iter().collect(),
            // 物件也當作集合處理：逐一取值
            Value::Object(obj) => obj.values().collect(),
            other => {
                tracing::warn!("JSON document is not a collection ({}), nothing to import", kind(other));
                return Ok(Vec::new());
            }
        };

        Ok(records
            .into_iter()
            .enumerate()
            .map(|(index, record)| to_row(index + 1, record))
            .collect())
    }
}

fn to_row(position: usize, record: &Value) -> ImportRow {
    match record {
        Value::Object(obj) => {
            let fields: HashMap<String, String> = obj
                .iter()
                .filter_map(|(key, value)| field_text(value).map(|text| (key.clone(), text)))
                .collect();
            ImportRow::from_named(position, &fields)
        }
        Value::Array(items) => {
            // null 的欄位視為空值，保留位置
            let fields: Vec<String> = items
                .iter()
                .map(|value| field_text(value).unwrap_or_default())
                .collect();
            ImportRow::from_positional(position, &fields)
        }
        other => {
            tracing::debug!("JSON record {} is a {}, not a record", position, kind(other));
            ImportRow {
                position,
                ..ImportRow::default()
            }
        }
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested => Some(nested.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl RowSource for JsonReader {
    fn file_type(&self) -> FileType {
        FileType::Json
    }

    fn read_rows(&self, path: &Path) -> Result<Vec<ImportRow>> {
        let content = super::read_text(FileType::Json, path)?;
        self.parse(&content)
    }
}
