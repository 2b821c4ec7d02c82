use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source formats the importer knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Json,
    Txt,
    Xml,
}

impl FileType {
    pub const ALL: [FileType; 4] = [FileType::Csv, FileType::Json, FileType::Txt, FileType::Xml];

    /// Parse a file type from an extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "txt" => Some(Self::Txt),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// Lowercase extension of `path`, empty when it has none.
    pub fn extension_of(path: &Path) -> String {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileType::Csv => "CSV",
            FileType::Json => "JSON",
            FileType::Txt => "TXT",
            FileType::Xml => "XML",
        };
        f.write_str(name)
    }
}

/// Where a customer field is looked up in a raw record: by position first,
/// then by name.
#[derive(Debug, Clone, Copy)]
pub struct FieldSlot {
    pub index: usize,
    pub key: &'static str,
}

pub const FIRST_NAME: FieldSlot = FieldSlot { index: 0, key: "fname" };
pub const LAST_NAME: FieldSlot = FieldSlot { index: 1, key: "lname" };
pub const EMAIL: FieldSlot = FieldSlot { index: 2, key: "emailaddress" };

/// One record as produced by a reader, already resolved into named fields.
///
/// Values are kept as read; emptiness is only judged when the row is turned
/// into a [`CustomerDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ImportRow {
    /// 1-based position of the record in the source file.
    pub position: usize,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ImportRow {
    pub fn new(
        position: usize,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            position,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Build a row from an ordered list of fields (CSV, TXT, JSON arrays).
    pub fn from_positional(position: usize, fields: &[String]) -> Self {
        let pick = |slot: FieldSlot| fields.get(slot.index).cloned().unwrap_or_default();
        Self {
            position,
            first_name: pick(FIRST_NAME),
            last_name: pick(LAST_NAME),
            email: pick(EMAIL),
        }
    }

    /// Build a row from a field-name map (JSON objects, XML rows).
    ///
    /// A numeric key ("0", "1", "2") wins over the named key, mirroring the
    /// positional-then-named lookup. A present but empty value does not fall
    /// through to the next candidate.
    pub fn from_named(position: usize, fields: &HashMap<String, String>) -> Self {
        let pick = |slot: FieldSlot| {
            fields
                .get(&slot.index.to_string())
                .or_else(|| fields.get(slot.key))
                .cloned()
                .unwrap_or_default()
        };
        Self {
            position,
            first_name: pick(FIRST_NAME),
            last_name: pick(LAST_NAME),
            email: pick(EMAIL),
        }
    }

    /// Names of the customer fields that are blank in this row.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (FIRST_NAME.key, &self.first_name),
            (LAST_NAME.key, &self.last_name),
            (EMAIL.key, &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    /// The draft to submit, or `None` when any field is blank.
    pub fn to_draft(&self) -> Option<CustomerDraft> {
        if !self.missing_fields().is_empty() {
            return None;
        }
        Some(CustomerDraft {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}

/// A customer ready to be handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// What the repository reports back after a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCustomer {
    pub id: Option<u64>,
    pub email: String,
}

/// What to do with the CSV/TXT record at position 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// Always drop the first record.
    #[default]
    FirstRow,
    /// Drop the first record only when it looks like a header line.
    Detect,
    /// Keep every record.
    None,
}

impl FromStr for HeaderPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "first_row" => Ok(Self::FirstRow),
            "detect" => Ok(Self::Detect),
            "none" => Ok(Self::None),
            other => Err(format!(
                "unknown header policy '{}', expected first_row, detect or none",
                other
            )),
        }
    }
}

/// How the importer reacts to a customer that cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failed save.
    #[default]
    Abort,
    /// Record the failure and keep importing.
    Continue,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "continue" => Ok(Self::Continue),
            other => Err(format!(
                "unknown failure policy '{}', expected abort or continue",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    Created { customer_id: Option<u64> },
    Skipped { missing: Vec<&'static str> },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOutcome {
    pub position: usize,
    #[serde(flatten)]
    pub status: RowStatus,
}

/// Result of one `customer:import` run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub profile: String,
    pub source: String,
    pub file_type: FileType,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<RowOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ImportSummary {
    pub fn new(
        profile: &str,
        source: &str,
        file_type: FileType,
        outcomes: Vec<RowOutcome>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let count = |pred: fn(&RowStatus) -> bool| outcomes.iter().filter(|o| pred(&o.status)).count();
        Self {
            profile: profile.to_string(),
            source: source.to_string(),
            file_type,
            created: count(|s| matches!(s, RowStatus::Created { .. })),
            skipped: count(|s| matches!(s, RowStatus::Skipped { .. })),
            failed: count(|s| matches!(s, RowStatus::Failed { .. })),
            outcomes,
            started_at,
            finished_at: Utc::now(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
