use crate::core::customer_create::CustomerCreator;
use crate::core::readers::default_readers;
use crate::domain::model::{FailurePolicy, FileType, HeaderPolicy, ImportSummary};
use crate::domain::ports::{ConfigProvider, CustomerRepository, RootResolver, RowSource};
use crate::utils::error::{ImportError, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// The `customer:import` command: resolve the source, pick the reader for its
/// extension and create the customers it contains.
pub struct ImportCommand<R: CustomerRepository, P: RootResolver> {
    root: P,
    readers: Vec<Box<dyn RowSource>>,
    creator: CustomerCreator<R>,
}

impl<R: CustomerRepository, P: RootResolver> ImportCommand<R, P> {
    pub fn new(
        root: P,
        repository: R,
        header_policy: HeaderPolicy,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            root,
            readers: default_readers(header_policy),
            creator: CustomerCreator::new(repository, failure_policy),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C, root: P, repository: R) -> Self {
        Self::new(root, repository, config.header_policy(), config.failure_policy())
    }

    /// Replace the format readers.
    pub fn with_readers(mut self, readers: Vec<Box<dyn RowSource>>) -> Self {
        self.readers = readers;
        self
    }

    pub fn resolve_source(&self, source: &str) -> Result<PathBuf> {
        self.root.resolve_source(source)
    }

    /// File type from the (case-insensitive) extension of `path`.
    pub fn file_type(path: &Path) -> Result<FileType> {
        let extension = FileType::extension_of(path);
        FileType::from_extension(&extension).ok_or(ImportError::UnsupportedFileType { extension })
    }

    fn reader_for(&self, file_type: FileType) -> Result<&dyn RowSource> {
        self.readers
            .iter()
            .find(|reader| reader.file_type() == file_type)
            .map(|reader| &**reader)
            .ok_or_else(|| ImportError::UnsupportedFileType {
                extension: file_type.to_string().to_lowercase(),
            })
    }

    pub async fn execute(&self, profile: &str, source: &str) -> Result<ImportSummary> {
        let started_at = Utc::now();
        tracing::info!("📥 Importing customers using profile '{}' from '{}'", profile, source);

        let path = self.resolve_source(source)?;
        let file_type = Self::file_type(&path)?;
        let reader = self.reader_for(file_type)?;

        tracing::debug!("Reading {} file {}", file_type, path.display());
        let rows = reader.read_rows(&path)?;
        tracing::info!("Read {} records from {}", rows.len(), path.display());

        let outcomes = self.creator.create_customers(rows).await?;
        let summary = ImportSummary::new(profile, source, file_type, outcomes, started_at);

        tracing::info!(
            "Created {} customers, skipped {}, failed {}",
            summary.created,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }
}
