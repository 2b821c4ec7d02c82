use crate::domain::model::{CustomerDraft, FailurePolicy, FileType, HeaderPolicy, ImportRow, SavedCustomer};
use crate::utils::error::{ImportError, Result, SaveError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Produces import rows from a file of one format.
pub trait RowSource: Send + Sync {
    fn file_type(&self) -> FileType;
    fn read_rows(&self, path: &Path) -> Result<Vec<ImportRow>>;
}

/// Persists customer drafts on the platform.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn save(&self, draft: &CustomerDraft) -> std::result::Result<SavedCustomer, SaveError>;
}

/// Base directory that import sources are resolved against.
pub trait RootResolver: Send + Sync {
    fn root_dir(&self) -> &str;

    /// `<root>/<source>`, failing when no such file exists.
    fn resolve_source(&self, source: &str) -> Result<PathBuf> {
        let path = PathBuf::from(format!("{}/{}", self.root_dir(), source));
        if !path.is_file() {
            return Err(ImportError::FileNotFound { path });
        }
        Ok(path)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn root_dir(&self) -> Option<&str>;
    fn header_policy(&self) -> HeaderPolicy;
    fn failure_policy(&self) -> FailurePolicy;
}
