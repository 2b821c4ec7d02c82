pub mod customer_create;
pub mod import;
pub mod readers;

pub use crate::domain::model::{CustomerDraft, FileType, ImportRow, ImportSummary};
pub use crate::domain::ports::{ConfigProvider, CustomerRepository, RootResolver, RowSource};
pub use crate::utils::error::Result;
