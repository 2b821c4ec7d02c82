pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{DryRunRepository, HttpCustomerRepository, LocalRoot};
pub use config::ImportConfig;
pub use crate::core::{customer_create::CustomerCreator, import::ImportCommand};
pub use domain::model::{
    CustomerDraft, FailurePolicy, FileType, HeaderPolicy, ImportRow, ImportSummary, RowOutcome,
    RowStatus, SavedCustomer,
};
pub use utils::error::{ImportError, Result, SaveError};
