// Adapters layer: concrete implementations of the domain ports (repository, filesystem root).

pub mod dry_run;
pub mod http;
pub mod storage;

pub use dry_run::DryRunRepository;
pub use http::HttpCustomerRepository;
pub use storage::LocalRoot;
