pub mod catalog;
pub mod query_builder;
pub mod retry;
pub mod session;

pub use catalog::{MutantCatalog, MutantStore, RowScan};
pub use query_builder::QueryBuilder;
pub use retry::{RetryPolicy, Retryable};
pub use session::ClusterSession;
