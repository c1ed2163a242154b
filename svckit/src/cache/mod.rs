pub mod sentinel;

pub use sentinel::{KeyValueStore, SentinelStore};
