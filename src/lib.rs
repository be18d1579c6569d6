pub mod accounts;
pub mod config;
pub mod db;
pub mod error;
pub mod seed;

pub use accounts::AccountStore;
pub use config::AppConfig;
pub use error::{ErrorKind, StoreError, StoreResult};
