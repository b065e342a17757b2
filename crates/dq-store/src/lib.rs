pub mod error;
pub mod paths;
pub mod store;

pub use error::{Result, StoreError};
pub use paths::{DATA_DIR_ENV_VAR, data_root};
pub use store::RuleSetStore;
