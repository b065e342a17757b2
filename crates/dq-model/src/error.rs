use thiserror::Error;

#[derive(Debug, Error)]
pub enum DqError {
    #[error("malformed interface name: {0}")]
    InterfaceName(String),
}

pub type Result<T> = std::result::Result<T, DqError>;
