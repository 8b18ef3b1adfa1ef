//! Error types for harmony-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarmonyError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, HarmonyError>;
