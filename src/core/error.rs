//! Error taxonomy for the conversion engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    #[error("Request error: {message} for base currency: {base}")]
    Fetch { base: String, message: String },

    #[error("HTTP error: {status} for base currency: {base}")]
    Status { base: String, status: String },

    #[error("Failed to parse rate response for {base}: {message}")]
    Response { base: String, message: String },

    #[error("Failed to parse stored value for key {key}: {message}")]
    Parse { key: String, message: String },

    #[error("No rate for {to} in table for base currency: {base}")]
    MissingRate { base: String, to: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

pub type Result<T> = std::result::Result<T, FxError>;
