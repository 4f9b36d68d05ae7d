//! Error types for tablegen-codegen

use thiserror::Error;

/// Result type alias for tablegen-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during introspection and code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Driver unavailable, bad credentials or connection refused
    #[error("Database unreachable: {0}")]
    Unreachable(String),

    /// Comment or column query returned no rows
    #[error("Table not found or inaccessible: {0}")]
    TableNotFound(String),

    #[error("Introspection query failed: {0}")]
    QueryError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}
