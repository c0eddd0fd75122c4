//! File import and export for the three entity collections.
//!
//! Codecs only translate between files and the `*Record` types in
//! [`record`]; persisting or loading entities is left to
//! [`crate::services::transfer`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub mod csv_format;
pub mod json_format;
pub mod record;

pub type TransferResult<T> = Result<T, TransferError>;

/// Failures that abort a whole import or export.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown entity `{0}`, expected clients, products or orders")]
    UnknownEntity(String),
    #[error("unknown format `{0}`, expected csv or json")]
    UnknownFormat(String),
}

/// Collection selected for an import or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Clients,
    Products,
    Orders,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Clients => "clients",
            EntityKind::Products => "products",
            EntityKind::Orders => "orders",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clients" | "client" => Ok(EntityKind::Clients),
            "products" | "product" => Ok(EntityKind::Products),
            "orders" | "order" => Ok(EntityKind::Orders),
            _ => Err(TransferError::UnknownEntity(s.to_string())),
        }
    }
}

/// File format of an import or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl FromStr for Format {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            _ => Err(TransferError::UnknownFormat(s.to_string())),
        }
    }
}

/// A record that was skipped during an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    /// 1-based position of the record in the file, header excluded.
    pub record: usize,
    pub message: String,
}

impl ImportFailure {
    pub fn new(record: usize, message: impl Into<String>) -> Self {
        Self {
            record,
            message: message.into(),
        }
    }
}

impl fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}: {}", self.record, self.message)
    }
}

/// Outcome of an import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub failures: Vec<ImportFailure>,
}

/// Records decoded from a file, each either usable or already rejected.
pub type Decoded<T> = Vec<Result<T, ImportFailure>>;
