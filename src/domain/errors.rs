use chrono::NaiveDate;
use thiserror::Error;

/// Result type returned by the domain constructors and order assembly.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Violations of the shop's domain rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The product name is empty after trimming.
    #[error("product name cannot be empty")]
    EmptyProductName,
    /// The product price is zero or negative.
    #[error("price must be positive")]
    NonPositivePrice,
    /// The product stock is negative.
    #[error("stock cannot be negative")]
    NegativeStock,
    /// The email does not match `localpart@domain.tld`.
    #[error("invalid email format `{0}`")]
    InvalidEmail(String),
    /// The phone does not match the simplified E.164 grammar.
    #[error("invalid phone format `{0}`")]
    InvalidPhone(String),
    /// An order line was requested with a zero or negative quantity.
    #[error("quantity must be positive")]
    NonPositiveQuantity,
    /// The product does not have enough unreserved stock for the line.
    #[error(
        "insufficient stock for product {product_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        product_id: i32,
        requested: i32,
        available: i32,
    },
    /// The product is already on the order at a different unit price.
    #[error("product {product_id} is already on the order at a different unit price")]
    UnitPriceChanged { product_id: i32 },
    /// The same product appears more than once in a pre-built item list.
    #[error("product {product_id} appears more than once in the order")]
    DuplicateItem { product_id: i32 },
    /// A status string outside the supported vocabulary.
    #[error("unknown order status `{0}`")]
    UnknownStatus(String),
    /// The reporting range ends before it starts.
    #[error("date range ends ({end}) before it starts ({start})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}
