use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::domain::errors::{ValidationError, ValidationResult};
use crate::domain::sanitize_inline_text;
use crate::pagination::Pagination;

/// Domain representation of a sellable product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Current price represented in the smallest currency unit.
    pub price_cents: i64,
    /// Free-form category used for grouping in reports.
    pub category: String,
    /// Units currently available for sale.
    pub stock: i32,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, Validate)]
pub struct NewProduct {
    /// Explicit identifier, used when importing records that carry ids.
    pub id: Option<i32>,
    /// Human-readable name of the product.
    #[validate(length(min = 1))]
    pub name: String,
    /// Price represented in the smallest currency unit.
    #[validate(range(min = 1))]
    pub price_cents: i64,
    /// Free-form category used for grouping in reports.
    pub category: String,
    /// Initial units available for sale.
    #[validate(range(min = 0))]
    pub stock: i32,
}

impl NewProduct {
    /// Build a validated product payload.
    pub fn new(
        name: impl AsRef<str>,
        price_cents: i64,
        category: impl AsRef<str>,
        stock: i32,
    ) -> ValidationResult<Self> {
        let payload = Self {
            id: None,
            name: sanitize_inline_text(name.as_ref()),
            price_cents,
            category: sanitize_inline_text(category.as_ref()),
            stock,
        };

        payload.validate().map_err(product_violation)?;
        Ok(payload)
    }

    /// Keep the given identifier when the product is inserted.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

/// Full replacement applied when editing an existing product.
#[derive(Debug, Clone, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub price_cents: i64,
    pub category: String,
    #[validate(range(min = 0))]
    pub stock: i32,
}

impl UpdateProduct {
    /// Build a validated replacement for an existing product.
    pub fn new(
        name: impl AsRef<str>,
        price_cents: i64,
        category: impl AsRef<str>,
        stock: i32,
    ) -> ValidationResult<Self> {
        let payload = Self {
            name: sanitize_inline_text(name.as_ref()),
            price_cents,
            category: sanitize_inline_text(category.as_ref()),
            stock,
        };

        payload.validate().map_err(product_violation)?;
        Ok(payload)
    }
}

impl From<&Product> for UpdateProduct {
    fn from(value: &Product) -> Self {
        Self {
            name: value.name.clone(),
            price_cents: value.price_cents,
            category: value.category.clone(),
            stock: value.stock,
        }
    }
}

fn product_violation(errors: ValidationErrors) -> ValidationError {
    let fields = errors.field_errors();
    if fields.contains_key("name") {
        ValidationError::EmptyProductName
    } else if fields.contains_key("price_cents") {
        ValidationError::NonPositivePrice
    } else {
        ValidationError::NegativeStock
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional search term matched against the name or category.
    pub search: Option<String>,
    /// Optional exact category filter.
    pub category: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a search term applied to the name or category.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter the results by an exact category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
