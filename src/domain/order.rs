use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{ValidationError, ValidationResult};
use crate::domain::product::Product;
use crate::pagination::Pagination;

/// Possible lifecycle states for an order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been recorded and awaits processing.
    #[default]
    Pending,
    /// Order is currently being fulfilled.
    Processing,
    /// Order has been fulfilled and is considered complete.
    Completed,
    /// Order has been cancelled and should not be processed further.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownStatus(value.to_string()))
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        value.as_str()
    }
}

/// One line of an order: a product, a quantity and the price at time of sale.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: i32,
    pub quantity: i32,
    /// Unit price captured when the line was added.
    pub unit_price_cents: i64,
}

impl OrderItem {
    pub fn total_cents(&self) -> i64 {
        i64::from(self.quantity) * self.unit_price_cents
    }
}

/// Domain representation of a persisted order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// Client that placed the order.
    pub client_id: i32,
    /// Lines of the order in insertion order.
    pub items: Vec<OrderItem>,
    /// Day the order was placed.
    pub order_date: NaiveDate,
    /// Current lifecycle status.
    pub status: OrderStatus,
}

impl Order {
    /// Sum of every line total.
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(OrderItem::total_cents).sum()
    }
}

/// An order under construction.
///
/// Adding a line reserves stock on the order itself; the product passed in is
/// only read. The reservations are applied to the stored stock when the order
/// is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Explicit identifier, used when importing records that carry ids.
    pub id: Option<i32>,
    pub client_id: i32,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    items: Vec<OrderItem>,
    reserved: BTreeMap<i32, i32>,
}

impl NewOrder {
    /// Start an empty pending order dated today.
    pub fn new(client_id: i32) -> Self {
        Self {
            id: None,
            client_id,
            order_date: chrono::Local::now().date_naive(),
            status: OrderStatus::default(),
            items: Vec::new(),
            reserved: BTreeMap::new(),
        }
    }

    /// Rebuild an order from lines whose prices were captured earlier.
    pub fn from_items(
        client_id: i32,
        order_date: NaiveDate,
        status: OrderStatus,
        items: Vec<OrderItem>,
    ) -> ValidationResult<Self> {
        let mut order = Self::new(client_id)
            .with_order_date(order_date)
            .with_status(status);

        for item in items {
            if item.quantity <= 0 {
                return Err(ValidationError::NonPositiveQuantity);
            }
            if item.unit_price_cents <= 0 {
                return Err(ValidationError::NonPositivePrice);
            }
            if order.reserved.contains_key(&item.product_id) {
                return Err(ValidationError::DuplicateItem {
                    product_id: item.product_id,
                });
            }

            order.reserved.insert(item.product_id, item.quantity);
            order.items.push(item);
        }

        Ok(order)
    }

    pub fn with_order_date(mut self, order_date: NaiveDate) -> Self {
        self.order_date = order_date;
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Add `quantity` units of `product` at its current price.
    ///
    /// Returns the units of `product` still available after this order's
    /// reservations. On error neither the lines nor the reservations change.
    pub fn add_item(&mut self, product: &Product, quantity: i32) -> ValidationResult<i32> {
        if quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity);
        }

        let available = self.available_stock(product);
        if available < quantity {
            return Err(ValidationError::InsufficientStock {
                product_id: product.id,
                requested: quantity,
                available: available.max(0),
            });
        }

        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            Some(item) if item.unit_price_cents != product.price_cents => {
                return Err(ValidationError::UnitPriceChanged {
                    product_id: product.id,
                });
            }
            Some(item) => item.quantity += quantity,
            None => self.items.push(OrderItem {
                product_id: product.id,
                quantity,
                unit_price_cents: product.price_cents,
            }),
        }

        *self.reserved.entry(product.id).or_default() += quantity;
        Ok(available - quantity)
    }

    /// Units reserved for `product_id` by this order.
    pub fn reserved_quantity(&self, product_id: i32) -> i32 {
        self.reserved.get(&product_id).copied().unwrap_or_default()
    }

    /// Stock of `product` left once this order's reservations are applied.
    pub fn available_stock(&self, product: &Product) -> i32 {
        product.stock - self.reserved_quantity(product.id)
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Stock decrements to apply on commit, as `(product_id, quantity)` pairs.
    pub fn stock_deltas(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.reserved
            .iter()
            .map(|(product_id, quantity)| (*product_id, *quantity))
    }

    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(OrderItem::total_cents).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Query definition used to list orders.
#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    /// Optional client identifier filter.
    pub client_id: Option<i32>,
    /// Optional status filter.
    pub status: Option<OrderStatus>,
    /// Inclusive lower bound on the order date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the order date.
    pub to: Option<NaiveDate>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    /// Construct a query that targets every order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by client identifier.
    pub fn client_id(mut self, client_id: i32) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict the results to orders dated within `[from, to]`.
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
