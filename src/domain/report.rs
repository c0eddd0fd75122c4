use chrono::NaiveDate;
use serde::Serialize;

/// A client ranked by order count and spend.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TopClient {
    pub id: i32,
    pub name: String,
    pub order_count: i64,
    /// Sum of item subtotals across all of the client's orders.
    pub total_spent: i64,
}

/// Orders placed and revenue earned on one day.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub order_count: i64,
    pub total_amount: i64,
}

/// Units sold and revenue earned per product, across all orders.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductSales {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub total_quantity: i64,
    pub total_revenue: i64,
}

/// Units sold and revenue earned per product category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategorySales {
    pub category: String,
    pub total_quantity: i64,
    pub total_revenue: i64,
}

/// Units of a product bought by a client, across all of their orders.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PurchaseLink {
    pub client_id: i32,
    pub product_id: i32,
    pub quantity: i64,
}

/// A product line in a [`SalesReport`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportProduct {
    pub product_id: i32,
    /// Current product name, `None` when the product no longer exists.
    pub name: Option<String>,
    pub quantity: i64,
    pub revenue: i64,
}

/// Summary of the orders placed within an inclusive date range.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SalesReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_orders: usize,
    pub total_revenue: i64,
    /// Mean order value, zero when the range has no orders.
    pub avg_order_value: i64,
    /// Best sellers by revenue within the range.
    pub top_products: Vec<ReportProduct>,
}
