use crate::db::{DbConnection, DbPool};
use crate::domain::{
    client::{Client, ClientListQuery, NewClient, UpdateClient},
    order::{NewOrder, Order, OrderListQuery, OrderStatus},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    report::{CategorySales, DailySales, ProductSales, PurchaseLink, TopClient},
};

pub mod client;
pub mod errors;
pub mod order;
pub mod product;
pub mod report;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over client records.
pub trait ClientReader {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
    fn get_client_by_email(&self, email: &str) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

/// Write operations over client records.
pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(
        &self,
        client_id: i32,
        updates: &UpdateClient,
    ) -> RepositoryResult<Option<Client>>;
    /// Remove the client together with its orders and their items.
    fn delete_client(&self, client_id: i32) -> RepositoryResult<bool>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Option<Product>>;
    /// Remove the product together with every order item that references it.
    fn delete_product(&self, product_id: i32) -> RepositoryResult<bool>;
}

/// Read-only operations over order records.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

/// Write operations over order records.
pub trait OrderWriter {
    /// Insert the order and its items and apply its stock deltas atomically.
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<Option<Order>>;
    /// Remove the order and return its quantities to stock.
    fn delete_order(&self, order_id: i32) -> RepositoryResult<bool>;
}

/// Aggregate queries backing the reports.
pub trait ReportReader {
    fn top_clients(&self, limit: usize) -> RepositoryResult<Vec<TopClient>>;
    fn sales_by_date(&self) -> RepositoryResult<Vec<DailySales>>;
    fn product_sales(&self) -> RepositoryResult<Vec<ProductSales>>;
    fn category_sales(&self) -> RepositoryResult<Vec<CategorySales>>;
    fn purchase_links(&self) -> RepositoryResult<Vec<PurchaseLink>>;
}
