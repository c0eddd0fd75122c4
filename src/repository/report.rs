use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Date, Integer, Text};

use crate::{
    domain::report::{CategorySales, DailySales, ProductSales, PurchaseLink, TopClient},
    repository::{DieselRepository, ReportReader, RepositoryResult},
};

#[derive(QueryableByName)]
struct TopClientRow {
    #[diesel(sql_type = Integer)]
    id: i32,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = BigInt)]
    order_count: i64,
    #[diesel(sql_type = BigInt)]
    total_spent: i64,
}

#[derive(QueryableByName)]
struct DailySalesRow {
    #[diesel(sql_type = Date)]
    order_date: NaiveDate,
    #[diesel(sql_type = BigInt)]
    order_count: i64,
    #[diesel(sql_type = BigInt)]
    total_amount: i64,
}

#[derive(QueryableByName)]
struct ProductSalesRow {
    #[diesel(sql_type = Integer)]
    id: i32,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    category: String,
    #[diesel(sql_type = BigInt)]
    total_quantity: i64,
    #[diesel(sql_type = BigInt)]
    total_revenue: i64,
}

#[derive(QueryableByName)]
struct CategorySalesRow {
    #[diesel(sql_type = Text)]
    category: String,
    #[diesel(sql_type = BigInt)]
    total_quantity: i64,
    #[diesel(sql_type = BigInt)]
    total_revenue: i64,
}

#[derive(QueryableByName)]
struct PurchaseLinkRow {
    #[diesel(sql_type = Integer)]
    client_id: i32,
    #[diesel(sql_type = Integer)]
    product_id: i32,
    #[diesel(sql_type = BigInt)]
    quantity: i64,
}

const TOP_CLIENTS_SQL: &str = "\
    SELECT c.id, c.name, \
           COUNT(DISTINCT o.id) AS order_count, \
           COALESCE(SUM(oi.quantity * oi.unit_price_cents), 0) AS total_spent \
    FROM clients c \
    LEFT JOIN orders o ON o.client_id = c.id \
    LEFT JOIN order_items oi ON oi.order_id = o.id \
    GROUP BY c.id, c.name \
    ORDER BY order_count DESC, total_spent DESC, c.id ASC \
    LIMIT ?";

const SALES_BY_DATE_SQL: &str = "\
    SELECT o.order_date AS order_date, \
           COUNT(DISTINCT o.id) AS order_count, \
           COALESCE(SUM(oi.quantity * oi.unit_price_cents), 0) AS total_amount \
    FROM orders o \
    LEFT JOIN order_items oi ON oi.order_id = o.id \
    GROUP BY o.order_date \
    ORDER BY o.order_date ASC";

const PRODUCT_SALES_SQL: &str = "\
    SELECT p.id, p.name, p.category, \
           COALESCE(SUM(oi.quantity), 0) AS total_quantity, \
           COALESCE(SUM(oi.quantity * oi.unit_price_cents), 0) AS total_revenue \
    FROM products p \
    LEFT JOIN order_items oi ON oi.product_id = p.id \
    GROUP BY p.id, p.name, p.category \
    ORDER BY total_revenue DESC, p.id ASC";

const CATEGORY_SALES_SQL: &str = "\
    SELECT p.category AS category, \
           COALESCE(SUM(oi.quantity), 0) AS total_quantity, \
           COALESCE(SUM(oi.quantity * oi.unit_price_cents), 0) AS total_revenue \
    FROM products p \
    LEFT JOIN order_items oi ON oi.product_id = p.id \
    GROUP BY p.category \
    ORDER BY total_revenue DESC, p.category ASC";

const PURCHASE_LINKS_SQL: &str = "\
    SELECT o.client_id AS client_id, oi.product_id AS product_id, \
           COALESCE(SUM(oi.quantity), 0) AS quantity \
    FROM orders o \
    JOIN order_items oi ON oi.order_id = o.id \
    GROUP BY o.client_id, oi.product_id \
    ORDER BY o.client_id ASC, oi.product_id ASC";

impl ReportReader for DieselRepository {
    fn top_clients(&self, limit: usize) -> RepositoryResult<Vec<TopClient>> {
        let mut conn = self.conn()?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sql_query(TOP_CLIENTS_SQL)
            .bind::<BigInt, _>(limit)
            .load::<TopClientRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|row| TopClient {
                id: row.id,
                name: row.name,
                order_count: row.order_count,
                total_spent: row.total_spent,
            })
            .collect())
    }

    fn sales_by_date(&self) -> RepositoryResult<Vec<DailySales>> {
        let mut conn = self.conn()?;

        let rows = sql_query(SALES_BY_DATE_SQL).load::<DailySalesRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|row| DailySales {
                date: row.order_date,
                order_count: row.order_count,
                total_amount: row.total_amount,
            })
            .collect())
    }

    fn product_sales(&self) -> RepositoryResult<Vec<ProductSales>> {
        let mut conn = self.conn()?;

        let rows = sql_query(PRODUCT_SALES_SQL).load::<ProductSalesRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|row| ProductSales {
                id: row.id,
                name: row.name,
                category: row.category,
                total_quantity: row.total_quantity,
                total_revenue: row.total_revenue,
            })
            .collect())
    }

    fn category_sales(&self) -> RepositoryResult<Vec<CategorySales>> {
        let mut conn = self.conn()?;

        let rows = sql_query(CATEGORY_SALES_SQL).load::<CategorySalesRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|row| CategorySales {
                category: row.category,
                total_quantity: row.total_quantity,
                total_revenue: row.total_revenue,
            })
            .collect())
    }

    fn purchase_links(&self) -> RepositoryResult<Vec<PurchaseLink>> {
        let mut conn = self.conn()?;

        let rows = sql_query(PURCHASE_LINKS_SQL).load::<PurchaseLinkRow>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|row| PurchaseLink {
                client_id: row.client_id,
                product_id: row.product_id,
                quantity: row.quantity,
            })
            .collect())
    }
}
