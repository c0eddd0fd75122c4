use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::errors::ValidationError;
use crate::domain::order::OrderListQuery;
use crate::domain::report::{
    CategorySales, DailySales, ProductSales, PurchaseLink, ReportProduct, SalesReport, TopClient,
};
use crate::repository::{OrderReader, ProductReader, ReportReader};
use crate::services::ServiceResult;

/// Number of products listed in a sales report.
pub const SALES_REPORT_TOP_PRODUCTS: usize = 5;

pub fn top_clients<R>(repo: &R, limit: usize) -> ServiceResult<Vec<TopClient>>
where
    R: ReportReader + ?Sized,
{
    Ok(repo.top_clients(limit)?)
}

pub fn sales_by_date<R>(repo: &R) -> ServiceResult<Vec<DailySales>>
where
    R: ReportReader + ?Sized,
{
    Ok(repo.sales_by_date()?)
}

pub fn product_sales<R>(repo: &R) -> ServiceResult<Vec<ProductSales>>
where
    R: ReportReader + ?Sized,
{
    Ok(repo.product_sales()?)
}

pub fn category_sales<R>(repo: &R) -> ServiceResult<Vec<CategorySales>>
where
    R: ReportReader + ?Sized,
{
    Ok(repo.category_sales()?)
}

pub fn purchase_links<R>(repo: &R) -> ServiceResult<Vec<PurchaseLink>>
where
    R: ReportReader + ?Sized,
{
    Ok(repo.purchase_links()?)
}

/// Best sellers by units sold. Products that never sold are left out.
pub fn top_products_by_quantity<R>(repo: &R, limit: usize) -> ServiceResult<Vec<ProductSales>>
where
    R: ReportReader + ?Sized,
{
    let mut sales: Vec<ProductSales> = repo
        .product_sales()?
        .into_iter()
        .filter(|row| row.total_quantity > 0)
        .collect();

    sales.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| a.id.cmp(&b.id))
    });
    sales.truncate(limit);

    Ok(sales)
}

/// Summarise the orders dated within `[start, end]`.
pub fn sales_report<R>(repo: &R, start: NaiveDate, end: NaiveDate) -> ServiceResult<SalesReport>
where
    R: OrderReader + ProductReader + ?Sized,
{
    if end < start {
        return Err(ValidationError::InvalidDateRange { start, end }.into());
    }

    let (_, orders) = repo.list_orders(OrderListQuery::new().between(start, end))?;

    let total_orders = orders.len();
    let total_revenue: i64 = orders.iter().map(|order| order.total_cents()).sum();
    let avg_order_value = average_cents(total_revenue, total_orders);

    let mut per_product: HashMap<i32, (i64, i64)> = HashMap::new();
    for item in orders.iter().flat_map(|order| order.items.iter()) {
        let entry = per_product.entry(item.product_id).or_default();
        entry.0 += i64::from(item.quantity);
        entry.1 += item.total_cents();
    }

    let mut ranked: Vec<(i32, i64, i64)> = per_product
        .into_iter()
        .map(|(product_id, (quantity, revenue))| (product_id, quantity, revenue))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(SALES_REPORT_TOP_PRODUCTS);

    let mut top_products = Vec::with_capacity(ranked.len());
    for (product_id, quantity, revenue) in ranked {
        let name = repo
            .get_product_by_id(product_id)?
            .map(|product| product.name);

        top_products.push(ReportProduct {
            product_id,
            name,
            quantity,
            revenue,
        });
    }

    Ok(SalesReport {
        start,
        end,
        total_orders,
        total_revenue,
        avg_order_value,
        top_products,
    })
}

/// Mean in minor units, rounded half away from zero; 0 for no orders.
fn average_cents(total: i64, count: usize) -> i64 {
    let Ok(count) = i64::try_from(count) else {
        return 0;
    };
    if count == 0 {
        return 0;
    }

    let half = count / 2;
    if total >= 0 {
        (total + half) / count
    } else {
        (total - half) / count
    }
}
