use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::order::{NewOrder, Order, OrderListQuery, OrderStatus};
use crate::repository::{ClientReader, OrderReader, OrderWriter, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// One requested order line: `quantity` units of `product_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i32,
    pub quantity: i32,
}

/// An order together with the amount the client pays for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: Order,
    pub total_cents: i64,
    /// Total after the client's tier discount.
    pub payable_cents: i64,
}

/// Assemble an order for `client_id` at current product prices and commit it.
///
/// Every line is checked against the product's stock minus what earlier lines
/// of the same order already reserved. Nothing is written unless all lines
/// fit.
pub fn place_order<R>(
    repo: &R,
    client_id: i32,
    order_date: Option<NaiveDate>,
    status: OrderStatus,
    lines: &[OrderLine],
) -> ServiceResult<Order>
where
    R: ClientReader + ProductReader + OrderWriter + ?Sized,
{
    if repo.get_client_by_id(client_id)?.is_none() {
        return Err(ServiceError::NotFound {
            entity: "client",
            id: client_id,
        });
    }

    let mut new_order = NewOrder::new(client_id).with_status(status);
    if let Some(date) = order_date {
        new_order = new_order.with_order_date(date);
    }

    for line in lines {
        let product = repo
            .get_product_by_id(line.product_id)?
            .ok_or(ServiceError::NotFound {
                entity: "product",
                id: line.product_id,
            })?;

        new_order.add_item(&product, line.quantity)?;
    }

    let order = repo.create_order(&new_order)?;
    Ok(order)
}

pub fn list_orders<R>(repo: &R, query: OrderListQuery) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    let (_, orders) = repo.list_orders(query)?;
    Ok(orders)
}

/// Load one order and price it for its client.
pub fn order_summary<R>(repo: &R, order_id: i32) -> ServiceResult<OrderSummary>
where
    R: OrderReader + ClientReader + ?Sized,
{
    let order = repo.get_order_by_id(order_id)?.ok_or(ServiceError::NotFound {
        entity: "order",
        id: order_id,
    })?;

    let total_cents = order.total_cents();
    let payable_cents = repo
        .get_client_by_id(order.client_id)?
        .and_then(|client| client.apply_discount(total_cents))
        .unwrap_or(total_cents);

    Ok(OrderSummary {
        order,
        total_cents,
        payable_cents,
    })
}

/// Overwrite the status of an order. `status` is matched case-insensitively.
pub fn change_status<R>(repo: &R, order_id: i32, status: &str) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    let status = status.parse::<OrderStatus>()?;

    repo.update_order_status(order_id, status)?
        .ok_or(ServiceError::NotFound {
            entity: "order",
            id: order_id,
        })
}

/// Delete an order and return its units to stock.
pub fn remove_order<R>(repo: &R, order_id: i32) -> ServiceResult<()>
where
    R: OrderWriter + ?Sized,
{
    if repo.delete_order(order_id)? {
        Ok(())
    } else {
        Err(ServiceError::NotFound {
            entity: "order",
            id: order_id,
        })
    }
}
