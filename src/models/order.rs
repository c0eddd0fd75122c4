use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, Order as DomainOrder, OrderItem as DomainOrderItem, OrderStatus,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub client_id: i32,
    pub order_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct OrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub id: Option<i32>,
    pub client_id: i32,
    pub order_date: NaiveDate,
    pub status: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl Order {
    /// Combine the order row with its item rows.
    ///
    /// Rows are only ever written from [`OrderStatus`] values, so an
    /// unrecognised status falls back to the default instead of failing the read.
    pub fn into_domain(self, items: Vec<OrderItem>) -> DomainOrder {
        let status = self.status.parse::<OrderStatus>().unwrap_or_else(|_| {
            log::warn!(
                "Order {} has unknown status `{}`; reading it as pending",
                self.id,
                self.status
            );
            OrderStatus::default()
        });

        DomainOrder {
            id: self.id,
            client_id: self.client_id,
            items: items.into_iter().map(OrderItem::into_domain).collect(),
            order_date: self.order_date,
            status,
        }
    }
}

impl OrderItem {
    pub fn into_domain(self) -> DomainOrderItem {
        DomainOrderItem {
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price_cents: self.unit_price_cents,
        }
    }
}

impl From<(Order, Vec<OrderItem>)> for DomainOrder {
    fn from(value: (Order, Vec<OrderItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            id: value.id,
            client_id: value.client_id,
            order_date: value.order_date,
            status: value.status.as_str(),
        }
    }
}

impl NewOrderItem {
    pub fn from_domain(order_id: i32, value: &DomainOrderItem) -> Self {
        Self {
            order_id,
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
        }
    }
}
