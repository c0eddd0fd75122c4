use std::collections::HashMap;

use diesel::dsl::{exists, select, sql};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::order::{NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery, OrderStatus},
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
        OrderItem as DbOrderItem,
    },
    repository::{DieselRepository, OrderReader, OrderWriter, RepositoryError, RepositoryResult},
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = load_items(&mut conn, order.id)?;

        Ok(Some(DomainOrder::from((order, items))))
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let OrderListQuery {
            client_id,
            status,
            from,
            to,
            pagination,
        } = query;

        let status_filter = status.map(|status| status.as_str());

        let mut count_query = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(client) = client_id {
            count_query = count_query.filter(orders::client_id.eq(client));
        }

        if let Some(status_value) = status_filter {
            count_query = count_query.filter(orders::status.eq(status_value));
        }

        if let Some(from) = from {
            count_query = count_query.filter(orders::order_date.ge(from));
        }

        if let Some(to) = to {
            count_query = count_query.filter(orders::order_date.le(to));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(client) = client_id {
            items = items.filter(orders::client_id.eq(client));
        }

        if let Some(status_value) = status_filter {
            items = items.filter(orders::status.eq(status_value));
        }

        if let Some(from) = from {
            items = items.filter(orders::order_date.ge(from));
        }

        if let Some(to) = to {
            items = items.filter(orders::order_date.le(to));
        }

        items = items.order((orders::order_date.asc(), orders::id.asc()));

        if let Some(pagination) = pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_orders = items.load::<DbOrder>(&mut conn)?;
        if db_orders.is_empty() {
            return Ok((total, Vec::new()));
        }

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order(sql::<BigInt>("order_items.rowid").asc())
            .load::<DbOrderItem>(&mut conn)?;

        let mut items_by_order: HashMap<i32, Vec<DbOrderItem>> = HashMap::new();
        for item in rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                DomainOrder::from((order, items))
            })
            .collect();

        Ok((total, orders))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders, products};

        let mut conn = self.conn()?;

        let order = conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let db_new = DbNewOrder::from(new_order);

            let created = diesel::insert_into(orders::table)
                .values(&db_new)
                .get_result::<DbOrder>(conn)?;

            let order_id = created.id;

            for (product_id, quantity) in new_order.stock_deltas() {
                let target = products::table
                    .filter(products::id.eq(product_id))
                    .filter(products::stock.ge(quantity));

                let updated = diesel::update(target)
                    .set(products::stock.eq(products::stock - quantity))
                    .execute(conn)?;

                if updated == 0 {
                    let known: bool =
                        select(exists(products::table.filter(products::id.eq(product_id))))
                            .get_result(conn)?;

                    return Err(if known {
                        RepositoryError::InsufficientStock {
                            product_id,
                            requested: quantity,
                        }
                    } else {
                        RepositoryError::NotFound
                    });
                }
            }

            if !new_order.is_empty() {
                let payload: Vec<DbNewOrderItem> = new_order
                    .items()
                    .iter()
                    .map(|item| DbNewOrderItem::from_domain(order_id, item))
                    .collect();

                diesel::insert_into(order_items::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let items = load_items(conn, order_id)?;

            Ok(DomainOrder::from((created, items)))
        })?;

        log::info!(
            "Created order {} for client {} with {} item(s)",
            order.id,
            order.client_id,
            order.items.len()
        );

        Ok(order)
    }

    fn update_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let updated = diesel::update(orders::table.filter(orders::id.eq(order_id)))
            .set(orders::status.eq(status.as_str()))
            .get_result::<DbOrder>(&mut conn)
            .optional()?;

        let Some(updated) = updated else {
            return Ok(None);
        };

        let items = load_items(&mut conn, order_id)?;

        Ok(Some(DomainOrder::from((updated, items))))
    }

    fn delete_order(&self, order_id: i32) -> RepositoryResult<bool> {
        use crate::schema::{order_items, orders, products};

        let mut conn = self.conn()?;

        let deleted = conn.transaction::<usize, RepositoryError, _>(|conn| {
            let items = load_items(conn, order_id)?;

            for item in &items {
                diesel::update(products::table.filter(products::id.eq(item.product_id)))
                    .set(products::stock.eq(products::stock + item.quantity))
                    .execute(conn)?;
            }

            diesel::delete(order_items::table.filter(order_items::order_id.eq(order_id)))
                .execute(conn)?;

            let deleted =
                diesel::delete(orders::table.filter(orders::id.eq(order_id))).execute(conn)?;

            if deleted > 0 {
                log::info!(
                    "Deleted order {order_id} and restocked {} item(s)",
                    items.len()
                );
            }

            Ok(deleted)
        })?;

        Ok(deleted > 0)
    }
}

fn load_items(conn: &mut SqliteConnection, order_id: i32) -> RepositoryResult<Vec<DbOrderItem>> {
    use crate::schema::order_items;

    let items = order_items::table
        .filter(order_items::order_id.eq(order_id))
        .order(sql::<BigInt>("order_items.rowid").asc())
        .load::<DbOrderItem>(conn)?;

    Ok(items)
}
