use diesel::prelude::*;

use crate::{
    domain::client::{
        Client as DomainClient, ClientListQuery, NewClient as DomainNewClient,
        UpdateClient as DomainUpdateClient,
    },
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    repository::{ClientReader, ClientWriter, DieselRepository, RepositoryError, RepositoryResult},
};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<DomainClient>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::id.eq(id))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn get_client_by_email(&self, email: &str) -> RepositoryResult<Option<DomainClient>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::email.eq(email.trim()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn list_clients(
        &self,
        query: ClientListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainClient>)> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let mut count_query = clients::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                clients::name
                    .like(pattern.clone())
                    .or(clients::email.like(pattern.clone()))
                    .or(clients::phone.like(pattern)),
            );
        }

        if query.premium_only {
            count_query = count_query.filter(clients::is_premium.eq(true));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = clients::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                clients::name
                    .like(pattern.clone())
                    .or(clients::email.like(pattern.clone()))
                    .or(clients::phone.like(pattern)),
            );
        }

        if query.premium_only {
            items = items.filter(clients::is_premium.eq(true));
        }

        items = items.order(clients::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_clients = items.load::<DbClient>(&mut conn)?;

        Ok((total, db_clients.into_iter().map(Into::into).collect()))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &DomainNewClient) -> RepositoryResult<DomainClient> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_new = DbNewClient::from(new_client);

        let created = diesel::insert_into(clients::table)
            .values(&db_new)
            .get_result::<DbClient>(&mut conn)?;

        Ok(created.into())
    }

    fn update_client(
        &self,
        client_id: i32,
        updates: &DomainUpdateClient,
    ) -> RepositoryResult<Option<DomainClient>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateClient::from(updates);

        let updated = diesel::update(clients::table.filter(clients::id.eq(client_id)))
            .set(&db_updates)
            .get_result::<DbClient>(&mut conn)
            .optional()?;

        Ok(updated.map(Into::into))
    }

    fn delete_client(&self, client_id: i32) -> RepositoryResult<bool> {
        use crate::schema::{clients, order_items, orders};

        let mut conn = self.conn()?;

        let deleted = conn.transaction::<usize, RepositoryError, _>(|conn| {
            let client_orders = orders::table
                .filter(orders::client_id.eq(client_id))
                .select(orders::id);

            let removed_items =
                diesel::delete(order_items::table.filter(order_items::order_id.eq_any(client_orders)))
                    .execute(conn)?;

            let removed_orders =
                diesel::delete(orders::table.filter(orders::client_id.eq(client_id)))
                    .execute(conn)?;

            let deleted = diesel::delete(clients::table.filter(clients::id.eq(client_id)))
                .execute(conn)?;

            if deleted > 0 {
                log::info!(
                    "Deleted client {client_id} with {removed_orders} order(s) and {removed_items} item(s)"
                );
            }

            Ok(deleted)
        })?;

        Ok(deleted > 0)
    }
}
