use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, ClientKind, NewClient as DomainNewClient,
    UpdateClient as DomainUpdateClient,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub registration_date: NaiveDate,
    pub is_premium: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
pub struct NewClient<'a> {
    pub id: Option<i32>,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub registration_date: NaiveDate,
    pub is_premium: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub is_premium: bool,
}

impl From<Client> for DomainClient {
    fn from(value: Client) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            address: value.address,
            registration_date: value.registration_date,
            kind: ClientKind::from_flag(value.is_premium),
        }
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(value: &'a DomainNewClient) -> Self {
        Self {
            id: value.id,
            name: value.name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_str(),
            address: value.address.as_str(),
            registration_date: value.registration_date,
            is_premium: value.kind.is_premium(),
        }
    }
}

impl<'a> From<&'a DomainUpdateClient> for UpdateClient<'a> {
    fn from(value: &'a DomainUpdateClient) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_str(),
            address: value.address.as_str(),
            is_premium: value.kind.is_premium(),
        }
    }
}
