use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price_cents: i64,
    pub category: String,
    pub stock: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub id: Option<i32>,
    pub name: &'a str,
    pub price_cents: i64,
    pub category: &'a str,
    pub stock: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: &'a str,
    pub price_cents: i64,
    pub category: &'a str,
    pub stock: i32,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            price_cents: value.price_cents,
            category: value.category,
            stock: value.stock,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            id: value.id,
            name: value.name.as_str(),
            price_cents: value.price_cents,
            category: value.category.as_str(),
            stock: value.stock,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_str(),
            price_cents: value.price_cents,
            category: value.category.as_str(),
            stock: value.stock,
        }
    }
}
