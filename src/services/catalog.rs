use crate::domain::{
    client::{Client, ClientListQuery},
    product::{Product, ProductListQuery},
};
use crate::repository::{ClientReader, ProductReader};
use crate::services::ServiceResult;

/// Every client, or those whose name, email or phone contains `term`.
pub fn search_clients<R>(repo: &R, term: Option<&str>) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    let mut query = ClientListQuery::new();

    if let Some(term) = term.map(str::trim).filter(|term| !term.is_empty()) {
        query = query.search(term);
    }

    let (_, clients) = repo.list_clients(query)?;
    Ok(clients)
}

/// Every product, or those whose name or category contains `term`.
pub fn search_products<R>(repo: &R, term: Option<&str>) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let mut query = ProductListQuery::new();

    if let Some(term) = term.map(str::trim).filter(|term| !term.is_empty()) {
        query = query.search(term);
    }

    let (_, products) = repo.list_products(query)?;
    Ok(products)
}
