use mockall::mock;

use super::{
    ClientReader, ClientWriter, OrderReader, OrderWriter, ProductReader, ProductWriter,
    ReportReader,
};
use crate::domain::{
    client::{Client, ClientListQuery, NewClient, UpdateClient},
    order::{NewOrder, Order, OrderListQuery, OrderStatus},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    report::{CategorySales, DailySales, ProductSales, PurchaseLink, TopClient},
};
use crate::repository::RepositoryResult;

mock! {
    pub ClientReader {}

    impl ClientReader for ClientReader {
        fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
        fn get_client_by_email(&self, email: &str) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }
}

mock! {
    pub ClientWriter {}

    impl ClientWriter for ClientWriter {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, client_id: i32, updates: &UpdateClient) -> RepositoryResult<Option<Client>>;
        fn delete_client(&self, client_id: i32) -> RepositoryResult<bool>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Option<Product>>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<bool>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Option<Order>>;
        fn delete_order(&self, order_id: i32) -> RepositoryResult<bool>;
    }
}

mock! {
    pub ReportReader {}

    impl ReportReader for ReportReader {
        fn top_clients(&self, limit: usize) -> RepositoryResult<Vec<TopClient>>;
        fn sales_by_date(&self) -> RepositoryResult<Vec<DailySales>>;
        fn product_sales(&self) -> RepositoryResult<Vec<ProductSales>>;
        fn category_sales(&self) -> RepositoryResult<Vec<CategorySales>>;
        fn purchase_links(&self) -> RepositoryResult<Vec<PurchaseLink>>;
    }
}

mock! {
    /// Repository double implementing every trait, for services that need
    /// several of them at once.
    pub Shop {}

    impl ClientReader for Shop {
        fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
        fn get_client_by_email(&self, email: &str) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ClientWriter for Shop {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, client_id: i32, updates: &UpdateClient) -> RepositoryResult<Option<Client>>;
        fn delete_client(&self, client_id: i32) -> RepositoryResult<bool>;
    }

    impl ProductReader for Shop {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl ProductWriter for Shop {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Option<Product>>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<bool>;
    }

    impl OrderReader for Shop {
        fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }

    impl OrderWriter for Shop {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Option<Order>>;
        fn delete_order(&self, order_id: i32) -> RepositoryResult<bool>;
    }

    impl ReportReader for Shop {
        fn top_clients(&self, limit: usize) -> RepositoryResult<Vec<TopClient>>;
        fn sales_by_date(&self) -> RepositoryResult<Vec<DailySales>>;
        fn product_sales(&self) -> RepositoryResult<Vec<ProductSales>>;
        fn category_sales(&self) -> RepositoryResult<Vec<CategorySales>>;
        fn purchase_links(&self) -> RepositoryResult<Vec<PurchaseLink>>;
    }
}
