//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use tempfile::TempDir;

use shop_manager::db::{DbPool, establish_connection_pool, run_migrations};
use shop_manager::domain::client::{Client, NewClient};
use shop_manager::domain::product::{NewProduct, Product};
use shop_manager::repository::{ClientWriter, DieselRepository, ProductWriter};

/// Temporary database used in integration tests.
///
/// The file lives in its own temporary directory, which is removed together
/// with the SQLite side files when the value is dropped.
pub struct TestDb {
    dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("temporary path is valid UTF-8");

        let pool = establish_connection_pool(url, 2).expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");

        TestDb { dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    pub fn path(&self, filename: &str) -> std::path::PathBuf {
        self.dir.path().join(filename)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn add_client(repo: &DieselRepository, name: &str, email: &str) -> Client {
    let payload = NewClient::new(name, email, "+15550100", "1 Main St").expect("valid client");
    repo.create_client(&payload).expect("client inserted")
}

pub fn add_product(
    repo: &DieselRepository,
    name: &str,
    price_cents: i64,
    category: &str,
    stock: i32,
) -> Product {
    let payload = NewProduct::new(name, price_cents, category, stock).expect("valid product");
    repo.create_product(&payload).expect("product inserted")
}
