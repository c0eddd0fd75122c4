use std::env;

/// Default location of the SQLite database file.
pub const DEFAULT_DATABASE_URL: &str = "shop.db";
/// Number of rows returned by ranked reports when no limit is given.
pub const DEFAULT_REPORT_LIMIT: usize = 5;
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub report_limit: usize,
    pub pool_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            report_limit: DEFAULT_REPORT_LIMIT,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl AppConfig {
    /// Load `.env` when present and read the settings from the process
    /// environment. Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let report_limit = lookup("REPORT_LIMIT")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_REPORT_LIMIT);

        let pool_size = lookup("DB_POOL_SIZE")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_POOL_SIZE);

        Self {
            database_url,
            report_limit,
            pool_size,
        }
    }
}
