pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;
pub mod services;
pub mod transfer;
