pub mod catalog;
pub mod errors;
pub mod orders;
pub mod reports;
pub mod transfer;

pub use errors::{ServiceError, ServiceResult};
