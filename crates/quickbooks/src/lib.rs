pub mod client;
pub mod types;

pub use client::{Environment, QuickBooksClient, QuickBooksError};
pub use types::{purchase_pool, RawPurchase};
