// crately-api: Async Rust client for the Crately warehouse inventory REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::ItemsClient;
pub use error::Error;
pub use transport::TransportConfig;
