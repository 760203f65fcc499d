pub mod client;
pub mod error;
pub mod queries;
pub mod types;

pub use client::StorefrontClient;
pub use error::StorefrontError;
