pub mod client;
pub mod error;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::{
    Blueprint, HandlingTime, PrintProvider, ProductDetail, ProviderAddress, ShippingOption,
    Variant,
};
