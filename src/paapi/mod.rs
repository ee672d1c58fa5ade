//! Product Advertising API modules: signing, transport, request and
//! response handling.

pub mod client;
pub mod marketplace;
pub mod models;
pub mod parser;
pub mod request;
pub mod signing;

pub use client::{Credentials, ItemLookup, ProductClient, ProductClientBuilder};
pub use marketplace::Marketplace;
pub use models::{Item, ItemAttributes, Offer, OfferSummary, Offers, Price};
pub use request::{Condition, IdType, LookupRequest, Merchant, ResponseGroup};
