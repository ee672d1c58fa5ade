//! amz-lookup - Signed Amazon Product Advertising ItemLookup client
//!
//! Builds signed `/onca/xml` ItemLookup requests, issues one HTTP GET per
//! call, and maps the XML response into [`Item`] records. Consumed by a
//! price-comparison bot; retry, backoff, and caching policy are left to the
//! embedding application.
//!
//! ```no_run
//! use amz_lookup::{Credentials, IdType, ItemLookup, LookupRequest, ProductClient, ResponseGroup};
//!
//! # async fn example() -> Result<(), amz_lookup::Error> {
//! let client = ProductClient::new(Credentials::new("access", "secret", "tag-20"))?;
//! let request = LookupRequest::new(["B01L0YHJ30"], IdType::Asin)
//!     .response_groups([ResponseGroup::Offers]);
//!
//! for item in client.lookup(&request).await? {
//!     println!("{}: {:?}", item.asin, item.lowest_new_price());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod paapi;

pub use error::{Error, ParseError, TransportError};
pub use paapi::client::{Credentials, ItemLookup, ProductClient, ProductClientBuilder};
pub use paapi::marketplace::Marketplace;
pub use paapi::models::{
    Dimension, Item, ItemAttributes, ItemDimensions, ItemLink, Offer, OfferSummary, Offers,
    Price, SimilarProduct,
};
pub use paapi::request::{Condition, IdType, LookupRequest, Merchant, ResponseGroup};
