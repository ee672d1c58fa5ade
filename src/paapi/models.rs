//! Result models for looked-up items.
//!
//! Every facet the service may omit is an `Option` (or empty `Vec`): a
//! `None` means the facet was not requested or not present for the item.
//! Items are immutable snapshots of one `<Item>` response record.

use serde::{Deserialize, Serialize};

/// A monetary value as the service reports it: integer minor currency units
/// plus currency code and display string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Price {
    /// Amount in minor currency units (e.g. cents, yen).
    pub amount: Option<u32>,
    /// ISO currency code (USD, JPY, ...).
    pub currency_code: Option<String>,
    /// Display string as formatted by the service.
    pub formatted: Option<String>,
}

impl Price {
    /// Creates a price from an amount and currency code.
    pub fn new(amount: u32, currency_code: impl Into<String>) -> Self {
        Self { amount: Some(amount), currency_code: Some(currency_code.into()), formatted: None }
    }
}

/// A measured dimension, e.g. height in hundredths-inches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub value: Option<u32>,
    pub units: Option<String>,
}

/// Physical item dimensions from the descriptive attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemDimensions {
    pub height: Option<Dimension>,
    pub length: Option<Dimension>,
    pub width: Option<Dimension>,
    pub weight: Option<Dimension>,
}

/// Descriptive metadata from the `ItemAttributes` facet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemAttributes {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub binding: Option<String>,
    pub ean: Option<String>,
    pub upc: Option<String>,
    pub upc_list: Vec<String>,
    pub label: Option<String>,
    pub model: Option<String>,
    pub platform: Option<String>,
    pub list_price: Option<Price>,
    pub dimensions: Option<ItemDimensions>,
}

/// Lowest prices and offer counts per condition, from the `OfferSummary`
/// facet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OfferSummary {
    pub lowest_new_price: Option<Price>,
    pub lowest_used_price: Option<Price>,
    pub lowest_collectible_price: Option<Price>,
    pub lowest_refurbished_price: Option<Price>,
    pub total_new: Option<u32>,
    pub total_used: Option<u32>,
    pub total_collectible: Option<u32>,
    pub total_refurbished: Option<u32>,
}

/// Buy-box data from the `Offers` facet. The service returns at most the
/// winning offer here; the full listing lives behind `more_offers_url`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Offers {
    pub total_offers: Option<u32>,
    pub more_offers_url: Option<String>,
    pub buy_box: Option<Offer>,
}

/// A single offer listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Offer {
    pub condition: Option<String>,
    pub price: Option<Price>,
    pub super_saver_shipping: bool,
    pub prime_shipping: bool,
}

/// A named link from the `ItemLinks` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemLink {
    pub description: Option<String>,
    pub url: Option<String>,
}

/// A related item from the `Similarities` facet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimilarProduct {
    pub asin: Option<String>,
    pub title: Option<String>,
}

/// One looked-up catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Amazon Standard Identification Number. Always present.
    pub asin: String,
    pub parent_asin: Option<String>,
    pub detail_page_url: Option<String>,
    pub sales_rank: Option<u32>,
    pub small_image_url: Option<String>,
    pub medium_image_url: Option<String>,
    pub large_image_url: Option<String>,
    pub links: Vec<ItemLink>,
    pub attributes: Option<ItemAttributes>,
    pub offer_summary: Option<OfferSummary>,
    pub offers: Option<Offers>,
    pub similar_products: Vec<SimilarProduct>,
    pub accessories: Vec<SimilarProduct>,
}

impl Item {
    /// Product title, when the descriptive facet was returned.
    pub fn title(&self) -> Option<&str> {
        self.attributes.as_ref()?.title.as_deref()
    }

    pub fn brand(&self) -> Option<&str> {
        self.attributes.as_ref()?.brand.as_deref()
    }

    pub fn binding(&self) -> Option<&str> {
        self.attributes.as_ref()?.binding.as_deref()
    }

    pub fn ean(&self) -> Option<&str> {
        self.attributes.as_ref()?.ean.as_deref()
    }

    pub fn upc(&self) -> Option<&str> {
        self.attributes.as_ref()?.upc.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.attributes.as_ref()?.label.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.attributes.as_ref()?.model.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.attributes.as_ref()?.platform.as_deref()
    }

    /// List price in minor currency units.
    pub fn list_price(&self) -> Option<u32> {
        self.attributes.as_ref()?.list_price.as_ref()?.amount
    }

    /// Lowest new-condition price in minor currency units.
    pub fn lowest_new_price(&self) -> Option<u32> {
        self.offer_summary.as_ref()?.lowest_new_price.as_ref()?.amount
    }

    pub fn lowest_used_price(&self) -> Option<u32> {
        self.offer_summary.as_ref()?.lowest_used_price.as_ref()?.amount
    }

    pub fn lowest_collectible_price(&self) -> Option<u32> {
        self.offer_summary.as_ref()?.lowest_collectible_price.as_ref()?.amount
    }

    pub fn lowest_refurbished_price(&self) -> Option<u32> {
        self.offer_summary.as_ref()?.lowest_refurbished_price.as_ref()?.amount
    }

    pub fn total_new_offers(&self) -> Option<u32> {
        self.offer_summary.as_ref()?.total_new
    }

    pub fn total_used_offers(&self) -> Option<u32> {
        self.offer_summary.as_ref()?.total_used
    }

    /// Buy-box price in minor currency units.
    pub fn buy_box_price(&self) -> Option<u32> {
        self.offers.as_ref()?.buy_box.as_ref()?.price.as_ref()?.amount
    }

    /// Whether the buy-box offer ships with Prime.
    pub fn prime_shipping(&self) -> bool {
        self.offers
            .as_ref()
            .and_then(|o| o.buy_box.as_ref())
            .is_some_and(|offer| offer.prime_shipping)
    }

    /// Whether the buy-box offer qualifies for Super Saver shipping.
    pub fn super_saver_shipping(&self) -> bool {
        self.offers
            .as_ref()
            .and_then(|o| o.buy_box.as_ref())
            .is_some_and(|offer| offer.super_saver_shipping)
    }

    /// URL of the "Technical Details" item link, when present.
    pub fn technical_details_url(&self) -> Option<&str> {
        self.link_url("Technical Details")
    }

    /// URL of the "All Offers" item link, when present.
    pub fn all_offers_url(&self) -> Option<&str> {
        self.link_url("All Offers")
    }

    fn link_url(&self, description: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.description.as_deref() == Some(description))?
            .url
            .as_deref()
    }
}
