//! Marketplace locales and their Product Advertising endpoint hosts.

use crate::paapi::signing::SERVICE_PATH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplaces with a Product Advertising endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    #[default]
    Us,
    Uk,
    De,
    Fr,
    Es,
    It,
    Ca,
    Jp,
    In,
    Br,
    Mx,
}

impl Marketplace {
    /// Returns the endpoint host for this marketplace. The host is also the
    /// second line of the string-to-sign, so it must match the request URL
    /// exactly.
    pub fn host(&self) -> &'static str {
        match self {
            Marketplace::Us => "webservices.amazon.com",
            Marketplace::Uk => "webservices.amazon.co.uk",
            Marketplace::De => "webservices.amazon.de",
            Marketplace::Fr => "webservices.amazon.fr",
            Marketplace::Es => "webservices.amazon.es",
            Marketplace::It => "webservices.amazon.it",
            Marketplace::Ca => "webservices.amazon.ca",
            Marketplace::Jp => "webservices.amazon.co.jp",
            Marketplace::In => "webservices.amazon.in",
            Marketplace::Br => "webservices.amazon.com.br",
            Marketplace::Mx => "webservices.amazon.com.mx",
        }
    }

    /// Returns the full lookup endpoint URL for this marketplace.
    pub fn endpoint(&self) -> String {
        format!("https://{}{}", self.host(), SERVICE_PATH)
    }

    /// Returns all supported marketplaces.
    pub fn all() -> &'static [Marketplace] {
        &[
            Marketplace::Us,
            Marketplace::Uk,
            Marketplace::De,
            Marketplace::Fr,
            Marketplace::Es,
            Marketplace::It,
            Marketplace::Ca,
            Marketplace::Jp,
            Marketplace::In,
            Marketplace::Br,
            Marketplace::Mx,
        ]
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Marketplace::Us => "us",
            Marketplace::Uk => "uk",
            Marketplace::De => "de",
            Marketplace::Fr => "fr",
            Marketplace::Es => "es",
            Marketplace::It => "it",
            Marketplace::Ca => "ca",
            Marketplace::Jp => "jp",
            Marketplace::In => "in",
            Marketplace::Br => "br",
            Marketplace::Mx => "mx",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Marketplace {
    type Err = MarketplaceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "us" | "usa" | "united states" => Ok(Marketplace::Us),
            "uk" | "gb" | "united kingdom" => Ok(Marketplace::Uk),
            "de" | "germany" => Ok(Marketplace::De),
            "fr" | "france" => Ok(Marketplace::Fr),
            "es" | "spain" => Ok(Marketplace::Es),
            "it" | "italy" => Ok(Marketplace::It),
            "ca" | "canada" => Ok(Marketplace::Ca),
            "jp" | "japan" => Ok(Marketplace::Jp),
            "in" | "india" => Ok(Marketplace::In),
            "br" | "brazil" => Ok(Marketplace::Br),
            "mx" | "mexico" => Ok(Marketplace::Mx),
            _ => Err(MarketplaceParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarketplaceParseError(String);

impl fmt::Display for MarketplaceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown marketplace '{}'. Valid marketplaces: us, uk, de, fr, es, it, ca, jp, in, br, mx",
            self.0
        )
    }
}

impl std::error::Error for MarketplaceParseError {}
