//! XML response deserialization for ItemLookup.
//!
//! The service answers with one of two shapes: a normal
//! `ItemLookupResponse` carrying `Items/Request` plus zero or more
//! `Items/Item` records, or a bare `ItemLookupErrorResponse` carrying a
//! single top-level `Error` (invalid signature, bad access key, throttling).
//! Both map onto [`ResponseEnvelope`]; unknown elements are ignored.

use crate::error::{Error, ParseError};
use crate::paapi::models::{
    Dimension, Item, ItemAttributes, ItemDimensions, ItemLink, Offer, OfferSummary, Offers,
    Price, SimilarProduct,
};
use serde::Deserialize;
use tracing::trace;

/// Parses a raw response body into items, in document order.
pub fn parse_lookup_response(xml: &str) -> Result<Vec<Item>, Error> {
    let envelope: ResponseEnvelope = quick_xml::de::from_str(xml).map_err(ParseError::Xml)?;

    // Bare error root: the request never reached the lookup handler.
    if let Some(error) = envelope.error {
        return Err(remote_error(error));
    }

    let item_set = envelope.items.ok_or(ParseError::MissingElement("Items"))?;

    if let Some(request) = &item_set.request {
        let entries =
            request.errors.as_ref().map(|errors| errors.entries.as_slice()).unwrap_or(&[]);
        let invalid = request.is_valid.as_deref() == Some("False");

        // An invalid request echo always fails; a valid echo with errors and
        // no items (e.g. every id unknown) fails too. Partial errors next to
        // returned items are left for the caller to notice by absence.
        if invalid || (item_set.items.is_empty() && !entries.is_empty()) {
            return match entries.first() {
                Some(entry) => Err(remote_error(entry.clone())),
                None => Err(ParseError::MissingElement("Request/Errors/Error").into()),
            };
        }
    }

    trace!("response carried {} item records", item_set.items.len());
    item_set.items.into_iter().map(convert_item).collect()
}

fn remote_error(entry: ErrorEntryXml) -> Error {
    Error::RemoteApi {
        code: entry.code.unwrap_or_else(|| "Unknown".to_string()),
        message: entry.message.unwrap_or_default(),
    }
}

fn convert_item(record: ItemXml) -> Result<Item, Error> {
    let asin = record.asin.ok_or(ParseError::MissingElement("Item/ASIN"))?;

    Ok(Item {
        asin,
        parent_asin: record.parent_asin,
        detail_page_url: record.detail_page_url,
        sales_rank: parse_number(record.sales_rank),
        small_image_url: record.small_image.and_then(|image| image.url),
        medium_image_url: record.medium_image.and_then(|image| image.url),
        large_image_url: record.large_image.and_then(|image| image.url),
        links: record
            .item_links
            .map(|links| links.links.into_iter().map(convert_link).collect())
            .unwrap_or_default(),
        attributes: record.attributes.map(convert_attributes),
        offer_summary: record.offer_summary.map(convert_offer_summary),
        offers: record.offers.map(convert_offers),
        similar_products: record
            .similar_products
            .map(|products| products.products.into_iter().map(convert_related).collect())
            .unwrap_or_default(),
        accessories: record
            .accessories
            .map(|accessories| accessories.accessories.into_iter().map(convert_related).collect())
            .unwrap_or_default(),
    })
}

fn convert_link(link: ItemLinkXml) -> ItemLink {
    ItemLink { description: link.description, url: link.url }
}

fn convert_related(related: RelatedItemXml) -> SimilarProduct {
    SimilarProduct { asin: related.asin, title: related.title }
}

fn convert_attributes(attributes: AttributesXml) -> ItemAttributes {
    ItemAttributes {
        title: attributes.title,
        brand: attributes.brand,
        binding: attributes.binding,
        ean: attributes.ean,
        upc: attributes.upc,
        upc_list: attributes.upc_list.map(|list| list.elements).unwrap_or_default(),
        label: attributes.label,
        model: attributes.model,
        platform: attributes.platform,
        list_price: attributes.list_price.map(convert_price),
        dimensions: attributes.dimensions.map(convert_dimensions),
    }
}

fn convert_dimensions(dimensions: DimensionsXml) -> ItemDimensions {
    ItemDimensions {
        height: dimensions.height.map(convert_dimension),
        length: dimensions.length.map(convert_dimension),
        width: dimensions.width.map(convert_dimension),
        weight: dimensions.weight.map(convert_dimension),
    }
}

fn convert_dimension(dimension: DimensionXml) -> Dimension {
    Dimension { value: parse_number(dimension.value), units: dimension.units }
}

fn convert_offer_summary(summary: OfferSummaryXml) -> OfferSummary {
    OfferSummary {
        lowest_new_price: summary.lowest_new_price.map(convert_price),
        lowest_used_price: summary.lowest_used_price.map(convert_price),
        lowest_collectible_price: summary.lowest_collectible_price.map(convert_price),
        lowest_refurbished_price: summary.lowest_refurbished_price.map(convert_price),
        total_new: parse_number(summary.total_new),
        total_used: parse_number(summary.total_used),
        total_collectible: parse_number(summary.total_collectible),
        total_refurbished: parse_number(summary.total_refurbished),
    }
}

fn convert_offers(offers: OffersXml) -> Offers {
    Offers {
        total_offers: parse_number(offers.total_offers),
        // The service reports "0" instead of omitting the element.
        more_offers_url: offers.more_offers_url.filter(|url| url != "0"),
        buy_box: offers.offers.into_iter().next().map(convert_offer),
    }
}

fn convert_offer(offer: OfferXml) -> Offer {
    let listing = offer.listing;
    Offer {
        condition: offer.attributes.and_then(|attributes| attributes.condition),
        price: listing.as_ref().and_then(|l| l.price.clone()).map(convert_price),
        super_saver_shipping: listing
            .as_ref()
            .map(|l| parse_flag(l.super_saver_shipping.as_deref()))
            .unwrap_or(false),
        prime_shipping: listing
            .as_ref()
            .map(|l| parse_flag(l.prime_shipping.as_deref()))
            .unwrap_or(false),
    }
}

fn convert_price(price: PriceXml) -> Price {
    Price {
        amount: parse_number(price.amount),
        currency_code: price.currency_code,
        formatted: price.formatted_price,
    }
}

fn parse_number(value: Option<String>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("True") | Some("true"))
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(rename = "Error")]
    error: Option<ErrorEntryXml>,
    #[serde(rename = "Items")]
    items: Option<ItemSetXml>,
}

#[derive(Debug, Deserialize)]
struct ItemSetXml {
    #[serde(rename = "Request")]
    request: Option<RequestEchoXml>,
    #[serde(rename = "Item", default)]
    items: Vec<ItemXml>,
}

#[derive(Debug, Deserialize)]
struct RequestEchoXml {
    #[serde(rename = "IsValid")]
    is_valid: Option<String>,
    #[serde(rename = "Errors")]
    errors: Option<ErrorsXml>,
}

#[derive(Debug, Deserialize)]
struct ErrorsXml {
    #[serde(rename = "Error", default)]
    entries: Vec<ErrorEntryXml>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorEntryXml {
    #[serde(rename = "Code")]
    code: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemXml {
    #[serde(rename = "ASIN")]
    asin: Option<String>,
    #[serde(rename = "ParentASIN")]
    parent_asin: Option<String>,
    #[serde(rename = "DetailPageURL")]
    detail_page_url: Option<String>,
    #[serde(rename = "SalesRank")]
    sales_rank: Option<String>,
    #[serde(rename = "SmallImage")]
    small_image: Option<ImageXml>,
    #[serde(rename = "MediumImage")]
    medium_image: Option<ImageXml>,
    #[serde(rename = "LargeImage")]
    large_image: Option<ImageXml>,
    #[serde(rename = "ItemLinks")]
    item_links: Option<ItemLinksXml>,
    #[serde(rename = "ItemAttributes")]
    attributes: Option<AttributesXml>,
    #[serde(rename = "OfferSummary")]
    offer_summary: Option<OfferSummaryXml>,
    #[serde(rename = "Offers")]
    offers: Option<OffersXml>,
    #[serde(rename = "SimilarProducts")]
    similar_products: Option<SimilarProductsXml>,
    #[serde(rename = "Accessories")]
    accessories: Option<AccessoriesXml>,
}

#[derive(Debug, Deserialize)]
struct ImageXml {
    #[serde(rename = "URL")]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemLinksXml {
    #[serde(rename = "ItemLink", default)]
    links: Vec<ItemLinkXml>,
}

#[derive(Debug, Deserialize)]
struct ItemLinkXml {
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "URL")]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SimilarProductsXml {
    #[serde(rename = "SimilarProduct", default)]
    products: Vec<RelatedItemXml>,
}

#[derive(Debug, Deserialize)]
struct AccessoriesXml {
    #[serde(rename = "Accessory", default)]
    accessories: Vec<RelatedItemXml>,
}

#[derive(Debug, Deserialize)]
struct RelatedItemXml {
    #[serde(rename = "ASIN")]
    asin: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AttributesXml {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Brand")]
    brand: Option<String>,
    #[serde(rename = "Binding")]
    binding: Option<String>,
    #[serde(rename = "EAN")]
    ean: Option<String>,
    #[serde(rename = "UPC")]
    upc: Option<String>,
    #[serde(rename = "UPCList")]
    upc_list: Option<UpcListXml>,
    #[serde(rename = "Label")]
    label: Option<String>,
    #[serde(rename = "Model")]
    model: Option<String>,
    #[serde(rename = "Platform")]
    platform: Option<String>,
    #[serde(rename = "ListPrice")]
    list_price: Option<PriceXml>,
    #[serde(rename = "ItemDimensions")]
    dimensions: Option<DimensionsXml>,
}

#[derive(Debug, Deserialize)]
struct UpcListXml {
    #[serde(rename = "UPCListElement", default)]
    elements: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DimensionsXml {
    #[serde(rename = "Height")]
    height: Option<DimensionXml>,
    #[serde(rename = "Length")]
    length: Option<DimensionXml>,
    #[serde(rename = "Width")]
    width: Option<DimensionXml>,
    #[serde(rename = "Weight")]
    weight: Option<DimensionXml>,
}

#[derive(Debug, Deserialize)]
struct DimensionXml {
    #[serde(rename = "@Units")]
    units: Option<String>,
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PriceXml {
    #[serde(rename = "Amount")]
    amount: Option<String>,
    #[serde(rename = "CurrencyCode")]
    currency_code: Option<String>,
    #[serde(rename = "FormattedPrice")]
    formatted_price: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OfferSummaryXml {
    #[serde(rename = "LowestNewPrice")]
    lowest_new_price: Option<PriceXml>,
    #[serde(rename = "LowestUsedPrice")]
    lowest_used_price: Option<PriceXml>,
    #[serde(rename = "LowestCollectiblePrice")]
    lowest_collectible_price: Option<PriceXml>,
    #[serde(rename = "LowestRefurbishedPrice")]
    lowest_refurbished_price: Option<PriceXml>,
    #[serde(rename = "TotalNew")]
    total_new: Option<String>,
    #[serde(rename = "TotalUsed")]
    total_used: Option<String>,
    #[serde(rename = "TotalCollectible")]
    total_collectible: Option<String>,
    #[serde(rename = "TotalRefurbished")]
    total_refurbished: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OffersXml {
    #[serde(rename = "TotalOffers")]
    total_offers: Option<String>,
    #[serde(rename = "MoreOffersUrl")]
    more_offers_url: Option<String>,
    #[serde(rename = "Offer", default)]
    offers: Vec<OfferXml>,
}

#[derive(Debug, Deserialize)]
struct OfferXml {
    #[serde(rename = "OfferAttributes")]
    attributes: Option<OfferAttributesXml>,
    #[serde(rename = "OfferListing")]
    listing: Option<OfferListingXml>,
}

#[derive(Debug, Deserialize)]
struct OfferAttributesXml {
    #[serde(rename = "Condition")]
    condition: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OfferListingXml {
    #[serde(rename = "Price")]
    price: Option<PriceXml>,
    #[serde(rename = "IsEligibleForSuperSaverShipping")]
    super_saver_shipping: Option<String>,
    #[serde(rename = "IsEligibleForPrime")]
    prime_shipping: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ParseError};

    fn single_item_response() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
        <ItemLookupResponse xmlns="http://webservices.amazon.com/AWSECommerceService/2013-08-01">
          <Items>
            <Request>
              <IsValid>True</IsValid>
            </Request>
            <Item>
              <ASIN>B01L0YHJ30</ASIN>
              <DetailPageURL>https://www.amazon.com/dp/B01L0YHJ30</DetailPageURL>
              <SalesRank>17</SalesRank>
              <SmallImage><URL>https://img.example/small.jpg</URL></SmallImage>
              <ItemLinks>
                <ItemLink>
                  <Description>Technical Details</Description>
                  <URL>https://www.amazon.com/tech/B01L0YHJ30</URL>
                </ItemLink>
                <ItemLink>
                  <Description>All Offers</Description>
                  <URL>https://www.amazon.com/offers/B01L0YHJ30</URL>
                </ItemLink>
              </ItemLinks>
              <ItemAttributes>
                <Title>Game Console</Title>
                <Brand>Nintendo</Brand>
                <Binding>Video Game</Binding>
                <ListPrice>
                  <Amount>29980</Amount>
                  <CurrencyCode>JPY</CurrencyCode>
                  <FormattedPrice>&#65509;29,980</FormattedPrice>
                </ListPrice>
                <ItemDimensions>
                  <Height Units="hundredths-inches">402</Height>
                  <Weight Units="hundredths-pounds">66</Weight>
                </ItemDimensions>
                <UPCList>
                  <UPCListElement>045496590079</UPCListElement>
                </UPCList>
              </ItemAttributes>
              <OfferSummary>
                <LowestNewPrice>
                  <Amount>23000</Amount>
                  <CurrencyCode>JPY</CurrencyCode>
                </LowestNewPrice>
                <TotalNew>12</TotalNew>
                <TotalUsed>0</TotalUsed>
              </OfferSummary>
              <Offers>
                <TotalOffers>1</TotalOffers>
                <MoreOffersUrl>0</MoreOffersUrl>
                <Offer>
                  <OfferAttributes><Condition>New</Condition></OfferAttributes>
                  <OfferListing>
                    <Price>
                      <Amount>23480</Amount>
                      <CurrencyCode>JPY</CurrencyCode>
                    </Price>
                    <IsEligibleForSuperSaverShipping>0</IsEligibleForSuperSaverShipping>
                    <IsEligibleForPrime>1</IsEligibleForPrime>
                  </OfferListing>
                </Offer>
              </Offers>
              <SimilarProducts>
                <SimilarProduct>
                  <ASIN>B00427PXFY</ASIN>
                  <Title>Handheld Console</Title>
                </SimilarProduct>
              </SimilarProducts>
            </Item>
          </Items>
        </ItemLookupResponse>"#
    }

    #[test]
    fn test_parse_single_item() {
        let items = parse_lookup_response(single_item_response()).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.asin, "B01L0YHJ30");
        assert_eq!(item.sales_rank, Some(17));
        assert_eq!(item.small_image_url.as_deref(), Some("https://img.example/small.jpg"));
        assert_eq!(item.title(), Some("Game Console"));
        assert_eq!(item.brand(), Some("Nintendo"));
        assert_eq!(item.binding(), Some("Video Game"));
        assert_eq!(item.list_price(), Some(29980));
        assert_eq!(item.lowest_new_price(), Some(23000));
        assert_eq!(item.total_new_offers(), Some(12));
        assert_eq!(item.total_used_offers(), Some(0));
        assert_eq!(item.buy_box_price(), Some(23480));
        assert!(item.prime_shipping());
        assert!(!item.super_saver_shipping());
        assert_eq!(item.technical_details_url(), Some("https://www.amazon.com/tech/B01L0YHJ30"));
        assert_eq!(item.all_offers_url(), Some("https://www.amazon.com/offers/B01L0YHJ30"));
        assert_eq!(item.similar_products.len(), 1);
        assert_eq!(item.similar_products[0].asin.as_deref(), Some("B00427PXFY"));

        let attributes = item.attributes.as_ref().unwrap();
        assert_eq!(attributes.upc_list, vec!["045496590079".to_string()]);
        let dimensions = attributes.dimensions.as_ref().unwrap();
        assert_eq!(dimensions.height.as_ref().unwrap().value, Some(402));
        assert_eq!(dimensions.height.as_ref().unwrap().units.as_deref(), Some("hundredths-inches"));
        assert!(dimensions.length.is_none());

        // "0" placeholder collapses to no URL.
        assert!(item.offers.as_ref().unwrap().more_offers_url.is_none());
    }

    #[test]
    fn test_parse_multiple_items_in_document_order() {
        let xml = r#"<?xml version="1.0"?>
        <ItemLookupResponse>
          <Items>
            <Request><IsValid>True</IsValid></Request>
            <Item><ASIN>B01L0YHJ30</ASIN></Item>
            <Item><ASIN>B00427PXFY</ASIN></Item>
            <Item><ASIN>0679722769</ASIN></Item>
          </Items>
        </ItemLookupResponse>"#;

        let items = parse_lookup_response(xml).unwrap();
        let asins = items.iter().map(|item| item.asin.as_str()).collect::<Vec<_>>();
        assert_eq!(asins, ["B01L0YHJ30", "B00427PXFY", "0679722769"]);
    }

    #[test]
    fn test_parse_invalid_request_echo() {
        let xml = r#"<?xml version="1.0"?>
        <ItemLookupResponse>
          <Items>
            <Request>
              <IsValid>False</IsValid>
              <Errors>
                <Error>
                  <Code>AWS.MissingParameters</Code>
                  <Message>Your request is missing required parameters.</Message>
                </Error>
              </Errors>
            </Request>
          </Items>
        </ItemLookupResponse>"#;

        let err = parse_lookup_response(xml).unwrap_err();
        match err {
            Error::RemoteApi { code, message } => {
                assert_eq!(code, "AWS.MissingParameters");
                assert!(message.contains("missing required parameters"));
            }
            other => panic!("expected RemoteApi, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_bare_error_root() {
        let xml = r#"<?xml version="1.0"?>
        <ItemLookupErrorResponse xmlns="http://ecs.amazonaws.com/doc/2013-08-01/">
          <Error>
            <Code>SignatureDoesNotMatch</Code>
            <Message>The request signature we calculated does not match the signature you provided.</Message>
          </Error>
          <RequestId>0b9a6ccc-6497-4c6c-9c3a-deadbeef0000</RequestId>
        </ItemLookupErrorResponse>"#;

        let err = parse_lookup_response(xml).unwrap_err();
        match err {
            Error::RemoteApi { code, .. } => assert_eq!(code, "SignatureDoesNotMatch"),
            other => panic!("expected RemoteApi, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_valid_request_with_errors_and_no_items() {
        // Every id in the batch was unknown; the echo stays valid but no
        // items come back.
        let xml = r#"<?xml version="1.0"?>
        <ItemLookupResponse>
          <Items>
            <Request>
              <IsValid>True</IsValid>
              <Errors>
                <Error>
                  <Code>AWS.InvalidParameterValue</Code>
                  <Message>ZZZZZZZZZZ is not a valid value for ItemId.</Message>
                </Error>
              </Errors>
            </Request>
          </Items>
        </ItemLookupResponse>"#;

        let err = parse_lookup_response(xml).unwrap_err();
        assert!(matches!(err, Error::RemoteApi { ref code, .. } if code == "AWS.InvalidParameterValue"));
    }

    #[test]
    fn test_parse_item_errors_alongside_items_returns_items() {
        let xml = r#"<?xml version="1.0"?>
        <ItemLookupResponse>
          <Items>
            <Request>
              <IsValid>True</IsValid>
              <Errors>
                <Error>
                  <Code>AWS.InvalidParameterValue</Code>
                  <Message>ZZZZZZZZZZ is not a valid value for ItemId.</Message>
                </Error>
              </Errors>
            </Request>
            <Item><ASIN>B01L0YHJ30</ASIN></Item>
          </Items>
        </ItemLookupResponse>"#;

        let items = parse_lookup_response(xml).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].asin, "B01L0YHJ30");
    }

    #[test]
    fn test_parse_empty_item_list_is_ok() {
        let xml = r#"<?xml version="1.0"?>
        <ItemLookupResponse>
          <Items>
            <Request><IsValid>True</IsValid></Request>
          </Items>
        </ItemLookupResponse>"#;

        let items = parse_lookup_response(xml).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_missing_items_envelope() {
        let xml = r#"<?xml version="1.0"?><ItemLookupResponse></ItemLookupResponse>"#;
        let err = parse_lookup_response(xml).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingElement("Items"))));
    }

    #[test]
    fn test_parse_item_without_asin() {
        let xml = r#"<?xml version="1.0"?>
        <ItemLookupResponse>
          <Items>
            <Request><IsValid>True</IsValid></Request>
            <Item><DetailPageURL>https://example.com</DetailPageURL></Item>
          </Items>
        </ItemLookupResponse>"#;

        let err = parse_lookup_response(xml).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingElement("Item/ASIN"))));
    }

    #[test]
    fn test_parse_malformed_xml() {
        let err = parse_lookup_response("this is not xml <<<").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Xml(_))));
    }

    #[test]
    fn test_parse_unparsable_numbers_become_none() {
        let xml = r#"<?xml version="1.0"?>
        <ItemLookupResponse>
          <Items>
            <Request><IsValid>True</IsValid></Request>
            <Item>
              <ASIN>B01L0YHJ30</ASIN>
              <SalesRank>not-a-number</SalesRank>
              <OfferSummary>
                <LowestNewPrice><Amount></Amount></LowestNewPrice>
              </OfferSummary>
            </Item>
          </Items>
        </ItemLookupResponse>"#;

        let items = parse_lookup_response(xml).unwrap();
        assert!(items[0].sales_rank.is_none());
        assert!(items[0].lowest_new_price().is_none());
    }
}
