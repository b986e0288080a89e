//! Klaviyo track payloads.
//!
//! Field names follow Klaviyo's server-side metric conventions; serde renames
//! carry the exact wire keys, and field order is the wire key order.

use serde::Serialize;
use serde_json::Value;

use super::order::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventName {
    #[serde(rename = "Ordered Product")]
    OrderedProduct,
    #[serde(rename = "Placed Order")]
    PlacedOrder,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::OrderedProduct => "Ordered Product",
            EventName::PlacedOrder => "Placed Order",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerProperties {
    // absent email is left off the payload, not sent as null
    #[serde(rename = "$email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "$first_name")]
    pub first_name: String,

    #[serde(rename = "$last_name")]
    pub last_name: String,

    // Placed Order only
    #[serde(rename = "$phone_number", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedProductProperties {
    #[serde(rename = "$event_id")]
    pub event_id: u64,

    #[serde(rename = "$value")]
    pub value: Amount,

    #[serde(rename = "Product_id")]
    pub product_id: Option<u64>,

    pub sku: String,

    #[serde(rename = "ProductName")]
    pub product_name: String,

    #[serde(rename = "Quantity")]
    pub quantity: u64,

    #[serde(rename = "ProductCategories", skip_serializing_if = "Value::is_null")]
    pub product_categories: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOrderProperties {
    #[serde(rename = "$event_id")]
    pub event_id: u64,

    #[serde(rename = "$value")]
    pub value: Amount,

    #[serde(rename = "Categories")]
    pub categories: Vec<Value>,

    #[serde(rename = "ItemNames")]
    pub item_names: Vec<String>,

    #[serde(rename = "DiscountCode")]
    pub discount_code: String,

    #[serde(rename = "DiscountValue")]
    pub discount_value: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventProperties {
    OrderedProduct(OrderedProductProperties),
    PlacedOrder(PlacedOrderProperties),
}

/// One row of a Placed Order's `Items` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSummary {
    #[serde(rename = "ProductID")]
    pub product_id: u64,

    pub sku: String,

    #[serde(rename = "ProductName")]
    pub product_name: String,

    #[serde(rename = "Quantity")]
    pub quantity: u64,

    #[serde(rename = "ItemPrice")]
    pub item_price: Amount,

    // display string, e.g. "$29.97"
    #[serde(rename = "RowTotal")]
    pub row_total: String,

    #[serde(rename = "Categories", skip_serializing_if = "Value::is_null")]
    pub categories: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub token: String,
    pub event: EventName,
    pub customer_properties: CustomerProperties,
    pub properties: EventProperties,

    #[serde(rename = "Items", skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemSummary>>,

    pub time: i64,
}

impl Event {
    /// Klaviyo `$event_id` of this payload.
    pub fn event_id(&self) -> u64 {
        match &self.properties {
            EventProperties::OrderedProduct(p) => p.event_id,
            EventProperties::PlacedOrder(p) => p.event_id,
        }
    }
}
