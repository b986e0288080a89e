use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Money value as Shopify sent it.
///
/// Shopify encodes prices as decimal strings ("9.99"), but plain JSON numbers
/// are accepted too. The form it arrived in is kept so pass-through fields
/// serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Amount {
    /// Numeric view of the amount. Blank text reads as zero, anything
    /// unparseable as NaN.
    pub fn to_f64(&self) -> f64 {
        match self {
            Amount::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Amount::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCode {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,

    #[serde(default)]
    pub product_id: Option<u64>,

    #[serde(default)]
    pub sku: Option<String>,

    pub name: String,
    pub price: Amount,
    pub quantity: u64,

    // free-form; forwarded untouched
    #[serde(default)]
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,

    #[serde(default)]
    pub email: Option<String>,

    pub total_price: Amount,
    pub total_discounts: Amount,
    pub processed_at: DateTime<FixedOffset>,

    #[serde(default)]
    pub discount_codes: Vec<DiscountCode>,

    #[serde(default)]
    pub customer: Option<Customer>,

    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// `processed_at` as Unix epoch seconds.
    pub fn processed_at_epoch(&self) -> i64 {
        self.processed_at.timestamp()
    }
}
