use serde_json::Value;

use crate::error::MapError;
use crate::models::{
    Customer, CustomerProperties, Event, EventName, EventProperties, ItemSummary, LineItem, Order,
    OrderedProductProperties, PlacedOrderProperties,
};

pub const NOT_PROVIDED: &str = "Not Provided";
// Placed Order's Items list has always used a different SKU fallback.
pub const NO_SKU_PROVIDED: &str = "No SKU provided";

fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

fn customer_of(order: &Order) -> Result<&Customer, MapError> {
    order
        .customer
        .as_ref()
        .ok_or(MapError::MissingCustomer { order_id: order.id })
}

fn customer_properties(order: &Order, customer: &Customer, with_phone: bool) -> CustomerProperties {
    CustomerProperties {
        email: order.email.clone(),
        first_name: or_fallback(customer.first_name.as_deref(), NOT_PROVIDED),
        last_name: or_fallback(customer.last_name.as_deref(), NOT_PROVIDED),
        phone_number: with_phone.then(|| or_fallback(customer.phone.as_deref(), NOT_PROVIDED)),
    }
}

/// `"$"` followed by `price * quantity`, not rounded to cents.
pub fn row_total(item: &LineItem) -> String {
    let total = item.price.to_f64() * item.quantity as f64;
    format!("${total}")
}

/// Every line item's `properties`, flattened one level: arrays are spread,
/// any other value is kept as a single element.
pub fn flatten_categories(items: &[LineItem]) -> Vec<Value> {
    let mut out = Vec::new();
    for item in items {
        match &item.properties {
            Value::Array(values) => out.extend(values.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    out
}

/// Comma-joined discount codes, or the fallback when there are none.
pub fn discount_code(order: &Order) -> String {
    if order.discount_codes.is_empty() {
        return NOT_PROVIDED.to_string();
    }
    order
        .discount_codes
        .iter()
        .map(|d| d.code.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// One "Ordered Product" event per line item.
pub fn map_ordered_product(order: &Order, token: &str) -> Result<Vec<Event>, MapError> {
    let customer = customer_of(order)?;
    let time = order.processed_at_epoch();

    let events = order
        .line_items
        .iter()
        .map(|item| Event {
            token: token.to_string(),
            event: EventName::OrderedProduct,
            customer_properties: customer_properties(order, customer, false),
            properties: EventProperties::OrderedProduct(OrderedProductProperties {
                event_id: item.id,
                value: item.price.clone(),
                product_id: item.product_id,
                sku: or_fallback(item.sku.as_deref(), NOT_PROVIDED),
                product_name: item.name.clone(),
                quantity: item.quantity,
                product_categories: item.properties.clone(),
            }),
            items: None,
            time,
        })
        .collect();

    Ok(events)
}

/// The single "Placed Order" event for an order.
pub fn map_placed_order(order: &Order, token: &str) -> Result<Event, MapError> {
    let customer = customer_of(order)?;

    let items = order
        .line_items
        .iter()
        .map(|item| ItemSummary {
            product_id: item.id,
            sku: or_fallback(item.sku.as_deref(), NO_SKU_PROVIDED),
            product_name: item.name.clone(),
            quantity: item.quantity,
            item_price: item.price.clone(),
            row_total: row_total(item),
            categories: item.properties.clone(),
        })
        .collect();

    Ok(Event {
        token: token.to_string(),
        event: EventName::PlacedOrder,
        customer_properties: customer_properties(order, customer, true),
        properties: EventProperties::PlacedOrder(PlacedOrderProperties {
            event_id: order.id,
            value: order.total_price.clone(),
            categories: flatten_categories(&order.line_items),
            item_names: order.line_items.iter().map(|i| i.name.clone()).collect(),
            discount_code: discount_code(order),
            discount_value: order.total_discounts.clone(),
        }),
        items: Some(items),
        time: order.processed_at_epoch(),
    })
}

/// All events for an order: the per-product events first, then the order.
pub fn map_order(order: &Order, token: &str) -> Result<Vec<Event>, MapError> {
    let mut events = map_ordered_product(order, token)?;
    events.push(map_placed_order(order, token)?);
    Ok(events)
}
