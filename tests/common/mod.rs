#![allow(dead_code)]

use axum::Router;
use klaviyo_order_sync::models::Order;
use serde_json::{json, Value};

/// Bind a stub server on an ephemeral port and return its base URL.
pub async fn spawn_server(listener: tokio::net::TcpListener, app: Router) -> String {
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn bind() -> tokio::net::TcpListener {
    tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap()
}

/// A realistic Shopify order as it appears in `orders.json`.
pub fn shopify_order_json(id: u64) -> Value {
    json!({
        "id": id,
        "email": "jane@example.com",
        "total_price": "59.97",
        "total_discounts": "5.00",
        "processed_at": "2024-03-05T10:15:00-05:00",
        "currency": "USD",
        "discount_codes": [{ "code": "SPRING", "amount": "5.00", "type": "fixed_amount" }],
        "customer": { "id": 42, "first_name": "Jane", "last_name": "Doe", "phone": "+15551234567" },
        "line_items": [
            {
                "id": id * 10 + 1,
                "product_id": 700,
                "sku": "MUG-01",
                "name": "Mug",
                "price": "9.99",
                "quantity": 3,
                "properties": [{ "name": "color", "value": "blue" }]
            },
            {
                "id": id * 10 + 2,
                "product_id": null,
                "sku": "",
                "name": "Gift Card",
                "price": "30.00",
                "quantity": 1,
                "properties": []
            }
        ]
    })
}

pub fn shopify_order(id: u64) -> Order {
    serde_json::from_value(shopify_order_json(id)).unwrap()
}
