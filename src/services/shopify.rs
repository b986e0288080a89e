use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::LINK, Client};
use serde_json::Value;

use crate::config::Settings;
use crate::error::SourceError;
use crate::models::Order;

use super::client_trait::OrderSource;

#[derive(Clone)]
pub struct ShopifyClient {
    http: Client,
    orders_url: String,
    api_key: String,
    password: String,
    limit: u32,
    status: Option<String>,
    fetch_all_pages: bool,
    max_pages: u32,
    timeout: Option<Duration>,
}

/// `https://{shop}.myshopify.com`, accepting either the bare shop name or the
/// full host.
pub fn shop_base_url(shop_name: &str) -> String {
    let shop = shop_name
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    if shop.contains('.') {
        format!("https://{shop}")
    } else {
        format!("https://{shop}.myshopify.com")
    }
}

/// The `rel="next"` target of a Shopify `Link` header, if any.
pub fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|p| {
            let p = p.trim();
            p == r#"rel="next""# || p == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

/// Decode the `orders` array one record at a time so a single malformed order
/// is skipped instead of failing the whole page.
pub fn decode_orders(body: Value) -> Result<Vec<Order>, SourceError> {
    let raw = match body {
        Value::Object(mut map) => match map.remove("orders") {
            Some(Value::Array(items)) => items,
            _ => return Err(SourceError::Decode("missing `orders` array".to_string())),
        },
        _ => return Err(SourceError::Decode("expected a JSON object".to_string())),
    };

    let mut orders = Vec::with_capacity(raw.len());
    for (index, item) in raw.into_iter().enumerate() {
        let id = item.get("id").and_then(Value::as_u64);
        match serde_json::from_value::<Order>(item) {
            Ok(order) => orders.push(order),
            Err(e) => tracing::warn!(index, order_id = ?id, error = %e, "skipping malformed order"),
        }
    }
    Ok(orders)
}

impl ShopifyClient {
    pub fn new(base_url: &str, api_version: &str, api_key: String, password: String) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            http: Client::new(),
            orders_url: format!("{base}/admin/api/{api_version}/orders.json"),
            api_key,
            password,
            limit: 50,
            status: None,
            fetch_all_pages: false,
            max_pages: 100,
            timeout: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let base = settings
            .shopify_base_url
            .clone()
            .unwrap_or_else(|| shop_base_url(&settings.shop_name));

        let mut client = Self::new(
            &base,
            &settings.api_version,
            settings.api_key.clone(),
            settings.password.clone(),
        );
        client.limit = settings.page_limit;
        client.status = settings.order_status.clone();
        client.fetch_all_pages = settings.fetch_all_pages;
        client.max_pages = settings.max_pages;
        client.timeout = settings.http_timeout_secs.map(Duration::from_secs);
        client
    }

    pub fn fetch_all_pages(mut self, enabled: bool, max_pages: u32) -> Self {
        self.fetch_all_pages = enabled;
        self.max_pages = max_pages;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn orders_url(&self) -> &str {
        &self.orders_url
    }

    async fn fetch_page(
        &self,
        url: &str,
        first: bool,
    ) -> Result<(Vec<Order>, Option<String>), SourceError> {
        let mut req = self
            .http
            .get(url)
            .basic_auth(&self.api_key, Some(&self.password));

        // Follow-up page URLs already carry their cursor and limit.
        if first {
            let limit = self.limit.to_string();
            let mut query = vec![("limit", limit.as_str())];
            if let Some(status) = &self.status {
                query.push(("status", status.as_str()));
            }
            req = req.query(&query);
        }
        if let Some(t) = self.timeout {
            req = req.timeout(t);
        }

        let res = req.send().await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let next = res
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_page_url);

        let body = res
            .json::<Value>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok((decode_orders(body)?, next))
    }

    pub async fn list(&self) -> Result<Vec<Order>, SourceError> {
        let (mut orders, mut next) = self.fetch_page(&self.orders_url, true).await?;
        let mut pages = 1u32;

        while self.fetch_all_pages && pages < self.max_pages {
            let Some(url) = next.take() else { break };
            match self.fetch_page(&url, false).await {
                Ok((batch, following)) => {
                    orders.extend(batch);
                    next = following;
                    pages += 1;
                }
                Err(e) => {
                    // keep what was already fetched
                    tracing::warn!(page = pages + 1, error = %e, "stopping pagination early");
                    break;
                }
            }
        }

        tracing::debug!(pages, count = orders.len(), "fetched Shopify orders");
        Ok(orders)
    }
}

#[async_trait]
impl OrderSource for ShopifyClient {
    async fn list_orders(&self) -> Result<Vec<Order>, SourceError> {
        self.list().await
    }
}
