use std::env;

use crate::services::klaviyo::DEFAULT_TRACK_URL;

#[derive(Debug, Clone)]
pub struct Settings {
    pub shop_name: String,
    pub api_key: String,
    pub password: String,
    pub api_version: String,
    pub shopify_base_url: Option<String>,
    pub order_status: Option<String>,
    pub page_limit: u32,
    pub fetch_all_pages: bool,
    pub max_pages: u32,

    pub klaviyo_token: String,
    pub klaviyo_track_url: String,

    pub sink_concurrency: usize,
    pub http_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shop_name: String::new(),
            api_key: String::new(),
            password: String::new(),
            api_version: "2024-01".to_string(),
            shopify_base_url: None,
            order_status: None,
            page_limit: 50,
            fetch_all_pages: false,
            max_pages: 100,
            klaviyo_token: String::new(),
            klaviyo_track_url: DEFAULT_TRACK_URL.to_string(),
            sink_concurrency: 8,
            http_timeout_secs: None,
        }
    }
}

fn non_empty(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    get(key).filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    get(key).and_then(|s| s.trim().parse::<T>().ok())
}

fn flag(get: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    get(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    load_from(|key| env::var(key).ok())
}

/// Build settings from any key lookup; `load` passes the process environment.
pub fn load_from(get: impl Fn(&str) -> Option<String>) -> Settings {
    let defaults = Settings::default();

    // Credentials are not validated here; a missing value surfaces as a failed
    // downstream call.
    let shop_name = get("SHOPNAME").unwrap_or_default();
    let api_key = get("APIKEY").unwrap_or_default();
    let password = get("PASSWORD").unwrap_or_default();
    let klaviyo_token = get("TOKEN").unwrap_or_default();

    let api_version = non_empty(&get, "SHOPIFY_API_VERSION").unwrap_or(defaults.api_version);
    let klaviyo_track_url =
        non_empty(&get, "KLAVIYO_TRACK_URL").unwrap_or(defaults.klaviyo_track_url);

    Settings {
        shop_name,
        api_key,
        password,
        api_version,
        shopify_base_url: non_empty(&get, "SHOPIFY_BASE_URL"),
        order_status: non_empty(&get, "SHOPIFY_ORDER_STATUS"),
        page_limit: parsed(&get, "SHOPIFY_PAGE_LIMIT").unwrap_or(defaults.page_limit),
        fetch_all_pages: flag(&get, "FETCH_ALL_PAGES"),
        max_pages: parsed(&get, "MAX_PAGES").unwrap_or(defaults.max_pages),
        klaviyo_token,
        klaviyo_track_url,
        sink_concurrency: parsed(&get, "SINK_CONCURRENCY").unwrap_or(defaults.sink_concurrency),
        http_timeout_secs: parsed(&get, "HTTP_TIMEOUT_SECS"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_from(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let s = settings(&[]);
        assert_eq!(s.shop_name, "");
        assert_eq!(s.klaviyo_token, "");
        assert_eq!(s.api_version, "2024-01");
        assert_eq!(s.klaviyo_track_url, DEFAULT_TRACK_URL);
        assert_eq!(s.page_limit, 50);
        assert_eq!(s.max_pages, 100);
        assert_eq!(s.sink_concurrency, 8);
        assert!(!s.fetch_all_pages);
        assert_eq!(s.http_timeout_secs, None);
        assert_eq!(s.shopify_base_url, None);
        assert_eq!(s.order_status, None);
    }

    #[test]
    fn reads_credentials_verbatim() {
        let s = settings(&[
            ("SHOPNAME", "acme"),
            ("APIKEY", "key"),
            ("PASSWORD", "secret"),
            ("TOKEN", "pk_live"),
        ]);
        assert_eq!(s.shop_name, "acme");
        assert_eq!(s.api_key, "key");
        assert_eq!(s.password, "secret");
        assert_eq!(s.klaviyo_token, "pk_live");
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let s = settings(&[
            ("SHOPIFY_PAGE_LIMIT", "fifty"),
            ("MAX_PAGES", "-3"),
            ("SINK_CONCURRENCY", ""),
            ("HTTP_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(s.page_limit, 50);
        assert_eq!(s.max_pages, 100);
        assert_eq!(s.sink_concurrency, 8);
        assert_eq!(s.http_timeout_secs, None);
    }

    #[test]
    fn numbers_are_trimmed_and_parsed() {
        let s = settings(&[
            ("SHOPIFY_PAGE_LIMIT", " 250 "),
            ("MAX_PAGES", "3"),
            ("SINK_CONCURRENCY", "16"),
            ("HTTP_TIMEOUT_SECS", "30"),
        ]);
        assert_eq!(s.page_limit, 250);
        assert_eq!(s.max_pages, 3);
        assert_eq!(s.sink_concurrency, 16);
        assert_eq!(s.http_timeout_secs, Some(30));
    }

    #[test]
    fn fetch_all_pages_accepts_truthy_words() {
        for v in ["1", "true", "TRUE", "yes", "On", " true "] {
            assert!(settings(&[("FETCH_ALL_PAGES", v)]).fetch_all_pages, "{v:?}");
        }
        for v in ["0", "false", "no", "off", "", "maybe"] {
            assert!(!settings(&[("FETCH_ALL_PAGES", v)]).fetch_all_pages, "{v:?}");
        }
    }

    #[test]
    fn blank_urls_and_version_fall_back() {
        let s = settings(&[
            ("SHOPIFY_API_VERSION", "  "),
            ("KLAVIYO_TRACK_URL", ""),
            ("SHOPIFY_BASE_URL", " "),
            ("SHOPIFY_ORDER_STATUS", ""),
        ]);
        assert_eq!(s.api_version, "2024-01");
        assert_eq!(s.klaviyo_track_url, DEFAULT_TRACK_URL);
        assert_eq!(s.shopify_base_url, None);
        assert_eq!(s.order_status, None);

        let s = settings(&[
            ("SHOPIFY_API_VERSION", "2025-04"),
            ("KLAVIYO_TRACK_URL", "http://127.0.0.1:9000/api/track"),
            ("SHOPIFY_ORDER_STATUS", "any"),
        ]);
        assert_eq!(s.api_version, "2025-04");
        assert_eq!(s.klaviyo_track_url, "http://127.0.0.1:9000/api/track");
        assert_eq!(s.order_status.as_deref(), Some("any"));
    }
}
