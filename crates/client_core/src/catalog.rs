//! Storefront reads: catalog, featured items, and purchase history.

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use shared::{
    domain::Session,
    protocol::{ProductRecord, PurchaseRecord},
};

use crate::{error::FetchError, session::SessionGuard, transport};

/// Client for the customer-facing endpoints. Access to the customer-only
/// purchase history is enforced by the server; this client performs no
/// role pre-check of its own.
pub struct StorefrontClient {
    http: Client,
    base_url: Url,
    session_guard: Arc<dyn SessionGuard>,
}

impl StorefrontClient {
    pub fn new(base_url: Url, session_guard: Arc<dyn SessionGuard>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            session_guard,
        }
    }

    pub async fn fetch_catalog(&self, session: &Session) -> Result<Vec<ProductRecord>, FetchError> {
        self.get_json("productos", session).await
    }

    pub async fn fetch_featured(
        &self,
        session: &Session,
    ) -> Result<Vec<ProductRecord>, FetchError> {
        self.get_json("destacados", session).await
    }

    pub async fn fetch_purchase_history(
        &self,
        session: &Session,
    ) -> Result<Vec<PurchaseRecord>, FetchError> {
        self.get_json("mis-compras", session).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        session: &Session,
    ) -> Result<T, FetchError> {
        let result =
            transport::get_json(&self.http, &self.base_url, endpoint, None, &session.token).await;

        if let Err(err) = &result {
            if err.is_unauthorized() {
                warn!(endpoint, "storefront: token rejected; invalidating session");
                self.session_guard.invalidate().await;
            }
        }

        result
    }
}

/// Distinct product categories in first-seen order, for the category
/// filter strip.
pub fn categories(products: &[ProductRecord]) -> Vec<String> {
    let mut seen = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

pub fn filter_by_category<'a>(
    products: &'a [ProductRecord],
    category: &str,
) -> Vec<&'a ProductRecord> {
    products
        .iter()
        .filter(|product| product.category == category)
        .collect()
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
