//! Product catalog service client

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::Deserialize;

use super::http::HttpClient;
use super::ProductSource;
use crate::error::Result;

/// Product as returned by the catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    pub id: serde_json::Value,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub rating: f64,
}

impl ProductRecord {
    /// Catalog ids are numeric upstream; keep whatever arrives as text
    pub fn id_string(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    products: Vec<ProductRecord>,
}

pub struct ProductCatalogClient {
    http: HttpClient,
}

impl ProductCatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new("product catalog", base_url, HeaderMap::new())?,
        })
    }
}

#[async_trait]
impl ProductSource for ProductCatalogClient {
    async fn products(&self, limit: u32) -> Result<Vec<ProductRecord>> {
        let limit = limit.to_string();
        let response: ProductsResponse = self
            .http
            .get_json("/products", &[("limit", limit.as_str())])
            .await?;
        Ok(response.products)
    }
}
