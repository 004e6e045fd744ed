use reqwest::Client;

use crate::domain::product::ProductRecord;
use crate::services::extractor::extract_products;
use crate::services::page_fetcher::{fetch_page, FetchError};

/// A page that can produce product records. The orchestrator only knows
/// this capability, so further listing formats can be added as new
/// implementations without touching the batch machinery.
#[allow(async_fn_in_trait)]
pub trait ListingSource {
    fn url(&self) -> &str;

    async fn scrape(&self, client: &Client) -> Result<Vec<ProductRecord>, FetchError>;
}

/// Amazon search-results page.
pub struct AmazonSearchSource {
    url: String,
}

impl AmazonSearchSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ListingSource for AmazonSearchSource {
    fn url(&self) -> &str {
        &self.url
    }

    async fn scrape(&self, client: &Client) -> Result<Vec<ProductRecord>, FetchError> {
        log::info!("Scraping search page: {}", self.url);
        let html = fetch_page(client, &self.url).await?;
        let records = extract_products(&html);
        log::info!("Found {} products from {}", records.len(), self.url);
        Ok(records)
    }
}
