/// Placeholder stored when an optional field could not be extracted.
pub const UNKNOWN: &str = "unknown";

/// One product extracted from a search-results page. Storage fields
/// (source URL, capture timestamp) are stamped at insert time, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub name: String,
    pub price: f64,
    pub rating: String,
    pub image_url: String,
}

impl ProductRecord {
    pub fn new(name: String, price: f64, rating: Option<String>, image_url: Option<String>) -> Self {
        Self {
            name,
            price,
            rating: rating.unwrap_or_else(|| UNKNOWN.to_string()),
            image_url: image_url.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}
