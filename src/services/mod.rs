pub mod charts;
pub mod extractor;
pub mod listing_source;
pub mod orchestrator;
pub mod page_fetcher;
pub mod report;

pub use listing_source::{AmazonSearchSource, ListingSource};
pub use orchestrator::{run_batch, BatchOutcome};
pub use page_fetcher::{fetch_page, http_client, FetchError};
