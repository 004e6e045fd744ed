use futures::stream::{self, StreamExt};
use reqwest::Client;
use sqlx::SqlitePool;

use crate::dal::product_db;
use crate::services::listing_source::ListingSource;
use crate::services::page_fetcher::FetchError;

#[derive(thiserror::Error, Debug)]
pub enum ScrapeTaskError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to store records: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Summary of one batch run over the full source list.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: usize,
    pub records_stored: usize,
    pub failures: Vec<String>,
}

/// Fan the sources out over at most `max_workers` concurrent scrape tasks
/// and persist each source's records as they complete, in completion
/// order. A failed source is logged and skipped; it never cancels or
/// delays its siblings, and there is no retry within a run.
pub async fn run_batch<S>(
    sources: Vec<S>,
    max_workers: usize,
    client: &Client,
    pool: &SqlitePool,
) -> BatchOutcome
where
    S: ListingSource,
{
    let mut completions = stream::iter(sources)
        .map(|source| async move {
            let result = source.scrape(client).await;
            (source, result)
        })
        .buffer_unordered(max_workers.max(1));

    let mut outcome = BatchOutcome::default();

    while let Some((source, result)) = completions.next().await {
        let task_result = match result {
            Ok(records) => product_db::insert_products(&records, source.url(), pool)
                .await
                .map_err(ScrapeTaskError::from)
                .map(|_| records.len()),
            Err(e) => Err(ScrapeTaskError::from(e)),
        };

        match task_result {
            Ok(stored) => {
                outcome.succeeded += 1;
                outcome.records_stored += stored;
            }
            Err(e) => {
                log::error!("{} failed: {}", source.url(), e);
                outcome.failed += 1;
                outcome.failures.push(source.url().to_string());
            }
        }
    }

    outcome
}
