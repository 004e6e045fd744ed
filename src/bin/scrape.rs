use std::time::Duration;

use anyhow::Context;
use env_logger::Env;
use shelfwatch::{
    configuration::get_configuration,
    dal::product_db,
    services::{http_client, run_batch, AmazonSearchSource},
};
use sqlx::sqlite::SqlitePoolOptions;

const SOURCE_URLS: &[&str] = &[
    // Premium laptops (high price range)
    "https://www.amazon.in/s?k=buy+macbook+on+amazon&adgrpid=166537001972&hvdev=c&hvlocphy=9180061&hvqmt=e&ref=pd_sl_3s357vlti2_e",
    // Wireless headphones (mid-low price range)
    "https://www.amazon.in/s?k=wireless+headphones&sprefix=wireless+headphones%2Caps%2C197&ref=nb_sb_noss_1",
    // Mechanical keyboards (mid price range)
    "https://www.amazon.in/s?k=mechanical+keyboard&crid=1WVQHJ0P9H3Z6&sprefix=mechanical+keyboard%2Caps%2C193&ref=nb_sb_noss_1",
    // Gaming mouse (low-mid price range)
    "https://www.amazon.in/s?k=gaming+mouse&crid=22UZ5S5A42ZPY&sprefix=gaming+mouse%2Caps%2C193&ref=nb_sb_noss_1",
    // Monitors (varied price range)
    "https://www.amazon.in/s?k=monitor&crid=36TDZTLIJ5TH4&sprefix=monitor%2Caps%2C198&ref=nb_sb_noss_1",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration")?;

    // A pool connect or schema failure here is fatal; per-URL failures
    // later are not.
    let pool = SqlitePoolOptions::new()
        .max_connections(configuration.scraper.max_workers as u32)
        .connect_with(configuration.database.connect_options())
        .await
        .context("Failed to open the product database")?;
    product_db::create_products_table(&pool)
        .await
        .context("Failed to set up the products table")?;

    let client = http_client(Duration::from_secs(configuration.scraper.request_timeout_secs))
        .context("Failed to build the HTTP client")?;

    let sources: Vec<AmazonSearchSource> = SOURCE_URLS
        .iter()
        .map(|url| AmazonSearchSource::new(*url))
        .collect();

    let outcome = run_batch(sources, configuration.scraper.max_workers, &client, &pool).await;

    log::info!(
        "Scraping process finished: {} sources succeeded, {} failed, {} records stored",
        outcome.succeeded,
        outcome.failed,
        outcome.records_stored
    );

    Ok(())
}
