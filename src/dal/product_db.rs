use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::product::ProductRecord;

/// A persisted product as read back for reporting.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub rating: Option<String>,
    pub image_url: Option<String>,
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
}

/// Idempotent, safe to call on every run.
pub async fn create_products_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        create table if not exists products (
            id integer primary key autoincrement,
            name text not null,
            price real not null,
            rating text,
            image_url text,
            source_url text not null,
            scraped_at timestamp not null
        )
        "#,
    )
    .execute(pool)
    .await?;

    log::info!("Table 'products' is set up");
    Ok(())
}

/// Append one source's records in a single transaction, stamping each with
/// the source URL and one capture timestamp. The table is append-only;
/// repeated scrapes accumulate history rather than upserting.
pub async fn insert_products(
    records: &[ProductRecord],
    source_url: &str,
    pool: &SqlitePool,
) -> Result<(), sqlx::Error> {
    if records.is_empty() {
        log::warn!("No records to insert for {}", source_url);
        return Ok(());
    }

    let scraped_at = Utc::now();
    let mut tx = pool.begin().await?;

    for record in records {
        sqlx::query(
            r#"
            insert into products
                (name, price, rating, image_url, source_url, scraped_at)
            values
                ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&record.name)
        .bind(record.price)
        .bind(&record.rating)
        .bind(&record.image_url)
        .bind(source_url)
        .bind(scraped_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    log::info!("Inserted {} records from {}", records.len(), source_url);
    Ok(())
}

/// Full table, most recent capture first. Read path for the dashboard,
/// runs on its own pooled connection and may overlap with writes.
pub async fn get_all_products(pool: &SqlitePool) -> Result<Vec<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        r#"
        select
            id, name, price, rating, image_url, source_url, scraped_at
        from
            products
        order by
            scraped_at desc, id desc
        "#,
    )
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use super::{create_products_table, get_all_products, insert_products};
    use crate::domain::product::ProductRecord;

    async fn test_pool() -> SqlitePool {
        // Single connection so every call sees the same in-memory database.
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database")
    }

    fn record(name: &str, price: f64) -> ProductRecord {
        ProductRecord::new(name.to_string(), price, None, None)
    }

    #[tokio::test]
    async fn schema_setup_is_idempotent() {
        let pool = test_pool().await;

        create_products_table(&pool).await.unwrap();
        insert_products(&[record("Keyboard", 100.0)], "https://a.example/s?k=kb", &pool)
            .await
            .unwrap();

        // Second setup call must not error or lose data.
        create_products_table(&pool).await.unwrap();
        let rows = get_all_products(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let pool = test_pool().await;
        create_products_table(&pool).await.unwrap();

        insert_products(&[], "https://a.example/s?k=kb", &pool)
            .await
            .unwrap();

        assert!(get_all_products(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn batch_is_stamped_and_ordered() {
        let pool = test_pool().await;
        create_products_table(&pool).await.unwrap();

        let records = vec![record("First", 10.0), record("Second", 20.0)];
        insert_products(&records, "https://a.example/s?k=kb", &pool)
            .await
            .unwrap();

        let rows = get_all_products(&pool).await.unwrap();
        assert_eq!(rows.len(), 2);
        // Same capture timestamp for the whole batch.
        assert_eq!(rows[0].scraped_at, rows[1].scraped_at);
        assert!(rows.iter().all(|r| r.source_url == "https://a.example/s?k=kb"));
        // Newest-first read order, insertion order preserved within the batch.
        assert_eq!(rows[0].name, "Second");
        assert_eq!(rows[1].name, "First");
    }
}
