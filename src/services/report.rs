use itertools::Itertools;

use crate::dal::product_db::ProductRow;
use crate::domain::category::category_from_url;

/// Headline numbers for the dashboard. Mean and minimum ignore rows whose
/// price defaulted to zero during extraction.
#[derive(Debug, Default, PartialEq)]
pub struct PriceStats {
    pub total_products: usize,
    pub avg_price: f64,
    pub max_price: f64,
    pub min_price: f64,
}

/// One category's aggregate for the bar and pie charts.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub count: usize,
    pub mean_price: f64,
}

pub fn price_stats(rows: &[ProductRow]) -> PriceStats {
    let priced: Vec<f64> = rows.iter().map(|r| r.price).filter(|p| *p > 0.0).collect();

    let avg_price = match priced.is_empty() {
        true => 0.0,
        false => priced.iter().sum::<f64>() / priced.len() as f64,
    };

    let min_price = match priced.is_empty() {
        true => 0.0,
        false => priced.iter().copied().fold(f64::INFINITY, f64::min),
    };

    PriceStats {
        total_products: rows.len(),
        avg_price,
        max_price: rows.iter().map(|r| r.price).fold(0.0, f64::max),
        min_price,
    }
}

/// Per-category counts and mean prices, highest mean first. Counts cover
/// every row; means only the positively priced ones.
pub fn category_breakdown(rows: &[ProductRow]) -> Vec<CategorySlice> {
    let groups = rows
        .iter()
        .into_group_map_by(|row| category_from_url(&row.source_url));

    let mut slices: Vec<CategorySlice> = groups
        .into_iter()
        .map(|(category, group)| {
            let priced: Vec<f64> = group.iter().map(|r| r.price).filter(|p| *p > 0.0).collect();
            let mean_price = match priced.is_empty() {
                true => 0.0,
                false => priced.iter().sum::<f64>() / priced.len() as f64,
            };
            CategorySlice {
                category,
                count: group.len(),
                mean_price,
            }
        })
        .collect();

    slices.sort_by(|a, b| b.mean_price.total_cmp(&a.mean_price));
    slices
}

/// Equal-width histogram over the positive prices: (bin lower bound, count).
pub fn price_histogram(rows: &[ProductRow], bins: usize) -> Vec<(f64, usize)> {
    let prices: Vec<f64> = rows.iter().map(|r| r.price).filter(|p| *p > 0.0).collect();
    if prices.is_empty() || bins == 0 {
        return vec![];
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = ((max - min) / bins as f64).max(f64::EPSILON);

    let mut counts = vec![0usize; bins];
    for price in &prices {
        let index = (((price - min) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (min + width * i as f64, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{category_breakdown, price_histogram, price_stats, PriceStats};
    use crate::dal::product_db::ProductRow;

    fn row(name: &str, price: f64, source_url: &str) -> ProductRow {
        ProductRow {
            id: 0,
            name: name.to_string(),
            price,
            rating: None,
            image_url: None,
            source_url: source_url.to_string(),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn empty_store_yields_zero_stats() {
        let stats = price_stats(&[]);
        assert_eq!(
            stats,
            PriceStats {
                total_products: 0,
                avg_price: 0.0,
                max_price: 0.0,
                min_price: 0.0,
            }
        );
        assert!(category_breakdown(&[]).is_empty());
        assert!(price_histogram(&[], 20).is_empty());
    }

    #[test]
    fn zero_priced_rows_are_excluded_from_mean_and_min() {
        let rows = vec![
            row("A", 100.0, "https://a.example/s?k=keyboard"),
            row("B", 0.0, "https://a.example/s?k=keyboard"),
            row("C", 300.0, "https://a.example/s?k=keyboard"),
        ];

        let stats = price_stats(&rows);
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.avg_price, 200.0);
        assert_eq!(stats.min_price, 100.0);
        assert_eq!(stats.max_price, 300.0);
    }

    #[test]
    fn breakdown_groups_by_category_and_sorts_by_mean() {
        let rows = vec![
            row("KB", 50.0, "https://a.example/s?k=keyboard"),
            row("KB2", 0.0, "https://a.example/s?k=keyboard"),
            row("Mac", 900.0, "https://a.example/s?k=buy+macbook"),
        ];

        let slices = category_breakdown(&rows);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category, "Laptops");
        assert_eq!(slices[0].count, 1);
        assert_eq!(slices[1].category, "Keyboards");
        assert_eq!(slices[1].count, 2);
        assert_eq!(slices[1].mean_price, 50.0);
    }

    #[test]
    fn histogram_covers_the_price_range() {
        let rows = vec![
            row("A", 10.0, "u"),
            row("B", 20.0, "u"),
            row("C", 30.0, "u"),
            row("D", 0.0, "u"),
        ];

        let bins = price_histogram(&rows, 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins.iter().map(|(_, c)| c).sum::<usize>(), 3);
        assert_eq!(bins[0].0, 10.0);
    }
}
