use actix_web::{get, web, HttpResponse};
use askama::Template;
use sqlx::SqlitePool;

use crate::dal::product_db::{self, ProductRow};
use crate::domain::category::category_from_url;
use crate::domain::product::UNKNOWN;
use crate::services::{charts, report};

const TABLE_PREVIEW_ROWS: usize = 50;
const HISTOGRAM_BINS: usize = 20;

struct ProductView {
    name: String,
    price: String,
    rating: String,
    category: String,
    scraped_at: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    total_products: usize,
    avg_price: String,
    max_price: String,
    min_price: String,
    plot_bar: String,
    plot_pie: String,
    plot_hist: String,
    rows: Vec<ProductView>,
}

#[get("/")]
async fn dashboard(pool: web::Data<SqlitePool>) -> HttpResponse {
    let products = match product_db::get_all_products(&pool).await {
        Ok(products) => products,
        Err(e) => {
            log::error!("Failed to read products for dashboard: {}", e);
            return HttpResponse::InternalServerError()
                .body(format!("Error reading product data: {}", e));
        }
    };

    let stats = report::price_stats(&products);
    let slices = report::category_breakdown(&products);
    let bins = report::price_histogram(&products, HISTOGRAM_BINS);

    let charts = charts::mean_price_bar_png(&slices).and_then(|bar| {
        let pie = charts::category_share_pie_png(&slices)?;
        let hist = charts::price_histogram_png(&bins)?;
        Ok((bar, pie, hist))
    });
    let (plot_bar, plot_pie, plot_hist) = match charts {
        Ok(plots) => plots,
        Err(e) => {
            log::error!("Failed to render dashboard charts: {}", e);
            return HttpResponse::InternalServerError().body(format!("Error rendering charts: {}", e));
        }
    };

    let template = DashboardTemplate {
        total_products: stats.total_products,
        avg_price: format!("{:.2}", stats.avg_price),
        max_price: format!("{:.2}", stats.max_price),
        min_price: format!("{:.2}", stats.min_price),
        plot_bar,
        plot_pie,
        plot_hist,
        rows: products
            .iter()
            .take(TABLE_PREVIEW_ROWS)
            .map(product_view)
            .collect(),
    };

    match template.render() {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(e) => {
            log::error!("Failed to render dashboard template: {}", e);
            HttpResponse::InternalServerError().body(format!("Error rendering dashboard: {}", e))
        }
    }
}

fn product_view(row: &ProductRow) -> ProductView {
    ProductView {
        name: row.name.clone(),
        price: format!("{:.2}", row.price),
        rating: row.rating.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        category: category_from_url(&row.source_url),
        scraped_at: row.scraped_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use askama::Template;

    use super::{DashboardTemplate, ProductView};

    fn view(name: &str, price: &str) -> ProductView {
        ProductView {
            name: name.to_string(),
            price: price.to_string(),
            rating: "unknown".to_string(),
            category: "Other".to_string(),
            scraped_at: "2026-08-30 12:00:00".to_string(),
        }
    }

    #[test]
    fn missing_charts_are_omitted_not_broken() {
        // All rows priced zero: the histogram has no data while the page
        // still has products, so its image block must drop out entirely.
        let template = DashboardTemplate {
            total_products: 1,
            avg_price: "0.00".to_string(),
            max_price: "0.00".to_string(),
            min_price: "0.00".to_string(),
            plot_bar: "QUJD".to_string(),
            plot_pie: "QUJD".to_string(),
            plot_hist: String::new(),
            rows: vec![view("Freebie", "0.00")],
        };

        let html = template.render().unwrap();
        assert!(html.contains("base64,QUJD"));
        assert!(html.contains("Freebie"));
        // No img tag left pointing at an empty data URI.
        assert!(!html.contains(r#"base64,""#));
    }

    #[test]
    fn empty_store_renders_placeholder() {
        let template = DashboardTemplate {
            total_products: 0,
            avg_price: "0.00".to_string(),
            max_price: "0.00".to_string(),
            min_price: "0.00".to_string(),
            plot_bar: String::new(),
            plot_pie: String::new(),
            plot_hist: String::new(),
            rows: vec![],
        };

        let html = template.render().unwrap();
        assert!(html.contains("No data available"));
        assert!(!html.contains("data:image/png"));
    }
}
