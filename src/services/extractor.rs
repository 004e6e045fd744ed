use scraper::{ElementRef, Html, Selector};

use crate::domain::product::ProductRecord;

/// Extract product records from a search-results page. A page whose
/// structure does not match (including bot-block interstitials) yields an
/// empty list, never an error. Items without a title are dropped; missing
/// optional fields degrade to defaults.
pub fn extract_products(html: &str) -> Vec<ProductRecord> {
    let result_selector = Selector::parse(r#"div[data-component-type="s-search-result"]"#).unwrap();
    let title_selector = Selector::parse("h2").unwrap();
    let span_selector = Selector::parse("span").unwrap();
    let price_whole_selector = Selector::parse("span.a-price-whole").unwrap();
    let price_fraction_selector = Selector::parse("span.a-price-fraction").unwrap();
    let rating_selector = Selector::parse("span.a-icon-alt").unwrap();
    let image_selector = Selector::parse("img.s-image").unwrap();

    let document = Html::parse_document(html);
    let mut records = vec![];

    for block in document.select(&result_selector) {
        let title = block
            .select(&title_selector)
            .next()
            .and_then(|h2| h2.select(&span_selector).next())
            .map(element_text);
        let title = match title {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };

        let whole = block.select(&price_whole_selector).next().map(element_text);
        let fraction = block
            .select(&price_fraction_selector)
            .next()
            .map(element_text);
        let price = match whole {
            Some(whole) => parse_price(&whole, fraction.as_deref()),
            None => 0.0,
        };

        let rating = block.select(&rating_selector).next().map(element_text);
        let image_url = block
            .select(&image_selector)
            .next()
            .and_then(|img| img.value().attr("src").map(|src| src.to_string()));

        records.push(ProductRecord::new(title, price, rating, image_url));
    }

    records
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parse a price from its integer-part text and optional fractional-part
/// text. Thousands separators (and stray dots, the separator on some
/// locales) are stripped from the integer part. Anything unparseable or
/// negative yields 0.
pub fn parse_price(whole: &str, fraction: Option<&str>) -> f64 {
    let mut normalized: String = whole
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .collect();

    if let Some(fraction) = fraction {
        normalized.push('.');
        normalized.push_str(fraction.trim());
    }

    match normalized.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => price,
        _ => 0.0,
    }
}
