use url::Url;

/// Keyword checked against the lowercased URL, first match wins.
const KEYWORD_LABELS: [(&str, &str); 5] = [
    ("macbook", "Laptops"),
    ("headphone", "Headphones"),
    ("keyboard", "Keyboards"),
    ("mouse", "Gaming Mice"),
    ("monitor", "Monitors"),
];

const LABEL_MAX_CHARS: usize = 20;

/// Derive a display category from a source URL. Falls back to the `k=`
/// search parameter, then to "Other".
pub fn category_from_url(url: &str) -> String {
    let lowered = url.to_lowercase();

    for (keyword, label) in KEYWORD_LABELS {
        if lowered.contains(keyword) {
            return label.to_string();
        }
    }

    if let Ok(parsed_url) = Url::parse(url) {
        if let Some((_, query)) = parsed_url.query_pairs().find(|(key, _)| key == "k") {
            return query.chars().take(LABEL_MAX_CHARS).collect();
        }
    }

    "Other".to_string()
}

#[cfg(test)]
mod tests {
    use super::category_from_url;

    #[test]
    fn keyword_maps_to_label() {
        let url = "https://www.amazon.in/s?k=mechanical+keyboard&crid=1WVQHJ0P9H3Z6";
        assert_eq!(category_from_url(url), "Keyboards");
    }

    #[test]
    fn first_keyword_wins() {
        let url = "https://www.amazon.in/s?k=keyboard+for+macbook";
        assert_eq!(category_from_url(url), "Laptops");
    }

    #[test]
    fn falls_back_to_search_parameter() {
        let url = "https://www.amazon.in/s?k=usb+c+hub&ref=nb_sb_noss";
        assert_eq!(category_from_url(url), "usb c hub");
    }

    #[test]
    fn search_parameter_is_truncated() {
        let url = "https://www.amazon.in/s?k=a+very+long+product+search+query+indeed";
        assert_eq!(category_from_url(url).chars().count(), 20);
    }

    #[test]
    fn unrecognized_url_is_other() {
        assert_eq!(category_from_url("https://example.com/deals"), "Other");
        assert_eq!(category_from_url("not a url at all"), "Other");
    }
}
