//! Year links on the archive's listing page.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

static YEAR_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td a[href]").expect("year link selector"));

/// One year link found on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub year: String,
    pub url: Url,
}

/// Collect every table-cell link whose visible text is a 4-digit year once
/// footnote markers (`*`) are removed. Relative links are resolved against
/// `base`. Page order is kept and repeated entries are not merged.
pub fn parse_listing(html: &str, base: &Url) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    for link in document.select(&YEAR_LINK) {
        let label = link.text().collect::<String>().replace('*', "");
        let label = label.trim();
        if !is_year(label) {
            continue;
        }
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        match base.join(href) {
            Ok(url) => entries.push(ListingEntry {
                year: label.to_string(),
                url,
            }),
            Err(e) => tracing::warn!(year = label, href, error = %e, "collector.listing.bad_href"),
        }
    }

    entries
}

fn is_year(label: &str) -> bool {
    label.len() == 4 && label.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://archive.example.org/documents/guidebook/annual-messages").unwrap()
    }

    #[test]
    fn keeps_only_four_digit_labels() {
        let html = r#"
            <table><tr>
              <td><a href="/documents/one">1790</a></td>
              <td><a href="/documents/two">Washington</a></td>
              <td><a href="/documents/three">17901</a></td>
              <td><a href="/documents/four">179</a></td>
              <td><a href="/documents/five">19a0</a></td>
              <td><a href="/documents/six"> 1801 </a></td>
            </tr></table>"#;
        let entries = parse_listing(html, &base());
        let years: Vec<&str> = entries.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["1790", "1801"]);
    }

    #[test]
    fn footnote_markers_are_stripped() {
        let html = r#"<table><tr><td><a href="/d/1">1974*</a></td><td><a href="/d/2">*19*75</a></td></tr></table>"#;
        let entries = parse_listing(html, &base());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].year, "1974");
        assert_eq!(entries[1].year, "1975");
    }

    #[test]
    fn relative_links_resolve_against_base() {
        let html = r#"<table><tr>
            <td><a href="/documents/address-1">1913</a></td>
            <td><a href="other/1914">1914</a></td>
            <td><a href="https://mirror.example.net/1915">1915</a></td>
        </tr></table>"#;
        let entries = parse_listing(html, &base());
        assert_eq!(entries[0].url.as_str(), "https://archive.example.org/documents/address-1");
        assert_eq!(entries[1].url.as_str(), "https://archive.example.org/documents/guidebook/other/1914");
        assert_eq!(entries[2].url.as_str(), "https://mirror.example.net/1915");
    }

    #[test]
    fn duplicate_links_are_all_kept_in_page_order() {
        let html = r#"<table>
            <tr><td><a href="/d/1946">1946</a></td></tr>
            <tr><td><a href="/d/1945">1945</a></td></tr>
            <tr><td><a href="/d/1946">1946</a></td></tr>
        </table>"#;
        let entries = parse_listing(html, &base());
        let years: Vec<&str> = entries.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["1946", "1945", "1946"]);
        assert_eq!(entries[0], entries[2]);
    }

    #[test]
    fn links_outside_table_cells_or_without_href_are_ignored() {
        let html = r#"
            <p><a href="/d/1">1999</a></p>
            <table><tr><td><a>2000</a></td><td><a href="/d/2">2001</a></td></tr></table>"#;
        let entries = parse_listing(html, &base());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].year, "2001");
    }

    #[test]
    fn nested_markup_inside_link_counts_as_label() {
        let html = r#"<table><tr><td><a href="/d/1"><span>19</span><b>33</b></a></td></tr></table>"#;
        let entries = parse_listing(html, &base());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].year, "1933");
    }
}
