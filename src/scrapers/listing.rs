//! Listing page extraction.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{FetchError, HttpClient, RawCandidate, SourceConfig};

/// Fetch one listing page and extract raw candidates.
///
/// Fails on transport errors and non-success statuses only; items
/// missing a name or date text are skipped individually.
pub async fn fetch_listing(
    client: &HttpClient,
    source: &SourceConfig,
) -> Result<Vec<RawCandidate>, FetchError> {
    let url = source.listing_url();
    let body = client.get_text(&url).await?;
    extract_candidates(&body, source)
}

fn parse_selector(selector: &str) -> Result<Selector, FetchError> {
    Selector::parse(selector).map_err(|e| FetchError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn text_of(item: ElementRef<'_>, selector: &Selector) -> String {
    item.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extract candidates from a listing page body using the source's
/// selector rules.
pub fn extract_candidates(
    body: &str,
    source: &SourceConfig,
) -> Result<Vec<RawCandidate>, FetchError> {
    let item_selector = parse_selector(&source.item_selector)?;
    let name_selector = parse_selector(&source.name_selector)?;
    let date_selector = parse_selector(&source.date_selector)?;
    let location_selector = parse_selector(&source.location_selector)?;

    let document = Html::parse_document(body);
    let mut candidates = Vec::new();

    for item in document.select(&item_selector) {
        let name = text_of(item, &name_selector);
        let date_text = text_of(item, &date_selector);
        let location_text = text_of(item, &location_selector);

        if name.is_empty() || date_text.is_empty() {
            debug!(
                source = %source.id,
                "skipping listing item without name or date"
            );
            continue;
        }

        candidates.push(RawCandidate {
            name,
            date_text,
            location_text,
        });
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <div class="tournament-item">
            <span class="tournament-name">第45回全日本選手権</span>
            <span class="tournament-date">2026年12月15日</span>
            <span class="tournament-location">東京都 渋谷区</span>
          </div>
          <div class="tournament-item">
            <span class="tournament-name"> 県民大会 </span>
            <span class="tournament-date">2026-11-20</span>
          </div>
          <div class="tournament-item">
            <span class="tournament-date">2026-11-21</span>
            <span class="tournament-location">大阪府</span>
          </div>
          <div class="tournament-item">
            <span class="tournament-name">日付のない大会</span>
          </div>
        </body></html>
    "#;

    #[test]
    fn extracts_items_and_skips_malformed_ones() {
        let source = SourceConfig::default();
        let candidates = extract_candidates(LISTING, &source).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "第45回全日本選手権");
        assert_eq!(candidates[0].date_text, "2026年12月15日");
        assert_eq!(candidates[0].location_text, "東京都 渋谷区");
        // Whitespace is trimmed; missing location is tolerated.
        assert_eq!(candidates[1].name, "県民大会");
        assert_eq!(candidates[1].location_text, "");
    }

    #[test]
    fn empty_page_yields_no_candidates() {
        let source = SourceConfig::default();
        let candidates = extract_candidates("<html><body></body></html>", &source).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn bad_selector_is_a_fetch_error() {
        let source = SourceConfig {
            item_selector: ":::".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            extract_candidates(LISTING, &source),
            Err(FetchError::Selector { .. })
        ));
    }
}
