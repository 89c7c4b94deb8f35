use std::sync::LazyLock;

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use tracing::info;

use crate::catalog::{GuideBook, SourceKind};

const SITE_ROOT: &str = "https://www.cisco.com";

static TOC_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul#bookToc > li > a").unwrap());

/// Expand a guide book's landing page into its chapter URLs, tagged with the
/// book's concept and kind, ready for the source queue.
pub async fn expand_guide_book(
    client: &reqwest::Client,
    book: &GuideBook,
) -> Result<Vec<(String, String, SourceKind)>> {
    info!("Expanding guide book: {}", book.url);
    let html = client
        .get(book.url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("Failed to fetch guide book {}", book.url))?;

    let chapters = parse_book_toc(&html);
    info!("Found {} chapters in {}", chapters.len(), book.url);
    Ok(chapters
        .into_iter()
        .map(|url| (url, book.concept.to_string(), book.kind))
        .collect())
}

/// Chapter links from a book's table of contents, absolutized against the
/// vendor site root.
pub fn parse_book_toc(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&TOC_LINKS)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| {
            if href.starts_with("http") {
                href.to_string()
            } else {
                format!("{}{}", SITE_ROOT, href)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toc_links_are_absolutized() {
        let html = r#"<html><body>
            <ul id="bookToc">
              <li><a href="/c/en/us/td/docs/switches/catalyst1300/intro.html">Introduction</a></li>
              <li><a href="https://www.cisco.com/c/en/us/td/docs/switches/catalyst1300/ip.html">IPv4 Commands</a></li>
            </ul>
            <ul><li><a href="/unrelated.html">elsewhere</a></li></ul>
            </body></html>"#;
        let urls = parse_book_toc(html);
        assert_eq!(
            urls,
            vec![
                "https://www.cisco.com/c/en/us/td/docs/switches/catalyst1300/intro.html",
                "https://www.cisco.com/c/en/us/td/docs/switches/catalyst1300/ip.html",
            ]
        );
    }

    #[test]
    fn nested_list_links_are_ignored() {
        let html = r#"<ul id="bookToc">
            <li><a href="/top.html">Top</a>
              <ul><li><a href="/nested.html">Nested</a></li></ul>
            </li>
        </ul>"#;
        let urls = parse_book_toc(html);
        assert_eq!(urls, vec!["https://www.cisco.com/top.html"]);
    }
}
