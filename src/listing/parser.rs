//! HTML parser for Mercado Livre listing pages.

use crate::listing::models::{ProductRecord, PRICE_SENTINEL, TEXT_SENTINEL};
use crate::listing::selectors;
use anyhow::{Context, Result};
use scraper::{ElementRef, Html};
use tracing::{debug, trace};
use url::Url;

/// Parser for listing pages. Relative product links are resolved against `origin`.
pub struct Parser {
    origin: Url,
}

impl Parser {
    /// Creates a parser resolving links against the given site origin.
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// Creates a parser from an origin string such as `https://www.mercadolivre.com.br`.
    pub fn from_origin(origin: &str) -> Result<Self> {
        let origin =
            Url::parse(origin).with_context(|| format!("Invalid site origin: {}", origin))?;
        Ok(Self::new(origin))
    }

    /// Parses every product card on the page, in document order.
    ///
    /// Cards with missing or malformed fields are kept with sentinel values.
    pub fn parse_listing(&self, html: &str) -> Vec<ProductRecord> {
        let document = Html::parse_document(html);

        let records: Vec<ProductRecord> =
            document.select(&selectors::CARD).map(|card| self.parse_card(card)).collect();

        debug!("Parsed {} product cards", records.len());
        records
    }

    /// Parses a single product card.
    fn parse_card(&self, card: ElementRef) -> ProductRecord {
        let title_link = card.select(&selectors::TITLE_LINK).next();

        let (name, url) = match title_link {
            Some(link) => {
                let name = link.text().collect::<String>().trim().to_string();
                let url = link
                    .value()
                    .attr("href")
                    .and_then(|href| self.resolve_url(href))
                    .unwrap_or_else(|| TEXT_SENTINEL.to_string());
                (name, url)
            }
            None => {
                trace!("Card without title link");
                (TEXT_SENTINEL.to_string(), TEXT_SENTINEL.to_string())
            }
        };

        let price = card
            .select(&selectors::PRICE_FRACTION)
            .next()
            .map(|e| parse_price(&e.text().collect::<String>()))
            .unwrap_or(PRICE_SENTINEL);

        let record = ProductRecord::new(name, price, url);
        trace!("Parsed card: {} - {:.2}", record.name(), record.price());
        record
    }

    /// Joins a card href onto the site origin. Absolute hrefs are kept as-is.
    fn resolve_url(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        match self.origin.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                trace!("Could not resolve href {:?}: {}", href, e);
                None
            }
        }
    }
}

/// Converts pt-BR price text ("1.234,56") into a plain decimal string ("1234.56").
pub fn normalize_price(text: &str) -> String {
    text.trim().replace('.', "").replace(',', ".")
}

/// Parses a plain decimal string, falling back to the price sentinel.
pub fn parse_normalized(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => PRICE_SENTINEL,
    }
}

/// Parses pt-BR price text. Never fails: unparseable text yields the sentinel.
pub fn parse_price(text: &str) -> f64 {
    parse_normalized(&normalize_price(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.mercadolivre.com.br";

    fn parser() -> Parser {
        Parser::from_origin(ORIGIN).unwrap()
    }

    fn card(title: Option<(&str, Option<&str>)>, price: Option<&str>) -> String {
        let mut html = String::from(r#"<div class="poly-card__content">"#);
        if let Some((name, href)) = title {
            match href {
                Some(href) => html.push_str(&format!(
                    r#"<h3><a class="poly-component__title" href="{}">{}</a></h3>"#,
                    href, name
                )),
                None => html
                    .push_str(&format!(r#"<h3><a class="poly-component__title">{}</a></h3>"#, name)),
            }
        }
        if let Some(price) = price {
            html.push_str(&format!(
                r#"<span class="andes-money-amount__fraction">{}</span>"#,
                price
            ));
        }
        html.push_str("</div>");
        html
    }

    // Price parsing

    #[test]
    fn test_normalize_price() {
        assert_eq!(normalize_price("1.234,56"), "1234.56");
        assert_eq!(normalize_price(" 2.999 "), "2999");
        assert_eq!(normalize_price("49,90"), "49.90");
        assert_eq!(normalize_price(""), "");
    }

    #[test]
    fn test_parse_normalized() {
        assert_eq!(parse_normalized("1234.56"), 1234.56);
        assert_eq!(parse_normalized("0"), 0.0);
        assert_eq!(parse_normalized("abc"), PRICE_SENTINEL);
        assert_eq!(parse_normalized("-5"), PRICE_SENTINEL);
        assert_eq!(parse_normalized("NaN"), PRICE_SENTINEL);
    }

    #[test]
    fn test_parse_price_locale() {
        assert_eq!(parse_price("1.234,56"), 1234.56);
        assert_eq!(parse_price("3.000"), 3000.0);
        assert_eq!(parse_price("89"), 89.0);
        assert_eq!(parse_price("1.000.000"), 1_000_000.0);
    }

    #[test]
    fn test_parse_price_malformed() {
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("   "), 0.0);
        assert_eq!(parse_price("R$ 12"), 0.0);
        assert_eq!(parse_price("1,2,3"), 0.0);
    }

    // Card parsing

    #[test]
    fn test_parse_complete_card() {
        let html = card(Some(("  Notebook Acer  ", Some("/notebook-acer/p/MLB1"))), Some("2.499"));
        let records = parser().parse_listing(&html);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Notebook Acer");
        assert_eq!(records[0].price(), 2499.0);
        assert_eq!(records[0].url(), "https://www.mercadolivre.com.br/notebook-acer/p/MLB1");
    }

    #[test]
    fn test_parse_card_missing_title() {
        let html = card(None, Some("1.500"));
        let records = parser().parse_listing(&html);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "N/A");
        assert_eq!(records[0].url(), "N/A");
        assert_eq!(records[0].price(), 1500.0);
    }

    #[test]
    fn test_parse_card_missing_price() {
        let html = card(Some(("Mouse", Some("/mouse"))), None);
        let records = parser().parse_listing(&html);

        assert_eq!(records[0].name(), "Mouse");
        assert_eq!(records[0].price(), 0.0);
    }

    #[test]
    fn test_parse_card_malformed_price_is_kept() {
        let html = card(Some(("Mouse", Some("/mouse"))), Some("consulte"));
        let records = parser().parse_listing(&html);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price(), 0.0);
    }

    #[test]
    fn test_parse_card_link_without_href() {
        let html = card(Some(("Teclado", None)), Some("100"));
        let records = parser().parse_listing(&html);

        assert_eq!(records[0].name(), "Teclado");
        assert_eq!(records[0].url(), "N/A");
    }

    #[test]
    fn test_absolute_href_kept() {
        let html = card(
            Some(("Monitor", Some("https://produto.mercadolivre.com.br/MLB-123-monitor"))),
            Some("899"),
        );
        let records = parser().parse_listing(&html);

        assert_eq!(records[0].url(), "https://produto.mercadolivre.com.br/MLB-123-monitor");
    }

    #[test]
    fn test_document_order_preserved() {
        let html = format!(
            "<html><body>{}{}{}</body></html>",
            card(Some(("A", Some("/a"))), Some("3")),
            card(Some(("B", Some("/b"))), Some("1")),
            card(Some(("C", Some("/c"))), Some("2")),
        );
        let names: Vec<String> =
            parser().parse_listing(&html).iter().map(|r| r.name().to_string()).collect();

        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_empty_page() {
        let records = parser().parse_listing("<html><body><p>Nada</p></body></html>");
        assert!(records.is_empty());
    }

    #[test]
    fn test_from_origin_invalid() {
        let result = Parser::from_origin("not a url");
        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().contains("Invalid site origin"));
    }
}
