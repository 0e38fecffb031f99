//! CSS selectors for Mercado Livre listing pages.
//!
//! Update this file when the listing markup changes, and add a fixture
//! capturing the new structure under `tests/fixtures/`.

use scraper::Selector;
use std::sync::LazyLock;

/// Product card container, one per listed item.
pub static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.poly-card__content").unwrap());

/// Title link inside a card. Carries both the product name and its href.
pub static TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.poly-component__title").unwrap());

/// Integer part of the price ("1.234" in "R$ 1.234,56").
pub static PRICE_FRACTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.andes-money-amount__fraction").unwrap());
