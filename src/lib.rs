//! ml-price-report - Mercado Livre listing scraper with spreadsheet and box plot output
//!
//! Fetches a search listing, extracts name/price/URL for each product card,
//! writes an XLSX report highlighting prices against the mean, and renders
//! the price distribution as a box plot.

pub mod commands;
pub mod config;
pub mod listing;
pub mod opener;
pub mod plot;
pub mod report;

pub use config::Config;
pub use listing::models::ProductRecord;
pub use report::{PriceBand, PriceSummary};
