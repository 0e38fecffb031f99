//! Listing page fetching, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{FetchError, ListingClient, ListingSource};
pub use models::ProductRecord;
pub use parser::Parser;
