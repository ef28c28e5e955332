//! Crawler module for walking first links
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of rendered article bodies
//! - The link-following loop with cache lookups and cycle detection

mod coordinator;
mod fetcher;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpPageSource, PageSource};
