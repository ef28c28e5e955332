//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: History, current title and step count of one running crawl
//! - `CrawlOutcome`: The terminal state a crawl ends in
//! - `Step`: Progress notification for each followed link

mod crawl_state;
mod outcome;

// Re-export main types
pub use crawl_state::CrawlState;
pub use outcome::{CrawlOutcome, DeadEndCause, Step};
