//! Crawler coordinator - the link-following loop
//!
//! Each step looks the current title up in the title cache and, on a miss,
//! fetches the rendered article and runs the first-link search over it. The
//! crawl stops when the target is reached, a title has no link to follow, or
//! a link leads back to a title already visited.

use crate::cache::TitleCache;
use crate::crawler::fetcher::PageSource;
use crate::extract::LinkExtractor;
use crate::state::{CrawlOutcome, CrawlState, DeadEndCause, Step};
use crate::title::{cache_key, display_title, normalize_title, ArticleSite};

/// Where the next title came from
enum NextLink {
    Cached(Option<String>),
    Extracted(Option<String>),
    FetchFailed,
}

/// Drives one or more crawls against a page source and a title cache
pub struct Crawler<'c, S> {
    source: S,
    extractor: LinkExtractor,
    cache: &'c mut TitleCache,
    host: String,
}

impl<'c, S: PageSource> Crawler<'c, S> {
    /// Creates a crawler instance
    ///
    /// # Arguments
    ///
    /// * `source` - Where rendered article bodies come from
    /// * `site` - The site links are resolved against; its host namespaces cache keys
    /// * `cache` - Title cache consulted before every fetch
    pub fn new(source: S, site: ArticleSite, cache: &'c mut TitleCache) -> Self {
        let host = site.host();
        Self {
            source,
            extractor: LinkExtractor::new(site),
            cache,
            host,
        }
    }

    /// Follows first links from `start` until `target`, a dead end or a cycle
    ///
    /// `max_steps` bounds the number of links followed; `None` is unbounded.
    pub async fn crawl(&mut self, start: &str, target: &str, max_steps: Option<u32>) -> CrawlOutcome {
        self.crawl_with_progress(start, target, max_steps, |_| {})
            .await
    }

    /// Same as [`Crawler::crawl`], reporting every followed link to `on_step`
    pub async fn crawl_with_progress<F>(
        &mut self,
        start: &str,
        target: &str,
        max_steps: Option<u32>,
        mut on_step: F,
    ) -> CrawlOutcome
    where
        F: FnMut(&Step),
    {
        let start = match normalize_title(start) {
            Ok(title) => title,
            Err(error) => {
                tracing::warn!("Rejecting start title '{}': {}", start, error);
                return CrawlOutcome::InvalidStart { error };
            }
        };

        // Configuration validates the target; anything else simply never matches
        let target = normalize_title(target).unwrap_or_else(|_| target.trim().replace(' ', "_"));

        tracing::info!(
            "Walking from {} towards {}",
            display_title(&start),
            display_title(&target)
        );

        let mut state = CrawlState::new(start);

        while state.current != target {
            if max_steps.is_some_and(|max| state.steps >= max) {
                tracing::info!("Step limit of {} reached", state.steps);
                return CrawlOutcome::StepLimit {
                    title: state.current,
                    steps: state.steps,
                };
            }

            state.visit_current();

            let (next, cached) = match self.next_link(&state.current).await {
                NextLink::Cached(next) => (next, true),
                NextLink::Extracted(next) => (next, false),
                NextLink::FetchFailed => {
                    return CrawlOutcome::DeadEnd {
                        title: state.current,
                        cause: DeadEndCause::FetchFailed,
                    };
                }
            };

            let Some(next) = next else {
                tracing::info!("{} has no link to follow", display_title(&state.current));
                return CrawlOutcome::DeadEnd {
                    title: state.current,
                    cause: DeadEndCause::NoLink,
                };
            };

            let step = Step {
                index: state.steps + 1,
                from: state.current.clone(),
                to: next.clone(),
                cached,
            };
            tracing::info!(
                "Step {}: {} -> {}{}",
                step.index,
                display_title(&step.from),
                display_title(&step.to),
                if cached { " (cached)" } else { "" }
            );
            on_step(&step);

            // Detected before the revisited title is looked up again
            if state.has_visited(&next) {
                tracing::info!("Loop detected at {}", display_title(&next));
                return CrawlOutcome::Cycle {
                    title: next,
                    history: state.history,
                };
            }

            state.advance(next);
        }

        tracing::info!("Reached {} in {} steps", display_title(&target), state.steps);
        CrawlOutcome::Reached { steps: state.steps }
    }

    /// Resolves the next title for `title`, from the cache when possible
    ///
    /// Completed extractions are cached, including "no link". Fetch failures
    /// are not, so a later run tries again.
    async fn next_link(&mut self, title: &str) -> NextLink {
        let key = cache_key(&self.host, title);

        if let Some(next) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {}", key);
            return NextLink::Cached(next);
        }

        tracing::debug!("Cache miss for {}", key);
        let Some(markup) = self.source.fetch(title).await else {
            return NextLink::FetchFailed;
        };

        let next = self.extractor.find_first_link_in(&markup);
        self.cache.set(key, next.clone());
        NextLink::Extracted(next)
    }
}
