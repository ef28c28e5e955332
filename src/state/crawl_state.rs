/// Transient state of one crawl
///
/// Owned by the crawler for a single `crawl` call and dropped when it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    /// Titles already stood on, in visiting order
    pub history: Vec<String>,

    /// Title the crawl is standing on
    pub current: String,

    /// Links followed so far
    pub steps: u32,
}

impl CrawlState {
    /// Creates the state for a crawl starting at `start`
    pub fn new(start: String) -> Self {
        Self {
            history: Vec::new(),
            current: start,
            steps: 0,
        }
    }

    /// Records the current title as visited
    pub fn visit_current(&mut self) {
        self.history.push(self.current.clone());
    }

    /// Returns true if `title` was already visited in this crawl
    pub fn has_visited(&self, title: &str) -> bool {
        self.history.iter().any(|visited| visited == title)
    }

    /// Moves to `next`, counting one more step
    pub fn advance(&mut self, next: String) {
        self.current = next;
        self.steps += 1;
    }
}
