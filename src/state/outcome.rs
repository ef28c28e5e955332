/// Crawl outcome definitions
///
/// Every crawl ends in exactly one of these terminal states.
use crate::TitleError;
use std::fmt;

/// Why a title turned out to be a dead end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadEndCause {
    /// The article body has no admissible, non-parenthetical link
    NoLink,

    /// The article could not be fetched (network failure, non-OK status)
    FetchFailed,
}

/// Terminal result of one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    // ===== Success =====
    /// The target title was reached after `steps` link follows
    Reached { steps: u32 },

    // ===== Rejected Input =====
    /// The start title is empty or namespaced
    InvalidStart { error: TitleError },

    // ===== Expected Failures =====
    /// `title` has no link to follow
    DeadEnd { title: String, cause: DeadEndCause },

    /// Following links from `history` led back to `title`
    Cycle { title: String, history: Vec<String> },

    /// The step limit ran out while standing on `title`
    StepLimit { title: String, steps: u32 },
}

impl CrawlOutcome {
    /// Returns true only when the target was reached
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Reached { .. })
    }
}

impl fmt::Display for DeadEndCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLink => write!(f, "no link to follow"),
            Self::FetchFailed => write!(f, "page could not be fetched"),
        }
    }
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reached { steps } => write!(f, "reached target in {} steps", steps),
            Self::InvalidStart { error } => write!(f, "invalid start title: {}", error),
            Self::DeadEnd { title, cause } => write!(f, "dead end at {} ({})", title, cause),
            Self::Cycle { title, history } => {
                write!(f, "cycle back to {} after {} titles", title, history.len())
            }
            Self::StepLimit { title, steps } => {
                write!(f, "gave up at {} after {} steps", title, steps)
            }
        }
    }
}

/// Progress notification for one followed link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based position of this step in the crawl
    pub index: u32,

    /// Title the link was found on
    pub from: String,

    /// Title the link points to
    pub to: String,

    /// Whether the link came from the title cache
    pub cached: bool,
}
