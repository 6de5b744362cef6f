/// Crawl phase definitions for the controller's state machine
use std::fmt;

/// Lifecycle of a single crawl run
///
/// `Idle -> Running -> Draining -> Terminated`. There is no pause/resume and
/// a controller runs at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Constructed, not yet started
    Idle,

    /// Working through the frontier
    Running,

    /// Frontier exhausted (or stop requested); handing results to the sink
    Draining,

    /// Run finished, successfully or not
    Terminated,
}

impl CrawlPhase {
    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Terminated)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
