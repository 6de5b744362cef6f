use crate::crawler::FetchFailure;
use crate::url::Address;
use std::fmt;

/// Why an address produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Disallowed by robots.txt; no fetch was attempted
    PolicyDenied,

    /// The fetch failed; never retried within the run
    FetchFailed(FetchFailure),
}

impl SkipReason {
    pub fn is_policy_denied(&self) -> bool {
        matches!(self, Self::PolicyDenied)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PolicyDenied => f.write_str("disallowed by robots.txt"),
            Self::FetchFailed(failure) => write!(f, "fetch failed ({})", failure),
        }
    }
}

/// An address that was visited but yielded no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPage {
    pub address: Address,
    pub reason: SkipReason,
}
