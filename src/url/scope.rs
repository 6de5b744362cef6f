//! Scope filter: decides which discovered links belong to the crawl
//!
//! The check is purely lexical. A candidate is in scope when it lives on the
//! same origin as the root, under the root's path, and does not look like a
//! binary media file.

use crate::url::Address;

/// Decides whether discovered addresses are eligible for the frontier
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    root: Address,
    /// Lowercased suffixes, each starting with '.'
    media_extensions: Vec<String>,
}

impl ScopeFilter {
    /// Creates a filter for the site rooted at `root`
    ///
    /// # Arguments
    ///
    /// * `root` - The crawl's root address
    /// * `media_extensions` - Path suffixes to exclude (compared case-insensitively)
    pub fn new<I, S>(root: Address, media_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            root,
            media_extensions: media_extensions
                .into_iter()
                .map(|ext| ext.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns true if `candidate` should be crawled
    pub fn is_in_scope(&self, candidate: &Address) -> bool {
        is_same_site(candidate, &self.root) && !self.is_media(candidate)
    }

    /// Returns true if the candidate's path ends in a configured media suffix
    pub fn is_media(&self, candidate: &Address) -> bool {
        let path = candidate.path().to_lowercase();
        self.media_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
    }
}

/// Returns true if `candidate` is on the root's origin and under its path
///
/// The root path is treated as a directory: a root of `/docs` admits
/// `/docs` and `/docs/intro` but not `/docsearch`.
pub fn is_same_site(candidate: &Address, root: &Address) -> bool {
    let (candidate_url, root_url) = (candidate.as_url(), root.as_url());

    if candidate_url.scheme() != root_url.scheme()
        || candidate_url.host_str() != root_url.host_str()
        || candidate_url.port_or_known_default() != root_url.port_or_known_default()
    {
        return false;
    }

    let root_path = root_url.path();
    let candidate_path = candidate_url.path();

    if candidate_path == root_path || root_path.ends_with('/') {
        return candidate_path.starts_with(root_path);
    }

    candidate_path
        .strip_prefix(root_path)
        .is_some_and(|rest| rest.starts_with('/'))
}
