//! URL handling module for Site-Survey
//!
//! This module provides the normalized [`Address`] type used as the crawl's
//! identity for pages, and the [`ScopeFilter`] that keeps the crawl on-site.

mod normalize;
mod scope;

use crate::UrlResult;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

// Re-export main functions
pub use normalize::{normalize_parsed, normalize_url};
pub use scope::{is_same_site, ScopeFilter};

/// A normalized, absolute http(s) address
///
/// Two addresses are equal exactly when their normalized URL strings are
/// equal, which makes `Address` the key of the frontier and visited set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(Url);

impl Address {
    /// Parses and normalizes an absolute address
    ///
    /// # Examples
    ///
    /// ```
    /// use site_survey::url::Address;
    ///
    /// let address = Address::parse("https://Example.com/about#team").unwrap();
    /// assert_eq!(address.as_str(), "https://example.com/about");
    /// ```
    pub fn parse(input: &str) -> UrlResult<Self> {
        normalize_url(input).map(Self)
    }

    /// Normalizes an already parsed URL into an address
    pub fn from_url(url: Url) -> UrlResult<Self> {
        normalize_parsed(url).map(Self)
    }

    /// Resolves a hyperlink reference found on this page
    ///
    /// Relative references are joined against `self`. Returns `None` when the
    /// reference cannot be resolved or does not lead to an http(s) address.
    pub fn resolve(&self, reference: &str) -> Option<Self> {
        let joined = self.0.join(reference.trim()).ok()?;
        Self::from_url(joined).ok()
    }

    /// Address of the site's robots.txt
    pub fn robots_txt(&self) -> Option<Self> {
        self.resolve("/robots.txt")
    }

    /// The underlying URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
