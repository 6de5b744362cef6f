use crate::url::Address;
use serde::Serialize;

/// Sentinel written for a field the page does not provide
pub const BLANK: &str = "blank";

/// CSV header, in column order
pub const CSV_HEADER: [&str; 4] = ["Page Title", "Meta Title", "Meta Description", "Link"];

/// Descriptive fields extracted from one successfully fetched page
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Document title, or [`BLANK`]
    #[serde(rename = "Page Title")]
    pub title: String,

    /// `<meta name="title">` or `og:title` content, or [`BLANK`]
    #[serde(rename = "Meta Title")]
    pub meta_title: String,

    /// `<meta name="description">` content, or [`BLANK`]
    #[serde(rename = "Meta Description")]
    pub meta_description: String,

    /// Address the page was fetched from
    #[serde(rename = "Link")]
    pub source: Address,
}
