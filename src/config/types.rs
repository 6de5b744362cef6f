use serde::Deserialize;

/// File suffixes that are never enqueued because they are not HTML pages
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".tif", ".pdf", ".doc", ".docx", ".xls",
    ".xlsx", ".ppt", ".pptx", ".zip", ".rar", ".7z", ".mp3", ".mp4", ".avi", ".mov", ".wmv",
    ".flv", ".mpeg", ".mpg", ".webm", ".ogg", ".wav",
];

/// Main configuration structure for Site-Survey
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Address the crawl starts from; also defines the site scope
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Minimum time between the start of two consecutive fetches (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Transport timeout for a single request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Stretch the delay to the robots.txt Crawl-delay when it is longer
    #[serde(rename = "honor-crawl-delay", default = "default_true")]
    pub honor_crawl_delay: bool,

    /// Path suffixes treated as binary media and kept out of the frontier
    #[serde(rename = "media-extensions", default = "default_media_extensions")]
    pub media_extensions: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler, also the token matched against robots.txt groups
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the dated CSV file is written to
    #[serde(default = "default_directory")]
    pub directory: String,

    /// File name prefix; the run date and `.csv` are appended
    #[serde(rename = "file-prefix", default = "default_file_prefix")]
    pub file_prefix: String,

    /// Optional append-only log file for the diagnostics stream
    #[serde(rename = "log-file", default)]
    pub log_file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_prefix: default_file_prefix(),
            log_file: None,
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_media_extensions() -> Vec<String> {
    DEFAULT_MEDIA_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    "scrape".to_string()
}
