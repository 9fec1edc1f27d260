use serde::{Deserialize, Serialize};

use crate::core::ApodError;

/// One Astronomy Picture of the Day entry as returned by `planetary/apod`.
///
/// Every field is optional; `null` decodes the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub hdurl: Option<String>,
}

impl ApodRecord {
    /// Display image: `hdurl` first, then `url`. Empty strings count as absent.
    pub fn image_url(&self) -> Option<&str> {
        non_empty(self.hdurl.as_deref()).or_else(|| non_empty(self.url.as_deref()))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

/// Anything that can produce an APOD record for an optional `YYYY-MM-DD` date.
///
/// The remote NASA client is the production implementation; tests plug in
/// canned sources.
#[async_trait::async_trait]
pub trait ApodSource: Send + Sync + 'static {
    async fn fetch(&self, date: Option<&str>) -> Result<ApodRecord, ApodError>;
}
