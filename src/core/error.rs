use thiserror::Error;

/// Why an APOD fetch produced no usable record.
///
/// Callers of the tool never see these; they are logged and then collapsed
/// into the single user-facing failure message.
#[derive(Debug, Error)]
pub enum ApodError {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream status {0}")]
    Status(reqwest::StatusCode),
    #[error("undecodable response: {0}")]
    Decode(String),
    #[error("upstream returned an empty record")]
    Empty,
}

impl ApodError {
    /// Short label used for log fields and metric names.
    pub fn kind(&self) -> &'static str {
        match self {
            ApodError::Transport(e) if e.is_timeout() => "timeout",
            ApodError::Transport(_) => "transport",
            ApodError::Status(_) => "status",
            ApodError::Decode(_) => "decode",
            ApodError::Empty => "empty",
        }
    }
}
