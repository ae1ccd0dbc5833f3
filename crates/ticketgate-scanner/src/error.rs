/// Why a scanned payload could not be turned into a reference id.
///
/// Every variant is reported to operators as an invalid QR code format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid QR code format: empty payload")]
    Empty,

    #[error("invalid QR code format: malformed URL ({0})")]
    MalformedUrl(String),

    #[error("invalid QR code format: URL path has no reference id")]
    NoPathSegment,
}

/// Scanner client errors.
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node returned HTTP {status}: {error}")]
    Http { status: u16, error: String },

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
