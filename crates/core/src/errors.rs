use thiserror::Error;

/// Unified error type for the growth-sim-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Request validation ──────────────────────────────────────────
    #[error("Bad request: {0}")]
    BadRequest(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Upstream error ({provider}, HTTP {status}): {body}")]
    Upstream {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Static datasets ─────────────────────────────────────────────
    #[error("Invalid dataset '{dataset}': {message}")]
    InvalidDataset { dataset: String, message: String },

    #[error("File I/O error: {0}")]
    FileIO(String),
}

/// Coarse classification used by the HTTP layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed caller input. Never reaches upstream.
    BadRequest,
    /// The upstream API answered with a non-success status.
    Upstream,
    /// Anything else: network failures, malformed payloads, local I/O.
    Server,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::BadRequest(_) => ErrorKind::BadRequest,
            CoreError::Upstream { .. } => ErrorKind::Upstream,
            CoreError::Network(_)
            | CoreError::Deserialization(_)
            | CoreError::InvalidDataset { .. }
            | CoreError::FileIO(_) => ErrorKind::Server,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors embed the full URL; drop the query so API keys never reach logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
