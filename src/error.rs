//! Error types for the notion.so client
//!
//! One enum covers the whole fetch pipeline. Transport and API errors come
//! from the HTTP layer, `Decode` from response bodies, `Normalize` from
//! per-block `properties`/`format` documents, and `MissingRoot` from tree
//! resolution. A child id that cannot be found is not an error.

use thiserror::Error;

/// Boxed error used for transport failures so test transports can fail too.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, NotionError>;

/// Longest response body kept on an [`NotionError::Api`].
pub const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum NotionError {
    /// Connection, TLS, timeout or body-read failure before a response was obtained
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// Server answered with a non-success status
    #[error("notion: {status} {url} '{body}'")]
    Api {
        status: u16,
        url: String,
        /// Response body, truncated to [`MAX_ERROR_BODY_CHARS`]
        body: String,
    },

    #[error("failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("root block '{id}' is missing from the record map")]
    MissingRoot { id: String },

    #[error("no access to block '{id}' (role: '{role}')")]
    AccessDenied { id: String, role: String },

    #[error("'{input}' is not a notion page id or url")]
    InvalidId { input: String },

    #[error("pagination of page '{page_id}' did not finish within {rounds} rounds")]
    PaginationLimit { page_id: String, rounds: usize },

    #[error("pagination of page '{page_id}' stalled: cursor repeated at round {round}")]
    PaginationStalled { page_id: String, round: usize },

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl NotionError {
    pub fn api(status: u16, url: impl Into<String>, body: &str) -> Self {
        Self::Api {
            status,
            url: url.into(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }

    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Stable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT",
            Self::Api { .. } => "API",
            Self::Decode { .. } => "DECODE",
            Self::Normalize(_) => "NORMALIZE",
            Self::MissingRoot { .. } => "MISSING_ROOT",
            Self::AccessDenied { .. } => "ACCESS_DENIED",
            Self::InvalidId { .. } => "INVALID_ID",
            Self::PaginationLimit { .. } => "PAGINATION_LIMIT",
            Self::PaginationStalled { .. } => "PAGINATION_STALLED",
            Self::Config { .. } => "CONFIG",
        }
    }
}

impl From<reqwest::Error> for NotionError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(Box::new(error))
    }
}

/// Failure to decode one block's `properties` or `format` document.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("block '{block_id}': malformed '{property}' property: {source} (raw: {raw})")]
    Property {
        block_id: String,
        property: String,
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("block '{block_id}': malformed {block_type} format: {source} (raw: {raw})")]
    Format {
        block_id: String,
        block_type: String,
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl NormalizeError {
    pub fn block_id(&self) -> &str {
        match self {
            Self::Property { block_id, .. } | Self::Format { block_id, .. } => block_id,
        }
    }
}
