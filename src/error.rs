//! Defines the errors that record conversion can produce. Handler
//! errors are not part of this taxonomy: whatever a handler raises is
//! passed through to the invoking runtime unmodified.

use thiserror::Error;

/// An error raised while turning a provider event record into a
/// handler input, or while configuring an adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A record body or a fetched object was not valid JSON.
    #[error("failed to parse record content as JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// An object could not be read from storage.
    #[error("failed to fetch object {key:?} from bucket {bucket:?}")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A capability required by the chosen conversion strategy was
    /// not supplied. Raised at construction time, before any event is
    /// processed.
    #[error("adapter configuration is missing {0}")]
    Configuration(&'static str),

    /// A record lacked a field the conversion needs (a message body,
    /// a bucket name, an object key).
    #[error("event record is missing {0}")]
    MalformedRecord(&'static str),
}
