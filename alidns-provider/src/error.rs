use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Record;

/// The remote call an [`ProviderError::Operation`] failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordAction {
    /// Paginated `DescribeDomainRecords` sweep.
    List,
    /// `AddDomainRecord`.
    Add,
    /// `UpdateDomainRecord`.
    Update,
    /// `DeleteDomainRecord`.
    Delete,
}

impl fmt::Display for RecordAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "Get records"),
            Self::Add => write!(f, "Add record"),
            Self::Update => write!(f, "Update record"),
            Self::Delete => write!(f, "Delete record"),
        }
    }
}

/// Unified error type for all provider operations.
///
/// Each vendor-level variant carries a `provider` field identifying the
/// producer, plus variant-specific context. Failures of individual remote
/// calls made by the record operations are wrapped in
/// [`Operation`](Self::Operation), which adds the zone, relative record name
/// and record ID the call was made with.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The session client could not be constructed (missing or malformed
    /// credentials, HTTP client setup failure).
    #[error("[{provider}] Client construction failed: {detail}")]
    ClientConstruction {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    #[error("[{provider}] Network error: {detail}")]
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("[{provider}] Request timeout: {detail}")]
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429 or `Throttling`).
    #[error("[{provider}] Rate limited{}", retry_suffix(.retry_after.as_ref()))]
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The provided credentials are invalid or expired.
    #[error("[{provider}] Invalid credentials{}", message_suffix(.raw_message.as_deref()))]
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A DNS record with the same name/type/value already exists.
    #[error("[{provider}] Record '{record_name}' already exists")]
    RecordExists {
        /// Provider that produced the error.
        provider: String,
        /// Relative name of the conflicting record.
        record_name: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The specified DNS record was not found.
    #[error("[{provider}] Record '{record_id}' not found")]
    RecordNotFound {
        /// Provider that produced the error.
        provider: String,
        /// ID of the record that was not found.
        record_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The zone does not exist in the account.
    #[error("[{provider}] Domain '{domain}' not found{}", message_suffix(.raw_message.as_deref()))]
    DomainNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone that was not found.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The zone is locked or disabled and cannot be modified.
    #[error("[{provider}] Domain '{domain}' is locked{}", message_suffix(.raw_message.as_deref()))]
    DomainLocked {
        /// Provider that produced the error.
        provider: String,
        /// Zone that is locked.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The account's record quota has been exceeded.
    #[error("[{provider}] Quota exceeded")]
    QuotaExceeded {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The access key lacks permission for the requested operation.
    #[error("[{provider}] Permission denied{}", message_suffix(.raw_message.as_deref()))]
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The vendor rejected a request parameter (bad RR, value, TTL, ...).
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the provider's API response.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to encode a request.
    #[error("[{provider}] Serialization error: {detail}")]
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    #[error("[{provider}] {raw_message}")]
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },

    /// A remote call made on behalf of a record operation failed.
    #[error("{action} error. {}: {source}", operation_context(.zone, .name, .record_id))]
    Operation {
        /// Which remote call failed.
        action: RecordAction,
        /// Zone passed by the caller.
        zone: String,
        /// Relative record name sent to the vendor (empty when not applicable).
        name: String,
        /// Record ID sent to the vendor (empty when not applicable).
        record_id: String,
        /// Underlying failure.
        source: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Wraps `source` with the context of the remote call it came from.
    pub(crate) fn operation(
        action: RecordAction,
        zone: &str,
        name: &str,
        record_id: &str,
        source: Self,
    ) -> Self {
        Self::Operation {
            action,
            zone: zone.to_string(),
            name: name.to_string(),
            record_id: record_id.to_string(),
            source: Box::new(source),
        }
    }

    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Operation { source, .. } => source.is_expected(),
            Self::InvalidCredentials { .. }
            | Self::RecordExists { .. }
            | Self::RecordNotFound { .. }
            | Self::DomainNotFound { .. }
            | Self::DomainLocked { .. }
            | Self::QuotaExceeded { .. }
            | Self::PermissionDenied { .. }
            | Self::InvalidParameter { .. } => true,
            _ => false,
        }
    }

    /// Strips any [`Operation`](Self::Operation) wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

fn message_suffix(raw_message: Option<&str>) -> String {
    raw_message
        .map(|msg| format!(": {msg}"))
        .unwrap_or_default()
}

fn retry_suffix(retry_after: Option<&u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}

fn operation_context(zone: &str, name: &str, record_id: &str) -> String {
    let mut parts = Vec::with_capacity(3);
    if !zone.is_empty() {
        parts.push(format!("Zone: {zone}"));
    }
    if !name.is_empty() {
        parts.push(format!("Name: {name}"));
    }
    if !record_id.is_empty() {
        parts.push(format!("RecordId: {record_id}"));
    }
    parts.join(", ")
}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// A batch operation stopped at its first failing record.
///
/// Records before the failing one were already applied remotely and are
/// returned in `completed`, in input order. Nothing is rolled back, and the
/// records after the failing one were never sent.
#[derive(Debug, Clone, Error)]
#[error("{error} ({} record(s) applied before the failure)", .completed.len())]
pub struct BatchFailure {
    /// Records successfully processed before the failure.
    pub completed: Vec<Record>,
    /// The first error encountered.
    #[source]
    pub error: ProviderError,
}

impl BatchFailure {
    pub(crate) const fn new(completed: Vec<Record>, error: ProviderError) -> Self {
        Self { completed, error }
    }

    /// Drops the completed records and keeps the error.
    #[must_use]
    pub fn into_error(self) -> ProviderError {
        self.error
    }
}

/// Result of a batch operation: every record on success, or the completed
/// prefix plus the first error.
pub type BatchResult = std::result::Result<Vec<Record>, BatchFailure>;
