//! # alidns-provider
//!
//! DNS record management for [Alibaba Cloud DNS](https://www.aliyun.com/product/dns)
//! (AliDNS), shaped for ACME DNS-01 automation and other record-level tooling.
//!
//! The provider exposes four capabilities as separate traits:
//!
//! | Trait | Vendor action |
//! |-------|---------------|
//! | [`RecordGetter`] | `DescribeDomainRecords` (all pages) |
//! | [`RecordAppender`] | `AddDomainRecord` |
//! | [`RecordSetter`] | `UpdateDomainRecord` |
//! | [`RecordDeleter`] | `DeleteDomainRecord` |
//!
//! Requests are signed with ACS3-HMAC-SHA256 and sent to the regional endpoint
//! `alidns.{region}.aliyuncs.com` (`cn-hangzhou` unless configured otherwise).
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use alidns_provider::{
//!     AlidnsProvider, ProviderConfig, Record, RecordAppender, RecordDeleter, RecordGetter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::new("your-access-key-id", "your-access-key-secret")
//!         .with_region("cn-shanghai");
//!     let provider = AlidnsProvider::new(config);
//!
//!     // Names may be relative, fully qualified, or carry a trailing dot
//!     let created = provider
//!         .append_records(
//!             "example.com",
//!             vec![Record::new(
//!                 "TXT",
//!                 "_acme-challenge.example.com.",
//!                 "token",
//!                 Duration::from_secs(600),
//!             )],
//!         )
//!         .await?;
//!
//!     for record in provider.get_records("example.com").await? {
//!         println!("{} {} {} ({})", record.name, record.record_type, record.value, record.id);
//!     }
//!
//!     provider.delete_records("example.com", created).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Single-shot operations return [`Result<T, ProviderError>`](ProviderError).
//! Batch operations stop at the first failing record and return a
//! [`BatchFailure`] carrying the records already applied along with the error:
//!
//! - [`ProviderError::Operation`] — the failing action with its zone, name and record ID
//! - [`ProviderError::InvalidCredentials`] — authentication failed
//! - [`ProviderError::RecordNotFound`] — DNS record not found
//! - [`ProviderError::ClientConstruction`] — the session client could not be built
//!
//! Each remote call is sent once; its failure is returned as-is.

mod error;
mod http_client;
mod provider;
mod providers;
mod session;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{BatchFailure, BatchResult, ProviderError, RecordAction, Result};

// Re-export the provider and its builder
pub use provider::{AlidnsProvider, AlidnsProviderBuilder};

// Re-export traits
pub use traits::{
    ApiConnector, DomainRecordApi, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
};

// Re-export types
pub use types::{ProviderConfig, Record, RecordFields, RecordPage, RecordType, RemoteRecord};

// Re-export the HTTP client
pub use providers::alidns::{AlidnsClient, DEFAULT_REGION, HttpConnector};

// Re-export utils module
pub use utils::names;
