use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{BatchResult, ProviderError, Result};
use crate::types::{Record, RecordFields, RecordPage};

// ============ Capability Traits ============

/// Lists every record in a zone.
#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// Returns all records of `zone`, in vendor page order.
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>>;
}

/// Creates records in a zone.
#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Creates each record in turn and returns them with their new IDs.
    async fn append_records(&self, zone: &str, records: Vec<Record>) -> BatchResult;
}

/// Updates existing records in a zone.
#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Updates each record in turn, keyed by its `id`.
    async fn set_records(&self, zone: &str, records: Vec<Record>) -> BatchResult;
}

/// Deletes records from a zone.
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Deletes each record in turn, keyed by its `id`.
    async fn delete_records(&self, zone: &str, records: Vec<Record>) -> BatchResult;
}

// ============ Remote API ============

/// The AliDNS calls a session client must provide.
///
/// [`AlidnsClient`](crate::AlidnsClient) implements this over HTTPS; tests and
/// embedders may substitute their own implementation through an
/// [`ApiConnector`].
#[async_trait]
pub trait DomainRecordApi: Send + Sync {
    /// `AddDomainRecord`: returns the new record ID.
    async fn add_domain_record(&self, domain: &str, fields: &RecordFields) -> Result<String>;

    /// `UpdateDomainRecord`.
    async fn update_domain_record(&self, record_id: &str, fields: &RecordFields) -> Result<()>;

    /// `DeleteDomainRecord`.
    async fn delete_domain_record(&self, record_id: &str) -> Result<()>;

    /// `DescribeDomainRecords`: one page of the zone's records.
    async fn describe_domain_records(
        &self,
        domain: &str,
        page_number: u32,
        page_size: u32,
    ) -> Result<RecordPage>;
}

/// Builds authenticated session clients.
pub trait ApiConnector: Send + Sync {
    /// Constructs a client for `region_id` with the given access key.
    ///
    /// Failures should be reported as [`ProviderError::ClientConstruction`].
    fn connect(
        &self,
        region_id: &str,
        access_key_id: &str,
        access_key_secret: &str,
    ) -> Result<Arc<dyn DomainRecordApi>>;
}

// ============ Error Mapping ============

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `RecordExists` 等错误）
    pub record_name: Option<String>,
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// 域名（用于 `DomainNotFound` 等错误）
    pub domain: Option<String>,
}

/// 将原始 API 错误映射到统一错误类型（内部使用）
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}
