//! 阿里云 API 类型定义和辅助函数

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::types::{RecordFields, RecordPage, RemoteRecord};

use super::PROVIDER_NAME;

// ============ Query String ============

/// 将请求结构体序列化为排序后的 RFC3986 query string
///
/// RPC-style actions take flat parameters only; `None` fields are omitted.
pub fn serialize_to_query_string<T: Serialize>(params: &T) -> Result<String> {
    let serialization_error = |detail: String| ProviderError::SerializationError {
        provider: PROVIDER_NAME.to_string(),
        detail,
    };

    let value = serde_json::to_value(params).map_err(|e| serialization_error(e.to_string()))?;
    let serde_json::Value::Object(map) = value else {
        return Err(serialization_error(
            "request parameters must serialize to an object".to_string(),
        ));
    };

    let mut sorted = BTreeMap::new();
    for (key, value) in map {
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            other => {
                return Err(serialization_error(format!(
                    "parameter '{key}' is not a scalar: {other}"
                )));
            }
        };
        sorted.insert(key, text);
    }

    Ok(sorted
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&"))
}

// ============ Requests ============

#[derive(Debug, Serialize)]
pub struct DescribeDomainRecordsRequest<'a> {
    #[serde(rename = "DomainName")]
    pub domain_name: &'a str,
    #[serde(rename = "PageNumber")]
    pub page_number: u32,
    #[serde(rename = "PageSize")]
    pub page_size: u32,
}

#[derive(Debug, Serialize)]
pub struct AddDomainRecordRequest<'a> {
    #[serde(rename = "DomainName")]
    pub domain_name: &'a str,
    #[serde(rename = "RR")]
    pub rr: &'a str,
    #[serde(rename = "Type")]
    pub record_type: &'a str,
    #[serde(rename = "Value")]
    pub value: &'a str,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl<'a> AddDomainRecordRequest<'a> {
    pub fn new(domain_name: &'a str, fields: &'a RecordFields) -> Self {
        Self {
            domain_name,
            rr: &fields.rr,
            record_type: &fields.record_type,
            value: &fields.value,
            ttl: fields.ttl,
            priority: fields.priority,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateDomainRecordRequest<'a> {
    #[serde(rename = "RecordId")]
    pub record_id: &'a str,
    #[serde(rename = "RR")]
    pub rr: &'a str,
    #[serde(rename = "Type")]
    pub record_type: &'a str,
    #[serde(rename = "Value")]
    pub value: &'a str,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl<'a> UpdateDomainRecordRequest<'a> {
    pub fn new(record_id: &'a str, fields: &'a RecordFields) -> Self {
        Self {
            record_id,
            rr: &fields.rr,
            record_type: &fields.record_type,
            value: &fields.value,
            ttl: fields.ttl,
            priority: fields.priority,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteDomainRecordRequest<'a> {
    #[serde(rename = "RecordId")]
    pub record_id: &'a str,
}

// ============ Responses ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDomainRecordsResponse {
    pub domain_records: Option<DomainRecordsWrapper>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub total_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainRecordsWrapper {
    pub record: Option<Vec<AlidnsRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlidnsRecord {
    pub record_id: String,
    #[serde(rename = "RR")]
    pub rr: String,
    pub domain_name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    pub priority: Option<u16>,
}

impl From<AlidnsRecord> for RemoteRecord {
    fn from(r: AlidnsRecord) -> Self {
        Self {
            record_id: r.record_id,
            rr: r.rr,
            domain_name: r.domain_name,
            record_type: r.record_type,
            value: r.value,
            ttl: r.ttl,
            priority: r.priority,
        }
    }
}

impl DescribeDomainRecordsResponse {
    /// Converts to a [`RecordPage`], falling back to the requested paging
    /// values when the vendor omits them.
    pub fn into_page(self, requested_page: u32, requested_size: u32) -> RecordPage {
        let records: Vec<RemoteRecord> = self
            .domain_records
            .and_then(|r| r.record)
            .unwrap_or_default()
            .into_iter()
            .map(RemoteRecord::from)
            .collect();

        RecordPage {
            page_number: self.page_number.unwrap_or(requested_page),
            page_size: self.page_size.unwrap_or(requested_size),
            total_count: self
                .total_count
                .unwrap_or_else(|| u32::try_from(records.len()).unwrap_or(u32::MAX)),
            records,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddDomainRecordResponse {
    pub record_id: String,
}

/// Body of `UpdateDomainRecord` / `DeleteDomainRecord` responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MutationResponse {
    pub record_id: Option<String>,
}
