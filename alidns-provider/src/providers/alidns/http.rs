//! Alibaba Cloud RPC requests and the `DomainRecordApi` implementation

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{DomainRecordApi, ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::{RecordFields, RecordPage};

use super::{
    ALIDNS_VERSION, AddDomainRecordRequest, AddDomainRecordResponse, AlidnsClient,
    DeleteDomainRecordRequest, DescribeDomainRecordsRequest, DescribeDomainRecordsResponse,
    EMPTY_BODY_SHA256, MutationResponse, UpdateDomainRecordRequest, serialize_to_query_string,
};

impl AlidnsClient {
    /// Execute an Alibaba Cloud API request (RPC style: parameters in the query string)
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        params: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let query_string = serialize_to_query_string(params)?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();

        let authorization = self.sign(action, &query_string, &timestamp, &nonce)?;

        let url = if query_string.is_empty() {
            format!("{}/", self.base_url)
        } else {
            format!("{}/?{query_string}", self.base_url)
        };

        let request = self
            .client
            .post(&url)
            .header("Host", &self.host)
            .header("x-acs-action", action)
            .header("x-acs-version", ALIDNS_VERSION)
            .header("x-acs-date", &timestamp)
            .header("x-acs-signature-nonce", &nonce)
            .header("x-acs-content-sha256", EMPTY_BODY_SHA256)
            .header("Authorization", authorization);

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), action).await?;

        // Errors come back as {"Code": ..., "Message": ...}, usually with a 4xx/5xx status
        let value: serde_json::Value = match serde_json::from_str(&response_text) {
            Ok(value) => value,
            Err(_) if status >= 400 => {
                return Err(ProviderError::NetworkError {
                    provider: self.provider_name().to_string(),
                    detail: format!("HTTP {status}: {response_text}"),
                });
            }
            Err(_) => HttpUtils::parse_json(&response_text, self.provider_name())?,
        };

        if let (Some(code), Some(message)) = (
            value.get("Code").and_then(|v| v.as_str()),
            value.get("Message").and_then(|v| v.as_str()),
        ) {
            let error = self.map_error(RawApiError::with_code(code, message), ctx);
            if error.is_expected() {
                log::warn!("[{}] {action} rejected: {code} - {message}", self.provider_name());
            } else {
                log::error!("[{}] {action} failed: {code} - {message}", self.provider_name());
            }
            return Err(error);
        }

        if status >= 400 {
            return Err(ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("HTTP {status}: {response_text}"),
            });
        }

        serde_json::from_value(value).map_err(|e| ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl DomainRecordApi for AlidnsClient {
    async fn add_domain_record(&self, domain: &str, fields: &RecordFields) -> Result<String> {
        let ctx = ErrorContext {
            record_name: Some(fields.rr.clone()),
            domain: Some(domain.to_string()),
            ..ErrorContext::default()
        };
        let response: AddDomainRecordResponse = self
            .request(
                "AddDomainRecord",
                &AddDomainRecordRequest::new(domain, fields),
                ctx,
            )
            .await?;

        log::debug!(
            "[{}] Added {} record '{}' in {domain}: {}",
            self.provider_name(),
            fields.record_type,
            fields.rr,
            response.record_id
        );
        Ok(response.record_id)
    }

    async fn update_domain_record(&self, record_id: &str, fields: &RecordFields) -> Result<()> {
        let ctx = ErrorContext {
            record_name: Some(fields.rr.clone()),
            record_id: Some(record_id.to_string()),
            ..ErrorContext::default()
        };
        let response: MutationResponse = self
            .request(
                "UpdateDomainRecord",
                &UpdateDomainRecordRequest::new(record_id, fields),
                ctx,
            )
            .await?;

        log::debug!(
            "[{}] Updated record {}",
            self.provider_name(),
            response.record_id.as_deref().unwrap_or(record_id)
        );
        Ok(())
    }

    async fn delete_domain_record(&self, record_id: &str) -> Result<()> {
        let ctx = ErrorContext {
            record_id: Some(record_id.to_string()),
            ..ErrorContext::default()
        };
        let response: MutationResponse = self
            .request(
                "DeleteDomainRecord",
                &DeleteDomainRecordRequest { record_id },
                ctx,
            )
            .await?;

        log::debug!(
            "[{}] Deleted record {}",
            self.provider_name(),
            response.record_id.as_deref().unwrap_or(record_id)
        );
        Ok(())
    }

    async fn describe_domain_records(
        &self,
        domain: &str,
        page_number: u32,
        page_size: u32,
    ) -> Result<RecordPage> {
        let ctx = ErrorContext {
            domain: Some(domain.to_string()),
            ..ErrorContext::default()
        };
        let req = DescribeDomainRecordsRequest {
            domain_name: domain,
            page_number,
            page_size,
        };
        let response: DescribeDomainRecordsResponse =
            self.request("DescribeDomainRecords", &req, ctx).await?;

        Ok(response.into_page(page_number, page_size))
    }
}
