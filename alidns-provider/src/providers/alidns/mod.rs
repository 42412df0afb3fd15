//! 阿里云 DNS (AliDNS) client

mod error;
mod http;
mod sign;
mod types;

use std::sync::Arc;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::providers::common::create_http_client;
use crate::traits::{ApiConnector, DomainRecordApi};
use crate::utils::log_sanitizer::mask_key;

pub(crate) use types::{
    AddDomainRecordRequest, AddDomainRecordResponse, DeleteDomainRecordRequest,
    DescribeDomainRecordsRequest, DescribeDomainRecordsResponse, MutationResponse,
    UpdateDomainRecordRequest, serialize_to_query_string,
};

/// Provider identifier used in errors and logs.
pub(crate) const PROVIDER_NAME: &str = "alidns";
/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "cn-hangzhou";
pub(crate) const ALIDNS_VERSION: &str = "2015-01-09";
/// 空 body 的 SHA256 hash (固定值)
pub(crate) const EMPTY_BODY_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Regional AliDNS API host, e.g. `alidns.cn-hangzhou.aliyuncs.com`.
pub(crate) fn regional_host(region_id: &str) -> String {
    format!("alidns.{region_id}.aliyuncs.com")
}

/// Authenticated AliDNS RPC client.
///
/// Requests are signed with ACS3-HMAC-SHA256 using the access key pair the
/// client was built with. One client is created per provider session.
pub struct AlidnsClient {
    pub(crate) client: Client,
    /// Base URL requests are posted to (scheme + host, no trailing slash).
    pub(crate) base_url: String,
    /// Value of the signed `host` header.
    pub(crate) host: String,
    pub(crate) access_key_id: String,
    pub(crate) access_key_secret: String,
}

impl AlidnsClient {
    /// Builds a client for the regional endpoint of `region_id`.
    pub fn new(region_id: &str, access_key_id: &str, access_key_secret: &str) -> Result<Self> {
        let host = regional_host(region_id);
        Self::build(
            format!("https://{host}"),
            host,
            access_key_id,
            access_key_secret,
        )
    }

    fn build(
        base_url: String,
        host: String,
        access_key_id: &str,
        access_key_secret: &str,
    ) -> Result<Self> {
        if access_key_id.trim().is_empty() {
            return Err(ProviderError::ClientConstruction {
                provider: PROVIDER_NAME.to_string(),
                detail: "access key id is empty".to_string(),
            });
        }
        if access_key_secret.trim().is_empty() {
            return Err(ProviderError::ClientConstruction {
                provider: PROVIDER_NAME.to_string(),
                detail: "access key secret is empty".to_string(),
            });
        }

        Ok(Self {
            client: create_http_client(PROVIDER_NAME)?,
            base_url,
            host,
            access_key_id: access_key_id.to_string(),
            access_key_secret: access_key_secret.to_string(),
        })
    }
}

/// Default [`ApiConnector`]: builds [`AlidnsClient`]s over HTTPS.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    endpoint: Option<String>,
}

impl HttpConnector {
    /// Connector for the regional endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Send requests to `base_url` (e.g. `http://127.0.0.1:8080`) instead of
    /// the regional endpoint.
    #[must_use]
    pub fn endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.endpoint = Some(base_url.into());
        self
    }
}

impl ApiConnector for HttpConnector {
    fn connect(
        &self,
        region_id: &str,
        access_key_id: &str,
        access_key_secret: &str,
    ) -> Result<Arc<dyn DomainRecordApi>> {
        let (base_url, host) = match &self.endpoint {
            Some(endpoint) => {
                let base_url = endpoint.trim_end_matches('/').to_string();
                let host = base_url
                    .split_once("://")
                    .map_or(base_url.as_str(), |(_, rest)| rest)
                    .to_string();
                (base_url, host)
            }
            None => {
                let host = regional_host(region_id);
                (format!("https://{host}"), host)
            }
        };

        log::debug!(
            "[{PROVIDER_NAME}] Connecting to {base_url} as {}",
            mask_key(access_key_id)
        );

        let client =
            AlidnsClient::build(base_url, host, access_key_id, access_key_secret)?;
        Ok(Arc::new(client))
    }
}
