//! HTTP transport helpers
//!
//! Sending, status classification and response logging for the vendor
//! client. Request construction and signing stay with the caller, which hands
//! over a ready `RequestBuilder`.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends one request and returns `(status, body)`.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`] (honouring `Retry-After`),
    /// 502–504 become [`ProviderError::NetworkError`]; every other status is
    /// returned for the caller to interpret.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] POST {action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] {action} -> HTTP {status_code}");

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Server error (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parses a JSON body, logging a truncated copy on failure.
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!(
                "[{provider_name}] JSON parse failed: {e}; raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_valid_and_invalid() {
        #[derive(serde::Deserialize, Debug)]
        struct Foo {
            x: i32,
        }
        let ok: Result<Foo, ProviderError> = HttpUtils::parse_json(r#"{"x":42}"#, "alidns");
        assert!(matches!(&ok, Ok(Foo { x: 42 })), "unexpected parse result: {ok:?}");

        let bad: Result<Foo, ProviderError> = HttpUtils::parse_json("not json", "alidns");
        assert!(
            matches!(&bad, Err(ProviderError::ParseError { .. })),
            "unexpected parse result: {bad:?}"
        );
    }
}
