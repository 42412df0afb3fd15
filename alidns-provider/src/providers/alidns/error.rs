//! 阿里云错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{AlidnsClient, PROVIDER_NAME};

/// 阿里云错误码映射
/// 参考: <https://api.aliyun.com/document/Alidns/2015-01-09/errorCode>
impl ProviderErrorMapper for AlidnsClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        let invalid = |param: &str, raw: RawApiError| ProviderError::InvalidParameter {
            provider: self.provider_name().to_string(),
            param: param.to_string(),
            detail: raw.message,
        };

        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(
                "InvalidAccessKeyId.NotFound"
                | "InvalidAccessKeyId.Inactive"
                | "SignatureDoesNotMatch"
                | "IncompleteSignature",
            ) => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 记录已存在 ============
            Some("DomainRecordDuplicate" | "DomainRecordConflict") => ProviderError::RecordExists {
                provider,
                record_name: context.record_name.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ 记录不存在 ============
            Some(
                "DomainRecordNotBelongToUser"
                | "InvalidRecordId.NotFound"
                | "InvalidRR.NoExist"
                | "MissingRecordId",
            ) => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ 域名不存在 ============
            Some("InvalidDomainName.NoExist" | "DomainNotFound" | "IncorrectDomainUser") => {
                ProviderError::DomainNotFound {
                    provider,
                    domain: context.domain.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 配额限制 ============
            Some(
                "QuotaExceeded.ARecord"
                | "QuotaExceeded.Record"
                | "QuotaExceeded.FreeDnsRecord"
                | "QuotaExceeded.SubDomain"
                | "QuotaExceeded.TTL",
            ) => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 频率限流 ============
            Some("Throttling" | "Throttling.User" | "Throttling.Api") => {
                ProviderError::RateLimited {
                    provider,
                    retry_after: None,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 域名被锁定/禁用 ============
            Some("DomainRecordLocked" | "DomainExpiredDNSForbidden" | "Forbidden.DomainExpired") => {
                ProviderError::DomainLocked {
                    provider,
                    domain: context.domain.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 权限/操作被拒绝 ============
            Some(
                "Forbidden"
                | "Forbidden.RAM"
                | "Forbidden.RiskControl"
                | "OperationDomain.NoPermission"
                | "IllegalUser",
            ) => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 参数无效 ============
            Some("InvalidRR.TypeEmpty" | "SubDomainInvalid.Type") => invalid("type", raw),
            Some(
                "InvalidRR.AValue"
                | "InvalidRR.AAAAValue"
                | "InvalidRR.MXValue"
                | "InvalidRR.NSValue"
                | "InvalidRR.CNAMEValue"
                | "SubDomainInvalid.Value",
            ) => invalid("value", raw),
            Some("InvalidRR.RrEmpty" | "InvalidRR.Format" | "InvalidRR.Length") => {
                invalid("rr", raw)
            }
            Some("SubDomainInvalid.TTL" | "InvalidTTL") => invalid("ttl", raw),
            Some("SubDomainInvalid.Priority") => invalid("priority", raw),
            Some(
                "InvalidDomainName.Format" | "InvalidDomainName.Length" | "DomainEmpty",
            ) => invalid("domain", raw),

            // ============ 其他错误 fallback ============
            _ => self.unknown_error(raw),
        }
    }
}
