use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::providers::alidns::DEFAULT_REGION;

// ============ Record Types ============

/// DNS record type.
///
/// The kinds AliDNS enumerates get their own variant; anything else is kept
/// verbatim in [`Other`](Self::Other) and forwarded to the vendor untouched.
/// Parsing is exact: `"txt"` is `Other("txt")`, not [`Txt`](Self::Txt).
///
/// Serialized as its plain string form (e.g. `"AAAA"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certification Authority Authorization record.
    Caa,
    /// Any other type string, passed through unchanged.
    Other(String),
}

impl RecordType {
    /// Returns the wire form of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        match value {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "SRV" => Self::Srv,
            "CAA" => Self::Caa,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl FromStr for RecordType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

// ============ Record ============

/// A DNS resource record as seen by calling automation tools.
///
/// `name` may be fully qualified (with or without a trailing dot) or already
/// relative to the zone. `id` stays empty until a create operation assigns
/// one; update and delete are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Vendor-assigned record ID (empty until created).
    #[serde(default)]
    pub id: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Record name.
    pub name: String,
    /// Record data.
    pub value: String,
    /// Time to live. Whole seconds are sent to the vendor.
    pub ttl: Duration,
    /// MX/SRV priority, forwarded when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl Record {
    /// Creates a record without an ID.
    pub fn new(
        record_type: impl Into<RecordType>,
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: String::new(),
            record_type: record_type.into(),
            name: name.into(),
            value: value.into(),
            ttl,
            priority: None,
        }
    }

    /// Sets the vendor record ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the MX/SRV priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// TTL in whole seconds, saturating at `u32::MAX`.
    pub fn ttl_secs(&self) -> u32 {
        u32::try_from(self.ttl.as_secs()).unwrap_or(u32::MAX)
    }
}

// ============ Configuration ============

/// Credentials and region for an [`AlidnsProvider`](crate::AlidnsProvider).
///
/// Deserializes from the same keys other libdns-style tooling uses:
///
/// ```json
/// { "accesskey_id": "LTAI...", "accesskey_secret": "...", "region_id": "cn-shanghai" }
/// ```
///
/// `region_id` is optional; an absent or empty value means
/// [`DEFAULT_REGION`](crate::DEFAULT_REGION).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// RAM access key ID.
    #[serde(rename = "accesskey_id")]
    pub access_key_id: String,
    /// RAM access key secret.
    #[serde(rename = "accesskey_secret")]
    pub access_key_secret: String,
    /// Region the API endpoint is chosen from.
    #[serde(rename = "region_id", default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
}

impl ProviderConfig {
    /// Creates a configuration using the default region.
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
            region_id: None,
        }
    }

    /// Sets the region.
    #[must_use]
    pub fn with_region(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = Some(region_id.into());
        self
    }

    /// The configured region, or [`DEFAULT_REGION`] when unset or empty.
    pub fn region_or_default(&self) -> &str {
        self.region_id
            .as_deref()
            .filter(|region| !region.is_empty())
            .unwrap_or(DEFAULT_REGION)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"***")
            .field("region_id", &self.region_id)
            .finish()
    }
}

// ============ Remote API Shapes ============

/// Fields sent with `AddDomainRecord` / `UpdateDomainRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    /// Relative record name (`@` for the apex).
    pub rr: String,
    /// Record type string.
    pub record_type: String,
    /// Record value.
    pub value: String,
    /// TTL in seconds, omitted to let the vendor apply its default.
    pub ttl: Option<u32>,
    /// MX/SRV priority.
    pub priority: Option<u16>,
}

/// A record as returned by `DescribeDomainRecords`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    /// Vendor record ID.
    pub record_id: String,
    /// Relative record name.
    pub rr: String,
    /// Domain name as echoed by the vendor.
    pub domain_name: String,
    /// Record type string.
    pub record_type: String,
    /// Record value.
    pub value: String,
    /// TTL in seconds.
    pub ttl: u32,
    /// MX/SRV priority.
    pub priority: Option<u16>,
}

/// One page of a `DescribeDomainRecords` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPage {
    /// Records on this page, in vendor order.
    pub records: Vec<RemoteRecord>,
    /// Page number reported by the vendor (1-indexed).
    pub page_number: u32,
    /// Page size reported by the vendor.
    pub page_size: u32,
    /// Total number of records in the zone.
    pub total_count: u32,
}

impl RecordPage {
    /// Whether this page reaches the vendor-reported total.
    ///
    /// An empty page also ends the sweep, otherwise a zero page size would
    /// never terminate.
    pub fn is_last(&self) -> bool {
        self.records.is_empty()
            || u64::from(self.page_number) * u64::from(self.page_size)
                >= u64::from(self.total_count)
    }
}
