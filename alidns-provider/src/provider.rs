//! AliDNS record provider

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{BatchFailure, BatchResult, ProviderError, RecordAction, Result};
use crate::providers::alidns::HttpConnector;
use crate::session::SessionManager;
use crate::traits::{ApiConnector, RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
use crate::types::{ProviderConfig, Record, RecordFields, RemoteRecord};
use crate::utils::names::{absolute_name, relative_name, to_vendor_rr};

/// Page size requested from `DescribeDomainRecords`.
pub(crate) const LIST_PAGE_SIZE: u32 = 100;

/// Alibaba Cloud DNS provider.
///
/// Implements [`RecordGetter`], [`RecordAppender`], [`RecordSetter`] and
/// [`RecordDeleter`]. The session client is created on first use and reused
/// for the lifetime of the provider.
///
/// Every remote call goes through one exclusive lock: a listing holds it for
/// the whole paginated sweep, batch operations take it once per record. At
/// most one request per provider is in flight at any time.
///
/// # Construction
///
/// ```rust,no_run
/// use alidns_provider::{AlidnsProvider, ProviderConfig};
///
/// let provider = AlidnsProvider::new(ProviderConfig::new(
///     "your-access-key-id",
///     "your-access-key-secret",
/// ));
/// ```
pub struct AlidnsProvider {
    sessions: SessionManager,
}

/// Builder for [`AlidnsProvider`].
pub struct AlidnsProviderBuilder {
    config: ProviderConfig,
    endpoint: Option<String>,
    connector: Option<Arc<dyn ApiConnector>>,
}

impl AlidnsProviderBuilder {
    fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            endpoint: None,
            connector: None,
        }
    }

    /// Send requests to `base_url` instead of the regional endpoint.
    #[must_use]
    pub fn endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.endpoint = Some(base_url.into());
        self
    }

    /// Use a custom [`ApiConnector`] to build the session client.
    ///
    /// Overrides [`endpoint`](Self::endpoint), which only configures the
    /// built-in [`HttpConnector`].
    #[must_use]
    pub fn connector(mut self, connector: Arc<dyn ApiConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Build the [`AlidnsProvider`] instance.
    pub fn build(self) -> AlidnsProvider {
        let connector = self.connector.unwrap_or_else(|| {
            let mut http = HttpConnector::new();
            if let Some(endpoint) = self.endpoint {
                http = http.endpoint(endpoint);
            }
            Arc::new(http)
        });

        AlidnsProvider {
            sessions: SessionManager::new(self.config, connector),
        }
    }
}

impl AlidnsProvider {
    /// Creates a provider talking to the regional AliDNS endpoint.
    pub fn new(config: ProviderConfig) -> Self {
        Self::builder(config).build()
    }

    /// Returns a builder for customizing the provider.
    pub fn builder(config: ProviderConfig) -> AlidnsProviderBuilder {
        AlidnsProviderBuilder::new(config)
    }

    /// Region the session client is (or will be) built for.
    pub fn region_id(&self) -> &str {
        self.sessions.config().region_or_default()
    }

    async fn list_records(&self, zone: &str) -> Result<Vec<Record>> {
        let mut slot = self.sessions.lock().await;
        let session = self.sessions.ensure_session(&mut slot)?;

        let mut remote: Vec<RemoteRecord> = Vec::new();
        let mut page_number = 1;
        loop {
            let page = session
                .client
                .describe_domain_records(zone, page_number, LIST_PAGE_SIZE)
                .await
                .map_err(|e| ProviderError::operation(RecordAction::List, zone, "", "", e))?;

            let last = page.is_last();
            remote.extend(page.records);
            if last {
                break;
            }
            page_number += 1;
        }

        log::debug!(
            "Listed {} records in {zone} ({} pages, region {})",
            remote.len(),
            page_number,
            session.region_id
        );
        Ok(remote.into_iter().map(Record::from).collect())
    }

    async fn add_record(&self, zone: &str, mut record: Record) -> Result<Record> {
        let mut slot = self.sessions.lock().await;
        let session = self.sessions.ensure_session(&mut slot)?;

        let fields = record_fields(zone, &record);
        record.id = session
            .client
            .add_domain_record(zone, &fields)
            .await
            .map_err(|e| ProviderError::operation(RecordAction::Add, zone, &fields.rr, "", e))?;
        Ok(record)
    }

    async fn update_record(&self, zone: &str, record: Record) -> Result<Record> {
        let mut slot = self.sessions.lock().await;
        let session = self.sessions.ensure_session(&mut slot)?;

        let fields = record_fields(zone, &record);
        session
            .client
            .update_domain_record(&record.id, &fields)
            .await
            .map_err(|e| {
                ProviderError::operation(RecordAction::Update, zone, &fields.rr, &record.id, e)
            })?;
        Ok(record)
    }

    async fn delete_record(&self, zone: &str, record: Record) -> Result<Record> {
        let mut slot = self.sessions.lock().await;
        let session = self.sessions.ensure_session(&mut slot)?;

        session
            .client
            .delete_domain_record(&record.id)
            .await
            .map_err(|e| {
                ProviderError::operation(RecordAction::Delete, zone, "", &record.id, e)
            })?;
        Ok(record)
    }
}

/// Applies `op` to each record in order, stopping at the first failure.
async fn for_each_record<F, Fut>(
    action: RecordAction,
    records: Vec<Record>,
    mut op: F,
) -> BatchResult
where
    F: FnMut(Record) -> Fut + Send,
    Fut: Future<Output = Result<Record>> + Send,
{
    let total = records.len();
    let mut done = Vec::with_capacity(total);
    for record in records {
        match op(record).await {
            Ok(record) => done.push(record),
            Err(error) => {
                if error.is_expected() {
                    log::warn!("{action} stopped after {}/{total} records: {error}", done.len());
                } else {
                    log::error!("{action} stopped after {}/{total} records: {error}", done.len());
                }
                return Err(BatchFailure::new(done, error));
            }
        }
    }
    Ok(done)
}

/// Translates a record into the vendor's request fields for `zone`.
fn record_fields(zone: &str, record: &Record) -> RecordFields {
    let relative = relative_name(&record.name, zone);
    RecordFields {
        rr: to_vendor_rr(&relative).to_string(),
        record_type: record.record_type.to_string(),
        value: record.value.clone(),
        ttl: Some(record.ttl_secs()).filter(|ttl| *ttl > 0),
        priority: record.priority,
    }
}

impl From<RemoteRecord> for Record {
    fn from(r: RemoteRecord) -> Self {
        Self {
            name: absolute_name(&r.rr, &r.domain_name),
            id: r.record_id,
            record_type: r.record_type.into(),
            value: r.value,
            ttl: Duration::from_secs(u64::from(r.ttl)),
            priority: r.priority,
        }
    }
}

#[async_trait]
impl RecordGetter for AlidnsProvider {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        self.list_records(zone).await
    }
}

#[async_trait]
impl RecordAppender for AlidnsProvider {
    async fn append_records(&self, zone: &str, records: Vec<Record>) -> BatchResult {
        for_each_record(RecordAction::Add, records, |record| {
            self.add_record(zone, record)
        })
        .await
    }
}

#[async_trait]
impl RecordSetter for AlidnsProvider {
    async fn set_records(&self, zone: &str, records: Vec<Record>) -> BatchResult {
        for_each_record(RecordAction::Update, records, |record| {
            self.update_record(zone, record)
        })
        .await
    }
}

#[async_trait]
impl RecordDeleter for AlidnsProvider {
    async fn delete_records(&self, zone: &str, records: Vec<Record>) -> BatchResult {
        for_each_record(RecordAction::Delete, records, |record| {
            self.delete_record(zone, record)
        })
        .await
    }
}
