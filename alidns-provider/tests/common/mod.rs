//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use alidns_provider::{
    AlidnsProvider, ApiConnector, DomainRecordApi, ProviderConfig, ProviderError, RecordFields,
    RecordPage, RemoteRecord, Result,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

// ============ Recording test double ============

/// A remote call seen by [`SpyApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Add { domain: String, fields: RecordFields },
    Update { record_id: String, fields: RecordFields },
    Delete { record_id: String },
    Describe { domain: String, page_number: u32, page_size: u32 },
}

/// In-memory `DomainRecordApi` that records every call.
///
/// Without scripted pages, `describe_domain_records` serves the records
/// created through `add_domain_record` as a single page.
#[derive(Default)]
pub struct SpyApi {
    calls: Mutex<Vec<Call>>,
    zone: Mutex<Vec<RemoteRecord>>,
    pages: Vec<RecordPage>,
    fail_add_at: Option<usize>,
    fail_update_at: Option<usize>,
    fail_delete_at: Option<usize>,
    fail_describe_at: Option<u32>,
    delay: Duration,
    adds: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Decrements the in-flight count when a call ends, including when its
/// future is dropped mid-call.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SpyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these pages, indexed by requested page number.
    pub fn with_pages(mut self, pages: Vec<RecordPage>) -> Self {
        self.pages = pages;
        self
    }

    /// Fail the `n`th add call (1-based).
    pub fn fail_add_at(mut self, n: usize) -> Self {
        self.fail_add_at = Some(n);
        self
    }

    /// Fail the `n`th update call (1-based).
    pub fn fail_update_at(mut self, n: usize) -> Self {
        self.fail_update_at = Some(n);
        self
    }

    /// Fail the `n`th delete call (1-based).
    pub fn fail_delete_at(mut self, n: usize) -> Self {
        self.fail_delete_at = Some(n);
        self
    }

    /// Fail the describe call for page `n`.
    pub fn fail_describe_at(mut self, n: u32) -> Self {
        self.fail_describe_at = Some(n);
        self
    }

    /// Hold every call open for `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self, call: Call) -> InFlight<'_> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(call);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        guard
    }
}

fn vendor_error(code: &str) -> ProviderError {
    ProviderError::Unknown {
        provider: "spy".to_string(),
        raw_code: Some(code.to_string()),
        raw_message: format!("{code} injected by test"),
    }
}

/// Bumps `counter` and reports whether this call is the scripted failure.
fn nth_call_fails(counter: &AtomicUsize, fail_at: Option<usize>) -> (usize, bool) {
    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
    (n, fail_at == Some(n))
}

#[async_trait]
impl DomainRecordApi for SpyApi {
    async fn add_domain_record(&self, domain: &str, fields: &RecordFields) -> Result<String> {
        let _guard = self
            .enter(Call::Add {
                domain: domain.to_string(),
                fields: fields.clone(),
            })
            .await;
        let (n, fails) = nth_call_fails(&self.adds, self.fail_add_at);
        if fails {
            return Err(vendor_error("InternalError"));
        }
        let record_id = format!("rec-{n}");
        self.zone.lock().unwrap().push(RemoteRecord {
            record_id: record_id.clone(),
            rr: fields.rr.clone(),
            domain_name: domain.to_string(),
            record_type: fields.record_type.clone(),
            value: fields.value.clone(),
            ttl: fields.ttl.unwrap_or(600),
            priority: fields.priority,
        });
        Ok(record_id)
    }

    async fn update_domain_record(&self, record_id: &str, fields: &RecordFields) -> Result<()> {
        let _guard = self
            .enter(Call::Update {
                record_id: record_id.to_string(),
                fields: fields.clone(),
            })
            .await;
        let (_, fails) = nth_call_fails(&self.updates, self.fail_update_at);
        if record_id.is_empty() {
            return Err(vendor_error("MissingRecordId"));
        }
        if fails {
            return Err(vendor_error("InternalError"));
        }
        Ok(())
    }

    async fn delete_domain_record(&self, record_id: &str) -> Result<()> {
        let _guard = self
            .enter(Call::Delete {
                record_id: record_id.to_string(),
            })
            .await;
        let (_, fails) = nth_call_fails(&self.deletes, self.fail_delete_at);
        if fails {
            return Err(vendor_error("InternalError"));
        }
        self.zone
            .lock()
            .unwrap()
            .retain(|r| r.record_id != record_id);
        Ok(())
    }

    async fn describe_domain_records(
        &self,
        domain: &str,
        page_number: u32,
        page_size: u32,
    ) -> Result<RecordPage> {
        let _guard = self
            .enter(Call::Describe {
                domain: domain.to_string(),
                page_number,
                page_size,
            })
            .await;
        if self.fail_describe_at == Some(page_number) {
            return Err(vendor_error("InternalError"));
        }
        if self.pages.is_empty() {
            let records = self.zone.lock().unwrap().clone();
            return Ok(RecordPage {
                total_count: u32::try_from(records.len()).unwrap(),
                records,
                page_number,
                page_size,
            });
        }
        Ok(self
            .pages
            .get(page_number as usize - 1)
            .cloned()
            .unwrap_or_default())
    }
}

/// Hands out one shared [`SpyApi`] and counts how often it is asked to.
pub struct CountingConnector {
    api: Arc<SpyApi>,
    connects: AtomicUsize,
    failures_left: AtomicUsize,
    regions: Mutex<Vec<String>>,
}

impl CountingConnector {
    pub fn new(api: Arc<SpyApi>) -> Self {
        Self {
            api,
            connects: AtomicUsize::new(0),
            failures_left: AtomicUsize::new(0),
            regions: Mutex::new(Vec::new()),
        }
    }

    /// Fail the first `n` connects with `ClientConstruction`.
    pub fn failing_first(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn regions(&self) -> Vec<String> {
        self.regions.lock().unwrap().clone()
    }
}

impl ApiConnector for CountingConnector {
    fn connect(
        &self,
        region_id: &str,
        _access_key_id: &str,
        _access_key_secret: &str,
    ) -> Result<Arc<dyn DomainRecordApi>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.regions.lock().unwrap().push(region_id.to_string());
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ProviderError::ClientConstruction {
                provider: "spy".to_string(),
                detail: "connector refused".to_string(),
            });
        }
        Ok(self.api.clone())
    }
}

/// Test fixture: a provider wired to a spy.
pub struct SpyContext {
    pub provider: AlidnsProvider,
    pub api: Arc<SpyApi>,
    pub connector: Arc<CountingConnector>,
}

impl SpyContext {
    pub fn new(api: SpyApi) -> Self {
        Self::with_connector(api, CountingConnector::new, ProviderConfig::new("id", "secret"))
    }

    pub fn with_connector(
        api: SpyApi,
        connector: impl FnOnce(Arc<SpyApi>) -> CountingConnector,
        config: ProviderConfig,
    ) -> Self {
        let api = Arc::new(api);
        let connector = Arc::new(connector(api.clone()));
        let provider = AlidnsProvider::builder(config)
            .connector(connector.clone())
            .build();
        Self {
            provider,
            api,
            connector,
        }
    }
}

/// One vendor record in `example.com`.
pub fn remote_record(id: &str, rr: &str) -> RemoteRecord {
    RemoteRecord {
        record_id: id.to_string(),
        rr: rr.to_string(),
        domain_name: "example.com".to_string(),
        record_type: "A".to_string(),
        value: "192.0.2.1".to_string(),
        ttl: 600,
        priority: None,
    }
}

pub fn page(records: Vec<RemoteRecord>, page_number: u32, page_size: u32, total: u32) -> RecordPage {
    RecordPage {
        records,
        page_number,
        page_size,
        total_count: total,
    }
}

// ============ Live context ============

/// 测试上下文 - 封装 Provider 和测试域名
pub struct LiveContext {
    pub provider: AlidnsProvider,
    pub domain: String,
}

impl LiveContext {
    /// 从环境变量创建 AliDNS 测试上下文
    pub fn from_env() -> Option<Self> {
        let access_key_id = env::var("ALIDNS_ACCESS_KEY_ID").ok()?;
        let access_key_secret = env::var("ALIDNS_ACCESS_KEY_SECRET").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let mut config = ProviderConfig::new(access_key_id, access_key_secret);
        if let Ok(region) = env::var("ALIDNS_REGION_ID") {
            config = config.with_region(region);
        }

        Some(Self {
            provider: AlidnsProvider::new(config),
            domain,
        })
    }
}
