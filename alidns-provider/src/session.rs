//! Lazily created, mutex-guarded session client

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::error::Result;
use crate::traits::{ApiConnector, DomainRecordApi};
use crate::types::ProviderConfig;
use crate::utils::log_sanitizer::mask_key;

/// An authenticated client and the region it was built for.
pub(crate) struct Session {
    pub client: Arc<dyn DomainRecordApi>,
    pub region_id: String,
}

/// Exclusive access to the session slot.
///
/// Holding the guard is what serializes remote calls: every operation takes it
/// before touching the client and keeps it until its remote call returns.
pub(crate) type SessionGuard<'a> = MutexGuard<'a, Option<Session>>;

/// Owns the provider's credentials and its one session client.
pub(crate) struct SessionManager {
    config: ProviderConfig,
    connector: Arc<dyn ApiConnector>,
    slot: Mutex<Option<Session>>,
}

impl SessionManager {
    pub fn new(config: ProviderConfig, connector: Arc<dyn ApiConnector>) -> Self {
        Self {
            config,
            connector,
            slot: Mutex::new(None),
        }
    }

    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Waits for exclusive access.
    pub async fn lock(&self) -> SessionGuard<'_> {
        self.slot.lock().await
    }

    /// Returns the session held in `slot`, constructing it on first use.
    ///
    /// A failed construction leaves the slot empty, so the next call starts over.
    pub fn ensure_session<'a>(&self, slot: &'a mut Option<Session>) -> Result<&'a Session> {
        let session = match slot.take() {
            Some(session) => session,
            None => self.connect()?,
        };
        Ok(slot.insert(session))
    }

    fn connect(&self) -> Result<Session> {
        let region_id = self.config.region_or_default();
        let client = self
            .connector
            .connect(
                region_id,
                &self.config.access_key_id,
                &self.config.access_key_secret,
            )
            .inspect_err(|e| log::error!("Session setup for region {region_id} failed: {e}"))?;

        log::info!(
            "Session established for region {region_id} with key {}",
            mask_key(&self.config.access_key_id)
        );

        Ok(Session {
            client,
            region_id: region_id.to_string(),
        })
    }
}
