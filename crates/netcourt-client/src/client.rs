// crates/netcourt-client/src/client.rs
// ============================================================================
// Module: NetCourt Client Core
// Description: Shared state and request plumbing for every notary flow.
// Purpose: Compose credentials, clock, transport, and telemetry once.
// Dependencies: netcourt-config, netcourt-core, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! [`ClientCore`] holds what every flow needs: account id, signer, optional
//! filer entity, backend host, millisecond clock, transport, and metrics.
//! Flow clients embed a core and expose it through [`NotaryClient`], which
//! supplies the shared accessors.
//! Invariants:
//! - The default transport is built lazily and dropped when the host changes.
//! - An injected transport survives host changes.
//! - Optional payload fields are omitted when absent or empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;
use std::time::Instant;

use netcourt_config::NotaryConfig;
use netcourt_core::Business;
use netcourt_core::Identity;
use netcourt_core::Location;
use netcourt_core::MillisStrategy;
use netcourt_core::NotaryError;
use netcourt_core::RequestSigner;
use serde_json::Map;
use serde_json::Value;
use url::Url;

use crate::envelope::NotaryResponse;
use crate::envelope::ResponseEnvelope;
use crate::telemetry::NoopMetrics;
use crate::telemetry::NotaryFlow;
use crate::telemetry::NotaryMetricEvent;
use crate::telemetry::NotaryMetrics;
use crate::telemetry::NotaryOutcome;
use crate::transport::DEFAULT_TIMEOUT;
use crate::transport::HttpTransport;
use crate::transport::Transport;

// ============================================================================
// SECTION: Client Core
// ============================================================================

/// Shared state behind every notary flow client.
pub struct ClientCore {
    /// Flow label used for telemetry.
    flow: NotaryFlow,
    /// Account identifier issued by the backend.
    account_id: String,
    /// Request signer; required before any signed call.
    signer: Option<RequestSigner>,
    /// Optional filer identity attached to tokens and certificates.
    entity: Option<Identity>,
    /// Backend base URL.
    host: String,
    /// Transport timeout for the default transport.
    timeout: Duration,
    /// Millisecond derivation for request timestamps.
    millis: MillisStrategy,
    /// Metrics sink.
    metrics: Arc<dyn NotaryMetrics>,
    /// Lazily built default transport.
    cached: OnceLock<Arc<dyn Transport>>,
    /// Caller-supplied transport overriding the default.
    injected: Option<Arc<dyn Transport>>,
}

impl ClientCore {
    /// Builds a core with flow defaults.
    #[must_use]
    pub fn new(
        flow: NotaryFlow,
        host: impl Into<String>,
        millis: MillisStrategy,
        account_id: impl Into<String>,
        signer: Option<RequestSigner>,
        entity: Option<Identity>,
    ) -> Self {
        Self {
            flow,
            account_id: account_id.into(),
            signer,
            entity,
            host: host.into(),
            timeout: DEFAULT_TIMEOUT,
            millis,
            metrics: Arc::new(NoopMetrics),
            cached: OnceLock::new(),
            injected: None,
        }
    }

    /// Builds a core from configuration, keeping flow defaults for unset fields.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the key or entity is invalid.
    pub fn from_config(
        flow: NotaryFlow,
        default_host: &str,
        default_millis: MillisStrategy,
        config: &NotaryConfig,
    ) -> Result<Self, NotaryError> {
        let signer = config.signer().map_err(|err| NotaryError::InvalidArgument(err.to_string()))?;
        let entity =
            config.entity_identity().map_err(|err| NotaryError::InvalidArgument(err.to_string()))?;
        let host = config.host.as_deref().map_or(default_host, str::trim);
        let mut core = Self::new(
            flow,
            host,
            config.millis_strategy.unwrap_or(default_millis),
            config.account_id.clone(),
            Some(signer),
            entity,
        );
        core.timeout = config.timeout();
        Ok(core)
    }

    /// Returns the backend host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Replaces the host and drops the cached default transport.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
        self.cached = OnceLock::new();
    }

    /// Returns the account id.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Replaces the account id.
    pub fn set_account_id(&mut self, account_id: impl Into<String>) {
        self.account_id = account_id.into();
    }

    /// Returns the filer entity.
    #[must_use]
    pub const fn entity(&self) -> Option<&Identity> {
        self.entity.as_ref()
    }

    /// Replaces the filer entity.
    pub fn set_entity(&mut self, entity: Identity) {
        self.entity = Some(entity);
    }

    /// Replaces the signing key with PEM content.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the key is empty or invalid.
    pub fn set_private_key(&mut self, pem: &[u8]) -> Result<(), NotaryError> {
        self.signer = Some(RequestSigner::from_pem(pem)?);
        Ok(())
    }

    /// Replaces the signing key with the contents of a PEM file.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the file is unreadable,
    /// empty, or not a key.
    pub fn set_private_key_file(&mut self, path: &Path) -> Result<(), NotaryError> {
        self.signer = Some(RequestSigner::from_file(path)?);
        Ok(())
    }

    /// Returns true when a signing key is configured.
    #[must_use]
    pub const fn has_private_key(&self) -> bool {
        self.signer.is_some()
    }

    /// Returns the millisecond strategy.
    #[must_use]
    pub const fn millis_strategy(&self) -> MillisStrategy {
        self.millis
    }

    /// Replaces the millisecond strategy.
    pub const fn set_millis_strategy(&mut self, millis: MillisStrategy) {
        self.millis = millis;
    }

    /// Returns the default transport timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replaces the default transport timeout and drops the cached transport.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
        self.cached = OnceLock::new();
    }

    /// Installs a caller-supplied transport.
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.injected = Some(transport);
    }

    /// Installs a metrics sink.
    pub fn set_metrics(&mut self, metrics: Arc<dyn NotaryMetrics>) {
        self.metrics = metrics;
    }

    /// Returns the active transport, building the default on first use.
    pub(crate) fn transport(&self) -> Result<Arc<dyn Transport>, NotaryError> {
        if let Some(transport) = &self.injected {
            return Ok(Arc::clone(transport));
        }
        if let Some(transport) = self.cached.get() {
            return Ok(Arc::clone(transport));
        }
        let built: Arc<dyn Transport> = Arc::new(HttpTransport::new(self.timeout).map_err(|err| {
            tracing::warn!(flow = self.flow.as_str(), error = %err, "transport build failed");
            NotaryError::network_failure()
        })?);
        Ok(Arc::clone(self.cached.get_or_init(|| built)))
    }

    /// Returns a fresh timestamp under the configured strategy.
    pub(crate) fn timestamp(&self) -> u64 {
        self.millis.now()
    }

    /// Signs `account_id ++ content ++ timestamp`.
    pub(crate) fn sign(&self, content: &str, timestamp: u64) -> Result<String, NotaryError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| NotaryError::InvalidArgument("Private key is not set".to_string()))?;
        signer.sign(&self.account_id, content, timestamp)
    }

    /// Builds the signed token request shared by every flow.
    pub(crate) fn token_payload(
        &self,
        customer: &Identity,
        business: &Business,
        properties: Option<&str>,
    ) -> Result<Value, NotaryError> {
        let timestamp = self.timestamp();
        let mut body = Map::new();
        put_text(&mut body, "accountId", &self.account_id);
        if let Some(entity) = &self.entity {
            body.insert("entity".to_string(), entity.to_payload()?);
        }
        body.insert("bizId".to_string(), Value::from(business.biz_id()));
        if let Some(sub_biz) = business.sub_biz() {
            body.insert("subBizId".to_string(), Value::from(sub_biz.as_str()));
        }
        body.insert("customer".to_string(), customer.to_payload()?);
        body.insert("timestamp".to_string(), Value::from(timestamp));
        put_opt_text(&mut body, "properties", properties);
        let signed = self.sign(&business.biz_id().to_string(), timestamp)?;
        body.insert("signedData".to_string(), Value::from(signed));
        Ok(Value::Object(body))
    }

    /// Builds the signed certificate request shared by both judicial variants.
    pub(crate) fn cert_payload(
        &self,
        token: &str,
        phase: &str,
        content: Option<&str>,
        location: Option<&Location>,
        properties: Option<&str>,
    ) -> Result<Value, NotaryError> {
        let timestamp = self.timestamp();
        let mut meta = Map::new();
        put_text(&mut meta, "accountId", &self.account_id);
        put_text(&mut meta, "token", token);
        put_text(&mut meta, "phase", phase);
        meta.insert("timestamp".to_string(), Value::from(timestamp));
        if let Some(entity) = &self.entity {
            meta.insert("entity".to_string(), entity.to_payload()?);
        }
        if let Some(location) = location {
            meta.insert("location".to_string(), location.to_payload());
        }
        put_opt_text(&mut meta, "properties", properties);

        let mut body = Map::new();
        body.insert("meta".to_string(), Value::Object(meta));
        put_opt_text(&mut body, "notaryContent", content);
        body.insert("timestamp".to_string(), Value::from(timestamp));
        let signed = self.sign(phase, timestamp)?;
        body.insert("signedData".to_string(), Value::from(signed));
        Ok(Value::Object(body))
    }

    /// Posts `body` to `endpoint` and normalizes the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the host is not a valid
    /// base URL. Network and backend failures are returned as responses.
    pub(crate) fn post(
        &self,
        endpoint: &'static str,
        body: &Value,
        envelope: &dyn ResponseEnvelope,
    ) -> Result<NotaryResponse, NotaryError> {
        let url = self.endpoint_url(endpoint)?;
        let Ok(transport) = self.transport() else {
            let response = NotaryResponse::network_failure();
            self.record(endpoint, &response, None, Duration::ZERO);
            return Ok(response);
        };
        tracing::debug!(flow = self.flow.as_str(), endpoint, "dispatching notary request");
        let started = Instant::now();
        let outcome = transport.post_json(&url, body);
        let elapsed = started.elapsed();
        let status = outcome.as_ref().ok().map(|reply| reply.status);
        if let Err(err) = &outcome {
            tracing::warn!(flow = self.flow.as_str(), endpoint, error = %err, "notary transport failed");
        }
        let response = envelope.settle(&outcome);
        if !response.success && status.is_some() {
            tracing::info!(
                flow = self.flow.as_str(),
                endpoint,
                status = response.status,
                reason = response.message.as_deref().unwrap_or_default(),
                "notary request rejected"
            );
        }
        self.record(endpoint, &response, status, elapsed);
        Ok(response)
    }

    /// Resolves an endpoint path against the host.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, NotaryError> {
        let base = Url::parse(&self.host)
            .map_err(|err| NotaryError::InvalidArgument(format!("invalid host: {err}")))?;
        base.join(endpoint)
            .map_err(|err| NotaryError::InvalidArgument(format!("invalid endpoint: {err}")))
    }

    /// Emits request and latency metrics.
    fn record(
        &self,
        endpoint: &'static str,
        response: &NotaryResponse,
        status: Option<u16>,
        latency: Duration,
    ) {
        let outcome = if response.success {
            NotaryOutcome::Ok
        } else if status.is_none() || response.is_network_failure() {
            NotaryOutcome::NetworkError
        } else {
            NotaryOutcome::Rejected
        };
        let event = NotaryMetricEvent {
            flow: self.flow,
            endpoint,
            outcome,
            status,
        };
        self.metrics.record_request(event.clone());
        self.metrics.record_latency(event, latency);
    }
}

impl fmt::Debug for ClientCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCore")
            .field("flow", &self.flow)
            .field("account_id", &self.account_id)
            .field("host", &self.host)
            .field("millis", &self.millis)
            .field("has_private_key", &self.signer.is_some())
            .field("has_entity", &self.entity.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Client Trait
// ============================================================================

/// Accessors shared by every notary flow client.
pub trait NotaryClient {
    /// Returns the shared core.
    fn core(&self) -> &ClientCore;

    /// Returns the shared core mutably.
    fn core_mut(&mut self) -> &mut ClientCore;

    /// Returns the backend host.
    fn host(&self) -> &str {
        self.core().host()
    }

    /// Replaces the backend host.
    fn set_host(&mut self, host: &str) {
        self.core_mut().set_host(host);
    }

    /// Returns the account id.
    fn account_id(&self) -> &str {
        self.core().account_id()
    }

    /// Replaces the account id.
    fn set_account_id(&mut self, account_id: &str) {
        self.core_mut().set_account_id(account_id);
    }

    /// Returns the filer entity.
    fn entity(&self) -> Option<&Identity> {
        self.core().entity()
    }

    /// Replaces the filer entity.
    fn set_entity(&mut self, entity: Identity) {
        self.core_mut().set_entity(entity);
    }

    /// Replaces the signing key with PEM content.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the key is empty or invalid.
    fn set_private_key(&mut self, pem: &[u8]) -> Result<(), NotaryError> {
        self.core_mut().set_private_key(pem)
    }

    /// Replaces the signing key with the contents of a PEM file.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the file is unreadable,
    /// empty, or not a key.
    fn set_private_key_file(&mut self, path: &Path) -> Result<(), NotaryError> {
        self.core_mut().set_private_key_file(path)
    }

    /// Returns the millisecond strategy.
    fn millis_strategy(&self) -> MillisStrategy {
        self.core().millis_strategy()
    }

    /// Replaces the millisecond strategy.
    fn set_millis_strategy(&mut self, millis: MillisStrategy) {
        self.core_mut().set_millis_strategy(millis);
    }

    /// Installs a caller-supplied transport.
    #[must_use]
    fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self
    where
        Self: Sized,
    {
        self.core_mut().set_transport(transport);
        self
    }

    /// Installs a metrics sink.
    #[must_use]
    fn with_metrics(mut self, metrics: Arc<dyn NotaryMetrics>) -> Self
    where
        Self: Sized,
    {
        self.core_mut().set_metrics(metrics);
        self
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Inserts a text field unless it is empty.
fn put_text(map: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.is_empty() {
        map.insert(key.to_string(), Value::from(value));
    }
}

/// Inserts an optional text field unless it is absent or empty.
fn put_opt_text(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        put_text(map, key, value);
    }
}

/// Renders `responseData` as a token string.
pub(crate) fn data_as_text(response: &NotaryResponse) -> Result<String, NotaryError> {
    match response.data.as_ref() {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        _ => Err(NotaryError::BadResponse {
            message: "response data is missing".to_string(),
            status: response.status,
            code: response.code.clone(),
        }),
    }
}
