//! HTTP JSON-RPC client for the ERP server
//!
//! Procedures are posted to `{base}/web/dataset/call_kw/{model}/{method}`.
//! Authentication goes through `{base}/web/session/authenticate`; the session
//! cookie it sets is kept in the client's cookie store and sent on every
//! later call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::procedure::ProcedureCall;
use super::wire::{AuthenticateParams, CallKwParams, CallKwargs, RpcRequest, RpcResponse};
use super::RemoteCaller;
use crate::config::{Password, ServerSettings};
use crate::error::{InvoicePayError, InvoicePayResult, RemoteFailure};

const AUTHENTICATE_PATH: &str = "/web/session/authenticate";

/// Thin wrapper around a cookie-keeping `reqwest::Client`
#[derive(Debug)]
pub struct JsonRpcClient {
    base_url: String,
    http: Client,
    timeout: Duration,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// Build a client for the configured server
    pub fn new(server: &ServerSettings) -> InvoicePayResult<Self> {
        let base_url = validate_base_url(&server.url)?;

        let http = Client::builder()
            .cookie_store(true)
            .user_agent(concat!("invoice-pay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InvoicePayError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http,
            timeout: server.request_timeout(),
            next_id: AtomicU64::new(1),
        })
    }

    /// The normalized base URL (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Open a server session; returns the authenticated user id
    pub async fn authenticate(
        &self,
        database: &str,
        login: &str,
        password: &Password,
    ) -> InvoicePayResult<i64> {
        let params = AuthenticateParams {
            db: database,
            login,
            password: password.expose(),
        };

        let result = self
            .post(AUTHENTICATE_PATH, &params)
            .await
            .map_err(|failure| match failure {
                RemoteFailure::Server { message, .. } => InvoicePayError::Authentication(message),
                other => InvoicePayError::remote("authenticate", other),
            })?;

        match result.get("uid").and_then(Value::as_i64) {
            Some(uid) => {
                info!(%login, database, uid, "authenticated");
                Ok(uid)
            }
            None => Err(InvoicePayError::Authentication(format!(
                "Server rejected login '{}' on database '{}'",
                login, database
            ))),
        }
    }

    /// Post one JSON-RPC request and unwrap its result under the timeout
    async fn post<P: Serialize>(&self, path: &str, params: P) -> Result<Value, RemoteFailure> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}{}", self.base_url, path);
        let request = RpcRequest::call(id, params);
        debug!(%url, id, "posting json-rpc request");

        let exchange = async {
            let response = self
                .http
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| RemoteFailure::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RemoteFailure::Http(status.as_u16()));
            }

            let body: RpcResponse = response
                .json()
                .await
                .map_err(|e| RemoteFailure::Decode(e.to_string()))?;
            body.into_result()
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(outcome) => outcome,
            Err(_) => Err(RemoteFailure::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl RemoteCaller for JsonRpcClient {
    async fn call(&self, call: ProcedureCall) -> InvoicePayResult<Value> {
        let procedure = call.procedure;
        let path = format!("/web/dataset/call_kw/{}/{}", procedure.model, procedure.method);
        let params = CallKwParams {
            model: procedure.model,
            method: procedure.method,
            args: &call.args,
            kwargs: CallKwargs {
                context: &call.context,
            },
        };

        let started = Instant::now();
        let outcome = self.post(&path, params).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(value) => {
                debug!(%procedure, elapsed_ms, "remote call succeeded");
                Ok(value)
            }
            Err(cause) => {
                warn!(%procedure, elapsed_ms, %cause, "remote call failed");
                Err(InvoicePayError::remote(procedure.method, cause))
            }
        }
    }
}

/// Validate and normalize the server base URL
///
/// Only http and https are accepted and a host is required. The trailing
/// slash is dropped so paths can be appended directly.
fn validate_base_url(base: &str) -> InvoicePayResult<String> {
    let parsed = Url::parse(base.trim())
        .map_err(|e| InvoicePayError::Config(format!("Invalid server URL '{}': {}", base, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(InvoicePayError::Config(format!(
            "Server URL must use http or https; got '{}://'",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(InvoicePayError::Config("Server URL must include a host".into()));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
