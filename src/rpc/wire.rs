//! JSON-RPC 2.0 envelopes used by the server's web endpoints
//!
//! Requests are `{"jsonrpc": "2.0", "method": "call", "params": ..., "id": n}`.
//! Responses carry either `result` or `error`; server exceptions put the
//! exception class and its message under `error.data`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RemoteFailure;

/// Request envelope
#[derive(Debug, Serialize)]
pub struct RpcRequest<P> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: P,
    pub id: u64,
}

impl<P> RpcRequest<P> {
    pub fn call(id: u64, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "call",
            params,
            id,
        }
    }
}

/// Parameters of a `call_kw` request
#[derive(Debug, Serialize)]
pub struct CallKwParams<'a> {
    pub model: &'a str,
    pub method: &'a str,
    pub args: &'a [Value],
    pub kwargs: CallKwargs<'a>,
}

#[derive(Debug, Serialize)]
pub struct CallKwargs<'a> {
    pub context: &'a Map<String, Value>,
}

/// Parameters of `/web/session/authenticate`
#[derive(Debug, Serialize)]
pub struct AuthenticateParams<'a> {
    pub db: &'a str,
    pub login: &'a str,
    pub password: &'a str,
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

impl RpcError {
    /// Convert into a failure, preferring the exception details over the generic message
    pub fn into_failure(self) -> RemoteFailure {
        match self.data {
            Some(data) if !data.message.is_empty() => RemoteFailure::Server {
                name: data.name,
                message: data.message,
            },
            _ => RemoteFailure::Server {
                name: format!("JSON-RPC error {}", self.code),
                message: self.message,
            },
        }
    }
}

impl RpcResponse {
    /// The `result` member, or the failure described by `error`
    ///
    /// A response with neither member decodes as `null`.
    pub fn into_result(self) -> Result<Value, RemoteFailure> {
        match (self.error, self.result) {
            (Some(error), _) => Err(error.into_failure()),
            (None, Some(result)) => Ok(result),
            (None, None) => Ok(Value::Null),
        }
    }
}
