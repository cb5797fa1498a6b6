//! Remote procedure invocation
//!
//! Everything the workflow needs from the server goes through
//! [`RemoteCaller`]: call a named procedure with positional arguments and
//! suspend until it answers or fails. [`JsonRpcClient`] is the HTTP
//! implementation; tests substitute a scripted double.

pub mod client;
pub mod procedure;
pub mod wire;

#[cfg(test)]
pub(crate) mod scripted;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::InvoicePayResult;

pub use client::JsonRpcClient;
pub use procedure::{Procedure, ProcedureCall};

/// Invokes server procedures
///
/// Failures are reported as `InvoicePayError::RemoteCallFailed` carrying the
/// procedure name.
#[async_trait]
pub trait RemoteCaller: Send + Sync {
    async fn call(&self, call: ProcedureCall) -> InvoicePayResult<Value>;
}

#[async_trait]
impl<T: RemoteCaller + ?Sized> RemoteCaller for Arc<T> {
    async fn call(&self, call: ProcedureCall) -> InvoicePayResult<Value> {
        (**self).call(call).await
    }
}
