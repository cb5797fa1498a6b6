//! Service layer for invoice-pay
//!
//! Services wrap a [`RemoteCaller`](crate::rpc::RemoteCaller) and turn the
//! server's procedures into typed operations. They hold no state of their
//! own; every call goes to the server.

pub mod invoice;
pub mod session;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{InvoicePayError, InvoicePayResult, RemoteFailure};
use crate::rpc::Procedure;

pub use invoice::InvoiceService;
pub use session::SessionService;

/// Decode a procedure's result into the expected shape
fn decode<T: DeserializeOwned>(procedure: Procedure, value: Value) -> InvoicePayResult<T> {
    serde_json::from_value(value)
        .map_err(|e| InvoicePayError::remote(procedure.method, RemoteFailure::Decode(e.to_string())))
}
