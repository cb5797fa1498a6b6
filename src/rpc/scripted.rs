//! Scripted in-memory `RemoteCaller` for tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ProcedureCall, RemoteCaller};
use crate::error::{InvoicePayError, InvoicePayResult, RemoteFailure};

type Reply = Result<Value, RemoteFailure>;

/// Answers calls from per-method queues and records every call made
///
/// Queued replies are served in order; once a method's queue runs dry its
/// last served reply is repeated. Methods never scripted answer `true`.
#[derive(Default)]
pub struct ScriptedRemote {
    replies: Mutex<HashMap<&'static str, VecDeque<Reply>>>,
    last: Mutex<HashMap<&'static str, Reply>>,
    calls: Mutex<Vec<ProcedureCall>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply for a method
    pub fn reply(self, method: &'static str, value: Value) -> Self {
        self.push(method, Ok(value));
        self
    }

    /// Queue a failure for a method
    pub fn fail(self, method: &'static str, cause: RemoteFailure) -> Self {
        self.push(method, Err(cause));
        self
    }

    /// Queue a reply on a shared instance
    pub fn push(&self, method: &'static str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(reply);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ProcedureCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made to one method
    pub fn calls_to(&self, method: &str) -> Vec<ProcedureCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.procedure.method == method)
            .collect()
    }

    /// Number of calls made to one method
    pub fn count(&self, method: &str) -> usize {
        self.calls_to(method).len()
    }
}

#[async_trait]
impl RemoteCaller for ScriptedRemote {
    async fn call(&self, call: ProcedureCall) -> InvoicePayResult<Value> {
        let method = call.procedure.method;
        self.calls.lock().unwrap().push(call);

        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        let reply = {
            let mut last = self.last.lock().unwrap();
            match next {
                Some(reply) => {
                    last.insert(method, reply.clone());
                    Some(reply)
                }
                None => last.get(method).cloned(),
            }
        };

        match reply {
            Some(Ok(value)) => Ok(value),
            Some(Err(cause)) => Err(InvoicePayError::remote(method, cause)),
            None => Ok(Value::Bool(true)),
        }
    }
}
