//! Test doubles shared by the controller tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::api::{ApiError, RawResponse, Result, Transport};
use crate::surface::{Container, MemorySurface, Node, Surface};

/// Something that happened during a test, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A request was issued (`"GET /api/v1/cart"`).
    Request(String),
    /// A body sent with a request.
    Body(Value),
    /// Text was set on a container.
    Text(Container, String),
    /// A container was cleared.
    Clear(Container),
}

/// Shared, ordered event log.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    /// Only the requests, as `"METHOD /path"` strings.
    pub fn requests(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Request(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, request: &str) -> usize {
        self.requests().iter().filter(|r| *r == request).count()
    }

    pub fn position(&self, event: &Event) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }
}

/// Scripted answer to one request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with a JSON body.
    Json(Value),
    /// Any status with a JSON body.
    Status(StatusCode, Value),
    /// Any status with a raw, possibly non-JSON, body.
    Text(StatusCode, String),
    /// No usable response; surfaces as a transport-class [`ApiError`].
    Fail,
    /// Answer after a delay.
    Delayed(Duration, Box<Self>),
}

impl Reply {
    pub fn delayed(millis: u64, reply: Self) -> Self {
        Self::Delayed(Duration::from_millis(millis), Box::new(reply))
    }
}

/// Connection-level failure. `reqwest::Error` has no public constructor, so
/// this is the other transport-class variant.
fn transport_failure() -> ApiError {
    ApiError::Parse(serde_json::from_str::<Value>("connection reset").unwrap_err())
}

#[derive(Default)]
struct Script {
    persistent: HashMap<String, Reply>,
    once: HashMap<String, VecDeque<Reply>>,
}

/// In-memory [`Transport`] with scripted replies and a request journal.
#[derive(Clone, Default)]
pub struct FakeTransport {
    script: Arc<Mutex<Script>>,
    journal: Journal,
}

impl FakeTransport {
    pub fn new(journal: Journal) -> Self {
        Self {
            script: Arc::default(),
            journal,
        }
    }

    /// Answer every `"METHOD /path"` request with `reply`.
    pub fn on(&self, request: &str, reply: Reply) -> &Self {
        self.script
            .lock()
            .unwrap()
            .persistent
            .insert(request.to_string(), reply);
        self
    }

    /// Answer the next `"METHOD /path"` request with `reply`, before any
    /// persistent reply.
    pub fn once(&self, request: &str, reply: Reply) -> &Self {
        self.script
            .lock()
            .unwrap()
            .once
            .entry(request.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    fn reply_for(&self, request: String) -> Reply {
        let reply = {
            let mut script = self.script.lock().unwrap();
            let queued = script.once.get_mut(&request).and_then(VecDeque::pop_front);
            queued.or_else(|| script.persistent.get(&request).cloned())
        };
        self.journal.push(Event::Request(request));
        reply.unwrap_or_else(|| {
            Reply::Status(
                StatusCode::NOT_FOUND,
                serde_json::json!({"detail": "Not Found"}),
            )
        })
    }

    async fn resolve(reply: Reply) -> Reply {
        let mut reply = reply;
        while let Reply::Delayed(delay, inner) = reply {
            tokio::time::sleep(delay).await;
            reply = *inner;
        }
        reply
    }

    async fn raw(&self, request: String) -> Result<RawResponse> {
        match Self::resolve(self.reply_for(request)).await {
            Reply::Json(body) => Ok(RawResponse::new(StatusCode::OK, body.to_string())),
            Reply::Status(status, body) => Ok(RawResponse::new(status, body.to_string())),
            Reply::Text(status, body) => Ok(RawResponse::new(status, body)),
            Reply::Fail => Err(transport_failure()),
            Reply::Delayed(..) => unreachable!("resolved above"),
        }
    }
}

impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        let response = self.raw(format!("GET {path}")).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
            });
        }
        response.json()
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<RawResponse> {
        let request = format!("POST {path}");
        if let Some(body) = body {
            self.journal.push(Event::Body(body));
        }
        self.raw(request).await
    }

    async fn delete(&self, path: &str) -> Result<RawResponse> {
        self.raw(format!("DELETE {path}")).await
    }
}

/// [`MemorySurface`] that also journals text and clear operations.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub memory: MemorySurface,
    journal: Journal,
}

impl RecordingSurface {
    pub fn new(journal: Journal) -> Self {
        Self {
            memory: MemorySurface::new(),
            journal,
        }
    }
}

impl Surface for RecordingSurface {
    fn clear(&self, container: Container) {
        self.journal.push(Event::Clear(container));
        self.memory.clear(container);
    }

    fn append(&self, container: Container, node: Node) {
        self.memory.append(container, node);
    }

    fn set_text(&self, container: Container, text: &str) {
        self.journal.push(Event::Text(container, text.to_string()));
        self.memory.set_text(container, text);
    }
}

/// A fake transport and recording surface sharing one journal.
pub fn harness() -> (FakeTransport, RecordingSurface, Journal) {
    let journal = Journal::default();
    (
        FakeTransport::new(journal.clone()),
        RecordingSurface::new(journal.clone()),
        journal,
    )
}
