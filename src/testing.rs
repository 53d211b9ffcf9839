//! Test helpers: an in-process GraphQL endpoint and a log event recorder.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// A request captured by [`MockServer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[derive(Clone)]
struct MockState {
    status: u16,
    reply: Arc<String>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// GraphQL endpoint on a random loopback port replying with a fixed body
pub struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub async fn start(status: u16, reply: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            reply: Arc::new(reply.to_string()),
            requests: Arc::clone(&requests),
        };

        let app = Router::new()
            .route("/graphql", post(handle))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let headers = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                v.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);

    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest { headers, body });

    (
        StatusCode::from_u16(state.status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        state.reply.as_ref().clone(),
    )
}

/// Records warn/error events emitted by this crate
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl EventLog {
    pub fn errors(&self) -> Vec<String> {
        self.at(Level::ERROR)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at(Level::WARN)
    }

    fn at(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for EventLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("graphlink") || *metadata.level() > Level::WARN {
            return;
        }

        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*metadata.level(), visitor.0));
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}
