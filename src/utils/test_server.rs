//! Local HTTP server answering every request with one canned response.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use url::Url;

/// A request received by the canned server
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

async fn respond(
    State(canned): State<Canned>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    canned.received.lock().unwrap().push(ReceivedRequest {
        path: uri.path().to_string(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    (
        canned.status,
        [(CONTENT_TYPE, "application/json")],
        canned.body.clone(),
    )
        .into_response()
}

/// Serves `body` with `status` on an ephemeral port.
///
/// Returns the server root (no trailing slash, with `path_prefix` appended) and
/// the log of received requests.
pub async fn spawn_canned(
    status: StatusCode,
    body: &str,
    path_prefix: &str,
) -> (Url, Arc<Mutex<Vec<ReceivedRequest>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(respond).with_state(Canned {
        status,
        body: body.to_string(),
        received: received.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = Url::parse(&format!("http://{}{}", addr, path_prefix)).unwrap();
    (base, received)
}
