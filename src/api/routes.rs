//! API routes configuration module

use crate::api::handlers::{ask, contact, health};
use crate::api::middleware::rate_limit;
use crate::api::state::AppState;
use crate::config::AllowedOrigins;
use axum::http::{header, HeaderValue, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `state` - Shared state handed to every handler
/// * `allowed_origins` - Origins accepted by the CORS layer
///
/// # Returns
/// * `Router` - Configured router with all API endpoints and middleware
pub fn app(state: AppState, allowed_origins: &AllowedOrigins) -> Router {
    let ask_route =
        post(ask).route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/", get(health))
        .route("/ask", ask_route)
        .route("/contact", post(contact))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &AllowedOrigins) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match allowed_origins {
        AllowedOrigins::Any => cors.allow_origin(Any),
        AllowedOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            cors.allow_origin(origins)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::{RATELIMIT_LIMIT, RATELIMIT_REMAINING};
    use crate::core::RateLimiter;
    use crate::email::providers::EmailProvider;
    use crate::email::{ContactMailer, EmailMessage};
    use crate::errors::Error;
    use crate::llm::providers::{CompletionOptions, LlmProvider};
    use crate::config::PromptConfig;
    use crate::llm::providers::openai::OpenAiProvider;
    use crate::llm::{ChatMessage, LlmClient};
    use crate::utils::test_server::spawn_canned;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::extract::{ConnectInfo, Request};
    use axum::http::{header::CONTENT_TYPE, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct MockLlm {
        calls: AtomicUsize,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl LlmProvider for MockLlm {
        async fn call_llm_api(
            &self,
            messages: Vec<ChatMessage>,
            _options: &CompletionOptions,
        ) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(msg) => Err(Error::Provider(msg.clone())),
                None => Ok(format!("answer to {} messages", messages.len())),
            }
        }
    }

    #[derive(Debug, Default)]
    struct MockMailer {
        sent: Mutex<Vec<EmailMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl EmailProvider for MockMailer {
        async fn send_email(&self, email: EmailMessage) -> Result<(), Error> {
            self.sent.lock().unwrap().push(email);
            if self.fail {
                Err(Error::Provider("invalid api key".to_string()))
            } else {
                Ok(())
            }
        }
    }

    struct Harness {
        llm: Arc<MockLlm>,
        mail: Arc<MockMailer>,
        state: AppState,
    }

    impl Harness {
        fn new() -> Self {
            Self::build(None, false, true)
        }

        fn build(llm_error: Option<&str>, mail_fails: bool, with_mailer: bool) -> Self {
            let llm = Arc::new(MockLlm {
                calls: AtomicUsize::new(0),
                fail_with: llm_error.map(String::from),
            });
            let mail = Arc::new(MockMailer {
                sent: Mutex::new(Vec::new()),
                fail: mail_fails,
            });
            let prompt = PromptConfig {
                system_prompt: "persona".to_string(),
                model: "gpt-4o-mini".to_string(),
                temperature: 0.7,
                max_tokens: 200,
            };
            let mailer = with_mailer.then(|| {
                ContactMailer::new(
                    mail.clone(),
                    "Portfolio Contact <onboarding@resend.dev>".to_string(),
                    "owner@example.com".to_string(),
                )
            });
            let state = AppState {
                llm: LlmClient::new(llm.clone(), &prompt),
                mailer,
                rate_limiter: Arc::new(RateLimiter::new(Duration::from_secs(15 * 60), 10)),
                trust_proxy: 0,
            };
            Harness { llm, mail, state }
        }

        fn router(&self) -> Router {
            app(self.state.clone(), &AllowedOrigins::Any)
        }
    }

    fn post_json(uri: &str, body: &Value, peer: &str) -> Request {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let addr: SocketAddr = peer.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        req
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ask_body() -> Value {
        json!({"messages": [], "question": "What are your skills?"})
    }

    #[tokio::test]
    async fn liveness_route() {
        let resp = Harness::new()
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(!bytes.is_empty());
    }

    #[tokio::test]
    async fn ask_returns_answer() {
        let harness = Harness::new();
        let resp = harness
            .router()
            .oneshot(post_json("/ask", &ask_body(), "10.0.0.1:4000"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[RATELIMIT_LIMIT], "10");
        assert_eq!(resp.headers()[RATELIMIT_REMAINING], "9");
        let body = json_body(resp).await;
        assert_eq!(body["answer"], "answer to 2 messages");
        assert_eq!(harness.llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ask_validation_errors_are_400() {
        let cases = [
            (json!({"question": "q"}), "Messages array is required"),
            (json!({"messages": "nope", "question": "q"}), "Messages array is required"),
            (json!({"messages": []}), "Question is required and must be a string"),
            (
                json!({"messages": [], "question": "a".repeat(501)}),
                "Question is too long. Maximum 500 characters.",
            ),
            (
                json!({"messages": vec![json!({"role": "user", "content": "x"}); 51], "question": "q"}),
                "Too many messages in conversation history.",
            ),
            (
                json!({"messages": [{"role": "system", "content": "x"}], "question": "q"}),
                "Invalid message role",
            ),
        ];

        let harness = Harness::new();
        for (i, (body, message)) in cases.iter().enumerate() {
            let peer = format!("10.0.1.{}:4000", i);
            let resp = harness
                .router()
                .oneshot(post_json("/ask", body, &peer))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", message);
            assert_eq!(json_body(resp).await["error"], *message);
        }
        assert_eq!(harness.llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn ask_non_json_body_is_400() {
        let mut req = Request::builder()
            .method("POST")
            .uri("/ask")
            .body(Body::from("question=hi"))
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo("10.0.0.2:1".parse::<SocketAddr>().unwrap()));

        let resp = Harness::new().router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "Messages array is required");
    }

    #[tokio::test]
    async fn eleventh_ask_from_same_client_is_429() {
        let harness = Harness::new();
        for _ in 0..10 {
            let resp = harness
                .router()
                .oneshot(post_json("/ask", &ask_body(), "10.0.0.3:1000"))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let resp = harness
            .router()
            .oneshot(post_json("/ask", &ask_body(), "10.0.0.3:2000"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key(header::RETRY_AFTER));
        assert_eq!(resp.headers()[RATELIMIT_REMAINING], "0");
        assert_eq!(
            json_body(resp).await["error"],
            "Too many requests from this IP, please try again later."
        );
        assert_eq!(harness.llm.calls.load(Ordering::SeqCst), 10);

        let other = harness
            .router()
            .oneshot(post_json("/ask", &ask_body(), "10.0.0.4:1000"))
            .await
            .unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rate_limit_runs_before_validation() {
        let harness = Harness::new();
        for _ in 0..10 {
            harness
                .router()
                .oneshot(post_json("/ask", &json!({}), "10.0.0.5:1"))
                .await
                .unwrap();
        }
        let resp = harness
            .router()
            .oneshot(post_json("/ask", &json!({}), "10.0.0.5:1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn contact_is_not_rate_limited() {
        let harness = Harness::new();
        let body = contact_body();
        for _ in 0..12 {
            let resp = harness
                .router()
                .oneshot(post_json("/contact", &body, "10.0.0.6:1"))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn provider_failure_is_surfaced_as_500() {
        let harness = Harness::build(Some("You exceeded your current quota"), false, true);
        let resp = harness
            .router()
            .oneshot(post_json("/ask", &ask_body(), "10.0.0.7:1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(resp).await["error"],
            "You exceeded your current quota"
        );
        assert_eq!(harness.llm.calls.load(Ordering::SeqCst), 1);
    }

    fn contact_body() -> Value {
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Hiring",
            "message": "Are you available?",
        })
    }

    #[tokio::test]
    async fn contact_sends_one_email() {
        let harness = Harness::new();
        let resp = harness
            .router()
            .oneshot(post_json("/contact", &contact_body(), "10.0.0.8:1"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Message sent successfully");

        let sent = harness.mail.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to, "ada@example.com");
        assert_eq!(sent[0].to, vec!["owner@example.com".to_string()]);
        assert_eq!(sent[0].subject, "Portfolio Contact: Hiring");
    }

    #[tokio::test]
    async fn contact_missing_field_sends_nothing() {
        let harness = Harness::new();
        for field in ["name", "email", "subject", "message"] {
            let mut body = contact_body();
            body.as_object_mut().unwrap().remove(field);
            let resp = harness
                .router()
                .oneshot(post_json("/contact", &body, "10.0.0.9:1"))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(resp).await["error"], "All fields are required");
        }
        assert!(harness.mail.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn contact_without_email_service_is_500() {
        let harness = Harness::build(None, false, false);
        let resp = harness
            .router()
            .oneshot(post_json("/contact", &contact_body(), "10.0.0.10:1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(resp).await["error"],
            "Email service is not configured"
        );
    }

    #[tokio::test]
    async fn contact_provider_failure_is_generic() {
        let harness = Harness::build(None, true, true);
        let resp = harness
            .router()
            .oneshot(post_json("/contact", &contact_body(), "10.0.0.11:1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(resp).await["error"],
            "Failed to send message. Please try again later."
        );
        assert_eq!(harness.mail.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/ask")
            .header(header::ORIGIN, "https://portfolio.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let resp = Harness::new().router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn other_methods_on_ask_do_not_spend_quota() {
        let harness = Harness::new();
        for _ in 0..11 {
            let mut req = Request::builder()
                .method("GET")
                .uri("/ask")
                .body(Body::empty())
                .unwrap();
            req.extensions_mut()
                .insert(ConnectInfo("10.0.0.12:1".parse::<SocketAddr>().unwrap()));

            let resp = harness.router().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert!(!resp.headers().contains_key(RATELIMIT_REMAINING));
        }

        let resp = harness
            .router()
            .oneshot(post_json("/ask", &ask_body(), "10.0.0.12:1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[RATELIMIT_REMAINING], "9");
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn rejected_requests_are_logged() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let harness = Harness::new();
        let resp = harness
            .router()
            .oneshot(post_json("/ask", &json!({"question": "q"}), "10.0.0.13:1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = harness
            .router()
            .oneshot(post_json("/contact", &json!({"name": "Ada"}), "10.0.0.13:1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(
            output.contains("/ask rejected: Messages array is required"),
            "{}",
            output
        );
        assert!(
            output.contains("/contact rejected: All fields are required"),
            "{}",
            output
        );
    }

    #[tokio::test]
    async fn openai_error_message_reaches_ask_response() {
        let (base, received) = spawn_canned(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"You exceeded your current quota"}}"#,
            "/v1",
        )
        .await;
        let provider =
            OpenAiProvider::new(Some("sk-test".to_string()), &base, Duration::from_secs(5))
                .unwrap();
        let prompt = PromptConfig {
            system_prompt: "persona".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 200,
        };
        let state = AppState {
            llm: LlmClient::new(Arc::new(provider), &prompt),
            mailer: None,
            rate_limiter: Arc::new(RateLimiter::new(Duration::from_secs(15 * 60), 10)),
            trust_proxy: 0,
        };

        let resp = app(state, &AllowedOrigins::Any)
            .oneshot(post_json("/ask", &ask_body(), "10.0.0.14:1"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error = json_body(resp).await["error"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        assert!(error.contains("You exceeded your current quota"), "{}", error);

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].body["max_tokens"], 200);
        assert_eq!(received[0].body["messages"][1]["content"], "What are your skills?");
    }
}

