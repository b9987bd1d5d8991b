/// Client address derivation behind reverse proxies
pub mod client_ip;
/// API error types and handling
pub mod errors;
/// HTTP handlers for the liveness, chat and contact endpoints
pub mod handlers;
/// Rate limiting middleware for the chat route
pub mod middleware;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;
/// Shared handler state
pub mod state;
