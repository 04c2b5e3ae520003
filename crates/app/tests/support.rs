#![allow(dead_code)]

use serde_json::{json, Value};
use ticketboard_domain::Config;
use ticketboard_lib::context::AppContext;
use wiremock::MockServer;

/// Context wired to `server` with fast retries.
pub fn context_for(server: &MockServer) -> AppContext {
    context_with_base_url(&server.uri())
}

/// Context pointing at a port nothing listens on.
pub fn unreachable_context() -> AppContext {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    context_with_base_url(&format!("http://127.0.0.1:{port}"))
}

fn context_with_base_url(base_url: &str) -> AppContext {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.base_backoff_ms = 1;
    config.reports.page_size = 2;
    AppContext::new_with_config(config).expect("failed to build application context")
}

pub fn issue_json(id: u64, status: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Customer {id}"),
        "source": "Email",
        "issue_type": "system",
        "status": status,
        "created_at": created_at,
    })
}
