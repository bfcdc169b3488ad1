use reqwest::Client;
use std::time::Duration;

/// Shared reqwest client with a request timeout and a product user agent.
pub fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(concat!("cinelog/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Read a non-success response into (status, body) for error reporting.
pub async fn error_parts(response: reqwest::Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    (status, body)
}
