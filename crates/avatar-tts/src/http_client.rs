use std::time::Duration;

use reqwest::Client;

use crate::error::TtsError;

/// HTTP client shared by every call a speech provider makes
pub fn http_client() -> Result<Client, TtsError> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(Duration::from_secs(120))
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
        .map_err(|e| TtsError::ConfigError(format!("failed to build HTTP client: {e}")))
}
