use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    Config,
    error::{TransportError, truncate_body},
};

pub(crate) fn build_client(config: &Config) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(TransportError::Client)
}

/// Single GET returning the body of a successful response.
///
/// `url` is reported without its query string, so credentials passed as
/// query parameters never reach logs or error messages.
pub(crate) async fn get_text(
    http: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<String, TransportError> {
    debug!(url, "GET");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| TransportError::Request {
            url: url.to_string(),
            source: source.without_url(),
        })?;

    let status = res.status();
    let body = res.text().await.map_err(|source| TransportError::Request {
        url: url.to_string(),
        source: source.without_url(),
    })?;

    if !status.is_success() {
        warn!(url, %status, "non-success response");
        return Err(TransportError::Status {
            url: url.to_string(),
            status,
            body: truncate_body(&body),
        });
    }

    Ok(body)
}
