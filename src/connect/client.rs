//! Authenticated GET calls against the App Store Connect API.

use std::time::Duration;

use serde_json::Value;

use super::error::ConnectError;
use super::token::TokenIssuer;

const API_BASE_URL: &str = "https://api.appstoreconnect.apple.com";

/// Field holding the structured error list in App Store Connect error
/// bodies.
const ERRORS_FIELD: &str = "errors";

/// HTTP client for the catalog API. Every call attaches a bearer token
/// obtained fresh from the issuer, which may hand back a cached one.
pub struct ConnectClient {
    http: reqwest::Client,
    issuer: TokenIssuer,
    base_url: String,
}

impl ConnectClient {
    pub fn new(issuer: TokenIssuer, timeout: Duration) -> Result<Self, ConnectError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            issuer,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// GET `path` with `query`. Non-2xx responses become
    /// [`ConnectError::CatalogHttp`] carrying the service's structured error
    /// list verbatim when the body parses as JSON, the raw body text
    /// otherwise. No retries happen at this layer.
    pub async fn get(&mut self, path: &str, query: &[(&str, &str)]) -> Result<Value, ConnectError> {
        let token = self.issuer.token()?;
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::CatalogHttp {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pull the `errors` array out of an error body, falling back to the raw
/// text when the body is not JSON or has no such field.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(parsed) => match parsed.get(ERRORS_FIELD) {
            Some(errors) => errors.to_string(),
            None => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_extracts_structured_errors() {
        let body = r#"{"errors":[{"status":"403","title":"FORBIDDEN","detail":"no access"}]}"#;
        let detail = error_detail(body);
        assert!(detail.starts_with('['));
        assert!(detail.contains("FORBIDDEN"));
        assert!(detail.contains("no access"));
    }

    #[test]
    fn test_error_detail_keeps_raw_text_without_errors_field() {
        let body = r#"{"message":"gateway timeout"}"#;
        assert_eq!(error_detail(body), body);
    }

    #[test]
    fn test_error_detail_keeps_non_json_body() {
        let body = "<html>502 Bad Gateway</html>";
        assert_eq!(error_detail(body), body);
    }
}
