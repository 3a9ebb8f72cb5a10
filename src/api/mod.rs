use std::time::Duration;

use reqwest::{
    Client,
    Response,
};
use serde::{
    de::DeserializeOwned,
    Deserialize,
    Serialize,
};
use tokio::time::sleep;

use crate::core::ArchipelagoError;

pub mod auth;
pub mod concepts;
pub mod dictionary;
pub mod flashcards;
pub mod languages;
pub mod lemmas;
pub mod stats;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const API_PREFIX: &str = "/api/v1";
const RAW_BODY_PREVIEW_LEN: usize = 200;

/// Shared HTTP client for the Archipelago REST API. One instance per app;
/// cloning is cheap (the inner reqwest client is reference counted).
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ArchipelagoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ArchipelagoError::Custom(format!("HTTP client build failed: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ArchipelagoError> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ArchipelagoError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ArchipelagoError> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ArchipelagoError> {
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ArchipelagoError> {
        let response = self.client.delete(self.url(path)).send().await?;
        expect_success(response).await
    }

    /// POST that returns a raw payload (the PDF export) instead of JSON.
    pub(crate) async fn post_bytes<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Vec<u8>, ArchipelagoError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(error_from_response(status.as_u16(), &body));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ArchipelagoError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(error_from_response(status.as_u16(), &body));
    }

    // A 2xx body that doesn't fit the expected shape degrades to a visible
    // error, never a panic.
    serde_json::from_str(&body).map_err(|e| ArchipelagoError::MissingData(e.to_string()))
}

async fn expect_success(response: Response) -> Result<(), ArchipelagoError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(error_from_response(status.as_u16(), &body));
    }
    Ok(())
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Deserialize)]
struct FieldError {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl FieldError {
    fn render(&self) -> String {
        let loc: Vec<String> = self
            .loc
            .iter()
            .filter_map(|part| match part {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect();

        if loc.is_empty() {
            self.msg.clone()
        } else {
            format!("{}: {}", loc.join("."), self.msg)
        }
    }
}

/// Maps a non-2xx response to an error. Pure so the mapping is testable
/// without a server: the same status and body always produce the same
/// message.
pub(crate) fn error_from_response(status: u16, body: &str) -> ArchipelagoError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(detail) = parsed.detail {
            let message = match detail {
                ErrorDetail::Message(message) => message,
                ErrorDetail::Fields(fields) => {
                    fields.iter().map(FieldError::render).collect::<Vec<_>>().join("; ")
                }
            };
            return ArchipelagoError::Api { status, message };
        }
    }

    // Non-JSON body (proxy HTML page and the like): keep a truncated
    // preview so the status code is still diagnosable.
    let trimmed = body.trim();
    let preview: String = trimmed.chars().take(RAW_BODY_PREVIEW_LEN).collect();
    let suffix = if trimmed.chars().count() > RAW_BODY_PREVIEW_LEN { "..." } else { "" };
    ArchipelagoError::Api { status, message: format!("HTTP {}: {}{}", status, preview, suffix) }
}

/// Polls the languages endpoint until the server answers. Returns false
/// when every attempt failed.
pub async fn wait_for_server(
    client: &ApiClient,
    wait_time: u64,
    max_attempts: u32,
) -> Result<bool, ArchipelagoError> {
    for attempt in 1..=max_attempts {
        match languages::list(client).await {
            Ok(_) => {
                println!("Archipelago server is online at {}", client.base_url());
                return Ok(true);
            }
            Err(err) => {
                println!(
                    "Server attempt {} of {} failed. Retrying in {} seconds... Error: {}",
                    attempt, max_attempts, wait_time, err
                );
                if attempt < max_attempts {
                    sleep(Duration::from_secs(wait_time)).await;
                }
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(error: ArchipelagoError) -> (u16, String) {
        match error {
            ArchipelagoError::Api { status, message } => (status, message),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn string_detail_surfaces_verbatim() {
        let (status, message) = message_of(error_from_response(404, r#"{"detail": "Concept not found"}"#));
        assert_eq!(status, 404);
        assert_eq!(message, "Concept not found");
    }

    #[test]
    fn error_mapping_is_idempotent() {
        let body = r#"{"detail": "X"}"#;
        let first = message_of(error_from_response(422, body));
        let second = message_of(error_from_response(422, body));
        assert_eq!(first, second);
        assert_eq!(first.1, "X");
    }

    #[test]
    fn field_errors_are_joined() {
        let body = r#"{"detail": [
            {"loc": ["body", "term"], "msg": "field required"},
            {"loc": ["body", "level"], "msg": "invalid level"}
        ]}"#;
        let (_, message) = message_of(error_from_response(422, body));
        assert_eq!(message, "body.term: field required; body.level: invalid level");
    }

    #[test]
    fn numeric_loc_parts_are_kept() {
        let body = r#"{"detail": [{"loc": ["body", "language_codes", 0], "msg": "unknown code"}]}"#;
        let (_, message) = message_of(error_from_response(422, body));
        assert_eq!(message, "body.language_codes.0: unknown code");
    }

    #[test]
    fn non_json_body_is_truncated_with_status() {
        let body = "<html>".to_string() + &"x".repeat(500);
        let (status, message) = message_of(error_from_response(502, &body));
        assert_eq!(status, 502);
        assert!(message.starts_with("HTTP 502: <html>"));
        assert!(message.ends_with("..."));
        // "HTTP 502: " + 200-char preview + "..."
        assert_eq!(message.chars().count(), 10 + RAW_BODY_PREVIEW_LEN + 3);
    }

    #[test]
    fn json_body_without_detail_falls_back_to_preview() {
        let (_, message) = message_of(error_from_response(500, r#"{"error": "boom"}"#));
        assert!(message.starts_with("HTTP 500:"));
    }
}
