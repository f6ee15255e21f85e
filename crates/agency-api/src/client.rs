// Async HTTP client for the agency REST backend.
//
// Every endpoint follows `{base_url}{api_prefix}/{collection}[/{id}[/status]]`.
// Auth: optional `Authorization: Bearer <token>` for admin calls.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::MutationAck;
use crate::transport::TransportConfig;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the agency backend.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    prefix: Vec<String>,
    timeout: Option<Duration>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a backend URL, API prefix, optional admin token and
    /// transport config.
    pub fn new(
        base_url: &str,
        api_prefix: &str,
        token: Option<&SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| Error::InvalidToken {
                    message: format!("invalid header value: {e}"),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = transport.build_client_with_headers(headers)?;
        let mut client = Self::with_client(http, Url::parse(base_url)?, api_prefix)?;
        client.timeout = Some(transport.timeout);
        Ok(client)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(http: reqwest::Client, base_url: Url, api_prefix: &str) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::CannotBeABase(base_url.to_string()));
        }
        let prefix = api_prefix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(Self {
            http,
            base_url,
            prefix,
            timeout: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The API prefix in `/seg/seg` form (empty when there is none).
    pub fn api_prefix(&self) -> String {
        self.prefix.iter().map(|s| format!("/{s}")).collect()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append `{prefix}/{segments..}` to the base URL. Segments are
    /// percent-encoded individually, so ids may contain any character.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(self.prefix.iter().map(String::as_str));
            path.extend(segments);
        }
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get(&self, url: Url) -> Result<Value, Error> {
        debug!("GET {url}");
        let resp = self.send(self.http.get(url)).await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post_json<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Value, Error> {
        debug!("POST {url}");
        let resp = self.send(self.http.post(url).json(body)).await?;
        Self::handle_lenient(resp).await
    }

    pub(crate) async fn post_multipart(&self, url: Url, form: Form) -> Result<Value, Error> {
        debug!("POST {url} (multipart)");
        let resp = self.send(self.http.post(url).multipart(form)).await?;
        Self::handle_lenient(resp).await
    }

    pub(crate) async fn put_json<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Value, Error> {
        debug!("PUT {url}");
        let resp = self.send(self.http.put(url).json(body)).await?;
        Self::handle_lenient(resp).await
    }

    pub(crate) async fn put_multipart(&self, url: Url, form: Form) -> Result<Value, Error> {
        debug!("PUT {url} (multipart)");
        let resp = self.send(self.http.put(url).multipart(form)).await?;
        Self::handle_lenient(resp).await
    }

    pub(crate) async fn patch_json<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Value, Error> {
        debug!("PATCH {url}");
        let resp = self.send(self.http.patch(url).json(body)).await?;
        Self::handle_lenient(resp).await
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<Value, Error> {
        debug!("DELETE {url}");
        let resp = self.send(self.http.delete(url)).await?;
        Self::handle_lenient(resp).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        request.send().await.map_err(|e| match self.timeout {
            Some(timeout) if e.is_timeout() => Error::Timeout {
                timeout_secs: timeout.as_secs(),
            },
            _ => Error::Transport(e),
        })
    }

    // ── Response handling ────────────────────────────────────────────

    /// 2xx body must be JSON.
    async fn handle_response(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// 2xx body may be empty or not JSON; that yields `Value::Null`.
    async fn handle_lenient(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
                debug!(error = %e, "ignoring non-JSON success body");
                Value::Null
            }))
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message =
            error_message(&raw).unwrap_or_else(|| format!("HTTP status {}", status.as_u16()));
        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}

// ── Envelope helpers ─────────────────────────────────────────────────

/// Pull a human readable message out of an error body:
/// `{"message": ".."}`, `{"error": ".."}` or `{"error": {"message": ".."}}`.
pub(crate) fn error_message(raw: &str) -> Option<String> {
    let Value::Object(map) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };
    ["message", "error", "msg"]
        .iter()
        .find_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Some(Value::Object(inner)) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        })
}

/// Accept a bare array or a `{data: [...]}` envelope.
pub(crate) fn unwrap_list(body: Value) -> Result<Vec<Value>, Error> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(Error::Deserialization {
                message: "expected a JSON array or a {data: [...]} envelope".into(),
                body: Value::Object(map).to_string(),
            }),
        },
        other => Err(Error::Deserialization {
            message: "expected a JSON array or a {data: [...]} envelope".into(),
            body: other.to_string(),
        }),
    }
}

/// Accept a bare record or a `{data: {...}}` envelope.
pub(crate) fn unwrap_record(body: Value) -> Option<Value> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner @ Value::Object(_)) => Some(inner),
            Some(other) => {
                map.insert("data".into(), other);
                Some(Value::Object(map))
            }
            None => Some(Value::Object(map)),
        },
        _ => None,
    }
}

/// Decode each record on its own; a record that is not an object is
/// skipped so one bad entry never fails the whole list.
pub(crate) fn decode_records<T: DeserializeOwned>(collection: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                warn!(collection, index, "skipping non-object record");
                return None;
            }
            match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(collection, index, error = %e, "skipping undecodable record");
                    None
                }
            }
        })
        .collect()
}

/// Acknowledgement from a mutation body; missing or odd bodies give the
/// default (no message).
pub(crate) fn ack(body: Value) -> MutationAck {
    unwrap_record(body)
        .and_then(|record| serde_json::from_value(record).ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn client(base: &str, prefix: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap(), prefix).unwrap()
    }

    #[test]
    fn url_joins_prefix_and_segments() {
        let c = client("https://agency.test", "/api");
        assert_eq!(
            c.url(&["blogs", "abc", "status"]).as_str(),
            "https://agency.test/api/blogs/abc/status"
        );
    }

    #[test]
    fn url_keeps_base_path_and_encodes_ids() {
        let c = client("https://agency.test/backend/", "api/v2/");
        assert_eq!(
            c.url(&["contacts", "a b/c"]).as_str(),
            "https://agency.test/backend/api/v2/contacts/a%20b%2Fc"
        );
        assert_eq!(c.api_prefix(), "/api/v2");
    }

    #[test]
    fn empty_prefix_is_allowed() {
        let c = client("http://localhost:5000", "");
        assert_eq!(c.url(&["services"]).as_str(), "http://localhost:5000/services");
    }

    #[test]
    fn error_message_shapes() {
        assert_eq!(error_message(r#"{"message":"Not allowed"}"#).as_deref(), Some("Not allowed"));
        assert_eq!(error_message(r#"{"error":"Bad id"}"#).as_deref(), Some("Bad id"));
        assert_eq!(
            error_message(r#"{"error":{"message":"nested"}}"#).as_deref(),
            Some("nested")
        );
        assert_eq!(error_message("<html>oops</html>"), None);
        assert_eq!(error_message(r#"{"message":"  "}"#), None);
    }

    #[test]
    fn list_envelopes() {
        assert_eq!(unwrap_list(json!([1, 2])).unwrap().len(), 2);
        assert_eq!(unwrap_list(json!({"data": [1]})).unwrap().len(), 1);
        assert!(unwrap_list(json!({"items": []})).is_err());
        assert!(unwrap_list(json!("nope")).is_err());
    }

    #[test]
    fn record_envelopes() {
        assert_eq!(
            unwrap_record(json!({"data": {"status": "read"}})),
            Some(json!({"status": "read"}))
        );
        assert_eq!(
            unwrap_record(json!({"status": "hired"})),
            Some(json!({"status": "hired"}))
        );
        assert_eq!(unwrap_record(json!(null)), None);
    }

    #[test]
    fn ack_tolerates_anything() {
        assert_eq!(ack(json!({"message": "Deleted"})).message.as_deref(), Some("Deleted"));
        assert_eq!(ack(Value::Null).message, None);
        assert_eq!(ack(json!([1, 2])).message, None);
    }
}
