pub mod image;

use std::sync::Mutex;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::bridge::RequestKind;
use crate::config::FaceConfig;
use crate::error::{Error, Result};
use image::Payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Snapshot of the most recent outgoing call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub kind: RequestKind,
    pub method: Method,
    pub url: String,
    pub content_type: String,
    /// Query parameters as a JSON object string, unset values as nulls.
    pub parameters: String,
    pub body: Vec<u8>,
}

/// Snapshot of the most recent response, successful or not.
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Default)]
struct Exchange {
    request: Option<RecordedRequest>,
    response: Option<RecordedResponse>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

/// Client for the Face API. Holds the credentials, the HTTP agent, and a
/// single-slot request/response scratch pad overwritten on every call.
pub struct FaceClient {
    agent: ureq::Agent,
    config: FaceConfig,
    exchange: Mutex<Exchange>,
}

impl FaceClient {
    pub fn new(config: FaceConfig) -> Self {
        Self {
            agent: ureq::agent(),
            config,
            exchange: Mutex::new(Exchange::default()),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(FaceConfig::from_env()?))
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// The most recent request sent through this client, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.exchange.lock().unwrap().request.clone()
    }

    /// The most recent response received, including error responses.
    pub fn last_response(&self) -> Option<RecordedResponse> {
        self.exchange.lock().unwrap().response.clone()
    }

    /// Send one call. Relative paths resolve against the configured endpoint;
    /// absolute URLs pass through untouched (plain `http://` is accepted in
    /// addition to `https://`). Exactly 200 and 202 count as success,
    /// everything else becomes `Error::Api`.
    pub(crate) fn request(
        &self,
        kind: RequestKind,
        method: Method,
        path: &str,
        query: &[(&str, Option<String>)],
        payload: Payload,
    ) -> Result<Value> {
        let url = if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.endpoint, path)
        };

        let content_type = payload.content_type();
        self.record_request(kind, method, &url, content_type, query, &payload);

        let mut request = self
            .agent
            .request(method.as_str(), &url)
            .set("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .set("Content-Type", content_type);
        for (name, value) in query {
            if let Some(value) = value {
                request = request.query(name, value);
            }
        }

        debug!(method = method.as_str(), url = %url, "face api call");

        let outcome = match payload {
            Payload::Empty => request.call(),
            Payload::Json(value) => request.send_string(&value.to_string()),
            Payload::Binary(data) => request.send_bytes(&data),
        };

        match outcome {
            Ok(response) => {
                let status = response.status();
                let text = response.into_string()?;
                self.record_response(status, &text);
                // ureq only errors on >= 400; the service contract is
                // stricter, exactly 200 and 202 are success.
                if status != 200 && status != 202 {
                    return Err(api_error(status, text));
                }
                if text.is_empty() {
                    Ok(Value::Object(serde_json::Map::new()))
                } else {
                    Ok(serde_json::from_str(&text)?)
                }
            }
            Err(ureq::Error::Status(status, response)) => {
                let text = response.into_string().unwrap_or_default();
                self.record_response(status, &text);
                Err(api_error(status, text))
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(Error::Transport(transport.to_string()))
            }
        }
    }

    fn record_request(
        &self,
        kind: RequestKind,
        method: Method,
        url: &str,
        content_type: &str,
        query: &[(&str, Option<String>)],
        payload: &Payload,
    ) {
        let mut parameters = serde_json::Map::new();
        for (name, value) in query {
            let value = match value {
                Some(v) => Value::String(v.clone()),
                None => Value::Null,
            };
            parameters.insert((*name).to_string(), value);
        }

        let body = match payload {
            Payload::Empty => Vec::new(),
            Payload::Json(value) => value.to_string().into_bytes(),
            Payload::Binary(data) => data.clone(),
        };

        let mut exchange = self.exchange.lock().unwrap();
        exchange.request = Some(RecordedRequest {
            kind,
            method,
            url: url.to_string(),
            content_type: content_type.to_string(),
            parameters: Value::Object(parameters).to_string(),
            body,
        });
        exchange.response = None;
    }

    fn record_response(&self, status: u16, body: &str) {
        self.exchange.lock().unwrap().response = Some(RecordedResponse {
            status,
            body: body.to_string(),
        });
    }
}

fn api_error(status: u16, text: String) -> Error {
    match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => Error::Api {
            status,
            code: body.error.code.unwrap_or_else(|| status.to_string()),
            message: body.error.message.unwrap_or_default(),
        },
        Err(_) => Error::Api {
            status,
            code: status.to_string(),
            message: text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> FaceClient {
        FaceClient::new(FaceConfig::new("test-key", server.url()))
    }

    #[test]
    fn success_parses_json_and_records_exchange() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/persongroups/unit")
            .match_header("ocp-apim-subscription-key", "test-key")
            .with_status(200)
            .with_body(r#"{"personGroupId": "unit", "name": "Unit"}"#)
            .create();

        let client = client_for(&server);
        let value = client
            .request(
                RequestKind::PersonGroupGet,
                Method::Get,
                "persongroups/unit",
                &[],
                Payload::Empty,
            )
            .unwrap();

        mock.assert();
        assert_eq!(value["personGroupId"], "unit");

        let request = client.last_request().unwrap();
        assert_eq!(request.kind, RequestKind::PersonGroupGet);
        assert_eq!(request.method, Method::Get);
        assert!(request.url.ends_with("/persongroups/unit"));

        let response = client.last_response().unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.contains("personGroupId"));
    }

    #[test]
    fn accepted_with_empty_body_is_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/persongroups/unit/train")
            .with_status(202)
            .with_body("")
            .create();

        let client = client_for(&server);
        let value = client
            .request(
                RequestKind::PersonGroupTrain,
                Method::Post,
                "persongroups/unit/train",
                &[],
                Payload::Empty,
            )
            .unwrap();

        mock.assert();
        assert_eq!(value, serde_json::json!({}));
        assert_eq!(client.last_response().unwrap().status, 202);
    }

    #[test]
    fn off_contract_2xx_status_is_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/persongroups/unit")
            .with_status(206)
            .with_body("{}")
            .create();

        let client = client_for(&server);
        let err = client
            .request(
                RequestKind::PersonGroupGet,
                Method::Get,
                "persongroups/unit",
                &[],
                Payload::Empty,
            )
            .unwrap_err();

        match err {
            Error::Api { status, .. } => assert_eq!(status, 206),
            other => panic!("expected api error, got {other:?}"),
        }
        assert_eq!(client.last_response().unwrap().status, 206);
    }

    #[test]
    fn service_error_body_maps_to_api_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/persongroups/missing")
            .with_status(404)
            .with_body(r#"{"error": {"code": "PersonGroupNotFound", "message": "Person group is not found."}}"#)
            .create();

        let client = client_for(&server);
        let err = client
            .request(
                RequestKind::PersonGroupGet,
                Method::Get,
                "persongroups/missing",
                &[],
                Payload::Empty,
            )
            .unwrap_err();

        match err {
            Error::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, "PersonGroupNotFound");
                assert_eq!(message, "Person group is not found.");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_error_body_falls_back_to_raw_text() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/persongroups/broken")
            .with_status(500)
            .with_body("internal server error")
            .create();

        let client = client_for(&server);
        let err = client
            .request(
                RequestKind::PersonGroupGet,
                Method::Get,
                "persongroups/broken",
                &[],
                Payload::Empty,
            )
            .unwrap_err();

        match err {
            Error::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 500);
                assert_eq!(code, "500");
                assert_eq!(message, "internal server error");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn query_skips_unset_values_but_records_them() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/persongroups")
            .match_query(mockito::Matcher::UrlEncoded("top".into(), "10".into()))
            .with_status(200)
            .with_body("[]")
            .create();

        let client = client_for(&server);
        client
            .request(
                RequestKind::PersonGroupList,
                Method::Get,
                "persongroups",
                &[("start", None), ("top", Some("10".to_string()))],
                Payload::Empty,
            )
            .unwrap();

        mock.assert();
        let parameters: Value =
            serde_json::from_str(&client.last_request().unwrap().parameters).unwrap();
        assert_eq!(parameters["start"], Value::Null);
        assert_eq!(parameters["top"], "10");
    }

    #[test]
    fn scratch_pad_is_overwritten_each_call() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/persongroups/a")
            .with_status(200)
            .with_body("{}")
            .create();
        server
            .mock("GET", "/persongroups/b")
            .with_status(200)
            .with_body("{}")
            .create();

        let client = client_for(&server);
        for id in ["a", "b"] {
            client
                .request(
                    RequestKind::PersonGroupGet,
                    Method::Get,
                    &format!("persongroups/{id}"),
                    &[],
                    Payload::Empty,
                )
                .unwrap();
        }

        assert!(client.last_request().unwrap().url.ends_with("/persongroups/b"));
    }
}
