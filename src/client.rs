//! API client: request building, retries and status mapping.

use log::debug;
use reqwest::Client as ReqwestClient;
use serde_json::Value;

use crate::config::Config;
use crate::error::{ApiError, Error, Result, TIMEOUT_STATUS};
use crate::http::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport, with_retry};
use crate::resources::{Account, BatchStatus, Verification};

const USER_AGENT: &str = concat!("blazeverify-rust/", env!("BLAZEVERIFY_VERSION"));

/// A successful (2xx) API response with its decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// Optional parameters for [`Client::verify`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Run the SMTP check. The server default is `true`.
    pub smtp: Option<bool>,
    /// Run the accept-all check. The server default is `true`.
    pub accept_all: Option<bool>,
    /// Seconds the server may spend before answering with a timeout.
    pub timeout: Option<u32>,
}

impl VerifyOptions {
    fn to_params(self, email: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![("email", email.to_string())];
        if let Some(smtp) = self.smtp {
            params.push(("smtp", smtp.to_string()));
        }
        if let Some(accept_all) = self.accept_all {
            params.push(("accept_all", accept_all.to_string()));
        }
        if let Some(timeout) = self.timeout {
            params.push(("timeout", timeout.to_string()));
        }
        params
    }
}

/// Client for the verification API.
pub struct Client<T: Transport = ReqwestTransport> {
    config: Config,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Creates a client backed by a fresh reqwest connection pool.
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = ReqwestClient::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_transport(config, ReqwestTransport::new(client))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: Config, transport: T) -> Result<Self> {
        config.validate()?;
        debug!("Using API key {} against {}", config.masked_api_key(), config.base_url);
        Ok(Self { config, transport })
    }

    /// Performs one API call.
    ///
    /// The API key is always sent in the query string. For `GET` the params
    /// follow it there; for `POST` they form a URL-encoded body. Timeouts,
    /// connection failures and 409 responses are retried according to the
    /// config; transport failures that outlast the retries are returned as
    /// [`Error::Transport`]. Status 249 becomes an [`ApiErrorKind::Timeout`]
    /// error carrying the raw body, and any other non-2xx status is mapped
    /// with [`ApiErrorKind::from_status`].
    ///
    /// [`ApiErrorKind::Timeout`]: crate::ApiErrorKind::Timeout
    /// [`ApiErrorKind::from_status`]: crate::ApiErrorKind::from_status
    #[tracing::instrument(skip(self, params))]
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse> {
        let request = self.build_request(method, endpoint, params);
        let operation_name = format!("{} {}", method, endpoint);

        let response = with_retry(&operation_name, &self.config.retry_policy(), || {
            self.transport.send(&request)
        })
        .await?;

        into_api_response(response)
    }

    fn build_request(&self, method: Method, endpoint: &str, params: &[(&str, String)]) -> HttpRequest {
        let params: Vec<(String, String)> = params
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();

        let mut query = vec![("api_key".to_string(), self.config.api_key.clone())];
        let mut form = Vec::new();
        match method {
            Method::Get => query.extend(params),
            Method::Post => form = params,
        }

        HttpRequest {
            method,
            url: self.config.endpoint_url(endpoint),
            query,
            form,
        }
    }

    /// Verifies a single email address.
    #[tracing::instrument(skip(self))]
    pub async fn verify(&self, email: &str, options: VerifyOptions) -> Result<Verification> {
        let response = self
            .request(Method::Get, "verify", &options.to_params(email))
            .await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Fetches the account tied to the API key.
    #[tracing::instrument(skip(self))]
    pub async fn account(&self) -> Result<Account> {
        let response = self.request(Method::Get, "account", &[]).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Fetches the status of a batch created earlier. With `partial`, results
    /// are returned before the whole batch has finished.
    #[tracing::instrument(skip(self))]
    pub async fn batch_status(&self, id: &str, partial: bool) -> Result<BatchStatus> {
        let mut params = vec![("id", id.to_string())];
        if partial {
            params.push(("partial", "true".to_string()));
        }
        let response = self.request(Method::Get, "batch", &params).await?;
        Ok(serde_json::from_value(response.body)?)
    }
}

/// Maps a final response to a decoded body or a typed error.
fn into_api_response(response: HttpResponse) -> Result<ApiResponse> {
    let status = response.status;

    if status == TIMEOUT_STATUS {
        return Err(ApiError::new(status, response.body).into());
    }

    if (200..300).contains(&status) {
        let body = response.json()?;
        return Ok(ApiResponse { status, body });
    }

    let message = response
        .json()
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(response.body);

    debug!("API returned HTTP {}: {}", status, message);
    Err(ApiError::new(status, message).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::http::{MockTransport, TransportError};
    use mockall::Sequence;
    use serde_json::json;

    fn config() -> Config {
        Config::new("test_key")
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.to_string(),
        }
    }

    fn connect_error() -> TransportError {
        TransportError::Connect(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }

    #[test]
    fn test_verify_options_to_params() {
        let params = VerifyOptions::default().to_params("a@b.c");
        assert_eq!(params, vec![("email", "a@b.c".to_string())]);

        let options = VerifyOptions {
            smtp: Some(false),
            accept_all: Some(true),
            timeout: Some(10),
        };
        assert_eq!(
            options.to_params("a@b.c"),
            vec![
                ("email", "a@b.c".to_string()),
                ("smtp", "false".to_string()),
                ("accept_all", "true".to_string()),
                ("timeout", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_with_transport_rejects_empty_key() {
        let result = Client::with_transport(Config::new(""), MockTransport::new());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_build_get_request() {
        let client = Client::with_transport(config(), MockTransport::new()).unwrap();
        let request =
            client.build_request(Method::Get, "verify", &[("email", "a@b.c".to_string())]);

        assert_eq!(request.url, "https://api.blazeverify.com/v1/verify");
        assert_eq!(
            request.query,
            vec![
                ("api_key".to_string(), "test_key".to_string()),
                ("email".to_string(), "a@b.c".to_string()),
            ]
        );
        assert!(request.form.is_empty());
    }

    #[test]
    fn test_build_post_request() {
        let client = Client::with_transport(config(), MockTransport::new()).unwrap();
        let request = client.build_request(Method::Post, "batch", &[("emails", "a@b.c".to_string())]);

        assert_eq!(
            request.query,
            vec![("api_key".to_string(), "test_key".to_string())]
        );
        assert_eq!(
            request.form,
            vec![("emails".to_string(), "a@b.c".to_string())]
        );
    }

    #[tokio::test]
    async fn test_request_success_returns_body() {
        for status in [200, 201, 299] {
            let mut transport = MockTransport::new();
            transport
                .expect_send()
                .times(1)
                .returning(move |_| Ok(json_response(status, r#"{"state":"deliverable"}"#)));

            let client = Client::with_transport(config(), transport).unwrap();
            let response = client.request(Method::Get, "verify", &[]).await.unwrap();

            assert_eq!(response.status, status);
            assert_eq!(response.body, json!({ "state": "deliverable" }));
        }
    }

    #[tokio::test]
    async fn test_request_no_content_returns_null_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(json_response(204, "")));

        let client = Client::with_transport(config(), transport).unwrap();
        let response = client.request(Method::Get, "account", &[]).await.unwrap();

        assert_eq!(response.status, 204);
        assert_eq!(response.body, Value::Null);
    }

    #[tokio::test]
    async fn test_request_timeout_status() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 249,
                content_type: Some("text/plain".to_string()),
                body: "Verification is taking longer than expected".to_string(),
            })
        });

        let client = Client::with_transport(config(), transport).unwrap();
        let err = client.request(Method::Get, "verify", &[]).await.unwrap_err();

        match err {
            Error::Api(e) => {
                assert_eq!(e.kind, ApiErrorKind::Timeout);
                assert_eq!(e.code, 249);
                assert_eq!(e.message, "Verification is taking longer than expected");
            }
            other => panic!("Expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_maps_error_statuses() {
        let cases = [
            (400, ApiErrorKind::BadRequest),
            (401, ApiErrorKind::Unauthorized),
            (402, ApiErrorKind::PaymentRequired),
            (403, ApiErrorKind::Forbidden),
            (404, ApiErrorKind::NotFound),
            (429, ApiErrorKind::TooManyRequests),
            (500, ApiErrorKind::InternalServer),
            (503, ApiErrorKind::ServiceUnavailable),
            (418, ApiErrorKind::UnexpectedStatus),
            (502, ApiErrorKind::UnexpectedStatus),
        ];

        for (status, kind) in cases {
            let mut transport = MockTransport::new();
            transport
                .expect_send()
                .times(1)
                .returning(move |_| Ok(json_response(status, r#"{"message":"nope"}"#)));

            let client = Client::with_transport(config(), transport).unwrap();
            let err = client.request(Method::Get, "account", &[]).await.unwrap_err();

            assert_eq!(err.kind(), Some(kind), "status {}", status);
            assert_eq!(err.code(), Some(status));
            match err {
                Error::Api(e) => assert_eq!(e.message, "nope"),
                other => panic!("Expected API error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_request_error_without_message_uses_raw_body() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 500,
                content_type: Some("text/html".to_string()),
                body: "<h1>oops</h1>".to_string(),
            })
        });

        let client = Client::with_transport(config(), transport).unwrap();
        let err = client.request(Method::Get, "account", &[]).await.unwrap_err();

        match err {
            Error::Api(e) => {
                assert_eq!(e.kind, ApiErrorKind::InternalServer);
                assert_eq!(e.message, "<h1>oops</h1>");
            }
            other => panic!("Expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_invalid_json_on_success_is_decode_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(json_response(200, "{not json")));

        let client = Client::with_transport(config(), transport).unwrap();
        let err = client.request(Method::Get, "account", &[]).await.unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_request_retries_connection_failure_once() {
        let mut transport = MockTransport::new();
        let mut seq = Sequence::new();
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(connect_error()));
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json_response(200, r#"{"available_credits":10}"#)));

        let client = Client::with_transport(config(), transport).unwrap();
        let response = client.request(Method::Get, "account", &[]).await.unwrap();

        assert_eq!(response.body["available_credits"], 10);
    }

    #[tokio::test]
    async fn test_request_gives_up_after_retries() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(2)
            .returning(|_| Err(connect_error()));

        let client = Client::with_transport(config(), transport).unwrap();
        let err = client.request(Method::Get, "account", &[]).await.unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Connect(_))));
    }

    #[tokio::test]
    async fn test_request_does_not_retry_other_transport_errors() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Err(TransportError::Request(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "invalid argument",
            ))))
        });

        let client = Client::with_transport(config(), transport).unwrap();
        let err = client.request(Method::Get, "account", &[]).await.unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Request(_))));
    }

    #[tokio::test]
    async fn test_request_does_not_retry_error_statuses() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(json_response(503, r#"{"message":"down"}"#)));

        let client = Client::with_transport(config(), transport).unwrap();
        let err = client.request(Method::Get, "account", &[]).await.unwrap_err();

        assert_eq!(err.kind(), Some(ApiErrorKind::ServiceUnavailable));
    }

    #[tokio::test]
    async fn test_request_retries_conflict() {
        let mut transport = MockTransport::new();
        let mut seq = Sequence::new();
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json_response(409, r#"{"message":"conflict"}"#)));
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json_response(200, "{}")));

        let client = Client::with_transport(config(), transport).unwrap();
        assert!(client.request(Method::Get, "account", &[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_request_conflict_after_retries_is_unexpected_status() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(3)
            .returning(|_| Ok(json_response(409, r#"{"message":"conflict"}"#)));

        let client =
            Client::with_transport(config().with_max_network_retries(2), transport).unwrap();
        let err = client.request(Method::Get, "account", &[]).await.unwrap_err();

        assert_eq!(err.kind(), Some(ApiErrorKind::UnexpectedStatus));
        assert_eq!(err.code(), Some(409));
    }

    #[tokio::test]
    async fn test_verify_sends_email_and_options() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == Method::Get
                    && request.url == "https://api.blazeverify.com/v1/verify"
                    && request.query
                        == vec![
                            ("api_key".to_string(), "test_key".to_string()),
                            ("email".to_string(), "test@example.com".to_string()),
                            ("smtp".to_string(), "false".to_string()),
                        ]
            })
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"status":"valid"}"#)));

        let client = Client::with_transport(config(), transport).unwrap();
        let options = VerifyOptions {
            smtp: Some(false),
            ..Default::default()
        };
        let verification = client.verify("test@example.com", options).await.unwrap();

        assert_eq!(verification.status(), Some("valid"));
    }

    #[tokio::test]
    async fn test_verify_non_object_body_is_decode_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(json_response(200, r#"["unexpected"]"#)));

        let client = Client::with_transport(config(), transport).unwrap();
        let err = client
            .verify("test@example.com", VerifyOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_batch_status_sends_id_and_partial() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.url.ends_with("/batch")
                    && request.query.contains(&("id".to_string(), "abc123".to_string()))
                    && request.query.contains(&("partial".to_string(), "true".to_string()))
            })
            .times(1)
            .returning(|_| Ok(json_response(200, r#"{"message":"Batch verification completed.","processed":1,"total":1}"#)));

        let client = Client::with_transport(config(), transport).unwrap();
        let status = client.batch_status("abc123", true).await.unwrap();

        assert!(status.is_complete());
    }
}
