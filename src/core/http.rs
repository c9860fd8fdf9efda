//! HTTP client with request/response interceptors.
//!
//! [`ApiClient`] joins request paths with the configured base URL, runs the
//! interceptor chains, and delegates the actual call to a [`Transport`].
//! In the browser that is [`BrowserTransport`] (Fetch API via `gloo-net`);
//! tests plug in an in-memory transport.
//!
//! Failures are logged once and handed back to the caller untouched. There
//! is no retry.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use leptos::logging::error;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;
use web_sys::AbortController;

use crate::config::{ClientConfig, JSON_CONTENT_TYPE};
use crate::core::error::HttpError;

// =============================================================================
// Requests and Responses
// =============================================================================

/// HTTP method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Outgoing request as seen by request interceptors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path relative to the base URL, or an absolute `http(s)://` URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a percent-encoded path segment.
    pub fn segment(mut self, value: &str) -> Self {
        self.path = format!("{}/{}", self.path.trim_end_matches('/'), encode_segment(value));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, HttpError> {
        let text =
            serde_json::to_string(body).map_err(|e| HttpError::RequestCreation(e.to_string()))?;
        self.body = Some(text);
        Ok(self)
    }

    /// Header value, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value of the same name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }
}

/// Request after interceptors ran and the URL was resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

/// Response handed back by a [`Transport`].
///
/// `body` is the text body JSON-decoded once when possible, otherwise the
/// raw text as a [`Value::String`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

// =============================================================================
// Transport
// =============================================================================

/// Performs a prepared request.
///
/// Implementations return [`HttpError::Status`] for non-2xx responses and
/// enforce `request.timeout`.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>>;
}

/// Fetch API transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: PreparedRequest) -> Result<HttpResponse, HttpError> {
        let controller =
            AbortController::new().map_err(|e| HttpError::RequestCreation(format!("{:?}", e)))?;

        // Abort the fetch (and body read) once the timeout elapses
        let timed_out = Rc::new(Cell::new(false));
        let timer = {
            let controller = controller.clone();
            let timed_out = Rc::clone(&timed_out);
            let millis = u32::try_from(request.timeout.as_millis()).unwrap_or(u32::MAX);
            Timeout::new(millis, move || {
                timed_out.set(true);
                controller.abort();
            })
        };
        let signal = controller.signal();

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .abort_signal(Some(&signal));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let outgoing = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::RequestCreation(e.to_string()))?;

        let failed = |e: gloo_net::Error| {
            if timed_out.get() {
                HttpError::Timeout
            } else {
                HttpError::Network(e.to_string())
            }
        };

        let response = outgoing.send().await.map_err(failed)?;
        let status = response.status();
        let text = response.text().await.map_err(failed)?;
        drop(timer);

        if !response.ok() {
            return Err(HttpError::Status { status, body: text });
        }

        Ok(HttpResponse {
            status,
            body: decode_transport_body(text),
        })
    }
}

/// First decode of a text body: JSON when it parses, the raw text otherwise.
pub fn decode_transport_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
}

// =============================================================================
// Interceptors
// =============================================================================

/// Transforms every outgoing request.
pub type RequestInterceptor =
    Arc<dyn Fn(HttpRequest) -> Result<HttpRequest, HttpError> + Send + Sync>;

/// Transforms every successful response body.
pub type ResponseInterceptor = Arc<dyn Fn(Value) -> Result<Value, HttpError> + Send + Sync>;

/// Force the JSON content type onto a request.
pub fn json_content_type(mut request: HttpRequest) -> Result<HttpRequest, HttpError> {
    request.set_header("Content-Type", JSON_CONTENT_TYPE);
    Ok(request)
}

/// Parse bodies that arrive as JSON-encoded strings.
///
/// Empty strings and non-string values pass through unchanged.
pub fn decode_string_body(body: Value) -> Result<Value, HttpError> {
    match body {
        Value::String(text) if !text.is_empty() => {
            serde_json::from_str(&text).map_err(|e| HttpError::Parse(e.to_string()))
        }
        other => Ok(other),
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Configured HTTP client.
///
/// Construct once at startup and share it
/// through the application context; cloning is cheap.
#[derive(Clone)]
pub struct ApiClient<T = BrowserTransport> {
    config: ClientConfig,
    transport: T,
    request_interceptors: Vec<RequestInterceptor>,
    response_interceptors: Vec<ResponseInterceptor>,
}

impl ApiClient<BrowserTransport> {
    /// Browser client using compile-time configuration and the default interceptors.
    pub fn browser() -> Self {
        Self::with_defaults(ClientConfig::from_env(), BrowserTransport)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Client without interceptors.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Client with the JSON content-type and string-body interceptors installed.
    pub fn with_defaults(config: ClientConfig, transport: T) -> Self {
        Self::new(config, transport)
            .on_request(json_content_type)
            .on_response(decode_string_body)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Append a request interceptor; interceptors run in insertion order.
    pub fn on_request(
        mut self,
        interceptor: impl Fn(HttpRequest) -> Result<HttpRequest, HttpError> + Send + Sync + 'static,
    ) -> Self {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Append a response interceptor; interceptors run in insertion order.
    pub fn on_response(
        mut self,
        interceptor: impl Fn(Value) -> Result<Value, HttpError> + Send + Sync + 'static,
    ) -> Self {
        self.response_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Send `request` and return the intercepted response body.
    pub async fn send(&self, request: HttpRequest) -> Result<Value, HttpError> {
        let prepared = self
            .prepare(request)
            .inspect_err(|e| error!("request error: {e}"))?;

        let response = self
            .transport
            .send(prepared)
            .await
            .inspect_err(|e| error!("response error: {e}"))?;

        self.response_interceptors
            .iter()
            .try_fold(response.body, |body, interceptor| interceptor(body))
    }

    /// Send `request` and deserialize the result.
    pub async fn send_typed<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, HttpError> {
        let value = self.send(request).await?;
        serde_json::from_value(value).map_err(|e| HttpError::Parse(e.to_string()))
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, HttpError> {
        self.send_typed(HttpRequest::get(path)).await
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, HttpError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_typed(HttpRequest::post(path).json(body)?).await
    }

    fn prepare(&self, request: HttpRequest) -> Result<PreparedRequest, HttpError> {
        let mut request = request;
        for (name, value) in &self.config.headers {
            if request.header(name).is_none() {
                request.set_header(name, value);
            }
        }

        let request = self
            .request_interceptors
            .iter()
            .try_fold(request, |req, interceptor| interceptor(req))?;

        Ok(PreparedRequest {
            method: request.method,
            url: join_url(&self.config.base_url, &request.path, &request.query)?,
            headers: request.headers,
            body: request.body,
            timeout: self.config.timeout,
        })
    }
}

// =============================================================================
// URL Helpers
// =============================================================================

/// Resolve `path` against `base`; absolute URLs are used as-is.
pub fn join_url(base: &str, path: &str, query: &[(String, String)]) -> Result<String, HttpError> {
    let lower = path.to_ascii_lowercase();
    let raw = if lower.starts_with("http://") || lower.starts_with("https://") {
        path.to_string()
    } else if path.is_empty() {
        base.to_string()
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    let mut url =
        Url::parse(&raw).map_err(|e| HttpError::RequestCreation(format!("{raw}: {e}")))?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    Ok(url.to_string())
}

/// Percent-encode a single path segment (`/` included).
pub fn encode_segment(value: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return value.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(value);
    }
    url.path().trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// In-memory transport returning a canned result and recording requests.
    struct MockTransport {
        reply: Result<HttpResponse, HttpError>,
        seen: Mutex<Vec<PreparedRequest>>,
    }

    impl MockTransport {
        fn replying(body: Value) -> Self {
            Self {
                reply: Ok(HttpResponse { status: 200, body }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: HttpError) -> Self {
            Self {
                reply: Err(err),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<PreparedRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for &MockTransport {
        async fn send(&self, request: PreparedRequest) -> Result<HttpResponse, HttpError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn config() -> ClientConfig {
        ClientConfig {
            base_url: "http://localhost:9090".to_string(),
            timeout: Duration::from_secs(30),
            headers: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_content_type_is_always_json() {
        let transport = MockTransport::replying(json!({}));
        let client = ApiClient::with_defaults(config(), &transport);

        let mut request = HttpRequest::post("article/rebuild");
        request.set_header("content-type", "text/plain");
        client.send(request).await.unwrap();

        let sent = &transport.requests()[0];
        let content_types: Vec<_> = sent
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .collect();
        assert_eq!(content_types.len(), 1);
        assert_eq!(content_types[0].1, JSON_CONTENT_TYPE);
        assert_eq!(sent.url, "http://localhost:9090/article/rebuild");
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_string_encoded_json_is_parsed() {
        let transport = MockTransport::replying(Value::String(r#"{"a":1}"#.to_string()));
        let client = ApiClient::with_defaults(config(), &transport);
        let body = client.send(HttpRequest::get("/")).await.unwrap();
        assert_eq!(body, json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_double_encoded_body_decodes_twice() {
        let first = decode_transport_body(r#""{\"a\":1}""#.to_string());
        assert_eq!(first, Value::String(r#"{"a":1}"#.to_string()));

        let transport = MockTransport::replying(first);
        let client = ApiClient::with_defaults(config(), &transport);
        assert_eq!(client.send(HttpRequest::get("/")).await.unwrap(), json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_non_string_body_is_unchanged() {
        let transport = MockTransport::replying(json!({"a": 1}));
        let client = ApiClient::with_defaults(config(), &transport);
        assert_eq!(client.send(HttpRequest::get("/")).await.unwrap(), json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_empty_string_body_is_unchanged() {
        let transport = MockTransport::replying(Value::String(String::new()));
        let client = ApiClient::with_defaults(config(), &transport);
        assert_eq!(
            client.send(HttpRequest::get("/")).await.unwrap(),
            Value::String(String::new())
        );
    }

    #[tokio::test]
    async fn test_malformed_string_body_is_a_parse_error() {
        let transport = MockTransport::replying(Value::String("{not json".to_string()));
        let client = ApiClient::with_defaults(config(), &transport);
        assert!(matches!(
            client.send(HttpRequest::get("/")).await,
            Err(HttpError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_error_is_propagated_unchanged() {
        for err in [
            HttpError::Network("connection refused".to_string()),
            HttpError::Timeout,
            HttpError::Status {
                status: 500,
                body: "boom".to_string(),
            },
        ] {
            let transport = MockTransport::failing(err.clone());
            let client = ApiClient::with_defaults(config(), &transport);
            assert_eq!(client.send(HttpRequest::get("/")).await, Err(err));
        }
    }

    #[tokio::test]
    async fn test_request_interceptor_error_skips_transport() {
        let transport = MockTransport::replying(json!(null));
        let client = ApiClient::with_defaults(config(), &transport)
            .on_request(|_| Err(HttpError::RequestCreation("rejected".to_string())));

        assert_eq!(
            client.send(HttpRequest::get("/")).await,
            Err(HttpError::RequestCreation("rejected".to_string()))
        );
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_interceptors_run_in_order() {
        let transport = MockTransport::replying(json!(1));
        let client = ApiClient::new(config(), &transport)
            .on_request(|mut r| {
                r.set_header("X-Step", "one");
                Ok(r)
            })
            .on_request(|mut r| {
                let prev = r.header("X-Step").unwrap_or_default().to_string();
                r.set_header("X-Step", &format!("{prev},two"));
                Ok(r)
            })
            .on_response(|v| Ok(json!([v])))
            .on_response(|v| Ok(json!({"wrapped": v})));

        let body = client.send(HttpRequest::get("/")).await.unwrap();
        assert_eq!(body, json!({"wrapped": [1]}));
        assert_eq!(transport.requests()[0].headers, vec![(
            "X-Step".to_string(),
            "one,two".to_string()
        )]);
    }

    #[tokio::test]
    async fn test_config_headers_do_not_override_request_headers() {
        let transport = MockTransport::replying(json!(null));
        let mut cfg = config();
        cfg.headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("X-Client".to_string(), "web".to_string()),
        ];
        let client = ApiClient::new(cfg, &transport);

        let mut request = HttpRequest::get("/");
        request.set_header("x-client", "test");
        client.send(request).await.unwrap();

        let sent = &transport.requests()[0];
        assert!(sent.headers.contains(&("x-client".to_string(), "test".to_string())));
        assert!(sent.headers.contains(&("Accept".to_string(), "application/json".to_string())));
        assert_eq!(sent.headers.len(), 2);
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Hello {
            a: u32,
        }

        let transport = MockTransport::replying(Value::String(r#"{"a":7}"#.to_string()));
        let client = ApiClient::with_defaults(config(), &transport);
        let hello: Hello = client.post_json("echo", &json!({"x": 1})).await.unwrap();
        assert_eq!(hello, Hello { a: 7 });
        assert_eq!(transport.requests()[0].body.as_deref(), Some(r#"{"x":1}"#));

        let wrong: Result<Vec<u8>, _> = client.get_json("echo").await;
        assert!(matches!(wrong, Err(HttpError::Parse(_))));
    }

    #[test]
    fn test_join_url() {
        let q = Vec::new();
        assert_eq!(
            join_url("http://localhost:9090/", "/article/list", &q).unwrap(),
            "http://localhost:9090/article/list"
        );
        assert_eq!(
            join_url("http://localhost:9090/api", "article", &q).unwrap(),
            "http://localhost:9090/api/article"
        );
        assert_eq!(
            join_url("http://localhost:9090", "https://other.host/x", &q).unwrap(),
            "https://other.host/x"
        );
        assert_eq!(
            join_url("http://localhost:9090", "", &q).unwrap(),
            "http://localhost:9090/"
        );

        let q = vec![("pageNum".to_string(), "1".to_string())];
        assert_eq!(
            join_url("http://localhost:9090", "article/search", &q).unwrap(),
            "http://localhost:9090/article/search?pageNum=1"
        );

        assert!(matches!(
            join_url("not a url", "x", &[]),
            Err(HttpError::RequestCreation(_))
        ));
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        assert_eq!(encode_segment("plain"), "plain");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");

        let request = HttpRequest::get("/article/summary/").segment("Deep Learning?");
        assert_eq!(request.path, "/article/summary/Deep%20Learning%3F");
    }
}
