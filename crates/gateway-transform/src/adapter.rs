// The gateway adapter: ChatAdapter implemented over the gateway's
// chat-completion task endpoint.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use serde_json::json;

use gateway_transform_types::{
    AdapterTimeout, BoxFuture, BoxStream, ChatAdapter, Error, GenerationResult, Request, StreamPart,
};

use crate::config::GatewayConfig;
use crate::sign::{ConsumerHeaderSigner, ConsumerIdentity, RequestSigner};
use crate::stream::StreamDecoder;
use crate::translate::build_request_body;
use crate::util::sse::SseParser;
use crate::wire;

/// Adapter speaking the gateway's chat-completion wire format.
///
/// All requests POST to the configured base URL; the `task` field in the
/// body selects the operation, not the path.
///
/// # Example
///
/// ```no_run
/// use gateway_transform::{ConsumerIdentity, GatewayAdapter, GatewayConfig};
///
/// let config = GatewayConfig::new(
///     "https://gw.example.com/v1/generate",
///     ConsumerIdentity::new("my-consumer", "my-service", "prod"),
/// );
/// let adapter = GatewayAdapter::new(config);
/// ```
pub struct GatewayAdapter {
    base_url: String,
    identity: ConsumerIdentity,
    signer: Arc<dyn RequestSigner>,
    http_client: reqwest::Client,
    stream_read_timeout: Duration,
}

impl GatewayAdapter {
    pub fn new(config: GatewayConfig) -> Self {
        Self::builder(config).build()
    }

    /// Create an adapter from environment variables. See
    /// [`GatewayConfig::from_env`] for the variable list.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(GatewayConfig::from_env()?))
    }

    /// Create a builder for fine-grained configuration.
    pub fn builder(config: GatewayConfig) -> GatewayAdapterBuilder {
        GatewayAdapterBuilder::new(config)
    }

    /// Build an HTTP client with the given timeout configuration.
    ///
    /// Wires `connect` → `connect_timeout()` and `request` → `timeout()`.
    /// `stream_read` is enforced per-chunk in stream(), not here.
    fn build_http_client(
        timeout: &AdapterTimeout,
        default_headers: Option<reqwest::header::HeaderMap>,
    ) -> reqwest::Client {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs_f64(timeout.connect))
            .timeout(Duration::from_secs_f64(timeout.request));
        if let Some(headers) = default_headers {
            builder = builder.default_headers(headers);
        }
        builder.build().expect("Failed to build HTTP client")
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "content-type",
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        self.signer.sign(&self.identity, &mut headers)?;
        Ok(headers)
    }

    async fn do_complete(&self, request: Request) -> Result<GenerationResult, Error> {
        request.validate()?;
        let body = build_request_body(&request, false)?;
        let request_headers = self.build_headers()?;

        let http_response = self
            .http_client
            .post(&self.base_url)
            .headers(request_headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::network(format!("HTTP request failed: {e}"), e))?;

        let status = http_response.status().as_u16();
        let headers = http_response.headers().clone();

        if status >= 400 {
            let error_body: serde_json::Value = http_response
                .json()
                .await
                .unwrap_or(json!({"error": {"message": "Failed to parse error response"}}));
            return Err(wire::parse_error(status, &headers, error_body));
        }

        let response_body: serde_json::Value = http_response
            .json()
            .await
            .map_err(|e| Error::network(format!("Failed to parse response: {e}"), e))?;

        wire::decode_response(response_body)
    }
}

/// Builder for constructing a `GatewayAdapter` with fine-grained
/// configuration.
pub struct GatewayAdapterBuilder {
    config: GatewayConfig,
    signer: Option<Arc<dyn RequestSigner>>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl GatewayAdapterBuilder {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            signer: None,
            default_headers: None,
        }
    }

    /// Replace the default header signer with a custom one.
    pub fn signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set custom timeout configuration.
    pub fn timeout(mut self, timeout: AdapterTimeout) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set default HTTP headers sent with every request.
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> GatewayAdapter {
        let timeout = self.config.timeout;
        GatewayAdapter {
            base_url: self.config.base_url,
            identity: self.config.identity,
            signer: self
                .signer
                .unwrap_or_else(|| Arc::new(ConsumerHeaderSigner)),
            http_client: GatewayAdapter::build_http_client(&timeout, self.default_headers),
            stream_read_timeout: Duration::from_secs_f64(timeout.stream_read),
        }
    }
}

impl ChatAdapter for GatewayAdapter {
    fn name(&self) -> &str {
        wire::PROVIDER_NAME
    }

    fn complete(&self, request: Request) -> BoxFuture<'_, Result<GenerationResult, Error>> {
        Box::pin(self.do_complete(request))
    }

    fn stream(&self, request: Request) -> BoxStream<'_, Result<StreamPart, Error>> {
        let stream = async_stream::stream! {
            if let Err(e) = request.validate() {
                yield Err(e);
                return;
            }
            let body = match build_request_body(&request, true) {
                Ok(b) => b,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            let request_headers = match self.build_headers() {
                Ok(h) => h,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            let http_response = match self
                .http_client
                .post(&self.base_url)
                .headers(request_headers)
                .json(&body)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    yield Err(Error::network(format!("HTTP request failed: {e}"), e));
                    return;
                }
            };

            let status = http_response.status().as_u16();
            let headers = http_response.headers().clone();

            if status >= 400 {
                let error_body: serde_json::Value = http_response
                    .json()
                    .await
                    .unwrap_or(json!({"error": {"message": "Failed to parse error response"}}));
                yield Err(wire::parse_error(status, &headers, error_body));
                return;
            }

            let mut parser = SseParser::new();
            let mut decoder = StreamDecoder::new();
            let mut byte_stream = http_response.bytes_stream();
            let stream_read_timeout = self.stream_read_timeout;

            loop {
                // Per-chunk read timeout; the whole-request timeout does not
                // apply to long streams.
                let chunk_result = match tokio::time::timeout(
                    stream_read_timeout,
                    byte_stream.next(),
                ).await {
                    Ok(Some(result)) => result,
                    Ok(None) => break,
                    Err(_elapsed) => {
                        yield Err(Error::stream(
                            format!("Stream read timed out after {stream_read_timeout:?}"),
                            std::io::Error::new(std::io::ErrorKind::TimedOut, "stream read timeout"),
                        ));
                        return;
                    }
                };

                let chunk = match chunk_result {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        yield Err(Error::stream(format!("Stream read error: {e}"), e));
                        return;
                    }
                };

                let chunk_str = match std::str::from_utf8(&chunk) {
                    Ok(s) => s,
                    Err(_) => {
                        tracing::warn!("Skipping non-UTF-8 stream chunk");
                        continue;
                    }
                };

                for payload in parser.feed(chunk_str) {
                    if payload.trim() == "[DONE]" {
                        return;
                    }
                    for part in decoder.decode_data(&payload) {
                        yield Ok(part);
                    }
                }
            }
        };
        Box::pin(stream)
    }
}
