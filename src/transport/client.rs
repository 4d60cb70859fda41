use crate::adapter::error::AdapterError;
use crate::adapter::{Header, RequestData, ResponseData};
use bytes::BytesMut;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, redirect};
use std::time::{Duration, Instant};
use tracing::debug;

/// Strict cap on any response body. A body crossing this line fails the
/// call before any parse is attempted.
pub const MAX_RESPONSE_BYTES: usize = 1 << 20;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const TCP_KEEPALIVE: Duration = Duration::from_secs(30);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Shared outbound HTTP client for bidder callouts.
///
/// One instance serves every adapter in the process; the underlying
/// connection pool is bounded and the client is cheap to share by
/// reference. Compression stays off: bid bodies are small JSON and the
/// path is latency dominated.
pub struct BidderClient {
    client: Client,
    response_cap: usize,
}

impl BidderClient {
    /// Builds the shared client eagerly so a bad TLS or resolver setup
    /// fails at startup instead of on the first auction.
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::with_response_cap(MAX_RESPONSE_BYTES)
    }

    pub fn with_response_cap(response_cap: usize) -> Result<Self, anyhow::Error> {
        let client = reqwest::ClientBuilder::new()
            .user_agent("tne-catalyst")
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_keepalive(Some(TCP_KEEPALIVE))
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Some(POOL_IDLE_TIMEOUT))
            .tcp_nodelay(true)
            .referer(false)
            .redirect(redirect::Policy::none())
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .hickory_dns(true)
            .build()?;

        Ok(Self {
            client,
            response_cap,
        })
    }

    /// Executes one outbound request under the smaller of the caller's
    /// deadline and `timeout`.
    ///
    /// The effective deadline covers the full round trip including the
    /// body read; when it fires the in-flight read future is dropped in
    /// place and a `TIMEOUT` error is returned. A response body larger
    /// than the cap fails with `RESPONSE_TOO_LARGE` before any parse.
    /// Any completed exchange returns `Ok` regardless of status code;
    /// status policy belongs to the adapter.
    pub async fn execute(
        &self,
        bidder: &str,
        request: &RequestData,
        deadline: Option<Instant>,
        timeout: Duration,
    ) -> Result<ResponseData, AdapterError> {
        let per_call = Instant::now() + timeout;
        let effective = deadline.map_or(per_call, |d| d.min(per_call));

        if effective <= Instant::now() {
            return Err(AdapterError::timeout(bidder));
        }

        let at = tokio::time::Instant::from_std(effective);
        match tokio::time::timeout_at(at, self.round_trip(bidder, request)).await {
            Ok(result) => result,
            Err(_) => {
                debug!("Deadline fired mid flight for {}", bidder);
                Err(AdapterError::timeout(bidder))
            }
        }
    }

    async fn round_trip(
        &self,
        bidder: &str,
        request: &RequestData,
    ) -> Result<ResponseData, AdapterError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| AdapterError::marshal(bidder, e))?;

        let mut headers = HeaderMap::new();
        for header in &request.headers {
            let name = HeaderName::from_bytes(header.name.as_bytes())
                .map_err(|e| AdapterError::marshal(bidder, e))?;
            let value = HeaderValue::from_str(&header.value)
                .map_err(|e| AdapterError::marshal(bidder, e))?;

            // later entries replace earlier ones with the same name
            headers.insert(name, value);
        }

        let outbound = self
            .client
            .request(method, &request.uri)
            .headers(headers)
            .body(request.body.clone())
            .build()
            .map_err(|e| AdapterError::marshal(bidder, e))?;

        let response = self
            .client
            .execute(outbound)
            .await
            .map_err(|e| Self::map_reqwest_error(bidder, e))?;

        let status_code = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| Header::new(name.as_str(), v))
            })
            .collect();

        let body = self.read_capped(bidder, response).await?;

        Ok(ResponseData {
            status_code,
            body,
            headers: response_headers,
        })
    }

    async fn read_capped(
        &self,
        bidder: &str,
        response: reqwest::Response,
    ) -> Result<bytes::Bytes, AdapterError> {
        let mut body = BytesMut::with_capacity(8 * 1024);
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Self::map_reqwest_error(bidder, e))?;

            if body.len() + chunk.len() > self.response_cap {
                return Err(AdapterError::response_too_large(bidder, self.response_cap));
            }

            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }

    fn map_reqwest_error(bidder: &str, err: reqwest::Error) -> AdapterError {
        if err.is_timeout() {
            AdapterError::timeout(bidder)
        } else {
            AdapterError::connection(bidder, err)
        }
    }
}
