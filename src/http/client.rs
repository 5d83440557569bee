use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, error};
use url::Url;

use super::transport::{OutboundRequest, Transport, TransportResponse};
use crate::args::{DEFAULT_USER_AGENT, TesterArgs};
use crate::error::{AppError, AppResult, HttpError, TransportError, ValidationError};

/// [`Transport`] backed by a pooled `reqwest` client.
///
/// Connections are kept alive between requests to the same host, so repeated
/// requests measure the server rather than TCP/TLS setup.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from CLI/config timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_args(args: &TesterArgs) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(args.request_timeout)
            .connect_timeout(args.connect_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| {
                error!("Failed to build HTTP client: {}", err);
                AppError::http(HttpError::BuildClientFailed { source: err })
            })?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = request.body.as_ref() {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body_bytes = drain_response_body(response).await?;
        debug!("{:?} {} -> {}", request.method, request.url, status);
        Ok(TransportResponse { status, body_bytes })
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

/// Resolves the request every iteration sends from the parsed arguments.
///
/// # Errors
///
/// Returns an error when the URL is missing or invalid, or a header cannot be
/// encoded.
pub fn build_request(args: &TesterArgs) -> AppResult<OutboundRequest> {
    let raw = args
        .url
        .as_deref()
        .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
    let url = parse_target_url(raw)?;
    let headers = build_headers(&args.headers)?;
    let body = if args.data.is_empty() {
        None
    } else {
        Some(args.data.clone())
    };

    Ok(OutboundRequest {
        method: args.method,
        url,
        headers,
        body,
    })
}

pub(crate) fn parse_target_url(raw: &str) -> Result<Url, HttpError> {
    let url = Url::parse(raw).map_err(|err| HttpError::InvalidUrl {
        url: raw.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(HttpError::UnsupportedScheme {
            scheme: other.to_owned(),
        }),
    }
}

fn build_headers(headers: &[(String, String)]) -> AppResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderName {
                header: key.clone(),
                source: err,
            })
        })?;
        let val = HeaderValue::from_str(value).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderValue {
                header: key.clone(),
                source: err,
            })
        })?;
        map.append(name, val);
    }
    Ok(map)
}
