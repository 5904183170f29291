//! Blocking query client for the Giphy GIF endpoints.
//!
//! # Design
//! Each endpoint is split into a `build_*` method that validates parameters
//! and produces an `HttpRequest`, and a `parse_*` method that unwraps the
//! JSON envelope of an `HttpResponse`. The blocking `random`, `search`,
//! `trending` and `query` calls glue the two together through the client's
//! `Transport`. The client holds no per-call state and can be shared freely.

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{
    Gif, QueryParams, SearchOptions, TrendingOptions, DEFAULT_LANGUAGE, DEFAULT_LIMIT, MAX_LIMIT,
    MAX_OFFSET,
};

/// Scheme and host of the public API.
pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com";

/// Client for the random, search and trending endpoints.
pub struct GiphyClient<T = UreqTransport> {
    api_key: String,
    base_url: Url,
    transport: T,
}

impl GiphyClient<UreqTransport> {
    /// Client for the public API over a default ureq transport.
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        Self::with_transport(api_key, UreqTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = UreqTransport::with_timeout(config.timeout());
        Self::with_transport(&config.api_key, transport)?.with_base_url(&config.base_url)
    }
}

impl<T: Transport> GiphyClient<T> {
    pub fn with_transport(api_key: &str, transport: T) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::invalid("API key cannot be empty"));
        }
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            transport,
        })
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ApiError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Blocking queries
    // -----------------------------------------------------------------------

    /// Fetch one random GIF for `tag`.
    ///
    /// The result holds a single record, or none when Giphy has nothing for
    /// the tag.
    pub fn random(&self, tag: &str) -> Result<Vec<Gif>, ApiError> {
        let request = self.build_random(tag)?;
        debug!(endpoint = %Endpoint::Random, "sending giphy request");
        let response = self.transport.execute(&request)?;
        self.parse_random(response)
    }

    /// Search for GIFs matching `query`.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<Gif>, ApiError> {
        let request = self.build_search(query, options)?;
        let limit = options.limit.unwrap_or(DEFAULT_LIMIT);
        debug!(endpoint = %Endpoint::Search, limit, offset = options.offset.unwrap_or(0), "sending giphy request");
        let response = self.transport.execute(&request)?;
        self.parse_list(response, limit)
    }

    /// Fetch the current trending GIFs.
    pub fn trending(&self, options: &TrendingOptions) -> Result<Vec<Gif>, ApiError> {
        let request = self.build_trending(options)?;
        let limit = options.limit.unwrap_or(DEFAULT_LIMIT);
        debug!(endpoint = %Endpoint::Trending, limit, offset = options.offset.unwrap_or(0), "sending giphy request");
        let response = self.transport.execute(&request)?;
        self.parse_list(response, limit)
    }

    /// Route to `random`, `search` or `trending` by endpoint.
    pub fn query(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Vec<Gif>, ApiError> {
        let query = params.query.as_deref().unwrap_or_default();
        match endpoint {
            Endpoint::Random => self.random(query),
            Endpoint::Search => self.search(query, &SearchOptions::from(params)),
            Endpoint::Trending => self.trending(&TrendingOptions::from(params)),
        }
    }

    // -----------------------------------------------------------------------
    // Request building
    // -----------------------------------------------------------------------

    pub fn build_random(&self, tag: &str) -> Result<HttpRequest, ApiError> {
        require_text(tag, "tag")?;
        self.build_request(Endpoint::Random, &[("tag", tag)])
    }

    pub fn build_search(&self, query: &str, options: &SearchOptions) -> Result<HttpRequest, ApiError> {
        let language = options.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
        require_text(query, "query")?;
        let (limit, offset) = page(options.limit, options.offset)?;
        if language.trim().is_empty() || language.chars().count() != 2 {
            return Err(ApiError::invalid(
                "language must be a two-letter ISO 639-1 code",
            ));
        }
        let (limit, offset) = (limit.to_string(), offset.to_string());
        self.build_request(
            Endpoint::Search,
            &[
                ("q", query),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
                ("lang", language),
            ],
        )
    }

    pub fn build_trending(&self, options: &TrendingOptions) -> Result<HttpRequest, ApiError> {
        let (limit, offset) = page(options.limit, options.offset)?;
        let (limit, offset) = (limit.to_string(), offset.to_string());
        self.build_request(
            Endpoint::Trending,
            &[("limit", limit.as_str()), ("offset", offset.as_str())],
        )
    }

    fn build_request(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<HttpRequest, ApiError> {
        let mut url = self
            .base_url
            .join(endpoint.path())
            .map_err(|e| ApiError::invalid(format!("invalid base url: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }
        Ok(HttpRequest {
            url: url.into(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        })
    }

    // -----------------------------------------------------------------------
    // Response parsing
    // -----------------------------------------------------------------------

    /// Parse a random-endpoint response, whose `data` is a single object.
    pub fn parse_random(&self, response: HttpResponse) -> Result<Vec<Gif>, ApiError> {
        match unwrap_envelope(response)? {
            data @ Value::Object(_) => Ok(vec![map_gif(data)?]),
            // Giphy answers an unmatched tag with an empty array.
            Value::Array(items) if items.is_empty() => {
                debug!("random endpoint returned no gif");
                Ok(Vec::new())
            }
            other => Err(ApiError::malformed(format!(
                "expected an object in data, found {}",
                kind(&other)
            ))),
        }
    }

    /// Parse a search or trending response, keeping at most `limit` records.
    ///
    /// A shorter array than requested is not an error; every element present
    /// is mapped.
    pub fn parse_list(&self, response: HttpResponse, limit: u32) -> Result<Vec<Gif>, ApiError> {
        let items = match unwrap_envelope(response)? {
            Value::Array(items) => items,
            other => {
                return Err(ApiError::malformed(format!(
                    "expected an array in data, found {}",
                    kind(&other)
                )))
            }
        };
        if items.len() < limit as usize {
            debug!(requested = limit, returned = items.len(), "short page from giphy");
        }
        items.into_iter().take(limit as usize).map(map_gif).collect()
    }
}

impl<T> fmt::Debug for GiphyClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GiphyClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Build a throwaway client for `api_key` and run one query.
pub fn query(api_key: &str, endpoint: Endpoint, params: &QueryParams) -> Result<Vec<Gif>, ApiError> {
    GiphyClient::new(api_key)?.query(endpoint, params)
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let url = Url::parse(base_url).map_err(|e| ApiError::invalid(format!("invalid base url {base_url:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::invalid(format!("invalid base url {base_url:?}")));
    }
    // Endpoint paths are absolute, so anything past the host would be lost.
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ApiError::invalid(format!(
            "base url {base_url:?} must not carry a path, query or fragment"
        )));
    }
    Ok(url)
}

fn require_text(value: &str, name: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid(format!("{name} cannot be empty")));
    }
    Ok(())
}

/// Apply defaults to limit and offset and check their bounds.
fn page(limit: Option<u32>, offset: Option<u32>) -> Result<(u32, u32), ApiError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let offset = offset.unwrap_or(0);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::invalid(format!("limit must be between 1 and {MAX_LIMIT}")));
    }
    if offset > MAX_OFFSET {
        return Err(ApiError::invalid(format!("offset must be between 0 and {MAX_OFFSET}")));
    }
    Ok((limit, offset))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    warn!(status = response.status, "giphy rejected the request");
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Check the status and pull the `data` field out of the JSON envelope.
fn unwrap_envelope(response: HttpResponse) -> Result<Value, ApiError> {
    check_status(&response)?;
    let mut envelope: Value =
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    match envelope.get_mut("data").map(Value::take) {
        None | Some(Value::Null) => Err(ApiError::malformed("response has no data field")),
        Some(data) => Ok(data),
    }
}

fn map_gif(value: Value) -> Result<Gif, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::malformed(format!("invalid gif record: {e}")))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
