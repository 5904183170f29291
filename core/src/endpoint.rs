//! The three Giphy endpoints this client knows about.

use std::fmt;

use crate::error::ApiError;

/// Host every endpoint lives on.
pub const API_HOST: &str = "api.giphy.com";

/// One of the fixed Giphy GIF endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Random,
    Search,
    Trending,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::Random, Endpoint::Search, Endpoint::Trending];

    /// Host and path without a scheme, e.g. `api.giphy.com/v1/gifs/random`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Endpoint::Random => "api.giphy.com/v1/gifs/random",
            Endpoint::Search => "api.giphy.com/v1/gifs/search",
            Endpoint::Trending => "api.giphy.com/v1/gifs/trending",
        }
    }

    /// Versioned path relative to the host.
    pub fn path(self) -> &'static str {
        &self.endpoint()[API_HOST.len()..]
    }

    /// Fully-qualified `https` URL.
    pub fn url(self) -> String {
        format!("https://{}", self.endpoint())
    }

    /// Case-insensitive lookup by host and path.
    ///
    /// Returns `Ok(None)` when nothing matches. Only a blank input is an error.
    pub fn lookup(endpoint: &str) -> Result<Option<Endpoint>, ApiError> {
        if endpoint.trim().is_empty() {
            return Err(ApiError::invalid("endpoint cannot be empty"));
        }
        Ok(Self::ALL
            .into_iter()
            .find(|e| e.endpoint().eq_ignore_ascii_case(endpoint)))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::Random => "random",
            Endpoint::Search => "search",
            Endpoint::Trending => "trending",
        };
        f.write_str(name)
    }
}
