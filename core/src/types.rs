//! Domain values for the Giphy API: the mapped `Gif` record and the optional
//! parameter sets the query operations accept.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;

/// Results per page when no limit is given.
pub const DEFAULT_LIMIT: u32 = 25;
/// Largest page the API serves.
pub const MAX_LIMIT: u32 = 50;
/// Largest offset the API accepts.
pub const MAX_OFFSET: u32 = 499;
/// Language used for searches when none is given.
pub const DEFAULT_LANGUAGE: &str = "en";

const MEDIA_HOST: &str = "https://i.giphy.com/";

/// A single GIF returned by the API.
///
/// Only the fields listed here are read from the response; everything else
/// Giphy sends is ignored. The id is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GifRecord")]
pub struct Gif {
    id: String,
    url: Url,
    slug: String,
    #[serde(rename = "bitly_url")]
    short_url: Url,
    embed_url: Url,
    title: String,
}

/// Wire shape of a `Gif` before the id is checked.
#[derive(Deserialize)]
struct GifRecord {
    id: String,
    url: Url,
    slug: String,
    bitly_url: Url,
    embed_url: Url,
    title: String,
}

impl TryFrom<GifRecord> for Gif {
    type Error = ApiError;

    fn try_from(record: GifRecord) -> Result<Self, Self::Error> {
        Gif::new(
            record.id,
            record.url,
            record.slug,
            record.bitly_url,
            record.embed_url,
            record.title,
        )
    }
}

impl Gif {
    /// Fails with `ApiError::InvalidArgument` when `id` is empty.
    pub fn new(
        id: String,
        url: Url,
        slug: String,
        short_url: Url,
        embed_url: Url,
        title: String,
    ) -> Result<Self, ApiError> {
        if id.is_empty() {
            return Err(ApiError::invalid("gif id cannot be empty"));
        }
        Ok(Self {
            id,
            url,
            slug,
            short_url,
            embed_url,
            title,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Canonical page on giphy.com.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Shortened link (`bitly_url` on the wire).
    pub fn short_url(&self) -> &Url {
        &self.short_url
    }

    pub fn embed_url(&self) -> &Url {
        &self.embed_url
    }

    /// May be empty.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Direct `.webp` download URL, derived from the id.
    pub fn media_source(&self) -> String {
        format!("{MEDIA_HOST}{}.webp", self.id)
    }
}

/// Optional parameters for a search. Unset fields fall back to
/// `DEFAULT_LIMIT`, offset 0 and `DEFAULT_LANGUAGE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub language: Option<String>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Optional parameters for the trending feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendingOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl TrendingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Everything any endpoint might need, for `GiphyClient::query`.
///
/// `query` is the tag for `Random` and the search term for `Search`; it is
/// ignored by `Trending`, as is `language`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub query: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub language: Option<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl From<&QueryParams> for SearchOptions {
    fn from(params: &QueryParams) -> Self {
        Self {
            limit: params.limit,
            offset: params.offset,
            language: params.language.clone(),
        }
    }
}

impl From<&QueryParams> for TrendingOptions {
    fn from(params: &QueryParams) -> Self {
        Self {
            limit: params.limit,
            offset: params.offset,
        }
    }
}
