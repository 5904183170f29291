//! Blocking client for the Giphy GIF API.
//!
//! # Overview
//! `GiphyClient` queries the random, search and trending endpoints and maps
//! each result into a `Gif`. Parameters are validated before anything is
//! sent, so an `ApiError::InvalidArgument` never costs a round-trip.
//!
//! # Design
//! - Every query is `build_*` (pure, produces an `HttpRequest`) followed by a
//!   `Transport` round-trip and `parse_*` (pure, consumes an `HttpResponse`).
//! - The default transport is a blocking ureq agent; any
//!   `Fn(&HttpRequest) -> Result<HttpResponse, ApiError>` works as well.
//! - The client carries no mutable state and can be shared across threads
//!   when its transport can.
//!
//! ```no_run
//! use giphy_core::{GiphyClient, SearchOptions};
//!
//! let client = GiphyClient::new("YOUR_API_KEY")?;
//! for gif in client.search("dog", &SearchOptions::new().limit(5))? {
//!     println!("{}", gif.media_source());
//! }
//! # Ok::<(), giphy_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod types;

pub use client::{query, GiphyClient, DEFAULT_BASE_URL};
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{Gif, QueryParams, SearchOptions, TrendingOptions};
