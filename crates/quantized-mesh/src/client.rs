//! HTTP client for terrain tile servers.

use quantized_mesh_decode::{DecodeOptions, TileData, decode_with_options};

use crate::cache::{Cache, NoCache};
use crate::error::{Error, Result};

/// `Accept` header sent with tile requests. Servers that can serve
/// quantized-mesh prefer it; plain octet streams are accepted as a fallback.
pub const TILE_ACCEPT_HEADER: &str =
    "application/vnd.quantized-mesh,application/octet-stream;q=0.9";

/// Fetches tiles over HTTP and decodes them.
#[derive(Debug, Clone)]
pub struct Client<C = NoCache> {
    http: reqwest::Client,
    cache: C,
}

impl Client<NoCache> {
    /// Create a client without a cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(NoCache)
    }
}

impl Default for Client<NoCache> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cache> Client<C> {
    /// Create a client that stores fetched tiles in `cache`.
    #[must_use]
    pub fn with_cache(cache: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache,
        }
    }

    /// The cache backing this client.
    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Fetch the raw bytes of a tile, serving from the cache when possible.
    pub async fn fetch_bytes_from_url(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(bytes) = self.cache.get(url) {
            tracing::debug!(url, bytes = bytes.len(), "Cache hit");
            return Ok(bytes);
        }

        tracing::debug!(url, "Fetching tile");
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, TILE_ACCEPT_HEADER)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?.to_vec();
        tracing::info!(url, bytes = bytes.len(), "Fetched tile");
        self.cache.put(url, &bytes);
        Ok(bytes)
    }

    /// Fetch and fully decode a tile.
    pub async fn fetch_tile(&self, url: &str) -> Result<TileData> {
        self.fetch_tile_with_options(url, &DecodeOptions::default())
            .await
    }

    /// Fetch a tile and decode it up to `options.max_decoding_step`.
    pub async fn fetch_tile_with_options(
        &self,
        url: &str,
        options: &DecodeOptions,
    ) -> Result<TileData> {
        let bytes = self.fetch_bytes_from_url(url).await?;
        Ok(decode_with_options(&bytes, options)?)
    }
}
