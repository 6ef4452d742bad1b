//! High-level client for fetching and decoding quantized-mesh terrain tiles.
//!
//! Supplies tile bytes to [`quantized_mesh_decode`], from an HTTP tile server
//! or from disk. Decoding itself is synchronous; fetching is async and runs
//! on whatever runtime the caller provides.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> quantized_mesh::Result<()> {
//! use quantized_mesh::{Client, MemoryCache};
//!
//! let client = Client::with_cache(MemoryCache::new());
//! let tile = client.fetch_tile("https://example.com/tiles/0/0/0.terrain").await?;
//! println!("{} triangles", tile.triangle_count().unwrap_or(0));
//! # Ok(())
//! # }
//! ```

mod cache;
mod client;
mod error;
mod file;

pub use cache::{Cache, MemoryCache, NoCache};
pub use client::{Client, TILE_ACCEPT_HEADER};
pub use error::{Error, Result};
pub use file::{read_and_decode_tile, read_tile};

pub use quantized_mesh_decode as decode;
pub use quantized_mesh_decode::{DecodeOptions, DecodingStep, TileData};
