//! Client error types.

use std::path::PathBuf;

use quantized_mesh_decode::DecodeError;
use thiserror::Error;

/// Errors from fetching, reading or decoding a tile.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unable to load tile {url}: HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read tile {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode tile: {0}")]
    Decode(#[from] DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
