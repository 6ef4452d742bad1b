//! Reading tiles from disk.

use std::path::Path;

use quantized_mesh_decode::{DecodeOptions, TileData, decode_with_options};

use crate::error::{Error, Result};

/// Read the raw bytes of a tile file.
pub fn read_tile(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a tile file and decode it up to `options.max_decoding_step`.
pub fn read_and_decode_tile(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<TileData> {
    let bytes = read_tile(path)?;
    Ok(decode_with_options(&bytes, options)?)
}
