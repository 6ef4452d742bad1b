//! Extension block unpacking.
//!
//! Extensions trail the edge indices and run to the end of the tile. Each is
//! a `u8` id, a `u32` byte length and a payload of that length.

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

/// Extension id of oct-encoded per-vertex normals.
pub const VERTEX_NORMALS_ID: u8 = 1;
/// Extension id of the water mask.
pub const WATER_MASK_ID: u8 = 2;
/// Extension id of JSON metadata.
pub const METADATA_ID: u8 = 4;

/// A single decoded extension block.
#[derive(Debug, Clone, PartialEq)]
pub enum Extension {
    /// Oct-encoded per-vertex normals. Passed through untouched.
    VertexNormals(Vec<u8>),
    /// Either a single byte (all land or all water) or a 256×256 mask.
    /// Passed through untouched.
    WaterMask(Vec<u8>),
    /// Parsed JSON metadata.
    Metadata(serde_json::Value),
    /// A block with an id this decoder does not know. Its payload is skipped.
    Unknown { id: u8, length: usize },
}

impl Extension {
    /// Wire id of the extension.
    #[must_use]
    pub fn id(&self) -> u8 {
        match self {
            Self::VertexNormals(_) => VERTEX_NORMALS_ID,
            Self::WaterMask(_) => WATER_MASK_ID,
            Self::Metadata(_) => METADATA_ID,
            Self::Unknown { id, .. } => *id,
        }
    }
}

/// All extensions found in a tile.
///
/// When an id occurs more than once, the last block wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    pub vertex_normals: Option<Vec<u8>>,
    pub water_mask: Option<Vec<u8>>,
    pub metadata: Option<serde_json::Value>,
    /// Ids of skipped blocks, in the order they appeared.
    pub unknown: Vec<u8>,
}

impl Extensions {
    /// Whether no known extension was present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertex_normals.is_none() && self.water_mask.is_none() && self.metadata.is_none()
    }

    fn insert(&mut self, extension: Extension) {
        match extension {
            Extension::VertexNormals(normals) => self.vertex_normals = Some(normals),
            Extension::WaterMask(mask) => self.water_mask = Some(mask),
            Extension::Metadata(metadata) => self.metadata = Some(metadata),
            Extension::Unknown { id, length } => {
                tracing::warn!(id, length, "Skipping unknown extension");
                self.unknown.push(id);
            }
        }
    }
}

/// Decode one extension payload.
///
/// `payload` must cover exactly the declared extension length.
pub fn decode_extension(id: u8, payload: &mut Cursor<'_>) -> DecodeResult<Extension> {
    let length = payload.remaining();
    Ok(match id {
        VERTEX_NORMALS_ID => Extension::VertexNormals(payload.read_bytes(length)?.to_vec()),
        WATER_MASK_ID => Extension::WaterMask(payload.read_bytes(length)?.to_vec()),
        METADATA_ID => Extension::Metadata(decode_metadata(payload)?),
        _ => {
            payload.skip(length)?;
            Extension::Unknown { id, length }
        }
    })
}

/// Parse the metadata payload: a `u32` JSON length and that many bytes of JSON.
fn decode_metadata(payload: &mut Cursor<'_>) -> DecodeResult<serde_json::Value> {
    let json_length = payload.read_count()?;
    let offset = payload.position();
    let json = payload.read_bytes(json_length)?;
    serde_json::from_slice(json).map_err(|source| DecodeError::MalformedMetadata { offset, source })
}

/// Decode extension blocks until the end of the tile.
pub fn decode_extensions(cursor: &mut Cursor<'_>) -> DecodeResult<Extensions> {
    let mut extensions = Extensions::default();

    while !cursor.is_empty() {
        let id = cursor.read_u8()?;
        let length = cursor.read_count()?;
        let mut payload = cursor.split(length)?;
        extensions.insert(decode_extension(id, &mut payload)?);
    }

    Ok(extensions)
}
