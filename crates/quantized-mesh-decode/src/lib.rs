//! Decode quantized-mesh terrain tiles.
//!
//! This crate provides pure synchronous decoding of the quantized-mesh tile
//! format: a fixed header, zigzag delta-coded vertices, high-water-mark coded
//! triangle indices, edge index lists and trailing extension blocks. All
//! functions are designed to be called from any threading context - the
//! library user controls parallelism.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **Stateless**: Every call owns its output; nothing is shared between calls
//! - **Web-compatible**: Compiles to WASM
//!
//! # Key functions
//!
//! - [`decode`]: Decode a whole tile
//! - [`decode_with_options`]: Decode a tile up to a given [`DecodingStep`]
//! - [`decode_header`], [`decode_vertices`], [`decode_triangle_indices`],
//!   [`decode_edge_indices`], [`decode_extensions`]: The individual stages,
//!   operating on a shared [`Cursor`]

use std::fmt;

mod error;

pub mod cursor;
pub mod edges;
pub mod extensions;
pub mod header;
pub mod indices;
pub mod vertices;
pub mod zigzag;

pub use cursor::Cursor;
pub use edges::{EdgeIndices, decode_edge_indices};
pub use error::{DecodeError, DecodeResult};
pub use extensions::{Extension, Extensions, decode_extension, decode_extensions};
pub use header::{HEADER_SIZE, Header, HeaderField, decode_header};
pub use indices::{IndexWidth, Indices, decode_high_water_mark, decode_triangle_indices};
pub use vertices::{VertexData, decode_vertices};
pub use zigzag::{zigzag_decode, zigzag_encode};

/// Stages of the decode pipeline, in the order they run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecodingStep {
    Header = 0,
    Vertices = 1,
    TriangleIndices = 2,
    EdgeIndices = 3,
    #[default]
    Extensions = 4,
}

impl fmt::Display for DecodingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::Vertices => "vertices",
            Self::TriangleIndices => "triangle indices",
            Self::EdgeIndices => "edge indices",
            Self::Extensions => "extensions",
        })
    }
}

/// Options for [`decode_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Last stage to run. Defaults to a full decode.
    pub max_decoding_step: DecodingStep,
}

impl DecodeOptions {
    /// Options that stop after `step`.
    #[must_use]
    pub fn up_to(step: DecodingStep) -> Self {
        Self {
            max_decoding_step: step,
        }
    }
}

/// A decoded tile.
///
/// Sections after the requested [`DecodingStep`] are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileData {
    pub header: Header,
    pub vertex_data: Option<VertexData>,
    pub triangle_indices: Option<Indices>,
    pub edge_indices: Option<EdgeIndices>,
    pub extensions: Option<Extensions>,
}

impl TileData {
    /// Number of triangles, if triangle indices were decoded.
    #[must_use]
    pub fn triangle_count(&self) -> Option<usize> {
        self.triangle_indices.as_ref().map(|indices| indices.len() / 3)
    }

    /// Iterate over triangles as `(u, v, height)` vertex triples.
    ///
    /// Yields nothing unless both vertices and triangle indices were decoded.
    /// Triangles referencing a vertex out of range are yielded as `None`.
    pub fn triangles(&self) -> impl Iterator<Item = Option<[glam::U16Vec3; 3]>> + '_ {
        let vertices = self.vertex_data.as_ref();
        let indices = self.triangle_indices.as_ref();
        let count = vertices.and(indices).map_or(0, Indices::len) / 3;

        (0..count).map(move |t| {
            let indices = indices?;
            let vertices = vertices?;
            let corner = |k: usize| indices.get(3 * t + k);
            vertices.triangle([corner(0)?, corner(1)?, corner(2)?])
        })
    }
}

/// Decode a whole tile.
pub fn decode(data: &[u8]) -> DecodeResult<TileData> {
    decode_with_options(data, &DecodeOptions::default())
}

/// Decode a tile, stopping after `options.max_decoding_step`.
///
/// Earlier stages always run, since each one locates the start of the next.
/// Any failure aborts the whole decode.
pub fn decode_with_options(data: &[u8], options: &DecodeOptions) -> DecodeResult<TileData> {
    let max_step = options.max_decoding_step;
    let mut cursor = Cursor::new(data);

    let header = decode_header(&mut cursor)?;
    tracing::debug!(offset = cursor.position(), "Decoded header");
    let mut tile = TileData {
        header,
        ..TileData::default()
    };
    if max_step < DecodingStep::Vertices {
        return Ok(tile);
    }

    cursor.begin(DecodingStep::Vertices);
    let vertices = decode_vertices(&mut cursor)?;
    let width = IndexWidth::for_vertex_count(vertices.vertex_count());
    tracing::debug!(
        offset = cursor.position(),
        vertex_count = vertices.vertex_count(),
        ?width,
        "Decoded vertices"
    );
    tile.vertex_data = Some(vertices);
    if max_step < DecodingStep::TriangleIndices {
        return Ok(tile);
    }

    cursor.begin(DecodingStep::TriangleIndices);
    let triangle_indices = decode_triangle_indices(&mut cursor, width)?;
    tracing::debug!(
        offset = cursor.position(),
        triangle_count = triangle_indices.len() / 3,
        "Decoded triangle indices"
    );
    tile.triangle_indices = Some(triangle_indices);
    if max_step < DecodingStep::EdgeIndices {
        return Ok(tile);
    }

    cursor.begin(DecodingStep::EdgeIndices);
    tile.edge_indices = Some(decode_edge_indices(&mut cursor, width)?);
    tracing::debug!(offset = cursor.position(), "Decoded edge indices");
    if max_step < DecodingStep::Extensions {
        return Ok(tile);
    }

    cursor.begin(DecodingStep::Extensions);
    let extensions = decode_extensions(&mut cursor)?;
    tracing::debug!(
        bytes = data.len(),
        unknown_extensions = extensions.unknown.len(),
        "Decoded tile"
    );
    tile.extensions = Some(extensions);

    Ok(tile)
}
