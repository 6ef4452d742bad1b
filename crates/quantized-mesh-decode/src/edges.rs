//! Edge index unpacking.

use crate::cursor::Cursor;
use crate::error::DecodeResult;
use crate::indices::{IndexWidth, Indices, read_index_list};

/// Indices of the vertices lying on each tile boundary.
///
/// Renderers use these to stitch neighbouring tiles and to build skirts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeIndices {
    pub west: Indices,
    pub south: Indices,
    pub east: Indices,
    pub north: Indices,
}

/// Unpack the four edge index lists.
///
/// # Format
///
/// For west, south, east and north in that order: a `u32` count followed by
/// that many raw indices of `width`. Unlike triangle indices there is no
/// alignment padding and no high-water-mark coding.
pub fn decode_edge_indices(
    cursor: &mut Cursor<'_>,
    width: IndexWidth,
) -> DecodeResult<EdgeIndices> {
    let mut read_edge = || -> DecodeResult<Indices> {
        let count = cursor.read_count()?;
        read_index_list(cursor, count, width)
    };

    let west = read_edge()?;
    let south = read_edge()?;
    let east = read_edge()?;
    let north = read_edge()?;

    Ok(EdgeIndices {
        west,
        south,
        east,
        north,
    })
}
