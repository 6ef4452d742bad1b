//! Vertex unpacking.

use glam::U16Vec3;

use crate::cursor::Cursor;
use crate::error::DecodeResult;
use crate::zigzag::zigzag_decode;

/// Quantized vertex positions.
///
/// Stored as one flattened array of `3 * vertex_count` values:
/// `[u0..un, v0..vn, h0..hn]`. `u` and `v` span the tile from west to east and
/// south to north, `height` spans the header's min to max height, each over
/// `0..=32767`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexData {
    data: Vec<u16>,
    vertex_count: usize,
}

impl VertexData {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// The flattened `[u.., v.., height..]` array.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    #[must_use]
    pub fn u(&self) -> &[u16] {
        &self.data[..self.vertex_count]
    }

    #[must_use]
    pub fn v(&self) -> &[u16] {
        &self.data[self.vertex_count..2 * self.vertex_count]
    }

    #[must_use]
    pub fn height(&self) -> &[u16] {
        &self.data[2 * self.vertex_count..]
    }

    /// The `(u, v, height)` triple of one vertex.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<U16Vec3> {
        if index >= self.vertex_count {
            return None;
        }
        Some(U16Vec3::new(
            self.data[index],
            self.data[index + self.vertex_count],
            self.data[index + 2 * self.vertex_count],
        ))
    }

    /// Iterate over all vertices as `(u, v, height)` triples.
    pub fn iter(&self) -> impl Iterator<Item = U16Vec3> + '_ {
        self.u()
            .iter()
            .zip(self.v())
            .zip(self.height())
            .map(|((&u, &v), &h)| U16Vec3::new(u, v, h))
    }

    /// Resolve three vertex indices into their positions.
    ///
    /// Returns `None` if any index is out of range.
    #[must_use]
    pub fn triangle(&self, indices: [u32; 3]) -> Option<[U16Vec3; 3]> {
        let [a, b, c] = indices.map(|i| usize::try_from(i).ok().and_then(|i| self.vertex(i)));
        Some([a?, b?, c?])
    }
}

/// Unpack delta-encoded vertex positions.
///
/// # Format
///
/// A `u32` vertex count `n`, then three arrays of `n` little-endian `u16`
/// zigzag codes (all `u`, then all `v`, then all `height`). Within each array
/// a value is the previous value plus the decoded delta, starting from zero.
/// Accumulation wraps at 2^16.
pub fn decode_vertices(cursor: &mut Cursor<'_>) -> DecodeResult<VertexData> {
    let vertex_count = cursor.read_count()?;

    let mut data = Vec::with_capacity(vertex_count.saturating_mul(3).min(cursor.remaining()));
    for _ in 0..3 {
        let codes = cursor.read_u16_array(vertex_count)?;
        data.extend(accumulate_deltas(&codes));
    }

    Ok(VertexData { data, vertex_count })
}

/// Zigzag-decode `codes` and accumulate them into absolute values.
fn accumulate_deltas(codes: &[u16]) -> impl Iterator<Item = u16> + '_ {
    codes.iter().scan(0u16, |value, &code| {
        #[allow(clippy::cast_sign_loss)]
        let delta = zigzag_decode(code) as u16;
        *value = value.wrapping_add(delta);
        Some(*value)
    })
}
