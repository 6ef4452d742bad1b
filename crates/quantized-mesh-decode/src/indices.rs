//! Index unpacking.

use crate::cursor::Cursor;
use crate::error::DecodeResult;

/// Largest vertex count whose indices are stored as 16-bit values.
pub const MAX_U16_INDEXED_VERTICES: usize = 65536;

/// Width of each index on the wire, derived from the vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    U16,
    U32,
}

impl IndexWidth {
    /// Select the index width for a tile with `vertex_count` vertices.
    #[must_use]
    pub const fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count > MAX_U16_INDEXED_VERTICES {
            Self::U32
        } else {
            Self::U16
        }
    }

    /// Size of one index in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}

/// A decoded index buffer, at the width it was stored with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Default for Indices {
    fn default() -> Self {
        Self::U16(Vec::new())
    }
}

impl Indices {
    #[must_use]
    pub fn width(&self) -> IndexWidth {
        match self {
            Self::U16(_) => IndexWidth::U16,
            Self::U32(_) => IndexWidth::U32,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U16(indices) => indices.len(),
            Self::U32(indices) => indices.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            Self::U16(indices) => indices.get(i).copied().map(u32::from),
            Self::U32(indices) => indices.get(i).copied(),
        }
    }

    /// Iterate over the indices, widened to `u32`.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// Copy the indices into a `u32` vector.
    #[must_use]
    pub fn to_u32_vec(&self) -> Vec<u32> {
        match self {
            Self::U16(indices) => indices.iter().copied().map(u32::from).collect(),
            Self::U32(indices) => indices.clone(),
        }
    }
}

/// Unsigned integer types an index buffer can be stored as.
pub trait IndexValue: Copy + Eq {
    const ZERO: Self;

    #[must_use]
    fn wrapping_sub(self, rhs: Self) -> Self;

    #[must_use]
    fn wrapping_increment(self) -> Self;
}

impl IndexValue for u16 {
    const ZERO: Self = 0;

    fn wrapping_sub(self, rhs: Self) -> Self {
        u16::wrapping_sub(self, rhs)
    }

    fn wrapping_increment(self) -> Self {
        self.wrapping_add(1)
    }
}

impl IndexValue for u32 {
    const ZERO: Self = 0;

    fn wrapping_sub(self, rhs: Self) -> Self {
        u32::wrapping_sub(self, rhs)
    }

    fn wrapping_increment(self) -> Self {
        self.wrapping_add(1)
    }
}

/// Decode high-water-mark encoded indices in place.
///
/// Each code is a backward offset from the highest index introduced so far.
/// A code of zero names the next never-seen index and raises the mark by one.
///
/// Returns the final high-water mark, i.e. the number of distinct indices
/// introduced.
pub fn decode_high_water_mark<T: IndexValue>(codes: &mut [T]) -> T {
    let mut highest = T::ZERO;
    for code in codes.iter_mut() {
        let raw = *code;
        *code = highest.wrapping_sub(raw);
        if raw == T::ZERO {
            highest = highest.wrapping_increment();
        }
    }
    highest
}

/// Read a `u32` count followed by that many indices of `width`.
pub(crate) fn read_index_list(
    cursor: &mut Cursor<'_>,
    count: usize,
    width: IndexWidth,
) -> DecodeResult<Indices> {
    Ok(match width {
        IndexWidth::U16 => Indices::U16(cursor.read_u16_array(count)?),
        IndexWidth::U32 => Indices::U32(cursor.read_u32_array(count)?),
    })
}

/// Unpack high-water-mark encoded triangle indices.
///
/// # Format
///
/// Padding up to the next multiple of the index width, a `u32` triangle count
/// `t`, then `3 * t` indices of `width`.
pub fn decode_triangle_indices(
    cursor: &mut Cursor<'_>,
    width: IndexWidth,
) -> DecodeResult<Indices> {
    cursor.align_to(width.bytes())?;

    let triangle_count = cursor.read_count()?;
    let mut indices = read_index_list(cursor, triangle_count.saturating_mul(3), width)?;
    match &mut indices {
        Indices::U16(codes) => {
            decode_high_water_mark(codes);
        }
        Indices::U32(codes) => {
            decode_high_water_mark(codes);
        }
    }

    Ok(indices)
}
