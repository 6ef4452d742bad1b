//! Tile header decoding.

use glam::DVec3;

use crate::cursor::Cursor;
use crate::error::DecodeResult;

/// Storage kind of a header field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 4-byte IEEE-754 single precision.
    F32,
    /// 8-byte IEEE-754 double precision.
    F64,
}

impl FieldKind {
    /// Width of the field in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }
}

/// Named fields of the tile header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    CenterX,
    CenterY,
    CenterZ,
    MinHeight,
    MaxHeight,
    BoundingSphereCenterX,
    BoundingSphereCenterY,
    BoundingSphereCenterZ,
    BoundingSphereRadius,
    HorizonOcclusionPointX,
    HorizonOcclusionPointY,
    HorizonOcclusionPointZ,
}

impl HeaderField {
    /// Field name as used by the format documentation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CenterX => "centerX",
            Self::CenterY => "centerY",
            Self::CenterZ => "centerZ",
            Self::MinHeight => "minHeight",
            Self::MaxHeight => "maxHeight",
            Self::BoundingSphereCenterX => "boundingSphereCenterX",
            Self::BoundingSphereCenterY => "boundingSphereCenterY",
            Self::BoundingSphereCenterZ => "boundingSphereCenterZ",
            Self::BoundingSphereRadius => "boundingSphereRadius",
            Self::HorizonOcclusionPointX => "horizonOcclusionPointX",
            Self::HorizonOcclusionPointY => "horizonOcclusionPointY",
            Self::HorizonOcclusionPointZ => "horizonOcclusionPointZ",
        }
    }

    /// Position of the field in [`HEADER_LAYOUT`].
    const fn slot(self) -> usize {
        self as usize
    }
}

/// Wire layout of the header, in order. Order and widths must not change.
pub const HEADER_LAYOUT: [(HeaderField, FieldKind); 12] = [
    (HeaderField::CenterX, FieldKind::F64),
    (HeaderField::CenterY, FieldKind::F64),
    (HeaderField::CenterZ, FieldKind::F64),
    (HeaderField::MinHeight, FieldKind::F32),
    (HeaderField::MaxHeight, FieldKind::F32),
    (HeaderField::BoundingSphereCenterX, FieldKind::F64),
    (HeaderField::BoundingSphereCenterY, FieldKind::F64),
    (HeaderField::BoundingSphereCenterZ, FieldKind::F64),
    (HeaderField::BoundingSphereRadius, FieldKind::F64),
    (HeaderField::HorizonOcclusionPointX, FieldKind::F64),
    (HeaderField::HorizonOcclusionPointY, FieldKind::F64),
    (HeaderField::HorizonOcclusionPointZ, FieldKind::F64),
];

/// Total size of the header in bytes.
pub const HEADER_SIZE: usize = {
    let mut size = 0;
    let mut i = 0;
    while i < HEADER_LAYOUT.len() {
        size += HEADER_LAYOUT[i].1.width();
        i += 1;
    }
    size
};

const _: () = assert!(HEADER_SIZE == 88);

/// Decoded tile header.
///
/// Single-precision fields are widened to `f64`, which is lossless.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Header {
    values: [f64; HEADER_LAYOUT.len()],
}

impl Header {
    /// Value of a single field.
    #[must_use]
    pub fn get(&self, field: HeaderField) -> f64 {
        self.values[field.slot()]
    }

    /// All fields with their names, in wire order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        HEADER_LAYOUT
            .iter()
            .map(|&(field, _)| (field.name(), self.get(field)))
    }

    /// Tile center in Earth-centered Earth-fixed coordinates.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        DVec3::new(
            self.get(HeaderField::CenterX),
            self.get(HeaderField::CenterY),
            self.get(HeaderField::CenterZ),
        )
    }

    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.get(HeaderField::MinHeight)
    }

    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.get(HeaderField::MaxHeight)
    }

    #[must_use]
    pub fn bounding_sphere_center(&self) -> DVec3 {
        DVec3::new(
            self.get(HeaderField::BoundingSphereCenterX),
            self.get(HeaderField::BoundingSphereCenterY),
            self.get(HeaderField::BoundingSphereCenterZ),
        )
    }

    #[must_use]
    pub fn bounding_sphere_radius(&self) -> f64 {
        self.get(HeaderField::BoundingSphereRadius)
    }

    /// Horizon occlusion point, in ellipsoid-scaled coordinates.
    #[must_use]
    pub fn horizon_occlusion_point(&self) -> DVec3 {
        DVec3::new(
            self.get(HeaderField::HorizonOcclusionPointX),
            self.get(HeaderField::HorizonOcclusionPointY),
            self.get(HeaderField::HorizonOcclusionPointZ),
        )
    }
}

/// Decode the fixed-size header at the cursor.
///
/// # Format
///
/// Twelve little-endian floats in [`HEADER_LAYOUT`] order, 88 bytes in total.
/// Values are not range-checked.
pub fn decode_header(cursor: &mut Cursor<'_>) -> DecodeResult<Header> {
    let mut header = Header::default();
    for &(field, kind) in &HEADER_LAYOUT {
        header.values[field.slot()] = match kind {
            FieldKind::F32 => f64::from(cursor.read_f32()?),
            FieldKind::F64 => cursor.read_f64()?,
        };
    }
    Ok(header)
}
