//! Little-endian read cursor over a tile buffer.

use crate::DecodingStep;
use crate::error::{DecodeError, DecodeResult};

/// Read cursor over a byte slice. All reads are little-endian.
///
/// The cursor remembers which [`DecodingStep`] is reading so that a short
/// buffer is reported against the stage that needed the bytes.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    /// Absolute offset of `data[0]` within the tile.
    base: usize,
    step: DecodingStep,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of a tile, reading the header.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
            step: DecodingStep::Header,
        }
    }

    /// Absolute byte position within the tile.
    #[must_use]
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    /// Remaining bytes from current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Whether every byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Mark the start of a new stage.
    pub fn begin(&mut self, step: DecodingStep) {
        self.step = step;
    }

    /// Skip `n` bytes forward.
    pub fn skip(&mut self, n: usize) -> DecodeResult<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Skip forward to the next multiple of `alignment`, measured from the
    /// start of the tile.
    pub fn align_to(&mut self, alignment: usize) -> DecodeResult<()> {
        let misalignment = self.position() % alignment;
        if misalignment != 0 {
            self.skip(alignment - misalignment)?;
        }
        Ok(())
    }

    /// Read a slice of `n` bytes without copying.
    pub fn read_bytes(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Split off the next `n` bytes as a cursor of their own, advancing past them.
    ///
    /// Positions reported by the returned cursor stay absolute.
    pub fn split(&mut self, n: usize) -> DecodeResult<Cursor<'a>> {
        let base = self.position();
        let data = self.read_bytes(n)?;
        Ok(Cursor {
            data,
            pos: 0,
            base,
            step: self.step,
        })
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        self.ensure(1)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> DecodeResult<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Read a `u32` count and widen it for use as a length.
    pub fn read_count(&mut self) -> DecodeResult<usize> {
        Ok(self.read_u32()? as usize)
    }

    /// Read `count` consecutive `u16` values.
    pub fn read_u16_array(&mut self, count: usize) -> DecodeResult<Vec<u16>> {
        let bytes = self.read_bytes(self.array_len(count, 2)?)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect())
    }

    /// Read `count` consecutive `u32` values.
    pub fn read_u32_array(&mut self, count: usize) -> DecodeResult<Vec<u32>> {
        let bytes = self.read_bytes(self.array_len(count, 4)?)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Byte length of `count` elements of `width` bytes, failing if it cannot
    /// be represented (such an array can never fit in the buffer).
    fn array_len(&self, count: usize, width: usize) -> DecodeResult<usize> {
        count
            .checked_mul(width)
            .ok_or_else(|| self.truncated(usize::MAX))
    }

    fn ensure(&self, n: usize) -> DecodeResult<()> {
        if n > self.remaining() {
            return Err(self.truncated(n));
        }
        Ok(())
    }

    fn truncated(&self, need: usize) -> DecodeError {
        DecodeError::Truncated {
            step: self.step,
            offset: self.position(),
            need,
            have: self.remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u8().unwrap(), 0x01);
        assert_eq!(cursor.read_u16().unwrap(), 0x0302);
        assert_eq!(cursor.read_u32().unwrap(), 0x0706_0504);
        assert!(cursor.is_empty());
        assert_eq!(cursor.position(), 7);
    }

    #[test]
    fn test_short_read_reports_step_and_offset() {
        let data = [0u8; 3];
        let mut cursor = Cursor::new(&data);
        cursor.skip(1).unwrap();
        cursor.begin(DecodingStep::Vertices);

        let err = cursor.read_u32().unwrap_err();
        match err {
            DecodeError::Truncated {
                step,
                offset,
                need,
                have,
            } => {
                assert_eq!(step, DecodingStep::Vertices);
                assert_eq!(offset, 1);
                assert_eq!(need, 4);
                assert_eq!(have, 2);
            }
            DecodeError::MalformedMetadata { .. } => panic!("unexpected error: {err}"),
        }
        // A failed read does not move the cursor.
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_align_to() {
        let data = [0u8; 8];
        let mut cursor = Cursor::new(&data);

        cursor.align_to(4).unwrap();
        assert_eq!(cursor.position(), 0);

        cursor.skip(1).unwrap();
        cursor.align_to(2).unwrap();
        assert_eq!(cursor.position(), 2);

        cursor.skip(1).unwrap();
        cursor.align_to(4).unwrap();
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_align_past_end_fails() {
        let data = [0u8; 5];
        let mut cursor = Cursor::new(&data);
        cursor.skip(5).unwrap();
        assert!(cursor.align_to(4).is_err());
    }

    #[test]
    fn test_split_keeps_absolute_positions() {
        let data = [9, 1, 0, 0, 0, 7];
        let mut cursor = Cursor::new(&data);
        cursor.skip(1).unwrap();

        let mut inner = cursor.split(4).unwrap();
        assert_eq!(cursor.position(), 5);
        assert_eq!(inner.position(), 1);
        assert_eq!(inner.read_u32().unwrap(), 1);
        assert!(inner.is_empty());
        assert_eq!(inner.position(), 5);

        // The split view cannot read into bytes owned by the parent.
        assert!(inner.read_u8().is_err());
        assert_eq!(cursor.read_u8().unwrap(), 7);
    }

    #[test]
    fn test_oversized_array_is_truncation() {
        let data = [0u8; 4];
        let mut cursor = Cursor::new(&data);
        assert!(matches!(
            cursor.read_u32_array(usize::MAX),
            Err(DecodeError::Truncated { .. })
        ));
        assert!(matches!(
            cursor.read_u16_array(3),
            Err(DecodeError::Truncated { need: 6, .. })
        ));
    }
}
