use crate::error::FormatError;

/// Forward-only little-endian reader over an in-memory stroke file.
///
/// Every read is bounds-checked against the remaining buffer and fails
/// with [`FormatError::Truncated`] rather than panicking. There is no
/// alignment padding anywhere in the format, so reads advance by exactly
/// the number of bytes consumed.
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, need: usize) -> Result<&'a [u8], FormatError> {
        if self.remaining() < need {
            return Err(FormatError::Truncated { offset: self.pos, need });
        }
        let bytes = &self.data[self.pos..self.pos + need];
        self.pos += need;
        Ok(bytes)
    }

    /// Read a fixed-length byte run, e.g. the ASCII header tag.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        self.take(len)
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        let bytes = self.take(4)?;
        Ok(f32::from_le_bytes(bytes.try_into().unwrap()))
    }
}
