//! Bounds-checked reads over an immutable catalog buffer.

use motext_core::error::{MotextError, MotextResult};

/// Byte order of the 32-bit integers in a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Written on a little-endian host (magic reads as `0x950412de`).
    #[default]
    Little,
    /// Written on a big-endian host (magic reads as `0xde120495` little-endian).
    Big,
}

/// Fixed-width integer and slice extraction with range checks.
///
/// Every read either returns data from inside the buffer or fails with
/// [`MotextError::OutOfBounds`]; nothing panics on a truncated catalog.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    order: ByteOrder,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader over `data` that decodes integers in `order`.
    pub const fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self { data, order }
    }

    /// Size of the underlying buffer in bytes.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer is empty.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The byte order integers are decoded in.
    pub const fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Returns `data[offset..offset + length]`.
    pub fn read_string(&self, offset: usize, length: usize) -> MotextResult<&'a [u8]> {
        offset
            .checked_add(length)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(MotextError::OutOfBounds {
                offset,
                length,
                size: self.data.len(),
            })
    }

    /// Reads an unsigned 32-bit integer at `offset`.
    pub fn read_u32(&self, offset: usize) -> MotextResult<u32> {
        let bytes: [u8; 4] = self
            .read_string(offset, 4)?
            .try_into()
            .map_err(|_| MotextError::catalog("short integer read"))?;
        Ok(match self.order {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        })
    }

    /// Reads a signed 32-bit integer at `offset`.
    pub fn read_int(&self, offset: usize) -> MotextResult<i32> {
        self.read_u32(offset).map(|value| i32::from_ne_bytes(value.to_ne_bytes()))
    }

    /// Reads a signed 32-bit integer that must be a non-negative size or offset.
    ///
    /// `what` names the field in the error message.
    pub fn read_size(&self, offset: usize, what: &str) -> MotextResult<usize> {
        let value = self.read_int(offset)?;
        usize::try_from(value).map_err(|_| {
            MotextError::catalog(format!("{what} at byte {offset} is negative ({value})"))
        })
    }
}
