use civetta_common::math::*;

use super::{ByteOrder, Type, Value};
use crate::error::{Error, Result};

/// The TIFF structure of an Exif segment
///
/// Offset `0` is the byte order marker of the TIFF header. All offsets stored
/// in the data are relative to that position.
#[derive(Debug, Clone)]
pub struct ExifBlob {
    data: Vec<u8>,
    byte_order: ByteOrder,
}

impl ExifBlob {
    pub fn new(data: Vec<u8>, byte_order: ByteOrder) -> Self {
        Self { data, byte_order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Returns `len` bytes starting at `offset`
    ///
    /// Fails with [`Error::OutOfBounds`] if any of the bytes is missing.
    pub fn get(&self, offset: u32, len: impl Into<u64>) -> Result<&[u8]> {
        let start = u64::from(offset);
        let end = start.saturating_add(len.into());

        let out_of_bounds = || Error::OutOfBounds {
            start,
            end,
            len: self.data.len(),
        };

        if end > self.data.len().u64()? {
            return Err(out_of_bounds());
        }

        self.data
            .get(start.usize()?..end.usize()?)
            .ok_or_else(out_of_bounds)
    }

    pub fn read_array<const N: usize>(&self, offset: u32) -> Result<[u8; N]> {
        let bytes = self.get(offset, N.u64()?)?;
        bytes.try_into().map_err(|_| Error::OutOfBounds {
            start: offset.into(),
            end: u64::from(offset).saturating_add(N.u64().unwrap_or(u64::MAX)),
            len: self.data.len(),
        })
    }

    pub fn read_u16(&self, offset: u32) -> Result<u16> {
        Ok(self.byte_order.u16(self.read_array(offset)?))
    }

    pub fn read_u32(&self, offset: u32) -> Result<u32> {
        Ok(self.byte_order.u32(self.read_array(offset)?))
    }

    /// Decode `count` values of `data_type` stored at `offset`
    ///
    /// This is the indirect path of value decoding. It is used for entries
    /// whose values don't fit into the entry itself.
    pub fn value_at(&self, data_type: Type, count: u32, offset: u32) -> Result<Value<'_>> {
        let len = data_type.data_len(count)?;

        Value::from_bytes(data_type, self.get(offset, len)?, self.byte_order)
    }
}
