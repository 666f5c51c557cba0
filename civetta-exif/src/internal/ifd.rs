use civetta_common::math::*;

use super::{ByteOrder, ExifBlob, Tag, Type};
use crate::error::{Error, Result, ResultExt};

/// Size of a directory entry in bytes
pub const ENTRY_SIZE: u32 = 12;

/// A single entry of an image file directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Position of the entry relative to the TIFF header
    pub position: u32,
    pub tag: Tag,
    pub data_type: Type,
    pub count: u32,
    pub value_offset: ValueOffset,
}

impl Entry {
    /// Decode the fields of an entry one by one
    pub fn decode(bytes: [u8; 12], position: u32, byte_order: ByteOrder) -> Self {
        let [t0, t1, d0, d1, c0, c1, c2, c3, v0, v1, v2, v3] = bytes;

        let tag = Tag(byte_order.u16([t0, t1]));
        let data_type = Type::from(byte_order.u16([d0, d1]));
        let count = byte_order.u32([c0, c1, c2, c3]);
        let value_offset = ValueOffset::new(data_type, count, [v0, v1, v2, v3], byte_order);

        Self {
            position,
            tag,
            data_type,
            count,
            value_offset,
        }
    }

    /// Position of the four value or offset bytes
    pub fn value_offset_position(&self) -> Result<u32> {
        Ok(self.position.safe_add(8)?)
    }

    /// Length of the value in bytes
    pub fn data_len(&self) -> Result<u64> {
        self.data_type.data_len(self.count)
    }

    pub fn offset(&self) -> Option<u32> {
        if let ValueOffset::Offset(offset) = self.value_offset {
            Some(offset)
        } else {
            None
        }
    }
}

/// This can either be a value or an offset where to find the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOffset {
    /// Value bytes as stored, left aligned
    Value([u8; 4]),
    Offset(u32),
}

impl ValueOffset {
    pub fn new(data_type: Type, count: u32, raw: [u8; 4], byte_order: ByteOrder) -> Self {
        if data_type.is_always_indirect() {
            return Self::Offset(byte_order.u32(raw));
        }

        match data_type.data_len(count) {
            Ok(len) if len > 4 => Self::Offset(byte_order.u32(raw)),
            // Unknown types are kept as they are
            _ => Self::Value(raw),
        }
    }
}

/// Entries of one image file directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    offset: u32,
    entries: Vec<Entry>,
    next_offset: u32,
}

impl Directory {
    /// Read the directory at `offset`
    ///
    /// Fails if the entry count, any entry, or the next directory offset are
    /// outside of the data.
    pub fn read(blob: &ExifBlob, offset: u32) -> Result<Self> {
        let byte_order = blob.byte_order();

        let n_entries = blob.read_u16(offset)?;
        tracing::debug!("Reading directory at {offset} with {n_entries} entries");

        let count = u32::from(n_entries);
        let entry_size = ENTRY_SIZE;
        let ifd_offset = offset;
        checked![ifd_offset, count, entry_size];

        let entries_start = ifd_offset + 2_u32;
        let entries_len = count * entry_size;
        let next_offset_position = entries_start + entries_len;

        let raw_entries = blob.get(entries_start.check()?, entries_len.check()?)?;
        let next_offset = blob.read_u32(next_offset_position.check()?)?;

        let mut entries = Vec::with_capacity(n_entries.into());
        let mut position = entries_start.check()?;
        for chunk in raw_entries.chunks_exact(entry_size.usize().check()?) {
            let bytes = chunk.try_into().e(Error::OutOfBounds {
                start: position.into(),
                end: u64::from(position).saturating_add(ENTRY_SIZE.into()),
                len: blob.len(),
            })?;
            entries.push(Entry::decode(bytes, position, byte_order));
            position = position.safe_add(ENTRY_SIZE)?;
        }

        Ok(Self {
            offset,
            entries,
            next_offset,
        })
    }

    /// Position of the directory relative to the TIFF header
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Entries in the order they are stored
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offset of the next directory in the chain, `0` if this is the last one
    pub fn next_offset(&self) -> u32 {
        self.next_offset
    }

    pub fn has_next(&self) -> bool {
        self.next_offset != 0
    }

    /// First entry with the given tag
    ///
    /// Directories can contain the same tag more than once.
    pub fn find(&self, tag: Tag) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }
}
