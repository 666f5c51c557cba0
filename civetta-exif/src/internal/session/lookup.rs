use civetta_common::field;

use super::*;
use crate::error::{Error, Result};

impl super::Session {
    /// Offset of a directory
    ///
    /// Returns `None` if the file doesn't contain the directory.
    pub fn ifd_offset(&self, ifd: Ifd) -> Result<Option<u32>> {
        let (parent, pointer) = match ifd {
            Ifd::Primary => return Ok(Some(self.ifd0_offset)),
            Ifd::Thumbnail => return self.chained_offset(1),
            Ifd::Chained(index) => return self.chained_offset(index),
            Ifd::Exif => (Ifd::Primary, Tag::EXIF_IFD_POINTER),
            Ifd::Gps => (Ifd::Primary, Tag::GPS_INFO_IFD_POINTER),
            Ifd::Interoperability => (Ifd::Exif, Tag::INTEROPERABILITY_IFD_POINTER),
        };

        let Some(entry) = self.lookup_entry(TagIfd::new(pointer, parent))? else {
            return Ok(None);
        };

        self.u32_value(&entry).map(Some)
    }

    /// Offset of the directory at position `index` in the IFD chain
    fn chained_offset(&self, index: u16) -> Result<Option<u32>> {
        let mut traversal = Traversal::new();
        let mut offset = self.ifd0_offset;

        for _ in 0..index {
            traversal.visit(offset)?;
            let next = self.read_directory(offset)?.next_offset();
            if next == 0 {
                return Ok(None);
            }
            if traversal.is_visited(next) {
                return Err(Error::TraversalLimitExceeded {
                    offset: next,
                    visited: traversal.len(),
                });
            }
            offset = next;
        }

        Ok(Some(offset))
    }

    /// Decode a directory by its role
    pub fn directory(&self, ifd: Ifd) -> Result<Option<Directory>> {
        match self.ifd_offset(ifd)? {
            Some(offset) => self.read_directory(offset).map(Some),
            None => Ok(None),
        }
    }

    /// First entry for the tag in the directory
    pub fn lookup_entry(&self, tagifd: impl Into<TagIfd>) -> Result<Option<Entry>> {
        let tagifd = tagifd.into();
        let Some(directory) = self.directory(tagifd.ifd)? else {
            return Ok(None);
        };

        Ok(directory.find(tagifd.tag).copied())
    }

    pub fn lookup_value(&self, tagifd: impl Into<TagIfd>) -> Result<Option<Value<'_>>> {
        match self.lookup_entry(tagifd)? {
            Some(entry) => self.decode_value(&entry).map(Some),
            None => Ok(None),
        }
    }

    /// First element of a [`Type::Short`] field
    pub fn lookup_short(&self, tagifd: impl Into<TagIfd>) -> Result<Option<u16>> {
        match self.lookup_entry(tagifd)? {
            Some(entry) => self.short_value(&entry).map(Some),
            None => Ok(None),
        }
    }

    /// First element of a [`Type::Long`] field
    pub fn lookup_long(&self, tagifd: impl Into<TagIfd>) -> Result<Option<u32>> {
        let Some(entry) = self.lookup_entry(tagifd)? else {
            return Ok(None);
        };
        check_type(&entry, Type::Long, 1)?;

        match self.decode_value(&entry)? {
            Value::Long(v) => Ok(v.first()),
            _ => Ok(None),
        }
    }

    /// Single [`Type::Short`] or [`Type::Long`] field
    pub fn lookup_u32(&self, tagifd: impl Into<TagIfd>) -> Result<Option<u32>> {
        match self.lookup_entry(tagifd)? {
            Some(entry) => self.u32_value(&entry).map(Some),
            None => Ok(None),
        }
    }

    /// First element of a [`Type::Rational`] field
    pub fn lookup_rational(&self, tagifd: impl Into<TagIfd>) -> Result<Option<Rational>> {
        let Some(entry) = self.lookup_entry(tagifd)? else {
            return Ok(None);
        };
        check_type(&entry, Type::Rational, 1)?;

        match self.decode_value(&entry)? {
            Value::Rational(v) => Ok(v.first()),
            _ => Ok(None),
        }
    }

    /// Returns a field of [`Type::Ascii`] with all bytes as stored
    pub fn lookup_ascii(&self, tagifd: impl Into<TagIfd>) -> Result<Option<&[u8]>> {
        let Some(entry) = self.lookup_entry(tagifd)? else {
            return Ok(None);
        };
        check_type(&entry, Type::Ascii, 0)?;

        Ok(Some(self.decode_value(&entry)?.as_bytes()))
    }

    /// Returns a field of [`Type::Ascii`]
    ///
    /// All NUL bytes are removed, not only the terminating one. Many writers
    /// add them as padding at the end or the beginning.
    pub fn lookup_string(&self, tagifd: impl Into<TagIfd>) -> Result<Option<String>> {
        let Some(data) = self.lookup_ascii(tagifd)? else {
            return Ok(None);
        };

        let data = data.iter().copied().filter(|x| *x != 0).collect::<Vec<_>>();

        Ok(Some(String::from_utf8_lossy(&data).into_owned()))
    }

    /// Like [`Self::lookup_short`] but fails if the field is missing
    pub fn require_short(&self, tagifd: impl Into<TagIfd>) -> Result<u16> {
        let tagifd = tagifd.into();
        self.lookup_short(tagifd)?.ok_or(Error::MissingTag(tagifd))
    }

    /// Orientation of the main image
    pub fn orientation(&self) -> Result<Option<u16>> {
        self.lookup_short(field::Orientation)
    }

    /// First element of a `SHORT` entry
    pub fn short_value(&self, entry: &Entry) -> Result<u16> {
        check_type(entry, Type::Short, 1)?;

        match self.decode_value(entry)? {
            Value::Short(v) => v.first().ok_or_else(|| wrong_type(entry, Type::Short, 1)),
            _ => Err(wrong_type(entry, Type::Short, 1)),
        }
    }

    /// Value of a single `SHORT` or `LONG` entry
    ///
    /// Offsets and lengths are stored as either type.
    pub fn u32_value(&self, entry: &Entry) -> Result<u32> {
        self.decode_value(entry)?
            .as_u32()
            .ok_or_else(|| wrong_type(entry, Type::Long, 1))
    }
}

/// Checks type and minimum count of an entry
pub(crate) fn check_type(entry: &Entry, data_type: Type, min_count: u32) -> Result<()> {
    if entry.data_type == data_type && entry.count >= min_count {
        Ok(())
    } else {
        Err(wrong_type(entry, data_type, min_count))
    }
}

fn wrong_type(entry: &Entry, data_type: Type, count: u32) -> Error {
    Error::WrongType {
        expected: (count, data_type),
        actual: (entry.count, entry.data_type),
    }
}
