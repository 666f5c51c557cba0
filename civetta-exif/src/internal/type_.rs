use crate::error::{Error, Result};

civetta_common::utils::convertible_enum!(
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Type {
        Byte = 1,
        Ascii = 2,
        Short = 3,
        Long = 4,
        Rational = 5,
        SByte = 6,
        Undefined = 7,
        SShort = 8,
        SLong = 9,
        SRational = 10,
        Float = 11,
        Double = 12,
    }
);

impl Type {
    /// Size of one element in bytes
    pub fn size(self) -> Option<u32> {
        match self {
            Self::Byte | Self::Ascii | Self::SByte | Self::Undefined => Some(1),
            Self::Short | Self::SShort => Some(2),
            Self::Long | Self::SLong | Self::Float => Some(4),
            Self::Rational | Self::SRational | Self::Double => Some(8),
            Self::Unknown(_) => None,
        }
    }

    /// Size of `count` elements in bytes
    pub fn data_len(self, count: u32) -> Result<u64> {
        let size = self.size().ok_or(Error::UnknownType(self.u16()))?;
        Ok(u64::from(count).saturating_mul(u64::from(size)))
    }

    /// Rationals never fit into an entry, independent of the count
    pub fn is_always_indirect(self) -> bool {
        matches!(self, Self::Rational | Self::SRational)
    }

    pub fn u16(self) -> u16 {
        self.into()
    }
}
