//! Exif tags and image file directories

mod tag_names;

pub use tag_names::{lookup_tag_name, tag_name};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagIfd {
    pub tag: Tag,
    pub ifd: Ifd,
}

impl TagIfd {
    pub fn new(tag: Tag, ifd: Ifd) -> Self {
        Self { tag, ifd }
    }
}

impl<T: Field> From<T> for TagIfd {
    fn from(_value: T) -> Self {
        TagIfd {
            tag: T::TAG,
            ifd: T::IFD,
        }
    }
}

/// Statically known Exif field
pub trait Field {
    const NAME: &'static str;
    const TAG: Tag;
    const IFD: Ifd;
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag(pub u16);

impl Tag {
    pub const EXIF_IFD_POINTER: Self = Self(0x8769);
    pub const GPS_INFO_IFD_POINTER: Self = Self(0x8825);
    pub const INTEROPERABILITY_IFD_POINTER: Self = Self(0xA005);

    /// Directory the tag points to, if it is a sub-directory pointer
    ///
    /// ```
    /// # use civetta_common::exif::{Ifd, Tag};
    /// assert_eq!(Tag(0x8769).exif_specific_ifd(), Some(Ifd::Exif));
    /// assert_eq!(Tag(0x0112).exif_specific_ifd(), None);
    /// ```
    pub fn exif_specific_ifd(&self) -> Option<Ifd> {
        match *self {
            Self::EXIF_IFD_POINTER => Some(Ifd::Exif),
            Self::GPS_INFO_IFD_POINTER => Some(Ifd::Gps),
            Self::INTEROPERABILITY_IFD_POINTER => Some(Ifd::Interoperability),
            _ => None,
        }
    }

    pub fn is_exif_specific_ifd(&self) -> bool {
        self.exif_specific_ifd().is_some()
    }

    /// Human readable name for diagnostics
    pub fn name(&self) -> Option<&'static str> {
        tag_name(self.0)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Image file directory
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ifd {
    /// IFD0, describing the main image
    Primary,
    /// IFD1, describing the embedded thumbnail
    Thumbnail,
    /// Further directories in the IFD chain, counted from IFD0
    Chained(u16),
    Exif,
    Gps,
    Interoperability,
}

impl Ifd {
    /// Label for the directory at position `index` of the IFD chain
    pub fn chained(index: u16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Thumbnail,
            n => Self::Chained(n),
        }
    }
}
