crate::utils::maybe_convertible_enum!(
    #[repr(u16)]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    /// Operations that have to be applied to orient the image correctly
    ///
    /// The values are the ones stored in the Exif `Orientation` tag.
    pub enum Orientation {
        Id = 1,
        Mirrored = 2,
        Rotation180 = 3,
        MirroredRotation180 = 4,
        MirroredRotation90 = 5,
        Rotation270 = 6,
        MirroredRotation270 = 7,
        Rotation90 = 8,
    }
);

/// Counter-clockwise rotation in multiples of 90 degrees
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    _0,
    _90,
    _180,
    _270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::_0 => 0,
            Rotation::_90 => 90,
            Rotation::_180 => 180,
            Rotation::_270 => 270,
        }
    }
}

impl Orientation {
    /// Whether the image has to be mirrored horizontally
    ///
    /// ```
    /// # use civetta_common::orientation::*;
    /// assert!(Orientation::try_from(7).unwrap().mirror());
    /// assert!(!Orientation::Rotation270.mirror());
    /// ```
    pub fn mirror(self) -> bool {
        matches!(
            self,
            Self::Mirrored
                | Self::MirroredRotation90
                | Self::MirroredRotation180
                | Self::MirroredRotation270
        )
    }

    /// Rotation to apply after mirroring
    ///
    /// ```
    /// # use civetta_common::orientation::*;
    /// assert_eq!(Orientation::try_from(6).unwrap().rotate(), Rotation::_270);
    /// assert_eq!(Orientation::MirroredRotation90.rotate(), Rotation::_90);
    /// ```
    pub fn rotate(self) -> Rotation {
        match self {
            Self::Id | Self::Mirrored => Rotation::_0,
            Self::Rotation90 | Self::MirroredRotation90 => Rotation::_90,
            Self::Rotation180 | Self::MirroredRotation180 => Rotation::_180,
            Self::Rotation270 | Self::MirroredRotation270 => Rotation::_270,
        }
    }
}
