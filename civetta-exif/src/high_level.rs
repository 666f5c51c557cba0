use std::io::Read;

use civetta_common::field;
use civetta_common::orientation::Orientation;

use crate::error::Result;
use crate::internal::*;

/// Convenient access to common Exif fields
///
/// Fields that are missing or can't be decoded are returned as `None`.
#[derive(Debug, Clone)]
pub struct Exif {
    session: Session,
}

impl Exif {
    /// Read the Exif data from a JPEG stream
    ///
    /// Returns `None` if the image has no Exif segment.
    pub fn open(reader: impl Read) -> Result<Option<Self>> {
        Ok(Session::open(reader)?.map(Self::from))
    }

    /// Exif data starting with the TIFF header
    pub fn new(data: Vec<u8>) -> Result<Self> {
        Ok(Self {
            session: Session::new(data)?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Image orientation
    ///
    /// Rotation and mirroring that have to be applied to show the image
    /// correctly
    pub fn orientation(&self) -> Orientation {
        self.session
            .lookup_short(field::Orientation)
            .ok()
            .flatten()
            .and_then(|x| Orientation::try_from(x).ok())
            .unwrap_or(Orientation::Id)
    }

    /// Camera manufacturer
    pub fn make(&self) -> Option<String> {
        self.session.lookup_string(field::Make).ok()?
    }

    /// Camera model
    pub fn model(&self) -> Option<String> {
        self.session.lookup_string(field::Model).ok()?
    }

    /// ISO
    pub fn iso_speed_rating(&self) -> Option<u16> {
        self.session
            .lookup_short(field::PhotographicSensitivity)
            .ok()?
    }

    /// Aperture
    pub fn f_number(&self) -> Option<f64> {
        self.rational(field::FNumber)
    }

    /// Focal length in mm
    pub fn focal_length(&self) -> Option<f64> {
        self.rational(field::FocalLength)
    }

    /// Exposure time in seconds
    ///
    /// The numerator is typically one, such that the value is given in its
    /// common form like "1/60 sec".
    pub fn exposure_time(&self) -> Option<Rational> {
        self.session.lookup_rational(field::ExposureTime).ok()?
    }

    /// Capture time in the form `2024-05-17T14:03:21.25+02:00`
    ///
    /// Sub-seconds and the offset are only added if they are stored.
    pub fn date_time_original(&self) -> Option<String> {
        let raw = self.session.lookup_string(field::DateTimeOriginal).ok()??;
        let (date, time) = raw.trim().split_once(' ')?;
        let mut datetime = format!("{}T{}", date.replace(':', "-"), time);

        if let Some(subsec) = self
            .session
            .lookup_string(field::SubSecTimeOriginal)
            .ok()
            .flatten()
        {
            let subsec = subsec.trim();
            if !subsec.is_empty() {
                datetime.push('.');
                datetime.push_str(subsec);
            }
        }

        if let Some(offset) = self
            .session
            .lookup_string(field::OffsetTimeOriginal)
            .ok()
            .flatten()
        {
            datetime.push_str(offset.trim());
        }

        Some(datetime)
    }

    /// Embedded JPEG thumbnail
    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.session.extract_thumbnail().ok()?.data
    }

    pub fn debug_dump(&self) -> Result<String> {
        self.session.debug_dump()
    }

    fn rational(&self, tagifd: impl Into<TagIfd>) -> Option<f64> {
        self.session
            .lookup_rational(tagifd)
            .ok()??
            .to_f64()
            .ok()
    }
}

impl From<Session> for Exif {
    fn from(session: Session) -> Self {
        Self { session }
    }
}
