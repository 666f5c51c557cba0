use std::io::Read;

use crate::{Error, Marker, EXIF_IDENTIFIER_STRING, MARKER_START, SOI};

/// Progress of a [`Scanner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Start of image not read yet
    Start,
    /// Positioned in front of a marker
    SeekingMarker,
    /// A segment header was read and its payload not consumed yet
    InSegment,
    /// Exif segment was returned
    FoundApp1,
    /// Image data started without an Exif segment
    NoExifFound,
    /// The stream is not a valid JPEG
    Malformed,
}

impl ScanState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::FoundApp1 | Self::NoExifFound | Self::Malformed)
    }
}

/// Marker and length of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHeader {
    pub marker: Marker,
    /// Length as stored, including the two length bytes
    pub length: u16,
    /// Position of the marker in the stream
    pub pos: u64,
}

impl SegmentHeader {
    /// Number of payload bytes following the length field
    pub fn data_len(&self) -> u16 {
        // Header lengths below 2 are rejected when reading
        self.length.saturating_sub(2)
    }
}

#[derive(Debug)]
pub enum ScanOutcome {
    /// Payload of the Exif APP1 segment, starting with [`EXIF_IDENTIFIER_STRING`]
    Exif(Vec<u8>),
    /// Start of scan reached without an Exif segment
    NoExif,
}

/// Walks the marker segments of a JPEG stream
///
/// Only the data of the Exif segment is loaded into memory. All other segment
/// payloads are read past.
#[derive(Debug)]
pub struct Scanner<R> {
    reader: R,
    state: ScanState,
    pos: u64,
    current: Option<SegmentHeader>,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: ScanState::Start,
            pos: 0,
            current: None,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Convenience function to search a stream for Exif data
    pub fn find_exif_in(reader: R) -> Result<ScanOutcome, Error> {
        Self::new(reader).find_exif()
    }

    /// Search for the Exif segment
    ///
    /// Other segments, including APP1 segments that carry XMP, are skipped.
    /// Reaching the start of scan is not an error but gives
    /// [`ScanOutcome::NoExif`].
    pub fn find_exif(&mut self) -> Result<ScanOutcome, Error> {
        loop {
            let header = self.next_segment()?;

            match header.marker {
                Marker::APP1 => {
                    let data = self.read_payload()?;
                    if data.starts_with(EXIF_IDENTIFIER_STRING) {
                        tracing::debug!("Exif segment with {} bytes at {}", data.len(), header.pos);
                        self.state = ScanState::FoundApp1;
                        return Ok(ScanOutcome::Exif(data));
                    }
                    tracing::info!("Skipping APP1 segment at {} without Exif identifier", header.pos);
                }
                Marker::SOS => {
                    tracing::debug!("Reached start of scan at {} without Exif", header.pos);
                    self.state = ScanState::NoExifFound;
                    return Ok(ScanOutcome::NoExif);
                }
                _ => self.skip_payload()?,
            }
        }
    }

    /// Read the next segment header
    ///
    /// Reads the start of image first if that didn't happen yet. A payload of
    /// the previous segment that was not consumed is skipped.
    pub fn next_segment(&mut self) -> Result<SegmentHeader, Error> {
        match self.state {
            ScanState::Start => self.guard(Self::read_soi)?,
            ScanState::InSegment => self.skip_payload()?,
            ScanState::SeekingMarker => {}
            terminal => return Err(Error::ScanFinished(terminal)),
        }

        let header = self.guard(Self::read_segment_header)?;
        tracing::debug!(
            "Segment {:?} with length {} at {}",
            header.marker,
            header.length,
            header.pos
        );

        self.current = Some(header);
        self.state = ScanState::InSegment;

        Ok(header)
    }

    /// Load the payload of the current segment
    pub fn read_payload(&mut self) -> Result<Vec<u8>, Error> {
        let Some(header) = self.take_current()? else {
            return Ok(Vec::new());
        };

        self.guard(|scanner| {
            let mut data = vec![0; usize::from(header.data_len())];
            scanner.reader.read_exact(&mut data)?;
            scanner.advance(header.data_len().into());
            Ok(data)
        })
    }

    /// Read past the payload of the current segment
    pub fn skip_payload(&mut self) -> Result<(), Error> {
        let Some(header) = self.take_current()? else {
            return Ok(());
        };

        self.guard(|scanner| {
            let len = u64::from(header.data_len());
            let skipped =
                std::io::copy(&mut scanner.reader.by_ref().take(len), &mut std::io::sink())?;
            if skipped != len {
                return Err(Error::UnexpectedEof);
            }
            scanner.advance(len);
            Ok(())
        })
    }

    fn take_current(&mut self) -> Result<Option<SegmentHeader>, Error> {
        if self.state.is_terminal() {
            return Err(Error::ScanFinished(self.state));
        }

        let current = self.current.take();
        if current.is_some() {
            self.state = ScanState::SeekingMarker;
        }

        Ok(current)
    }

    fn read_soi(&mut self) -> Result<(), Error> {
        let soi = self.read_array::<2>()?;
        if soi != SOI {
            return Err(Error::SoiMissing(soi));
        }

        self.state = ScanState::SeekingMarker;

        Ok(())
    }

    fn read_segment_header(&mut self) -> Result<SegmentHeader, Error> {
        let pos = self.pos;
        let marker_bytes = self.read_array::<2>()?;
        if marker_bytes[0] != MARKER_START {
            return Err(Error::InvalidMarker(marker_bytes));
        }
        let marker = Marker::from(marker_bytes[1]);

        // Segment length is always big endian
        let length = u16::from_be_bytes(self.read_array()?);
        if length < 2 {
            return Err(Error::InvalidSegmentLength { marker, length });
        }

        Ok(SegmentHeader {
            marker,
            length,
            pos,
        })
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut buf = [0; N];
        self.reader.read_exact(&mut buf)?;
        self.advance(N.try_into().unwrap_or(u64::MAX));
        Ok(buf)
    }

    fn advance(&mut self, n: u64) {
        self.pos = self.pos.saturating_add(n);
    }

    /// Run `f` and mark the scanner as malformed if it fails
    fn guard<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        let result = f(self);
        if result.is_err() {
            self.state = ScanState::Malformed;
        }
        result
    }
}
