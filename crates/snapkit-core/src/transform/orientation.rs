//! EXIF orientation reading and correction.
//!
//! Camera firmware records the sensor orientation in the EXIF `Orientation`
//! tag instead of rotating the pixel data. [`read_orientation`] recovers the
//! tag from the captured file and [`normalize`] applies the corresponding
//! rotation or mirror so the pixels display upright.
//!
//! Metadata is best-effort by contract: a missing file, a container without
//! EXIF, or a corrupt tag all degrade to [`Orientation::Normal`], and the
//! image passes through unchanged.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use exif::{In, Reader, Tag};
use image::imageops;

use crate::decode::DecodedImage;

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip + 270 CW). Passed through unchanged by [`normalize`].
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90 = 6,
    /// Transverse (flip + 90 CW). Passed through unchanged by [`normalize`].
    Transverse = 7,
    /// Rotate 270 degrees clockwise.
    Rotate270 = 8,
}

impl Orientation {
    /// Returns true if correcting this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Orientation::Rotate90 | Orientation::Rotate270)
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270,
            _ => Orientation::Normal,
        }
    }
}

/// Read the EXIF orientation tag from an image file.
///
/// Returns `Orientation::Normal` when the file cannot be opened, carries no
/// EXIF segment, or the tag is absent or unreadable. Those conditions are
/// expected for gallery picks without a resolvable path and must not fail
/// the capture.
pub fn read_orientation(path: &Path) -> Orientation {
    match try_read_orientation(path) {
        Ok(orientation) => orientation,
        Err(e) => {
            log::debug!(
                "no usable orientation metadata in {}: {}",
                path.display(),
                e
            );
            Orientation::Normal
        }
    }
}

fn try_read_orientation(path: &Path) -> Result<Orientation, exif::Error> {
    let file = File::open(path).map_err(exif::Error::Io)?;
    let exif = Reader::new().read_from_container(&mut BufReader::new(file))?;
    Ok(exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default())
}

/// Read the EXIF orientation tag from in-memory image bytes.
///
/// Same fallback behavior as [`read_orientation`].
pub fn orientation_from_bytes(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply the rotation or mirror an orientation tag calls for.
///
/// `Normal` and the transposed variants (5/7) are the identity: the input
/// value is handed back untouched, without copying the buffer. Rotations of
/// 90/270 degrees swap the output dimensions.
pub fn normalize(image: DecodedImage, orientation: Orientation) -> DecodedImage {
    use Orientation::*;

    if !matches!(
        orientation,
        Rotate90 | Rotate180 | Rotate270 | FlipHorizontal | FlipVertical
    ) {
        return image;
    }

    let src = match image.to_rgb_image() {
        Some(src) => src,
        // Malformed buffer: leave it untouched rather than fail the capture.
        None => return image,
    };

    let out = match orientation {
        Rotate90 => imageops::rotate90(&src),
        Rotate180 => imageops::rotate180(&src),
        Rotate270 => imageops::rotate270(&src),
        FlipHorizontal => imageops::flip_horizontal(&src),
        FlipVertical => imageops::flip_vertical(&src),
        Normal | Transpose | Transverse => return image,
    };

    DecodedImage::from_rgb_image(out)
}
