//! Dimension planning and scaled copies.
//!
//! The resize policy mirrors what hybrid-app callers expect from a camera
//! plugin: a single target edge scales proportionally, both edges together
//! are honored exactly (even when that distorts), and no targets means no
//! work. The dimension math is pure and lives in [`plan_dimensions`] so it
//! can be tested without touching pixel data.

use thiserror::Error;

use crate::decode::DecodedImage;

/// Error types for resize operations.
#[derive(Debug, Error)]
pub enum ResizeError {
    /// The source image has a zero dimension; there is nothing to scale.
    #[error("Cannot resize degenerate {width}x{height} source image")]
    EmptySource { width: u32, height: u32 },

    /// The pixel buffer length does not match the declared dimensions.
    #[error("Pixel buffer does not match image dimensions")]
    MalformedBuffer,
}

/// Interpolation filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Compute the output dimensions for a resize request.
///
/// Exactly one branch applies, in priority order:
///
/// 1. Both targets set: exactly `target_width x target_height`. Aspect ratio
///    is NOT preserved; callers wanting preservation supply a ratio-correct
///    pair. This is load-bearing for callers that need exact dimensions.
/// 2. Width only: height scales proportionally, rounded to nearest.
/// 3. Height only: width scales proportionally, rounded to nearest.
/// 4. Neither: `None`; the resize stage is a no-op.
///
/// Scaled dimensions are floored at 1 pixel so extreme aspect ratios never
/// produce a zero-sized edge. Callers must ensure the source dimensions are
/// non-zero before asking for a proportional branch.
///
/// # Example
///
/// ```ignore
/// assert_eq!(plan_dimensions(4000, 3000, 800, 0), Some((800, 600)));
/// ```
pub fn plan_dimensions(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    target_height: u32,
) -> Option<(u32, u32)> {
    if target_width > 0 && target_height > 0 {
        return Some((target_width, target_height));
    }

    if target_width > 0 {
        let height =
            (src_height as f64 * target_width as f64 / src_width as f64).round() as u32;
        return Some((target_width, height.max(1)));
    }

    if target_height > 0 {
        let width =
            (src_width as f64 * target_height as f64 / src_height as f64).round() as u32;
        return Some((width.max(1), target_height));
    }

    None
}

/// Produce a scaled copy of an image per the target-dimension policy.
///
/// With neither target set the input is returned unchanged. A source with a
/// zero dimension is a precondition violation and fails with
/// `ResizeError::EmptySource` rather than dividing by zero.
///
/// # Errors
///
/// Returns `ResizeError::EmptySource` for degenerate sources and
/// `ResizeError::MalformedBuffer` if the pixel buffer is inconsistent with
/// the declared dimensions.
pub fn resize(
    image: DecodedImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<DecodedImage, ResizeError> {
    if target_width == 0 && target_height == 0 {
        return Ok(image);
    }

    if image.width == 0 || image.height == 0 {
        return Err(ResizeError::EmptySource {
            width: image.width,
            height: image.height,
        });
    }

    let (width, height) =
        match plan_dimensions(image.width, image.height, target_width, target_height) {
            Some(dims) => dims,
            None => return Ok(image),
        };

    // Fast path: already at the requested size.
    if width == image.width && height == image.height {
        return Ok(image);
    }

    let src = image.to_rgb_image().ok_or(ResizeError::MalformedBuffer)?;
    let resized = image::imageops::resize(&src, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}
