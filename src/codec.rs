//! Image decoding, encoding and input fitting.

use std::io::Cursor;

use image::{imageops, DynamicImage, GenericImageView, ImageFormat, RgbaImage};

use crate::error::{Error, ImageRole};

/// Decodes image bytes of any enabled format.
///
/// # Errors
///
/// * `Error::ImageDecode` - When the bytes are not a decodable image
pub fn decode(bytes: &[u8], role: ImageRole) -> Result<DynamicImage, Error> {
    image::load_from_memory(bytes).map_err(|err| Error::ImageDecode {
        role,
        message: err.to_string(),
    })
}

/// Encodes an RGBA image as PNG.
///
/// PNG is lossless, so decoding the output reproduces every channel exactly,
/// alpha included.
///
/// # Errors
///
/// * `Error::ImageEncode` - When the encoder fails
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, Error> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|err| Error::ImageEncode(err.to_string()))?;
    Ok(buffer.into_inner())
}

/// Scales an image down so that it fits inside `max_width x max_height`.
///
/// Images already inside the bounds are returned unchanged. The aspect ratio
/// is preserved and each output dimension is at least one pixel.
///
/// # Errors
///
/// * `Error::InvalidParameter` - When either bound is zero
pub fn fit_within(image: DynamicImage, max_width: u32, max_height: u32) -> Result<DynamicImage, Error> {
    if max_width == 0 || max_height == 0 {
        return Err(Error::InvalidParameter(format!(
            "fit bounds must be non-zero, got {max_width}x{max_height}"
        )));
    }

    let (width, height) = image.dimensions();
    if width <= max_width && height <= max_height {
        return Ok(image);
    }

    let ratio = (max_width as f32 / width as f32).min(max_height as f32 / height as f32);
    let target_width = ((width as f32 * ratio).round() as u32).clamp(1, max_width);
    let target_height = ((height as f32 * ratio).round() as u32).clamp(1, max_height);
    log::debug!("fitting {width}x{height} image into {target_width}x{target_height}");

    Ok(image.resize_exact(target_width, target_height, imageops::FilterType::Triangle))
}

/// Longest side of a wardrobe thumbnail.
pub const THUMBNAIL_SIZE: u32 = 300;

/// Shrinks an image to fit a 300x300 wardrobe thumbnail.
///
/// # Errors
///
/// Never fails in practice; shares [`fit_within`]'s signature.
pub fn thumbnail(image: DynamicImage) -> Result<DynamicImage, Error> {
    fit_within(image, THUMBNAIL_SIZE, THUMBNAIL_SIZE)
}
