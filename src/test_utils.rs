//! Test utilities for wardrobe-tryon
//!
//! This module provides synthetic person and garment images for testing.
//! It is only compiled when running tests.

use image::{Pixel, Rgba, RgbaImage};

/// Flat gray studio backdrop, classified as neutral.
pub const BACKDROP: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Warm skin tone, classified as skin.
pub const SKIN: Rgba<u8> = Rgba([205, 155, 125, 255]);

/// Navy shirt color, classified as clothing.
pub const SHIRT: Rgba<u8> = Rgba([30, 40, 90, 255]);

/// Dark trousers color, classified as clothing.
pub const TROUSERS: Rgba<u8> = Rgba([40, 35, 30, 255]);

/// Creates a crude front-facing figure on a gray backdrop.
///
/// Layout, as fractions of the image height:
/// - 0.00..0.18: skin-colored head in the central third
/// - 0.18..0.60: shirt over the central 40%, bare arms beside it
/// - 0.60..1.00: trousers over the central 40%
pub fn create_person_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        let central = |share: f32| (fx - 0.5).abs() < share / 2.0;

        if fy < 0.18 {
            if central(1.0 / 3.0) {
                SKIN
            } else {
                BACKDROP
            }
        } else if fy < 0.60 {
            if central(0.4) {
                SHIRT
            } else if central(0.7) {
                SKIN
            } else {
                BACKDROP
            }
        } else if central(0.4) {
            TROUSERS
        } else {
            BACKDROP
        }
    })
}

/// Creates an opaque single-color garment.
pub fn create_solid_garment(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([200, 30, 40, 255]))
}

/// Compares two pixel values with a tolerance for rounding differences.
///
/// Returns `true` if all channel values are within the tolerance.
pub fn pixels_approx_equal(expected: Rgba<u8>, actual: Rgba<u8>, tolerance: u8) -> bool {
    expected
        .channels()
        .iter()
        .zip(actual.channels())
        .all(|(e, a)| e.abs_diff(*a) <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tryon::classify::{classify_pixel, PixelClass};

    #[test]
    fn fixture_colors_classify_as_intended() {
        assert_eq!(classify_pixel(BACKDROP.to_rgb()), PixelClass::Neutral);
        assert_eq!(classify_pixel(SKIN.to_rgb()), PixelClass::Skin);
        assert_eq!(classify_pixel(SHIRT.to_rgb()), PixelClass::Clothing);
        assert_eq!(classify_pixel(TROUSERS.to_rgb()), PixelClass::Clothing);
    }

    #[test]
    fn create_person_image_layout() {
        let image = create_person_image(100, 100);
        assert_eq!(image.dimensions(), (100, 100));
        assert_eq!(image.get_pixel(50, 5), &SKIN);
        assert_eq!(image.get_pixel(5, 5), &BACKDROP);
        assert_eq!(image.get_pixel(50, 40), &SHIRT);
        assert_eq!(image.get_pixel(25, 40), &SKIN);
        assert_eq!(image.get_pixel(50, 80), &TROUSERS);
    }

    #[test]
    fn pixels_approx_equal_with_tolerant_comparison_returns_true() {
        let a = Rgba([100, 150, 200, 255]);
        let b = Rgba([101, 149, 201, 255]);
        let c = Rgba([105, 145, 205, 255]);

        assert!(pixels_approx_equal(a, b, 1));
        assert!(!pixels_approx_equal(a, c, 1));
    }
}
