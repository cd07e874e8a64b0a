//! Internal utility functions for wardrobe-tryon.
//!
//! This module contains common functionality used across the compositing stages.

use image::Primitive;
use imageproc::definitions::Clamp;

use crate::error::{Error, ImageRole};

/// Clamps a floating-point value to the range of a primitive type.
///
/// Values are rounded to the nearest integer first, halves away from zero.
#[inline]
pub fn clamp_f32_to_primitive<T: Primitive + Clamp<f32>>(value: f32) -> T {
    T::clamp(value.round())
}

/// Stores a computed channel value the way a clamped 8-bit pixel buffer
/// does: round half to even, then clamp to `0..=255`.
#[inline]
pub fn store_clamped_u8(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Normalizes an alpha value using a pre-computed max value.
///
/// This is more efficient when processing multiple pixels with the same type.
#[inline]
pub fn normalize_alpha_with_max<S>(alpha: S, max_value: f32) -> f32
where
    S: Into<f32> + Primitive,
{
    alpha.into() / max_value
}

/// Validates that an image has non-zero dimensions.
///
/// # Errors
///
/// * `Error::GeometryDegenerate` - When either dimension is zero
pub fn validate_non_empty_image(width: u32, height: u32, role: ImageRole) -> Result<(), Error> {
    if width == 0 || height == 0 {
        Err(Error::GeometryDegenerate {
            role,
            width,
            height,
        })
    } else {
        Ok(())
    }
}

/// Validates that two images have matching dimensions.
///
/// # Errors
///
/// * `Error::DimensionMismatch` - When the dimensions differ
pub fn validate_matching_dimensions(
    expected: (u32, u32),
    actual: (u32, u32),
) -> Result<(), Error> {
    if expected != actual {
        Err(Error::DimensionMismatch { expected, actual })
    } else {
        Ok(())
    }
}

/// Converts a fractional span `[start, end)` into the pixel rows (or columns)
/// whose centers fall inside it, clipped to `0..limit`.
///
/// Returns `None` when no pixel center is covered.
#[inline]
pub fn pixel_span(start: f32, end: f32, limit: u32) -> Option<(u32, u32)> {
    let first = (start - 0.5).ceil().max(0.0);
    let last = (end - 0.5).ceil().min(limit as f32);
    if last <= first {
        None
    } else {
        Some((first as u32, last as u32))
    }
}
