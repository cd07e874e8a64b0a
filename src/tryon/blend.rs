use image::Rgba;
use imageproc::definitions::Image;

use super::placement::DrawRect;
use crate::{
    error::Error,
    utils::{clamp_f32_to_primitive, normalize_alpha_with_max, pixel_span, validate_matching_dimensions},
};

/// Offset of the drop shadow from the garment rectangle, in pixels.
pub const SHADOW_OFFSET: f32 = 5.0;

/// Opacity of the drop shadow.
pub const SHADOW_ALPHA: f32 = 0.05;

/// Composites `source` over `destination` with an extra global opacity.
///
/// Standard non-premultiplied "source-over": the source alpha is scaled by
/// `global_alpha`, colors are weighted by coverage.
#[inline]
pub fn source_over(destination: Rgba<u8>, source: Rgba<u8>, global_alpha: f32) -> Rgba<u8> {
    let source_alpha = normalize_alpha_with_max(source[3], 255.0) * global_alpha;
    if source_alpha <= 0.0 {
        return destination;
    }

    let destination_alpha = normalize_alpha_with_max(destination[3], 255.0);
    let out_alpha = source_alpha + destination_alpha * (1.0 - source_alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |index: usize| {
        let source_part = f32::from(source[index]) * source_alpha;
        let destination_part = f32::from(destination[index]) * destination_alpha * (1.0 - source_alpha);
        clamp_f32_to_primitive::<u8>((source_part + destination_part) / out_alpha)
    };

    Rgba([
        channel(0),
        channel(1),
        channel(2),
        clamp_f32_to_primitive(out_alpha * 255.0),
    ])
}

/// Trait for layering RGBA images onto a canvas
pub trait BlendOnto {
    /// Blends a same-size `layer` over `self` with the given global alpha.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When layer and canvas dimensions don't match
    fn blend_layer_mut(&mut self, layer: &Self, global_alpha: f32) -> Result<&mut Self, Error>;

    /// Fills `rect` with a solid color at the given global alpha.
    ///
    /// Pixels are covered when their center lies inside the rectangle; the
    /// rectangle is clipped to the canvas.
    fn fill_rect_mut(&mut self, rect: DrawRect, color: Rgba<u8>, global_alpha: f32) -> &mut Self;

    /// Draws the garment's drop shadow: the rectangle shifted by
    /// [`SHADOW_OFFSET`] on both axes, filled black at [`SHADOW_ALPHA`].
    fn draw_drop_shadow_mut(&mut self, rect: DrawRect) -> &mut Self {
        let shadow = DrawRect {
            x: rect.x + SHADOW_OFFSET,
            y: rect.y + SHADOW_OFFSET,
            ..rect
        };
        self.fill_rect_mut(shadow, Rgba([0, 0, 0, 255]), SHADOW_ALPHA)
    }
}

impl BlendOnto for Image<Rgba<u8>> {
    fn blend_layer_mut(&mut self, layer: &Self, global_alpha: f32) -> Result<&mut Self, Error> {
        validate_matching_dimensions(self.dimensions(), layer.dimensions())?;

        self.pixels_mut()
            .zip(layer.pixels())
            .for_each(|(destination, source)| {
                *destination = source_over(*destination, *source, global_alpha);
            });

        Ok(self)
    }

    fn fill_rect_mut(&mut self, rect: DrawRect, color: Rgba<u8>, global_alpha: f32) -> &mut Self {
        let (width, height) = self.dimensions();
        let (Some((x0, x1)), Some((y0, y1))) = (
            pixel_span(rect.x, rect.x + rect.width, width),
            pixel_span(rect.y, rect.y + rect.height, height),
        ) else {
            return self;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel = self.get_pixel_mut(x, y);
                *pixel = source_over(*pixel, color, global_alpha);
            }
        }

        self
    }
}
