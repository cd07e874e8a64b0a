use image::Luma;
use imageproc::definitions::Image;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use super::placement::BandDescriptor;
use crate::utils::pixel_span;

/// Width of each arm column as a share of the canvas width.
pub const ARM_WIDTH_FRACTION: f32 = 0.15;

/// Mask value for pixels where the garment is kept.
pub const KEEP: Luma<u8> = Luma([255]);

/// Mask value for pixels where the garment is discarded.
pub const DISCARD: Luma<u8> = Luma([0]);

/// Builds the binary region mask for a canvas.
///
/// The mask starts white and has four black rectangles painted over it:
/// the head band `[0, head_end)`, the two arm columns of width
/// `0.15 * width` spanning `[arm_start, arm_end)`, and the leg band
/// `[leg_start, height)`. Edges are hard; see
/// [`SoftenEdges`](super::soften::SoftenEdges) for feathering.
pub fn build_region_mask(width: u32, height: u32, band: &BandDescriptor) -> Image<Luma<u8>> {
    let mut mask = Image::from_pixel(width, height, KEEP);
    let canvas_width = width as f32;
    let canvas_height = height as f32;
    let arm_width = canvas_width * ARM_WIDTH_FRACTION;

    let regions = [
        (0.0, 0.0, canvas_width, band.head_end),
        (0.0, band.arm_start, arm_width, band.arm_end),
        (canvas_width - arm_width, band.arm_start, canvas_width, band.arm_end),
        (0.0, band.leg_start, canvas_width, canvas_height),
    ];

    for (left, top, right, bottom) in regions {
        if let Some(rect) = covered_rect(left, top, right, bottom, width, height) {
            draw_filled_rect_mut(&mut mask, rect, DISCARD);
        }
    }

    mask
}

fn covered_rect(left: f32, top: f32, right: f32, bottom: f32, width: u32, height: u32) -> Option<Rect> {
    let (x0, x1) = pixel_span(left, right, width)?;
    let (y0, y1) = pixel_span(top, bottom, height)?;
    Some(Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0))
}
