use image::{Rgb, Rgba};
use imageproc::definitions::Image;

use super::body_color::estimate_body_color;
use super::classify::{classify, PixelClass};
use super::placement::BandDescriptor;
use crate::utils::store_clamped_u8;

/// Share of the canvas width covered by the torso column.
pub const TORSO_WIDTH_FRACTION: f32 = 0.45;

/// Darkening applied to the estimated body color.
const ERASE_SHADE: f64 = 0.9;

/// Alpha written into erased pixels.
pub const ERASED_ALPHA: u8 = 80;

/// Returns `true` when `(x, y)` lies in the torso region of a
/// `width`-wide canvas: strictly between `head_end` and `leg_start`, and
/// within the centered 45% column.
#[inline]
pub fn in_torso_region(x: u32, y: u32, width: u32, band: &BandDescriptor) -> bool {
    let row = y as f32;
    let center_x = width as f32 / 2.0;
    let half_torso = width as f32 * TORSO_WIDTH_FRACTION / 2.0;

    row > band.head_end && row < band.leg_start && (x as f32 - center_x).abs() < half_torso
}

/// Trait for painting over the original clothing of a person photo
pub trait EraseClothing {
    /// Replaces clothing-classified pixels in the torso region with a
    /// darkened estimate of the surrounding skin tone at alpha 80.
    ///
    /// Pixels are rewritten in scan order, so the body color estimate for a
    /// later pixel sees the already-rewritten neighbors. Skin and neutral
    /// pixels are left untouched.
    fn erase_clothing_mut(&mut self, band: &BandDescriptor) -> &mut Self;

    /// Consuming variant of [`EraseClothing::erase_clothing_mut`].
    fn erase_clothing(mut self, band: &BandDescriptor) -> Self
    where
        Self: Sized,
    {
        self.erase_clothing_mut(band);
        self
    }
}

impl EraseClothing for Image<Rgba<u8>> {
    fn erase_clothing_mut(&mut self, band: &BandDescriptor) -> &mut Self {
        let (width, height) = self.dimensions();
        let mut erased = 0usize;

        for y in 0..height {
            for x in 0..width {
                if !in_torso_region(x, y, width, band) {
                    continue;
                }

                let Rgba([r, g, b, _]) = *self.get_pixel(x, y);
                if classify(r, g, b) != PixelClass::Clothing {
                    continue;
                }

                let Rgb([br, bg, bb]) = estimate_body_color(&*self, x, y);
                let shade = |channel: u8| store_clamped_u8(f64::from(channel) * ERASE_SHADE);
                self.put_pixel(x, y, Rgba([shade(br), shade(bg), shade(bb), ERASED_ALPHA]));
                erased += 1;
            }
        }

        log::trace!("erased {erased} clothing pixels in torso region");
        self
    }
}
