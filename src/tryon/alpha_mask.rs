use image::{GenericImageView, Luma, Rgba};
use imageproc::{definitions::Image, map::map_colors2};

use crate::{
    error::Error,
    utils::{clamp_f32_to_primitive, normalize_alpha_with_max, validate_matching_dimensions},
};

/// Trait for masking the alpha channel of an RGBA layer
///
/// Keeps layer pixels only where the mask is opaque: the resulting alpha is
/// `layer_alpha * mask / 255`, color channels are untouched. This is the
/// "destination-in" composite of a mask over a layer.
pub trait MultiplyAlpha {
    type Mask: GenericImageView<Pixel = Luma<u8>>;

    /// Multiplies the alpha channel by the mask.
    ///
    /// This consumes the original image.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wardrobe_tryon::{Image, MultiplyAlpha};
    /// use image::{ImageBuffer, Rgba, Luma};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let layer: Image<Rgba<u8>> = ImageBuffer::new(10, 10);
    /// let mask: Image<Luma<u8>> = ImageBuffer::new(10, 10);
    ///
    /// let masked = layer.multiply_alpha(&mask)?;
    /// # Ok(())
    /// # }
    /// ```
    fn multiply_alpha(self, mask: &Self::Mask) -> Result<Self, Error>
    where
        Self: Sized;

    /// Multiplies the alpha channel by the mask in-place.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    fn multiply_alpha_mut(&mut self, mask: &Self::Mask) -> Result<&mut Self, Error>;
}

impl MultiplyAlpha for Image<Rgba<u8>> {
    type Mask = Image<Luma<u8>>;

    fn multiply_alpha(self, mask: &Self::Mask) -> Result<Self, Error> {
        validate_dimensions(&self, mask)?;

        let result = map_colors2(&self, mask, |Rgba([red, green, blue, alpha]), Luma([keep])| {
            Rgba([red, green, blue, masked_alpha(alpha, keep)])
        });

        Ok(result)
    }

    fn multiply_alpha_mut(&mut self, mask: &Self::Mask) -> Result<&mut Self, Error> {
        validate_dimensions(&*self, mask)?;

        self.pixels_mut()
            .zip(mask.pixels())
            .for_each(|(pixel, Luma([keep]))| {
                pixel[3] = masked_alpha(pixel[3], *keep);
            });

        Ok(self)
    }
}

#[inline]
fn masked_alpha(alpha: u8, keep: u8) -> u8 {
    match keep {
        0 => 0,
        255 => alpha,
        _ => clamp_f32_to_primitive(f32::from(alpha) * normalize_alpha_with_max(keep, 255.0)),
    }
}

#[inline]
fn validate_dimensions<I1, I2>(image: &I1, mask: &I2) -> Result<(), Error>
where
    I1: GenericImageView,
    I2: GenericImageView,
{
    validate_matching_dimensions(image.dimensions(), mask.dimensions())
}
