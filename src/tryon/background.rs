use image::Rgba;
use imageproc::definitions::Image;

/// Color distance below which a pixel counts as background.
pub const DEFAULT_CHROMA_TOLERANCE: f32 = 50.0;

/// Tolerance used by [`RemoveBackground::remove_background_edge`].
pub const EDGE_CHROMA_TOLERANCE: f32 = 60.0;

/// Trait for clearing a flat backdrop behind a garment photo
///
/// The backdrop color is taken as the mean of the four corner pixels. This
/// only works for product shots on a roughly uniform background.
pub trait RemoveBackground {
    /// Makes every pixel within `tolerance` (Euclidean RGB distance, strict)
    /// of the backdrop color fully transparent. Color channels are kept.
    fn remove_background_mut(&mut self, tolerance: f32) -> &mut Self;

    /// Consuming variant with the default tolerance of 50.
    fn remove_background(mut self) -> Self
    where
        Self: Sized,
    {
        self.remove_background_mut(DEFAULT_CHROMA_TOLERANCE);
        self
    }

    /// Consuming variant with the looser edge tolerance of 60.
    fn remove_background_edge(mut self) -> Self
    where
        Self: Sized,
    {
        self.remove_background_mut(EDGE_CHROMA_TOLERANCE);
        self
    }
}

impl RemoveBackground for Image<Rgba<u8>> {
    fn remove_background_mut(&mut self, tolerance: f32) -> &mut Self {
        let Some(backdrop) = backdrop_color(self) else {
            return self;
        };
        log::debug!(
            "backdrop color ({:.0}, {:.0}, {:.0}), tolerance {tolerance}",
            backdrop[0],
            backdrop[1],
            backdrop[2]
        );

        let tolerance_squared = tolerance * tolerance;
        for pixel in self.pixels_mut() {
            let distance_squared: f32 = (0..3)
                .map(|channel| (f32::from(pixel[channel]) - backdrop[channel]).powi(2))
                .sum();
            if distance_squared < tolerance_squared {
                pixel[3] = 0;
            }
        }

        self
    }
}

/// Mean RGB of the four corner pixels, or `None` for an empty image.
fn backdrop_color(image: &Image<Rgba<u8>>) -> Option<[f32; 3]> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let (right, bottom) = (width - 1, height - 1);
    let corners = [(0, 0), (right, 0), (0, bottom), (right, bottom)];

    let mut totals = [0.0f32; 3];
    for (x, y) in corners {
        let pixel = image.get_pixel(x, y);
        for (total, value) in totals.iter_mut().zip(pixel.0) {
            *total += f32::from(value);
        }
    }

    Some(totals.map(|total| total / corners.len() as f32))
}

/// Returns `true` when any pixel is not fully opaque.
pub fn has_transparency(image: &Image<Rgba<u8>>) -> bool {
    image.pixels().any(|pixel| pixel[3] < 255)
}

/// Percentage (0-100) of pixels that are not fully opaque.
///
/// Returns 0 for an empty image.
pub fn transparency_percentage(image: &Image<Rgba<u8>>) -> f32 {
    let total = image.pixels().len();
    if total == 0 {
        return 0.0;
    }
    let transparent = image.pixels().filter(|pixel| pixel[3] < 255).count();
    transparent as f32 * 100.0 / total as f32
}
