use image::{GenericImageView, Pixel, Rgb};

use super::classify::is_skin;

/// Half-width of the square neighborhood scanned for skin pixels.
pub const BODY_COLOR_RADIUS: i64 = 20;

/// Tone returned when no skin pixel is found near the target.
pub const FALLBACK_BODY_COLOR: Rgb<u8> = Rgb([200, 190, 180]);

/// Estimates the skin color around `(x, y)`.
///
/// Averages every skin-classified pixel in the `(2r+1)x(2r+1)` square
/// centered on the target, clipped to the image bounds. The mean is rounded
/// per channel. When the neighborhood contains no skin, returns
/// [`FALLBACK_BODY_COLOR`].
pub fn estimate_body_color<I>(image: &I, x: u32, y: u32) -> Rgb<u8>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let x_range = span_around(x, width);
    let y_range = span_around(y, height);

    let mut totals = [0u64; 3];
    let mut count = 0u64;

    for ny in y_range {
        for nx in x_range.clone() {
            let Rgb([r, g, b]) = image.get_pixel(nx, ny).to_rgb();
            if is_skin(r, g, b) {
                totals[0] += u64::from(r);
                totals[1] += u64::from(g);
                totals[2] += u64::from(b);
                count += 1;
            }
        }
    }

    if count == 0 {
        return FALLBACK_BODY_COLOR;
    }

    let mean = |total: u64| (total as f64 / count as f64).round() as u8;
    Rgb([mean(totals[0]), mean(totals[1]), mean(totals[2])])
}

fn span_around(center: u32, limit: u32) -> std::ops::Range<u32> {
    let start = (i64::from(center) - BODY_COLOR_RADIUS).max(0);
    let end = (i64::from(center) + BODY_COLOR_RADIUS + 1).min(i64::from(limit));
    start as u32..end.max(start) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn no_skin_returns_fallback() {
        let image = RgbaImage::from_pixel(50, 50, Rgba([20, 20, 30, 255]));
        assert_eq!(estimate_body_color(&image, 25, 25), FALLBACK_BODY_COLOR);
    }

    #[test]
    fn averages_only_skin_pixels() {
        let mut image = RgbaImage::from_pixel(10, 10, Rgba([20, 20, 30, 255]));
        image.put_pixel(1, 1, Rgba([200, 150, 120, 255]));
        image.put_pixel(2, 1, Rgba([180, 130, 101, 255]));

        // (200+180)/2 = 190, (150+130)/2 = 140, (120+101)/2 = 110.5 -> 111
        assert_eq!(estimate_body_color(&image, 5, 5), Rgb([190, 140, 111]));
    }

    #[test]
    fn neighborhood_is_bounded_by_radius() {
        let mut image = RgbaImage::from_pixel(100, 1, Rgba([20, 20, 30, 255]));
        image.put_pixel(0, 0, Rgba([200, 150, 120, 255]));

        // Distance 20 is inside the window, distance 21 is not
        assert_eq!(estimate_body_color(&image, 20, 0), Rgb([200, 150, 120]));
        assert_eq!(estimate_body_color(&image, 21, 0), FALLBACK_BODY_COLOR);
    }

    #[test]
    fn handles_corner_targets() {
        let image = RgbaImage::from_pixel(3, 3, Rgba([200, 150, 120, 255]));
        assert_eq!(estimate_body_color(&image, 0, 0), Rgb([200, 150, 120]));
        assert_eq!(estimate_body_color(&image, 2, 2), Rgb([200, 150, 120]));
    }
}
