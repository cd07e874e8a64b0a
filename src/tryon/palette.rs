//! Garment color analysis for wardrobe tagging.

use std::fmt;

use image::{imageops, Rgb, Rgba};
use imageproc::definitions::Image;
use itertools::Itertools;

/// Side of the square the image is resampled to before counting colors.
pub const DOMINANT_SAMPLE_SIZE: u32 = 100;

/// Returned by [`dominant_color`] when no pixel is counted.
pub const NEUTRAL_GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Width of one color bucket per channel.
const BUCKET: u8 = 32;

/// Buckets with a mean outside `MIN_BRIGHTNESS..=MAX_BRIGHTNESS` are ignored.
const MIN_BRIGHTNESS: f32 = 15.0;
const MAX_BRIGHTNESS: f32 = 240.0;

/// Finds the most common color bucket of an image.
///
/// The image is stretched to 100x100, every channel is floored to a multiple
/// of 32, and buckets that are nearly black are skipped, as are fully
/// transparent pixels. The most frequent bucket wins; on a tie, the one seen
/// first in scan order. Returns [`NEUTRAL_GRAY`] when nothing is counted.
///
/// # Examples
///
/// ```
/// use image::{Rgb, Rgba};
/// use wardrobe_tryon::{dominant_color, Image};
///
/// let garment: Image<Rgba<u8>> = Image::from_pixel(40, 40, Rgba([200, 30, 40, 255]));
/// assert_eq!(dominant_color(&garment), Rgb([192, 0, 32]));
/// ```
pub fn dominant_color(image: &Image<Rgba<u8>>) -> Rgb<u8> {
    if image.width() == 0 || image.height() == 0 {
        return NEUTRAL_GRAY;
    }

    let sample = imageops::resize(
        image,
        DOMINANT_SAMPLE_SIZE,
        DOMINANT_SAMPLE_SIZE,
        imageops::FilterType::Triangle,
    );

    let buckets: Vec<Rgb<u8>> = sample
        .pixels()
        .filter(|pixel| pixel[3] > 0)
        .map(|&Rgba([r, g, b, _])| Rgb([bucket(r), bucket(g), bucket(b)]))
        .filter(|&color| is_counted(color))
        .collect();

    most_frequent(&buckets).unwrap_or(NEUTRAL_GRAY)
}

#[inline]
fn bucket(channel: u8) -> u8 {
    channel / BUCKET * BUCKET
}

fn is_counted(Rgb([r, g, b]): Rgb<u8>) -> bool {
    let brightness = (u16::from(r) + u16::from(g) + u16::from(b)) as f32 / 3.0;
    (MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&brightness)
}

/// Most frequent color; ties go to the earliest first occurrence.
fn most_frequent(colors: &[Rgb<u8>]) -> Option<Rgb<u8>> {
    let counts = colors.iter().counts();

    colors
        .iter()
        .unique()
        .fold(None, |best: Option<(&Rgb<u8>, usize)>, color| {
            let count = counts[&color];
            match best {
                Some((_, top)) if top >= count => best,
                _ => Some((color, count)),
            }
        })
        .map(|(color, _)| *color)
}

/// Formats a color as lowercase `#rrggbb`.
pub fn color_hex(Rgb([r, g, b]): Rgb<u8>) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Coarse color family used to tag garments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Brown,
    Gray,
    Other,
}

impl ColorName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Brown => "brown",
            Self::Gray => "gray",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names the color family of `color`.
///
/// Rules are checked in order and the first match wins, so a strong red with
/// `g == 100` is neither red nor orange and ends up as [`ColorName::Other`].
pub fn color_name(color: Rgb<u8>) -> ColorName {
    let Rgb([r, g, b]) = color;

    if r < 50 && g < 50 && b < 50 {
        ColorName::Black
    } else if r > 200 && g > 200 && b > 200 {
        ColorName::White
    } else if r > 200 && g < 100 && b < 100 {
        ColorName::Red
    } else if r < 100 && g > 200 && b < 100 {
        ColorName::Green
    } else if r < 100 && g < 100 && b > 200 {
        ColorName::Blue
    } else if r > 200 && g > 200 && b < 100 {
        ColorName::Yellow
    } else if r > 150 && g < 100 && b > 150 {
        ColorName::Purple
    } else if r > 200 && g > 100 && b < 100 {
        ColorName::Orange
    } else if r > 150 && g < 100 && b < 100 {
        ColorName::Brown
    } else if r.abs_diff(g) < 30 && g.abs_diff(b) < 30 {
        ColorName::Gray
    } else {
        ColorName::Other
    }
}
