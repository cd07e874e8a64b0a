//! Heuristic pixel classification for clothing removal.
//!
//! A pixel is tested against the skin rule first and only falls through to
//! the clothing rule when it is not skin, so the two classes never overlap.
//! The clothing rule is loose and also matches most backdrops; only pixels
//! inside the torso region are ever acted on.

use image::Rgb;

/// Class assigned to a single pixel by [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelClass {
    Skin,
    Clothing,
    Neutral,
}

/// Mean of the three channels.
#[inline]
fn brightness(r: u8, g: u8, b: u8) -> f32 {
    (u16::from(r) + u16::from(g) + u16::from(b)) as f32 / 3.0
}

/// Spread between the strongest and weakest channel.
#[inline]
fn saturation(r: u8, g: u8, b: u8) -> u8 {
    r.max(g).max(b) - r.min(g).min(b)
}

/// Returns `true` when the color falls inside the skin-tone envelope.
#[inline]
pub fn is_skin(r: u8, g: u8, b: u8) -> bool {
    let brightness = brightness(r, g, b);
    brightness > 80.0
        && brightness < 240.0
        && r > 95
        && g > 40
        && b > 20
        && r > g
        && r > b
        && r.abs_diff(g) > 10
}

/// Returns `true` when the color looks like fabric and is not skin.
#[inline]
pub fn is_clothing(r: u8, g: u8, b: u8) -> bool {
    !is_skin(r, g, b) && matches_garment_tone(r, g, b)
}

fn matches_garment_tone(r: u8, g: u8, b: u8) -> bool {
    let brightness = brightness(r, g, b);
    let saturation = saturation(r, g, b);

    let light = brightness > 150.0 && saturation < 120;
    let dark = brightness < 100.0;
    let medium = (100.0..=150.0).contains(&brightness) && saturation > 15;
    let colorful = saturation > 30;

    light || dark || medium || colorful
}

/// Classifies a color as skin, clothing or neutral.
///
/// # Examples
///
/// ```
/// use wardrobe_tryon::{classify, PixelClass};
///
/// assert_eq!(classify(200, 150, 120), PixelClass::Skin);
/// assert_eq!(classify(20, 20, 30), PixelClass::Clothing);
/// ```
pub fn classify(r: u8, g: u8, b: u8) -> PixelClass {
    if is_skin(r, g, b) {
        PixelClass::Skin
    } else if matches_garment_tone(r, g, b) {
        PixelClass::Clothing
    } else {
        PixelClass::Neutral
    }
}

/// Classifies an RGB pixel.
#[inline]
pub fn classify_pixel(pixel: Rgb<u8>) -> PixelClass {
    let Rgb([r, g, b]) = pixel;
    classify(r, g, b)
}
