//! Rule-based try-on compositor.
//!
//! Overlays a garment image on a person photo without any model: the
//! original clothing in the torso is painted over, the scaled garment is
//! clipped to the body regions of its category, feathered, and blended onto
//! the photo with a faint drop shadow.
//!
//! The pipeline runs through a fixed sequence of stages on buffers it owns
//! exclusively. It performs no I/O, so a failure is never transient; either a
//! complete image is returned or an error is.

use std::time::Instant;

use image::{imageops, DynamicImage, GenericImageView, Rgba, RgbaImage};

use super::alpha_mask::MultiplyAlpha;
use super::blend::BlendOnto;
use super::erase::EraseClothing;
use super::placement::{plan, DrawRect, GarmentCategory, PlacementPlan};
use super::region_mask::build_region_mask;
use super::soften::SoftenEdges;
use crate::{codec, error::Error, error::ImageRole, utils::validate_non_empty_image};

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    ImagesLoaded,
    TorsoErased,
    GarmentDrawn,
    Masked,
    Softened,
    Blended,
    Done,
}

#[inline]
fn enter(stage: Stage) {
    log::trace!("composite stage: {stage:?}");
}

/// Composites `garment` onto `person` using a free-form category label.
///
/// Unknown labels fall back to the aspect-ratio driven default placement.
/// The result has the person image's dimensions.
///
/// # Errors
///
/// * `Error::GeometryDegenerate` - When either image has a zero dimension
///
/// # Examples
///
/// ```
/// use image::{DynamicImage, Rgba, RgbaImage};
/// use wardrobe_tryon::composite;
///
/// let person = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 60, Rgba([200, 150, 120, 255])));
/// let garment = DynamicImage::ImageRgba8(RgbaImage::from_pixel(30, 30, Rgba([20, 40, 160, 255])));
///
/// let result = composite(&person, &garment, "top").unwrap();
/// assert_eq!(result.dimensions(), (40, 60));
/// ```
pub fn composite(person: &DynamicImage, garment: &DynamicImage, label: &str) -> Result<RgbaImage, Error> {
    let (garment_width, garment_height) = garment.dimensions();
    validate_non_empty_image(garment_width, garment_height, ImageRole::Garment)?;
    let category = GarmentCategory::from_label(label, garment_width, garment_height);
    composite_with_category(person, garment, category)
}

/// Composites `garment` onto `person` with an already resolved category.
///
/// # Errors
///
/// * `Error::GeometryDegenerate` - When either image has a zero dimension
pub fn composite_with_category(
    person: &DynamicImage,
    garment: &DynamicImage,
    category: GarmentCategory,
) -> Result<RgbaImage, Error> {
    let started = Instant::now();

    let (width, height) = person.dimensions();
    validate_non_empty_image(width, height, ImageRole::Person)?;
    let (garment_width, garment_height) = garment.dimensions();
    validate_non_empty_image(garment_width, garment_height, ImageRole::Garment)?;

    let mut canvas = person.to_rgba8();
    let garment = garment.to_rgba8();
    enter(Stage::ImagesLoaded);

    let plan = plan(category, width, height, garment_width);
    log::debug!("placement for {category:?} on {width}x{height}: {plan:?}");

    canvas.erase_clothing_mut(&plan.band);
    enter(Stage::TorsoErased);

    let rect = plan.draw_rect(width, garment_width, garment_height);
    let mut layer = draw_garment_layer(&garment, (width, height), rect);
    enter(Stage::GarmentDrawn);

    let mask = build_region_mask(width, height, &plan.band);
    layer.multiply_alpha_mut(&mask)?;
    enter(Stage::Masked);

    layer.soften_edges_mut(&plan.band);
    enter(Stage::Softened);

    blend_garment(&mut canvas, &layer, &plan, rect)?;
    enter(Stage::Blended);

    enter(Stage::Done);
    log::debug!("composite finished in {:.2?}", started.elapsed());
    Ok(canvas)
}

/// Decodes both images and composites them.
///
/// # Errors
///
/// * `Error::ImageDecode` - When either input is not a decodable image
/// * `Error::GeometryDegenerate` - When either image has a zero dimension
pub fn composite_bytes(person: &[u8], garment: &[u8], label: &str) -> Result<RgbaImage, Error> {
    let person = codec::decode(person, ImageRole::Person)?;
    let garment = codec::decode(garment, ImageRole::Garment)?;
    composite(&person, &garment, label)
}

/// Draws the scaled garment into a transparent layer the size of the canvas.
///
/// The garment is resampled to the rounded draw size (at least one pixel)
/// and placed at the rounded draw origin; parts outside the canvas are
/// clipped.
fn draw_garment_layer(garment: &RgbaImage, canvas_size: (u32, u32), rect: DrawRect) -> RgbaImage {
    let (width, height) = canvas_size;
    let mut layer = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    let scaled_width = (rect.width.round() as u32).max(1);
    let scaled_height = (rect.height.round() as u32).max(1);
    let scaled = if (scaled_width, scaled_height) == garment.dimensions() {
        garment.clone()
    } else {
        imageops::resize(garment, scaled_width, scaled_height, imageops::FilterType::Triangle)
    };

    imageops::replace(&mut layer, &scaled, rect.x.round() as i64, rect.y.round() as i64);
    layer
}

/// Blends the finished garment layer and adds the drop shadow.
fn blend_garment(
    canvas: &mut RgbaImage,
    layer: &RgbaImage,
    plan: &PlacementPlan,
    rect: DrawRect,
) -> Result<(), Error> {
    canvas.blend_layer_mut(layer, plan.alpha)?;
    canvas.draw_drop_shadow_mut(rect);
    Ok(())
}
