//! Real-world scenario tests for wardrobe-tryon
//!
//! These tests pin the placement table against concrete canvas sizes and
//! follow a full try-on of a synthetic figure from start to finish.

use image::{DynamicImage, Rgba, RgbaImage};
use wardrobe_tryon::*;

const SKIN: Rgba<u8> = Rgba([205, 155, 125, 255]);
const SHIRT: Rgba<u8> = Rgba([30, 40, 90, 255]);
const TROUSERS: Rgba<u8> = Rgba([40, 35, 30, 255]);
const BACKDROP: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Front-facing figure: head in the top 18%, shirt and bare arms down to
/// 60%, trousers below.
fn create_person(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        let central = |share: f32| (fx - 0.5).abs() < share / 2.0;

        match fy {
            fy if fy < 0.18 && central(1.0 / 3.0) => SKIN,
            fy if fy < 0.18 => BACKDROP,
            fy if fy < 0.60 && central(0.4) => SHIRT,
            fy if fy < 0.60 && central(0.7) => SKIN,
            fy if fy < 0.60 => BACKDROP,
            _ if central(0.4) => TROUSERS,
            _ => BACKDROP,
        }
    })
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn top_on_portrait_canvas_matches_reference_geometry() {
    let plan = plan(GarmentCategory::Top, 400, 600, 300);

    assert!(approx(plan.scale, 0.48));
    assert!(approx(plan.offset_y, 120.0));
    assert!(approx(plan.alpha, 0.95));

    let rect = plan.draw_rect(400, 300, 300);
    assert!(approx(rect.width, 144.0));
    assert!(approx(rect.height, 144.0));
    assert!(approx(rect.x, 128.0));
    assert!(approx(rect.y, 120.0));

    assert!(approx(plan.band.head_end, 108.0));
    assert!(approx(plan.band.arm_start, 132.0));
    assert!(approx(plan.band.arm_end, 348.0));
    assert!(approx(plan.band.leg_start, 378.0));
}

#[test]
fn square_garment_without_category_uses_short_default() {
    let category = GarmentCategory::from_label("accessories", 250, 250);
    assert_eq!(category, GarmentCategory::Default(1.0));

    let plan = plan(category, 400, 600, 250);
    assert!(approx(plan.scale, 0.50));
    assert!(approx(plan.offset_y, 0.18 * 600.0));
    assert!(approx(plan.alpha, 0.90));
    assert!(approx(plan.band.head_end, 0.17 * 600.0));
    assert!(approx(plan.band.arm_start, 0.20 * 600.0));
    assert!(approx(plan.band.arm_end, 0.60 * 600.0));
    assert!(approx(plan.band.leg_start, 0.65 * 600.0));
}

#[test]
fn tall_garment_without_category_uses_long_default() {
    let category = GarmentCategory::from_label("shoes", 200, 400);
    let plan = plan(category, 400, 600, 200);

    assert!(approx(plan.scale, 0.55));
    assert!(approx(plan.offset_y, 90.0));
    assert!(approx(plan.band.head_end, 84.0));
    assert!(approx(plan.band.leg_start, 468.0));
}

#[test]
fn every_category_row_matches_table() {
    let rows = [
        (GarmentCategory::Dress, 0.52, 0.17, 0.98, [0.15, 0.19, 0.48, 0.82]),
        (GarmentCategory::Bottom, 0.45, 0.45, 0.88, [0.43, 0.45, 0.70, 0.85]),
        (GarmentCategory::Outerwear, 0.58, 0.15, 0.88, [0.14, 0.18, 0.70, 0.72]),
    ];

    for (category, scale, offset_y, alpha, band) in rows {
        // A narrow garment never hits the canvas cap
        let plan = plan(category, 1000, 1000, 10);
        assert!(approx(plan.scale, scale), "{category:?}");
        assert!(approx(plan.offset_y, offset_y * 1000.0), "{category:?}");
        assert!(approx(plan.alpha, alpha), "{category:?}");
        assert_eq!(plan.offset_x, 0.0);
        assert_eq!(plan.band, BandDescriptor::from_fractions(1000, band));
    }
}

#[test]
fn body_color_without_skin_neighbors_is_fallback_tone() {
    let image = RgbaImage::from_pixel(60, 60, SHIRT);
    assert_eq!(estimate_body_color(&image, 30, 30), image::Rgb([200, 190, 180]));
}

#[test]
fn top_try_on_workflow_works() {
    let person = create_person(100, 150);
    let garment = RgbaImage::from_pixel(300, 300, Rgba([200, 30, 40, 255]));

    let result = composite(
        &DynamicImage::ImageRgba8(person.clone()),
        &DynamicImage::ImageRgba8(garment),
        "top",
    )
    .expect("Compositing should succeed");

    assert_eq!(result.dimensions(), (100, 150));

    // Head band (rows < 27) is untouched
    for y in 0..27 {
        for x in 0..100 {
            assert_eq!(result.get_pixel(x, y), person.get_pixel(x, y), "({x}, {y})");
        }
    }

    // Garment center: 48x48 garment at (26, 30), alpha 0.95 plus shadow
    let center = result.get_pixel(50, 60);
    assert!((175..=205).contains(&center[0]), "{center:?}");
    assert!(center[1] < 60 && center[2] < 60, "{center:?}");
    assert!(center[3] >= 240, "{center:?}");

    // Shirt below the garment is painted over with a faint skin tone
    let erased = result.get_pixel(35, 85);
    assert_eq!(erased[3], 80);
    assert!(erased[0] > erased[1] && erased[1] > erased[2], "{erased:?}");

    // Bare arm beside the torso column is kept
    assert_eq!(result.get_pixel(20, 60), &SKIN);

    // Trousers below leg_start (94.5) are never erased
    assert_eq!(result.get_pixel(50, 149), &TROUSERS);
}

#[test]
fn dress_covers_more_rows_than_top() {
    let person = DynamicImage::ImageRgba8(create_person(80, 120));
    let garment = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 100, Rgba([200, 30, 40, 255])));

    let reddish = |image: &RgbaImage| {
        image
            .pixels()
            .filter(|p| p[0] > 150 && p[1] < 80 && p[3] > 200)
            .count()
    };

    let top = composite(&person, &garment, "top").unwrap();
    let dress = composite(&person, &garment, "dress").unwrap();
    assert!(reddish(&dress) > reddish(&top));
}

#[test]
fn transparent_garment_only_erases_and_shadows() {
    let person = create_person(60, 90);
    let garment = RgbaImage::from_pixel(30, 30, Rgba([200, 30, 40, 0]));

    let result = composite(
        &DynamicImage::ImageRgba8(person.clone()),
        &DynamicImage::ImageRgba8(garment),
        "top",
    )
    .unwrap();

    let plan = plan(GarmentCategory::Top, 60, 90, 30);
    let mut expected = person.erase_clothing(&plan.band);
    expected.draw_drop_shadow_mut(plan.draw_rect(60, 30, 30));

    assert_eq!(result, expected);
}
