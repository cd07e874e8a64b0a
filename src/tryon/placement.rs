//! Category-specific garment placement.
//!
//! The table in [`plan`] is the single source of truth for where a garment
//! lands on the canvas and which body regions it may cover. Its constants are
//! tuned against a reference renderer and must not be rounded or merged.

/// Aspect ratio (height / width) above which an uncategorized garment is
/// treated as a long piece.
pub const LONG_GARMENT_ASPECT: f32 = 1.3;

/// Clothing category driving the placement table
///
/// Labels outside the known set resolve to [`GarmentCategory::Default`],
/// which carries the garment's aspect ratio (height / width).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GarmentCategory {
    Top,
    Bottom,
    Dress,
    Outerwear,
    Default(f32),
}

impl GarmentCategory {
    /// Resolves a free-form category label for a garment of the given size.
    ///
    /// Labels must match exactly (`"top"`, `"bottom"`, `"dress"`,
    /// `"outerwear"`); `"Top"` or `" top"` are unknown. Unknown labels are not
    /// an error; they fall back to the aspect-driven default placement.
    pub fn from_label(label: &str, garment_width: u32, garment_height: u32) -> Self {
        match label {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "dress" => Self::Dress,
            "outerwear" => Self::Outerwear,
            other => {
                let aspect = aspect_ratio(garment_width, garment_height);
                log::debug!("category {other:?} uses default placement (aspect {aspect:.3})");
                Self::Default(aspect)
            }
        }
    }

    /// Returns `true` for the `Default` variant with a long aspect ratio.
    pub fn is_long(&self) -> bool {
        matches!(self, Self::Default(aspect) if *aspect > LONG_GARMENT_ASPECT)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 {
        0.0
    } else {
        height as f32 / width as f32
    }
}

/// Vertical partition of the canvas in pixel rows
///
/// `head_end` is the bottom of the head band, `arm_start..arm_end` is the
/// vertical extent of the arm columns and `leg_start` is the top of the leg
/// band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandDescriptor {
    pub head_end: f32,
    pub arm_start: f32,
    pub arm_end: f32,
    pub leg_start: f32,
}

impl BandDescriptor {
    /// Builds a band from fractions of the canvas height.
    pub fn from_fractions(canvas_height: u32, fractions: [f32; 4]) -> Self {
        let height = canvas_height as f32;
        let [head_end, arm_start, arm_end, leg_start] = fractions;
        Self {
            head_end: height * head_end,
            arm_start: height * arm_start,
            arm_end: height * arm_end,
            leg_start: height * leg_start,
        }
    }

    /// A band that blanks nothing: no head band, empty arm columns, no leg band.
    pub fn full(canvas_height: u32) -> Self {
        Self {
            head_end: 0.0,
            arm_start: 0.0,
            arm_end: 0.0,
            leg_start: canvas_height as f32,
        }
    }

    /// Checks `0 <= head_end < arm_start <= arm_end < leg_start <= canvas_height`.
    pub fn is_monotonic(&self, canvas_height: u32) -> bool {
        0.0 <= self.head_end
            && self.head_end < self.arm_start
            && self.arm_start <= self.arm_end
            && self.arm_end < self.leg_start
            && self.leg_start <= canvas_height as f32
    }
}

/// Geometry for drawing one garment onto one canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPlan {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub alpha: f32,
    pub band: BandDescriptor,
}

/// Destination rectangle of the scaled garment, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacementPlan {
    /// Computes where the garment is drawn: horizontally centered, top edge at
    /// `offset_y`.
    pub fn draw_rect(&self, canvas_width: u32, garment_width: u32, garment_height: u32) -> DrawRect {
        let width = garment_width as f32 * self.scale;
        let height = garment_height as f32 * self.scale;
        DrawRect {
            x: (canvas_width as f32 - width) / 2.0 + self.offset_x,
            y: self.offset_y,
            width,
            height,
        }
    }
}

struct TableRow {
    scale: f32,
    offset_y: f32,
    alpha: f32,
    band: [f32; 4],
}

/// Plans the placement of a garment on a canvas.
///
/// `offset_y` and the band boundaries are absolute pixel values derived from
/// `canvas_height`. `offset_x` is always zero; centering happens in
/// [`PlacementPlan::draw_rect`]. The caller guarantees a non-zero
/// `garment_width`.
pub fn plan(
    category: GarmentCategory,
    canvas_width: u32,
    canvas_height: u32,
    garment_width: u32,
) -> PlacementPlan {
    let capped = |cap: f32| cap.min(canvas_width as f32 * cap / garment_width as f32);

    let row = match category {
        GarmentCategory::Top => TableRow {
            scale: capped(0.48),
            offset_y: 0.20,
            alpha: 0.95,
            band: [0.18, 0.22, 0.58, 0.63],
        },
        GarmentCategory::Dress => TableRow {
            scale: capped(0.52),
            offset_y: 0.17,
            alpha: 0.98,
            band: [0.15, 0.19, 0.48, 0.82],
        },
        GarmentCategory::Bottom => TableRow {
            scale: capped(0.45),
            offset_y: 0.45,
            alpha: 0.88,
            band: [0.43, 0.45, 0.70, 0.85],
        },
        GarmentCategory::Outerwear => TableRow {
            scale: capped(0.58),
            offset_y: 0.15,
            alpha: 0.88,
            band: [0.14, 0.18, 0.70, 0.72],
        },
        GarmentCategory::Default(aspect) if aspect > LONG_GARMENT_ASPECT => TableRow {
            scale: 0.55,
            offset_y: 0.15,
            alpha: 0.90,
            band: [0.14, 0.18, 0.50, 0.78],
        },
        GarmentCategory::Default(_) => TableRow {
            scale: 0.50,
            offset_y: 0.18,
            alpha: 0.90,
            band: [0.17, 0.20, 0.60, 0.65],
        },
    };

    PlacementPlan {
        scale: row.scale,
        offset_x: 0.0,
        offset_y: canvas_height as f32 * row.offset_y,
        alpha: row.alpha,
        band: BandDescriptor::from_fractions(canvas_height, row.band),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn known_labels_resolve() {
        assert_eq!(GarmentCategory::from_label("top", 10, 10), GarmentCategory::Top);
        assert_eq!(GarmentCategory::from_label("dress", 10, 10), GarmentCategory::Dress);
        assert_eq!(GarmentCategory::from_label("bottom", 10, 10), GarmentCategory::Bottom);
        assert_eq!(
            GarmentCategory::from_label("outerwear", 10, 10),
            GarmentCategory::Outerwear
        );
    }

    #[test]
    fn labels_match_exactly() {
        assert_eq!(GarmentCategory::from_label("Top", 10, 20), GarmentCategory::Default(2.0));
        assert_eq!(GarmentCategory::from_label(" dress ", 10, 20), GarmentCategory::Default(2.0));
        assert_eq!(GarmentCategory::from_label("BOTTOM", 10, 10), GarmentCategory::Default(1.0));
    }

    #[test]
    fn unknown_label_carries_aspect_ratio() {
        assert_eq!(
            GarmentCategory::from_label("shoes", 100, 150),
            GarmentCategory::Default(1.5)
        );
        assert!(GarmentCategory::from_label("", 100, 150).is_long());
        assert!(!GarmentCategory::from_label("hat", 100, 130).is_long());
    }

    #[test]
    fn top_plan_matches_table() {
        let plan = plan(GarmentCategory::Top, 400, 600, 300);
        assert!(approx(plan.scale, 0.48));
        assert_eq!(plan.offset_x, 0.0);
        assert!(approx(plan.offset_y, 120.0));
        assert!(approx(plan.alpha, 0.95));
        assert!(approx(plan.band.head_end, 108.0));
        assert!(approx(plan.band.arm_start, 132.0));
        assert!(approx(plan.band.arm_end, 348.0));
        assert!(approx(plan.band.leg_start, 378.0));
    }

    #[test]
    fn wide_garment_scale_is_capped_by_canvas() {
        // 0.45 * 100 / 400 = 0.1125
        let plan = plan(GarmentCategory::Bottom, 100, 200, 400);
        assert!(approx(plan.scale, 0.1125));
        assert!(approx(plan.offset_y, 90.0));
    }

    #[test]
    fn long_default_branch() {
        let plan = plan(GarmentCategory::Default(1.31), 100, 1000, 100);
        assert!(approx(plan.scale, 0.55));
        assert!(approx(plan.offset_y, 150.0));
        assert!(approx(plan.band.head_end, 140.0));
        assert!(approx(plan.band.leg_start, 780.0));
    }

    #[test]
    fn aspect_threshold_is_exclusive() {
        let plan = plan(GarmentCategory::Default(1.3), 100, 1000, 100);
        assert!(approx(plan.scale, 0.50));
        assert!(approx(plan.band.arm_end, 600.0));
    }

    #[test]
    fn draw_rect_centers_garment() {
        let plan = plan(GarmentCategory::Top, 400, 600, 300);
        let rect = plan.draw_rect(400, 300, 300);
        assert!(approx(rect.width, 144.0));
        assert!(approx(rect.height, 144.0));
        assert!(approx(rect.x, 128.0));
        assert!(approx(rect.y, 120.0));
    }

    #[test]
    fn full_band_is_not_monotonic_but_valid_for_masking() {
        let band = BandDescriptor::full(50);
        assert!(!band.is_monotonic(50));
        assert_eq!(band.leg_start, 50.0);
    }
}
