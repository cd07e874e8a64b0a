//! Edge feathering for the masked garment layer.
//!
//! Each boundary of the region mask gets a linear opacity ramp that is
//! subtracted from the layer's alpha ("destination-out"): a ramp opacity of 1
//! clears the pixel, 0 leaves it as is. Ramps are sampled at pixel centers.

use image::Rgba;
use imageproc::definitions::Image;

use super::placement::BandDescriptor;
use crate::utils::{clamp_f32_to_primitive, pixel_span};

/// Length of the ramp above `head_end` and below `leg_start`.
pub const FEATHER_SIZE: f32 = 30.0;

/// Width of the ramps at the left and right canvas edges.
pub const SIDE_FEATHER_SIZE: f32 = 25.0;

/// Axis along which a ramp varies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// A linear gradient with three color stops, expressed as opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientRamp {
    pub start: f32,
    pub end: f32,
    pub stops: [(f32, f32); 3],
}

impl GradientRamp {
    /// Opacity of the ramp at `position` along its axis.
    ///
    /// Positions before `start` take the first stop's opacity, positions
    /// after `end` take the last one; in between, stops are interpolated
    /// linearly.
    pub fn opacity_at(&self, position: f32) -> f32 {
        let length = self.end - self.start;
        if length <= 0.0 {
            return self.stops[2].1;
        }

        let t = ((position - self.start) / length).clamp(0.0, 1.0);
        let [first, middle, last] = self.stops;

        let (from, to) = if t <= middle.0 { (first, middle) } else { (middle, last) };
        let span = to.0 - from.0;
        if span <= 0.0 {
            return to.1;
        }
        from.1 + (to.1 - from.1) * (t - from.0) / span
    }
}

/// The four feathered boundaries of the region mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatherEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl FeatherEdge {
    pub const ALL: [FeatherEdge; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// The ramp this edge subtracts.
    pub fn ramp(self, width: u32, band: &BandDescriptor) -> GradientRamp {
        let canvas_width = width as f32;
        match self {
            Self::Top => GradientRamp {
                start: band.head_end - FEATHER_SIZE,
                end: band.head_end + FEATHER_SIZE * 0.5,
                stops: [(0.0, 1.0), (0.3, 0.5), (1.0, 0.0)],
            },
            Self::Bottom => GradientRamp {
                start: band.leg_start - FEATHER_SIZE * 0.5,
                end: band.leg_start + FEATHER_SIZE,
                stops: [(0.0, 0.0), (0.7, 0.5), (1.0, 1.0)],
            },
            Self::Left => GradientRamp {
                start: 0.0,
                end: SIDE_FEATHER_SIZE,
                stops: [(0.0, 1.0), (0.5, 0.3), (1.0, 0.0)],
            },
            Self::Right => GradientRamp {
                start: canvas_width - SIDE_FEATHER_SIZE,
                end: canvas_width,
                stops: [(0.0, 0.0), (0.5, 0.3), (1.0, 1.0)],
            },
        }
    }

    fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Area the ramp is painted over: `(left, top, right, bottom)`.
    ///
    /// Top and bottom ramps span the full width; side ramps only cover the
    /// arm rows.
    fn area(self, width: u32, band: &BandDescriptor) -> (f32, f32, f32, f32) {
        let ramp = self.ramp(width, band);
        let canvas_width = width as f32;
        match self.axis() {
            Axis::Vertical => (0.0, ramp.start, canvas_width, ramp.end),
            Axis::Horizontal => (ramp.start, band.arm_start, ramp.end, band.arm_end),
        }
    }
}

/// Trait for feathering the edges of a masked layer
pub trait SoftenEdges {
    /// Subtracts the four edge ramps from the alpha channel in place.
    fn soften_edges_mut(&mut self, band: &BandDescriptor) -> &mut Self;

    /// Consuming variant of [`SoftenEdges::soften_edges_mut`].
    fn soften_edges(mut self, band: &BandDescriptor) -> Self
    where
        Self: Sized,
    {
        self.soften_edges_mut(band);
        self
    }
}

impl SoftenEdges for Image<Rgba<u8>> {
    fn soften_edges_mut(&mut self, band: &BandDescriptor) -> &mut Self {
        let (width, height) = self.dimensions();

        for edge in FeatherEdge::ALL {
            let ramp = edge.ramp(width, band);
            let (left, top, right, bottom) = edge.area(width, band);
            let (Some((x0, x1)), Some((y0, y1))) =
                (pixel_span(left, right, width), pixel_span(top, bottom, height))
            else {
                continue;
            };

            for y in y0..y1 {
                for x in x0..x1 {
                    let position = match edge.axis() {
                        Axis::Vertical => y as f32 + 0.5,
                        Axis::Horizontal => x as f32 + 0.5,
                    };
                    let opacity = ramp.opacity_at(position);
                    let pixel = self.get_pixel_mut(x, y);
                    pixel[3] = clamp_f32_to_primitive(f32::from(pixel[3]) * (1.0 - opacity));
                }
            }
        }

        self
    }
}
