mod codec;
mod config;
mod error;
mod service;
#[cfg(test)]
mod test_utils;
mod tryon;
mod utils;

use image::{ImageBuffer, Pixel};

pub use codec::{decode, encode_png, fit_within, thumbnail, THUMBNAIL_SIZE};
pub use config::{Provider, TryOnConfig};
pub use error::{Error, ImageRole, TryOnError};
pub use service::{
    JobParams, JobStatus, JobSubmission, ObjectStore, RemoteBackend, RemoteTryOn, TryOnManager,
    TryOnOutcome,
};
pub use tryon::alpha_mask::MultiplyAlpha;
pub use tryon::background::{
    has_transparency, transparency_percentage, RemoveBackground, DEFAULT_CHROMA_TOLERANCE,
    EDGE_CHROMA_TOLERANCE,
};
pub use tryon::blend::{source_over, BlendOnto, SHADOW_ALPHA, SHADOW_OFFSET};
pub use tryon::body_color::{estimate_body_color, BODY_COLOR_RADIUS, FALLBACK_BODY_COLOR};
pub use tryon::classify::{classify, classify_pixel, is_clothing, is_skin, PixelClass};
pub use tryon::composite::{composite, composite_bytes, composite_with_category};
pub use tryon::erase::{in_torso_region, EraseClothing, ERASED_ALPHA, TORSO_WIDTH_FRACTION};
pub use tryon::palette::{
    color_hex, color_name, dominant_color, ColorName, DOMINANT_SAMPLE_SIZE, NEUTRAL_GRAY,
};
pub use tryon::placement::{
    plan, BandDescriptor, DrawRect, GarmentCategory, PlacementPlan, LONG_GARMENT_ASPECT,
};
pub use tryon::region_mask::{build_region_mask, ARM_WIDTH_FRACTION, DISCARD, KEEP};
pub use tryon::soften::{
    FeatherEdge, GradientRamp, SoftenEdges, FEATHER_SIZE, SIDE_FEATHER_SIZE,
};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
