use std::fmt;

use thiserror::Error;

/// Identifies which image an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageRole {
    /// The photo of the person being dressed
    Person,
    /// The clothing item laid over the person
    Garment,
    /// The composited output
    Result,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageRole::Person => "person",
            ImageRole::Garment => "garment",
            ImageRole::Result => "result",
        };
        f.write_str(name)
    }
}

/// Error type for compositing operations
///
/// Every variant is fatal for the call that produced it. Compositing has no
/// transient failure modes, so callers should not expect a retry to succeed
/// with the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input bytes could not be decoded into a raster image
    ///
    /// Returned before any pixel processing starts; no partial output exists.
    #[error("Failed to decode {role} image: {message}")]
    ImageDecode {
        /// Which input failed to decode
        role: ImageRole,
        /// Decoder message
        message: String,
    },

    /// An image has zero width or height
    ///
    /// Checked before the placement table divides by the garment width.
    #[error("The {role} image has degenerate geometry: {width}x{height}")]
    GeometryDegenerate {
        role: ImageRole,
        width: u32,
        height: u32,
    },

    /// Layer and mask dimensions do not match
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// The result image could not be encoded
    #[error("Failed to encode result image: {0}")]
    ImageEncode(String),

    /// Invalid parameter provided to the operation
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Error type for the try-on service layer
///
/// Wraps the remote job lifecycle on top of the local [`Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TryOnError {
    /// Uploading an input image to object storage failed
    #[error("Image upload failed: {0}")]
    Upload(String),

    /// The remote try-on service rejected or failed a request
    #[error("Remote try-on request failed: {0}")]
    Remote(String),

    /// The remote job finished in a failed state
    #[error("Try-on job {task_id} failed: {reason}")]
    JobFailed { task_id: String, reason: String },

    /// The remote job did not finish within the configured poll budget
    #[error("Try-on job {task_id} still pending after {attempts} polls")]
    PollTimeout { task_id: String, attempts: u32 },

    /// Local compositing failed
    #[error(transparent)]
    Composite(#[from] Error),
}
