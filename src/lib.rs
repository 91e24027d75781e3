#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod cache;
pub mod config;
pub mod error;
pub mod image;
pub mod types;
pub mod vectorizer;

// Pipeline stages. Public for tools and tests, but the usual entry point
// is `Vectorizer`.
pub mod boundary;
pub mod simplify;
pub mod tracer;

// --- High-level re-exports -------------------------------------------------

// Main entry points: vectorizer + results.
pub use crate::error::VectorizeError;
pub use crate::types::{PixelPoint, Polyline, RawContour, ShapeOutline};
pub use crate::vectorizer::{VectorizeParams, Vectorizer};

// Caching collaborators for embedding hosts.
pub use crate::cache::{CacheOptions, DirectoryStore, Freshness, OutlineCache, OutlineStore};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use outline_tracer::prelude::*;
///
/// # fn main() {
/// let (w, h) = (64usize, 64usize);
/// let pixels = vec![0u8; w * h * 4];
/// let img = ImageRgba8 { w, h, stride: w * 4, data: &pixels };
///
/// let vectorizer = Vectorizer::new(VectorizeParams::default());
/// let outline = vectorizer.vectorize(img).unwrap();
/// println!("contours={} points={}", outline.polylines.len(), outline.total_points());
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageRgba8;
    pub use crate::{ShapeOutline, VectorizeParams, Vectorizer};
}
