//! End-to-end outline extraction: classify, trace, simplify.
//!
//! `Vectorizer` owns the tuning parameters and runs the three pipeline
//! stages in sequence over a borrowed RGBA view. The stages themselves are
//! pure or operate on a private `BoundaryMap`, so a `Vectorizer` is
//! stateless between calls and safe to share.
use crate::boundary::{classify_boundaries, ALPHA_THRESHOLD, COLOR_THRESHOLD};
use crate::error::VectorizeError;
use crate::image::{ImageRgba8, BYTES_PER_PIXEL};
use crate::simplify::{simplify_contour, EDGE_ANGLE_TOLERANCE};
use crate::tracer::ContourTracer;
use crate::types::ShapeOutline;
use log::debug;
use std::time::Instant;

/// Tuning parameters for a vectorization run.
#[derive(Clone, Debug)]
pub struct VectorizeParams {
    /// Minimum alpha for a pixel to belong to a shape.
    pub alpha_threshold: u8,
    /// RGB distance beyond which adjacent pixels split into regions.
    pub color_threshold: i32,
    /// Cumulative angular-deviation budget per polyline segment.
    pub angle_tolerance: f32,
}

impl Default for VectorizeParams {
    fn default() -> Self {
        Self {
            alpha_threshold: ALPHA_THRESHOLD,
            color_threshold: COLOR_THRESHOLD,
            angle_tolerance: EDGE_ANGLE_TOLERANCE,
        }
    }
}

/// Runs the full classification, tracing, simplification pipeline.
pub struct Vectorizer {
    params: VectorizeParams,
}

impl Vectorizer {
    pub fn new(params: VectorizeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &VectorizeParams {
        &self.params
    }

    /// Extract the outline of every color-coherent opaque region in `img`.
    ///
    /// An image with no qualifying regions yields an empty `ShapeOutline`,
    /// not an error. The only failure mode is a buffer too small to hold a
    /// classifiable interior.
    pub fn vectorize(&self, img: ImageRgba8<'_>) -> Result<ShapeOutline, VectorizeError> {
        self.validate(&img)?;
        let t0 = Instant::now();

        let mut map =
            classify_boundaries(&img, self.params.alpha_threshold, self.params.color_threshold);

        let mut polylines = Vec::new();
        let mut raw_points = 0usize;
        let mut tracer = ContourTracer::new(&mut map);
        while let Some(contour) = tracer.next_contour() {
            raw_points += contour.len();
            let polyline = simplify_contour(&contour, self.params.angle_tolerance);
            // A single vertex cannot form an edge; drop it as noise.
            if polyline.len() > 1 {
                polylines.push(polyline);
            }
        }

        let outline = ShapeOutline { polylines };
        debug!(
            "vectorize: {}x{} -> {} contours, {} raw points, {} vertices in {:.1} ms",
            img.w,
            img.h,
            outline.polylines.len(),
            raw_points,
            outline.total_points(),
            t0.elapsed().as_secs_f64() * 1e3
        );
        Ok(outline)
    }

    /// Reject buffers that cannot hold a 3x3 image, the smallest with a
    /// classifiable interior, or whose byte length disagrees with the
    /// declared dimensions.
    fn validate(&self, img: &ImageRgba8<'_>) -> Result<(), VectorizeError> {
        let row_bytes = img.w * BYTES_PER_PIXEL;
        let needed = if img.h == 0 {
            0
        } else {
            (img.h - 1) * img.stride + row_bytes
        };
        if img.w < 3 || img.h < 3 || img.stride < row_bytes || img.data.len() < needed {
            return Err(VectorizeError::InvalidDimensions {
                width: img.w,
                height: img.h,
                len: img.data.len(),
            });
        }
        Ok(())
    }
}
