//! Angular-budget polyline reduction.
//!
//! Collapses a pixel-exact contour into a short polyline: consecutive
//! steps accumulate `1 - dot(step_dir, segment_dir)` as a deviation
//! measure (0 for a straight continuation, approaching 2 for a full
//! reversal), and a vertex is emitted only once the accumulated deviation
//! reaches the budget. A larger budget means fewer segments.
use crate::types::{PixelPoint, Polyline};
use nalgebra::Vector2;

/// Default cumulative deviation budget per polyline segment.
pub const EDGE_ANGLE_TOLERANCE: f32 = 2.0;

#[inline]
fn to_vector(p: PixelPoint) -> Vector2<f32> {
    Vector2::new(p.x as f32, p.y as f32)
}

/// Reduce a raw contour to a polyline under the given angular budget.
///
/// The first and last points are always kept. Interior points are emitted
/// only when the deviation accumulated since the segment start reaches
/// `tolerance`. Consecutive input points must be distinct except for the
/// closing duplicate a traced contour carries as its final element.
///
/// The output never has more vertices than the input; single-point inputs
/// come back unchanged and are the caller's to discard.
pub fn simplify_contour(contour: &[PixelPoint], tolerance: f32) -> Polyline {
    let mut polyline = Polyline::new();
    let Some(&first) = contour.first() else {
        return polyline;
    };
    polyline.push(first.to_vertex());
    if contour.len() == 1 {
        return polyline;
    }

    let mut segment_start = to_vector(first);
    let mut segment_dir: Option<Vector2<f32>> = None;
    let mut total_error = 0.0f32;

    let last = contour.len() - 1;
    for i in 1..contour.len() {
        let cur = contour[i];
        if i == last {
            polyline.push(cur.to_vertex());
            break;
        }

        // First step of a segment establishes the direction; it is not
        // confirmed against anything yet, so no vertex is emitted.
        let Some(dir) = segment_dir else {
            segment_dir = Some((to_vector(cur) - segment_start).normalize());
            continue;
        };

        let step = (to_vector(cur) - to_vector(contour[i - 1])).normalize();
        total_error += 1.0 - step.dot(&dir);
        if total_error < tolerance {
            continue;
        }

        // Budget exhausted: the previous point ends the segment and the
        // current point starts the next one.
        polyline.push(contour[i - 1].to_vertex());
        segment_start = to_vector(cur);
        segment_dir = None;
        total_error = 0.0;
    }

    polyline
}
