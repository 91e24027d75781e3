use serde::{Deserialize, Serialize};

/// Integer pixel-grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

impl PixelPoint {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Convert to a floating-point polyline vertex.
    #[inline]
    pub fn to_vertex(self) -> [f32; 2] {
        [self.x as f32, self.y as f32]
    }
}

/// Pixel-exact walk of one boundary ring. The final element duplicates the
/// last reached pixel as a closing point.
pub type RawContour = Vec<PixelPoint>;

/// Simplified contour: ordered vertices in pixel coordinates.
pub type Polyline = Vec<[f32; 2]>;

/// All simplified contours extracted from one image.
///
/// Serializes as a nested list of `[x, y]` pairs, the persisted format
/// shared with the outline cache.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeOutline {
    pub polylines: Vec<Polyline>,
}

impl ShapeOutline {
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Total vertex count across all polylines.
    pub fn total_points(&self) -> usize {
        self.polylines.iter().map(Vec::len).sum()
    }
}
