//! Per-pixel boundary classification.
//!
//! Converts an RGBA view into a `BoundaryMap`: one flag byte per pixel
//! recording whether the pixel sits on the boundary of an opaque,
//! color-coherent region, which of its four cardinal neighbors do too, and
//! whether the tracer has already consumed it.
//!
//! A pixel is a boundary pixel when its alpha meets `ALPHA_THRESHOLD` and
//! any of its 8 neighbors is either transparent or further than
//! `COLOR_THRESHOLD` away in squared RGB distance. The comparison is a
//! strict `>` on the squared threshold, so a neighbor at exactly the
//! threshold distance does not qualify.
//!
//! Only the interior (`1..w-1`, `1..h-1`) is classified. Border pixels
//! never become boundary pixels, which keeps every neighbor lookup during
//! tracing in range.
use crate::image::ImageRgba8;
use bitflags::bitflags;

/// Minimum alpha for a pixel to count as part of a shape.
pub const ALPHA_THRESHOLD: u8 = 128;

/// RGB distance beyond which two adjacent pixels belong to different
/// regions. Compared in squared form to avoid the square root.
pub const COLOR_THRESHOLD: i32 = 50;

bitflags! {
    /// Per-pixel classification byte.
    ///
    /// The four neighbor flags are propagated outward at classification
    /// time: a boundary pixel announces itself to each cardinal neighbor,
    /// so `LEFT_NEIGHBOR` on a pixel means "the pixel to my left is a
    /// boundary pixel".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PixelFlags: u8 {
        const LEFT_NEIGHBOR = 0x01;
        const RIGHT_NEIGHBOR = 0x02;
        const TOP_NEIGHBOR = 0x04;
        const BOTTOM_NEIGHBOR = 0x08;
        const SELF_EDGE = 0x10;
        const VISITED = 0x20;
    }
}

impl PixelFlags {
    /// Union of the four cardinal-neighbor flags.
    pub const NEIGHBOR_MASK: PixelFlags = PixelFlags::LEFT_NEIGHBOR
        .union(PixelFlags::RIGHT_NEIGHBOR)
        .union(PixelFlags::TOP_NEIGHBOR)
        .union(PixelFlags::BOTTOM_NEIGHBOR);

    /// Whether this pixel is eligible to extend a contour: a boundary
    /// pixel that borders open space in at least one cardinal direction,
    /// is cardinally adjacent to at least one other boundary pixel, and
    /// has not been visited yet.
    #[inline]
    pub fn is_traceable(self) -> bool {
        if !self.contains(Self::SELF_EDGE) || self.contains(Self::VISITED) {
            return false;
        }
        let neighbors = self.intersection(Self::NEIGHBOR_MASK);
        !neighbors.is_empty() && neighbors != Self::NEIGHBOR_MASK
    }
}

/// Neighbor scan order for the color comparison: cardinals first, then
/// diagonals. Affects only which neighbor short-circuits the check, not
/// the boolean outcome.
const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// One flag byte per pixel, row-major, same dimensions as the source image.
#[derive(Clone, Debug)]
pub struct BoundaryMap {
    /// Map width in pixels
    pub w: usize,
    /// Map height in pixels
    pub h: usize,
    data: Vec<PixelFlags>,
}

impl BoundaryMap {
    /// Construct a zero-initialized map of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![PixelFlags::empty(); w * h],
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    /// Get the flags at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> PixelFlags {
        self.data[self.idx(x, y)]
    }

    /// Merge `flags` into the byte at (x, y).
    #[inline]
    pub fn mark(&mut self, x: usize, y: usize, flags: PixelFlags) {
        let i = self.idx(x, y);
        self.data[i] |= flags;
    }

    /// Record a boundary pixel: set `SELF_EDGE` at (x, y) and announce it
    /// to the four cardinal neighbors. Requires (x, y) strictly inside the
    /// 1-pixel border.
    pub fn mark_boundary(&mut self, x: usize, y: usize) {
        self.mark(x, y, PixelFlags::SELF_EDGE);
        self.mark(x - 1, y, PixelFlags::RIGHT_NEIGHBOR);
        self.mark(x + 1, y, PixelFlags::LEFT_NEIGHBOR);
        self.mark(x, y - 1, PixelFlags::BOTTOM_NEIGHBOR);
        self.mark(x, y + 1, PixelFlags::TOP_NEIGHBOR);
    }

    /// Whether the pixel at (x, y) currently qualifies as a contour seed
    /// or extension.
    #[inline]
    pub fn is_traceable(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_traceable()
    }
}

/// Classify every interior pixel of `img` into a fresh `BoundaryMap`.
///
/// Pure function of the pixel data; the caller is expected to have
/// validated the buffer dimensions.
pub fn classify_boundaries(img: &ImageRgba8, alpha_threshold: u8, color_threshold: i32) -> BoundaryMap {
    let mut map = BoundaryMap::new(img.w, img.h);
    let color_threshold_squared = color_threshold * color_threshold;

    for y in 1..img.h - 1 {
        for x in 1..img.w - 1 {
            let [r, g, b, a] = img.rgba(x, y);
            if a < alpha_threshold {
                // Below the alpha threshold we are outside any shape.
                continue;
            }

            let on_edge = NEIGH_OFFSETS.iter().any(|&(dx, dy)| {
                let nx = (x as isize + dx) as usize;
                let ny = (y as isize + dy) as usize;
                let [nr, ng, nb, na] = img.rgba(nx, ny);
                if na < alpha_threshold {
                    return true;
                }
                let dr = nr as i32 - r as i32;
                let dg = ng as i32 - g as i32;
                let db = nb as i32 - b as i32;
                dr * dr + dg * dg + db * db > color_threshold_squared
            });

            if on_edge {
                map.mark_boundary(x, y);
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tightly packed RGBA canvas filled with a single color.
    fn canvas(w: usize, h: usize, rgba: [u8; 4]) -> Vec<u8> {
        let mut data = Vec::with_capacity(w * h * 4);
        for _ in 0..w * h {
            data.extend_from_slice(&rgba);
        }
        data
    }

    fn set_pixel(data: &mut [u8], w: usize, x: usize, y: usize, rgba: [u8; 4]) {
        let i = (y * w + x) * 4;
        data[i..i + 4].copy_from_slice(&rgba);
    }

    fn view(data: &[u8], w: usize, h: usize) -> ImageRgba8<'_> {
        ImageRgba8 {
            w,
            h,
            stride: w * 4,
            data,
        }
    }

    #[test]
    fn transparent_image_has_no_boundaries() {
        let data = canvas(8, 8, [0, 0, 0, 0]);
        let map = classify_boundaries(&view(&data, 8, 8), ALPHA_THRESHOLD, COLOR_THRESHOLD);
        for y in 0..8 {
            for x in 0..8 {
                assert!(map.get(x, y).is_empty(), "unexpected flags at ({x},{y})");
            }
        }
    }

    #[test]
    fn alpha_just_below_threshold_is_background() {
        let data = canvas(8, 8, [200, 10, 10, 127]);
        let map = classify_boundaries(&view(&data, 8, 8), ALPHA_THRESHOLD, COLOR_THRESHOLD);
        for y in 0..8 {
            for x in 0..8 {
                assert!(map.get(x, y).is_empty());
            }
        }
    }

    #[test]
    fn uniform_opaque_image_has_no_boundaries() {
        let data = canvas(8, 8, [90, 90, 90, 255]);
        let map = classify_boundaries(&view(&data, 8, 8), ALPHA_THRESHOLD, COLOR_THRESHOLD);
        for y in 0..8 {
            for x in 0..8 {
                assert!(map.get(x, y).is_empty());
            }
        }
    }

    #[test]
    fn color_distance_at_exact_threshold_is_not_a_boundary() {
        // Neighbor at squared distance exactly 50^2: strict `>` must not fire.
        let mut data = canvas(5, 5, [0, 0, 0, 255]);
        set_pixel(&mut data, 5, 2, 1, [50, 0, 0, 255]);
        let map = classify_boundaries(&view(&data, 5, 5), ALPHA_THRESHOLD, COLOR_THRESHOLD);
        for y in 0..5 {
            for x in 0..5 {
                assert!(
                    !map.get(x, y).contains(PixelFlags::SELF_EDGE),
                    "exact-threshold distance misclassified at ({x},{y})"
                );
            }
        }
    }

    #[test]
    fn color_distance_above_threshold_is_a_boundary() {
        let mut data = canvas(5, 5, [0, 0, 0, 255]);
        set_pixel(&mut data, 5, 2, 1, [51, 0, 0, 255]);
        let map = classify_boundaries(&view(&data, 5, 5), ALPHA_THRESHOLD, COLOR_THRESHOLD);
        assert!(map.get(2, 2).contains(PixelFlags::SELF_EDGE));
    }

    #[test]
    fn opaque_square_yields_boundary_ring_with_announcements() {
        // 6x6 opaque square at (2,2)..(7,7) on a transparent 10x10 canvas.
        let mut data = canvas(10, 10, [0, 0, 0, 0]);
        for y in 2..8 {
            for x in 2..8 {
                set_pixel(&mut data, 10, x, y, [200, 40, 40, 255]);
            }
        }
        let map = classify_boundaries(&view(&data, 10, 10), ALPHA_THRESHOLD, COLOR_THRESHOLD);

        // Ring pixels are boundary, interior pixels are not.
        for y in 2..8 {
            for x in 2..8 {
                let on_ring = x == 2 || x == 7 || y == 2 || y == 7;
                assert_eq!(
                    map.get(x, y).contains(PixelFlags::SELF_EDGE),
                    on_ring,
                    "wrong classification at ({x},{y})"
                );
            }
        }

        // A top-edge midpoint hears from its left and right ring neighbors
        // but not from the non-boundary pixel below it.
        let mid = map.get(4, 2);
        assert!(mid.contains(PixelFlags::LEFT_NEIGHBOR));
        assert!(mid.contains(PixelFlags::RIGHT_NEIGHBOR));
        assert!(!mid.contains(PixelFlags::TOP_NEIGHBOR));
        assert!(!mid.contains(PixelFlags::BOTTOM_NEIGHBOR));
        assert!(mid.is_traceable());

        // Corners hear from exactly two cardinal neighbors.
        let corner = map.get(2, 2);
        assert!(corner.contains(PixelFlags::RIGHT_NEIGHBOR));
        assert!(corner.contains(PixelFlags::BOTTOM_NEIGHBOR));
        assert!(corner.is_traceable());
    }

    #[test]
    fn border_pixels_are_never_classified() {
        // Fully opaque canvas with wild colors right on the border.
        let mut data = canvas(6, 6, [255, 255, 255, 255]);
        set_pixel(&mut data, 6, 0, 0, [0, 0, 0, 255]);
        set_pixel(&mut data, 6, 5, 5, [0, 0, 0, 255]);
        let map = classify_boundaries(&view(&data, 6, 6), ALPHA_THRESHOLD, COLOR_THRESHOLD);
        for x in 0..6 {
            assert!(!map.get(x, 0).contains(PixelFlags::SELF_EDGE));
            assert!(!map.get(x, 5).contains(PixelFlags::SELF_EDGE));
        }
        for y in 0..6 {
            assert!(!map.get(0, y).contains(PixelFlags::SELF_EDGE));
            assert!(!map.get(5, y).contains(PixelFlags::SELF_EDGE));
        }
    }

    #[test]
    fn fully_surrounded_boundary_pixel_is_not_traceable() {
        let mut map = BoundaryMap::new(5, 5);
        // Plus-shaped cluster: center hears from all four cardinals.
        map.mark_boundary(2, 2);
        map.mark_boundary(1, 2);
        map.mark_boundary(3, 2);
        map.mark_boundary(2, 1);
        map.mark_boundary(2, 3);
        assert!(!map.is_traceable(2, 2), "fully interior ring pixel must not seed");
        assert!(map.is_traceable(1, 2));
    }

    #[test]
    fn isolated_boundary_pixel_is_not_traceable() {
        let mut map = BoundaryMap::new(5, 5);
        map.mark_boundary(2, 2);
        assert!(!map.is_traceable(2, 2), "isolated pixel is noise, not a seed");
    }

    #[test]
    fn visited_pixel_is_not_traceable() {
        let mut map = BoundaryMap::new(5, 5);
        map.mark_boundary(2, 2);
        map.mark_boundary(3, 2);
        assert!(map.is_traceable(2, 2));
        map.mark(2, 2, PixelFlags::VISITED);
        assert!(!map.is_traceable(2, 2));
    }
}
