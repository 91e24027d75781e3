//! Greedy contour tracing over a mutable `BoundaryMap`.
//!
//! The tracer repeatedly seeds at the first traceable pixel in row-major
//! order and walks the 8-connected boundary ring from there, marking each
//! pixel visited as it is emitted. A contour ends when no unvisited
//! traceable neighbor remains, either at a true topological dead end or
//! when the ring closes onto already-visited pixels.
//!
//! The neighbor priority order is a documented invariant, not a free
//! implementation detail: it biases the walk to continue clockwise along
//! the most recently established direction, which keeps contours from
//! splitting or doubling back at ambiguous junctions. Changing it changes
//! which contour a junction pixel joins.
use crate::boundary::{BoundaryMap, PixelFlags};
use crate::types::{PixelPoint, RawContour};

/// Fixed walk priority: right, bottom-right, bottom, bottom-left, left,
/// top-left, top, top-right.
const WALK_PRIORITY: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Walks boundary rings out of a mutable map, one contour per call.
pub struct ContourTracer<'a> {
    map: &'a mut BoundaryMap,
    // Resume index for the seed scan. Flags only ever gain VISITED, so a
    // pixel rejected once stays rejected and never needs rescanning.
    cursor: usize,
}

impl<'a> ContourTracer<'a> {
    pub fn new(map: &'a mut BoundaryMap) -> Self {
        Self { map, cursor: 0 }
    }

    /// Trace the next contour, or `None` once the map is exhausted.
    /// Single-pixel contours are discarded as noise.
    pub fn next_contour(&mut self) -> Option<RawContour> {
        loop {
            let seed = self.find_seed()?;
            let contour = self.walk(seed);
            // The walk appends a closing duplicate, so a lone seed comes
            // back as two elements.
            if contour.len() > 2 {
                return Some(contour);
            }
        }
    }

    /// Row-major scan for the first pixel that currently qualifies as a
    /// contour seed.
    fn find_seed(&mut self) -> Option<PixelPoint> {
        while self.cursor < self.map.w * self.map.h {
            let x = self.cursor % self.map.w;
            let y = self.cursor / self.map.w;
            if self.map.is_traceable(x, y) {
                return Some(PixelPoint::new(x as u32, y as u32));
            }
            self.cursor += 1;
        }
        None
    }

    fn walk(&mut self, seed: PixelPoint) -> RawContour {
        self.visit(seed);
        let mut contour = vec![seed];
        let mut cur = seed;

        loop {
            match self.next_neighbor(cur) {
                Some(next) => {
                    self.visit(next);
                    contour.push(next);
                    cur = next;
                }
                None => {
                    // Dead end: close the contour on the last pixel.
                    contour.push(cur);
                    break;
                }
            }
        }

        contour
    }

    /// First traceable 8-neighbor of (x, y) in walk priority order.
    fn next_neighbor(&self, cur: PixelPoint) -> Option<PixelPoint> {
        let (x, y) = (cur.x as isize, cur.y as isize);
        for (dx, dy) in WALK_PRIORITY {
            let nx = x + dx;
            let ny = y + dy;
            // Border pixels are never SELF_EDGE, so a traceable neighbor is
            // always at least one pixel inside the map.
            if nx < 0 || ny < 0 || nx >= self.map.w as isize || ny >= self.map.h as isize {
                continue;
            }
            if self.map.is_traceable(nx as usize, ny as usize) {
                return Some(PixelPoint::new(nx as u32, ny as u32));
            }
        }
        None
    }

    #[inline]
    fn visit(&mut self, p: PixelPoint) {
        self.map.mark(p.x as usize, p.y as usize, PixelFlags::VISITED);
    }
}
