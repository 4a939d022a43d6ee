//! Slide geometry snapshots read from the host

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing slide edges against the viewport
pub const EDGE_EPSILON: f64 = 0.5;

/// Extent of one slide along the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideGeometry {
    pub index: usize,
    /// Offset of the slide's leading edge from the start of the track
    pub offset_start: f64,
    pub width: f64,
}

impl SlideGeometry {
    pub fn new(index: usize, offset_start: f64, width: f64) -> Self {
        Self {
            index,
            offset_start,
            width,
        }
    }

    #[inline]
    pub fn offset_end(&self) -> f64 {
        self.offset_start + self.width
    }
}

/// Visible window of the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: f64,
    pub width: f64,
}

impl Viewport {
    pub fn new(offset: f64, width: f64) -> Self {
        Self { offset, width }
    }

    /// True when the slide lies entirely inside the window
    pub fn contains(&self, slide: &SlideGeometry) -> bool {
        slide.offset_start >= self.offset - EDGE_EPSILON
            && slide.offset_end() <= self.offset + self.width + EDGE_EPSILON
    }
}

/// Index of the slide whose leading edge is closest to `scroll_offset`.
///
/// Ties resolve to the lowest index. Returns `None` for an empty track.
pub fn nearest_slide_index(slides: &[SlideGeometry], scroll_offset: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, slide) in slides.iter().enumerate() {
        let distance = (slide.offset_start - scroll_offset).abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

/// Lay out `count` slides of equal width separated by `gutter`
pub fn uniform_layout(count: usize, width: f64, gutter: f64) -> Vec<SlideGeometry> {
    (0..count)
        .map(|i| SlideGeometry::new(i, i as f64 * (width + gutter), width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_at_first_slide() {
        let slides = uniform_layout(5, 100.0, 0.0);
        assert_eq!(nearest_slide_index(&slides, 0.0), Some(0));
    }

    #[test]
    fn test_nearest_rounds_to_closest_edge() {
        let slides = uniform_layout(5, 100.0, 0.0);
        assert_eq!(nearest_slide_index(&slides, 140.0), Some(1));
        assert_eq!(nearest_slide_index(&slides, 160.0), Some(2));
        assert_eq!(nearest_slide_index(&slides, 10_000.0), Some(4));
    }

    #[test]
    fn test_nearest_tie_prefers_lowest_index() {
        let slides = uniform_layout(3, 100.0, 0.0);
        assert_eq!(nearest_slide_index(&slides, 50.0), Some(0));
    }

    #[test]
    fn test_nearest_empty() {
        assert_eq!(nearest_slide_index(&[], 12.0), None);
    }

    #[test]
    fn test_viewport_contains() {
        let viewport = Viewport::new(100.0, 250.0);
        let slides = uniform_layout(5, 100.0, 0.0);
        assert!(!viewport.contains(&slides[0]));
        assert!(viewport.contains(&slides[1]));
        assert!(viewport.contains(&slides[2]));
        assert!(!viewport.contains(&slides[3]));
    }
}
