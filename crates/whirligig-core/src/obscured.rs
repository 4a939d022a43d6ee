//! Boundary detection for continuous stepping
//!
//! When a track has no fixed page size, `next`/`prev` jump to the slide that
//! is cut off at the trailing/leading edge of the viewport.

use crate::geometry::SlideGeometry;

/// Finds the partially visible slides at each edge of the viewport.
///
/// Returns `(first_obscured, last_obscured)`.
pub trait ObscurationAnalyzer {
    fn boundary_slides(
        &self,
        slides: &[SlideGeometry],
        in_view: &dyn Fn(&SlideGeometry) -> bool,
    ) -> (usize, usize);
}

/// Scans slide visibility left to right
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeObscuration;

impl ObscurationAnalyzer for EdgeObscuration {
    fn boundary_slides(
        &self,
        slides: &[SlideGeometry],
        in_view: &dyn Fn(&SlideGeometry) -> bool,
    ) -> (usize, usize) {
        if slides.len() <= 1 {
            return (0, 0);
        }

        let visible: Vec<bool> = slides.iter().map(|s| in_view(s)).collect();

        // Cut off at the leading edge: hidden, followed by a visible slide
        let first = (0..visible.len() - 1)
            .find(|&i| !visible[i] && visible[i + 1])
            .unwrap_or(0);

        // Cut off at the trailing edge: hidden, preceded by a visible slide
        let last = (1..visible.len())
            .find(|&i| !visible[i] && visible[i - 1])
            .unwrap_or(slides.len() - 1);

        (first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{uniform_layout, Viewport};

    fn analyze(slides: &[SlideGeometry], viewport: Viewport) -> (usize, usize) {
        EdgeObscuration.boundary_slides(slides, &|s| viewport.contains(s))
    }

    #[test]
    fn test_single_slide() {
        let slides = uniform_layout(1, 100.0, 0.0);
        assert_eq!(analyze(&slides, Viewport::new(0.0, 50.0)), (0, 0));
        assert_eq!(analyze(&[], Viewport::new(0.0, 50.0)), (0, 0));
    }

    #[test]
    fn test_trailing_edge_at_start() {
        // 2.5 slides visible from the start: slide 2 is cut on the right
        let slides = uniform_layout(5, 100.0, 0.0);
        assert_eq!(analyze(&slides, Viewport::new(0.0, 250.0)), (0, 2));
    }

    #[test]
    fn test_leading_edge_at_end() {
        // Scrolled to the end: slide 2 is cut on the left, nothing on the right
        let slides = uniform_layout(5, 100.0, 0.0);
        assert_eq!(analyze(&slides, Viewport::new(250.0, 250.0)), (2, 4));
    }

    #[test]
    fn test_both_edges_cut() {
        let slides = uniform_layout(6, 100.0, 0.0);
        // Window [150, 450]: slides 2 and 3 whole, 1 and 4 cut
        assert_eq!(analyze(&slides, Viewport::new(150.0, 300.0)), (1, 4));
    }

    #[test]
    fn test_nothing_fully_visible() {
        let slides = uniform_layout(4, 100.0, 0.0);
        assert_eq!(analyze(&slides, Viewport::new(50.0, 80.0)), (0, 3));
    }
}
