// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page geometry and image placement arithmetic.
//
// All layout happens in PDF points. An image's intrinsic pixel dimensions
// are its native size in points when embedded at 72 dpi, so the scale
// factor computed here is applied directly to the XObject transform.

use bindery_core::PaperSize;
use printpdf::Mm;

/// Wide images are fitted to this fraction of the page width.
const WIDE_PAGE_FRACTION: f32 = 0.8;
/// Tall and square images are fitted to this fraction of the page height.
const TALL_PAGE_FRACTION: f32 = 0.6;

/// Fixed page geometry for one assembly.
///
/// Resolved once from the configured paper size before any page is created
/// and reused for every page, so all pages of a document share identical
/// dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    width_mm: f32,
    height_mm: f32,
    /// Page width in points.
    pub width_pt: f32,
    /// Page height in points.
    pub height_pt: f32,
}

impl PageGeometry {
    /// Resolve the geometry for a paper size.
    pub fn from_paper(paper: PaperSize) -> Self {
        let (w_mm, h_mm) = paper.dimensions_mm();
        Self {
            width_mm: w_mm as f32,
            height_mm: h_mm as f32,
            width_pt: Mm(w_mm as f32).into_pt().0,
            height_pt: Mm(h_mm as f32).into_pt().0,
        }
    }

    /// Page dimensions in printpdf's Mm units, for page construction.
    pub fn page_size(&self) -> (Mm, Mm) {
        (Mm(self.width_mm), Mm(self.height_mm))
    }
}

/// Computed draw geometry for one image: position of the lower-left corner
/// and the scaled dimensions. Derived fresh per image, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedImage {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Uniform factor applied to both intrinsic dimensions.
    pub scale: f32,
}

/// Scale an image to fit the page and centre it.
///
/// The fit rule is asymmetric: an image wider than it is tall fills 80% of
/// the page width; a tall or square image fills 60% of the page height.
/// The scale is uniform either way, so aspect ratio is preserved.
pub fn place_image(geometry: &PageGeometry, intrinsic_width: u32, intrinsic_height: u32) -> PlacedImage {
    let w = intrinsic_width as f32;
    let h = intrinsic_height as f32;

    let scale = if intrinsic_width > intrinsic_height {
        geometry.width_pt * WIDE_PAGE_FRACTION / w
    } else {
        geometry.height_pt * TALL_PAGE_FRACTION / h
    };

    let width = w * scale;
    let height = h * scale;

    PlacedImage {
        x: geometry.width_pt / 2.0 - width / 2.0,
        y: geometry.height_pt / 2.0 - height / 2.0,
        width,
        height,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.01;

    fn letter() -> PageGeometry {
        PageGeometry::from_paper(PaperSize::Letter)
    }

    #[test]
    fn wide_image_fills_80_percent_of_page_width() {
        let geometry = letter();
        let placed = place_image(&geometry, 2000, 1000);

        assert!((placed.width - geometry.width_pt * 0.8).abs() < EPSILON);
        // Aspect ratio preserved.
        assert!((placed.height - placed.width / 2.0).abs() < EPSILON);
    }

    #[test]
    fn tall_image_fills_60_percent_of_page_height() {
        let geometry = letter();
        let placed = place_image(&geometry, 1000, 3000);

        assert!((placed.height - geometry.height_pt * 0.6).abs() < EPSILON);
        assert!((placed.width - placed.height / 3.0).abs() < EPSILON);
    }

    #[test]
    fn square_image_uses_the_height_branch() {
        // width > height is false for a square, so the 60%-height rule applies.
        let geometry = letter();
        let placed = place_image(&geometry, 500, 500);

        assert!((placed.height - geometry.height_pt * 0.6).abs() < EPSILON);
        assert!((placed.width - placed.height).abs() < EPSILON);
    }

    #[test]
    fn placed_image_is_page_centred() {
        let geometry = letter();
        for (w, h) in [(1200, 400), (400, 1200), (640, 640)] {
            let placed = place_image(&geometry, w, h);
            let centre_x = placed.x + placed.width / 2.0;
            let centre_y = placed.y + placed.height / 2.0;
            assert!((centre_x - geometry.width_pt / 2.0).abs() < EPSILON);
            assert!((centre_y - geometry.height_pt / 2.0).abs() < EPSILON);
        }
    }

    #[test]
    fn geometry_is_resolved_from_paper_size() {
        let geometry = letter();
        // 216 x 279 mm at 72 pt/inch.
        assert!((geometry.width_pt - 612.28).abs() < 0.5);
        assert!((geometry.height_pt - 790.87).abs() < 0.5);

        let (w, h) = geometry.page_size();
        assert!((w.0 - 216.0).abs() < EPSILON);
        assert!((h.0 - 279.0).abs() < EPSILON);
    }
}
