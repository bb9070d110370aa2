// PanView -- Pannable, zoomable image viewport with crop-before-resample rendering
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of PanView.
//
// PanView is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::rect::{PointD, RectD, RectI, SizeD, SizeI, VectorD};

use super::Viewport;

/// Amount cut from each edge of the image, in (fractional) image pixels.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct CropInsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CropInsets {
    /// Whole image pixels actually removed per edge (left, top, right, bottom).
    pub fn pixels(&self) -> (i32, i32, i32, i32) {
        (
            self.left.round() as i32,
            self.top.round() as i32,
            self.right.round() as i32,
            self.bottom.round() as i32,
        )
    }
}

/// Everything the resample and blit step needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub insets: CropInsets,
    /// `(left, top, width - right, height - bottom)` in image pixels
    pub crop: RectD,
    /// Crop rectangle on whole image pixels, handed to the resampler
    pub pixel_crop: RectI,
    pub scale: f64,
    /// Screen position of the center of the scaled crop
    pub position: PointD,
}

impl RenderRequest {
    /// Pixel size of the resampled crop.
    pub fn render_size(&self) -> SizeI {
        let size = self.pixel_crop.size();
        SizeI::new(
            (size.width() as f64 * self.scale) as i32,
            (size.height() as f64 * self.scale) as i32,
        )
    }

    /// Screen rectangle covered by the resampled crop when blitted centered on `position`.
    pub fn render_rect(&self) -> RectD {
        let size = self.render_size();
        RectD::from_center(
            self.position,
            SizeD::new(size.width() as f64, size.height() as f64),
        )
    }

    pub fn is_empty(&self) -> bool {
        let size = self.render_size();
        size.width() <= 0 || size.height() <= 0
    }
}

/// Inset and position correction for one edge.
///
/// `overflow` is how far the unclipped edge lies beyond the viewport edge in
/// screen pixels. The offset is half the removed scaled width plus half the
/// scaled rounding error between `inset` and the whole pixels removed.
fn edge_crop(overflow: f64, padding: f64, scale: f64) -> (f64, f64) {
    if overflow <= 0.0 {
        return (0.0, 0.0);
    }
    let inset = ((overflow - padding * scale) / scale).max(0.0);
    let offset = inset * scale / 2.0 + (inset.round() - inset) * scale / 2.0;
    (inset, offset)
}

impl Viewport {
    /// Derives the part of the image that is worth resampling and where to
    /// draw it so that it lines up with the uncropped image.
    ///
    /// Edges beyond the viewport are cut away, keeping `crop_padding` screen
    /// pixels of slack. Cutting shifts the center of what remains, and only
    /// whole image pixels can be cut, so the render position is corrected for
    /// both.
    pub fn calculate_crop(&self) -> RenderRequest {
        let scale = self.scale;
        let padding = self.config.crop_padding;
        let size = self.image_size;
        let rect = self.image_rect();
        let viewport = self.viewport_size;

        let (left, left_offset) = edge_crop(-rect.x0, padding, scale);
        let (top, top_offset) = edge_crop(-rect.y0, padding, scale);
        let (right, right_offset) = edge_crop(rect.x1 - viewport.width(), padding, scale);
        let (bottom, bottom_offset) = edge_crop(rect.y1 - viewport.height(), padding, scale);

        let insets = CropInsets {
            left,
            top,
            right,
            bottom,
        };
        let crop = RectD::new(left, top, size.width() - right, size.height() - bottom);

        let (l, t, r, b) = insets.pixels();
        let pixel_crop = RectI::new(
            l,
            t,
            size.width() as i32 - r,
            size.height() as i32 - b,
        );

        let offset = VectorD::new(left_offset - right_offset, top_offset - bottom_offset);

        RenderRequest {
            insets,
            crop,
            pixel_crop,
            scale,
            position: self.position() + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewportConfig;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn viewport(image: (f64, f64), view: (f64, f64)) -> Viewport {
        Viewport::new(
            SizeD::new(image.0, image.1),
            SizeD::new(view.0, view.1),
            ViewportConfig::default(),
        )
    }

    /// Screen x of the left edge of image pixel column `column` in the uncropped render.
    fn ideal_screen(vp: &Viewport, column: i32, row: i32) -> PointD {
        vp.image_rect().point0() + PointD::new(column as f64, row as f64) * vp.scale()
    }

    #[test]
    fn test_no_overflow_no_crop() {
        let mut vp = viewport((100.0, 80.0), (400.0, 300.0));
        let request = vp.prepare_render();
        assert_eq!(request.insets, CropInsets::default());
        assert_eq!(request.crop, RectD::new(0.0, 0.0, 100.0, 80.0));
        assert_eq!(request.pixel_crop, RectI::new(0, 0, 100, 80));
        assert_eq!(request.position, vp.position());
        assert_eq!(request.render_size(), SizeI::new(100, 80));
        assert_eq!(request.render_rect(), vp.image_rect());
    }

    #[test]
    fn test_crop_centered_overflow() {
        let mut vp = viewport((100.0, 100.0), (50.0, 50.0));
        vp.zoom_to(2.0, vp.center());
        assert_eq!(vp.relative_position(), VectorD::new(0.0, 0.0));

        let request = vp.calculate_crop();
        let insets = request.insets;
        for inset in [insets.left, insets.top, insets.right, insets.bottom] {
            assert!(inset > 0.0);
            assert!(approx_eq(inset, 36.5, 1.0e-12));
        }

        let crop = request.pixel_crop;
        assert!(crop.width() > 0 && crop.width() <= 100);
        assert!(crop.height() > 0 && crop.height() <= 100);
        assert_eq!(crop, RectI::new(37, 37, 63, 63));
        assert_eq!(request.crop, RectD::new(36.5, 36.5, 63.5, 63.5));

        // symmetric crop, so the render stays centered
        assert_eq!(request.position, PointD::new(25.0, 25.0));

        let rendered = request.render_rect();
        let ideal = ideal_screen(&vp, crop.x0, crop.y0);
        assert!(approx_eq(rendered.x0, ideal.x(), 1.0));
        assert!(approx_eq(rendered.y0, ideal.y(), 1.0));
    }

    #[test]
    fn test_crop_alignment_fractional() {
        let positions = [
            VectorD::new(0.0, 0.0),
            VectorD::new(13.3, -7.9),
            VectorD::new(-101.01, 55.5),
            VectorD::new(250.75, 199.2),
        ];
        for scale in [0.7, 1.0, 1.875, 3.515625, 7.3, 20.0] {
            for relative in positions {
                let mut vp = viewport((333.0, 217.0), (320.0, 240.0));
                vp.zoom_to(scale, vp.center());
                vp.set_relative_position(relative);
                let request = vp.prepare_render();
                if request.is_empty() {
                    continue;
                }

                // exact center of the whole-pixel crop, before size truncation
                let crop = request.pixel_crop;
                let exact_center = ideal_screen(&vp, crop.x0, crop.y0)
                    + PointD::new(crop.width() as f64, crop.height() as f64) * (scale / 2.0);
                assert!(
                    approx_eq(request.position.x(), exact_center.x(), 1.0e-9),
                    "{scale} {relative:?} {request:?}"
                );
                assert!(
                    approx_eq(request.position.y(), exact_center.y(), 1.0e-9),
                    "{scale} {relative:?} {request:?}"
                );

                let rendered = request.render_rect();
                let ideal = ideal_screen(&vp, crop.x0, crop.y0);
                assert!(approx_eq(rendered.x0, ideal.x(), 1.0), "{scale} {relative:?}");
                assert!(approx_eq(rendered.y0, ideal.y(), 1.0), "{scale} {relative:?}");
            }
        }
    }

    #[test]
    fn test_crop_keeps_padding() {
        let mut vp = viewport((200.0, 200.0), (100.0, 100.0));
        vp.zoom_to(4.0, vp.center());
        let request = vp.calculate_crop();
        let crop = request.pixel_crop;
        let rendered = request.render_rect();
        // the crop still covers the viewport
        assert!(rendered.x0 <= 0.0 && rendered.y0 <= 0.0);
        assert!(rendered.x1 >= 100.0 && rendered.y1 >= 100.0);
        assert!(crop.width() < 200 && crop.height() < 200);
    }

    #[test]
    fn test_overflow_smaller_than_padding() {
        // image sticks out by half a screen pixel on the left only
        let mut vp = viewport((100.0, 100.0), (200.0, 200.0));
        vp.set_relative_position(VectorD::new(-50.5, 0.0));
        let request = vp.calculate_crop();
        assert_eq!(request.insets, CropInsets::default());
        assert_eq!(request.pixel_crop, RectI::new(0, 0, 100, 100));
        assert_eq!(request.position, vp.position());
    }

    #[test]
    fn test_one_sided_crop_offset() {
        let mut vp = viewport((100.0, 100.0), (200.0, 200.0));
        vp.zoom_to(2.0, vp.center());
        // left edge at -30.6
        vp.set_relative_position(VectorD::new(-30.6, 0.0));
        let request = vp.calculate_crop();

        let inset = (30.6 - 2.0) / 2.0;
        assert!(approx_eq(request.insets.left, inset, 1.0e-12));
        assert_eq!(request.insets.right, 0.0);
        assert_eq!(request.pixel_crop.x0, 14);

        // 14 whole pixels removed from the left shift the center by 14 screen pixels
        assert!(approx_eq(request.position.x(), vp.position().x() + 14.0, 1.0e-9));
        assert_eq!(request.position.y(), vp.position().y());
    }

    #[test]
    fn test_zero_sized_image() {
        let mut vp = viewport((0.0, 0.0), (200.0, 200.0));
        let request = vp.prepare_render();
        assert!(request.is_empty());
        assert!(request.pixel_crop.is_empty());
        assert_eq!(request.render_size(), SizeI::new(0, 0));
        assert!(request.position.is_finite());
    }

    #[test]
    fn test_prepare_render_is_repeatable() {
        let mut vp = viewport((640.0, 480.0), (300.0, 200.0));
        vp.zoom_to(3.3, PointD::new(10.0, 20.0));
        vp.set_relative_position(VectorD::new(5000.0, -5000.0));
        let first = vp.prepare_render();
        let second = vp.prepare_render();
        assert_eq!(first, second);
    }
}
