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

pub mod crop;
pub mod input;
pub mod zoom;

use crate::{
    config::ViewportConfig,
    rect::{PointD, RectD, SizeD, VectorD},
};

pub use crop::{CropInsets, RenderRequest};
pub use input::ViewportEvent;
pub use zoom::{ZoomDirection, ZoomState};

/// Pan and zoom state of one image shown in a resizable viewport.
///
/// Image space has its origin at the image center. Screen space has its origin
/// at the top-left of the viewport. The image center sits at
/// `viewport center + relative_position` and one image pixel covers `scale`
/// screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    config: ViewportConfig,
    /// Source image size in image pixels, fixed for the life of the viewport
    image_size: SizeD,
    /// Viewport size in screen pixels
    viewport_size: SizeD,
    scale: f64,
    /// Offset of the image center from the viewport center (screen pixels)
    relative_position: VectorD,
    /// Pointer position at the last press or move of the current drag
    drag: Option<PointD>,
}

impl Viewport {
    pub fn new(image_size: SizeD, viewport_size: SizeD, config: ViewportConfig) -> Self {
        Self {
            config,
            image_size,
            viewport_size,
            scale: 1.0,
            relative_position: VectorD::default(),
            drag: None,
        }
    }

    /// Returns to scale 1 with the image centered.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.relative_position = VectorD::default();
        self.drag = None;
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn image_size(&self) -> SizeD {
        self.image_size
    }

    pub fn viewport_size(&self) -> SizeD {
        self.viewport_size
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn state(&self) -> ZoomState {
        ZoomState::of(self.scale)
    }

    pub fn relative_position(&self) -> VectorD {
        self.relative_position
    }

    pub fn set_relative_position(&mut self, relative_position: VectorD) {
        self.relative_position = relative_position;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Center of the viewport in screen coordinates.
    pub fn center(&self) -> PointD {
        self.viewport_size.center()
    }

    /// Screen position of the image center.
    pub fn position(&self) -> PointD {
        self.relative_position + self.center()
    }

    /// Converts a point from image coordinates to screen coordinates.
    pub fn image_to_screen(&self, image: &PointD) -> PointD {
        *image * self.scale + self.position()
    }

    /// Converts a point from screen coordinates to image coordinates.
    pub fn screen_to_image(&self, screen: &PointD) -> PointD {
        (*screen - self.position()) / self.scale
    }

    /// Screen rectangle the whole scaled image would cover if nothing were cropped.
    pub fn image_rect(&self) -> RectD {
        RectD::from_center(
            self.position(),
            SizeD::new(
                self.image_size.width() * self.scale,
                self.image_size.height() * self.scale,
            ),
        )
    }

    /// Zooms one step in or out, keeping the image pixel under `pointer` in place.
    pub fn zoom_at(&mut self, pointer: PointD, direction: ZoomDirection) {
        let requested = self.scale * direction.factor(self.config.scale_step);
        self.zoom_to(requested, pointer);
    }

    /// Sets a new scale (clamped to the configured range) around an anchor point.
    ///
    /// When clamping leaves the scale unchanged the position is untouched, so
    /// repeated zooming against a limit is a no-op.
    pub fn zoom_to(&mut self, scale: f64, pointer: PointD) {
        assert!(pointer.is_finite(), "pointer must be finite: {pointer:?}");
        let old_scale = self.scale;
        let new_scale = zoom::clamp_scale(
            scale,
            old_scale,
            self.config.min_scale,
            self.config.max_scale,
        );
        assert!(
            new_scale > 0.0 && new_scale.is_finite(),
            "scale must be positive: {new_scale}"
        );

        let factor = new_scale / old_scale;
        if factor != 1.0 {
            self.relative_position = (self.position() - pointer) * factor + pointer - self.center();
        }
        self.scale = new_scale;
    }

    pub fn pan_start(&mut self, pointer: PointD) {
        assert!(pointer.is_finite(), "pointer must be finite: {pointer:?}");
        self.drag = Some(pointer);
    }

    /// Moves the image by the pointer travel since the previous press or move.
    /// Ignored when no drag is active.
    pub fn pan_move(&mut self, pointer: PointD) {
        assert!(pointer.is_finite(), "pointer must be finite: {pointer:?}");
        if let Some(last) = self.drag {
            self.relative_position += pointer - last;
            self.drag = Some(pointer);
        }
    }

    pub fn pan_end(&mut self) {
        self.drag = None;
    }

    /// Stores the new viewport size. The relative position is kept, so the
    /// image follows the viewport center rather than being re-centered.
    pub fn resize(&mut self, viewport_size: SizeD) {
        self.viewport_size = viewport_size;
    }

    /// Pulls the image back so that at least `pan_boundary` screen pixels of it
    /// overlap the viewport along every edge.
    pub fn limit_position(&mut self) {
        let boundary = self.config.pan_boundary;
        let rect = self.image_rect();
        let (a, b) = (rect.point0(), rect.point1());

        let x = limit_axis(
            self.relative_position.x(),
            a.x(),
            b.x(),
            self.viewport_size.width(),
            boundary,
        );
        let y = limit_axis(
            self.relative_position.y(),
            a.y(),
            b.y(),
            self.viewport_size.height(),
            boundary,
        );
        self.relative_position = VectorD::new(x, y);
    }

    /// Restores the pan boundary and derives everything needed to draw the
    /// current state. Calling it again without mutations yields the same result.
    pub fn prepare_render(&mut self) -> RenderRequest {
        self.limit_position();
        self.calculate_crop()
    }
}

/// One axis of the boundary clamp. Both corrections use the corners as they
/// were before either was applied.
fn limit_axis(relative: f64, a: f64, b: f64, extent: f64, boundary: f64) -> f64 {
    let mut relative = relative;
    if b < boundary {
        relative -= b - boundary;
    }
    if a > extent - boundary {
        relative -= a - (extent - boundary);
    }
    relative
}
