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

use image::{imageops, imageops::FilterType, DynamicImage, Rgba, RgbaImage};

use crate::{rect::PointD, viewport::RenderRequest};

/// Resampling filter for a frame.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    /// Nearest neighbour, used while the user is zooming or dragging
    #[default]
    Fast,
    /// Bicubic, used when a resample is requested explicitly
    High,
}

impl Quality {
    pub fn filter(&self) -> FilterType {
        match self {
            Quality::Fast => FilterType::Nearest,
            Quality::High => FilterType::CatmullRom,
        }
    }
}

/// A resampled crop and the request it was produced for.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbaImage,
    pub request: RenderRequest,
    pub quality: Quality,
}

impl Frame {
    /// Crops and scales `image` as described by `request`. Returns `None` when
    /// nothing of the image would be visible.
    pub fn render(image: &DynamicImage, request: &RenderRequest, quality: Quality) -> Option<Self> {
        resample(image, request, quality).map(|resampled| Frame {
            image: resampled,
            request: *request,
            quality,
        })
    }

    /// Draws the frame centered on its render position.
    pub fn blit(&self, canvas: &mut RgbaImage) {
        blit(canvas, &self.image, self.request.position);
    }
}

/// Crop + resize primitive. Only the whole-pixel crop is resampled.
pub fn resample(image: &DynamicImage, request: &RenderRequest, quality: Quality) -> Option<RgbaImage> {
    let crop = request.pixel_crop;
    let size = request.render_size();
    if crop.is_empty() || request.is_empty() {
        return None;
    }
    let cropped = image.crop_imm(
        crop.x0.max(0) as u32,
        crop.y0.max(0) as u32,
        crop.width() as u32,
        crop.height() as u32,
    );
    Some(imageops::resize(
        &cropped,
        size.width() as u32,
        size.height() as u32,
        quality.filter(),
    ))
}

/// Composites `frame` onto `canvas` with the frame's center at `center`.
pub fn blit(canvas: &mut RgbaImage, frame: &RgbaImage, center: PointD) {
    let x = (center.x() - frame.width() as f64 / 2.0).round() as i64;
    let y = (center.y() - frame.height() as f64 / 2.0).round() as i64;
    imageops::overlay(canvas, frame, x, y);
}

/// Blank canvas of the viewport's size.
pub fn canvas(width: u32, height: u32, background: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, background)
}
