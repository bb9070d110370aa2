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

pub mod redraw;

use std::sync::Arc;

use image::{DynamicImage, Rgba, RgbaImage};

use crate::{
    config::ViewportConfig,
    rect::SizeD,
    render::{self, Frame, Quality},
    render_thread::{
        model::{RenderCommand, RenderReply},
        RenderThreadSender,
    },
    viewport::{Viewport, ViewportEvent},
};

pub use redraw::RedrawReason;

/// An image shown through a [`Viewport`], together with the frame currently on screen.
///
/// Frames are replaced whole. A high quality frame from the render thread is
/// only installed when no redraw happened since it was requested, so a crop
/// computed for an older viewport state is never shown.
pub struct ImageView {
    image: Arc<DynamicImage>,
    viewport: Viewport,
    frame: Option<Frame>,
    /// Bumped on every redraw; replies for older generations are stale
    generation: u32,
    rb_sender: Option<RenderThreadSender>,
}

impl ImageView {
    pub fn new(image: DynamicImage, viewport_size: SizeD, config: ViewportConfig) -> Self {
        let image_size = SizeD::from_pixels(image.width(), image.height());
        let mut view = Self {
            image: Arc::new(image),
            viewport: Viewport::new(image_size, viewport_size, config),
            frame: None,
            generation: 0,
            rb_sender: None,
        };
        view.redraw(RedrawReason::ContentChanged);
        view
    }

    /// Offloads high quality resampling to a render thread.
    pub fn with_render_thread(mut self, sender: RenderThreadSender) -> Self {
        self.rb_sender = Some(sender);
        self
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn handle(&mut self, event: ViewportEvent) {
        if self.viewport.handle(event) {
            self.redraw(RedrawReason::from(&event));
        }
    }

    /// Redraws the current state with the high quality filter.
    pub fn resample_now(&mut self) {
        self.redraw(RedrawReason::ResampleRequested);
    }

    pub fn redraw(&mut self, reason: RedrawReason) {
        let request = self.viewport.prepare_render();
        let quality = reason.quality();
        self.generation = self.generation.wrapping_add(1);
        log::debug!(
            "-- redraw  reason={reason:?} generation={} scale={:.3}",
            self.generation,
            request.scale
        );

        match (&self.rb_sender, quality) {
            (Some(sender), Quality::High) => {
                let current = self.frame.as_ref().map(|frame| frame.request);
                if current != Some(request) {
                    // the old frame does not match anymore, show a fast one meanwhile
                    self.frame = Frame::render(&self.image, &request, Quality::Fast);
                }
                sender.send_blocking(RenderCommand::Resample(
                    self.generation,
                    self.image.clone(),
                    request,
                    quality,
                ));
            }
            _ => {
                self.frame = Frame::render(&self.image, &request, quality);
            }
        }
    }

    /// Installs a frame produced by the render thread. Returns `false` when the
    /// reply is stale and was dropped.
    pub fn apply_reply(&mut self, reply: RenderReply) -> bool {
        match reply {
            RenderReply::RenderDone(generation, frame) => {
                if generation != self.generation {
                    log::debug!(
                        "Dropping stale frame of generation {generation}, now at {}",
                        self.generation
                    );
                    return false;
                }
                self.frame = frame;
                true
            }
        }
    }

    /// The viewport as it should appear on screen.
    pub fn compose(&self, background: Rgba<u8>) -> RgbaImage {
        let size = self.viewport.viewport_size();
        let mut canvas = render::canvas(
            size.width().max(0.0) as u32,
            size.height().max(0.0) as u32,
            background,
        );
        if let Some(frame) = &self.frame {
            frame.blit(&mut canvas);
        }
        canvas
    }
}
