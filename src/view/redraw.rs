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

use crate::{render::Quality, viewport::ViewportEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawReason {
    CanvasResized,
    ContentChanged,
    InteractiveDrag,
    InteractiveZoom,
    ResampleRequested,
}

impl RedrawReason {
    /// Interactive redraws use the fast filter, only an explicit request
    /// pays for the high quality one.
    pub fn quality(&self) -> Quality {
        if matches!(self, Self::ResampleRequested) {
            Quality::High
        } else {
            Quality::Fast
        }
    }
}

impl From<&ViewportEvent> for RedrawReason {
    fn from(event: &ViewportEvent) -> Self {
        match event {
            ViewportEvent::Zoom { .. } | ViewportEvent::Scroll { .. } => Self::InteractiveZoom,
            ViewportEvent::PanStart(_) | ViewportEvent::PanMove(_) | ViewportEvent::PanEnd => {
                Self::InteractiveDrag
            }
            ViewportEvent::Resize(_) => Self::CanvasResized,
        }
    }
}
