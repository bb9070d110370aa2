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

/// Floating point comparison epsilon for zoom state detection
const ZOOM_EPSILON: f64 = 1.0e-6;

/// Direction of a single zoom step.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum ZoomDirection {
    /// Multiply the scale by the configured step
    In,
    /// Divide the scale by the configured step
    Out,
}

impl ZoomDirection {
    /// Multiplier this direction applies to the current scale.
    pub fn factor(&self, scale_step: f64) -> f64 {
        match self {
            ZoomDirection::In => scale_step,
            ZoomDirection::Out => 1.0 / scale_step,
        }
    }

    /// Maps a vertical scroll delta onto a direction. Scrolling up (negative
    /// delta) zooms in, tiny deltas from touchpads are ignored.
    pub fn from_scroll(dy: f64) -> Option<Self> {
        if dy < -0.01 {
            Some(ZoomDirection::In)
        } else if dy > 0.01 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

impl From<&str> for ZoomDirection {
    fn from(value: &str) -> Self {
        match value {
            "out" | "zoom-out" => ZoomDirection::Out,
            _ => ZoomDirection::In,
        }
    }
}

/// Represents the current zoom state of the image relative to its original size.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy)]
pub enum ZoomState {
    /// Image is displayed at original size (scale = 1.0)
    NoZoom,
    /// Image is enlarged (scale > 1.0)
    ZoomedIn,
    /// Image is reduced (scale < 1.0)
    ZoomedOut,
}

impl ZoomState {
    pub fn of(scale: f64) -> Self {
        if scale > 1.0 + ZOOM_EPSILON {
            ZoomState::ZoomedIn
        } else if scale < 1.0 - ZOOM_EPSILON {
            ZoomState::ZoomedOut
        } else {
            ZoomState::NoZoom
        }
    }
}

/// Clamps a requested scale into `[min_scale, max_scale]`.
///
/// A single-point range (`min_scale == max_scale`) pins the scale to that
/// value. An inverted range (`min_scale > max_scale`) keeps `current`.
pub fn clamp_scale(requested: f64, current: f64, min_scale: f64, max_scale: f64) -> f64 {
    if min_scale > max_scale {
        current
    } else {
        requested.clamp(min_scale, max_scale)
    }
}
