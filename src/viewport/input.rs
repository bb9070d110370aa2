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

use std::str::FromStr;

use crate::{
    error::PanviewError,
    rect::{PointD, SizeD},
};

use super::{Viewport, ZoomDirection};

/// Input the viewport reacts to, independent of any toolkit's event types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Zoom {
        pointer: PointD,
        direction: ZoomDirection,
    },
    /// Wheel or touchpad scroll, `dy < 0` being up
    Scroll { pointer: PointD, dy: f64 },
    PanStart(PointD),
    PanMove(PointD),
    PanEnd,
    Resize(SizeD),
}

impl Viewport {
    /// Applies one event. Returns whether the view needs to be redrawn.
    ///
    /// Pressing and releasing only arm and disarm the drag, nothing visible
    /// changes, so they never ask for a redraw.
    pub fn handle(&mut self, event: ViewportEvent) -> bool {
        match event {
            ViewportEvent::Zoom { pointer, direction } => {
                self.zoom_at(pointer, direction);
                true
            }
            ViewportEvent::Scroll { pointer, dy } => match ZoomDirection::from_scroll(dy) {
                Some(direction) => {
                    self.zoom_at(pointer, direction);
                    true
                }
                None => false,
            },
            ViewportEvent::PanStart(pointer) => {
                self.pan_start(pointer);
                false
            }
            ViewportEvent::PanMove(pointer) => {
                let dragging = self.is_dragging();
                self.pan_move(pointer);
                dragging
            }
            ViewportEvent::PanEnd => {
                self.pan_end();
                false
            }
            ViewportEvent::Resize(size) => {
                let changed = size != self.viewport_size();
                self.resize(size);
                changed
            }
        }
    }
}

fn parse_numbers<const N: usize>(line: &str, args: &[&str]) -> Result<[f64; N], PanviewError> {
    if args.len() != N {
        return Err(format!("'{line}': expected {N} numbers").into());
    }
    let mut values = [0.0; N];
    for (value, arg) in values.iter_mut().zip(args) {
        *value = arg
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| PanviewError::Args(format!("'{line}': bad number '{arg}'")))?;
    }
    Ok(values)
}

/// Parses one event line, e.g. `zoom-in 256 256`, `scroll -1 10 20`,
/// `press 100 100`, `move 150 120`, `release` or `resize 800 600`.
impl FromStr for ViewportEvent {
    type Err = PanviewError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let event = match command {
            "zoom-in" | "zoom-out" => {
                let [x, y] = parse_numbers::<2>(line, &args)?;
                ViewportEvent::Zoom {
                    pointer: PointD::new(x, y),
                    direction: ZoomDirection::from(command),
                }
            }
            "scroll" => {
                let [dy, x, y] = parse_numbers::<3>(line, &args)?;
                ViewportEvent::Scroll {
                    pointer: PointD::new(x, y),
                    dy,
                }
            }
            "press" => {
                let [x, y] = parse_numbers::<2>(line, &args)?;
                ViewportEvent::PanStart(PointD::new(x, y))
            }
            "move" => {
                let [x, y] = parse_numbers::<2>(line, &args)?;
                ViewportEvent::PanMove(PointD::new(x, y))
            }
            "release" => {
                parse_numbers::<0>(line, &args)?;
                ViewportEvent::PanEnd
            }
            "resize" => {
                let [width, height] = parse_numbers::<2>(line, &args)?;
                if width < 0.0 || height < 0.0 {
                    return Err(format!("'{line}': negative size").into());
                }
                ViewportEvent::Resize(SizeD::new(width, height))
            }
            _ => return Err(format!("unknown event '{line}'").into()),
        };
        Ok(event)
    }
}

/// Parses a script of events separated by newlines or `;`. Blank entries and
/// `#` comments are skipped.
pub fn parse_script(script: &str) -> Result<Vec<ViewportEvent>, PanviewError> {
    script
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::parse)
        .collect()
}
