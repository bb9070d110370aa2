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

use std::sync::Arc;

use image::DynamicImage;

use crate::{
    render::{Frame, Quality},
    viewport::RenderRequest,
};

#[derive(Debug, Clone)]
pub enum RenderCommand {
    /// Resample `image` for the view generation that issued the request
    Resample(u32, Arc<DynamicImage>, RenderRequest, Quality),
}

#[derive(Debug, Clone)]
pub struct RenderCommandMessage {
    pub id: u32,
    pub cmd: RenderCommand,
}

#[derive(Debug, Clone)]
pub enum RenderReply {
    /// Generation and the frame produced for it, `None` when nothing is visible
    RenderDone(u32, Option<Frame>),
}

#[derive(Debug, Clone)]
pub struct RenderReplyMessage {
    pub id: u32,
    pub reply: RenderReply,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_send_sync() {
        assert_send_sync::<RenderCommandMessage>();
        assert_send_sync::<RenderReplyMessage>();
        assert_send_sync::<Frame>();
    }
}
