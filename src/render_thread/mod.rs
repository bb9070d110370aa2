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

pub mod model;
mod sender;
mod worker;

use std::{
    sync::{atomic::AtomicU32, Arc},
    thread::{self, JoinHandle},
};

use async_channel::{Receiver, Sender};

use crate::render_thread::{
    model::{RenderCommandMessage, RenderReplyMessage},
    worker::RenderWorker,
};

pub use sender::RenderThreadSender;

/// Background thread doing the high quality resampling.
///
/// Only the newest command is worth rendering: older queued commands are
/// skipped and results that went stale while rendering are dropped.
#[derive(Debug)]
pub struct RenderThread {
    handle: JoinHandle<()>,
    counter: Arc<AtomicU32>,
}

impl RenderThread {
    pub fn new(
        from_rt_sender: Sender<RenderReplyMessage>,
        to_rt_receiver: Receiver<RenderCommandMessage>,
    ) -> Self {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = Arc::clone(&counter);
        let worker = RenderWorker::new(from_rt_sender, to_rt_receiver, counter_clone);
        let handle = thread::spawn(move || {
            worker.run();
        });
        RenderThread { handle, counter }
    }

    pub fn create_sender(&self, to_rt_sender: Sender<RenderCommandMessage>) -> RenderThreadSender {
        RenderThreadSender::new(to_rt_sender, self.counter.clone())
    }

    /// Waits for the worker to finish, which happens once all senders are dropped.
    pub fn join(self) {
        if self.handle.join().is_err() {
            log::error!("Render thread panicked");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use image::{DynamicImage, Rgba, RgbaImage};

    use super::{model::RenderCommand, model::RenderReply, *};
    use crate::{
        config::ViewportConfig,
        rect::SizeD,
        render::Quality,
        viewport::Viewport,
    };

    #[test]
    fn test_resample_roundtrip() {
        let image = Arc::new(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            20,
            10,
            Rgba([10, 20, 30, 255]),
        )));
        let mut viewport = Viewport::new(
            SizeD::new(20.0, 10.0),
            SizeD::new(100.0, 100.0),
            ViewportConfig::default(),
        );
        viewport.zoom_to(3.0, viewport.center());
        let request = viewport.prepare_render();

        let (to_rt_sender, to_rt_receiver) = async_channel::unbounded();
        let (from_rt_sender, from_rt_receiver) = async_channel::unbounded();
        let render_thread = RenderThread::new(from_rt_sender, to_rt_receiver);
        let sender = render_thread.create_sender(to_rt_sender);

        sender.send_blocking(RenderCommand::Resample(
            7,
            image.clone(),
            request,
            Quality::High,
        ));
        let reply = from_rt_receiver.recv_blocking().expect("reply");
        assert_eq!(reply.id, 1);
        let RenderReply::RenderDone(generation, frame) = reply.reply;
        assert_eq!(generation, 7);
        let frame = frame.expect("frame");
        assert_eq!(frame.image.dimensions(), (60, 30));
        assert_eq!(frame.quality, Quality::High);
        assert_eq!(frame.request, request);

        drop(sender);
        render_thread.join();
        assert!(from_rt_receiver.recv_blocking().is_err());
    }

    #[test]
    fn test_stale_commands_are_skipped() {
        let image = Arc::new(DynamicImage::ImageRgba8(RgbaImage::new(8, 8)));
        let mut viewport = Viewport::new(
            SizeD::new(8.0, 8.0),
            SizeD::new(64.0, 64.0),
            ViewportConfig::default(),
        );
        let request = viewport.prepare_render();

        let (to_rt_sender, to_rt_receiver) = async_channel::unbounded();
        let (from_rt_sender, from_rt_receiver) = async_channel::unbounded();
        let render_thread = RenderThread::new(from_rt_sender, to_rt_receiver);
        let sender = render_thread.create_sender(to_rt_sender);

        for generation in 1..=20 {
            sender.send_blocking(RenderCommand::Resample(
                generation,
                image.clone(),
                request,
                Quality::High,
            ));
        }
        drop(sender);
        render_thread.join();

        let mut generations = Vec::new();
        while let Ok(reply) = from_rt_receiver.try_recv() {
            let RenderReply::RenderDone(generation, _) = reply.reply;
            generations.push(generation);
        }
        // whatever got skipped, the newest command is always answered
        assert_eq!(generations.last(), Some(&20));
    }
}
