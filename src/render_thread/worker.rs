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

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use async_channel::{Receiver, Sender};

use crate::{
    render::Frame,
    render_thread::model::{RenderCommand, RenderCommandMessage, RenderReply, RenderReplyMessage},
};

#[derive(Debug, Clone)]
pub struct RenderWorker {
    to_rt_receiver: Receiver<RenderCommandMessage>,
    from_rt_sender: Sender<RenderReplyMessage>,
    command_id: Arc<AtomicU32>, // id of the newest command handed out
}

impl RenderWorker {
    pub fn new(
        from_rt_sender: Sender<RenderReplyMessage>,
        to_rt_receiver: Receiver<RenderCommandMessage>,
        counter: Arc<AtomicU32>,
    ) -> Self {
        RenderWorker {
            to_rt_receiver,
            from_rt_sender,
            command_id: counter,
        }
    }

    /// Serves commands until every sender is gone.
    pub fn run(&self) {
        while let Ok(command) = self.to_rt_receiver.recv_blocking() {
            if self.get_current_command_id() != command.id {
                log::debug!(
                    "There are newer commands in the queue, skipping id {}",
                    command.id
                );
                continue;
            }

            match command.cmd {
                RenderCommand::Resample(generation, image, request, quality) => {
                    let frame = Frame::render(&image, &request, quality);
                    if command.id != self.get_current_command_id() {
                        log::debug!(
                            "Result from resample not needed anymore. Discarding id {}",
                            command.id
                        );
                        continue;
                    }
                    let reply = RenderReplyMessage {
                        id: command.id,
                        reply: RenderReply::RenderDone(generation, frame),
                    };
                    if let Err(e) = self.from_rt_sender.send_blocking(reply) {
                        log::error!("Failed to send reply {e}");
                    }
                }
            }
        }
        log::debug!("Render thread finished");
    }

    fn get_current_command_id(&self) -> u32 {
        self.command_id.load(Ordering::SeqCst)
    }
}
