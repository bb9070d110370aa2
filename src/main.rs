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

use std::{path::PathBuf, process::ExitCode};

use image::Rgba;
use panview::{
    config::{self, ViewportConfig},
    error::{PanviewError, PanviewResult},
    rect::SizeD,
    render_thread::RenderThread,
    view::ImageView,
    viewport::input::parse_script,
};

const HELP: &str = "\
panview - render an image through a pannable, zoomable viewport

USAGE:
  panview [OPTIONS] INPUT OUTPUT

OPTIONS:
  --size WxH        viewport size in pixels [default: 512x512]
  --config FILE     viewport configuration (JSON)
  --events SCRIPT   events to replay, separated by ';', e.g.
                    \"zoom-in 256 256; press 100 100; move 150 120; release\"
  --hq              resample with the high quality filter before writing
  -h, --help        print this help
";

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

struct Args {
    input: PathBuf,
    output: PathBuf,
    size: SizeD,
    config: Option<PathBuf>,
    events: String,
    hq: bool,
}

fn parse_size(value: &str) -> Result<SizeD, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{value}'"))?;
    let width: u32 = width.trim().parse().map_err(|_| format!("bad width '{width}'"))?;
    let height: u32 = height.trim().parse().map_err(|_| format!("bad height '{height}'"))?;
    Ok(SizeD::from_pixels(width, height))
}

fn parse_args() -> PanviewResult<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let size = args
        .opt_value_from_fn("--size", parse_size)?
        .unwrap_or_else(|| SizeD::new(512.0, 512.0));
    let config: Option<String> = args.opt_value_from_str("--config")?;
    let events: Option<String> = args.opt_value_from_str("--events")?;
    let hq = args.contains("--hq");

    let mut free = args.finish().into_iter().map(PathBuf::from);
    let input = free.next().ok_or("missing INPUT")?;
    let output = free.next().ok_or("missing OUTPUT")?;
    if let Some(extra) = free.next() {
        return Err(PanviewError::Args(format!("unexpected argument {extra:?}")));
    }

    Ok(Some(Args {
        input,
        output,
        size,
        config: config.map(PathBuf::from),
        events: events.unwrap_or_default(),
        hq,
    }))
}

fn run(args: Args) -> PanviewResult<()> {
    let config = match &args.config {
        Some(path) => ViewportConfig::load(path)?,
        None => *config::config(),
    };
    let events = parse_script(&args.events)?;

    let image = image::open(&args.input)?;
    log::info!(
        "{:?}: {}x{}, viewport {}x{}",
        args.input,
        image.width(),
        image.height(),
        args.size.width(),
        args.size.height()
    );

    let (to_rt_sender, to_rt_receiver) = async_channel::unbounded();
    let (from_rt_sender, from_rt_receiver) = async_channel::unbounded();
    let render_thread = RenderThread::new(from_rt_sender, to_rt_receiver);

    let mut view = ImageView::new(image, args.size, config)
        .with_render_thread(render_thread.create_sender(to_rt_sender));

    for event in events {
        view.handle(event);
    }

    if args.hq {
        view.resample_now();
        while let Ok(message) = from_rt_receiver.recv_blocking() {
            if view.apply_reply(message.reply) {
                break;
            }
        }
    }

    let viewport = view.viewport();
    log::info!(
        "scale {:.4} ({:?}), image center at {:?}",
        viewport.scale(),
        viewport.state(),
        viewport.position()
    );
    if let Some(frame) = view.frame() {
        log::debug!(
            "crop {:?} drawn at {:?} quality {:?}",
            frame.request.pixel_crop,
            frame.request.render_rect(),
            frame.quality
        );
    }

    view.compose(BACKGROUND).save(&args.output)?;
    drop(view);
    render_thread.join();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let result = parse_args().and_then(|args| match args {
        Some(args) => run(args),
        None => Ok(()),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("panview: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("800x600"), Ok(SizeD::new(800.0, 600.0)));
        assert_eq!(parse_size("64X32"), Ok(SizeD::new(64.0, 32.0)));
        assert!(parse_size("800").is_err());
        assert!(parse_size("ax600").is_err());
        assert!(parse_size("800x-1").is_err());
    }
}
