use std::ops::Range;

use rayon::prelude::*;

use crate::{
    export::sink::{FrameSink, SinkConfig},
    foundation::core::Millis,
    foundation::error::{SpreadError, SpreadResult},
    render::frame::{FrameRGBA, RenderSettings},
    render::raster::SvgRasterizer,
    render::svg::to_svg,
    show::Show,
};

/// Threading and chunking controls for multi-frame rasterization.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    /// Frames rasterized per batch in parallel mode.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames: u64,
}

/// Virtual time of frame `idx` at `fps`.
pub fn frame_time(idx: u64, fps: u32) -> Millis {
    Millis(idx.saturating_mul(1000) / u64::from(fps.max(1)))
}

/// Drive `show` through the frame times of `frames` and serialize the scene at each one.
///
/// The show only moves forward, so frames before its current time render its current state.
#[tracing::instrument(skip(show))]
pub fn record_svg_frames(
    show: &mut Show,
    fps: u32,
    frames: Range<u64>,
) -> SpreadResult<Vec<String>> {
    if fps == 0 {
        return Err(SpreadError::validation("fps must be >= 1"));
    }
    let mut out = Vec::with_capacity(frames.end.saturating_sub(frames.start).min(4096) as usize);
    for idx in frames {
        show.advance_to(frame_time(idx, fps))?;
        out.push(to_svg(show.scene()));
    }
    Ok(out)
}

/// Rasterize `svgs` in order and stream them into `sink`, numbering from `first_index`.
#[tracing::instrument(skip(svgs, sink), fields(frames = svgs.len()))]
pub fn render_frames(
    svgs: &[String],
    first_index: u64,
    fps: u32,
    settings: &RenderSettings,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> SpreadResult<RenderStats> {
    let mut stats = RenderStats::default();
    let mut begun = false;
    let mut emit = |idx: u64, frame: FrameRGBA, sink: &mut dyn FrameSink| -> SpreadResult<()> {
        if !begun {
            sink.begin(SinkConfig {
                width: frame.width,
                height: frame.height,
                fps,
            })?;
            begun = true;
        }
        sink.push_frame(idx, &frame)?;
        stats.frames += 1;
        Ok(())
    };

    if !threading.parallel {
        let rasterizer = SvgRasterizer::new(settings.clone());
        for (i, svg) in svgs.iter().enumerate() {
            emit(first_index + i as u64, rasterizer.rasterize(svg)?, sink)?;
        }
    } else {
        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = threading.chunk_size.max(1);
        let mut next = first_index;
        for chunk in svgs.chunks(chunk_size) {
            let rendered = pool.install(|| {
                chunk
                    .par_iter()
                    .map_init(
                        || SvgRasterizer::new(settings.clone()),
                        |rasterizer, svg| rasterizer.rasterize(svg),
                    )
                    .collect::<Vec<_>>()
            });
            for frame in rendered {
                emit(next, frame?, sink)?;
                next += 1;
            }
        }
    }

    if begun {
        sink.end()?;
    }
    Ok(stats)
}

fn build_thread_pool(threads: Option<usize>) -> SpreadResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SpreadError::validation("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SpreadError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/record.rs"]
mod tests;
