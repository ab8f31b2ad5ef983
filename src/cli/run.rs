// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::Path;
#[cfg(feature = "visualize")]
use std::time::Duration;

use crate::cli::args::RunArgs;
use crate::cli::logging::set_verbose;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::inference::ReplayEstimator;
use crate::pipeline::{FramePipeline, FrameStats};
use crate::source::open_source;
use crate::visualizer::font::{DEFAULT_FONT, check_font};
use crate::visualizer::{Canvas, Color};
#[cfg(feature = "visualize")]
use crate::visualizer::Viewer;
use crate::cli::logging::people;
use crate::{NAME, VERSION, frame, info, section, success, verbose, warn};

/// Running totals printed at the end of a run.
#[derive(Debug, Default)]
struct RunSummary {
    frames: u64,
    inference_ms: f64,
    people: usize,
}

impl RunSummary {
    fn add(&mut self, stats: &FrameStats) {
        self.frames += 1;
        self.inference_ms += stats.inference_ms;
        self.people = self.people.max(stats.people);
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_inference_ms(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.inference_ms / self.frames as f64
        }
    }
}

/// Load the label font: `font` if given, otherwise the cached or downloaded default.
///
/// A missing default font only disables text; an explicit font must load.
fn prepare_font(canvas: &mut Canvas, font: Option<&Path>, download: bool) -> Result<()> {
    if let Some(path) = font {
        return canvas.load_font(path);
    }
    let Some(path) = check_font(DEFAULT_FONT, download) else {
        warn!("{DEFAULT_FONT} is not available, text labels are disabled");
        return Ok(());
    };
    if let Err(e) = canvas.load_font(&path) {
        warn!("Failed to load {}: {e}, text labels are disabled", path.display());
    }
    Ok(())
}

/// Render recorded pose results over a frame source.
///
/// # Errors
///
/// Returns an error if the source, the pose file or the font cannot be loaded, if a frame
/// fails to render, or if the output image cannot be saved.
#[allow(clippy::too_many_lines)]
pub fn run(args: &RunArgs) -> Result<()> {
    set_verbose(args.verbose);
    info!("{NAME} {VERSION} 🚀 {}x{} views", args.width, args.height);

    let source = open_source(&args.source)?;
    let estimator =
        ReplayEstimator::load(&args.poses)?.with_input_size(args.input_height, args.input_width);
    verbose!(
        "Source {} ({}x{}), {} recorded results",
        args.source.display(),
        source.dimensions().0,
        source.dimensions().1,
        estimator.len()
    );

    let config = SceneConfig::new().with_rotation(args.rotation);
    let mut pipeline = FramePipeline::new(source, estimator, args.width, args.height)
        .with_config(config)
        .with_heatmap(args.heatmap);

    let (window_w, window_h) = pipeline.window_size();
    let mut canvas = Canvas::new(window_w, window_h);
    prepare_font(&mut canvas, args.font.as_deref(), !args.offline)?;

    #[cfg(feature = "visualize")]
    let mut viewer = if args.show {
        Some(Viewer::new(NAME, window_w as usize, window_h as usize)?)
    } else {
        None
    };
    #[cfg(not(feature = "visualize"))]
    if args.show {
        warn!("--show requires the 'visualize' feature, compile with --features visualize");
    }

    section!("Rendering");
    let limit = args.frame_limit();
    let mut summary = RunSummary::default();
    let mut frame_index: u64 = 0;
    loop {
        if limit.is_some_and(|n| frame_index >= n) {
            break;
        }

        canvas.clear(Color::BLACK);
        let Some(stats) = pipeline.step(&mut canvas, frame_index)? else {
            verbose!("Source exhausted after {frame_index} frames");
            break;
        };
        summary.add(&stats);
        frame!(frame_index, stats);

        #[cfg(feature = "visualize")]
        if let Some(v) = viewer.as_mut() {
            if !v.update(canvas.image())? {
                break;
            }
        }

        frame_index += 1;
    }

    #[cfg(feature = "visualize")]
    if let (Some(v), Some(_)) = (viewer.as_mut(), limit) {
        // keep the final frame up briefly
        v.wait(Duration::from_millis(500))?;
    }

    if summary.frames == 0 {
        warn!("No frames were rendered");
    }

    if let Some(path) = &args.save {
        canvas.save(path)?;
        success!("Saved {}", path.display());
    }

    info!(
        "Rendered {} frames, up to {}, {:.1}ms mean inference",
        summary.frames,
        people(summary.people),
        summary.mean_inference_ms()
    );
    Ok(())
}
