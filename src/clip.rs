//! Time-indexed frame producers and the per-image clip builder.

use std::{fmt, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use tracing::{debug, warn};

use crate::{
    canvas_ops,
    error::{SlidereelError, SlidereelResult},
    frame::Frame,
    model::{Canvas, ImageSpec},
    transitions::Edge,
};

type FrameProducer = Arc<dyn Fn(f64) -> Frame + Send + Sync>;

/// A fixed-dimension, fixed-duration frame producer for one image's
/// on-screen segment.
///
/// Clips are cheap to clone; the decoded source pixels live behind an `Arc`
/// and are released exactly once when the last clone is dropped. Sampling is
/// pure: `sample(t)` at the same `t` yields the same frame (stochastic
/// overlays derive their per-frame randomness deterministically from `t`).
#[derive(Clone)]
pub struct Clip {
    width: u32,
    height: u32,
    duration: f64,
    producer: FrameProducer,
}

impl Clip {
    /// Constant clip showing one frame for `duration` seconds.
    pub fn from_frame(frame: Frame, duration: f64) -> Self {
        let width = frame.width;
        let height = frame.height;
        let shared = Arc::new(frame);
        Self {
            width,
            height,
            duration,
            producer: Arc::new(move |_t| (*shared).clone()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Produce the frame at `t` seconds, clamped into `[0, duration)`.
    pub fn sample(&self, t: f64) -> Frame {
        let t = if self.duration > 0.0 {
            t.clamp(0.0, self.duration - f64::EPSILON.max(self.duration * 1e-9))
        } else {
            0.0
        };
        (self.producer)(t)
    }

    /// Wrap the producer with a per-(frame, time) transform. The transform
    /// must preserve frame dimensions; every pipeline stage does.
    pub fn map_frames<F>(self, f: F) -> Clip
    where
        F: Fn(Frame, f64) -> Frame + Send + Sync + 'static,
    {
        let inner = self.producer;
        Clip {
            width: self.width,
            height: self.height,
            duration: self.duration,
            producer: Arc::new(move |t| f(inner(t), t)),
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Clip {
        self.duration = duration;
        self
    }
}

impl fmt::Debug for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clip")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// Build one clip from an [`ImageSpec`].
///
/// Pipeline: load -> normalize -> letterbox -> set duration -> effect ->
/// overlay -> start transition -> end transition. The first three stages are
/// fatal (a clip with no valid frame cannot proceed) and surface as
/// [`SlidereelError::ClipBuild`] carrying the image index and path. The
/// cosmetic stages degrade to identity: a failing stage is logged and the
/// clip proceeds unmodified from before that stage.
///
/// A normalized temporary copy of the source image is written during the
/// normalize stage and removed on every exit path.
pub fn build_clip(
    spec: &ImageSpec,
    canvas: Canvas,
    index: usize,
    seed: Option<u64>,
) -> SlidereelResult<Clip> {
    let fatal = |err: anyhow::Error| SlidereelError::clip_build(index, &spec.source_path, err);

    // Loading.
    debug!(index, path = %spec.source_path.display(), "loading source image");
    let decoded = image::open(&spec.source_path)
        .with_context(|| format!("open image '{}'", spec.source_path.display()))
        .map_err(fatal)?;

    // Normalizing: flatten to RGB over black and keep a temporary normalized
    // copy on disk for the duration of the build.
    let rgb = decoded.to_rgb8();
    let (src_w, src_h) = rgb.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(fatal(anyhow::anyhow!("image has zero dimensions")));
    }
    let _normalized = NormalizedTempCopy::write(&rgb, index).map_err(fatal)?;

    let mut rgba = Vec::with_capacity((src_w as usize) * (src_h as usize) * 4);
    for px in rgb.pixels() {
        rgba.extend_from_slice(&[px.0[0], px.0[1], px.0[2], 255]);
    }
    let source = Frame::from_rgba8(src_w, src_h, rgba).map_err(|e| fatal(e.into()))?;

    // Letterboxing: the single place output dimensions are forced.
    let letterboxed = canvas_ops::letterbox(&source, canvas.width, canvas.height)
        .map_err(|e| fatal(e.into()))?;

    // DurationSet.
    let mut clip = Clip::from_frame(letterboxed, spec.duration);

    // Cosmetic stages: failure skips the stage and continues.
    clip = apply_cosmetic(clip, "effect", |c| {
        crate::effects::apply_effect(c, &spec.effect)
    });

    clip = apply_cosmetic(clip, "overlay", |c| {
        crate::overlays::apply_overlay(c, &spec.overlay_effect, spec.overlay_text.as_deref(), seed)
    });

    let start_window = clamp_window(spec.start_transition_duration, spec.duration);
    clip = apply_cosmetic(clip, "start transition", |c| {
        crate::transitions::apply_transition(c, &spec.start_transition, start_window, Edge::Start)
    });

    let end_window = clamp_window(spec.end_transition_duration, spec.duration);
    clip = apply_cosmetic(clip, "end transition", |c| {
        crate::transitions::apply_transition(c, &spec.end_transition, end_window, Edge::End)
    });

    Ok(clip)
}

/// Transition windows longer than the clip are clamped to the clip duration
/// so progress can never invert or divide by zero.
fn clamp_window(window: f64, clip_duration: f64) -> f64 {
    if !window.is_finite() || window < 0.0 {
        return 0.0;
    }
    window.min(clip_duration)
}

fn apply_cosmetic(
    clip: Clip,
    stage: &str,
    f: impl FnOnce(Clip) -> SlidereelResult<Clip>,
) -> Clip {
    let fallback = clip.clone();
    match f(clip) {
        Ok(out) => out,
        Err(err) => {
            warn!(stage, error = %err, "stage failed; continuing with unmodified clip");
            fallback
        }
    }
}

/// Scoped temporary file for the normalized source copy; removed on drop
/// whether the build succeeds or fails.
struct NormalizedTempCopy {
    path: Option<PathBuf>,
}

impl NormalizedTempCopy {
    fn write(rgb: &image::RgbImage, index: usize) -> anyhow::Result<Self> {
        let path = std::env::temp_dir().join(format!(
            "slidereel_norm_{}_{}.png",
            std::process::id(),
            index
        ));
        rgb.save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write normalized copy '{}'", path.display()))?;
        Ok(Self { path: Some(path) })
    }
}

impl Drop for NormalizedTempCopy {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}
