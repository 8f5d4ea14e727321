#![forbid(unsafe_code)]

pub mod canvas_ops;
pub mod clip;
pub mod effects;
pub mod encode_ffmpeg;
pub mod error;
pub mod frame;
pub mod model;
pub mod overlays;
pub mod progress;
pub mod text;
pub mod timeline;
pub mod transitions;

pub use clip::{Clip, build_clip};
pub use effects::{Effect, apply_effect};
pub use error::{SlidereelError, SlidereelResult};
pub use frame::Frame;
pub use model::{
    AspectRatio, Canvas, ImageSpec, Quality, RenderJob, RenderSettings, Sequence,
};
pub use overlays::{Overlay, apply_overlay};
pub use progress::{EncodeEstimator, ProgressContext, ProgressSink};
pub use timeline::{Timeline, build_timeline, render_video};
pub use transitions::{Edge, Transition, apply_transition};
