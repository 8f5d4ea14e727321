use std::path::{Path, PathBuf};

use crate::error::{SlidereelError, SlidereelResult};

/// Target canvas in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Output aspect-ratio presets; each maps to exact pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide16x9,
    #[serde(rename = "4:3")]
    Standard4x3,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[serde(rename = "21:9")]
    Ultrawide21x9,
}

impl AspectRatio {
    pub fn dimensions(self) -> Canvas {
        let (width, height) = match self {
            AspectRatio::Wide16x9 => (1920, 1080),
            AspectRatio::Standard4x3 => (1440, 1080),
            AspectRatio::Square => (1080, 1080),
            AspectRatio::Portrait9x16 => (1080, 1920),
            AspectRatio::Ultrawide21x9 => (2560, 1080),
        };
        Canvas { width, height }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectRatio::Wide16x9 => "16:9",
            AspectRatio::Standard4x3 => "4:3",
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Ultrawide21x9 => "21:9",
        }
    }

    pub fn all() -> &'static [AspectRatio] {
        &[
            AspectRatio::Wide16x9,
            AspectRatio::Standard4x3,
            AspectRatio::Square,
            AspectRatio::Portrait9x16,
            AspectRatio::Ultrawide21x9,
        ]
    }
}

/// Quality presets; each maps to a target video bitrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Quality {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Quality {
    pub fn bitrate_kbps(self) -> u32 {
        match self {
            Quality::Low => 1000,
            Quality::Medium => 2000,
            Quality::High => 5000,
            Quality::VeryHigh => 10000,
        }
    }

    /// Relative encode-cost weight used by the progress estimator.
    pub fn encode_cost_multiplier(self) -> f64 {
        match self {
            Quality::Low => 0.5,
            Quality::Medium => 0.75,
            Quality::High => 1.0,
            Quality::VeryHigh => 1.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quality::Low => "Low",
            Quality::Medium => "Medium",
            Quality::High => "High",
            Quality::VeryHigh => "Very High",
        }
    }
}

/// One entry in the ordered slideshow sequence.
///
/// Transition, effect, and overlay fields hold the user-facing names from the
/// closed enumerations ("Fade In", "Zoom In", "Watermark", ...) or "None".
/// Unknown names are treated as identity by the libraries, never as errors.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ImageSpec {
    pub source_path: PathBuf,
    pub duration: f64,
    pub start_transition: String,
    pub start_transition_duration: f64,
    pub end_transition: String,
    pub end_transition_duration: f64,
    pub effect: String,
    pub overlay_effect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_text: Option<String>,
}

impl ImageSpec {
    /// New entry with the stock defaults (3 s on screen, 1 s fade in/out).
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            duration: 3.0,
            start_transition: "Fade In".to_string(),
            start_transition_duration: 1.0,
            end_transition: "Fade Out".to_string(),
            end_transition_duration: 1.0,
            effect: "None".to_string(),
            overlay_effect: "None".to_string(),
            overlay_text: None,
        }
    }

    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// On-screen time; transitions draw from within this, not in addition.
    pub fn total_duration(&self) -> f64 {
        self.duration
    }

    pub fn validate(&self) -> SlidereelResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SlidereelError::validation(format!(
                "image '{}': duration must be positive seconds",
                self.file_name()
            )));
        }
        if self.start_transition != "None"
            && (!self.start_transition_duration.is_finite()
                || self.start_transition_duration <= 0.0)
        {
            return Err(SlidereelError::validation(format!(
                "image '{}': start transition duration must be positive seconds",
                self.file_name()
            )));
        }
        if self.end_transition != "None"
            && (!self.end_transition_duration.is_finite() || self.end_transition_duration <= 0.0)
        {
            return Err(SlidereelError::validation(format!(
                "image '{}': end transition duration must be positive seconds",
                self.file_name()
            )));
        }
        Ok(())
    }
}

pub fn supported_image_extensions() -> &'static [&'static str] {
    &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp"]
}

pub fn is_supported_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            supported_image_extensions().contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Format seconds as MM:SS.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Rough output size in MiB from duration and bitrate.
pub fn estimated_file_size_mb(duration_secs: f64, bitrate_kbps: u32) -> f64 {
    let bytes_per_second = f64::from(bitrate_kbps) * 1000.0 / 8.0;
    duration_secs.max(0.0) * bytes_per_second / (1024.0 * 1024.0)
}

/// The ordered slideshow sequence. It is the sole owner of its [`ImageSpec`]
/// entries; position in the vector is the only ordering key.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Sequence {
    images: Vec<ImageSpec>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(images: Vec<ImageSpec>) -> Self {
        Self { images }
    }

    pub fn push(&mut self, spec: ImageSpec) {
        self.images.push(spec);
    }

    pub fn remove(&mut self, index: usize) -> Option<ImageSpec> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    /// Swap with the previous entry; returns whether anything moved.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.images.len() {
            return false;
        }
        self.images.swap(index - 1, index);
        true
    }

    /// Swap with the next entry; returns whether anything moved.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.images.len() {
            return false;
        }
        self.images.swap(index, index + 1);
        true
    }

    pub fn get(&self, index: usize) -> Option<&ImageSpec> {
        self.images.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ImageSpec> {
        self.images.get_mut(index)
    }

    /// Bulk parameter edit across every entry (the interface's "apply to
    /// all" operation).
    pub fn apply_to_all(&mut self, mut edit: impl FnMut(&mut ImageSpec)) {
        for spec in &mut self.images {
            edit(spec);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageSpec> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn total_duration(&self) -> f64 {
        self.images.iter().map(|s| s.total_duration()).sum()
    }

    pub fn validate(&self) -> SlidereelResult<()> {
        if self.images.is_empty() {
            return Err(SlidereelError::validation("no images to render"));
        }
        for spec in &self.images {
            spec.validate()?;
        }
        Ok(())
    }
}

/// Whole-render settings.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    pub aspect_ratio: AspectRatio,
    pub frame_rate: u32,
    pub quality: Quality,
    /// Nominal transition-overlap fraction. Reserved for timeline-level
    /// overlap; transitions are drawn within each clip's own duration and
    /// this value is not applied to inter-clip blending.
    #[serde(default = "default_transition_overlap")]
    pub transition_overlap: f64,
    /// Seed for stochastic overlays. Seeded renders are reproducible;
    /// without a seed each render draws a fresh entropy base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_transition_overlap() -> f64 {
    0.5
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Wide16x9,
            frame_rate: 30,
            quality: Quality::High,
            transition_overlap: default_transition_overlap(),
            seed: None,
        }
    }
}

impl RenderSettings {
    pub fn canvas(&self) -> Canvas {
        self.aspect_ratio.dimensions()
    }

    pub fn bitrate_kbps(&self) -> u32 {
        self.quality.bitrate_kbps()
    }

    pub fn validate(&self) -> SlidereelResult<()> {
        if self.frame_rate == 0 {
            return Err(SlidereelError::validation("frame rate must be > 0"));
        }
        if !self.transition_overlap.is_finite() || !(0.0..=1.0).contains(&self.transition_overlap)
        {
            return Err(SlidereelError::validation(
                "transition overlap must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// A complete render job: the sequence plus one settings object. This is the
/// JSON manifest shape the CLI consumes.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderJob {
    pub images: Vec<ImageSpec>,
    #[serde(default)]
    pub settings: RenderSettings,
}
