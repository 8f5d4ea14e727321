//! Whole-render tests. MP4 encoding requires `ffmpeg` on PATH; those tests
//! probe for it and return early when it is absent. The atomic-failure
//! scenario needs no encoder at all.

use std::{
    path::PathBuf,
    process::Command,
    sync::{Arc, Mutex},
};

use slidereel::{
    AspectRatio, ImageSpec, ProgressSink, Quality, RenderSettings, Sequence, SlidereelError,
    render_video,
};

fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn work_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "slidereel_render_{}_{}",
        tag,
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_image(dir: &PathBuf, name: &str, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    let img = image::RgbImage::from_pixel(192, 108, image::Rgb(rgb));
    img.save_with_format(&path, image::ImageFormat::Png).unwrap();
    path
}

fn short_spec(path: PathBuf, duration: f64) -> ImageSpec {
    let mut spec = ImageSpec::new(path);
    spec.duration = duration;
    spec.start_transition = "None".to_string();
    spec.end_transition = "None".to_string();
    spec
}

fn fast_settings() -> RenderSettings {
    RenderSettings {
        aspect_ratio: AspectRatio::Wide16x9,
        frame_rate: 10,
        quality: Quality::Low,
        transition_overlap: 0.5,
        seed: Some(1),
    }
}

#[test]
fn render_produces_nonempty_mp4_and_full_progress() {
    if !ffmpeg_available() {
        return;
    }
    let dir = work_dir("ok");
    let a = write_image(&dir, "a.png", [250, 0, 0]);
    let b = write_image(&dir, "b.png", [0, 0, 250]);
    let sequence = Sequence::from_specs(vec![short_spec(a, 0.3), short_spec(b, 0.3)]);

    let log = Arc::new(Mutex::new(Vec::<(u8, String)>::new()));
    let log2 = Arc::clone(&log);
    let sink: Arc<ProgressSink> = Arc::new(move |p, m: &str| {
        log2.lock().unwrap().push((p, m.to_string()));
    });

    let out = dir.join("out.mp4");
    render_video(&sequence, &fast_settings(), &out, sink).unwrap();

    let size = std::fs::metadata(&out).unwrap().len();
    assert!(size > 0, "output mp4 must be non-empty");

    let entries = log.lock().unwrap();
    assert!(!entries.is_empty());
    assert_eq!(entries.last().unwrap().0, 100);
    // Per-image steps reported before encoding started.
    assert!(entries.iter().any(|(_, m)| m.contains("Preparing image 1")));
    assert!(entries.iter().any(|(_, m)| m.contains("Concatenating")));
}

#[test]
fn missing_source_fails_atomically_and_identifies_the_path() {
    let dir = work_dir("missing");
    let good = write_image(&dir, "good.png", [10, 200, 10]);
    let bad = dir.join("not_there.png");
    let sequence = Sequence::from_specs(vec![
        short_spec(good, 0.3),
        short_spec(bad.clone(), 0.3),
    ]);

    let out = dir.join("never.mp4");
    let sink: Arc<ProgressSink> = Arc::new(|_, _| {});
    let err = render_video(&sequence, &fast_settings(), &out, sink).unwrap_err();

    match &err {
        SlidereelError::ClipBuild { index, path, .. } => {
            assert_eq!(*index, 1);
            assert_eq!(path, &bad);
        }
        other => panic!("expected ClipBuild, got {other:?}"),
    }
    assert!(!out.exists(), "no output file may be created on build failure");
}

#[test]
fn missing_source_leaves_stale_output_untouched() {
    let dir = work_dir("stale");
    let bad = dir.join("gone.png");
    let sequence = Sequence::from_specs(vec![short_spec(bad, 0.3)]);

    let out = dir.join("stale.mp4");
    std::fs::write(&out, b"previous render artifact").unwrap();

    let sink: Arc<ProgressSink> = Arc::new(|_, _| {});
    render_video(&sequence, &fast_settings(), &out, sink).unwrap_err();

    let contents = std::fs::read(&out).unwrap();
    assert_eq!(contents, b"previous render artifact");
}

#[test]
fn empty_sequence_is_rejected_before_any_work() {
    let dir = work_dir("empty");
    let out = dir.join("none.mp4");
    let sink: Arc<ProgressSink> = Arc::new(|_, _| {});
    let err = render_video(&Sequence::new(), &fast_settings(), &out, sink).unwrap_err();
    assert!(err.to_string().contains("no images"));
    assert!(!out.exists());
}
