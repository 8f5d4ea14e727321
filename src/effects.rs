//! Whole-clip visual effects.
//!
//! Each effect is a closed-form function of the sample time `t` over the
//! clip's duration; no effect depends on any other clip. Effects are
//! best-effort enhancements: an unknown name (or "None") leaves the clip
//! untouched rather than erroring.

use kurbo::Affine;
use tracing::debug;

use crate::{canvas_ops, clip::Clip, error::SlidereelResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    ZoomIn,
    ZoomOut,
    PanLeftToRight,
    PanRightToLeft,
    PanTopToBottom,
    PanBottomToTop,
    BrightnessPulse,
    RotateClockwise,
    RotateCounterClockwise,
    Sepia,
    Grayscale,
    Blur,
    MirrorX,
    MirrorY,
    ColorBoost,
    Vignette,
}

impl Effect {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Zoom In" => Some(Self::ZoomIn),
            "Zoom Out" => Some(Self::ZoomOut),
            "Pan Left to Right" => Some(Self::PanLeftToRight),
            "Pan Right to Left" => Some(Self::PanRightToLeft),
            "Pan Top to Bottom" => Some(Self::PanTopToBottom),
            "Pan Bottom to Top" => Some(Self::PanBottomToTop),
            "Brightness Pulse" => Some(Self::BrightnessPulse),
            "Rotate Clockwise" => Some(Self::RotateClockwise),
            "Rotate Counter-Clockwise" => Some(Self::RotateCounterClockwise),
            "Sepia" => Some(Self::Sepia),
            "Grayscale" => Some(Self::Grayscale),
            "Blur" => Some(Self::Blur),
            "Mirror X" => Some(Self::MirrorX),
            "Mirror Y" => Some(Self::MirrorY),
            "Color Boost" => Some(Self::ColorBoost),
            "Vignette" => Some(Self::Vignette),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ZoomIn => "Zoom In",
            Self::ZoomOut => "Zoom Out",
            Self::PanLeftToRight => "Pan Left to Right",
            Self::PanRightToLeft => "Pan Right to Left",
            Self::PanTopToBottom => "Pan Top to Bottom",
            Self::PanBottomToTop => "Pan Bottom to Top",
            Self::BrightnessPulse => "Brightness Pulse",
            Self::RotateClockwise => "Rotate Clockwise",
            Self::RotateCounterClockwise => "Rotate Counter-Clockwise",
            Self::Sepia => "Sepia",
            Self::Grayscale => "Grayscale",
            Self::Blur => "Blur",
            Self::MirrorX => "Mirror X",
            Self::MirrorY => "Mirror Y",
            Self::ColorBoost => "Color Boost",
            Self::Vignette => "Vignette",
        }
    }

    /// Every effect name the interface exposes, in presentation order.
    pub fn all() -> &'static [Effect] {
        &[
            Self::ZoomIn,
            Self::ZoomOut,
            Self::PanLeftToRight,
            Self::PanRightToLeft,
            Self::PanTopToBottom,
            Self::PanBottomToTop,
            Self::BrightnessPulse,
            Self::RotateClockwise,
            Self::RotateCounterClockwise,
            Self::Sepia,
            Self::Grayscale,
            Self::Blur,
            Self::MirrorX,
            Self::MirrorY,
            Self::ColorBoost,
            Self::Vignette,
        ]
    }
}

/// Apply the named effect to a clip. "None" and unknown names are identity.
pub fn apply_effect(clip: Clip, name: &str) -> SlidereelResult<Clip> {
    if name == "None" {
        return Ok(clip);
    }
    let Some(effect) = Effect::from_name(name) else {
        debug!(name, "unknown effect name, leaving clip unmodified");
        return Ok(clip);
    };

    let duration = clip.duration();
    let out = match effect {
        Effect::ZoomIn => scale_about_center(clip, |t| 1.0 + 0.1 * t),
        Effect::ZoomOut => scale_about_center(clip, |t| 1.1 - 0.1 * t),
        Effect::PanLeftToRight => pan(clip, duration, -1.0, 0.0),
        Effect::PanRightToLeft => pan(clip, duration, 1.0, 0.0),
        Effect::PanTopToBottom => pan(clip, duration, 0.0, -1.0),
        Effect::PanBottomToTop => pan(clip, duration, 0.0, 1.0),
        Effect::BrightnessPulse => clip.map_frames(|mut frame, t| {
            let mult = 1.0 + 0.3 * (2.0 * std::f64::consts::PI * t).sin();
            canvas_ops::scale_rgb(&mut frame, mult);
            frame
        }),
        Effect::RotateClockwise => rotate_about_center(clip, 15.0),
        Effect::RotateCounterClockwise => rotate_about_center(clip, -15.0),
        Effect::Sepia => clip.map_frames(|mut frame, _t| {
            canvas_ops::sepia_in_place(&mut frame);
            frame
        }),
        Effect::Grayscale => clip.map_frames(|mut frame, _t| {
            canvas_ops::grayscale_in_place(&mut frame);
            frame
        }),
        Effect::Blur => clip.map_frames(|frame, _t| {
            canvas_ops::gaussian_blur(&frame, 2, 1.0).unwrap_or(frame)
        }),
        Effect::MirrorX => clip.map_frames(|frame, _t| canvas_ops::mirror_x(&frame)),
        Effect::MirrorY => clip.map_frames(|frame, _t| canvas_ops::mirror_y(&frame)),
        Effect::ColorBoost => clip.map_frames(|mut frame, _t| {
            canvas_ops::saturate_in_place(&mut frame, 1.4);
            frame
        }),
        Effect::Vignette => clip.map_frames(|mut frame, _t| {
            let mask = canvas_ops::radial_vignette_mask(frame.width, frame.height, 0.6);
            canvas_ops::darken_by_mask(&mut frame, &mask);
            frame
        }),
    };
    Ok(out)
}

fn scale_about_center(clip: Clip, scale_at: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Clip {
    clip.map_frames(move |frame, t| {
        let s = scale_at(t).max(0.01);
        if (s - 1.0).abs() < 1e-9 {
            return frame;
        }
        let (w, h) = (frame.width, frame.height);
        let cx = f64::from(w) / 2.0;
        let cy = f64::from(h) / 2.0;
        let affine =
            Affine::translate((cx, cy)) * Affine::scale(s) * Affine::translate((-cx, -cy));
        canvas_ops::affine_resample(&frame, affine, w, h)
    })
}

fn rotate_about_center(clip: Clip, degrees_per_sec: f64) -> Clip {
    clip.map_frames(move |frame, t| {
        let angle = (degrees_per_sec * t).to_radians();
        if angle.abs() < 1e-12 {
            return frame;
        }
        let (w, h) = (frame.width, frame.height);
        let cx = f64::from(w) / 2.0;
        let cy = f64::from(h) / 2.0;
        let affine =
            Affine::translate((cx, cy)) * Affine::rotate(angle) * Affine::translate((-cx, -cy));
        canvas_ops::affine_resample(&frame, affine, w, h)
    })
}

/// Constant-velocity crop-window scroll: the window crosses the full frame
/// extent over the clip duration. "Pan Left to Right" moves the window
/// rightward, so content shifts left (negative x), and so on.
fn pan(clip: Clip, duration: f64, dir_x: f64, dir_y: f64) -> Clip {
    clip.map_frames(move |frame, t| {
        let frac = if duration > 0.0 { t / duration } else { 0.0 };
        let off_x = dir_x * f64::from(frame.width) * frac;
        let off_y = dir_y * f64::from(frame.height) * frac;
        if off_x.abs() < 0.5 && off_y.abs() < 0.5 {
            return frame;
        }
        canvas_ops::affine_resample(
            &frame,
            Affine::translate((off_x, off_y)),
            frame.width,
            frame.height,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    fn gradient_clip(w: u32, h: u32, duration: f64) -> Clip {
        let mut frame = Frame::new(w, h);
        for y in 0..h {
            for x in 0..w {
                frame.put_pixel(x, y, [(x * 13 % 256) as u8, (y * 29 % 256) as u8, 77, 255]);
            }
        }
        Clip::from_frame(frame, duration)
    }

    #[test]
    fn every_name_roundtrips() {
        for e in Effect::all() {
            assert_eq!(Effect::from_name(e.name()), Some(*e));
        }
    }

    #[test]
    fn unknown_effect_is_pixel_identical() {
        let clip = gradient_clip(16, 16, 2.0);
        let before = clip.sample(1.0);
        let out = apply_effect(clip, "Totally Unknown").unwrap();
        assert_eq!(out.sample(1.0), before);
    }

    #[test]
    fn none_is_pixel_identical() {
        let clip = gradient_clip(16, 16, 2.0);
        let before = clip.sample(0.5);
        let out = apply_effect(clip, "None").unwrap();
        assert_eq!(out.sample(0.5), before);
    }

    #[test]
    fn zoom_in_is_identity_at_t0_and_magnifies_later() {
        let clip = gradient_clip(20, 20, 3.0);
        let base = clip.sample(0.0);
        let zoomed = apply_effect(clip, "Zoom In").unwrap();
        assert_eq!(zoomed.sample(0.0), base);
        // At t=2 the scale is 1.2; the frame differs but dims are unchanged.
        let late = zoomed.sample(2.0);
        assert_eq!((late.width, late.height), (20, 20));
        assert_ne!(late, base);
    }

    #[test]
    fn grayscale_equalizes_channels() {
        let clip = gradient_clip(8, 8, 1.0);
        let out = apply_effect(clip, "Grayscale").unwrap();
        let frame = out.sample(0.5);
        for y in 0..8 {
            for x in 0..8 {
                let [r, g, b, _] = frame.get_pixel(x, y);
                assert_eq!(r, g);
                assert_eq!(g, b);
            }
        }
    }

    #[test]
    fn brightness_pulse_is_identity_at_whole_seconds() {
        let clip = gradient_clip(8, 8, 2.0);
        let base = clip.sample(1.0);
        let out = apply_effect(clip, "Brightness Pulse").unwrap();
        // sin(2*pi*1.0) == 0, so the multiplier is exactly 1.
        assert_eq!(out.sample(1.0), base);
    }

    #[test]
    fn mirror_x_flips_content() {
        let clip = gradient_clip(8, 4, 1.0);
        let base = clip.sample(0.0);
        let out = apply_effect(clip, "Mirror X").unwrap();
        let flipped = out.sample(0.0);
        assert_eq!(flipped.get_pixel(0, 0), base.get_pixel(7, 0));
    }

    #[test]
    fn pan_moves_content_over_time() {
        let clip = gradient_clip(16, 8, 2.0);
        let base = clip.sample(0.0);
        let out = apply_effect(clip, "Pan Left to Right").unwrap();
        assert_eq!(out.sample(0.0), base);
        assert_ne!(out.sample(1.0), base);
    }
}
