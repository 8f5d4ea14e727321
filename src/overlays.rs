//! Decorative overlay passes.
//!
//! Overlays are applied after the effect and before the transitions, so that
//! fades and wipes cover the overlay too. Static overlays depend only on the
//! frame; animated overlays also depend on the sample time. Stochastic looks
//! (grain, dust) draw fresh randomness per frame, derived deterministically
//! from the overlay seed and `t` so sampling stays pure.
//!
//! Overlays are cosmetic and never render-blocking: the clip builder wraps
//! every overlay application in a degrade-to-identity guard, and font
//! resolution inside text overlays falls back to an unstyled renderer rather
//! than failing.

use std::f64::consts::PI;

use rand::{Rng as _, SeedableRng as _, rngs::SmallRng};
use tracing::debug;

use crate::{
    canvas_ops::{self, draw_ellipse, fill_rect, hsv_to_rgb},
    clip::Clip,
    error::SlidereelResult,
    frame::Frame,
    text,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    Watermark,
    TextCaption,
    Border,
    PhotoFrame,
    SepiaTone,
    BlackAndWhite,
    FilmNoir,
    Vintage,
    DustAndScratches,
    FilmGrain,
    AnimatedParticles,
    DynamicText,
    AnimatedGradient,
    AnimatedFrame,
}

impl Overlay {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Watermark" => Some(Self::Watermark),
            "Text Caption" => Some(Self::TextCaption),
            "Border" => Some(Self::Border),
            "Frame" => Some(Self::PhotoFrame),
            "Sepia Tone" => Some(Self::SepiaTone),
            "Black and White" => Some(Self::BlackAndWhite),
            "Film Noir" => Some(Self::FilmNoir),
            "Vintage" => Some(Self::Vintage),
            "Dust and Scratches" => Some(Self::DustAndScratches),
            "Film Grain" => Some(Self::FilmGrain),
            "Animated Particles" => Some(Self::AnimatedParticles),
            "Dynamic Text" => Some(Self::DynamicText),
            "Animated Gradient" => Some(Self::AnimatedGradient),
            "Animated Frame" => Some(Self::AnimatedFrame),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Watermark => "Watermark",
            Self::TextCaption => "Text Caption",
            Self::Border => "Border",
            Self::PhotoFrame => "Frame",
            Self::SepiaTone => "Sepia Tone",
            Self::BlackAndWhite => "Black and White",
            Self::FilmNoir => "Film Noir",
            Self::Vintage => "Vintage",
            Self::DustAndScratches => "Dust and Scratches",
            Self::FilmGrain => "Film Grain",
            Self::AnimatedParticles => "Animated Particles",
            Self::DynamicText => "Dynamic Text",
            Self::AnimatedGradient => "Animated Gradient",
            Self::AnimatedFrame => "Animated Frame",
        }
    }

    /// Every overlay name the interface exposes, in presentation order.
    pub fn all() -> &'static [Overlay] {
        &[
            Self::Watermark,
            Self::TextCaption,
            Self::Border,
            Self::PhotoFrame,
            Self::SepiaTone,
            Self::BlackAndWhite,
            Self::FilmNoir,
            Self::Vintage,
            Self::DustAndScratches,
            Self::FilmGrain,
            Self::AnimatedParticles,
            Self::DynamicText,
            Self::AnimatedGradient,
            Self::AnimatedFrame,
        ]
    }
}

/// Apply the named overlay. "None" and unknown names are identity; text
/// overlays without text degrade to identity (nothing to draw).
pub fn apply_overlay(
    clip: Clip,
    name: &str,
    overlay_text: Option<&str>,
    seed: Option<u64>,
) -> SlidereelResult<Clip> {
    if name == "None" {
        return Ok(clip);
    }
    let Some(overlay) = Overlay::from_name(name) else {
        debug!(name, "unknown overlay name, leaving clip unmodified");
        return Ok(clip);
    };

    let base_seed = seed.unwrap_or_else(rand::random);
    let height = clip.height();
    let duration = clip.duration();

    let out = match overlay {
        Overlay::Watermark => {
            let stamp = match overlay_text {
                Some(t) if !t.is_empty() => t.to_string(),
                _ => "slidereel".to_string(),
            };
            let layer = text::render_text(&stamp, size_for(height, 24), [255, 255, 255, 160]);
            let margin = i64::from(height / 36).max(8);
            clip.map_frames(move |mut frame, _t| {
                let x = i64::from(frame.width) - i64::from(layer.width) - margin;
                let y = i64::from(frame.height) - i64::from(layer.height) - margin;
                canvas_ops::blit_over(&mut frame, &layer, x, y);
                frame
            })
        }
        Overlay::TextCaption => {
            let Some(caption) = non_empty(overlay_text) else {
                debug!("Text Caption overlay without text, skipping");
                return Ok(clip);
            };
            let size = size_for(height, 18);
            let layer = text::render_text(&caption, size, [255, 255, 255, 255]);
            let pad = i64::from((size * 0.4) as u32).max(4);
            let margin = i64::from(height / 24).max(8);
            clip.map_frames(move |mut frame, _t| {
                let frame_w = frame.width;
                let band_h = (i64::from(layer.height) + 2 * pad) as u32;
                let band_y = i64::from(frame.height) - i64::from(band_h) - margin;
                fill_rect(&mut frame, 0, band_y, frame_w, band_h, [0, 0, 0, 120]);
                let x = (i64::from(frame_w) - i64::from(layer.width)) / 2;
                canvas_ops::blit_over(&mut frame, &layer, x, band_y + pad);
                frame
            })
        }
        Overlay::Border => {
            let width = border_width(height);
            clip.map_frames(move |mut frame, _t| {
                stroke_border(&mut frame, width, [255, 255, 255, 200]);
                frame
            })
        }
        Overlay::PhotoFrame => {
            let outer = border_width(height) * 2;
            let inner_line = (border_width(height) / 3).max(1);
            clip.map_frames(move |mut frame, _t| {
                stroke_border(&mut frame, outer, [20, 16, 12, 235]);
                stroke_border_inset(&mut frame, outer, inner_line, [230, 220, 200, 255]);
                frame
            })
        }
        Overlay::SepiaTone => clip.map_frames(|mut frame, _t| {
            canvas_ops::sepia_in_place(&mut frame);
            frame
        }),
        Overlay::BlackAndWhite => clip.map_frames(|mut frame, _t| {
            canvas_ops::grayscale_in_place(&mut frame);
            frame
        }),
        Overlay::FilmNoir => clip.map_frames(|mut frame, _t| {
            canvas_ops::grayscale_in_place(&mut frame);
            canvas_ops::contrast_in_place(&mut frame, 1.35);
            let mask = canvas_ops::radial_vignette_mask(frame.width, frame.height, 2.5);
            canvas_ops::darken_by_mask(&mut frame, &mask);
            frame
        }),
        Overlay::Vintage => clip.map_frames(move |mut frame, t| {
            canvas_ops::sepia_in_place(&mut frame);
            let mask = canvas_ops::radial_vignette_mask(frame.width, frame.height, 1.2);
            canvas_ops::darken_by_mask(&mut frame, &mask);
            add_luminance_grain(&mut frame, &mut frame_rng(base_seed, t), 10);
            frame
        }),
        Overlay::DustAndScratches => clip.map_frames(move |mut frame, t| {
            let mut rng = frame_rng(base_seed, t);
            draw_dust_and_scratches(&mut frame, &mut rng);
            frame
        }),
        Overlay::FilmGrain => clip.map_frames(move |mut frame, t| {
            add_luminance_grain(&mut frame, &mut frame_rng(base_seed, t), 16);
            frame
        }),
        Overlay::AnimatedParticles => {
            let particles = spawn_particles(base_seed, clip.width(), clip.height());
            clip.map_frames(move |mut frame, t| {
                let w = f64::from(frame.width);
                let h = f64::from(frame.height);
                for p in &particles {
                    // Linear drift, wrapping at the canvas edges.
                    let x = (p.x + p.vx * t).rem_euclid(w);
                    let y = (p.y + p.vy * t).rem_euclid(h);
                    draw_ellipse(&mut frame, x, y, p.radius, p.radius, [255, 255, 255, 130]);
                }
                frame
            })
        }
        Overlay::DynamicText => {
            let Some(message) = non_empty(overlay_text) else {
                debug!("Dynamic Text overlay without text, skipping");
                return Ok(clip);
            };
            let layer = text::render_text(&message, size_for(height, 14), [255, 255, 255, 255]);
            clip.map_frames(move |mut frame, t| {
                // Fixed fade-in/out envelope plus a sinusoidal bounce.
                let fade_in = (t / 0.5).clamp(0.0, 1.0);
                let fade_out = ((duration - t) / 0.5).clamp(0.0, 1.0);
                let opacity = fade_in.min(fade_out);
                if opacity <= 0.0 {
                    return frame;
                }
                let mut faded = layer.clone();
                for px in faded.data.chunks_exact_mut(4) {
                    px[3] = (f64::from(px[3]) * opacity).round() as u8;
                }
                let bounce = 10.0 * (2.0 * PI * 0.8 * t).sin();
                let x = (i64::from(frame.width) - i64::from(faded.width)) / 2;
                let y = (f64::from(frame.height) * 0.25 + bounce).round() as i64;
                canvas_ops::blit_over(&mut frame, &faded, x, y);
                frame
            })
        }
        Overlay::AnimatedGradient => clip.map_frames(|frame, t| {
            let layer = cycling_gradient_layer(frame.width, frame.height, t);
            canvas_ops::composite_overlay(&frame, &layer).unwrap_or(frame)
        }),
        Overlay::AnimatedFrame => {
            let base_width = f64::from(border_width(height));
            clip.map_frames(move |mut frame, t| {
                let pulse = 1.0 + 0.4 * (2.0 * PI * 0.5 * t).sin();
                let width = ((base_width * pulse).round() as u32).max(1);
                let [r, g, b] = hsv_to_rgb(t * 40.0, 0.8, 1.0);
                stroke_border(&mut frame, width, [r, g, b, 220]);
                frame
            })
        }
    };
    Ok(out)
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn size_for(height: u32, divisor: u32) -> f32 {
    (height as f32 / divisor as f32).max(8.0)
}

fn border_width(height: u32) -> u32 {
    (height / 72).max(4)
}

/// Per-frame RNG: deterministic in (seed, t) so clip sampling stays pure,
/// while every frame still gets its own speckle pattern.
fn frame_rng(base_seed: u64, t: f64) -> SmallRng {
    SmallRng::seed_from_u64(base_seed ^ t.to_bits().rotate_left(17))
}

fn stroke_border(frame: &mut Frame, width: u32, rgba: [u8; 4]) {
    let w = frame.width;
    let h = frame.height;
    fill_rect(frame, 0, 0, w, width, rgba);
    fill_rect(frame, 0, i64::from(h) - i64::from(width), w, width, rgba);
    fill_rect(frame, 0, i64::from(width), width, h.saturating_sub(2 * width), rgba);
    fill_rect(
        frame,
        i64::from(w) - i64::from(width),
        i64::from(width),
        width,
        h.saturating_sub(2 * width),
        rgba,
    );
}

fn stroke_border_inset(frame: &mut Frame, inset: u32, line: u32, rgba: [u8; 4]) {
    let w = frame.width.saturating_sub(2 * inset);
    let h = frame.height.saturating_sub(2 * inset);
    if w == 0 || h == 0 {
        return;
    }
    let x0 = i64::from(inset);
    let y0 = i64::from(inset);
    fill_rect(frame, x0, y0, w, line, rgba);
    fill_rect(frame, x0, y0 + i64::from(h) - i64::from(line), w, line, rgba);
    fill_rect(frame, x0, y0 + i64::from(line), line, h.saturating_sub(2 * line), rgba);
    fill_rect(
        frame,
        x0 + i64::from(w) - i64::from(line),
        y0 + i64::from(line),
        line,
        h.saturating_sub(2 * line),
        rgba,
    );
}

/// Same signed delta on all three channels reads as monochrome film grain.
fn add_luminance_grain(frame: &mut Frame, rng: &mut SmallRng, amplitude: i32) {
    for px in frame.data.chunks_exact_mut(4) {
        let delta = rng.gen_range(-amplitude..=amplitude);
        for c in 0..3 {
            px[c] = (i32::from(px[c]) + delta).clamp(0, 255) as u8;
        }
    }
}

fn draw_dust_and_scratches(frame: &mut Frame, rng: &mut SmallRng) {
    let w = frame.width;
    let h = frame.height;
    let speck_count = ((w as u64 * h as u64) / 30_000).clamp(20, 120) as u32;
    for _ in 0..speck_count {
        let x = rng.gen_range(0.0..f64::from(w));
        let y = rng.gen_range(0.0..f64::from(h));
        let r = rng.gen_range(0.6..2.2);
        let bright = rng.gen_bool(0.5);
        let color = if bright {
            [235, 230, 220, 190]
        } else {
            [25, 22, 18, 170]
        };
        draw_ellipse(frame, x, y, r, r, color);
    }
    let scratch_count = rng.gen_range(2..=4);
    for _ in 0..scratch_count {
        let x = rng.gen_range(0..w);
        fill_rect(frame, i64::from(x), 0, 1, h, [240, 238, 230, 90]);
    }
}

/// Vertical gradient layer between two colors cycling via phase-shifted
/// sinusoids; composited over the frame with its own translucency.
fn cycling_gradient_layer(width: u32, height: u32, t: f64) -> Frame {
    let top = cycling_color(t, 0.0);
    let bottom = cycling_color(t, PI);
    let mut layer = Frame::new(width, height);
    for y in 0..height {
        let frac = f64::from(y) / f64::from(height.max(1));
        let mut rgba = [0u8; 4];
        for c in 0..3 {
            rgba[c] =
                (f64::from(top[c]) * (1.0 - frac) + f64::from(bottom[c]) * frac).round() as u8;
        }
        rgba[3] = 70;
        for x in 0..width {
            layer.put_pixel(x, y, rgba);
        }
    }
    layer
}

fn cycling_color(t: f64, phase: f64) -> [u8; 3] {
    let mut out = [0u8; 3];
    for (c, chan) in out.iter_mut().enumerate() {
        let channel_phase = phase + (c as f64) * 2.0 * PI / 3.0;
        let v = 127.5 + 127.5 * (2.0 * PI * 0.1 * t + channel_phase).sin();
        *chan = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[derive(Clone, Copy, Debug)]
struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    radius: f64,
}

fn spawn_particles(seed: u64, width: u32, height: u32) -> Vec<Particle> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let count = ((width as u64 * height as u64) / 50_000).clamp(12, 64) as usize;
    (0..count)
        .map(|_| Particle {
            x: rng.gen_range(0.0..f64::from(width.max(1))),
            y: rng.gen_range(0.0..f64::from(height.max(1))),
            vx: rng.gen_range(-40.0..40.0),
            vy: rng.gen_range(-25.0..25.0),
            radius: rng.gen_range(1.5..4.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_clip(w: u32, h: u32) -> Clip {
        Clip::from_frame(Frame::solid(w, h, [60, 60, 60, 255]), 3.0)
    }

    #[test]
    fn every_name_roundtrips() {
        for o in Overlay::all() {
            assert_eq!(Overlay::from_name(o.name()), Some(*o));
        }
        assert!(Overlay::from_name("Sparkles").is_none());
    }

    #[test]
    fn unknown_overlay_is_pixel_identical() {
        let clip = flat_clip(32, 32);
        let before = clip.sample(1.0);
        let out = apply_overlay(clip, "Sparkles", None, Some(1)).unwrap();
        assert_eq!(out.sample(1.0), before);
    }

    #[test]
    fn watermark_marks_bottom_right_quadrant() {
        let clip = flat_clip(128, 96);
        let out = apply_overlay(clip, "Watermark", Some("Test"), Some(1)).unwrap();
        let frame = out.sample(1.0);
        let mut touched = false;
        for y in 48..96 {
            for x in 64..128 {
                if frame.get_pixel(x, y) != [60, 60, 60, 255] {
                    touched = true;
                }
            }
        }
        assert!(touched, "watermark should alter the bottom-right quadrant");
    }

    #[test]
    fn caption_without_text_is_identity() {
        let clip = flat_clip(64, 48);
        let before = clip.sample(0.5);
        let out = apply_overlay(clip, "Text Caption", None, Some(1)).unwrap();
        assert_eq!(out.sample(0.5), before);
        let out = apply_overlay(flat_clip(64, 48), "Text Caption", Some("   "), Some(1)).unwrap();
        assert_eq!(out.sample(0.5), before);
    }

    #[test]
    fn border_paints_edges_not_center() {
        let clip = flat_clip(64, 64);
        let out = apply_overlay(clip, "Border", None, Some(1)).unwrap();
        let frame = out.sample(0.0);
        assert_ne!(frame.get_pixel(0, 0), [60, 60, 60, 255]);
        assert_eq!(frame.get_pixel(32, 32), [60, 60, 60, 255]);
    }

    #[test]
    fn black_and_white_equalizes_channels() {
        let mut base = Frame::solid(8, 8, [200, 90, 30, 255]);
        base.put_pixel(0, 0, [10, 240, 60, 255]);
        let clip = Clip::from_frame(base, 1.0);
        let out = apply_overlay(clip, "Black and White", None, Some(1)).unwrap();
        let frame = out.sample(0.0);
        for y in 0..8 {
            for x in 0..8 {
                let [r, g, b, _] = frame.get_pixel(x, y);
                assert_eq!(r, g);
                assert_eq!(g, b);
            }
        }
    }

    #[test]
    fn film_grain_is_deterministic_per_time_with_seed() {
        let out = apply_overlay(flat_clip(24, 24), "Film Grain", None, Some(42)).unwrap();
        assert_eq!(out.sample(0.5), out.sample(0.5));
        assert_ne!(out.sample(0.5), out.sample(0.6));
    }

    #[test]
    fn particles_move_between_frames() {
        let out =
            apply_overlay(flat_clip(120, 90), "Animated Particles", None, Some(7)).unwrap();
        assert_ne!(out.sample(0.0), out.sample(1.0));
    }

    #[test]
    fn dynamic_text_fades_in_and_out() {
        let out = apply_overlay(flat_clip(96, 64), "Dynamic Text", Some("Hi"), Some(3)).unwrap();
        let start = out.sample(0.0);
        let mid = out.sample(1.5);
        // At t=0 the envelope is zero: the frame is untouched.
        assert_eq!(start, Frame::solid(96, 64, [60, 60, 60, 255]));
        assert_ne!(mid, start);
    }

    #[test]
    fn animated_frame_border_pulses() {
        let out = apply_overlay(flat_clip(64, 64), "Animated Frame", None, Some(1)).unwrap();
        let a = out.sample(0.0);
        let b = out.sample(0.5);
        assert_ne!(a, b);
        // Center stays clean at all times.
        assert_eq!(a.get_pixel(32, 32), [60, 60, 60, 255]);
        assert_eq!(b.get_pixel(32, 32), [60, 60, 60, 255]);
    }

    #[test]
    fn animated_gradient_tints_and_cycles() {
        let out = apply_overlay(flat_clip(32, 32), "Animated Gradient", None, Some(1)).unwrap();
        let a = out.sample(0.0);
        let b = out.sample(2.0);
        assert_ne!(a, Frame::solid(32, 32, [60, 60, 60, 255]));
        assert_ne!(a, b);
        // Compositing keeps the frame opaque.
        assert_eq!(a.get_pixel(16, 16)[3], 255);
    }

    #[test]
    fn vintage_darkens_corners() {
        let out = apply_overlay(flat_clip(64, 64), "Vintage", None, Some(1)).unwrap();
        let frame = out.sample(0.0);
        let corner = frame.get_pixel(0, 0);
        let center = frame.get_pixel(32, 32);
        let corner_sum: u32 = corner[..3].iter().map(|&v| u32::from(v)).sum();
        let center_sum: u32 = center[..3].iter().map(|&v| u32::from(v)).sum();
        assert!(corner_sum < center_sum);
    }
}
