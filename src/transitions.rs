//! Edge-windowed transitions.
//!
//! A transition acts only inside a leading or trailing time window of a
//! clip's own duration; outside the window the clip renders unmodified.
//! Progress is expressed as a visibility value `v` in [0, 1]: on the start
//! edge `v = clamp01(t / window)`, on the end edge
//! `v = clamp01((duration - t) / window)`, so `v == 1` always means "fully
//! present". Unknown names and "None" are no-ops.

use kurbo::Affine;
use tracing::debug;

use crate::{
    canvas_ops::{self, Axis, MaskDirection},
    clip::Clip,
    error::SlidereelResult,
};

/// Which end of the clip the transition window is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Fade,
    Slide { dx: f64, dy: f64 },
    Wipe { axis: Axis, dir: MaskDirection },
    Rotate,
    Scale,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    edge: Edge,
    motion: Motion,
}

impl Transition {
    pub fn from_name(name: &str) -> Option<Self> {
        let (edge, motion) = match name {
            "Fade In" => (Edge::Start, Motion::Fade),
            "Fade Out" => (Edge::End, Motion::Fade),
            "Slide In Left" => (Edge::Start, Motion::Slide { dx: -1.0, dy: 0.0 }),
            "Slide In Right" => (Edge::Start, Motion::Slide { dx: 1.0, dy: 0.0 }),
            "Slide In Top" => (Edge::Start, Motion::Slide { dx: 0.0, dy: -1.0 }),
            "Slide In Bottom" => (Edge::Start, Motion::Slide { dx: 0.0, dy: 1.0 }),
            "Slide Out Left" => (Edge::End, Motion::Slide { dx: -1.0, dy: 0.0 }),
            "Slide Out Right" => (Edge::End, Motion::Slide { dx: 1.0, dy: 0.0 }),
            "Slide Out Top" => (Edge::End, Motion::Slide { dx: 0.0, dy: -1.0 }),
            "Slide Out Bottom" => (Edge::End, Motion::Slide { dx: 0.0, dy: 1.0 }),
            "Wipe In Left" => (
                Edge::Start,
                Motion::Wipe {
                    axis: Axis::X,
                    dir: MaskDirection::Forward,
                },
            ),
            "Wipe In Right" => (
                Edge::Start,
                Motion::Wipe {
                    axis: Axis::X,
                    dir: MaskDirection::Backward,
                },
            ),
            "Wipe In Top" => (
                Edge::Start,
                Motion::Wipe {
                    axis: Axis::Y,
                    dir: MaskDirection::Forward,
                },
            ),
            "Wipe In Bottom" => (
                Edge::Start,
                Motion::Wipe {
                    axis: Axis::Y,
                    dir: MaskDirection::Backward,
                },
            ),
            "Wipe Out Left" => (
                Edge::End,
                Motion::Wipe {
                    axis: Axis::X,
                    dir: MaskDirection::Backward,
                },
            ),
            "Wipe Out Right" => (
                Edge::End,
                Motion::Wipe {
                    axis: Axis::X,
                    dir: MaskDirection::Forward,
                },
            ),
            "Wipe Out Top" => (
                Edge::End,
                Motion::Wipe {
                    axis: Axis::Y,
                    dir: MaskDirection::Backward,
                },
            ),
            "Wipe Out Bottom" => (
                Edge::End,
                Motion::Wipe {
                    axis: Axis::Y,
                    dir: MaskDirection::Forward,
                },
            ),
            "Rotate In" => (Edge::Start, Motion::Rotate),
            "Rotate Out" => (Edge::End, Motion::Rotate),
            "Expand In" => (Edge::Start, Motion::Scale),
            "Shrink Out" => (Edge::End, Motion::Scale),
            _ => return None,
        };
        Some(Self { edge, motion })
    }

    pub fn edge(self) -> Edge {
        self.edge
    }

    /// Start-edge transition names the interface exposes, in order.
    pub fn start_names() -> &'static [&'static str] {
        &[
            "Fade In",
            "Slide In Left",
            "Slide In Right",
            "Slide In Top",
            "Slide In Bottom",
            "Wipe In Left",
            "Wipe In Right",
            "Wipe In Top",
            "Wipe In Bottom",
            "Rotate In",
            "Expand In",
        ]
    }

    /// End-edge transition names the interface exposes, in order.
    pub fn end_names() -> &'static [&'static str] {
        &[
            "Fade Out",
            "Slide Out Left",
            "Slide Out Right",
            "Slide Out Top",
            "Slide Out Bottom",
            "Wipe Out Left",
            "Wipe Out Right",
            "Wipe Out Top",
            "Wipe Out Bottom",
            "Rotate Out",
            "Shrink Out",
        ]
    }
}

/// Apply the named transition within a `window`-second span anchored at
/// `edge`. The caller clamps `window` to the clip duration; a zero window is
/// identity. Unknown names, "None", and names belonging to the opposite edge
/// are identity.
pub fn apply_transition(clip: Clip, name: &str, window: f64, edge: Edge) -> SlidereelResult<Clip> {
    if name == "None" || window <= f64::EPSILON {
        return Ok(clip);
    }
    let Some(transition) = Transition::from_name(name) else {
        debug!(name, "unknown transition name, leaving clip unmodified");
        return Ok(clip);
    };
    if transition.edge != edge {
        debug!(name, ?edge, "transition name belongs to the other edge, skipping");
        return Ok(clip);
    }

    let duration = clip.duration();
    let motion = transition.motion;

    Ok(clip.map_frames(move |frame, t| {
        let v = visibility(t, duration, window, edge);
        if v >= 1.0 {
            return frame;
        }
        match motion {
            Motion::Fade => {
                let mut frame = frame;
                canvas_ops::scale_rgb(&mut frame, v);
                frame
            }
            Motion::Slide { dx, dy } => {
                let off_x = dx * (1.0 - v) * f64::from(frame.width);
                let off_y = dy * (1.0 - v) * f64::from(frame.height);
                canvas_ops::affine_resample(
                    &frame,
                    Affine::translate((off_x, off_y)),
                    frame.width,
                    frame.height,
                )
            }
            Motion::Wipe { axis, dir } => {
                let mask =
                    canvas_ops::time_mask(v, 0.0, 1.0, frame.width, frame.height, axis, dir);
                let mut frame = frame;
                canvas_ops::mask_to_black(&mut frame, &mask);
                frame
            }
            Motion::Rotate => {
                // 360 * (1 - v) degrees: a full turn settling as the clip
                // becomes fully present.
                let angle = (360.0 * (1.0 - v)).to_radians();
                let cx = f64::from(frame.width) / 2.0;
                let cy = f64::from(frame.height) / 2.0;
                let affine = Affine::translate((cx, cy))
                    * Affine::rotate(angle)
                    * Affine::translate((-cx, -cy));
                canvas_ops::affine_resample(&frame, affine, frame.width, frame.height)
            }
            Motion::Scale => {
                // Floor of 0.01 avoids a degenerate zero-size resample.
                let s = v.max(0.01);
                let cx = f64::from(frame.width) / 2.0;
                let cy = f64::from(frame.height) / 2.0;
                let affine = Affine::translate((cx, cy))
                    * Affine::scale(s)
                    * Affine::translate((-cx, -cy));
                canvas_ops::affine_resample(&frame, affine, frame.width, frame.height)
            }
        }
    }))
}

fn visibility(t: f64, duration: f64, window: f64, edge: Edge) -> f64 {
    if window <= f64::EPSILON {
        return 1.0;
    }
    match edge {
        Edge::Start => (t / window).clamp(0.0, 1.0),
        Edge::End => ((duration - t) / window).clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    fn white_clip(duration: f64) -> Clip {
        Clip::from_frame(Frame::solid(10, 10, [255, 255, 255, 255]), duration)
    }

    #[test]
    fn all_exposed_names_parse_to_their_edge() {
        for name in Transition::start_names() {
            assert_eq!(Transition::from_name(name).unwrap().edge(), Edge::Start);
        }
        for name in Transition::end_names() {
            assert_eq!(Transition::from_name(name).unwrap().edge(), Edge::End);
        }
        assert!(Transition::from_name("Dissolve Sideways").is_none());
    }

    #[test]
    fn unknown_transition_is_pixel_identical() {
        let clip = white_clip(3.0);
        let before = clip.sample(0.0);
        let out = apply_transition(clip, "Dissolve Sideways", 1.0, Edge::Start).unwrap();
        assert_eq!(out.sample(0.0), before);
    }

    #[test]
    fn fade_in_opacity_ramp() {
        let out = apply_transition(white_clip(3.0), "Fade In", 1.0, Edge::Start).unwrap();
        assert_eq!(out.sample(0.0).get_pixel(5, 5), [0, 0, 0, 255]);
        let mid = out.sample(0.5).get_pixel(5, 5);
        assert!((i32::from(mid[0]) - 128).abs() <= 1);
        assert_eq!(out.sample(1.5).get_pixel(5, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn fade_out_is_dark_at_clip_end() {
        let out = apply_transition(white_clip(3.0), "Fade Out", 1.0, Edge::End).unwrap();
        assert_eq!(out.sample(1.5).get_pixel(5, 5), [255, 255, 255, 255]);
        let near_end = out.sample(2.999).get_pixel(5, 5);
        assert!(near_end[0] < 4);
    }

    #[test]
    fn visibility_clamps_with_oversized_window() {
        // Window longer than the clip: the caller clamps to the duration, and
        // even unclamped inputs never produce negative or inverted progress.
        let v0 = visibility(0.0, 2.0, 2.0, Edge::Start);
        let v_end = visibility(2.0, 2.0, 2.0, Edge::Start);
        assert_eq!(v0, 0.0);
        assert_eq!(v_end, 1.0);
        for t in [0.0, 0.5, 1.0, 1.5, 2.0] {
            let v = visibility(t, 2.0, 5.0, Edge::End);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn name_from_opposite_edge_is_identity() {
        let clip = white_clip(2.0);
        let before = clip.sample(0.0);
        let out = apply_transition(clip, "Fade Out", 1.0, Edge::Start).unwrap();
        assert_eq!(out.sample(0.0), before);
    }

    #[test]
    fn zero_window_is_identity() {
        let clip = white_clip(2.0);
        let before = clip.sample(0.0);
        let out = apply_transition(clip, "Fade In", 0.0, Edge::Start).unwrap();
        assert_eq!(out.sample(0.0), before);
    }

    #[test]
    fn slide_in_left_reveals_from_left() {
        let out = apply_transition(white_clip(2.0), "Slide In Left", 1.0, Edge::Start).unwrap();
        let half = out.sample(0.5);
        // Frame is shifted half a width leftward: right half black, left half content.
        assert_eq!(half.get_pixel(1, 5), [255, 255, 255, 255]);
        assert_eq!(half.get_pixel(9, 5), [0, 0, 0, 255]);
    }

    #[test]
    fn wipe_in_left_grows_opaque_region() {
        let out = apply_transition(white_clip(2.0), "Wipe In Left", 1.0, Edge::Start).unwrap();
        let half = out.sample(0.5);
        assert_eq!(half.get_pixel(0, 5), [255, 255, 255, 255]);
        assert_eq!(half.get_pixel(9, 5), [0, 0, 0, 255]);
        let done = out.sample(1.5);
        assert_eq!(done.get_pixel(9, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn shrink_out_scale_floor_prevents_degenerate_frames() {
        let out = apply_transition(white_clip(2.0), "Shrink Out", 1.0, Edge::End).unwrap();
        let end = out.sample(1.999);
        assert_eq!((end.width, end.height), (10, 10));
        // Nearly everything has shrunk away to the black background.
        assert_eq!(end.get_pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn rotate_in_settles_to_identity_after_window() {
        let clip = white_clip(3.0);
        let base = clip.sample(2.0);
        let out = apply_transition(clip, "Rotate In", 1.0, Edge::Start).unwrap();
        assert_eq!(out.sample(2.0), base);
    }
}
