//! Pure per-frame raster operations.
//!
//! Everything in this module is a deterministic function of its inputs; the
//! effect, transition, and overlay libraries are built out of these
//! primitives. [`letterbox`] is the single place where frame dimensions are
//! forced to the render canvas: every clip fed to concatenation has passed
//! through it.

use kurbo::{Affine, Point};

use crate::{
    error::{SlidereelError, SlidereelResult},
    frame::Frame,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskDirection {
    /// Opaque region grows from the low-coordinate edge (left/top).
    Forward,
    /// Opaque region grows from the high-coordinate edge (right/bottom).
    Backward,
}

/// Scale-preserving resize onto a black canvas of exactly `target_w x target_h`.
pub fn letterbox(src: &Frame, target_w: u32, target_h: u32) -> SlidereelResult<Frame> {
    if target_w == 0 || target_h == 0 {
        return Err(SlidereelError::validation(
            "letterbox target dimensions must be non-zero",
        ));
    }
    if src.width == 0 || src.height == 0 {
        return Err(SlidereelError::validation(
            "letterbox source dimensions must be non-zero",
        ));
    }

    let scale = (f64::from(target_w) / f64::from(src.width))
        .min(f64::from(target_h) / f64::from(src.height));
    let new_w = ((f64::from(src.width) * scale).round() as u32)
        .clamp(1, target_w);
    let new_h = ((f64::from(src.height) * scale).round() as u32)
        .clamp(1, target_h);

    let resized = resize_bilinear(src, new_w, new_h);
    let mut canvas = Frame::black(target_w, target_h);
    let x0 = (target_w - new_w) / 2;
    let y0 = (target_h - new_h) / 2;
    blit_over(&mut canvas, &resized, i64::from(x0), i64::from(y0));
    Ok(canvas)
}

/// Bilinear resize to exactly `new_w x new_h`.
pub fn resize_bilinear(src: &Frame, new_w: u32, new_h: u32) -> Frame {
    let mut dst = Frame::new(new_w.max(1), new_h.max(1));
    let sx_ratio = f64::from(src.width) / f64::from(dst.width);
    let sy_ratio = f64::from(src.height) / f64::from(dst.height);
    for y in 0..dst.height {
        for x in 0..dst.width {
            let fx = (f64::from(x) + 0.5) * sx_ratio - 0.5;
            let fy = (f64::from(y) + 0.5) * sy_ratio - 0.5;
            dst.put_pixel(x, y, sample_bilinear_clamped(src, fx, fy));
        }
    }
    dst
}

/// Resample `src` through `affine` (source-to-destination map), producing an
/// `out_w x out_h` frame. Pixels mapping outside the source are opaque black,
/// consistent with the letterbox background.
pub fn affine_resample(src: &Frame, affine: Affine, out_w: u32, out_h: u32) -> Frame {
    let inv = affine.inverse();
    let mut dst = Frame::new(out_w, out_h);
    let w = f64::from(src.width);
    let h = f64::from(src.height);
    for y in 0..out_h {
        for x in 0..out_w {
            let p = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let fx = p.x - 0.5;
            let fy = p.y - 0.5;
            let px = if fx < -0.5 || fy < -0.5 || fx > w - 0.5 || fy > h - 0.5 {
                [0, 0, 0, 255]
            } else {
                sample_bilinear_clamped(src, fx, fy)
            };
            dst.put_pixel(x, y, px);
        }
    }
    dst
}

fn sample_bilinear_clamped(src: &Frame, fx: f64, fy: f64) -> [u8; 4] {
    let max_x = (src.width - 1) as i64;
    let max_y = (src.height - 1) as i64;
    let x0 = fx.floor() as i64;
    let y0 = fy.floor() as i64;
    let tx = (fx - x0 as f64).clamp(0.0, 1.0);
    let ty = (fy - y0 as f64).clamp(0.0, 1.0);

    let cx0 = x0.clamp(0, max_x) as u32;
    let cx1 = (x0 + 1).clamp(0, max_x) as u32;
    let cy0 = y0.clamp(0, max_y) as u32;
    let cy1 = (y0 + 1).clamp(0, max_y) as u32;

    let p00 = src.get_pixel(cx0, cy0);
    let p10 = src.get_pixel(cx1, cy0);
    let p01 = src.get_pixel(cx0, cy1);
    let p11 = src.get_pixel(cx1, cy1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = f64::from(p00[c]) * (1.0 - tx) + f64::from(p10[c]) * tx;
        let bot = f64::from(p01[c]) * (1.0 - tx) + f64::from(p11[c]) * tx;
        out[c] = (top * (1.0 - ty) + bot * ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Straight-alpha "overlay over frame" compositing, same dimensions required.
/// The overlay's own alpha determines visibility; the frame is returned as a
/// new buffer and stays opaque.
pub fn composite_overlay(frame: &Frame, overlay: &Frame) -> SlidereelResult<Frame> {
    if !frame.same_dimensions(overlay) {
        return Err(SlidereelError::validation(format!(
            "composite_overlay size mismatch: frame {}x{}, overlay {}x{}",
            frame.width, frame.height, overlay.width, overlay.height
        )));
    }
    let mut out = frame.clone();
    composite_over_in_place(&mut out, overlay);
    Ok(out)
}

fn composite_over_in_place(dst: &mut Frame, src: &Frame) {
    for (d, s) in dst
        .data
        .chunks_exact_mut(4)
        .zip(src.data.chunks_exact(4))
    {
        let blended = over_straight([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&blended);
    }
}

/// Composite `src` over `dst` at offset `(x, y)`, clipping to bounds.
pub fn blit_over(dst: &mut Frame, src: &Frame, x: i64, y: i64) {
    for sy in 0..src.height {
        let dy = y + i64::from(sy);
        if dy < 0 || dy >= i64::from(dst.height) {
            continue;
        }
        for sx in 0..src.width {
            let dx = x + i64::from(sx);
            if dx < 0 || dx >= i64::from(dst.width) {
                continue;
            }
            let s = src.get_pixel(sx, sy);
            if s[3] == 0 {
                continue;
            }
            let d = dst.get_pixel(dx as u32, dy as u32);
            dst.put_pixel(dx as u32, dy as u32, over_straight(d, s));
        }
    }
}

/// Straight-alpha source-over blend for one pixel.
fn over_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // out alpha scaled by 255 to keep the math integral.
    let out_a255 = sa * 255 + da * inv;
    if out_a255 == 0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let sc = u32::from(src[c]);
        let dc = u32::from(dst[c]);
        out[c] = ((sc * sa * 255 + dc * da * inv + out_a255 / 2) / out_a255).min(255) as u8;
    }
    out[3] = ((out_a255 + 127) / 255).min(255) as u8;
    out
}

/// Single-channel radial mask: 255 at the center decaying to 0 at half the
/// shorter dimension. `falloff` > 1 sharpens, < 1 softens.
pub fn radial_vignette_mask(width: u32, height: u32, falloff: f64) -> Vec<u8> {
    let cx = f64::from(width) / 2.0;
    let cy = f64::from(height) / 2.0;
    let max_r = (f64::from(width.min(height)) / 2.0).max(1.0);
    let mut mask = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            let r = (dx * dx + dy * dy).sqrt() / max_r;
            let v = (1.0 - r.min(1.0)).powf(falloff.max(0.0));
            mask.push((v * 255.0).round().clamp(0.0, 255.0) as u8);
        }
    }
    mask
}

/// Multiply RGB by `mask / 255` per pixel (alpha untouched).
pub fn darken_by_mask(frame: &mut Frame, mask: &[u8]) {
    debug_assert_eq!(mask.len(), (frame.width as usize) * (frame.height as usize));
    for (px, &m) in frame.data.chunks_exact_mut(4).zip(mask.iter()) {
        for c in 0..3 {
            px[c] = mul_div255(u16::from(px[c]), u16::from(m));
        }
    }
}

/// Binary spatial mask whose opaque region grows linearly with
/// `(t - window_start) / (window_end - window_start)` along one axis.
///
/// All wipe transitions are expressed through this one function.
pub fn time_mask(
    t: f64,
    window_start: f64,
    window_end: f64,
    width: u32,
    height: u32,
    axis: Axis,
    direction: MaskDirection,
) -> Vec<u8> {
    let span = window_end - window_start;
    let frac = if span <= f64::EPSILON {
        1.0
    } else {
        ((t - window_start) / span).clamp(0.0, 1.0)
    };

    let extent = match axis {
        Axis::X => f64::from(width),
        Axis::Y => f64::from(height),
    };
    let threshold = frac * extent;

    let mut mask = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            let coord = match axis {
                Axis::X => f64::from(x),
                Axis::Y => f64::from(y),
            };
            let opaque = match direction {
                MaskDirection::Forward => coord < threshold,
                MaskDirection::Backward => coord >= extent - threshold,
            };
            mask.push(if opaque { 255 } else { 0 });
        }
    }
    mask
}

/// Replace pixels with opaque black where the mask is zero.
pub fn mask_to_black(frame: &mut Frame, mask: &[u8]) {
    debug_assert_eq!(mask.len(), (frame.width as usize) * (frame.height as usize));
    for (px, &m) in frame.data.chunks_exact_mut(4).zip(mask.iter()) {
        if m == 0 {
            px.copy_from_slice(&[0, 0, 0, 255]);
        }
    }
}

/// Multiply RGB by a scalar factor, clamping to 255 (alpha untouched).
pub fn scale_rgb(frame: &mut Frame, factor: f64) {
    let f = factor.max(0.0);
    for px in frame.data.chunks_exact_mut(4) {
        for c in 0..3 {
            px[c] = (f64::from(px[c]) * f).round().clamp(0.0, 255.0) as u8;
        }
    }
}

pub fn grayscale_in_place(frame: &mut Frame) {
    for px in frame.data.chunks_exact_mut(4) {
        let l = luma(px[0], px[1], px[2]);
        px[0] = l;
        px[1] = l;
        px[2] = l;
    }
}

pub fn sepia_in_place(frame: &mut Frame) {
    for px in frame.data.chunks_exact_mut(4) {
        let r = f64::from(px[0]);
        let g = f64::from(px[1]);
        let b = f64::from(px[2]);
        px[0] = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0) as u8;
        px[1] = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0) as u8;
        px[2] = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0) as u8;
    }
}

/// Saturation scale around per-pixel luma; factor 1.0 is identity.
pub fn saturate_in_place(frame: &mut Frame, factor: f64) {
    for px in frame.data.chunks_exact_mut(4) {
        let l = f64::from(luma(px[0], px[1], px[2]));
        for c in 0..3 {
            let v = l + (f64::from(px[c]) - l) * factor;
            px[c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Contrast scale around mid-gray; factor 1.0 is identity.
pub fn contrast_in_place(frame: &mut Frame, factor: f64) {
    for px in frame.data.chunks_exact_mut(4) {
        for c in 0..3 {
            let v = (f64::from(px[c]) - 128.0) * factor + 128.0;
            px[c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
}

pub fn mirror_x(frame: &Frame) -> Frame {
    let mut out = Frame::new(frame.width, frame.height);
    for y in 0..frame.height {
        for x in 0..frame.width {
            out.put_pixel(x, y, frame.get_pixel(frame.width - 1 - x, y));
        }
    }
    out
}

pub fn mirror_y(frame: &Frame) -> Frame {
    let mut out = Frame::new(frame.width, frame.height);
    for y in 0..frame.height {
        for x in 0..frame.width {
            out.put_pixel(x, y, frame.get_pixel(x, frame.height - 1 - y));
        }
    }
    out
}

/// Separable gaussian blur with a Q16 fixed-point kernel.
pub fn gaussian_blur(frame: &Frame, radius: u32, sigma: f64) -> SlidereelResult<Frame> {
    if radius == 0 {
        return Ok(frame.clone());
    }
    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let len = frame.data.len();
    let mut tmp = vec![0u8; len];
    let mut out = vec![0u8; len];
    blur_pass(&frame.data, &mut tmp, frame.width, frame.height, &kernel, Axis::X);
    blur_pass(&tmp, &mut out, frame.width, frame.height, &kernel, Axis::Y);
    Frame::from_rgba8(frame.width, frame.height, out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f64) -> SlidereelResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(SlidereelError::validation("blur sigma must be > 0"));
    }
    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Keep the kernel normalized after rounding so flat regions stay flat.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x + d).clamp(0, w - 1), y),
                    Axis::Y => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = (((acc[c] + 32768) >> 16).min(255)) as u8;
            }
        }
    }
}

/// Alpha-blend a filled rectangle onto the frame, clipped to bounds.
pub fn fill_rect(frame: &mut Frame, x: i64, y: i64, w: u32, h: u32, rgba: [u8; 4]) {
    for dy in 0..i64::from(h) {
        let py = y + dy;
        if py < 0 || py >= i64::from(frame.height) {
            continue;
        }
        for dx in 0..i64::from(w) {
            let px = x + dx;
            if px < 0 || px >= i64::from(frame.width) {
                continue;
            }
            let d = frame.get_pixel(px as u32, py as u32);
            frame.put_pixel(px as u32, py as u32, over_straight(d, rgba));
        }
    }
}

/// Alpha-blend a filled ellipse centered at `(cx, cy)` onto the frame.
pub fn draw_ellipse(frame: &mut Frame, cx: f64, cy: f64, rx: f64, ry: f64, rgba: [u8; 4]) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let x_min = ((cx - rx).floor().max(0.0)) as u32;
    let x_max = ((cx + rx).ceil().min(f64::from(frame.width) - 1.0)).max(0.0) as u32;
    let y_min = ((cy - ry).floor().max(0.0)) as u32;
    let y_max = ((cy + ry).ceil().min(f64::from(frame.height) - 1.0)).max(0.0) as u32;
    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let dx = (f64::from(x) + 0.5 - cx) / rx;
            let dy = (f64::from(y) + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                let d = frame.get_pixel(x, y);
                frame.put_pixel(x, y, over_straight(d, rgba));
            }
        }
    }
}

/// Piecewise-linear HSV to RGB. `h` in degrees (wrapped), `s`/`v` in [0,1].
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h {
        _ if h < 60.0 => (c, x, 0.0),
        _ if h < 120.0 => (x, c, 0.0),
        _ if h < 180.0 => (0.0, c, x),
        _ if h < 240.0 => (0.0, x, c),
        _ if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b))
        .round()
        .clamp(0.0, 255.0) as u8
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(w: u32, h: u32) -> Frame {
        let mut f = Frame::new(w, h);
        for y in 0..h {
            for x in 0..w {
                f.put_pixel(x, y, [(x * 7 % 256) as u8, (y * 11 % 256) as u8, 128, 255]);
            }
        }
        f
    }

    #[test]
    fn letterbox_output_is_exactly_target_size() {
        for (sw, sh) in [(400, 300), (300, 400), (256, 256), (1920, 1080)] {
            let src = gradient_frame(sw, sh);
            let out = letterbox(&src, 640, 360).unwrap();
            assert_eq!((out.width, out.height), (640, 360));
        }
    }

    #[test]
    fn letterbox_matching_aspect_has_no_bars() {
        let src = Frame::solid(320, 180, [200, 10, 10, 255]);
        let out = letterbox(&src, 640, 360).unwrap();
        assert_eq!(out.get_pixel(0, 0), [200, 10, 10, 255]);
        assert_eq!(out.get_pixel(639, 359), [200, 10, 10, 255]);
    }

    #[test]
    fn letterbox_portrait_into_landscape_bars_on_x_only() {
        let src = Frame::solid(100, 200, [0, 200, 0, 255]);
        let out = letterbox(&src, 400, 200).unwrap();
        // Side bars are black, top/bottom center rows are content.
        assert_eq!(out.get_pixel(0, 100), [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(399, 100), [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(200, 0), [0, 200, 0, 255]);
        assert_eq!(out.get_pixel(200, 199), [0, 200, 0, 255]);
    }

    #[test]
    fn composite_overlay_respects_overlay_alpha() {
        let base = Frame::solid(2, 1, [0, 0, 0, 255]);
        let mut overlay = Frame::new(2, 1);
        overlay.put_pixel(0, 0, [255, 0, 0, 255]);
        overlay.put_pixel(1, 0, [255, 0, 0, 0]);
        let out = composite_overlay(&base, &overlay).unwrap();
        assert_eq!(out.get_pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn composite_overlay_rejects_size_mismatch() {
        let base = Frame::black(2, 2);
        let overlay = Frame::black(3, 2);
        assert!(composite_overlay(&base, &overlay).is_err());
    }

    #[test]
    fn over_straight_half_red_over_black() {
        let out = over_straight([0, 0, 0, 255], [255, 0, 0, 128]);
        assert_eq!(out[3], 255);
        assert!((i32::from(out[0]) - 128).abs() <= 1);
        assert_eq!(out[1], 0);
    }

    #[test]
    fn vignette_mask_center_bright_corner_dark() {
        let mask = radial_vignette_mask(100, 100, 1.0);
        let center = mask[50 * 100 + 50];
        let corner = mask[0];
        assert!(center > 240);
        assert_eq!(corner, 0);
    }

    #[test]
    fn time_mask_grows_linearly_forward() {
        let m0 = time_mask(0.0, 0.0, 1.0, 10, 1, Axis::X, MaskDirection::Forward);
        assert!(m0.iter().all(|&v| v == 0));

        let mh = time_mask(0.5, 0.0, 1.0, 10, 1, Axis::X, MaskDirection::Forward);
        assert_eq!(mh.iter().filter(|&&v| v == 255).count(), 5);
        assert_eq!(mh[0], 255);
        assert_eq!(mh[9], 0);

        let m1 = time_mask(1.0, 0.0, 1.0, 10, 1, Axis::X, MaskDirection::Forward);
        assert!(m1.iter().all(|&v| v == 255));
    }

    #[test]
    fn time_mask_backward_grows_from_far_edge() {
        let mh = time_mask(0.5, 0.0, 1.0, 10, 1, Axis::X, MaskDirection::Backward);
        assert_eq!(mh[9], 255);
        assert_eq!(mh[0], 0);
    }

    #[test]
    fn time_mask_degenerate_window_is_fully_opaque() {
        let m = time_mask(0.3, 0.5, 0.5, 4, 4, Axis::Y, MaskDirection::Forward);
        assert!(m.iter().all(|&v| v == 255));
    }

    #[test]
    fn blur_constant_image_is_identity() {
        let src = Frame::solid(6, 5, [10, 20, 30, 255]);
        let out = gaussian_blur(&src, 2, 1.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn blur_radius_0_is_identity() {
        let src = gradient_frame(4, 4);
        let out = gaussian_blur(&src, 0, 1.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn mirror_x_twice_is_identity() {
        let src = gradient_frame(7, 3);
        assert_eq!(mirror_x(&mirror_x(&src)), src);
    }

    #[test]
    fn affine_identity_resample_preserves_pixels() {
        let src = gradient_frame(8, 8);
        let out = affine_resample(&src, Affine::IDENTITY, 8, 8);
        assert_eq!(out, src);
    }

    #[test]
    fn affine_translate_reveals_black() {
        let src = Frame::solid(4, 4, [255, 255, 255, 255]);
        let out = affine_resample(&src, Affine::translate((2.0, 0.0)), 4, 4);
        assert_eq!(out.get_pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(3, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0, 0, 255]);
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), [255, 0, 0]);
    }
}
