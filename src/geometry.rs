// Pure layout helpers shared by the pages. No browser types, so the host
// tests can include this file directly.

use glam::Vec2;

/// Canvas backing size for a CSS box at a device pixel ratio, never 0.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let px = |v: f64| {
        if v.is_finite() && v > 0.0 {
            ((v * dpr) as u32).max(1)
        } else {
            1
        }
    };
    (px(css_width), px(css_height))
}

/// Client (CSS) coordinates to canvas backing pixels. `None` while the
/// element has no layout box.
#[inline]
pub fn client_to_canvas_px(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
    backing: Vec2,
) -> Option<Vec2> {
    if !(rect_size.x > 0.0 && rect_size.y > 0.0) {
        return None;
    }
    let local = client - rect_origin;
    Some(local / rect_size * backing)
}

/// CSS percentage for a clip custom property.
#[inline]
pub fn percent(v: f32) -> String {
    let v = if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 };
    format!("{v:.3}%")
}

#[inline]
pub fn translate_x(px: f32) -> String {
    let px = if px.is_finite() { px } else { 0.0 };
    format!("translateX({px:.2}px)")
}

/// Image for the card at `index`, cycling through the set.
#[inline]
pub fn card_image<'a>(urls: &[&'a str], index: usize) -> Option<&'a str> {
    if urls.is_empty() {
        None
    } else {
        Some(urls[index % urls.len()])
    }
}

/// Offscreen text mask size for a measured text width.
#[inline]
pub fn text_mask_size(measured_width: f64, font_px: f32, line_factor: f32) -> (u32, u32) {
    let w = if measured_width.is_finite() {
        measured_width.ceil().max(1.0) as u32
    } else {
        1
    };
    let h = (font_px * line_factor).ceil().max(1.0) as u32;
    (w, h)
}
