//! Drawing abstraction handed to effects.
//!
//! Effects never touch a browser context directly; the web front-end
//! implements [`Surface`] over a `CanvasRenderingContext2d` and the tests
//! implement it with a recorder.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgba(u8, u8, u8, f32),
    /// Hue in degrees, saturation and lightness in percent, alpha 0..1.
    Hsla(f32, f32, f32, f32),
}

impl Color {
    pub const TRANSPARENT: Color = Color::Rgba(0, 0, 0, 0.0);

    #[inline]
    pub fn rgb((r, g, b): (u8, u8, u8), a: f32) -> Self {
        Color::Rgba(r, g, b, safe_alpha(a))
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Rgba(_, _, _, a) | Color::Hsla(_, _, _, a) => a,
        }
    }

    /// CSS color string (`rgba(..)` / `hsla(..)`) with alpha clamped.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgba(r, g, b, a) => write!(f, "rgba({r}, {g}, {b}, {:.3})", safe_alpha(a)),
            Color::Hsla(h, s, l, a) => write!(
                f,
                "hsla({:.1}, {:.1}%, {:.1}%, {:.3})",
                finite(h).rem_euclid(360.0),
                finite(s).clamp(0.0, 100.0),
                finite(l).clamp(0.0, 100.0),
                safe_alpha(a)
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    #[inline]
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: safe_alpha(offset),
            color,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Paint<'a> {
    Solid(Color),
    Linear {
        from: [f32; 2],
        to: [f32; 2],
        stops: &'a [GradientStop],
    },
    Radial {
        center: [f32; 2],
        radius: f32,
        stops: &'a [GradientStop],
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    SourceOver,
    Lighter,
    DestinationIn,
}

impl Blend {
    pub fn as_css(&self) -> &'static str {
        match self {
            Blend::SourceOver => "source-over",
            Blend::Lighter => "lighter",
            Blend::DestinationIn => "destination-in",
        }
    }
}

/// Handle to an offscreen image baked once and blitted many times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

pub trait Surface {
    /// Pixel size of the drawing area.
    fn size(&self) -> (f32, f32);

    fn clear(&mut self);
    fn set_alpha(&mut self, alpha: f32);
    fn set_blend(&mut self, blend: Blend);
    fn set_shadow(&mut self, blur: f32, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint);

    /// Rounded rectangle; surfaces without the primitive draw a plain rect.
    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _radius: f32, paint: &Paint) {
        self.fill_rect(x, y, w, h, paint);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint);
    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_px: f32, color: Color);

    /// Render a radial gradient disc of `size` pixels once for later blits.
    fn bake_sprite(&mut self, size: u32, stops: &[GradientStop]) -> Option<SpriteId>;
    fn draw_sprite(&mut self, sprite: SpriteId, x: f32, y: f32, w: f32, h: f32);
}

/// Clamp to `[0, 1]`, mapping NaN and infinities to 0.
#[inline]
pub fn safe_alpha(a: f32) -> f32 {
    if a.is_finite() {
        a.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[inline]
fn finite(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
