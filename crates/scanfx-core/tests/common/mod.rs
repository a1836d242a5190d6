// Recording surface shared by the effect tests.

#![allow(dead_code)]

use scanfx_core::{Blend, Color, GradientStop, Paint, SpriteId, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear,
    Alpha(f32),
    Blend(Blend),
    Shadow(f32),
    Rect { x: f32, y: f32, w: f32, h: f32 },
    RoundRect { x: f32, w: f32, radius: f32 },
    Circle { x: f32, y: f32, r: f32 },
    Line { width: f32, alpha: f32 },
    Text { text: String, x: f32, y: f32, color: Color },
    Bake(u32),
    Sprite { x: f32, y: f32, w: f32 },
}

pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<Op>,
    pub round_rects: bool,
    sprites: u32,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            round_rects: true,
            sprites: 0,
        }
    }

    pub fn without_round_rects(mut self) -> Self {
        self.round_rects = false;
        self
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Every recorded number must be finite: nothing degenerate reaches a
    /// draw call.
    pub fn assert_all_finite(&self) {
        for op in &self.ops {
            let ok = match op {
                Op::Alpha(a) => a.is_finite() && (0.0..=1.0).contains(a),
                Op::Shadow(b) => b.is_finite(),
                Op::Rect { x, y, w, h } => [x, y, w, h].iter().all(|v| v.is_finite()),
                Op::RoundRect { x, w, radius } => [x, w, radius].iter().all(|v| v.is_finite()),
                Op::Circle { x, y, r } => [x, y, r].iter().all(|v| v.is_finite()) && *r >= 0.0,
                Op::Line { width, alpha } => width.is_finite() && (0.0..=1.0).contains(alpha),
                Op::Text { x, y, .. } => x.is_finite() && y.is_finite(),
                Op::Sprite { x, y, w } => [x, y, w].iter().all(|v| v.is_finite()),
                _ => true,
            };
            assert!(ok, "non-finite or out of range draw op: {op:?}");
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(Op::Alpha(alpha));
    }

    fn set_blend(&mut self, blend: Blend) {
        self.ops.push(Op::Blend(blend));
    }

    fn set_shadow(&mut self, blur: f32, _color: Color) {
        self.ops.push(Op::Shadow(blur));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _paint: &Paint) {
        self.ops.push(Op::Rect { x, y, w, h });
    }

    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, paint: &Paint) {
        if self.round_rects {
            self.ops.push(Op::RoundRect { x, w, radius });
        } else {
            self.fill_rect(x, y, w, h, paint);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, _paint: &Paint) {
        self.ops.push(Op::Circle {
            x: cx,
            y: cy,
            r: radius,
        });
    }

    fn stroke_line(&mut self, _from: [f32; 2], _to: [f32; 2], width: f32, color: Color) {
        self.ops.push(Op::Line {
            width,
            alpha: color.alpha(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, _font_px: f32, color: Color) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn bake_sprite(&mut self, size: u32, _stops: &[GradientStop]) -> Option<SpriteId> {
        self.ops.push(Op::Bake(size));
        self.sprites += 1;
        Some(SpriteId(self.sprites))
    }

    fn draw_sprite(&mut self, _sprite: SpriteId, x: f32, y: f32, w: f32, _h: f32) {
        self.ops.push(Op::Sprite { x, y, w });
    }
}
