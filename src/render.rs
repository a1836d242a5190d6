use crate::dom::{self, js_err};
use anyhow::{anyhow, Result};
use scanfx_core::{safe_alpha, Blend, Color, GradientStop, Paint, SpriteId, Surface};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// `Surface` over a 2D canvas context.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    round_rect: Option<js_sys::Function>,
    sprites: Vec<web::HtmlCanvasElement>,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> Result<Self> {
        let ctx = context_2d(&canvas)?;
        // roundRect is missing on older engines
        let round_rect = js_sys::Reflect::get(&ctx, &JsValue::from_str("roundRect"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        if round_rect.is_none() {
            log::info!("[frame] roundRect unavailable; using fillRect");
        }
        Ok(Self {
            canvas,
            ctx,
            round_rect,
            sprites: Vec::new(),
        })
    }

    fn style(&self, paint: &Paint) -> JsValue {
        match *paint {
            Paint::Solid(color) => JsValue::from_str(&color.css()),
            Paint::Linear { from, to, stops } => {
                let g = self.ctx.create_linear_gradient(
                    from[0] as f64,
                    from[1] as f64,
                    to[0] as f64,
                    to[1] as f64,
                );
                add_stops(&g, stops);
                g.into()
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let (cx, cy) = (center[0] as f64, center[1] as f64);
                let r = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
                match self
                    .ctx
                    .create_radial_gradient(cx, cy, 0.0, cx, cy, r as f64)
                {
                    Ok(g) => {
                        add_stops(&g, stops);
                        g.into()
                    }
                    Err(_) => JsValue::from_str(&Color::TRANSPARENT.css()),
                }
            }
        }
    }

    #[allow(deprecated)]
    fn set_fill(&self, paint: &Paint) {
        self.ctx.set_fill_style(&self.style(paint));
    }
}

fn context_2d(canvas: &web::HtmlCanvasElement) -> Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("unexpected context type"))
}

fn add_stops(gradient: &web::CanvasGradient, stops: &[GradientStop]) {
    for s in stops {
        let offset = if s.offset.is_finite() {
            s.offset.clamp(0.0, 1.0)
        } else {
            0.0
        };
        _ = gradient.add_color_stop(offset, &s.color.css());
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(safe_alpha(alpha) as f64);
    }

    fn set_blend(&mut self, blend: Blend) {
        _ = self.ctx.set_global_composite_operation(blend.as_css());
    }

    fn set_shadow(&mut self, blur: f32, color: Color) {
        self.ctx.set_shadow_blur(blur.max(0.0) as f64);
        self.ctx.set_shadow_color(&color.css());
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: &Paint) {
        self.set_fill(paint);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, paint: &Paint) {
        let Some(round_rect) = &self.round_rect else {
            self.fill_rect(x, y, w, h, paint);
            return;
        };
        let args = js_sys::Array::new();
        for v in [x, y, w, h, radius.max(0.0)] {
            args.push(&JsValue::from_f64(v as f64));
        }
        self.ctx.begin_path();
        if round_rect.apply(&self.ctx, &args).is_err() {
            self.fill_rect(x, y, w, h, paint);
            return;
        }
        self.set_fill(paint);
        self.ctx.fill();
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        if !(radius > 0.0) {
            return;
        }
        self.ctx.begin_path();
        if self
            .ctx
            .arc(cx as f64, cy as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.set_fill(paint);
            self.ctx.fill();
        }
    }

    #[allow(deprecated)]
    fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Color) {
        self.ctx.begin_path();
        self.ctx.move_to(from[0] as f64, from[1] as f64);
        self.ctx.line_to(to[0] as f64, to[1] as f64);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style(&JsValue::from_str(&color.css()));
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_px: f32, color: Color) {
        self.ctx.set_font(&format!("{font_px}px monospace"));
        self.set_fill(&Paint::Solid(color));
        _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn bake_sprite(&mut self, size: u32, stops: &[GradientStop]) -> Option<SpriteId> {
        let document = dom::window_document()?;
        let sprite: web::HtmlCanvasElement = dom::create(&document, "canvas", "").ok()?;
        sprite.set_width(size.max(1));
        sprite.set_height(size.max(1));
        let ctx = context_2d(&sprite).ok()?;
        let half = size.max(1) as f64 * 0.5;
        let g = ctx
            .create_radial_gradient(half, half, 0.0, half, half, half)
            .ok()?;
        add_stops(&g, stops);
        #[allow(deprecated)]
        ctx.set_fill_style(&g.into());
        ctx.fill_rect(0.0, 0.0, half * 2.0, half * 2.0);

        self.sprites.push(sprite);
        Some(SpriteId(self.sprites.len() as u32 - 1))
    }

    fn draw_sprite(&mut self, sprite: SpriteId, x: f32, y: f32, w: f32, h: f32) {
        if let Some(img) = self.sprites.get(sprite.0 as usize) {
            _ = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                img, x as f64, y as f64, w as f64, h as f64,
            );
        }
    }
}
