// Text particles: the text is rendered once into an offscreen canvas and
// its coverage mask becomes the particle targets.

use super::{EffectPage, Page};
use crate::constants::{ID_EFFECT_CANVAS, TEXT_DEFAULT, TEXT_FONT_PX, TEXT_LINE_FACTOR};
use crate::dom::{self, js_err};
use crate::geometry;
use crate::page::PageKind;
use anyhow::{anyhow, Result};
use glam::Vec2;
use scanfx_core::constants::{TEXT_ALPHA_THRESHOLD, TEXT_SAMPLE_GAP};
use scanfx_core::effects::{targets_from_rgba, TextParticles};
use scanfx_core::{Effect, Ticket};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct TextPage {
    inner: EffectPage<TextParticles>,
    document: web::Document,
    seed: u64,
}

impl TextPage {
    pub fn mount(document: &web::Document, ticket: Ticket, seed: u64) -> Result<Self> {
        let canvas: web::HtmlCanvasElement = dom::element_by_id(document, ID_EFFECT_CANVAS)?;
        let (w, h) = dom::sync_canvas_backing_size(&canvas);
        let effect = build_effect(document, TEXT_DEFAULT, w as f32, h as f32, seed)?;
        let inner = EffectPage::mount(PageKind::TextParticles, document, canvas, effect, ticket)?;
        Ok(Self {
            inner,
            document: document.clone(),
            seed,
        })
    }
}

impl Page for TextPage {
    fn kind(&self) -> PageKind {
        PageKind::TextParticles
    }

    /// Accepts `{"text": "..."}` and rebuilds the particle cloud.
    fn configure(&mut self, json: &str) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let text = value
            .get("text")
            .and_then(|t| t.as_str())
            .ok_or_else(|| anyhow!("expected a \"text\" string"))?;
        let canvas = self.inner.canvas();
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        self.seed = self.seed.wrapping_add(1);
        let effect = build_effect(&self.document, text, w, h, self.seed)?;
        log::info!("[config] text particles={}", effect.population());
        *self.inner.driver().borrow_mut().effect_mut() = effect;
        Ok(())
    }
}

fn build_effect(
    document: &web::Document,
    text: &str,
    width: f32,
    height: f32,
    seed: u64,
) -> Result<TextParticles> {
    let (targets, mask_size) = text_targets(document, text)?;
    Ok(TextParticles::new(targets, mask_size, width, height, seed))
}

fn text_targets(document: &web::Document, text: &str) -> Result<(Vec<Vec2>, Vec2)> {
    let mask: web::HtmlCanvasElement = dom::create(document, "canvas", "")?;
    let ctx = mask
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("unexpected context type"))?;
    let font = format!("bold {TEXT_FONT_PX}px Arial, sans-serif");
    ctx.set_font(&font);
    let measured = ctx.measure_text(text).map_err(js_err)?.width();
    let (w, h) = geometry::text_mask_size(measured, TEXT_FONT_PX, TEXT_LINE_FACTOR);
    mask.set_width(w);
    mask.set_height(h);

    // resizing resets the context state
    ctx.set_font(&font);
    #[allow(deprecated)]
    ctx.set_fill_style(&JsValue::from_str("white"));
    ctx.set_text_baseline("top");
    ctx.fill_text(text, 0.0, 0.0).map_err(js_err)?;

    let pixels = ctx
        .get_image_data(0.0, 0.0, w as f64, h as f64)
        .map_err(js_err)?
        .data();
    let targets = targets_from_rgba(
        w as usize,
        h as usize,
        &pixels.0,
        TEXT_SAMPLE_GAP,
        TEXT_ALPHA_THRESHOLD,
    )?;
    Ok((targets, Vec2::new(w as f32, h as f32)))
}
