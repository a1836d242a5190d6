//! Mountable pages. Each page owns its loops, listeners and timers; dropping
//! the page tears all of them down.

mod canvas;
mod card_scanner;
mod text;

use crate::constants::ID_EFFECT_CANVAS;
use crate::dom;
use crate::page::PageKind;
use anyhow::{anyhow, Result};
use scanfx_core::effects::{Field, Rain};
use scanfx_core::{FieldConfig, RainConfig, Ticket};
use web_sys as web;

pub use canvas::EffectPage;

pub trait Page {
    fn kind(&self) -> PageKind;

    /// Live settings update from a JSON object.
    fn configure(&mut self, json: &str) -> Result<()>;
}

pub type View = Box<dyn Page>;

pub fn build(kind: PageKind, ticket: Ticket) -> Result<View> {
    let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let seed = random_seed();
    let view: View = match kind {
        PageKind::CardScanner => Box::new(card_scanner::CardScanner::mount(&document, ticket, seed)?),
        PageKind::ParticleCanvas => {
            let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, ID_EFFECT_CANVAS)?;
            let (w, h) = dom::sync_canvas_backing_size(&canvas);
            let field = Field::new(FieldConfig::default(), w as f32, h as f32, seed);
            Box::new(EffectPage::mount(kind, &document, canvas, field, ticket)?)
        }
        PageKind::CodeRain => {
            let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, ID_EFFECT_CANVAS)?;
            let (w, h) = dom::sync_canvas_backing_size(&canvas);
            let rain = Rain::new(RainConfig::default(), w as f32, h as f32, seed);
            Box::new(EffectPage::mount(kind, &document, canvas, rain, ticket)?)
        }
        PageKind::TextParticles => Box::new(text::TextPage::mount(&document, ticket, seed)?),
    };
    Ok(view)
}

#[inline]
fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}
