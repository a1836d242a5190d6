//! Card elements for the scanner strip: an image face and a decoded face
//! filled with generated code, clipped against the scan line through CSS
//! custom properties.

use crate::constants::*;
use crate::dom::{self, js_err, Listener};
use crate::geometry;
use anyhow::Result;
use fnv::FnvHashMap;
use rand::rngs::StdRng;
use scanfx_core::codegen::{self, CodeGrid};
use scanfx_core::constants::{
    CARD_HEIGHT, CARD_WIDTH, PLACEHOLDER_FROM, PLACEHOLDER_TO, SCAN_PULSE_MS,
};
use scanfx_core::{CardId, CardMask, Span, Ticket};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Card {
    wrapper: web::HtmlElement,
    normal: web::HtmlElement,
    ascii: web::HtmlElement,
    content: web::HtmlElement,
    _image_error: Listener,
}

impl Card {
    pub fn span(&self) -> Option<Span> {
        let rect = self.wrapper.get_bounding_client_rect();
        let span = Span {
            left: rect.left() as f32,
            right: rect.right() as f32,
        };
        (span.left.is_finite() && span.right.is_finite()).then_some(span)
    }

    pub fn apply_mask(&self, mask: CardMask) {
        _ = self
            .normal
            .style()
            .set_property(CSS_CLIP_RIGHT, &geometry::percent(mask.normal_clip_right));
        _ = self
            .ascii
            .style()
            .set_property(CSS_CLIP_LEFT, &geometry::percent(mask.ascii_clip_left));
    }

    /// One-shot flash over the card, removed after `SCAN_PULSE_MS`.
    pub fn pulse(&self, document: &web::Document, ticket: &Ticket) {
        let Ok(flash) = dom::create::<web::Element>(document, "div", CLASS_SCAN_EFFECT) else {
            return;
        };
        if self.wrapper.append_child(&flash).is_err() {
            return;
        }
        let ticket = ticket.clone();
        dom::after(SCAN_PULSE_MS, move || {
            if !ticket.is_live() {
                return;
            }
            if let Some(parent) = flash.parent_node() {
                _ = parent.remove_child(&flash);
            }
        });
    }

    pub fn refresh_code(&self, grid: CodeGrid, rng: &mut StdRng) {
        let text = codegen::generate(grid.cols, grid.rows, rng);
        self.content.set_text_content(Some(&text));
    }
}

/// Every card on the strip, keyed by the id registered with the scan
/// controller.
#[derive(Default)]
pub struct Deck {
    cards: FnvHashMap<CardId, Card>,
}

impl Deck {
    pub fn build(
        document: &web::Document,
        line: &web::HtmlElement,
        count: usize,
        ticket: &Ticket,
        rng: &mut StdRng,
    ) -> Result<Self> {
        line.set_inner_html("");
        let grid = codegen::dimensions(CARD_WIDTH, CARD_HEIGHT);
        let mut cards = FnvHashMap::default();
        for i in 0..count {
            let card = build_card(document, i, grid, ticket, rng)?;
            line.append_child(&card.wrapper).map_err(js_err)?;
            cards.insert(i as CardId, card);
        }
        log::info!("[cards] built {} cards ({}x{} code grid)", count, grid.cols, grid.rows);
        Ok(Self { cards })
    }

    #[inline]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }
}

fn build_card(
    document: &web::Document,
    index: usize,
    grid: CodeGrid,
    ticket: &Ticket,
    rng: &mut StdRng,
) -> Result<Card> {
    let wrapper: web::HtmlElement = dom::create(document, "div", CLASS_CARD_WRAPPER)?;
    let normal: web::HtmlElement = dom::create(document, "div", CLASS_CARD_NORMAL)?;
    let image: web::HtmlImageElement = dom::create(document, "img", CLASS_CARD_IMAGE)?;
    image.set_alt(CARD_IMAGE_ALT);

    let image_error = {
        let img = image.clone();
        let ticket = ticket.clone();
        let swapped = Rc::new(Cell::new(false));
        Listener::new(&image, "error", move |_| {
            // a broken placeholder must not retrigger forever
            if !ticket.is_live() || swapped.replace(true) {
                return;
            }
            match placeholder_data_url() {
                Ok(url) => img.set_src(&url),
                Err(e) => log::warn!("[cards] placeholder: {e:?}"),
            }
        })?
    };
    if let Some(url) = geometry::card_image(&CARD_IMAGE_URLS, index) {
        image.set_src(url);
    }
    normal.append_child(&image).map_err(js_err)?;

    let ascii: web::HtmlElement = dom::create(document, "div", CLASS_CARD_ASCII)?;
    let content: web::HtmlElement = dom::create(document, "div", CLASS_ASCII_CONTENT)?;
    let style = content.style();
    _ = style.set_property("font-size", &format!("{}px", grid.font_size));
    _ = style.set_property("line-height", &format!("{}px", grid.line_height));
    content.set_text_content(Some(&codegen::generate(grid.cols, grid.rows, rng)));
    ascii.append_child(&content).map_err(js_err)?;

    wrapper.append_child(&normal).map_err(js_err)?;
    wrapper.append_child(&ascii).map_err(js_err)?;

    Ok(Card {
        wrapper,
        normal,
        ascii,
        content,
        _image_error: image_error,
    })
}

/// Gradient stand-in for a card image that failed to load.
pub fn placeholder_data_url() -> Result<String> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::create(&document, "canvas", "")?;
    let (w, h) = (CARD_WIDTH as u32, CARD_HEIGHT as u32);
    canvas.set_width(w);
    canvas.set_height(h);
    let ctx = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?;
    let ctx: web::CanvasRenderingContext2d = ctx
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("unexpected context type"))?;
    let g = ctx.create_linear_gradient(0.0, 0.0, w as f64, h as f64);
    g.add_color_stop(0.0, PLACEHOLDER_FROM).map_err(js_err)?;
    g.add_color_stop(1.0, PLACEHOLDER_TO).map_err(js_err)?;
    #[allow(deprecated)]
    ctx.set_fill_style(&g.into());
    ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
    canvas.to_data_url().map_err(js_err)
}
