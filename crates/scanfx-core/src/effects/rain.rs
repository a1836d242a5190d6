//! Falling glyph columns. The column set is a fixed-size pool for a given
//! width, font size and density; columns that fall off the bottom are
//! reseeded in place above the top edge.

use super::{floor_size, uniform};
use crate::config::{ColorMode, RainConfig};
use crate::constants::{
    RAIN_HEAD_SHADOW, RAIN_LEN_SPAN, RAIN_MIN_LEN, RAIN_MUTATE_PROBABILITY, RAIN_RESPAWN_BAND,
};
use crate::driver::{Backdrop, Effect};
use crate::error::Result;
use crate::surface::{Color, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ASCII_GLYPHS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789@#$%^&*()_+-=[]{}|;:,.<>?/~`";
const KANA_GLYPHS: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";
// appended again so capitals and digits turn up twice as often
const WEIGHTED_GLYPHS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Clone, Debug)]
pub struct Glyph {
    pub ch: char,
    pub brightness: f32,
}

#[derive(Clone, Debug)]
pub struct Column {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub glyphs: Vec<Glyph>,
}

pub struct Rain {
    config: RainConfig,
    size: Vec2,
    columns: Vec<Column>,
    /// Font size and density the current layout was built for.
    layout_key: (f32, f32),
    alphabet: Vec<char>,
    rng: StdRng,
}

impl Rain {
    pub fn new(config: RainConfig, width: f32, height: f32, seed: u64) -> Self {
        let config = config.sanitized();
        let mut rain = Self {
            layout_key: (config.font_size, config.density),
            config,
            size: floor_size(width, height),
            columns: Vec::new(),
            alphabet: ASCII_GLYPHS
                .chars()
                .chain(KANA_GLYPHS.chars())
                .chain(WEIGHTED_GLYPHS.chars())
                .collect(),
            rng: StdRng::seed_from_u64(seed),
        };
        rain.layout();
        rain
    }

    #[inline]
    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RainConfig) {
        self.config = config.sanitized();
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Glyph pool drawn from uniformly; repeated entries weigh more.
    #[inline]
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Columns that fit the current width: `floor(w / font) * density`.
    pub fn column_count(&self) -> usize {
        let per_row = (self.size.x / self.config.font_size).floor();
        (per_row * self.config.density).ceil().max(0.0) as usize
    }

    fn layout(&mut self) {
        let n = self.column_count();
        let (font, density) = (self.config.font_size, self.config.density);
        let mut columns = Vec::with_capacity(n);
        for i in 0..n {
            let x = i as f32 / density * font;
            let y = -self.rng.gen::<f32>() * self.size.y;
            let mut col = Column {
                x,
                y,
                speed: 0.0,
                glyphs: Vec::new(),
            };
            self.reseed(&mut col, y);
            columns.push(col);
        }
        self.columns = columns;
        self.layout_key = (font, density);
        log::debug!("[rain] layout columns={} width={}", n, self.size.x);
    }

    fn reseed(&mut self, col: &mut Column, y: f32) {
        col.y = y;
        col.speed = uniform(&mut self.rng, 0.5, 1.0) * self.config.speed;
        let len = RAIN_MIN_LEN + self.rng.gen_range(0..RAIN_LEN_SPAN);
        col.glyphs.clear();
        for i in 0..len {
            let ch = self.random_glyph();
            col.glyphs.push(Glyph {
                ch,
                brightness: 1.0 - i as f32 / len as f32,
            });
        }
    }

    #[inline]
    fn random_glyph(&mut self) -> char {
        self.alphabet[self.rng.gen_range(0..self.alphabet.len())]
    }

    fn glyph_color(&self, col: &Column, i: usize, brightness: f32) -> Color {
        match self.config.color_mode {
            ColorMode::Rainbow => {
                let hue = (col.y + i as f32 * 30.0).rem_euclid(360.0);
                Color::Hsla(hue, 100.0, 50.0 * brightness, brightness)
            }
            ColorMode::Purple => Color::rgb((139, 92, 246), brightness),
            ColorMode::Red => Color::rgb((255, 50, 50), brightness),
            ColorMode::Classic => Color::rgb((0, 255, 0), brightness),
        }
    }
}

impl Effect for Rain {
    fn name(&self) -> &'static str {
        "code-rain"
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = floor_size(width, height);
        self.layout();
    }

    fn step(&mut self, ticks: f32) {
        if self.layout_key != (self.config.font_size, self.config.density) {
            self.layout();
        }
        let font = self.config.font_size;
        let bottom = self.size.y;
        let mut columns = std::mem::take(&mut self.columns);
        for col in &mut columns {
            col.y += col.speed * self.config.speed * ticks;
            if col.y > bottom + col.glyphs.len() as f32 * font {
                let y = -self.rng.gen::<f32>() * RAIN_RESPAWN_BAND;
                self.reseed(col, y);
            }
            if !col.glyphs.is_empty() && self.rng.gen::<f32>() < RAIN_MUTATE_PROBABILITY {
                let i = self.rng.gen_range(0..col.glyphs.len());
                col.glyphs[i].ch = self.random_glyph();
            }
        }
        self.columns = columns;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let font = self.config.font_size;
        surface.set_alpha(1.0);
        for col in &self.columns {
            for (i, g) in col.glyphs.iter().enumerate() {
                let y = col.y + i as f32 * font;
                if y <= 0.0 || y >= self.size.y {
                    continue;
                }
                let color = self.glyph_color(col, i, g.brightness);
                let mut buf = [0u8; 4];
                let text = g.ch.encode_utf8(&mut buf);
                if i == 0 {
                    let head = match self.config.color_mode {
                        ColorMode::Classic => Color::Rgba(255, 255, 255, 1.0),
                        _ => color,
                    };
                    surface.set_shadow(RAIN_HEAD_SHADOW, color);
                    surface.fill_text(text, col.x, y, font, head);
                    surface.set_shadow(0.0, Color::TRANSPARENT);
                } else {
                    surface.fill_text(text, col.x, y, font, color);
                }
            }
        }
    }

    fn backdrop(&self) -> Backdrop {
        Backdrop::Fade(Color::Rgba(0, 0, 0, 0.05))
    }

    fn population(&self) -> usize {
        self.columns.len()
    }

    fn configure(&mut self, json: &str) -> Result<()> {
        self.set_config(RainConfig::from_json(json)?);
        Ok(())
    }
}
