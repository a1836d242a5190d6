//! Decorative "decoded" code text for the card overlay.

use crate::constants::{
    CODE_CHAR_WIDTH_PX, CODE_FONT_SIZE_PX, CODE_LINE_HEIGHT_PX, CODE_REFRESH_PROBABILITY,
};
use rand::Rng;

/// Character grid that fits a pixel box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CodeGrid {
    pub cols: usize,
    pub rows: usize,
    pub font_size: f32,
    pub line_height: f32,
}

pub fn dimensions(px_width: f32, px_height: f32) -> CodeGrid {
    let fit = |px: f32, per: f32| {
        if px.is_finite() && px > 0.0 {
            (px / per).floor() as usize
        } else {
            0
        }
    };
    CodeGrid {
        cols: fit(px_width, CODE_CHAR_WIDTH_PX),
        rows: fit(px_height, CODE_LINE_HEIGHT_PX),
        font_size: CODE_FONT_SIZE_PX,
        line_height: CODE_LINE_HEIGHT_PX,
    }
}

/// `rows` lines of exactly `cols` characters, joined by `\n`.
pub fn generate<R: Rng + ?Sized>(cols: usize, rows: usize, rng: &mut R) -> String {
    if rows == 0 {
        return String::new();
    }
    let library = library(rng);
    let wanted = cols * rows + cols;

    let mut flow = String::with_capacity(wanted + 128);
    for line in &library {
        push_collapsed(&mut flow, line);
    }
    while flow.len() < wanted {
        let pick = &library[rng.gen_range(0..library.len())];
        push_collapsed(&mut flow, pick);
    }

    let bytes = flow.as_bytes();
    let mut out = String::with_capacity(rows * (cols + 1));
    for row in 0..rows {
        let start = (row * cols).min(bytes.len());
        let end = (start + cols).min(bytes.len());
        // library text is ASCII, so byte slicing is char slicing
        out.push_str(&flow[start..end]);
        for _ in (end - start)..cols {
            out.push(' ');
        }
        if row + 1 < rows {
            out.push('\n');
        }
    }
    out
}

#[inline]
pub fn should_refresh<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen::<f32>() < CODE_REFRESH_PROBABILITY
}

/// Append `line` with whitespace runs collapsed, separated by one space.
fn push_collapsed(flow: &mut String, line: &str) {
    for word in line.split_whitespace() {
        if !flow.is_empty() {
            flow.push(' ');
        }
        flow.push_str(word);
    }
}

const HEADER: &[&str] = &[
    "// scanfx :: card decoder",
    "/* frame engine r2 */",
    "use std::{cell::RefCell, rc::Rc};",
    "const TARGET_FPS: u32 = 60;",
    "const DUST_DENSITY: f32 = 0.8;",
    "const SCAN_GLOW: f32 = 3.5;",
];

const HELPERS: &[&str] = &[
    "fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }",
    "fn clamp01(v: f32) -> f32 { v.max(0.0).min(1.0) }",
    "fn jitter(rng: &mut Rng, lo: f32, hi: f32) -> f32 { rng.gen_range(lo..hi) }",
    "fn smoothstep(t: f32) -> f32 { t * t * (3.0 - 2.0 * t) }",
    "fn dist(a: Vec2, b: Vec2) -> f32 { (b - a).length() }",
];

const BEAM_BLOCK: &[&str] = &[
    "struct Beam {",
    "    x: f32,",
    "    width: f32,",
    "    height: f32,",
    "    glow: f32,",
    "    tint: [u8; 4],",
    "}",
    "",
    "fn paint_glow(ctx: &mut Surface, beam: &Beam) {",
    "    ctx.set_shadow(beam.glow * 12.0, beam.tint);",
    "    ctx.fill_rect(beam.x, 0.0, beam.width, beam.height);",
    "}",
];

const LOOP_BLOCK: &[&str] = &[
    "fn run(mut state: State) {",
    "    let mut last = Instant::now();",
    "    loop {",
    "        let dt = last.elapsed().as_secs_f32();",
    "        last = Instant::now();",
    "        // step physics, then draw",
    "        state.step(dt);",
    "        state.draw();",
    "    }",
    "}",
];

const MISC: &[&str] = &[
    "let scan = ScanState { active: false, velocity: 120.0, direction: -1.0 };",
    "let view = Viewport { width: 1280.0, height: 300.0 };",
    "let handle = raf.request(move |t| tick(t)); drop(handle);",
    "// batched blits, one sprite",
    "// transforms stay on the compositor",
    "pub fn ramp(stops: &[Rgba]) -> Gradient { stops.iter().enumerate().map(|(i, c)| (i as f32 / (stops.len() - 1) as f32, *c)).collect() }",
];

const STATE_SNIPPETS: &[&str] = &[
    "let state = Rc::new(RefCell::new(initial));",
    "let weak = Rc::downgrade(&state);",
    "let cached = memo.get_or_insert_with(|| compute());",
    "let on_tick = Closure::wrap(Box::new(move || tick()) as Box<dyn FnMut()>);",
];

fn particle_block(idx: usize) -> Vec<String> {
    vec![
        format!("struct Mote{idx} {{"),
        "    pos: Vec2,".to_string(),
        "    vel: Vec2,".to_string(),
        "    radius: f32,".to_string(),
        "    alpha: f32,".to_string(),
        "}".to_string(),
        format!("impl Mote{idx} {{"),
        "    fn update(&mut self, dt: f32) {".to_string(),
        "        self.pos += self.vel * dt;".to_string(),
        "        self.alpha *= 0.99;".to_string(),
        "    }".to_string(),
        "}".to_string(),
    ]
}

fn library<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let mut lib: Vec<String> = Vec::with_capacity(128);
    lib.extend(HEADER.iter().map(|s| s.to_string()));
    lib.extend(HELPERS.iter().map(|s| s.to_string()));
    for b in 0..3 {
        lib.extend(particle_block(b));
    }
    lib.extend(BEAM_BLOCK.iter().map(|s| s.to_string()));
    lib.extend(LOOP_BLOCK.iter().map(|s| s.to_string()));
    lib.extend(MISC.iter().map(|s| s.to_string()));
    for i in 0..30 {
        let op = ['+', '-', '*', '/'][rng.gen_range(0..4)];
        let a: u32 = rng.gen_range(10..=99);
        let b: u32 = rng.gen_range(1..=50);
        lib.push(format!("const K{i}: f32 = ({a}.0 {op} {b}.0) * PI;"));
    }
    lib.extend(STATE_SNIPPETS.iter().map(|s| s.to_string()));
    for i in 0..15 {
        let threshold = 0.1 + (i % 5) as f32 * 0.1;
        lib.push(format!("if mote.alpha > {threshold:.1} {{ mote.update(dt); }}"));
    }
    lib
}
