//! Simulation engine for the scanfx effects.
//!
//! Everything here is platform independent: effects draw through the
//! [`Surface`] trait and are driven by [`FrameDriver`]; the wasm front-end
//! supplies the canvas, the clock and the input events.

pub mod codegen;
pub mod config;
pub mod constants;
pub mod driver;
pub mod effects;
pub mod error;
pub mod forces;
pub mod particle;
pub mod pool;
pub mod scan;
pub mod stream;
pub mod surface;

pub use config::{ColorMode, FieldConfig, RainConfig};
pub use driver::{ticks_for, Backdrop, Effect, FrameDriver, FrameStats, Lifecycle, Ticket};
pub use error::{FxError, Result};
pub use particle::Particle;
pub use pool::{Discipline, Pool};
pub use scan::{CardId, CardMask, ScanController, ScanLine, ScanReport, Span};
pub use stream::{CardStream, Motion};
pub use surface::{safe_alpha, Blend, Color, GradientStop, Paint, SpriteId, Surface};
