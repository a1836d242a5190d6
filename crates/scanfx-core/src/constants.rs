// Shared tuning constants for the engine. Units are canvas pixels and 60 Hz
// ticks unless the name says otherwise.

// Frame pacing
pub const TICKS_PER_SEC: f32 = 60.0;
pub const MAX_TICKS_PER_FRAME: f32 = 4.0; // long stalls do not teleport particles
pub const FPS_SMOOTHING: f32 = 0.1;

// Card strip layout
pub const CARD_WIDTH: f32 = 400.0;
pub const CARD_HEIGHT: f32 = 250.0;
pub const CARD_GAP: f32 = 60.0;
pub const CARD_COUNT: usize = 30;
pub const CARD_IMAGE_COUNT: usize = 5;

// Card stream kinematics (units per second)
pub const CRUISE_VELOCITY: f32 = 120.0;
pub const MIN_VELOCITY: f32 = 30.0;
pub const FRICTION: f32 = 0.95;
pub const WHEEL_STEP: f32 = 20.0;
pub const DRAG_VELOCITY_SCALE: f32 = 60.0; // pointer dx per event -> units/s

// Scan line
pub const SCAN_LINE_WIDTH: f32 = 8.0;
pub const SCAN_PULSE_MS: i32 = 600;

// Procedural code overlay
pub const CODE_CHAR_WIDTH_PX: f32 = 6.0;
pub const CODE_LINE_HEIGHT_PX: f32 = 13.0;
pub const CODE_FONT_SIZE_PX: f32 = 11.0;
pub const CODE_REFRESH_MS: i32 = 200;
pub const CODE_REFRESH_PROBABILITY: f32 = 0.15;

// Grow-then-trim pool maintenance
pub const TRIM_SLACK: usize = 100;
pub const TRIM_BATCH: usize = 15;

// Particle field
pub const EXPLOSION_COUNT: usize = 20;
pub const EXPLOSION_SPEED_MIN: f32 = 3.0;
pub const EXPLOSION_SPEED_SPAN: f32 = 2.0;
pub const EXPLOSION_START_LIFE: f32 = 0.3;
pub const FIELD_FADE_IN_RATE: f32 = 0.02;
pub const FIELD_DAMPING: f32 = 0.99;
pub const REPULSION_STRENGTH: f32 = 0.5;
pub const FIELD_RGB: (u8, u8, u8) = (139, 92, 246);
pub const POINTER_LINK_RGB: (u8, u8, u8) = (236, 72, 153);

// Scanner light bar
pub const BEAM_HEIGHT: f32 = 300.0;
pub const BEAM_BAR_WIDTH: f32 = 3.0;
pub const BEAM_BLEND_RATE: f32 = 0.05;
pub const BEAM_IDLE_GLOW: f32 = 1.0;
pub const BEAM_SCAN_GLOW: f32 = 3.5;
pub const BEAM_SHED_SLACK: usize = 200;
pub const BEAM_SHED_BATCH: usize = 15;
pub const BEAM_EXIT_MARGIN: f32 = 10.0;
pub const BEAM_SPRITE_PX: u32 = 16;

// Ambient drift dust
pub const DRIFT_COUNT: usize = 160;

// Text particles
pub const TEXT_SAMPLE_GAP: usize = 4;
pub const TEXT_ALPHA_THRESHOLD: u8 = 128;
pub const TEXT_SCATTER: f32 = 200.0;
pub const TEXT_MOUSE_RADIUS: f32 = 100.0;
pub const TEXT_SPRING: f32 = 0.01;
pub const TEXT_DAMPING: f32 = 0.95;
pub const TEXT_DOT_RADIUS: f32 = 2.5;

// Code rain
pub const RAIN_MIN_LEN: usize = 10;
pub const RAIN_LEN_SPAN: usize = 20;
pub const RAIN_MUTATE_PROBABILITY: f32 = 0.05;
pub const RAIN_RESPAWN_BAND: f32 = 100.0;
pub const RAIN_HEAD_SHADOW: f32 = 10.0;

// Missing card image placeholder
pub const PLACEHOLDER_FROM: &str = "#667eea";
pub const PLACEHOLDER_TO: &str = "#764ba2";
