/// DOM hooks and web-side tuning for the scanfx pages.
///
/// Element ids and class names mirror the page markup; the numeric values
/// bound how the browser clock and canvases feed the engine.

// Attribute on <body> naming the page to mount at start-up
pub const PAGE_ATTR: &str = "data-page";

// Card scanner markup
pub const ID_CARD_STREAM: &str = "cardStream";
pub const ID_CARD_LINE: &str = "cardLine";
pub const ID_DRIFT_CANVAS: &str = "particleCanvas";
pub const ID_SCANNER_CANVAS: &str = "scannerCanvas";
pub const ID_SPEED_VALUE: &str = "speedValue";
pub const ID_BTN_PAUSE: &str = "btn-pause";
pub const ID_BTN_RESET: &str = "btn-reset";
pub const ID_BTN_DIRECTION: &str = "btn-direction";

// Single-canvas pages
pub const ID_EFFECT_CANVAS: &str = "fxCanvas";
pub const ID_FPS_VALUE: &str = "fpsValue";
pub const ID_PARTICLE_COUNT: &str = "particleCount";

pub const CLASS_CARD_WRAPPER: &str = "card-wrapper";
pub const CLASS_CARD_NORMAL: &str = "card card-normal";
pub const CLASS_CARD_ASCII: &str = "card card-ascii";
pub const CLASS_CARD_IMAGE: &str = "card-image";
pub const CLASS_ASCII_CONTENT: &str = "ascii-content";
pub const CLASS_SCAN_EFFECT: &str = "scan-effect";
pub const CLASS_DRAGGING: &str = "dragging";

// Custom properties read by the card stylesheet
pub const CSS_CLIP_RIGHT: &str = "--clip-right";
pub const CSS_CLIP_LEFT: &str = "--clip-left";

pub const CARD_IMAGE_URLS: [&str; 5] = [
    "assets/cards/01.png",
    "assets/cards/02.png",
    "assets/cards/03.png",
    "assets/cards/04.png",
    "assets/cards/05.png",
];
pub const CARD_IMAGE_ALT: &str = "Credit Card";

// Longest frame handed to the engine (hidden tabs resume with a huge gap)
pub const MAX_FRAME_DT_SEC: f32 = 0.25;

// Stats read-out refresh on the single-canvas pages
pub const STATS_REFRESH_MS: i32 = 500;

// Offscreen text mask for the text particle page
pub const TEXT_FONT_PX: f32 = 100.0;
pub const TEXT_LINE_FACTOR: f32 = 1.2; // mask height = font * factor
pub const TEXT_DEFAULT: &str = "SCANFX";
