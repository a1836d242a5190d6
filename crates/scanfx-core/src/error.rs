use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("unknown color mode `{0}` (expected classic, rainbow, purple or red)")]
    UnknownColorMode(String),

    #[error("coverage mask is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    MaskSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("effect `{0}` has no runtime configuration")]
    Unconfigurable(&'static str),
}

pub type Result<T> = std::result::Result<T, FxError>;
