use thiserror::Error;

/// Internal failure modes for the itemization/shaping pipeline.
///
/// Never crosses the public boundary directly: public operations translate
/// these into the `bool`/`Option` returns the interface specifies, logging
/// the discarded detail at `debug` or `warn`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("empty paragraph")]
    EmptyText,

    #[error("bidi algorithm reported an invalid embedding level")]
    BidiFailure,

    #[error("invalid OpenType feature syntax: {0:?}")]
    InvalidFeatureSyntax(String),

    #[error("no font bound for code point range")]
    NoFontBound,
}

pub type Result<T> = std::result::Result<T, ShapeError>;
