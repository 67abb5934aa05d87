use crate::metrics::FontId;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum GridError {
    #[error("invalid configuration for `{option}`: {reason}")]
    /// The grid configuration can't be laid out. Raised before any layout work begins
    InvalidConfiguration {
        option: &'static str,
        reason: String,
    },

    #[error("no font loaded for {0}")]
    /// A field refers to a font that isn't in the font book
    UnknownFont(FontId),

    #[error("a draw instruction arrived before any page was started")]
    /// The renderer was asked to draw without a current page
    NoPage,

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FontParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// The configuration or record JSON couldn't be parsed
    Config(#[from] serde_json::Error),
}

impl GridError {
    pub(crate) fn invalid<S: ToString>(option: &'static str, reason: S) -> GridError {
        GridError::InvalidConfiguration {
            option,
            reason: reason.to_string(),
        }
    }
}
