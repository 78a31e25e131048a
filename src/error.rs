use thiserror::Error;

pub type Result<T> = std::result::Result<T, SvgError>;

/// Failures raised while turning SVG text into a primitive tree.
#[derive(Debug, Error)]
pub enum SvgError {
    /// The text is not well-formed XML.
    #[error("xml parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// No `<svg ... </svg>` fragment in the text.
    #[error("no <svg> root element found")]
    MissingRoot,

    /// Element nesting deeper than the mapper walks.
    #[error("svg elements nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("failed to fetch {locator}: {message}")]
    Fetch { locator: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(String),
}

impl SvgError {
    pub(crate) fn fetch(locator: &str, message: impl ToString) -> Self {
        Self::Fetch {
            locator: locator.to_string(),
            message: message.to_string(),
        }
    }
}
