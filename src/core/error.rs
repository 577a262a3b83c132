use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Failures raised while turning a player page into tool invocations.
///
/// Everything except `InvalidSelectionInput` aborts the whole resolution.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The embedded flashvars blob is not the JSON shape we expect
    #[error("stream catalog is malformed: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("no stream variants available for the selected mode")]
    NoVariantsAvailable,

    /// Recoverable: the selector asks again
    #[error("invalid selection {input:?}, expected a number between 1 and {max}")]
    InvalidSelectionInput { input: String, max: usize },

    #[error("page is missing the embedded {0}")]
    MissingPageElement(&'static str),

    #[error("operator input required but prompting is disabled: {0}")]
    PromptUnavailable(String),

    #[error("input closed while waiting for an answer")]
    InputClosed,

    #[error("extra arguments {0:?} have unbalanced quotes")]
    InvalidExtraArgs(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ResolveError::InvalidSelectionInput { .. })
    }
}
