use thiserror::Error;

/// Template compilation and rendering failures.
///
/// These surface at startup, when message catalogs are registered; a
/// malformed template is a build-time defect, which is why the `must_*`
/// constructors turn them into panics.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The localized message carries no template text.
    #[error("message template body is missing")]
    BodyMissing,

    /// The template text failed to parse.
    #[error("template '{name}': {detail}")]
    Parse {
        /// Message id the template was compiled under.
        name: String,
        /// What the parser rejected.
        detail: String,
    },

    /// Render was called on a definition holding no compiled body.
    #[error("compiled template is missing")]
    TemplateMissing,

    /// The render data could not be converted to a JSON value.
    #[error("template data is not serializable: {0}")]
    Data(#[from] serde_json::Error),
}
