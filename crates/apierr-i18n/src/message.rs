use serde::{Deserialize, Serialize};

/// An already-resolved localized message: a stable identifier plus the
/// message text for one locale.
///
/// The text may contain `{{.Field}}` placeholders resolved against
/// per-call render data. Locale selection and catalog loading happen
/// upstream; this crate only consumes the resolved pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedMessage {
    /// Message identifier; becomes the rendered error's code when
    /// non-blank.
    pub id: String,
    /// Message text or template body.
    pub text: String,
}

impl LocalizedMessage {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}
