use std::fmt;

use apierr::Error;
use serde::Serialize;
use serde_json::Value;

use crate::template::Template;
use crate::{LocalizedMessage, TemplateError};

/// A compiled, reusable error template bound to a base error.
///
/// Compile once at startup, render per request. A definition that
/// fails to compile is discarded; there is no lazy recompilation.
/// Rendering never mutates the definition, so sharing one across
/// threads is safe.
#[derive(Debug, Clone)]
pub struct ErrorTemplate {
    base: Error,
    message: LocalizedMessage,
    template: Option<Template>,
}

impl ErrorTemplate {
    /// Compile `message.text` under `message.id` and bind the result
    /// to `base`.
    ///
    /// Fails with [`TemplateError::BodyMissing`] when the text is
    /// empty, or with a parse error for malformed placeholder syntax.
    pub fn new(base: &Error, message: LocalizedMessage) -> Result<Self, TemplateError> {
        if message.text.is_empty() {
            return Err(TemplateError::BodyMissing);
        }
        let template = Template::parse(&message.id, &message.text)?;
        Ok(Self {
            base: base.clone(),
            message,
            template: Some(template),
        })
    }

    /// [`ErrorTemplate::new`] for startup-time message catalogs.
    ///
    /// # Panics
    ///
    /// If the message fails to compile.
    #[must_use]
    pub fn must_new(base: &Error, message: LocalizedMessage) -> Self {
        match Self::new(base, message) {
            Ok(template) => template,
            Err(err) => panic!("error template failed to compile: {err}"),
        }
    }

    /// Render a fresh error from this definition.
    ///
    /// The message is the template executed against `data`; the code is
    /// the message id when non-blank, else the base's; when `data` is a
    /// JSON object it also becomes the error's metadata. Every call
    /// allocates independent state.
    pub fn render(&self, data: impl Serialize) -> Result<RenderedError, TemplateError> {
        if self.template.is_none() {
            return Err(TemplateError::TemplateMissing);
        }
        self.render_value(serde_json::to_value(data)?)
    }

    /// [`ErrorTemplate::render`] that panics on failure.
    ///
    /// # Panics
    ///
    /// If the data is unserializable or the definition holds no
    /// compiled body.
    #[must_use]
    pub fn must_render(&self, data: impl Serialize) -> RenderedError {
        match self.render(data) {
            Ok(rendered) => rendered,
            Err(err) => panic!("error template failed to render: {err}"),
        }
    }

    fn render_value(&self, data: Value) -> Result<RenderedError, TemplateError> {
        let template = self.template.as_ref().ok_or(TemplateError::TemplateMissing)?;
        let rendered = template.render(&data);
        let mut error = Error::detailed(&self.base, &rendered, "");
        if !self.message.id.trim().is_empty() {
            error.set_code(self.message.id.clone());
        }
        if let Value::Object(map) = &data {
            error.set_metadata(map.clone());
        }
        Ok(RenderedError {
            error,
            message: self.message.clone(),
            data,
        })
    }

    #[must_use]
    pub fn base(&self) -> &Error {
        &self.base
    }

    #[must_use]
    pub fn message(&self) -> &LocalizedMessage {
        &self.message
    }
}

/// One-shot render that skips explicit precompilation.
///
/// Static messages — no `{{` anywhere in the text — take a fast path
/// with no parsing at all: the literal text becomes the message and the
/// supplied data is still recorded on the result, even though nothing
/// was substituted. Templated messages compile and render as usual.
pub fn localized(base: &Error, message: &LocalizedMessage, data: impl Serialize) -> Result<RenderedError, TemplateError> {
    if message.text.is_empty() {
        return Err(TemplateError::BodyMissing);
    }
    let data = serde_json::to_value(data)?;
    if !message.text.contains("{{") {
        let mut error = Error::detailed(base, &message.text, "");
        error.set_message(message.text.clone());
        if !message.id.trim().is_empty() {
            error.set_code(message.id.clone());
        }
        return Ok(RenderedError {
            error,
            message: message.clone(),
            data,
        });
    }
    ErrorTemplate::new(base, message.clone())?.render_value(data)
}

/// [`localized`] that panics on failure, for startup-time catalogs.
///
/// # Panics
///
/// If the message fails to compile or the data is unserializable.
#[must_use]
pub fn must_localized(base: &Error, message: &LocalizedMessage, data: impl Serialize) -> RenderedError {
    match localized(base, message, data) {
        Ok(rendered) => rendered,
        Err(err) => panic!("localized error failed to render: {err}"),
    }
}

/// A rendered localized error.
///
/// Wraps the produced [`Error`] together with the originating message
/// and the exact data used to render it, for later inspection and
/// logging. Message and data are fixed at creation; concurrent renders
/// of the same definition never share state.
#[derive(Debug, Clone)]
pub struct RenderedError {
    error: Error,
    message: LocalizedMessage,
    data: Value,
}

impl RenderedError {
    /// The message this error was rendered from.
    #[must_use]
    pub fn localized_message(&self) -> &LocalizedMessage {
        &self.message
    }

    /// The data supplied at render time.
    #[must_use]
    pub fn rendered_data(&self) -> &Value {
        &self.data
    }

    #[must_use]
    pub fn into_error(self) -> Error {
        self.error
    }
}

impl std::ops::Deref for RenderedError {
    type Target = Error;

    fn deref(&self) -> &Error {
        &self.error
    }
}

impl std::ops::DerefMut for RenderedError {
    fn deref_mut(&mut self) -> &mut Error {
        &mut self.error
    }
}

impl fmt::Display for RenderedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for RenderedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}

impl Serialize for RenderedError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.error.serialize(serializer)
    }
}
