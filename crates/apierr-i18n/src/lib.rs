//! Localized error messages rendered from templates.
//!
//! Extends [`apierr`] with a template layer: compile a localized
//! message once at startup ([`ErrorTemplate`]), render it per request
//! into an immutable [`RenderedError`] carrying the produced
//! [`apierr::Error`], the originating message and the render data.
//! Static messages can skip compilation entirely through the one-shot
//! [`localized`] helper.
//!
//! ```
//! use apierr::catalog;
//! use apierr_i18n::{ErrorTemplate, LocalizedMessage};
//!
//! let template = ErrorTemplate::must_new(
//!     &catalog::NOT_FOUND,
//!     LocalizedMessage::new("UserNotFound", "User {{.Name}} not found"),
//! );
//! let err = template.must_render(serde_json::json!({"Name": "Alice"}));
//! assert_eq!(err.message(), "User Alice not found");
//! assert_eq!(err.code(), "UserNotFound");
//! ```

mod error;
mod message;
mod render;
mod template;

pub use error::TemplateError;
pub use message::LocalizedMessage;
pub use render::{ErrorTemplate, RenderedError, localized, must_localized};
