//! Normalization of arbitrary failure values into the error model.
//!
//! Dynamic failure values surface in Rust as panic payloads
//! (`Box<dyn Any + Send>`, typically a `String` or `&str`) and boxed
//! opaque errors. These functions give call sites a total, never-
//! panicking on-ramp from either shape into the structured model, with
//! an information-hiding default: unrecognized shapes collapse to the
//! generic internal-server-error base instead of leaking their raw
//! representation.

use std::any::Any;
use std::error::Error as StdError;

use crate::Error;
use crate::catalog;

type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// Normalize a dynamic failure value into some error.
///
/// `None` stays `None`. Structured and opaque errors pass through
/// unchanged; string payloads become a plain error carrying that
/// string; anything else collapses to the internal-server-error base.
#[must_use]
pub fn to_error(value: Option<Box<dyn Any + Send>>) -> Option<BoxedError> {
    let value = value?;
    let value = match value.downcast::<Error>() {
        Ok(err) => return Some(err),
        Err(value) => value,
    };
    let value = match value.downcast::<BoxedError>() {
        Ok(err) => return Some(*err),
        Err(value) => value,
    };
    let value = match value.downcast::<String>() {
        Ok(text) => return Some(anyhow::anyhow!(*text).into()),
        Err(value) => value,
    };
    match value.downcast::<&'static str>() {
        Ok(text) => Some(anyhow::anyhow!(*text).into()),
        Err(_) => {
            tracing::debug!("collapsing unrecognized failure value to the internal server error base");
            Some(Box::new(catalog::INTERNAL_SERVER_ERROR.clone()))
        }
    }
}

/// Normalize a dynamic failure value into a structured [`Error`].
///
/// `None` stays `None` and an [`Error`] payload passes through
/// unchanged. Everything else is wrapped under the internal-server-
/// error base via [`Error::from_cause`], preserving the original cause
/// in the chain for logging.
#[must_use]
pub fn to_err(value: Option<Box<dyn Any + Send>>) -> Option<Error> {
    let value = value?;
    let value = match value.downcast::<Error>() {
        Ok(err) => return Some(*err),
        Err(value) => value,
    };
    let value = match value.downcast::<BoxedError>() {
        Ok(err) => return Some(Error::from_cause(&catalog::INTERNAL_SERVER_ERROR, *err)),
        Err(value) => value,
    };
    let value = match value.downcast::<String>() {
        Ok(text) => {
            return Some(Error::from_cause(&catalog::INTERNAL_SERVER_ERROR, anyhow::anyhow!(*text)));
        }
        Err(value) => value,
    };
    match value.downcast::<&'static str>() {
        Ok(text) => Some(Error::from_cause(&catalog::INTERNAL_SERVER_ERROR, anyhow::anyhow!(*text))),
        Err(_) => {
            tracing::warn!("wrapping unrecognized failure value as internal server error");
            Some(Error::from_cause(
                &catalog::INTERNAL_SERVER_ERROR,
                anyhow::anyhow!("unrecognized failure value"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_err_of;

    fn payload<T: Send + 'static>(value: T) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(value))
    }

    #[test]
    fn none_stays_none() {
        assert!(to_error(None).is_none());
        assert!(to_err(None).is_none());
    }

    #[test]
    fn to_error_passes_errors_through() {
        let err = Error::detailed(&catalog::NOT_FOUND, "user not found", "");
        let out = to_error(payload(err)).unwrap();
        assert!(is_err_of(out.as_ref(), "NotFound"));

        let boxed: BoxedError = anyhow::anyhow!("existing error").into();
        let out = to_error(payload(boxed)).unwrap();
        assert_eq!(out.to_string(), "existing error");
    }

    #[test]
    fn to_error_wraps_string_payloads_as_plain_errors() {
        let out = to_error(payload("stringer error".to_owned())).unwrap();
        assert_eq!(out.to_string(), "stringer error");
        assert!(!is_err_of(out.as_ref(), "InternalServerError"));

        let out = to_error(payload("static panic message")).unwrap();
        assert_eq!(out.to_string(), "static panic message");
    }

    #[test]
    fn to_error_collapses_unknown_shapes() {
        let out = to_error(payload(12345_i32)).unwrap();
        let err = out.downcast_ref::<Error>().unwrap();
        assert!(err.is(&catalog::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn to_err_passes_structured_errors_through() {
        let err = Error::detailed(&catalog::BAD_REQUEST, "bad header", "");
        let out = to_err(payload(err)).unwrap();
        assert_eq!(out.code(), "BadRequest");
        assert_eq!(out.message(), "bad header");
    }

    #[test]
    fn to_err_wraps_opaque_errors_under_internal_server_error() {
        let boxed: BoxedError = anyhow::anyhow!("std error").into();
        let out = to_err(payload(boxed)).unwrap();
        assert_eq!(out.code(), "InternalServerError");
        assert_eq!(out.status(), http::StatusCode::INTERNAL_SERVER_ERROR);

        let out = to_err(payload(12345_i32)).unwrap();
        assert_eq!(out.code(), "InternalServerError");
    }
}
