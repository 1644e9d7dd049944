//! Structured error values for service backends.
//!
//! A canonical error representation carrying an HTTP status, a stable
//! machine-readable code, a human-readable message, nested sub-errors
//! and arbitrary metadata, plus conversion helpers that normalize
//! arbitrary failure values into it. Errors with the same code are the
//! same kind of error regardless of how they were built; transport
//! layers branch on [`Error::is`] / [`is_err_of`] and serialize the
//! value for the response body.
//!
//! ```
//! use apierr::{Error, catalog, is_err_of};
//!
//! let err = Error::detailed(&catalog::NOT_FOUND, "user not found", "id 42");
//! assert_eq!(err.status(), http::StatusCode::NOT_FOUND);
//! assert_eq!(err.message(), "user not found: id 42");
//! assert!(err.is(&catalog::NOT_FOUND));
//! assert!(is_err_of(&err, "NotFound"));
//! ```

pub mod catalog;
mod convert;
mod error;

pub use convert::{to_err, to_error};
pub use error::{Error, is_err_of};
