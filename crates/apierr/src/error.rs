use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};

/// A structured error value for service backends.
///
/// Carries an HTTP status, a stable machine-readable code, a
/// human-readable message, optional sub-errors (e.g. per-field
/// validation failures) and string-keyed metadata. Each value may wrap
/// an underlying cause, forming a finite chain exposed through
/// [`std::error::Error::source`].
///
/// Two values are "the same kind of error" iff their codes match — see
/// [`Error::is`]. Status, message and cause are irrelevant for that
/// comparison, so independently constructed values sharing a code are
/// interchangeable for control flow.
///
/// Serialization emits `code` and `message` always, `subErrors` and
/// `metadata` only when non-empty, and never the status: the status
/// belongs on the HTTP response line, not in the body.
#[derive(Clone, Debug, Serialize)]
pub struct Error {
    #[serde(skip)]
    status: StatusCode,
    code: String,
    message: String,
    /// Rendered cause-chain text, fixed at construction. Wrapping is
    /// visible in the text: each layer prefixes the layer below.
    #[serde(skip)]
    chain: String,
    #[serde(skip)]
    cause: Option<Arc<dyn StdError + Send + Sync + 'static>>,
    #[serde(rename = "subErrors", skip_serializing_if = "Vec::is_empty")]
    sub_errors: Vec<Error>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    metadata: Map<String, Value>,
}

impl Error {
    /// Create a base error with no cause.
    ///
    /// Seeds the [`catalog`](crate::catalog); applications define their
    /// own domain-specific bases the same way.
    #[must_use]
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        Self {
            status,
            chain: format!("{code} {message}"),
            code,
            message,
            cause: None,
            sub_errors: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Derive a new base from an existing one.
    ///
    /// The status is copied from `base`. A blank (empty or
    /// whitespace-only) code or message inherits the base's instead.
    /// The base itself becomes the cause.
    #[must_use]
    pub fn derived(base: &Error, code: impl Into<String>, message: impl Into<String>) -> Self {
        let mut code = code.into();
        if code.trim().is_empty() {
            code = base.code.clone();
        }
        let mut message = message.into();
        if message.trim().is_empty() {
            message = base.message.clone();
        }
        Self {
            status: base.status,
            chain: format!("{base}: {code} {message}"),
            code,
            message,
            cause: Some(Arc::new(base.clone())),
            sub_errors: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Create an instance of `base` with a specific message.
    ///
    /// Status and code are inherited unconditionally. A blank message
    /// falls back to the base's message; a non-blank detail is appended
    /// to the effective message separated by `": "`.
    #[must_use]
    pub fn detailed(base: &Error, message: &str, detail: &str) -> Self {
        let mut message = message.trim().to_owned();
        if message.is_empty() {
            message = base.message.clone();
        }
        let detail = detail.trim();
        if !detail.is_empty() {
            message = format!("{message}: {detail}");
        }
        Self {
            status: base.status,
            code: base.code.clone(),
            chain: format!("{base}: {message}"),
            message,
            cause: Some(Arc::new(base.clone())),
            sub_errors: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Wrap an arbitrary error under `base`'s status and code.
    ///
    /// If `cause` already is an [`Error`] whose code and message equal
    /// the base's, it is returned unchanged rather than wrapped a
    /// second time. Otherwise the result's message is the base's
    /// message with the cause's own message (or rendered string)
    /// appended.
    #[must_use]
    pub fn from_cause(base: &Error, cause: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        match cause.into().downcast::<Error>() {
            Ok(err) if err.code == base.code && err.message == base.message => *err,
            Ok(err) => {
                let detail = err.message.clone();
                let chain = err.to_string();
                let cause: Arc<dyn StdError + Send + Sync> = Arc::new(*err);
                Self {
                    status: base.status,
                    code: base.code.clone(),
                    message: format!("{}: {detail}", base.message),
                    chain,
                    cause: Some(cause),
                    sub_errors: Vec::new(),
                    metadata: Map::new(),
                }
            }
            Err(opaque) => {
                let rendered = opaque.to_string();
                let cause: Arc<dyn StdError + Send + Sync> = Arc::from(opaque);
                Self {
                    status: base.status,
                    code: base.code.clone(),
                    message: format!("{}: {rendered}", base.message),
                    chain: rendered,
                    cause: Some(cause),
                    sub_errors: Vec::new(),
                    metadata: Map::new(),
                }
            }
        }
    }
}

impl Error {
    /// The associated HTTP status code. Fixed at construction.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Specific errors that led to this error, in insertion order.
    #[must_use]
    pub fn sub_errors(&self) -> &[Error] {
        &self.sub_errors
    }

    pub fn set_sub_errors(&mut self, errors: Vec<Error>) {
        self.sub_errors = errors;
    }

    /// Append to the current sub-errors.
    pub fn add_sub_errors(&mut self, errors: impl IntoIterator<Item = Error>) {
        self.sub_errors.extend(errors);
    }

    #[must_use]
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: Map<String, Value>) {
        self.metadata = metadata;
    }

    /// Merge into the current metadata, overwriting on key collision.
    pub fn add_metadata(&mut self, metadata: Map<String, Value>) {
        for (key, value) in metadata {
            self.metadata.insert(key, value);
        }
    }
}

impl Error {
    /// Whether `target` is the same kind of error: codes match.
    ///
    /// Message, status and cause are deliberately ignored.
    #[must_use]
    pub fn is(&self, target: &Error) -> bool {
        self.code == target.code
    }

    /// Whether this error carries the given code.
    #[must_use]
    pub fn is_code(&self, code: &str) -> bool {
        self.code == code
    }

    /// Walk the cause chain for an error of type `T` equal to `target`.
    pub fn is_cause<T>(&self, target: &T) -> bool
    where
        T: StdError + PartialEq + 'static,
    {
        let mut current = self.source();
        while let Some(err) = current {
            if err.downcast_ref::<T>().is_some_and(|cause| cause == target) {
                return true;
            }
            current = err.source();
        }
        false
    }

    /// The first entry in the cause chain of type `T`, if any.
    #[must_use]
    pub fn find_cause<T: StdError + 'static>(&self) -> Option<&T> {
        let mut current = self.source();
        while let Some(err) = current {
            if let Some(found) = err.downcast_ref::<T>() {
                return Some(found);
            }
            current = err.source();
        }
        None
    }
}

/// Whether `err`'s chain contains an [`Error`] carrying `code`.
///
/// The first [`Error`] found decides; returns `false` when the chain
/// holds no [`Error`] at all, distinguishing "wrong code" from "not a
/// structured error".
#[must_use]
pub fn is_err_of(err: &(dyn StdError + 'static), code: &str) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(found) = e.downcast_ref::<Error>() {
            return found.code == code;
        }
        current = e.source();
    }
    false
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.chain)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.cause.as_deref() {
            Some(cause) => Some(cause),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog;

    #[derive(Debug, PartialEq)]
    struct RootCause(&'static str);

    impl fmt::Display for RootCause {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl StdError for RootCause {}

    #[test]
    fn base_error_renders_status_code_and_message() {
        let err = Error::new(StatusCode::NOT_FOUND, "NotFound", "Not found");
        assert_eq!(err.to_string(), "404: NotFound Not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.source().is_none());
    }

    #[test]
    fn is_holds_for_itself_and_same_code() {
        let err = Error::new(StatusCode::NOT_FOUND, "NotFound", "Not found");
        let twin = Error::new(StatusCode::BAD_REQUEST, "NotFound", "different message");
        assert!(err.is(&err));
        assert!(err.is(&twin));
        assert!(!err.is(&catalog::CONFLICT));
    }

    #[test]
    fn derived_inherits_blank_code_and_message() {
        let base = Error::new(StatusCode::BAD_REQUEST, "BadRequest", "Bad request");
        let derived = Error::derived(&base, "  ", "\t");
        assert_eq!(derived.code(), "BadRequest");
        assert_eq!(derived.message(), "Bad request");
        assert_eq!(derived.status(), StatusCode::BAD_REQUEST);

        let specific = Error::derived(&base, "MissingField", "A required field is missing");
        assert_eq!(specific.code(), "MissingField");
        assert!(specific.find_cause::<Error>().is_some_and(|cause| cause.is(&base)));
        assert_eq!(
            specific.to_string(),
            "400: 400: BadRequest Bad request: MissingField A required field is missing"
        );
    }

    #[test]
    fn detailed_appends_detail_to_effective_message() {
        let err = Error::detailed(&catalog::NOT_FOUND, "user not found", "id 42");
        assert_eq!(err.code(), "NotFound");
        assert_eq!(err.message(), "user not found: id 42");

        let inherited = Error::detailed(&catalog::NOT_FOUND, "  ", "id 42");
        assert_eq!(inherited.message(), "Not found: id 42");

        let plain = Error::detailed(&catalog::NOT_FOUND, "user not found", "");
        assert_eq!(plain.message(), "user not found");
    }

    #[test]
    fn from_cause_matches_base_by_code() {
        let wrapped = Error::from_cause(&catalog::NOT_FOUND, RootCause("row missing"));
        assert!(wrapped.is(&catalog::NOT_FOUND));
        assert!(!wrapped.is(&catalog::INTERNAL_SERVER_ERROR));
        assert_eq!(wrapped.message(), "Not found: row missing");
        assert_eq!(wrapped.to_string(), "404: row missing");
    }

    #[test]
    fn from_cause_is_idempotent_for_equivalent_errors() {
        let mut equivalent = Error::new(StatusCode::NOT_FOUND, "NotFound", "Not found");
        let mut meta = Map::new();
        meta.insert("table".to_owned(), json!("users"));
        equivalent.set_metadata(meta);

        let result = Error::from_cause(&catalog::NOT_FOUND, equivalent);
        // Passed through untouched: no wrapping, metadata intact.
        assert_eq!(result.message(), "Not found");
        assert_eq!(result.metadata().get("table"), Some(&json!("users")));
        assert!(result.source().is_none());
    }

    #[test]
    fn from_cause_uses_inner_message_for_structured_causes() {
        let inner = Error::detailed(&catalog::CONFLICT, "version mismatch", "");
        let wrapped = Error::from_cause(&catalog::INTERNAL_SERVER_ERROR, inner);
        assert_eq!(wrapped.code(), "InternalServerError");
        assert_eq!(
            wrapped.message(),
            "The server encountered an internal error, please retry the request: version mismatch"
        );
    }

    #[test]
    fn find_cause_returns_the_wrapped_error_unchanged() {
        let wrapped = Error::from_cause(&catalog::INTERNAL_SERVER_ERROR, RootCause("disk full"));
        let found = wrapped.find_cause::<RootCause>();
        assert_eq!(found, Some(&RootCause("disk full")));
    }

    #[test]
    fn is_cause_walks_the_chain_for_an_equal_error() {
        let wrapped = Error::from_cause(&catalog::INTERNAL_SERVER_ERROR, RootCause("disk full"));
        assert!(wrapped.is_cause(&RootCause("disk full")));
        assert!(!wrapped.is_cause(&RootCause("other")));

        // Two layers deep.
        let outer = Error::from_cause(&catalog::SERVICE_UNAVAILABLE, wrapped);
        assert!(outer.is_cause(&RootCause("disk full")));
    }

    #[test]
    fn is_err_of_requires_a_structured_error_with_the_code() {
        let plain = RootCause("plain");
        assert!(!is_err_of(&plain, "AnyCode"));

        let wrapped = Error::from_cause(&catalog::NOT_FOUND, RootCause("row missing"));
        assert!(is_err_of(&wrapped, "NotFound"));
        assert!(!is_err_of(&wrapped, "Conflict"));
    }

    #[test]
    fn add_sub_errors_appends() {
        let mut err = Error::detailed(&catalog::INVALID_INPUT, "two fields failed", "");
        err.add_sub_errors([Error::detailed(&catalog::BAD_ARGUMENT, "name is required", "")]);
        err.add_sub_errors([Error::detailed(&catalog::BAD_ARGUMENT, "age must be positive", "")]);
        assert_eq!(err.sub_errors().len(), 2);
        assert_eq!(err.sub_errors()[0].message(), "name is required");

        err.set_sub_errors(Vec::new());
        assert!(err.sub_errors().is_empty());
    }

    #[test]
    fn add_metadata_merges_and_overwrites() {
        let mut err = Error::detailed(&catalog::CONFLICT, "stale write", "");
        let mut first = Map::new();
        first.insert("attempt".to_owned(), json!(1));
        first.insert("table".to_owned(), json!("users"));
        err.add_metadata(first);

        let mut second = Map::new();
        second.insert("attempt".to_owned(), json!(2));
        err.add_metadata(second);

        assert_eq!(err.metadata().get("attempt"), Some(&json!(2)));
        assert_eq!(err.metadata().get("table"), Some(&json!("users")));
    }

    #[test]
    fn serialized_form_omits_status_and_empty_collections() {
        let err = Error::detailed(&catalog::NOT_FOUND, "user not found", "");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, json!({"code": "NotFound", "message": "user not found"}));

        let mut rich = Error::detailed(&catalog::INVALID_INPUT, "validation failed", "");
        rich.add_sub_errors([Error::detailed(&catalog::BAD_ARGUMENT, "name is required", "")]);
        let mut meta = Map::new();
        meta.insert("field".to_owned(), json!("name"));
        rich.add_metadata(meta);

        let value = serde_json::to_value(&rich).unwrap();
        assert_eq!(value["code"], "InvalidInput");
        assert_eq!(value["subErrors"][0]["message"], "name is required");
        assert_eq!(value["metadata"]["field"], "name");
        assert!(value.get("status").is_none());
    }
}
