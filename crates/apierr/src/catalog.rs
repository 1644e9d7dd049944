//! Predefined base errors spanning the standard HTTP status categories.
//!
//! Every entry is constructed once, on first access, and never mutated;
//! sharing them across threads needs no synchronization. Derive
//! request-specific values with [`Error::detailed`] or
//! [`Error::from_cause`], or extend the catalog by building additional
//! bases with [`Error::new`].

use std::sync::LazyLock;

use http::StatusCode;

use crate::Error;

/// Client closed the connection before the response arrived (nginx
/// convention, no `http::StatusCode` constant).
pub const STATUS_CLIENT_CLOSED_REQUEST: u16 = 499;

pub static BAD_REQUEST: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::BAD_REQUEST, "BadRequest", "Bad request"));

pub static BAD_ARGUMENT: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::BAD_REQUEST, "BadArgument", "Bad argument"));

pub static INVALID_INPUT: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::BAD_REQUEST, "InvalidInput", "Some request inputs are not valid"));

pub static INVALID_OPERATION: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::BAD_REQUEST, "InvalidOperation", "The attempted operation is invalid"));

pub static PASSWORD_TOO_WEAK: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::BAD_REQUEST, "PasswordTooWeak", "The specified password is too weak"));

pub static UNAUTHORIZED: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::UNAUTHORIZED, "Unauthorized", "Unauthorized"));

pub static INVALID_LOGIN_CREDENTIAL: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::UNAUTHORIZED,
        "InvalidLoginCredential",
        "The login credential is invalid",
    )
});

pub static ALREADY_LOGGED_IN: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::UNAUTHORIZED,
        "AlreadyLoggedIn",
        "User already logged in in another place",
    )
});

pub static INVALID_AUTHENTICATION_INFO: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::UNAUTHORIZED,
        "InvalidAuthenticationInfo",
        "The authentication information is invalid",
    )
});

pub static FORBIDDEN: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::FORBIDDEN, "Forbidden", "Forbidden"));

pub static AUTHENTICATION_FAILED: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::FORBIDDEN,
        "AuthenticationFailed",
        "Server failed to authenticate the request. Make sure the authentication information is correct",
    )
});

pub static INSUFFICIENT_ACCOUNT_PERMISSIONS: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::FORBIDDEN,
        "InsufficientAccountPermissions",
        "The account being accessed does not have sufficient permissions to execute this operation",
    )
});

pub static NOT_FOUND: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::NOT_FOUND, "NotFound", "Not found"));

pub static ENDPOINT_NOT_FOUND: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::NOT_FOUND, "EndpointNotFound", "The requested endpoint does not exist"));

pub static RESOURCE_NOT_FOUND: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::NOT_FOUND, "ResourceNotFound", "The specified resource does not exist"));

pub static METHOD_NOT_ALLOWED: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::METHOD_NOT_ALLOWED, "MethodNotAllowed", "Method not allowed"));

pub static TIMEOUT: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::REQUEST_TIMEOUT, "Timeout", "Timeout"));

pub static REQUEST_TIMEOUT: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::REQUEST_TIMEOUT, "RequestTimeout", "Request timeout"));

pub static CONFLICT: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::CONFLICT, "Conflict", "Conflict"));

pub static RESOURCE_ALREADY_EXISTS: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::CONFLICT,
        "ResourceAlreadyExists",
        "The specified resource already exists",
    )
});

pub static ACCOUNT_ALREADY_EXISTS: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::CONFLICT,
        "AccountAlreadyExists",
        "The specified account already exists",
    )
});

pub static PRECONDITION_FAILED: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::PRECONDITION_FAILED, "PreconditionFailed", "Precondition failed"));

pub static PAYLOAD_TOO_LARGE: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::PAYLOAD_TOO_LARGE, "PayloadTooLarge", "Payload too large"));

pub static REQUEST_ENTITY_TOO_LARGE: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::PAYLOAD_TOO_LARGE,
        "RequestEntityTooLarge",
        "Request entity too large",
    )
});

pub static TOO_MANY_REQUESTS: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::TOO_MANY_REQUESTS, "TooManyRequests", "Too many requests"));

pub static CLIENT_CLOSED_REQUEST: LazyLock<Error> = LazyLock::new(|| {
    let status = StatusCode::from_u16(STATUS_CLIENT_CLOSED_REQUEST).expect("499 is a valid status code");
    Error::new(status, "ClientClosedRequest", "Client closed request")
});

pub static INTERNAL_ERROR: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "InternalError",
        "The system encountered an internal error",
    )
});

pub static INTERNAL_SERVER_ERROR: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "InternalServerError",
        "The server encountered an internal error, please retry the request",
    )
});

pub static SERVICE_UNAVAILABLE: LazyLock<Error> =
    LazyLock::new(|| Error::new(StatusCode::SERVICE_UNAVAILABLE, "ServiceUnavailable", "Service unavailable"));

pub static SERVER_BUSY: LazyLock<Error> = LazyLock::new(|| {
    Error::new(
        StatusCode::SERVICE_UNAVAILABLE,
        "ServerBusy",
        "The server is currently unable to receive requests. Please retry your request",
    )
});

/// Representative base error for a status code, for transport layers
/// that only have a status to go on.
#[must_use]
pub fn for_status(status: StatusCode) -> Option<&'static Error> {
    match status.as_u16() {
        400 => Some(&BAD_REQUEST),
        401 => Some(&UNAUTHORIZED),
        403 => Some(&FORBIDDEN),
        404 => Some(&NOT_FOUND),
        405 => Some(&METHOD_NOT_ALLOWED),
        408 => Some(&REQUEST_TIMEOUT),
        409 => Some(&CONFLICT),
        412 => Some(&PRECONDITION_FAILED),
        413 => Some(&REQUEST_ENTITY_TOO_LARGE),
        429 => Some(&TOO_MANY_REQUESTS),
        500 => Some(&INTERNAL_SERVER_ERROR),
        503 => Some(&SERVICE_UNAVAILABLE),
        _ => None,
    }
}
