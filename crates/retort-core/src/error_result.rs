use http::StatusCode;

use crate::code::{ErrorCode, UnmappedErrorCode};

/// A failure bound to a concrete HTTP status, optionally carrying a body
///
/// `ErrorResult` (no type argument) is the untyped form used for status-only
/// failures. `ErrorResult<P>` may additionally carry a payload `P` that is
/// rendered as the response body.
///
/// The status is fixed at construction and the fields are private, so a
/// translator can trust that the producer chose it on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorResult<P = ()>(Repr<P>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr<P> {
    NoPayload(StatusCode),
    WithPayload(StatusCode, P),
}

impl<P> ErrorResult<P> {
    const fn bare(status: StatusCode) -> Self {
        Self(Repr::NoPayload(status))
    }

    const fn with_payload(status: StatusCode, payload: P) -> Self {
        Self(Repr::WithPayload(status, payload))
    }

    /// `401 Unauthorized` with an empty body
    #[must_use]
    pub const fn unauthorized() -> Self {
        Self::bare(StatusCode::UNAUTHORIZED)
    }

    /// `404 Not Found` with an empty body
    #[must_use]
    pub const fn not_found() -> Self {
        Self::bare(StatusCode::NOT_FOUND)
    }

    /// `404 Not Found` describing the failure in the body
    pub const fn not_found_with(payload: P) -> Self {
        Self::with_payload(StatusCode::NOT_FOUND, payload)
    }

    /// `400 Bad Request` with an empty body
    #[must_use]
    pub const fn bad_request() -> Self {
        Self::bare(StatusCode::BAD_REQUEST)
    }

    /// `400 Bad Request` describing the failure in the body
    pub const fn bad_request_with(payload: P) -> Self {
        Self::with_payload(StatusCode::BAD_REQUEST, payload)
    }

    /// `409 Conflict` with an empty body
    #[must_use]
    pub const fn conflict() -> Self {
        Self::bare(StatusCode::CONFLICT)
    }

    /// `409 Conflict` describing the failure in the body
    pub const fn conflict_with(payload: P) -> Self {
        Self::with_payload(StatusCode::CONFLICT, payload)
    }

    /// `422 Unprocessable Entity` describing the failure in the body
    pub const fn unprocessable_entity(payload: P) -> Self {
        Self::with_payload(StatusCode::UNPROCESSABLE_ENTITY, payload)
    }

    /// `500 Internal Server Error` describing the failure in the body
    pub const fn server_error(payload: P) -> Self {
        Self::with_payload(StatusCode::INTERNAL_SERVER_ERROR, payload)
    }

    /// Typed result whose status comes from an abstract category
    ///
    /// # Errors
    ///
    /// Returns [`UnmappedErrorCode`] if `code` has no status
    pub fn with_code(code: ErrorCode, payload: P) -> Result<Self, UnmappedErrorCode> {
        Ok(Self::with_payload(code.try_status_code()?, payload))
    }

    /// HTTP status chosen at construction
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            Repr::NoPayload(status) | Repr::WithPayload(status, _) => *status,
        }
    }

    /// Body payload, if one was supplied
    pub const fn payload(&self) -> Option<&P> {
        match &self.0 {
            Repr::NoPayload(_) => None,
            Repr::WithPayload(_, payload) => Some(payload),
        }
    }

    /// Abstract category of the stored status, when it has one
    pub fn code(&self) -> Option<ErrorCode> {
        ErrorCode::from_status(self.status())
    }

    /// Split into the status and the optional payload
    pub fn into_parts(self) -> (StatusCode, Option<P>) {
        match self.0 {
            Repr::NoPayload(status) => (status, None),
            Repr::WithPayload(status, payload) => (status, Some(payload)),
        }
    }

    /// Transform the payload while keeping the status
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> ErrorResult<Q> {
        match self.0 {
            Repr::NoPayload(status) => ErrorResult::bare(status),
            Repr::WithPayload(status, payload) => ErrorResult::with_payload(status, f(payload)),
        }
    }
}

impl<P> TryFrom<ErrorCode> for ErrorResult<P> {
    type Error = UnmappedErrorCode;

    fn try_from(code: ErrorCode) -> Result<Self, Self::Error> {
        Ok(Self::bare(code.try_status_code()?))
    }
}

/// Lift a value into a `404 Not Found` carrying it as the body
pub const fn to_not_found<P>(payload: P) -> ErrorResult<P> {
    ErrorResult::not_found_with(payload)
}

/// Lift a value into a `400 Bad Request` carrying it as the body
pub const fn to_bad_request<P>(payload: P) -> ErrorResult<P> {
    ErrorResult::bad_request_with(payload)
}

/// Lift a value into a `409 Conflict` carrying it as the body
pub const fn to_conflict<P>(payload: P) -> ErrorResult<P> {
    ErrorResult::conflict_with(payload)
}
