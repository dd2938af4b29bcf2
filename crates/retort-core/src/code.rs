use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Abstract failure category, independent of any transport
///
/// `None` is a sentinel for containers whose error slot means "nothing went
/// wrong". It has no status and must never reach the rendering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    /// The addressed resource does not exist
    NotFound,
    /// The request was malformed or failed validation
    BadRequest,
    /// The request conflicts with the current resource state
    Conflict,
    /// No error; carries no status
    None,
}

/// An [`ErrorCode`] that has no HTTP status was used where one is required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("error code `{code}` has no HTTP status mapping")]
pub struct UnmappedErrorCode {
    /// The offending code
    pub code: ErrorCode,
}

impl ErrorCode {
    /// Canonical HTTP status for this category
    ///
    /// # Errors
    ///
    /// Returns [`UnmappedErrorCode`] for [`ErrorCode::None`]
    pub const fn try_status_code(self) -> Result<StatusCode, UnmappedErrorCode> {
        match self {
            Self::NotFound => Ok(StatusCode::NOT_FOUND),
            Self::BadRequest => Ok(StatusCode::BAD_REQUEST),
            Self::Conflict => Ok(StatusCode::CONFLICT),
            Self::None => Err(UnmappedErrorCode { code: self }),
        }
    }

    /// Canonical HTTP status for this category
    ///
    /// # Panics
    ///
    /// Panics for [`ErrorCode::None`]. Handing an unmapped code to the
    /// renderer is a bug in the producer, not a recoverable failure.
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        match self.try_status_code() {
            Ok(status) => status,
            Err(e) => panic!("{e}"),
        }
    }

    /// Category for a status, if the status corresponds to one
    #[must_use]
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::NOT_FOUND => Some(Self::NotFound),
            StatusCode::BAD_REQUEST => Some(Self::BadRequest),
            StatusCode::CONFLICT => Some(Self::Conflict),
            _ => None,
        }
    }
}
