//! Render "value or error" results as HTTP responses
//!
//! Handlers return a `Result<T, E>` (or, for operations with nothing to
//! return, an `Option<E>`) and pick the translator matching the HTTP
//! semantics they want. The error side is either a bare [`ErrorCode`] or an
//! [`ErrorResult`] that fixes the status and may carry a body.
//!
//! ```
//! use retort_core::{ErrorCode, ResultReplyExt, to_conflict};
//!
//! let reply = Err::<String, _>(ErrorCode::NotFound).to_ok_or_error();
//! assert_eq!(reply.status().as_u16(), 404);
//!
//! let reply = Err::<String, _>(to_conflict("dup-key")).to_created_or_error();
//! assert_eq!(reply.status().as_u16(), 409);
//! assert_eq!(reply.error(), Some(&"dup-key"));
//! ```

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod code;
mod error_result;
mod reply;
#[cfg(feature = "axum")]
mod response;
pub mod route;
mod translate;

pub use code::{ErrorCode, UnmappedErrorCode};
pub use error_result::{ErrorResult, to_bad_request, to_conflict, to_not_found};
pub use reply::{Body, Location, Reply};
#[cfg(feature = "axum")]
pub use response::{Links, NamedRouter, resolve_locations};
pub use route::{RouteError, RouteLink, RouteTable, RouteValues};
pub use translate::{
    IntoErrorReply, ResultReplyExt, to_accepted_or_error, to_created_at_route_or_error, to_created_or_error,
    to_created_without_body_or_error, to_no_content_or_error, to_no_content_unless_error, to_ok_or_error,
};
