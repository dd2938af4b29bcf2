//! Translators from result containers to [`Reply`] descriptors
//!
//! The function name fixes the success shape; the error side always goes
//! through [`IntoErrorReply`]. Each translator is pure: equal inputs give
//! equal replies.

use http::StatusCode;

use crate::code::ErrorCode;
use crate::error_result::ErrorResult;
use crate::reply::{Body, Location, Reply};
use crate::route::{RouteLink, RouteValues};

/// Rendering rule for the error case of a result container
pub trait IntoErrorReply {
    /// Payload type rendered as the error body
    type Payload;

    /// Build the error reply for this value
    fn into_error_reply<T>(self) -> Reply<T, Self::Payload>;
}

impl IntoErrorReply for ErrorCode {
    type Payload = ();

    /// Status from the canonical mapping, empty body
    ///
    /// # Panics
    ///
    /// Panics if the code has no status ([`ErrorCode::None`]). Such a code
    /// reaching a translator is a producer bug and is never defaulted.
    fn into_error_reply<T>(self) -> Reply<T, ()> {
        Reply::status_only(self.status_code())
    }
}

impl<P> IntoErrorReply for ErrorResult<P> {
    type Payload = P;

    /// Stored status; the stored payload as body, or no body
    fn into_error_reply<T>(self) -> Reply<T, P> {
        match self.into_parts() {
            (status, Some(payload)) => Reply::new(status, Body::Error(payload)),
            (status, None) => Reply::status_only(status),
        }
    }
}

/// `200 OK` with the value, or the rendered error
pub fn to_ok_or_error<T, E: IntoErrorReply>(result: Result<T, E>) -> Reply<T, E::Payload> {
    match result {
        Ok(value) => Reply::new(StatusCode::OK, Body::Success(value)),
        Err(error) => error.into_error_reply(),
    }
}

/// `204 No Content` whatever the value, or the rendered error
pub fn to_no_content_or_error<T, E: IntoErrorReply>(result: Result<T, E>) -> Reply<T, E::Payload> {
    match result {
        Ok(_) => Reply::status_only(StatusCode::NO_CONTENT),
        Err(error) => error.into_error_reply(),
    }
}

/// `204 No Content` when there is no error, otherwise the rendered error
///
/// Inverted polarity: the *present* value is the failure and absence means
/// the operation succeeded. Meant for operations such as deletes that have
/// nothing to return.
pub fn to_no_content_unless_error<E: IntoErrorReply>(error: Option<E>) -> Reply<(), E::Payload> {
    match error {
        Some(error) => error.into_error_reply(),
        None => Reply::status_only(StatusCode::NO_CONTENT),
    }
}

/// `201 Created` with the value and a `Location` pointing at a named route
///
/// `route_values` maps the created value to the route's placeholder values.
/// The link is resolved by the HTTP layer.
pub fn to_created_at_route_or_error<T, E, F>(
    result: Result<T, E>,
    route_name: impl Into<String>,
    route_values: F,
) -> Reply<T, E::Payload>
where
    E: IntoErrorReply,
    F: FnOnce(&T) -> RouteValues,
{
    match result {
        Ok(value) => {
            let link = RouteLink::new(route_name, route_values(&value));
            Reply::new(StatusCode::CREATED, Body::Success(value)).at(Location::Route(link))
        }
        Err(error) => error.into_error_reply(),
    }
}

/// `201 Created` with the value and no `Location`, or the rendered error
pub fn to_created_or_error<T, E: IntoErrorReply>(result: Result<T, E>) -> Reply<T, E::Payload> {
    match result {
        Ok(value) => Reply::new(StatusCode::CREATED, Body::Success(value)),
        Err(error) => error.into_error_reply(),
    }
}

/// `201 Created` with an empty body, or the rendered error
pub fn to_created_without_body_or_error<T, E: IntoErrorReply>(result: Result<T, E>) -> Reply<T, E::Payload> {
    match result {
        Ok(_) => Reply::status_only(StatusCode::CREATED),
        Err(error) => error.into_error_reply(),
    }
}

/// `202 Accepted` with the value, or the rendered error
pub fn to_accepted_or_error<T, E: IntoErrorReply>(result: Result<T, E>) -> Reply<T, E::Payload> {
    match result {
        Ok(value) => Reply::new(StatusCode::ACCEPTED, Body::Success(value)),
        Err(error) => error.into_error_reply(),
    }
}

/// Method-call access to the translators for `Result`
pub trait ResultReplyExt<T, E: IntoErrorReply> {
    fn to_ok_or_error(self) -> Reply<T, E::Payload>;

    fn to_no_content_or_error(self) -> Reply<T, E::Payload>;

    fn to_created_at_route_or_error<F>(self, route_name: impl Into<String>, route_values: F) -> Reply<T, E::Payload>
    where
        F: FnOnce(&T) -> RouteValues;

    fn to_created_or_error(self) -> Reply<T, E::Payload>;

    fn to_created_without_body_or_error(self) -> Reply<T, E::Payload>;

    fn to_accepted_or_error(self) -> Reply<T, E::Payload>;
}

impl<T, E: IntoErrorReply> ResultReplyExt<T, E> for Result<T, E> {
    fn to_ok_or_error(self) -> Reply<T, E::Payload> {
        to_ok_or_error(self)
    }

    fn to_no_content_or_error(self) -> Reply<T, E::Payload> {
        to_no_content_or_error(self)
    }

    fn to_created_at_route_or_error<F>(self, route_name: impl Into<String>, route_values: F) -> Reply<T, E::Payload>
    where
        F: FnOnce(&T) -> RouteValues,
    {
        to_created_at_route_or_error(self, route_name, route_values)
    }

    fn to_created_or_error(self) -> Reply<T, E::Payload> {
        to_created_or_error(self)
    }

    fn to_created_without_body_or_error(self) -> Reply<T, E::Payload> {
        to_created_without_body_or_error(self)
    }

    fn to_accepted_or_error(self) -> Reply<T, E::Payload> {
        to_accepted_or_error(self)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::error_result::{to_bad_request, to_conflict, to_not_found};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct User {
        id: u32,
        name: &'static str,
    }

    fn alice() -> User {
        User { id: 42, name: "alice" }
    }

    #[test]
    fn error_code_renders_status_only() {
        for code in ErrorCode::iter().filter(|c| *c != ErrorCode::None) {
            let reply = to_ok_or_error(Err::<User, _>(code));
            assert_eq!(reply.status(), code.status_code());
            assert!(reply.body().is_empty());
            assert!(reply.location().is_none());
        }
    }

    #[test]
    fn missing_user_is_404_without_body() {
        let reply = to_ok_or_error(Err::<User, _>(ErrorCode::NotFound));
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);
        assert_eq!(reply.body(), &Body::Empty);
    }

    #[test]
    #[should_panic(expected = "has no HTTP status mapping")]
    fn none_code_panics_in_ok_translator() {
        let _ = to_ok_or_error(Err::<User, _>(ErrorCode::None));
    }

    #[test]
    #[should_panic(expected = "has no HTTP status mapping")]
    fn none_code_panics_in_inverted_translator() {
        let _ = to_no_content_unless_error(Some(ErrorCode::None));
    }

    #[test]
    fn error_result_renders_stored_status_and_payload() {
        let cases = [
            to_not_found("missing"),
            to_bad_request("missing"),
            to_conflict("missing"),
            ErrorResult::unprocessable_entity("missing"),
            ErrorResult::server_error("missing"),
            ErrorResult::unauthorized(),
            ErrorResult::not_found(),
        ];

        for error in cases {
            let expected_status = error.status();
            let expected_body = error.payload().map_or(Body::Empty, |p| Body::Error(*p));

            let reply = to_ok_or_error(Err::<User, _>(error));
            assert_eq!(reply.status(), expected_status);
            assert_eq!(reply.body(), &expected_body);
        }
    }

    #[test]
    fn conflict_payload_becomes_body() {
        let reply = to_created_or_error(Err::<User, _>(to_conflict("dup-key")));
        assert_eq!(reply.status(), StatusCode::CONFLICT);
        assert_eq!(reply.error(), Some(&"dup-key"));
        assert!(reply.success().is_none());
    }

    #[test]
    fn ok_carries_value() {
        let reply = to_ok_or_error(Ok::<_, ErrorCode>(alice()));
        assert_eq!(reply.status(), StatusCode::OK);
        assert_eq!(reply.success(), Some(&alice()));
    }

    #[test]
    fn accepted_carries_value() {
        let reply = to_accepted_or_error(Ok::<_, ErrorResult<String>>(alice()));
        assert_eq!(reply.status(), StatusCode::ACCEPTED);
        assert_eq!(reply.body(), &Body::Success(alice()));
    }

    #[test]
    fn created_carries_value_without_location() {
        let reply = to_created_or_error(Ok::<_, ErrorCode>(alice()));
        assert_eq!(reply.status(), StatusCode::CREATED);
        assert_eq!(reply.success(), Some(&alice()));
        assert!(reply.location().is_none());
    }

    #[test]
    fn created_without_body_drops_value() {
        let reply = to_created_without_body_or_error(Ok::<_, ErrorCode>(alice()));
        assert_eq!(reply.status(), StatusCode::CREATED);
        assert!(reply.body().is_empty());

        let reply = to_created_without_body_or_error(Err::<User, _>(ErrorCode::Conflict));
        assert_eq!(reply.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn created_at_route_links_to_route() {
        let reply = to_created_at_route_or_error(Ok::<_, ErrorCode>(alice()), "get_user", |user| {
            RouteValues::new().with("id", user.id)
        });

        assert_eq!(reply.status(), StatusCode::CREATED);
        assert_eq!(reply.success(), Some(&alice()));
        assert_eq!(
            reply.location(),
            Some(&Location::Route(RouteLink::new("get_user", RouteValues::new().with("id", 42))))
        );
    }

    #[test]
    fn created_at_route_skips_values_on_error() {
        let reply = to_created_at_route_or_error(Err::<User, _>(to_conflict("taken")), "get_user", |_| {
            panic!("route values must not be computed for an error")
        });

        assert_eq!(reply.status(), StatusCode::CONFLICT);
        assert!(reply.location().is_none());
    }

    #[test]
    fn no_content_ignores_value() {
        let reply = to_no_content_or_error(Ok::<_, ErrorCode>(alice()));
        assert_eq!(reply.status(), StatusCode::NO_CONTENT);
        assert!(reply.body().is_empty());

        let reply = to_no_content_or_error(Err::<User, _>(ErrorCode::BadRequest));
        assert_eq!(reply.status(), StatusCode::BAD_REQUEST);
        assert!(reply.body().is_empty());
    }

    #[test]
    fn inverted_polarity_present_value_is_failure() {
        let reply = to_no_content_unless_error(Some(ErrorCode::NotFound));
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);
        assert!(reply.body().is_empty());

        let reply = to_no_content_unless_error(Some(to_conflict("still referenced")));
        assert_eq!(reply.status(), StatusCode::CONFLICT);
        assert_eq!(reply.error(), Some(&"still referenced"));
    }

    #[test]
    fn inverted_polarity_absence_is_success() {
        let reply = to_no_content_unless_error(None::<ErrorCode>);
        assert_eq!(reply.status(), StatusCode::NO_CONTENT);
        assert!(reply.body().is_empty());

        let reply = to_no_content_unless_error(None::<ErrorResult<String>>);
        assert_eq!(reply.status(), StatusCode::NO_CONTENT);
        assert!(reply.error().is_none());
    }

    #[test]
    fn translators_are_idempotent() {
        let ok: Result<User, ErrorResult<&str>> = Ok(alice());
        let err: Result<User, ErrorResult<&str>> = Err(to_bad_request("bad"));

        for result in [ok, err] {
            assert_eq!(to_ok_or_error(result.clone()), to_ok_or_error(result.clone()));
            assert_eq!(to_accepted_or_error(result.clone()), to_accepted_or_error(result.clone()));
            assert_eq!(
                to_created_at_route_or_error(result.clone(), "get_user", |u| RouteValues::new().with("id", u.id)),
                to_created_at_route_or_error(result.clone(), "get_user", |u| RouteValues::new().with("id", u.id)),
            );
            assert_eq!(to_created_or_error(result.clone()), to_created_or_error(result.clone()));
            assert_eq!(
                to_created_without_body_or_error(result.clone()),
                to_created_without_body_or_error(result.clone()),
            );
            assert_eq!(to_no_content_or_error(result.clone()), to_no_content_or_error(result));
        }

        for error in [None, Some(to_conflict("dup-key"))] {
            assert_eq!(
                to_no_content_unless_error(error.clone()),
                to_no_content_unless_error(error),
            );
        }
    }

    #[test]
    fn extension_methods_delegate() {
        let found: Result<User, ErrorCode> = Ok(alice());
        assert_eq!(found.clone().to_ok_or_error(), to_ok_or_error(found.clone()));
        assert_eq!(found.clone().to_accepted_or_error(), to_accepted_or_error(found.clone()));
        assert_eq!(found.clone().to_no_content_or_error(), to_no_content_or_error(found.clone()));
        assert_eq!(found.clone().to_created_or_error(), to_created_or_error(found.clone()));
        assert_eq!(
            found.clone().to_created_without_body_or_error(),
            to_created_without_body_or_error(found.clone())
        );

        let reply = found.to_created_at_route_or_error("get_user", |u| RouteValues::new().with("name", u.name));
        assert_eq!(
            reply.location(),
            Some(&Location::Route(RouteLink::new("get_user", RouteValues::new().with("name", "alice"))))
        );
    }
}
