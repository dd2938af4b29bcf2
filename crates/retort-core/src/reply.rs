use http::StatusCode;

use crate::route::RouteLink;

/// Body of a [`Reply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<T, P> {
    /// No body
    Empty,
    /// The success value
    Success(T),
    /// The payload of an error result
    Error(P),
}

impl<T, P> Body<T, P> {
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Where a created resource can be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A literal URI
    Uri(String),
    /// A named route, resolved by the HTTP layer
    Route(RouteLink),
}

/// Transport-level response description produced by the translators
///
/// `T` is the success body type and `P` the error payload type. Framework
/// rendering lives behind the `axum` feature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Reply<T, P = ()> {
    status: StatusCode,
    body: Body<T, P>,
    location: Option<Location>,
}

impl<T, P> Reply<T, P> {
    pub(crate) const fn new(status: StatusCode, body: Body<T, P>) -> Self {
        Self {
            status,
            body,
            location: None,
        }
    }

    pub(crate) fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// A status-only reply
    pub const fn status_only(status: StatusCode) -> Self {
        Self::new(status, Body::Empty)
    }

    /// Attach a literal `Location` URI
    pub fn with_location(self, uri: impl Into<String>) -> Self {
        self.at(Location::Uri(uri.into()))
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn body(&self) -> &Body<T, P> {
        &self.body
    }

    pub const fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// The success value, if this reply carries one
    pub const fn success(&self) -> Option<&T> {
        match &self.body {
            Body::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The error payload, if this reply carries one
    pub const fn error(&self) -> Option<&P> {
        match &self.body {
            Body::Error(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn into_parts(self) -> (StatusCode, Body<T, P>, Option<Location>) {
        (self.status, self.body, self.location)
    }
}
