//! Rendering [`Reply`] with axum and resolving named-route locations

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use axum::{Json, Router};
use http::header::LOCATION;
use http::{HeaderValue, StatusCode};
use serde::Serialize;
use url::Url;

use crate::reply::{Body, Location, Reply};
use crate::route::{RouteError, RouteLink, RouteTable};

impl<T, P> IntoResponse for Reply<T, P>
where
    T: Serialize,
    P: Serialize,
{
    fn into_response(self) -> Response {
        let (status, body, location) = self.into_parts();

        let mut response = match body {
            Body::Empty => status.into_response(),
            Body::Success(value) => (status, Json(value)).into_response(),
            Body::Error(payload) => (status, Json(payload)).into_response(),
        };

        match location {
            Some(Location::Uri(uri)) => match HeaderValue::try_from(uri) {
                Ok(value) => {
                    response.headers_mut().insert(LOCATION, value);
                }
                Err(e) => {
                    tracing::error!(error = %e, "location is not a valid header value");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            },
            // Resolved by `resolve_locations` once the response leaves the handler
            Some(Location::Route(link)) => {
                response.extensions_mut().insert(link);
            }
            None => {}
        }

        response
    }
}

/// Route table plus the optional public base URL for absolute locations
#[derive(Debug, Clone)]
pub struct Links {
    routes: Arc<RouteTable>,
    base_url: Option<Url>,
}

impl Links {
    pub fn new(routes: RouteTable, base_url: Option<Url>) -> Self {
        Self {
            routes: Arc::new(routes),
            base_url,
        }
    }

    /// Turn a link into the `Location` header value
    ///
    /// # Errors
    ///
    /// Returns the [`RouteError`] from resolving the link
    pub fn location_for(&self, link: &RouteLink) -> Result<String, RouteError> {
        let path = self.routes.resolve(link)?;

        Ok(match &self.base_url {
            Some(base) => format!("{}{path}", base.as_str().trim_end_matches('/')),
            None => path,
        })
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

/// Middleware that turns [`RouteLink`] response extensions into `Location` headers
///
/// A link that cannot be resolved means the handler and the route table
/// disagree; the response is replaced with a bare `500`.
pub async fn resolve_locations(State(links): State<Links>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let Some(link) = response.extensions_mut().remove::<RouteLink>() else {
        return response;
    };

    let location = match links.location_for(&link) {
        Ok(location) => location,
        Err(e) => {
            tracing::error!(route = %link.name(), error = %e, "failed to resolve location");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match HeaderValue::try_from(location) {
        Ok(value) => {
            response.headers_mut().insert(LOCATION, value);
            response
        }
        Err(e) => {
            tracing::error!(route = %link.name(), error = %e, "resolved location is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Router that records a name for each route it registers
///
/// Names feed the [`RouteTable`] used to resolve created-at-route locations.
pub struct NamedRouter<S = ()> {
    router: Router<S>,
    routes: RouteTable,
}

impl<S> Default for NamedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> NamedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            routes: RouteTable::new(),
        }
    }

    /// Add an unnamed route
    #[must_use]
    pub fn route(mut self, path: &str, method_router: MethodRouter<S>) -> Self {
        self.router = self.router.route(path, method_router);
        self
    }

    /// Add a route and register its path under `name`
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] if the name is taken or the path is not a
    /// valid template
    pub fn route_named(mut self, name: &str, path: &str, method_router: MethodRouter<S>) -> Result<Self, RouteError> {
        self.routes.insert(name, path)?;
        self.router = self.router.route(path, method_router);
        Ok(self)
    }

    /// Finish the router, installing [`resolve_locations`]
    pub fn finish(self, base_url: Option<Url>) -> Router<S> {
        let links = Links::new(self.routes, base_url);
        self.router
            .layer(middleware::from_fn_with_state(links, resolve_locations))
    }

    /// Split into the bare router and the route table
    pub fn into_parts(self) -> (Router<S>, RouteTable) {
        (self.router, self.routes)
    }
}
