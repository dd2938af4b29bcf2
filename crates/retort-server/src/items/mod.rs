//! Item catalog endpoints

mod handlers;
pub mod model;
mod store;

use axum::routing::{get, post, put};
use retort_core::{NamedRouter, RouteError};

pub use store::ItemStore;

use crate::AppState;

/// Route name used for `Location` headers of created items
pub const GET_ITEM: &str = "get_item";

/// Register the item routes
///
/// # Errors
///
/// Returns a [`RouteError`] if a route name is registered twice
pub fn routes(router: NamedRouter<AppState>) -> Result<NamedRouter<AppState>, RouteError> {
    Ok(router
        .route_named(
            GET_ITEM,
            "/items/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )?
        .route("/items", post(handlers::create_item))
        .route("/items/import", post(handlers::import_items))
        .route("/items/{id}/archive", post(handlers::archive_item))
        .route("/items/{id}/tags/{tag}", put(handlers::add_tag)))
}
