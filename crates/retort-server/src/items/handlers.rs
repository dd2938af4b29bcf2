use axum::extract::State;
use http::HeaderMap;
use retort_core::{ErrorCode, ErrorResult, Reply, ResultReplyExt, RouteValues, to_no_content_unless_error};
use uuid::Uuid;

use super::GET_ITEM;
use super::model::{ArchiveTicket, ImportRequest, ImportSummary, Item, ItemUpdate, NewItem};
use crate::AppState;
use crate::auth::require_api_key;
use crate::error::ApiError;
use crate::extract::{Json, Path};

/// `GET /items/{id}`
pub async fn get_item(State(state): State<AppState>, Path(id): Path<Uuid>) -> Reply<Item> {
    state.store.get(id).to_ok_or_error()
}

/// `POST /items`
pub async fn create_item(State(state): State<AppState>, Json(new_item): Json<NewItem>) -> Reply<Item, ApiError> {
    let result = state.store.create(new_item);

    match &result {
        Ok(item) => tracing::info!(item_id = %item.id, name = %item.name, "item created"),
        Err(e) => tracing::debug!(error = %e, "item rejected"),
    }

    result
        .map_err(ErrorResult::from)
        .to_created_at_route_or_error(GET_ITEM, |item| RouteValues::new().with("id", item.id))
}

/// `POST /items/import`
pub async fn import_items(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Reply<ImportSummary, ApiError> {
    let requested = request.items.len();
    let result = state.store.import(request.items);

    match &result {
        Ok(created) => tracing::info!(count = created.len(), "items imported"),
        Err(e) => tracing::debug!(requested, error = %e, "import rolled back"),
    }

    result
        .map(|created| ImportSummary { created })
        .map_err(ErrorResult::from)
        .to_created_or_error()
}

/// `PUT /items/{id}`
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<ItemUpdate>,
) -> Reply<Item, ApiError> {
    state
        .store
        .update(id, update)
        .map_err(ErrorResult::from)
        .to_no_content_or_error()
}

/// `DELETE /items/{id}`
///
/// Deletion returns nothing, so only a failure is carried: no error means
/// `204 No Content`.
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<Uuid>, headers: HeaderMap) -> Reply<(), ApiError> {
    let error = require_api_key(state.api_key.as_ref(), &headers).or_else(|| {
        state
            .store
            .remove(id)
            .inspect(|item| tracing::info!(item_id = %item.id, "item deleted"))
            .err()
            .map(ErrorResult::from)
    });

    to_no_content_unless_error(error)
}

/// `POST /items/{id}/archive`
pub async fn archive_item(State(state): State<AppState>, Path(id): Path<Uuid>) -> Reply<ArchiveTicket> {
    let result = state.store.archive(id);

    if let Ok(ref ticket) = result {
        tracing::info!(item_id = %id, ticket_id = %ticket.ticket_id, "archive accepted");
    }

    result.to_accepted_or_error()
}

/// `PUT /items/{id}/tags/{tag}`
pub async fn add_tag(State(state): State<AppState>, Path((id, tag)): Path<(Uuid, String)>) -> Reply<(), ()> {
    let result: Result<(), ErrorCode> = state.store.add_tag(id, &tag);
    result.to_created_without_body_or_error()
}
