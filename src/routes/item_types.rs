use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{domain::{ItemTypePatch, NewItemType}, lifecycle::Lifecycle, store::Store};

use super::{run_lifecycle, ApiError};

#[tracing::instrument(
    "Listing item types",
    skip(lifecycle)
)]
pub async fn list_item_types<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>
) -> Result<HttpResponse, ApiError> {
    let item_types = run_lifecycle(lifecycle, |l| l.list_item_types()).await?;
    Ok(HttpResponse::Ok().json(item_types))
}

#[tracing::instrument(
    "Posting item type",
    skip(lifecycle)
)]
pub async fn post_item_type<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    json: web::Json<NewItemType>
) -> Result<HttpResponse, ApiError> {
    let item_type = run_lifecycle(lifecycle, move |l| l.create_item_type(json.into_inner())).await?;
    Ok(HttpResponse::Created().json(item_type))
}

#[tracing::instrument(
    "Updating item type",
    skip(lifecycle)
)]
pub async fn update_item_type<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>,
    json: web::Json<ItemTypePatch>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let item_type = run_lifecycle(lifecycle, move |l| l.update_item_type(id, json.into_inner())).await?;
    Ok(HttpResponse::Ok().json(item_type))
}

#[tracing::instrument(
    "Deleting item type",
    skip(lifecycle)
)]
pub async fn delete_item_type<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    run_lifecycle(lifecycle, move |l| l.delete_item_type(id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
