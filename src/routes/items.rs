use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{domain::{ItemPatch, NewItem}, lifecycle::Lifecycle, store::Store};

use super::{run_lifecycle, ApiError};

#[tracing::instrument(
    "Listing items",
    skip(lifecycle)
)]
pub async fn list_items<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>
) -> Result<HttpResponse, ApiError> {
    let items = run_lifecycle(lifecycle, |l| l.list_items()).await?;
    Ok(HttpResponse::Ok().json(items))
}

#[tracing::instrument(
    "Getting item",
    skip(lifecycle)
)]
pub async fn get_item<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let item = run_lifecycle(lifecycle, move |l| l.get_item(id)).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[tracing::instrument(
    "Posting item",
    skip(lifecycle)
)]
pub async fn post_item<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    json: web::Json<NewItem>
) -> Result<HttpResponse, ApiError> {
    let item = run_lifecycle(lifecycle, move |l| l.create_item(json.into_inner())).await?;
    Ok(HttpResponse::Created().json(item))
}

#[tracing::instrument(
    "Updating item",
    skip(lifecycle)
)]
pub async fn update_item<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>,
    json: web::Json<ItemPatch>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let item = run_lifecycle(lifecycle, move |l| l.update_item(id, json.into_inner())).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[tracing::instrument(
    "Deleting item",
    skip(lifecycle)
)]
pub async fn delete_item<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    run_lifecycle(lifecycle, move |l| l.delete_item(id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
