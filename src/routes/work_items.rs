use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{domain::WorkStatus, lifecycle::Lifecycle, store::Store};

use super::{run_lifecycle, ApiError};

#[derive(Deserialize, Debug)]
pub struct WorkItemsQuery{
    pub status: Option<String>
}

#[derive(Deserialize, Debug)]
pub struct StatusUpdateJson{
    pub status: String
}

fn parse_status(raw: &str) -> Result<WorkStatus, ApiError> {
    raw.parse().map_err(ApiError::BadRequest)
}

#[tracing::instrument(
    "Listing work items",
    skip(lifecycle)
)]
pub async fn list_work_items<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    query: web::Query<WorkItemsQuery>
) -> Result<HttpResponse, ApiError> {
    let status = query.0.status
        .as_deref()
        .map(parse_status)
        .transpose()?;

    let work_items = run_lifecycle(lifecycle, move |l| l.list_work_items(status)).await?;
    Ok(HttpResponse::Ok().json(work_items))
}

#[tracing::instrument(
    "Getting work item",
    skip(lifecycle)
)]
pub async fn get_work_item<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let work_item = run_lifecycle(lifecycle, move |l| l.get_work_item(id)).await?;
    Ok(HttpResponse::Ok().json(work_item))
}

#[tracing::instrument(
    "Updating work item status",
    skip(lifecycle)
)]
pub async fn update_work_item_status<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>,
    json: web::Json<StatusUpdateJson>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let status = parse_status(&json.status)?;

    let work_item = run_lifecycle(lifecycle, move |l| l.update_work_item_status(id, status)).await?;
    Ok(HttpResponse::Ok().json(work_item))
}
