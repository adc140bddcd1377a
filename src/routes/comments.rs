use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{domain::NewComment, lifecycle::Lifecycle, store::Store};

use super::{run_lifecycle, ApiError};

#[tracing::instrument(
    "Listing order comments",
    skip(lifecycle)
)]
pub async fn list_comments<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    let comments = run_lifecycle(lifecycle, move |l| l.list_comments(order_id)).await?;
    Ok(HttpResponse::Ok().json(comments))
}

#[tracing::instrument(
    "Posting order comment",
    skip(lifecycle)
)]
pub async fn post_comment<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>,
    json: web::Json<NewComment>
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();
    let comment = run_lifecycle(lifecycle, move |l| l.add_comment(order_id, json.into_inner())).await?;
    Ok(HttpResponse::Created().json(comment))
}
