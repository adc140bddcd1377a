use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{lifecycle::Lifecycle, routes::{run_lifecycle, ApiError}, store::Store};

#[tracing::instrument(
    "Marking order ready",
    skip(lifecycle)
)]
pub async fn mark_ready<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let order = run_lifecycle(lifecycle, move |l| l.mark_ready(id)).await?;
    Ok(HttpResponse::Ok().json(order))
}

#[tracing::instrument(
    "Marking order served",
    skip(lifecycle)
)]
pub async fn mark_served<S: Store>(
    lifecycle: web::Data<Lifecycle<S>>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let order = run_lifecycle(lifecycle, move |l| l.mark_served(id)).await?;
    Ok(HttpResponse::Ok().json(order))
}
